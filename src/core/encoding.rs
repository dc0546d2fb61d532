// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Immutable encoding values and the builder seam that produces them.
//!
//! The registry is generic over what it builds: anything implementing
//! [`EncodingBuilder`] can turn [`ConstructionParams`] into a shared value.
//! [`DefaultEncodingBuilder`] builds the crate's own [`Encoding`].

use std::collections::HashMap;

use fancy_regex::Regex;

use super::error::{RegistryError, Result};
use super::params::{ConstructionParams, Rank};

/// Turns construction parameters into an encoding value.
///
/// Builders run while the registry's coordination lock is held and at most
/// once per encoding name, so they may be arbitrarily expensive.
pub trait EncodingBuilder<E>: Send + Sync {
    /// Build an encoding from parameters returned by a factory.
    fn build(&self, params: ConstructionParams) -> Result<E>;
}

impl<E, F> EncodingBuilder<E> for F
where
    F: Fn(ConstructionParams) -> Result<E> + Send + Sync,
{
    fn build(&self, params: ConstructionParams) -> Result<E> {
        self(params)
    }
}

/// Builder for the crate's default [`Encoding`] type.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultEncodingBuilder;

impl EncodingBuilder<Encoding> for DefaultEncodingBuilder {
    fn build(&self, params: ConstructionParams) -> Result<Encoding> {
        Encoding::new(params)
    }
}

/// A validated, immutable BPE encoding definition.
///
/// Holds the compiled split pattern alongside the rank tables. Once built it
/// is never mutated and is shared between threads behind an `Arc`.
#[derive(Debug)]
pub struct Encoding {
    name: String,
    pat_str: String,
    pattern: Regex,
    mergeable_ranks: HashMap<Vec<u8>, Rank>,
    special_tokens: HashMap<String, Rank>,
    max_token_value: Rank,
}

impl Encoding {
    /// Validate parameters and build an encoding.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::InvalidParams` if:
    /// - the split pattern does not compile
    /// - there are no mergeable ranks
    /// - `explicit_n_vocab` disagrees with the number of tokens or with the
    ///   largest token value
    pub fn new(params: ConstructionParams) -> Result<Self> {
        let ConstructionParams {
            name,
            pat_str,
            mergeable_ranks,
            special_tokens,
            explicit_n_vocab,
        } = params;

        let pattern = Regex::new(&pat_str).map_err(|e| {
            RegistryError::invalid_params(&name, format!("split pattern does not compile: {e}"))
        })?;

        let max_rank = mergeable_ranks
            .values()
            .copied()
            .max()
            .ok_or_else(|| RegistryError::invalid_params(&name, "no mergeable ranks"))?;
        let max_special = special_tokens.values().copied().max().unwrap_or(0);
        let max_token_value = max_rank.max(max_special);

        if let Some(n_vocab) = explicit_n_vocab {
            let token_count = mergeable_ranks.len() + special_tokens.len();
            if token_count != n_vocab {
                return Err(RegistryError::invalid_params(
                    &name,
                    format!("expected {n_vocab} tokens, found {token_count}"),
                ));
            }
            if max_token_value as usize + 1 != n_vocab {
                return Err(RegistryError::invalid_params(
                    &name,
                    format!("max token value {max_token_value} does not match n_vocab {n_vocab}"),
                ));
            }
        }

        Ok(Self {
            name,
            pat_str,
            pattern,
            mergeable_ranks,
            special_tokens,
            max_token_value,
        })
    }

    /// Encoding name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Source text of the split pattern.
    pub fn pat_str(&self) -> &str {
        &self.pat_str
    }

    /// Compiled split pattern.
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// Byte sequence to merge rank table.
    pub fn mergeable_ranks(&self) -> &HashMap<Vec<u8>, Rank> {
        &self.mergeable_ranks
    }

    /// Special token table.
    pub fn special_tokens(&self) -> &HashMap<String, Rank> {
        &self.special_tokens
    }

    /// Rank of a special token, if registered.
    pub fn special_token(&self, token: &str) -> Option<Rank> {
        self.special_tokens.get(token).copied()
    }

    /// Largest token value across ranks and special tokens.
    pub fn max_token_value(&self) -> Rank {
        self.max_token_value
    }

    /// Vocabulary size (`max_token_value + 1`).
    pub fn n_vocab(&self) -> usize {
        self.max_token_value as usize + 1
    }
}
