// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Construction parameters produced by encoding factories.

use std::collections::HashMap;

/// Token rank (also the token id).
pub type Rank = u32;

/// Everything an encoding builder needs to construct an encoding.
///
/// The registry never looks inside this value; it hands it from the
/// factory straight to the builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructionParams {
    /// Encoding name
    pub name: String,
    /// Pre-tokenization split pattern
    pub pat_str: String,
    /// Byte sequence to merge rank
    pub mergeable_ranks: HashMap<Vec<u8>, Rank>,
    /// Special token text to rank
    pub special_tokens: HashMap<String, Rank>,
    /// Expected vocabulary size, checked by the builder when present
    pub explicit_n_vocab: Option<usize>,
}

impl ConstructionParams {
    /// Create parameters with no ranks and no special tokens.
    pub fn new(name: impl Into<String>, pat_str: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pat_str: pat_str.into(),
            mergeable_ranks: HashMap::new(),
            special_tokens: HashMap::new(),
            explicit_n_vocab: None,
        }
    }

    /// Set the mergeable ranks.
    pub fn with_mergeable_ranks(mut self, ranks: HashMap<Vec<u8>, Rank>) -> Self {
        self.mergeable_ranks = ranks;
        self
    }

    /// Add a special token.
    pub fn with_special_token(mut self, token: impl Into<String>, rank: Rank) -> Self {
        self.special_tokens.insert(token.into(), rank);
        self
    }

    /// Set the expected vocabulary size.
    pub fn with_explicit_n_vocab(mut self, n_vocab: usize) -> Self {
        self.explicit_n_vocab = Some(n_vocab);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_methods() {
        let ranks: HashMap<Vec<u8>, Rank> = [(b"a".to_vec(), 0), (b"b".to_vec(), 1)]
            .into_iter()
            .collect();
        let params = ConstructionParams::new("tiny", r"\w+")
            .with_mergeable_ranks(ranks)
            .with_special_token("<|endoftext|>", 2)
            .with_explicit_n_vocab(3);

        assert_eq!(params.name, "tiny");
        assert_eq!(params.mergeable_ranks.len(), 2);
        assert_eq!(params.special_tokens.get("<|endoftext|>"), Some(&2));
        assert_eq!(params.explicit_n_vocab, Some(3));
    }
}
