// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! TOML plugin manifests.
//!
//! A manifest declares the encodings one plugin module contributes:
//!
//! ```toml
//! [encodings.cl100k_base]
//! pat_str = "'s|'t|\\s+(?!\\S)|\\S+"
//! ranks = "cl100k_base.tiktoken"
//! explicit_n_vocab = 100277
//!
//! [encodings.cl100k_base.special_tokens]
//! "<|endoftext|>" = 100257
//! ```
//!
//! Rank file paths are resolved against the manifest's directory and are
//! only read when the encoding's factory runs.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;

use super::ranks::load_tiktoken_bpe;
use super::PluginModule;
use crate::core::{ConstructionParams, Rank, RegistryError};

/// Parsed plugin manifest.
#[derive(Debug, Clone, Default)]
pub struct PluginManifest {
    /// Encodings keyed by name, in declaration order.
    ///
    /// `None` when the manifest has no `encodings` key, or when that key is
    /// not a table.
    pub encodings: Option<IndexMap<String, ManifestEncoding>>,
}

/// One encoding declared in a manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestEncoding {
    /// Pre-tokenization split pattern
    pub pat_str: String,
    /// Path to the `.tiktoken` rank file
    pub ranks: PathBuf,
    /// Special token text to rank
    #[serde(default)]
    pub special_tokens: IndexMap<String, Rank>,
    /// Expected vocabulary size
    #[serde(default)]
    pub explicit_n_vocab: Option<usize>,
}

impl PluginManifest {
    /// Parse a manifest from TOML text.
    ///
    /// Syntax errors and badly shaped encoding entries are errors. An
    /// `encodings` key holding anything other than a table yields a manifest
    /// without encodings, which loads as a module without constructors.
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        let mut document: toml::Table = toml::from_str(contents)?;
        let encodings = match document.remove("encodings") {
            Some(table @ toml::Value::Table(_)) => {
                Some(table.try_into::<IndexMap<String, ManifestEncoding>>()?)
            }
            Some(_) | None => None,
        };
        Ok(Self { encodings })
    }

    /// Turn the manifest into a loaded plugin module.
    ///
    /// Each declared encoding becomes a factory that reads its rank file
    /// (relative to `base_dir`) when invoked.
    pub fn into_module(self, module: &str, base_dir: &Path) -> PluginModule {
        let Some(encodings) = self.encodings else {
            return PluginModule::without_constructors(module);
        };

        let mut plugin = PluginModule::new(module);
        for (name, entry) in encodings {
            let ranks_path = base_dir.join(&entry.ranks);
            let encoding_name = name.clone();
            plugin = plugin.with_constructor(name, move || {
                let ranks = load_tiktoken_bpe(&ranks_path)
                    .map_err(|e| RegistryError::factory_failure(&encoding_name, e))?;

                let mut params = ConstructionParams::new(&encoding_name, &entry.pat_str)
                    .with_mergeable_ranks(ranks);
                for (token, rank) in &entry.special_tokens {
                    params = params.with_special_token(token, *rank);
                }
                params.explicit_n_vocab = entry.explicit_n_vocab;
                Ok(params)
            });
        }
        plugin
    }
}
