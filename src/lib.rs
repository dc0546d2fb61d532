// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # tokreg
//!
//! Plugin-backed registry of BPE tokenizer encodings.
//!
//! Plugin modules contribute named encoding factories. The registry
//! discovers them on first use, rejects duplicate names, and builds each
//! requested encoding exactly once, sharing the result between all callers
//! and threads.
//!
//! ## Architecture
//!
//! - `core/` - Error taxonomy, construction parameters, the default
//!   [`Encoding`] and the [`EncodingBuilder`] seam
//! - `plugin/` - [`PluginSource`] discovery: in-process, directory of TOML
//!   manifests, or a chain of both
//! - `registry/` - [`EncodingRegistry`], the constructor table and the
//!   process-wide convenience registry
//! - `config` - [`RegistryConfig`] describing plugin directories
//!
//! ## Example: Loading plugins from a directory
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use tokreg::{DirectoryPluginSource, EncodingRegistry};
//!
//! let registry = EncodingRegistry::new(DirectoryPluginSource::new("plugins"));
//! for name in registry.list_encoding_names()? {
//!     println!("{name}");
//! }
//! let enc = registry.get_encoding("cl100k_base")?;
//! println!("n_vocab = {}", enc.n_vocab());
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

pub use crate::core::{
    ConstructionParams, DefaultEncodingBuilder, Encoding, EncodingBuilder, Rank, RegistryError,
    Result,
};

// Plugin discovery
pub mod plugin;

pub use plugin::{
    CompositePluginSource, DirectoryPluginSource, EncodingFactory, PluginModule,
    PluginModuleName, PluginSource, StaticPluginSource,
};

// Registry
pub mod registry;

pub use registry::{ConstructorTable, EncodingRegistry};

// Configuration
pub mod config;

pub use config::RegistryConfig;
