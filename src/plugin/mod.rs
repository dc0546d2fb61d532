// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Plugin discovery and loading.
//!
//! A [`PluginSource`] lists the plugin modules available to a registry and
//! loads them on request. Each loaded [`PluginModule`] contributes an ordered
//! list of encoding names with the [`EncodingFactory`] that produces their
//! construction parameters.
//!
//! Provided sources:
//! - [`StaticPluginSource`] - modules registered in-process
//! - [`DirectoryPluginSource`] - TOML manifests scanned from a directory
//! - [`CompositePluginSource`] - several sources chained in order

pub mod composite;
pub mod directory;
pub mod manifest;
pub mod ranks;
pub mod static_source;

use std::fmt;
use std::sync::Arc;

use crate::core::{ConstructionParams, Result};

pub use composite::CompositePluginSource;
pub use directory::{DirectoryPluginSource, DEFAULT_MANIFEST_EXTENSION};
pub use manifest::{ManifestEncoding, PluginManifest};
pub use ranks::{load_tiktoken_bpe, parse_tiktoken_bpe, RankFileError};
pub use static_source::StaticPluginSource;

/// Name of a discoverable plugin module.
pub type PluginModuleName = String;

/// Capability that enumerates and loads plugin modules.
///
/// Implementations must be deterministic: two calls to [`enumerate`]
/// in the same environment return the same names in the same order.
///
/// [`enumerate`]: PluginSource::enumerate
pub trait PluginSource: Send + Sync {
    /// List the names of all available plugin modules.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::SourceUnavailable` if the scan itself fails.
    fn enumerate(&self) -> Result<Vec<PluginModuleName>>;

    /// Load one plugin module by name.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::PluginLoadFailure` if the module cannot be
    /// loaded.
    fn load(&self, module: &str) -> Result<PluginModule>;
}

impl<S: PluginSource + ?Sized> PluginSource for Arc<S> {
    fn enumerate(&self) -> Result<Vec<PluginModuleName>> {
        (**self).enumerate()
    }

    fn load(&self, module: &str) -> Result<PluginModule> {
        (**self).load(module)
    }
}

/// Zero-argument function producing construction parameters.
///
/// Cloning is cheap; clones share the same underlying function.
#[derive(Clone)]
pub struct EncodingFactory {
    inner: Arc<dyn Fn() -> Result<ConstructionParams> + Send + Sync>,
}

impl EncodingFactory {
    /// Wrap a function as a factory.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> Result<ConstructionParams> + Send + Sync + 'static,
    {
        Self { inner: Arc::new(f) }
    }

    /// Run the factory.
    pub fn construct(&self) -> Result<ConstructionParams> {
        (self.inner)()
    }
}

impl fmt::Debug for EncodingFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodingFactory").finish_non_exhaustive()
    }
}

/// A loaded plugin module.
#[derive(Debug, Clone)]
pub struct PluginModule {
    name: PluginModuleName,
    constructors: Option<Vec<(String, EncodingFactory)>>,
}

impl PluginModule {
    /// Create a module exposing an (initially empty) constructor mapping.
    pub fn new(name: impl Into<PluginModuleName>) -> Self {
        Self {
            name: name.into(),
            constructors: Some(Vec::new()),
        }
    }

    /// Create a module that does not expose a constructor mapping at all.
    pub fn without_constructors(name: impl Into<PluginModuleName>) -> Self {
        Self {
            name: name.into(),
            constructors: None,
        }
    }

    /// Register an encoding factory under `encoding`.
    ///
    /// Registration order is kept. Has no effect on a module created with
    /// [`PluginModule::without_constructors`].
    pub fn with_constructor<F>(mut self, encoding: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Result<ConstructionParams> + Send + Sync + 'static,
    {
        self.push(encoding, EncodingFactory::new(factory));
        self
    }

    /// Register an existing factory handle under `encoding`.
    pub fn push(&mut self, encoding: impl Into<String>, factory: EncodingFactory) {
        if let Some(constructors) = self.constructors.as_mut() {
            constructors.push((encoding.into(), factory));
        }
    }

    /// Module name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Contributed `(encoding name, factory)` pairs, or `None` if the module
    /// does not expose a constructor mapping.
    pub fn constructors(&self) -> Option<&[(String, EncodingFactory)]> {
        self.constructors.as_deref()
    }

    /// Consume the module, returning its constructor mapping.
    pub fn into_constructors(self) -> Option<Vec<(String, EncodingFactory)>> {
        self.constructors
    }
}
