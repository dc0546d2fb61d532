// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! In-process plugin source.
//!
//! Modules are registered as loader functions. A loader runs each time the
//! module is loaded, so any side effects it has happen on load, not on
//! registration.
//!
//! # Example
//!
//! ```
//! use tokreg::core::ConstructionParams;
//! use tokreg::plugin::{PluginModule, PluginSource, StaticPluginSource};
//!
//! let source = StaticPluginSource::new().with_module("builtin", || {
//!     Ok(PluginModule::new("builtin")
//!         .with_constructor("tiny", || Ok(ConstructionParams::new("tiny", r"\S+"))))
//! });
//! assert_eq!(source.enumerate().unwrap(), vec!["builtin".to_string()]);
//! ```

use std::fmt;
use std::sync::Arc;

use super::{PluginModule, PluginModuleName, PluginSource};
use crate::core::{RegistryError, Result};

type ModuleLoader = Arc<dyn Fn() -> Result<PluginModule> + Send + Sync>;

/// Plugin source backed by a fixed list of in-process loaders.
#[derive(Clone, Default)]
pub struct StaticPluginSource {
    modules: Vec<(PluginModuleName, ModuleLoader)>,
}

impl StaticPluginSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module loader.
    ///
    /// Modules enumerate in registration order.
    pub fn with_module<F>(mut self, name: impl Into<PluginModuleName>, loader: F) -> Self
    where
        F: Fn() -> Result<PluginModule> + Send + Sync + 'static,
    {
        self.modules.push((name.into(), Arc::new(loader)));
        self
    }

    /// Register an already-built module.
    ///
    /// Loading returns a clone of `module`.
    pub fn with_loaded(self, module: PluginModule) -> Self {
        let name = module.name().to_string();
        self.with_module(name, move || Ok(module.clone()))
    }

    /// Number of registered modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether no modules are registered.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl PluginSource for StaticPluginSource {
    fn enumerate(&self) -> Result<Vec<PluginModuleName>> {
        Ok(self.modules.iter().map(|(name, _)| name.clone()).collect())
    }

    fn load(&self, module: &str) -> Result<PluginModule> {
        let (_, loader) = self
            .modules
            .iter()
            .find(|(name, _)| name == module)
            .ok_or_else(|| {
                RegistryError::plugin_load(
                    module,
                    std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        format!("no static plugin module named '{module}'"),
                    ),
                )
            })?;
        loader()
    }
}

impl fmt::Debug for StaticPluginSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.modules.iter().map(|(name, _)| name.as_str()).collect();
        f.debug_struct("StaticPluginSource")
            .field("modules", &names)
            .finish()
    }
}
