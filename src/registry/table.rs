// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Constructor table: encoding name to factory, merged from every plugin.

use indexmap::map::Entry;
use indexmap::IndexMap;
use tracing::{error, info};

use crate::core::{RegistryError, Result};
use crate::plugin::{EncodingFactory, PluginModuleName, PluginSource};

/// A registered factory and the module that contributed it.
#[derive(Debug, Clone)]
pub struct ConstructorEntry {
    /// Factory producing construction parameters
    pub factory: EncodingFactory,
    /// Contributing plugin module
    pub module: PluginModuleName,
}

/// Insertion-ordered mapping from encoding name to factory.
///
/// Order is module enumeration order, then per-module registration order.
#[derive(Debug, Clone, Default)]
pub struct ConstructorTable {
    entries: IndexMap<String, ConstructorEntry>,
}

impl ConstructorTable {
    /// Load every module in `modules` from `source` and merge their factories.
    ///
    /// The table is only returned once every module has loaded cleanly; any
    /// failure discards everything merged so far.
    ///
    /// # Errors
    ///
    /// - `RegistryError::PluginLoadFailure` if a module cannot be loaded
    /// - `RegistryError::MalformedPlugin` if a module exposes no constructors
    /// - `RegistryError::DuplicateEncodingName` if a name is registered twice
    pub fn build(source: &dyn PluginSource, modules: &[PluginModuleName]) -> Result<Self> {
        let mut table = Self::default();

        for module_name in modules {
            let module = source.load(module_name).inspect_err(|e| {
                error!(module = %module_name, error = %e, "Error importing plugin module");
            })?;

            let Some(constructors) = module.into_constructors() else {
                error!(
                    module = %module_name,
                    "Plugin does not define encoding constructors"
                );
                return Err(RegistryError::malformed_plugin(module_name.as_str()));
            };

            for (name, factory) in constructors {
                table.insert(name, factory, module_name)?;
            }
        }

        Ok(table)
    }

    fn insert(
        &mut self,
        name: String,
        factory: EncodingFactory,
        module: &PluginModuleName,
    ) -> Result<()> {
        match self.entries.entry(name) {
            Entry::Occupied(occupied) => {
                error!(
                    encoding = %occupied.key(),
                    module = %module,
                    first_module = %occupied.get().module,
                    "Duplicate encoding name"
                );
                Err(RegistryError::duplicate_name(
                    occupied.key().as_str(),
                    module.as_str(),
                ))
            }
            Entry::Vacant(vacant) => {
                info!(encoding = %vacant.key(), module = %module, "Registered encoding");
                vacant.insert(ConstructorEntry {
                    factory,
                    module: module.clone(),
                });
                Ok(())
            }
        }
    }

    /// Look up the entry for an encoding name.
    pub fn get(&self, name: &str) -> Option<&ConstructorEntry> {
        self.entries.get(name)
    }

    /// Check if an encoding name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names in insertion order.
    pub fn names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Module that registered `name`.
    pub fn module_of(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(|entry| entry.module.as_str())
    }

    /// Iterate over `(name, entry)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConstructorEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    /// Number of registered encodings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no encodings are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
