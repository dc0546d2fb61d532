// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Chain of plugin sources.

use std::collections::HashMap;
use std::fmt;

use parking_lot::Mutex;
use tracing::warn;

use super::{PluginModule, PluginModuleName, PluginSource};
use crate::core::{RegistryError, Result};

/// Plugin source that concatenates several child sources in order.
///
/// A module name produced by an earlier child shadows the same name in later
/// children.
#[derive(Default)]
pub struct CompositePluginSource {
    sources: Vec<Box<dyn PluginSource>>,
    // module name -> index of the child that owns it
    routes: Mutex<HashMap<PluginModuleName, usize>>,
}

impl CompositePluginSource {
    /// Create an empty composite.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a child source.
    pub fn with_source(mut self, source: impl PluginSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Append a boxed child source.
    pub fn push(&mut self, source: Box<dyn PluginSource>) {
        self.sources.push(source);
    }

    /// Number of child sources.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether there are no child sources.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl PluginSource for CompositePluginSource {
    fn enumerate(&self) -> Result<Vec<PluginModuleName>> {
        let mut modules = Vec::new();
        let mut routes = HashMap::new();

        for (idx, source) in self.sources.iter().enumerate() {
            for module in source.enumerate()? {
                if routes.contains_key(&module) {
                    warn!(module = %module, "Plugin module shadowed by an earlier source");
                    continue;
                }
                routes.insert(module.clone(), idx);
                modules.push(module);
            }
        }

        *self.routes.lock() = routes;
        Ok(modules)
    }

    fn load(&self, module: &str) -> Result<PluginModule> {
        let idx = self.routes.lock().get(module).copied();
        match idx {
            Some(idx) => self.sources[idx].load(module),
            None => Err(RegistryError::plugin_load(
                module,
                std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("plugin module '{module}' was not enumerated by any source"),
                ),
            )),
        }
    }
}

impl fmt::Debug for CompositePluginSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositePluginSource")
            .field("sources", &self.sources.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ConstructionParams;
    use crate::plugin::StaticPluginSource;

    fn source(modules: &[&'static str], tag: &'static str) -> StaticPluginSource {
        modules.iter().fold(StaticPluginSource::new(), |acc, name| {
            acc.with_loaded(
                PluginModule::new(*name)
                    .with_constructor(tag, move || Ok(ConstructionParams::new(tag, ""))),
            )
        })
    }

    #[test]
    fn test_enumerate_concatenates_in_order() {
        let composite = CompositePluginSource::new()
            .with_source(source(&["b", "a"], "first"))
            .with_source(source(&["c"], "second"));
        assert_eq!(composite.enumerate().unwrap(), vec!["b", "a", "c"]);
        assert_eq!(composite.len(), 2);
    }

    #[test]
    fn test_earlier_source_shadows_later() {
        let composite = CompositePluginSource::new()
            .with_source(source(&["shared"], "first"))
            .with_source(source(&["shared", "own"], "second"));
        assert_eq!(composite.enumerate().unwrap(), vec!["shared", "own"]);

        let module = composite.load("shared").unwrap();
        assert_eq!(module.constructors().unwrap()[0].0, "first");
    }

    #[test]
    fn test_load_before_enumerate_fails() {
        let composite = CompositePluginSource::new().with_source(source(&["a"], "t"));
        assert!(matches!(
            composite.load("a"),
            Err(RegistryError::PluginLoadFailure { .. })
        ));
    }
}
