// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Encoding registry with lazy, build-once construction.
//!
//! [`EncodingRegistry`] discovers plugin modules through a [`PluginSource`],
//! merges their factories into a [`ConstructorTable`] on first use, and
//! builds each requested encoding exactly once.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//!
//! use tokreg::core::ConstructionParams;
//! use tokreg::plugin::{PluginModule, StaticPluginSource};
//! use tokreg::registry::EncodingRegistry;
//!
//! let source = StaticPluginSource::new().with_loaded(
//!     PluginModule::new("builtin").with_constructor("bytes", || {
//!         let ranks: HashMap<Vec<u8>, u32> = (0..=255u8).map(|b| (vec![b], u32::from(b))).collect();
//!         Ok(ConstructionParams::new("bytes", r"\S+|\s+").with_mergeable_ranks(ranks))
//!     }),
//! );
//!
//! let registry = EncodingRegistry::new(source);
//! assert_eq!(registry.list_encoding_names()?, vec!["bytes".to_string()]);
//!
//! let enc = registry.get_encoding("bytes")?;
//! assert_eq!(enc.n_vocab(), 256);
//! # Ok::<(), tokreg::RegistryError>(())
//! ```

pub mod global;
pub mod table;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use arc_swap::{ArcSwap, ArcSwapOption};
use parking_lot::ReentrantMutex;
use tracing::{debug, error, info};

use crate::core::{DefaultEncodingBuilder, Encoding, EncodingBuilder, RegistryError, Result};
use crate::plugin::{PluginModuleName, PluginSource};

pub use global::{
    get_encoding, global_registry, install_global_registry, list_encoding_names,
};
pub use table::{ConstructorEntry, ConstructorTable};

/// Registry of named encodings contributed by plugin modules.
///
/// All state is published through atomic snapshots. Readers never take the
/// coordination lock once the value they want has been published; the lock
/// only serializes first-time discovery, table assembly and cache population.
pub struct EncodingRegistry<E = Encoding> {
    source: Box<dyn PluginSource>,
    builder: Box<dyn EncodingBuilder<E>>,
    // re-entrant: the slow paths call each other while holding it
    lock: ReentrantMutex<()>,
    plugin_modules: ArcSwapOption<Vec<PluginModuleName>>,
    constructors: ArcSwapOption<ConstructorTable>,
    encodings: ArcSwap<HashMap<String, Arc<E>>>,
}

impl EncodingRegistry<Encoding> {
    /// Create a registry building the default [`Encoding`] type.
    pub fn new(source: impl PluginSource + 'static) -> Self {
        Self::with_builder(source, DefaultEncodingBuilder)
    }
}

impl<E> EncodingRegistry<E>
where
    E: Send + Sync + 'static,
{
    /// Create a registry with a custom encoding builder.
    pub fn with_builder(
        source: impl PluginSource + 'static,
        builder: impl EncodingBuilder<E> + 'static,
    ) -> Self {
        Self {
            source: Box::new(source),
            builder: Box::new(builder),
            lock: ReentrantMutex::new(()),
            plugin_modules: ArcSwapOption::empty(),
            constructors: ArcSwapOption::empty(),
            encodings: ArcSwap::from_pointee(HashMap::new()),
        }
    }

    /// Names of all plugin modules available to this registry.
    ///
    /// Scans the plugin source once; later calls return the memoized list.
    /// A failed scan is not memoized.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::SourceUnavailable` if the source cannot be
    /// scanned.
    pub fn available_plugin_sources(&self) -> Result<Arc<Vec<PluginModuleName>>> {
        if let Some(modules) = self.plugin_modules.load_full() {
            return Ok(modules);
        }

        let _guard = self.lock.lock();
        if let Some(modules) = self.plugin_modules.load_full() {
            return Ok(modules);
        }

        let modules = Arc::new(self.source.enumerate()?);
        debug!(modules = ?modules, "Available plugin modules");
        self.plugin_modules.store(Some(Arc::clone(&modules)));
        Ok(modules)
    }

    /// Load every plugin module and build the constructor table.
    ///
    /// Runs at most once successfully; later calls return the published
    /// table without reloading any module. A failed build publishes nothing.
    pub fn build_constructor_table(&self) -> Result<Arc<ConstructorTable>> {
        if let Some(table) = self.constructors.load_full() {
            return Ok(table);
        }

        let _guard = self.lock.lock();
        if let Some(table) = self.constructors.load_full() {
            return Ok(table);
        }

        let modules = self.available_plugin_sources()?;
        let table = Arc::new(ConstructorTable::build(self.source.as_ref(), &modules)?);
        self.constructors.store(Some(Arc::clone(&table)));
        Ok(table)
    }

    /// Get an encoding by name, building it on first request.
    ///
    /// For a given name the factory and builder run at most once, no matter
    /// how many threads ask concurrently; every caller receives the same
    /// shared value.
    ///
    /// # Errors
    ///
    /// - Any constructor table build error
    /// - `RegistryError::UnknownEncoding` if no plugin registered `name`
    /// - Factory or builder errors; these are not cached and a later call
    ///   tries again
    pub fn get_encoding(&self, name: &str) -> Result<Arc<E>> {
        if let Some(encoding) = self.encodings.load().get(name) {
            return Ok(Arc::clone(encoding));
        }

        let _guard = self.lock.lock();
        if let Some(encoding) = self.encodings.load().get(name) {
            return Ok(Arc::clone(encoding));
        }

        let table = self.build_constructor_table()?;
        let Some(entry) = table.get(name) else {
            let available = self.available_plugin_sources()?;
            error!(encoding = name, plugins = ?available, "Unknown encoding");
            return Err(RegistryError::unknown_encoding(name, available.to_vec()));
        };

        let params = entry.factory.construct()?;
        let encoding = Arc::new(self.builder.build(params)?);

        let mut next = HashMap::clone(&self.encodings.load());
        next.insert(name.to_string(), Arc::clone(&encoding));
        self.encodings.store(Arc::new(next));

        info!(encoding = name, module = %entry.module, "Created and cached encoding");
        Ok(encoding)
    }

    /// All registered encoding names in insertion order.
    ///
    /// Builds the constructor table if needed but never constructs an
    /// encoding.
    pub fn list_encoding_names(&self) -> Result<Vec<String>> {
        let names = self.build_constructor_table()?.names();
        debug!(encodings = ?names, "Available encoding names");
        Ok(names)
    }

    /// Whether `name` has already been built and cached.
    pub fn is_cached(&self, name: &str) -> bool {
        self.encodings.load().contains_key(name)
    }

    /// Names of encodings built so far, sorted.
    pub fn cached_encoding_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.encodings.load().keys().cloned().collect();
        names.sort();
        names
    }

    /// Forget every memoized result.
    ///
    /// The next call rediscovers plugin modules, reloads them and rebuilds
    /// encodings on demand. Encodings already handed out stay valid.
    pub fn reset(&self) {
        let _guard = self.lock.lock();
        self.plugin_modules.store(None);
        self.constructors.store(None);
        self.encodings.store(Arc::new(HashMap::new()));
        debug!("Encoding registry reset");
    }
}

impl<E> fmt::Debug for EncodingRegistry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodingRegistry")
            .field("plugin_modules", &self.plugin_modules.load().as_deref())
            .field(
                "constructors",
                &self.constructors.load().as_ref().map(|t| t.len()),
            )
            .field("cached", &self.encodings.load().len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::core::ConstructionParams;
    use crate::plugin::{PluginModule, StaticPluginSource};

    fn counted_source(loads: Arc<AtomicUsize>, calls: Arc<AtomicUsize>) -> StaticPluginSource {
        StaticPluginSource::new().with_module("counted", move || {
            loads.fetch_add(1, Ordering::SeqCst);
            let calls = Arc::clone(&calls);
            Ok(PluginModule::new("counted").with_constructor("enc", move || {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(ConstructionParams::new("enc", ""))
            }))
        })
    }

    fn name_builder(params: ConstructionParams) -> Result<String> {
        Ok(params.name)
    }

    #[test]
    fn test_get_encoding_caches() {
        let loads = Arc::new(AtomicUsize::new(0));
        let calls = Arc::new(AtomicUsize::new(0));
        let registry = EncodingRegistry::with_builder(
            counted_source(Arc::clone(&loads), Arc::clone(&calls)),
            name_builder,
        );

        let first = registry.get_encoding("enc").unwrap();
        let second = registry.get_encoding("enc").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(loads.load(Ordering::SeqCst), 1);
        assert!(registry.is_cached("enc"));
    }

    #[test]
    fn test_unknown_encoding_leaves_cache_untouched() {
        let registry = EncodingRegistry::with_builder(
            counted_source(Arc::default(), Arc::default()),
            name_builder,
        );

        let err = registry.get_encoding("missing").unwrap_err();
        match err {
            RegistryError::UnknownEncoding {
                name,
                available_sources,
            } => {
                assert_eq!(name, "missing");
                assert_eq!(available_sources, vec!["counted".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(registry.cached_encoding_names().is_empty());
    }

    #[test]
    fn test_reset_forces_rediscovery() {
        let loads = Arc::new(AtomicUsize::new(0));
        let calls = Arc::new(AtomicUsize::new(0));
        let registry = EncodingRegistry::with_builder(
            counted_source(Arc::clone(&loads), Arc::clone(&calls)),
            name_builder,
        );

        let before = registry.get_encoding("enc").unwrap();
        registry.reset();
        assert!(!registry.is_cached("enc"));

        let after = registry.get_encoding("enc").unwrap();
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(loads.load(Ordering::SeqCst), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_builder_failure_is_retried() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&attempts);
        let builder = move |params: ConstructionParams| -> Result<String> {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(RegistryError::invalid_params(&params.name, "first attempt fails"))
            } else {
                Ok(params.name)
            }
        };
        let registry = EncodingRegistry::with_builder(
            counted_source(Arc::default(), Arc::default()),
            builder,
        );

        assert!(registry.get_encoding("enc").is_err());
        assert!(!registry.is_cached("enc"));
        assert_eq!(*registry.get_encoding("enc").unwrap(), "enc");
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_debug_reports_state() {
        let registry = EncodingRegistry::with_builder(StaticPluginSource::new(), name_builder);
        registry.list_encoding_names().unwrap();
        let debug = format!("{registry:?}");
        assert!(debug.contains("EncodingRegistry"));
        assert!(debug.contains("cached: 0"));
    }
}
