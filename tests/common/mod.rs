// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokreg::core::{ConstructionParams, Rank};
use tokreg::plugin::{PluginModule, StaticPluginSource};

// ============================================================================
// Fixtures
// ============================================================================

/// Path to a file or directory under `tests/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(manifest_dir)
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Single-byte ranks for `b'a'..b'a' + n`.
pub fn letter_ranks(n: u8) -> HashMap<Vec<u8>, Rank> {
    (0..n).map(|i| (vec![b'a' + i], Rank::from(i))).collect()
}

/// Valid parameters for a small encoding named `name`.
pub fn tiny_params(name: &str) -> ConstructionParams {
    ConstructionParams::new(name, r"\s+(?!\S)|\S+")
        .with_mergeable_ranks(letter_ranks(4))
        .with_special_token("<|endoftext|>", 4)
        .with_explicit_n_vocab(5)
}

// ============================================================================
// Counting plugins
// ============================================================================

/// Counters observed by [`CountingPlugins`].
#[derive(Debug, Default)]
pub struct Counters {
    loads: HashMap<String, AtomicUsize>,
    factories: HashMap<String, AtomicUsize>,
}

impl Counters {
    /// Times module `module` was loaded.
    pub fn loads(&self, module: &str) -> usize {
        self.loads
            .get(module)
            .map_or(0, |c| c.load(Ordering::SeqCst))
    }

    /// Times the factory for `encoding` ran.
    pub fn factory_calls(&self, encoding: &str) -> usize {
        self.factories
            .get(encoding)
            .map_or(0, |c| c.load(Ordering::SeqCst))
    }

    /// Total factory runs across all encodings.
    pub fn total_factory_calls(&self) -> usize {
        self.factories
            .values()
            .map(|c| c.load(Ordering::SeqCst))
            .sum()
    }
}

/// Declarative description of test plugin modules.
///
/// Each module lists the encoding names it registers; `None` models a
/// module without a constructor mapping.
pub struct CountingPlugins {
    modules: Vec<(&'static str, Option<Vec<&'static str>>)>,
}

impl CountingPlugins {
    pub fn new() -> Self {
        Self {
            modules: Vec::new(),
        }
    }

    /// Add a well-formed module registering `encodings` in order.
    pub fn module(mut self, name: &'static str, encodings: &[&'static str]) -> Self {
        self.modules.push((name, Some(encodings.to_vec())));
        self
    }

    /// Add a module that exposes no constructor mapping.
    pub fn malformed(mut self, name: &'static str) -> Self {
        self.modules.push((name, None));
        self
    }

    /// Build the plugin source and the counters it updates.
    pub fn build(self) -> (StaticPluginSource, Arc<Counters>) {
        let mut counters = Counters::default();
        for (module, encodings) in &self.modules {
            counters.loads.insert(module.to_string(), AtomicUsize::new(0));
            for encoding in encodings.iter().flatten() {
                counters
                    .factories
                    .insert(encoding.to_string(), AtomicUsize::new(0));
            }
        }
        let counters = Arc::new(counters);

        let source = self
            .modules
            .into_iter()
            .fold(StaticPluginSource::new(), |source, (module, encodings)| {
                let counters = Arc::clone(&counters);
                source.with_module(module, move || {
                    counters.loads[module].fetch_add(1, Ordering::SeqCst);
                    let Some(encodings) = &encodings else {
                        return Ok(PluginModule::without_constructors(module));
                    };
                    let mut plugin = PluginModule::new(module);
                    for &encoding in encodings {
                        let counters = Arc::clone(&counters);
                        plugin = plugin.with_constructor(encoding, move || {
                            counters.factories[encoding].fetch_add(1, Ordering::SeqCst);
                            Ok(tiny_params(encoding))
                        });
                    }
                    Ok(plugin)
                })
            });

        (source, counters)
    }
}
