// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Process-wide encoding registry.
//!
//! This is a convenience singleton for applications that want one registry
//! for the whole process. Install it once at startup; for custom or isolated
//! registries, create an [`EncodingRegistry`] directly.
//!
//! # Example
//!
//! ```no_run
//! use tokreg::config::RegistryConfig;
//! use tokreg::registry::{get_encoding, install_global_registry};
//!
//! let registry = RegistryConfig::load("tokreg.toml")?.into_registry();
//! install_global_registry(registry)?;
//! let enc = get_encoding("cl100k_base")?;
//! # Ok::<(), tokreg::RegistryError>(())
//! ```

use std::sync::{Arc, OnceLock};

use super::EncodingRegistry;
use crate::core::{Encoding, RegistryError, Result};
use crate::plugin::StaticPluginSource;

static GLOBAL_REGISTRY: OnceLock<EncodingRegistry> = OnceLock::new();

/// Install the process-wide registry.
///
/// # Errors
///
/// Returns `RegistryError::AlreadyInstalled` if a registry was installed
/// before, or if [`global_registry`] already initialized the empty default.
pub fn install_global_registry(registry: EncodingRegistry) -> Result<()> {
    GLOBAL_REGISTRY
        .set(registry)
        .map_err(|_| RegistryError::AlreadyInstalled)
}

/// Get the process-wide registry.
///
/// Falls back to a registry with no plugins if none was installed.
pub fn global_registry() -> &'static EncodingRegistry {
    GLOBAL_REGISTRY.get_or_init(|| EncodingRegistry::new(StaticPluginSource::new()))
}

/// Get an encoding from the process-wide registry.
pub fn get_encoding(name: &str) -> Result<Arc<Encoding>> {
    global_registry().get_encoding(name)
}

/// List encoding names known to the process-wide registry.
pub fn list_encoding_names() -> Result<Vec<String>> {
    global_registry().list_encoding_names()
}
