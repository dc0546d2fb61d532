// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Filesystem plugin source.
//!
//! Every regular file in the plugin directory whose extension matches is a
//! plugin module named by its file stem. See [`PluginManifest`] for the file
//! format.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::manifest::PluginManifest;
use super::{PluginModule, PluginModuleName, PluginSource};
use crate::core::{RegistryError, Result};

/// Default manifest file extension.
pub const DEFAULT_MANIFEST_EXTENSION: &str = "toml";

/// Plugin source scanning a directory of TOML manifests.
#[derive(Debug, Clone)]
pub struct DirectoryPluginSource {
    dir: PathBuf,
    extension: String,
}

impl DirectoryPluginSource {
    /// Create a source for `dir` using the default `.toml` extension.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            extension: DEFAULT_MANIFEST_EXTENSION.to_string(),
        }
    }

    /// Use a different manifest extension (without the leading dot).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Directory being scanned.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn manifest_path(&self, module: &str) -> PathBuf {
        self.dir.join(format!("{module}.{}", self.extension))
    }
}

impl PluginSource for DirectoryPluginSource {
    fn enumerate(&self) -> Result<Vec<PluginModuleName>> {
        let unavailable = |e: std::io::Error| {
            RegistryError::source_unavailable(format!(
                "cannot scan plugin directory '{}': {e}",
                self.dir.display()
            ))
        };

        let mut modules = Vec::new();
        for entry in std::fs::read_dir(&self.dir).map_err(unavailable)? {
            let path = entry.map_err(unavailable)?.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some(self.extension.as_str()) {
                continue;
            }
            match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) => modules.push(stem.to_string()),
                None => warn!(path = %path.display(), "Skipping manifest with non-UTF-8 name"),
            }
        }
        modules.sort();

        debug!(
            dir = %self.dir.display(),
            count = modules.len(),
            "Scanned plugin directory"
        );
        Ok(modules)
    }

    fn load(&self, module: &str) -> Result<PluginModule> {
        let path = self.manifest_path(module);
        let contents =
            std::fs::read_to_string(&path).map_err(|e| RegistryError::plugin_load(module, e))?;
        let manifest = PluginManifest::from_toml_str(&contents)
            .map_err(|e| RegistryError::plugin_load(module, e))?;

        let base_dir = path.parent().unwrap_or(&self.dir);
        Ok(manifest.into_module(module, base_dir))
    }
}
