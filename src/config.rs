// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Registry configuration.
//!
//! ```toml
//! plugin_dirs = ["plugins", "/opt/tokreg/plugins"]
//! extension = "toml"
//! ```
//!
//! Relative plugin directories resolve against the directory holding the
//! config file.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::core::{RegistryError, Result};
use crate::plugin::{CompositePluginSource, DirectoryPluginSource, DEFAULT_MANIFEST_EXTENSION};
use crate::registry::EncodingRegistry;

/// Plugin discovery configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Directories scanned for plugin manifests, in priority order
    #[serde(default)]
    pub plugin_dirs: Vec<PathBuf>,
    /// Manifest file extension
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_extension() -> String {
    DEFAULT_MANIFEST_EXTENSION.to_string()
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            plugin_dirs: Vec::new(),
            extension: default_extension(),
        }
    }
}

impl RegistryConfig {
    /// Parse a config from TOML text. Paths are kept as written.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| RegistryError::config("<inline>", e.to_string()))
    }

    /// Load a config file, resolving relative plugin directories against it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let contents = std::fs::read_to_string(path)
            .map_err(|e| RegistryError::config(&display, e.to_string()))?;
        let mut config: Self =
            toml::from_str(&contents).map_err(|e| RegistryError::config(&display, e.to_string()))?;

        if let Some(base) = path.parent() {
            config.resolve_relative_to(base);
        }
        Ok(config)
    }

    /// Add a plugin directory after the configured ones.
    pub fn with_plugin_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.plugin_dirs.push(dir.into());
        self
    }

    /// Make relative plugin directories relative to `base`.
    pub fn resolve_relative_to(&mut self, base: &Path) {
        for dir in &mut self.plugin_dirs {
            if dir.is_relative() {
                *dir = base.join(&*dir);
            }
        }
    }

    /// Build the plugin source described by this config.
    pub fn into_source(self) -> CompositePluginSource {
        let extension = self.extension;
        self.plugin_dirs
            .into_iter()
            .fold(CompositePluginSource::new(), |source, dir| {
                source.with_source(DirectoryPluginSource::new(dir).with_extension(extension.clone()))
            })
    }

    /// Build a registry over the plugin source described by this config.
    pub fn into_registry(self) -> EncodingRegistry {
        EncodingRegistry::new(self.into_source())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::PluginSource;

    #[test]
    fn test_parse_config() {
        let config = RegistryConfig::from_toml_str(
            "plugin_dirs = [\"plugins\", \"/abs/plugins\"]\nextension = \"plugin\"\n",
        )
        .unwrap();
        assert_eq!(
            config.plugin_dirs,
            vec![PathBuf::from("plugins"), PathBuf::from("/abs/plugins")]
        );
        assert_eq!(config.extension, "plugin");
    }

    #[test]
    fn test_defaults() {
        let config = RegistryConfig::from_toml_str("").unwrap();
        assert_eq!(config, RegistryConfig::default());
        assert_eq!(config.extension, "toml");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = RegistryConfig::from_toml_str("plugin_dir = \"x\"\n").unwrap_err();
        assert!(matches!(err, RegistryError::Config { .. }));
    }

    #[test]
    fn test_load_resolves_relative_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokreg.toml");
        std::fs::write(&path, "plugin_dirs = [\"plugins\", \"/abs/plugins\"]\n").unwrap();

        let config = RegistryConfig::load(&path).unwrap();
        assert_eq!(config.plugin_dirs[0], dir.path().join("plugins"));
        assert_eq!(config.plugin_dirs[1], PathBuf::from("/abs/plugins"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = RegistryConfig::load("/nonexistent/tokreg.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/tokreg.toml"));
    }

    #[test]
    fn test_into_source_chains_dirs() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        std::fs::write(first.path().join("a.toml"), "").unwrap();
        std::fs::write(second.path().join("b.toml"), "").unwrap();

        let source = RegistryConfig::default()
            .with_plugin_dir(first.path())
            .with_plugin_dir(second.path())
            .into_source();
        assert_eq!(source.enumerate().unwrap(), vec!["a", "b"]);
    }
}
