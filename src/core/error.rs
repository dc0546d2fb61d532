// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for tokreg.
//!
//! Provides error types for every stage of the registry lifecycle:
//! - Plugin discovery and loading
//! - Constructor table assembly
//! - Encoding lookup and construction
//! - Configuration loading

use std::sync::Arc;

use thiserror::Error;

/// Shared, cloneable handle to an underlying cause.
pub type ErrorCause = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while discovering plugins or building encodings.
#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    /// The plugin scan mechanism itself is unavailable
    #[error("Plugin sources unavailable: {reason}")]
    SourceUnavailable {
        /// Why the scan failed
        reason: String,
    },

    /// A plugin module could not be loaded
    #[error("Error importing plugin module {module}: {cause}")]
    PluginLoadFailure {
        /// Module that failed to load
        module: String,
        /// Underlying error
        #[source]
        cause: ErrorCause,
    },

    /// A loaded plugin module does not expose encoding constructors
    #[error("Plugin {module} does not define ENCODING_CONSTRUCTORS")]
    MalformedPlugin {
        /// Offending module
        module: String,
    },

    /// Two registrations share the same encoding name
    #[error("Duplicate encoding name {name} in plugin {module}")]
    DuplicateEncodingName {
        /// Encoding name registered twice
        name: String,
        /// Module holding the second registration
        module: String,
    },

    /// No plugin registered the requested encoding
    #[error("Unknown encoding {name}. Plugins found: {available_sources:?}")]
    UnknownEncoding {
        /// Requested encoding name
        name: String,
        /// Plugin modules that were scanned
        available_sources: Vec<String>,
    },

    /// A factory could not produce construction parameters
    #[error("Encoding factory for {name} failed: {cause}")]
    FactoryFailure {
        /// Encoding whose factory failed
        name: String,
        /// Underlying error
        #[source]
        cause: ErrorCause,
    },

    /// The encoding builder rejected the construction parameters
    #[error("Invalid construction parameters for {name}: {reason}")]
    InvalidParams {
        /// Encoding being built
        name: String,
        /// Validation error message
        reason: String,
    },

    /// Configuration could not be read or parsed
    #[error("Invalid config '{path}': {message}")]
    Config {
        /// Config file path (or "<inline>")
        path: String,
        /// Error message
        message: String,
    },

    /// A process-wide registry was already installed
    #[error("Global encoding registry is already installed")]
    AlreadyInstalled,
}

impl RegistryError {
    /// Create a "source unavailable" error.
    pub fn source_unavailable(reason: impl Into<String>) -> Self {
        RegistryError::SourceUnavailable {
            reason: reason.into(),
        }
    }

    /// Create a plugin load failure wrapping the underlying cause.
    pub fn plugin_load<E>(module: impl Into<String>, cause: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        RegistryError::PluginLoadFailure {
            module: module.into(),
            cause: Arc::new(cause),
        }
    }

    /// Create a malformed plugin error.
    pub fn malformed_plugin(module: impl Into<String>) -> Self {
        RegistryError::MalformedPlugin {
            module: module.into(),
        }
    }

    /// Create a duplicate encoding name error.
    pub fn duplicate_name(name: impl Into<String>, module: impl Into<String>) -> Self {
        RegistryError::DuplicateEncodingName {
            name: name.into(),
            module: module.into(),
        }
    }

    /// Create an "unknown encoding" error listing the scanned plugin modules.
    pub fn unknown_encoding(name: impl Into<String>, available_sources: Vec<String>) -> Self {
        RegistryError::UnknownEncoding {
            name: name.into(),
            available_sources,
        }
    }

    /// Create a factory failure wrapping the underlying cause.
    pub fn factory_failure<E>(name: impl Into<String>, cause: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        RegistryError::FactoryFailure {
            name: name.into(),
            cause: Arc::new(cause),
        }
    }

    /// Create an invalid parameters error.
    pub fn invalid_params(name: impl Into<String>, reason: impl Into<String>) -> Self {
        RegistryError::InvalidParams {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a config error.
    pub fn config(path: impl Into<String>, message: impl Into<String>) -> Self {
        RegistryError::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Whether this error aborted constructor table assembly.
    pub fn is_table_build_failure(&self) -> bool {
        matches!(
            self,
            RegistryError::SourceUnavailable { .. }
                | RegistryError::PluginLoadFailure { .. }
                | RegistryError::MalformedPlugin { .. }
                | RegistryError::DuplicateEncodingName { .. }
        )
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            RegistryError::SourceUnavailable { reason } => vec![("reason", reason.clone())],
            RegistryError::PluginLoadFailure { module, cause } => {
                vec![("module", module.clone()), ("cause", cause.to_string())]
            }
            RegistryError::MalformedPlugin { module } => vec![("module", module.clone())],
            RegistryError::DuplicateEncodingName { name, module } => {
                vec![("encoding", name.clone()), ("module", module.clone())]
            }
            RegistryError::UnknownEncoding {
                name,
                available_sources,
            } => vec![
                ("encoding", name.clone()),
                ("plugins", available_sources.join(",")),
            ],
            RegistryError::FactoryFailure { name, cause } => {
                vec![("encoding", name.clone()), ("cause", cause.to_string())]
            }
            RegistryError::InvalidParams { name, reason } => {
                vec![("encoding", name.clone()), ("reason", reason.clone())]
            }
            RegistryError::Config { path, message } => {
                vec![("path", path.clone()), ("message", message.clone())]
            }
            RegistryError::AlreadyInstalled => Vec::new(),
        }
    }
}

/// Result type for tokreg operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_duplicate_name_error() {
        let err = RegistryError::duplicate_name("cl100k_base", "openai_public");
        assert!(matches!(err, RegistryError::DuplicateEncodingName { .. }));
        assert_eq!(
            err.to_string(),
            "Duplicate encoding name cl100k_base in plugin openai_public"
        );
    }

    #[test]
    fn test_unknown_encoding_lists_plugins() {
        let err = RegistryError::unknown_encoding(
            "does-not-exist",
            vec!["alpha".to_string(), "beta".to_string()],
        );
        assert_eq!(
            err.to_string(),
            "Unknown encoding does-not-exist. Plugins found: [\"alpha\", \"beta\"]"
        );
    }

    #[test]
    fn test_malformed_plugin_error() {
        let err = RegistryError::malformed_plugin("broken");
        assert_eq!(
            err.to_string(),
            "Plugin broken does not define ENCODING_CONSTRUCTORS"
        );
    }

    #[test]
    fn test_plugin_load_keeps_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = RegistryError::plugin_load("missing", io_err);
        assert_eq!(
            err.to_string(),
            "Error importing plugin module missing: no such file"
        );
        let source = err.source().expect("cause should be exposed as source");
        assert_eq!(source.to_string(), "no such file");
    }

    #[test]
    fn test_factory_failure_keeps_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::InvalidData, "bad rank line");
        let err = RegistryError::factory_failure("p50k_base", io_err);
        assert!(err.source().is_some());
        assert!(err.to_string().contains("p50k_base"));
    }

    #[test]
    fn test_table_build_failure_classification() {
        assert!(RegistryError::malformed_plugin("m").is_table_build_failure());
        assert!(RegistryError::duplicate_name("x", "m").is_table_build_failure());
        assert!(RegistryError::source_unavailable("gone").is_table_build_failure());
        assert!(!RegistryError::unknown_encoding("x", vec![]).is_table_build_failure());
        assert!(!RegistryError::invalid_params("x", "bad").is_table_build_failure());
    }

    #[test]
    fn test_log_fields_duplicate() {
        let err = RegistryError::duplicate_name("x", "second");
        let fields = err.log_fields();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0], ("encoding", "x".to_string()));
        assert_eq!(fields[1], ("module", "second".to_string()));
    }

    #[test]
    fn test_log_fields_unknown_encoding() {
        let err = RegistryError::unknown_encoding("x", vec!["a".into(), "b".into()]);
        let fields = err.log_fields();
        assert_eq!(fields[1], ("plugins", "a,b".to_string()));
    }

    #[test]
    fn test_log_fields_already_installed() {
        assert!(RegistryError::AlreadyInstalled.log_fields().is_empty());
    }

    #[test]
    fn test_error_clone() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err1 = RegistryError::plugin_load("m", io_err);
        let err2 = err1.clone();
        assert_eq!(err1.to_string(), err2.to_string());
    }
}
