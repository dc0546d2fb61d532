// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for CLI commands.

use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;

use tokreg::{EncodingRegistry, Rank, RegistryConfig, RegistryError};

pub use anyhow::Result as CliResult;
pub type Result<T = ()> = CliResult<T>;

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise `-v` raises the level from `warn`.
pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Build the registry from an optional config file plus extra plugin dirs.
pub fn open_registry(config: Option<&Path>, plugin_dirs: &[PathBuf]) -> Result<EncodingRegistry> {
    let config = match config {
        Some(path) => RegistryConfig::load(path)?,
        None => RegistryConfig::default(),
    };
    let config = plugin_dirs
        .iter()
        .fold(config, |config, dir| config.with_plugin_dir(dir));

    if config.plugin_dirs.is_empty() {
        return Err(anyhow::anyhow!(
            "No plugin directories given; pass --plugin-dir or --config"
        ));
    }

    Ok(config.into_registry())
}

/// Follow-up hint for errors that stopped plugin discovery.
pub fn error_hint(err: &anyhow::Error) -> Option<&'static str> {
    match err.downcast_ref::<RegistryError>() {
        Some(e) if e.is_table_build_failure() => {
            Some("No encodings are available until the plugin directories are fixed")
        }
        _ => None,
    }
}

/// Render special tokens sorted by rank.
pub fn sorted_special_tokens<'a>(
    tokens: impl IntoIterator<Item = (&'a String, &'a Rank)>,
) -> Vec<(String, Rank)> {
    let mut tokens: Vec<(String, Rank)> = tokens
        .into_iter()
        .map(|(token, rank)| (token.clone(), *rank))
        .collect();
    tokens.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    tokens
}
