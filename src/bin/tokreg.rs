// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # tokreg CLI
//!
//! Inspect the encodings contributed by plugin manifests.
//!
//! ## Usage
//!
//! ```sh
//! # List plugin modules
//! tokreg --plugin-dir plugins plugins
//!
//! # List encoding names
//! tokreg --plugin-dir plugins list
//!
//! # Build one encoding and show its summary
//! tokreg --config tokreg.toml show cl100k_base
//! ```

mod cmd;
mod common;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use cmd::{ListCmd, PluginsCmd, ShowCmd};
use common::{error_hint, init_logging, open_registry, Result};

/// tokreg - BPE encoding registry
///
/// Discovers encoding plugins from TOML manifests and builds encodings on
/// demand.
#[derive(Parser, Clone)]
#[command(name = "tokreg")]
#[command(about = "Plugin-backed BPE encoding registry", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Registry config file
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Plugin directory (repeatable, scanned after the config's directories)
    #[arg(short = 'p', long = "plugin-dir", global = true, value_name = "DIR")]
    plugin_dirs: Vec<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// List discovered plugin modules
    Plugins(PluginsCmd),

    /// List registered encoding names
    List(ListCmd),

    /// Build an encoding and show its summary
    Show(ShowCmd),
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let registry = open_registry(cli.config.as_deref(), &cli.plugin_dirs)?;

    match cli.command {
        Commands::Plugins(cmd) => cmd.run(&registry),
        Commands::List(cmd) => cmd.run(&registry),
        Commands::Show(cmd) => cmd.run(&registry),
    }
}

fn main() {
    let result = run();

    if let Err(e) = result {
        eprintln!("Error: {e}");
        if let Some(hint) = error_hint(&e) {
            eprintln!("Hint: {hint}");
        }
        process::exit(1);
    }
}
