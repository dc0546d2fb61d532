// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Plugins command - list discovered plugin modules.

use clap::Args;

use crate::common::Result;
use tokreg::EncodingRegistry;

/// List plugin modules found in the plugin directories.
#[derive(Args, Clone, Debug)]
pub struct PluginsCmd {
    /// Output as JSON
    #[arg(short, long)]
    json: bool,
}

impl PluginsCmd {
    pub fn run(self, registry: &EncodingRegistry) -> Result<()> {
        let modules = registry.available_plugin_sources()?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(modules.as_slice())?);
            return Ok(());
        }

        if modules.is_empty() {
            println!("No plugin modules found");
            return Ok(());
        }
        for module in modules.iter() {
            println!("{module}");
        }
        Ok(())
    }
}
