// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Encoding commands - list registered encodings and show one in detail.

use clap::Args;
use serde::Serialize;

use crate::common::{sorted_special_tokens, Result};
use tokreg::{EncodingRegistry, Rank};

/// List registered encoding names without building any of them.
#[derive(Args, Clone, Debug)]
pub struct ListCmd {
    /// Show the contributing plugin module next to each name
    #[arg(long)]
    modules: bool,

    /// Output as JSON
    #[arg(short, long)]
    json: bool,
}

#[derive(Serialize)]
struct ListEntry {
    name: String,
    module: String,
}

impl ListCmd {
    pub fn run(self, registry: &EncodingRegistry) -> Result<()> {
        let table = registry.build_constructor_table()?;
        let entries: Vec<ListEntry> = table
            .iter()
            .map(|(name, entry)| ListEntry {
                name: name.to_string(),
                module: entry.module.clone(),
            })
            .collect();

        if self.json {
            if self.modules {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
                println!("{}", serde_json::to_string_pretty(&names)?);
            }
            return Ok(());
        }

        for entry in &entries {
            if self.modules {
                println!("{:<24} {}", entry.name, entry.module);
            } else {
                println!("{}", entry.name);
            }
        }
        Ok(())
    }
}

/// Build one encoding and print a summary.
#[derive(Args, Clone, Debug)]
pub struct ShowCmd {
    /// Encoding name
    #[arg(value_name = "NAME")]
    name: String,

    /// Output as JSON
    #[arg(short, long)]
    json: bool,
}

#[derive(Serialize)]
struct EncodingSummary {
    name: String,
    module: Option<String>,
    pat_str: String,
    n_vocab: usize,
    max_token_value: Rank,
    mergeable_ranks: usize,
    special_tokens: Vec<(String, Rank)>,
}

impl ShowCmd {
    pub fn run(self, registry: &EncodingRegistry) -> Result<()> {
        let encoding = registry.get_encoding(&self.name)?;
        let module = registry
            .build_constructor_table()?
            .module_of(&self.name)
            .map(str::to_string);

        let summary = EncodingSummary {
            name: encoding.name().to_string(),
            module,
            pat_str: encoding.pat_str().to_string(),
            n_vocab: encoding.n_vocab(),
            max_token_value: encoding.max_token_value(),
            mergeable_ranks: encoding.mergeable_ranks().len(),
            special_tokens: sorted_special_tokens(encoding.special_tokens()),
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
            return Ok(());
        }

        println!("=== {} ===", summary.name);
        if let Some(module) = &summary.module {
            println!("Plugin module:    {module}");
        }
        println!("Vocabulary size:  {}", summary.n_vocab);
        println!("Max token value:  {}", summary.max_token_value);
        println!("Mergeable ranks:  {}", summary.mergeable_ranks);
        println!("Split pattern:    {}", summary.pat_str);
        println!("Special tokens:   {}", summary.special_tokens.len());
        for (token, rank) in &summary.special_tokens {
            println!("  {rank:>8}  {token}");
        }
        Ok(())
    }
}
