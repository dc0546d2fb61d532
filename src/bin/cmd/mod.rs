// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI subcommands.

mod encodings;
mod plugins;

pub use encodings::{ListCmd, ShowCmd};
pub use plugins::PluginsCmd;
