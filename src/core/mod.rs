// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout tokreg.
//!
//! This module provides the foundational types for the library:
//! - [`RegistryError`] - Error taxonomy for discovery, lookup and construction
//! - [`ConstructionParams`] - Parameter bag produced by encoding factories
//! - [`Encoding`] - Default immutable encoding value
//! - [`EncodingBuilder`] - Seam turning parameters into encodings

pub mod encoding;
pub mod error;
pub mod params;

pub use encoding::{DefaultEncodingBuilder, Encoding, EncodingBuilder};
pub use error::{ErrorCause, RegistryError, Result};
pub use params::{ConstructionParams, Rank};
