// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Reader for tiktoken `.tiktoken` rank files.
//!
//! Each non-empty line holds a base64-encoded token and its rank separated
//! by a single space:
//!
//! ```text
//! IQ== 0
//! Ig== 1
//! ```

use std::collections::HashMap;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::core::Rank;

/// Error reading or parsing a rank file.
#[derive(Debug, thiserror::Error)]
pub enum RankFileError {
    /// The file could not be read
    #[error("failed to read rank file '{path}': {source}")]
    Io {
        /// File path
        path: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A line is not `base64 rank`
    #[error("line {line}: {message}")]
    Malformed {
        /// 1-based line number
        line: usize,
        /// What was wrong
        message: String,
    },
}

/// Parse rank-file contents into a byte-sequence to rank table.
pub fn parse_tiktoken_bpe(contents: &str) -> Result<HashMap<Vec<u8>, Rank>, RankFileError> {
    let mut ranks = HashMap::new();

    for (idx, line) in contents.lines().enumerate() {
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        let malformed = |message: String| RankFileError::Malformed {
            line: idx + 1,
            message,
        };

        let (token, rank) = line
            .split_once(' ')
            .ok_or_else(|| malformed("expected '<base64 token> <rank>'".to_string()))?;
        let token = STANDARD
            .decode(token)
            .map_err(|e| malformed(format!("invalid base64 token: {e}")))?;
        let rank: Rank = rank
            .parse()
            .map_err(|e| malformed(format!("invalid rank '{rank}': {e}")))?;

        if ranks.insert(token, rank).is_some() {
            return Err(malformed("token listed twice".to_string()));
        }
    }

    Ok(ranks)
}

/// Read and parse a rank file.
pub fn load_tiktoken_bpe(path: impl AsRef<Path>) -> Result<HashMap<Vec<u8>, Rank>, RankFileError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| RankFileError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_tiktoken_bpe(&contents)
}
