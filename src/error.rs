//! Error type shared by the puzzle parser, the file reader and the drivers.
//!
//! Search itself never fails: exhaustion and interruption are ordinary
//! outcomes reported through [`crate::solver::SearchOutcome`].

use std::path::PathBuf;
use thiserror::Error;

/// Failures raised before any search begins.
#[derive(Debug, Error)]
pub enum PuzzleError {
    /// The digit string does not have exactly one symbol per cell.
    #[error("expected {expected} symbols, found {found}")]
    InvalidLength { expected: usize, found: usize },

    /// A character outside `'0'..='8'`.
    #[error("unrecognized symbol '{symbol}' at position {position}")]
    InvalidSymbol { symbol: char, position: usize },

    /// A tile value outside `0..=8` in a tile array.
    #[error("tile value {tile} at position {position} is out of range")]
    InvalidTile { tile: u8, position: usize },

    /// The same symbol appears twice, which also means another one is missing.
    #[error("symbol '{symbol}' appears more than once")]
    DuplicateSymbol { symbol: char },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A search parameter that is neither a depth limit nor a known heuristic.
    #[error("invalid search parameter '{param}': expected a depth limit (-1 for none) or h0, h1, h2")]
    InvalidParam { param: String },
}
