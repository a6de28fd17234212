use crate::engine::{Board, CELL_COUNT};
use crate::error::PuzzleError;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Parses a nine-symbol digit string into a `Board`.
///
/// The string lists the cells in row-major order. `'0'` marks the blank and
/// `'1'` through `'8'` are the tiles; every symbol must appear exactly once.
///
/// # Arguments
/// * `s`: The digit string, e.g. `"142358607"`.
///
/// # Returns
/// * `Ok(Board)` if `s` is a permutation of `"012345678"`.
/// * `Err(PuzzleError)` if:
///     - `s` does not contain exactly nine characters (`InvalidLength`).
///     - A character is not a digit between `'0'` and `'8'` (`InvalidSymbol`).
///     - A digit appears twice (`DuplicateSymbol`).
///
/// # Examples
/// ```
/// use eight_puzzle_solver::utils::board_from_digit_str;
///
/// let board = board_from_digit_str("142358607").unwrap();
/// assert_eq!(board.get_tile(0, 0), 1);
/// assert_eq!(board.blank_position(), (2, 1));
///
/// assert!(board_from_digit_str("14235860").is_err());
/// assert!(board_from_digit_str("14235860x").is_err());
/// assert!(board_from_digit_str("112358607").is_err());
/// ```
pub fn board_from_digit_str(s: &str) -> Result<Board, PuzzleError> {
    let found = s.chars().count();
    if found != CELL_COUNT {
        return Err(PuzzleError::InvalidLength {
            expected: CELL_COUNT,
            found,
        });
    }

    let mut tiles = [0u8; CELL_COUNT];
    for (position, symbol) in s.chars().enumerate() {
        tiles[position] = symbol
            .to_digit(10)
            .filter(|&d| (d as usize) < CELL_COUNT)
            .ok_or(PuzzleError::InvalidSymbol { symbol, position })? as u8;
    }
    Board::from_tiles(tiles)
}

/// Reads a batch file of puzzles, one digit string per line.
///
/// Surrounding whitespace is trimmed and blank lines are skipped. The lines are
/// returned unvalidated so the caller can report bad entries individually.
pub fn read_puzzle_file(path: &Path) -> Result<Vec<String>, PuzzleError> {
    let content = fs::read_to_string(path).map_err(|source| PuzzleError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

/// Formats a search duration for the driver's statistics line.
///
/// Short runs are shown with millisecond precision, longer ones in
/// minutes and seconds.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs < 90 {
        format!("{:.3} secs", elapsed.as_secs_f64())
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// Sends `tracing` output to stderr, filtered by `RUST_LOG` (default `warn`).
///
/// Called once at the start of each binary; stdout stays reserved for results.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
