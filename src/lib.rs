//! # Eight Puzzle Solver Library
//!
//! This library models the 3x3 sliding-tile puzzle and solves it with a
//! generic state-space search engine supporting five strategies: random,
//! breadth-first, depth-first, greedy best-first and A*.
//!
//! It is used by two binaries:
//! - `puzzle_solver`: Solves one board given as a digit string, reports the
//!   number of states tested and optionally prints the moves.
//! - `batch_solver`: Solves every board listed in a file and prints averages.
//!
//! ## Modules
//! - `engine`: The puzzle itself (`Board`, `Move`, `GOAL`).
//! - `node`: Search nodes and the arena (`SearchTree`) that records their lineage.
//! - `frontier`: The strategy-ordered container of untested nodes.
//! - `heuristics`: Estimates of remaining moves used by Greedy and A*.
//! - `solver`: The search loop (`Searcher`), strategy selection and results.
//! - `utils`: Digit-string parsing, batch file reading and time formatting.
//! - `interrupt`: Ctrl-C handling that lets a search stop cleanly.
//! - `error`: The `PuzzleError` type.

pub mod engine;
pub mod error;
pub mod frontier;
pub mod heuristics;
pub mod interrupt;
pub mod node;
pub mod solver;
pub mod utils;

pub use error::PuzzleError;
