//! Heuristic estimates of the number of moves left to reach the goal.
//!
//! A heuristic is any `fn(&Board) -> u32`. The search engine only calls it;
//! whether a heuristic is admissible is up to whoever picks it.

use crate::engine::{Board, BOARD_SIZE};
use std::fmt;

/// Signature shared by all heuristic functions.
pub type HeuristicFn = fn(&Board) -> u32;

/// A named heuristic function.
///
/// The name is only used for reporting, e.g. `"GreedySearcher: ... heuristic h1"`.
#[derive(Clone, Copy)]
pub struct Heuristic {
    name: &'static str,
    func: HeuristicFn,
}

/// Always zero. Turns Greedy into an arbitrary-order search and A* into
/// uniform-cost search.
pub const H0: Heuristic = Heuristic::new("h0", zero);

/// Number of misplaced tiles, blank excluded. Admissible.
pub const H1: Heuristic = Heuristic::new("h1", misplaced_tiles);

/// Count of distinct symbols outside their goal row or goal column.
///
/// Kept as an illustrative heuristic; its admissibility has not been shown,
/// so A* with `H2` is not guaranteed to find a shortest solution.
pub const H2: Heuristic = Heuristic::new("h2", out_of_row_or_column);

impl Heuristic {
    pub const fn new(name: &'static str, func: HeuristicFn) -> Self {
        Heuristic { name, func }
    }

    /// Looks up one of the built-in heuristics by name (`"h0"`, `"h1"`, `"h2"`).
    ///
    /// # Examples
    /// ```
    /// use eight_puzzle_solver::heuristics::Heuristic;
    /// assert_eq!(Heuristic::by_name("h1").unwrap().name(), "h1");
    /// assert!(Heuristic::by_name("manhattan").is_none());
    /// ```
    pub fn by_name(name: &str) -> Option<Self> {
        [H0, H1, H2].into_iter().find(|h| h.name == name)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Evaluates the heuristic on `board`.
    pub fn estimate(&self, board: &Board) -> u32 {
        (self.func)(board)
    }
}

impl fmt::Debug for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Heuristic").field(&self.name).finish()
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

pub fn zero(_board: &Board) -> u32 {
    0
}

pub fn misplaced_tiles(board: &Board) -> u32 {
    board.misplaced_tiles()
}

/// Counts the distinct symbols (blank included) sitting outside their goal row
/// or their goal column, then discounts one for the blank.
///
/// Saturates at zero, so the goal scores 0.
pub fn out_of_row_or_column(board: &Board) -> u32 {
    let mut counted = [false; BOARD_SIZE * BOARD_SIZE];
    for r in 0..BOARD_SIZE {
        for c in 0..BOARD_SIZE {
            let tile = board.get_tile(r, c);
            let goal_row = tile as usize / BOARD_SIZE;
            let goal_col = tile as usize % BOARD_SIZE;
            if goal_row != r || goal_col != c {
                counted[tile as usize] = true;
            }
        }
    }

    let distinct = counted.iter().filter(|&&hit| hit).count() as u32;
    distinct.saturating_sub(1)
}
