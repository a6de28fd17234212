//! Puzzle model for the Eight Puzzle.
//!
//! This module defines the values the search engine works with:
//! - `Move`: the four directions the blank can travel.
//! - `Board`: one arrangement of the eight tiles and the blank on a 3x3 grid,
//!   including successor generation and goal testing.
//! - `GOAL`: the fixed goal arrangement `012345678`.
use std::fmt;
use std::str::FromStr;

use crate::error::PuzzleError;
use crate::utils::board_from_digit_str;

/// Width and height of the grid.
pub const BOARD_SIZE: usize = 3;

/// Total number of cells, blank included.
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// The tile value used for the blank cell.
pub const BLANK: u8 = 0;

/// The goal arrangement: blank in the top-left corner, tiles 1-8 in row-major order.
pub const GOAL: Board = Board {
    tiles: [0, 1, 2, 3, 4, 5, 6, 7, 8],
    blank: 0,
};

/// A direction in which the blank is moved.
///
/// Moving the blank up swaps it with the tile directly above it, and so on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// All moves in the fixed order used for successor generation.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Row and column offsets of the cell the blank moves into.
    fn delta(self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
        }
    }

    /// The lowercase name of the move, e.g. `"up"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One arrangement of the puzzle.
///
/// A `Board` is a plain value: moving the blank produces a new `Board` and never
/// changes the original, so boards can be freely shared between search nodes.
/// Two boards are equal iff every cell holds the same tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    tiles: [u8; CELL_COUNT],
    blank: usize,
}

impl Board {
    /// Builds a board from a row-major array of tile values.
    ///
    /// Fails unless `tiles` is a permutation of `0..=8`.
    ///
    /// # Examples
    /// ```
    /// use eight_puzzle_solver::engine::{Board, GOAL};
    /// let board = Board::from_tiles([0, 1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
    /// assert_eq!(board, GOAL);
    /// assert!(Board::from_tiles([1, 1, 2, 3, 4, 5, 6, 7, 8]).is_err());
    /// assert!(Board::from_tiles([0, 1, 2, 3, 4, 5, 6, 7, 9]).is_err());
    /// ```
    pub fn from_tiles(tiles: [u8; CELL_COUNT]) -> Result<Self, PuzzleError> {
        let mut seen = [false; CELL_COUNT];
        let mut blank = 0;
        for (position, &tile) in tiles.iter().enumerate() {
            let slot = seen
                .get_mut(tile as usize)
                .ok_or(PuzzleError::InvalidTile { tile, position })?;
            if *slot {
                return Err(PuzzleError::DuplicateSymbol {
                    symbol: char::from(b'0' + tile),
                });
            }
            *slot = true;
            if tile == BLANK {
                blank = position;
            }
        }
        // nine distinct values below nine: the blank is among them
        Ok(Board { tiles, blank })
    }

    /// Returns the tile at row `r`, column `c`.
    ///
    /// # Panics
    /// Panics if `r` or `c` is not below `BOARD_SIZE`.
    pub fn get_tile(&self, r: usize, c: usize) -> u8 {
        assert!(r < BOARD_SIZE && c < BOARD_SIZE, "cell ({}, {}) is off the board", r, c);
        self.tiles[r * BOARD_SIZE + c]
    }

    /// The tiles in row-major order.
    pub fn tiles(&self) -> &[u8; CELL_COUNT] {
        &self.tiles
    }

    /// Row and column of the blank.
    pub fn blank_position(&self) -> (usize, usize) {
        (self.blank / BOARD_SIZE, self.blank % BOARD_SIZE)
    }

    /// Returns the board obtained by moving the blank one cell in `direction`,
    /// or `None` if that would take it off the grid.
    ///
    /// # Examples
    /// ```
    /// use eight_puzzle_solver::engine::{Move, GOAL};
    /// assert!(GOAL.move_blank(Move::Up).is_none());
    /// let moved = GOAL.move_blank(Move::Right).unwrap();
    /// assert_eq!(moved.digit_string(), "102345678");
    /// ```
    pub fn move_blank(&self, direction: Move) -> Option<Board> {
        let (r, c) = self.blank_position();
        let (dr, dc) = direction.delta();
        let nr = r.checked_add_signed(dr).filter(|&v| v < BOARD_SIZE)?;
        let nc = c.checked_add_signed(dc).filter(|&v| v < BOARD_SIZE)?;

        let target = nr * BOARD_SIZE + nc;
        let mut next = *self;
        next.tiles.swap(self.blank, target);
        next.blank = target;
        Some(next)
    }

    /// All boards one legal move away, in `Move::ALL` order.
    pub fn successors(&self) -> Vec<(Move, Board)> {
        Move::ALL
            .into_iter()
            .filter_map(|m| self.move_blank(m).map(|b| (m, b)))
            .collect()
    }

    /// True iff this board is the goal arrangement.
    pub fn is_goal(&self) -> bool {
        *self == GOAL
    }

    /// Number of non-blank tiles that are not in their goal cell.
    pub fn misplaced_tiles(&self) -> u32 {
        self.tiles
            .iter()
            .zip(GOAL.tiles.iter())
            .filter(|(&tile, &goal)| tile != BLANK && tile != goal)
            .count() as u32
    }

    /// The compact nine-digit form of the board, e.g. `"012345678"`.
    pub fn digit_string(&self) -> String {
        self.tiles
            .iter()
            .map(|&t| char::from(b'0' + t))
            .collect()
    }
}

impl FromStr for Board {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        board_from_digit_str(s)
    }
}

impl fmt::Display for Board {
    /// Three rows of space-separated tiles, the blank drawn as `_`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..BOARD_SIZE {
            for c in 0..BOARD_SIZE {
                match self.get_tile(r, c) {
                    BLANK => write!(f, "_ ")?,
                    tile => write!(f, "{} ", tile)?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
