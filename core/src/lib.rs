use serde::{Deserialize, Serialize};

pub use board::*;
pub use controller::*;
pub use error::*;
pub use evade::*;
pub use generator::*;
pub use gesture::*;
pub use types::*;

mod board;
mod controller;
mod error;
mod evade;
mod generator;
mod gesture;
mod types;

/// The two tunables the puzzle needs: grid side length and how many random
/// legal moves to apply before play begins.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PuzzleConfig {
    pub side: Side,
    pub shuffle_moves: u32,
}

impl PuzzleConfig {
    pub const MIN_SIDE: Side = 2;

    pub const fn new_unchecked(side: Side, shuffle_moves: u32) -> Self {
        Self {
            side,
            shuffle_moves,
        }
    }

    pub fn new(side: Side, shuffle_moves: u32) -> Self {
        Self::new_unchecked(side.max(Self::MIN_SIDE), shuffle_moves)
    }

    pub const fn total_cells(&self) -> usize {
        self.side * self.side
    }
}

impl Default for PuzzleConfig {
    /// Reference configuration: 3x3 grid shuffled by 25 moves.
    fn default() -> Self {
        Self::new_unchecked(3, 25)
    }
}
