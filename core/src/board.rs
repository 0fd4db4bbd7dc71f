use rand::{Rng, RngExt};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// One board cell: either the single empty slot or a labeled tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Tile(TileLabel),
}

impl Cell {
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::Empty
    }
}

/// Outcome of a move request. A rejected move (non-adjacent tile, direction
/// pointing off-grid) is an expected input, not an error.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MoveOutcome {
    NoChange,
    Moved,
}

impl MoveOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Moved)
    }
}

/// Sliding-puzzle board state: a row-major grid of tiles with one empty
/// slot. All mutation goes through `try_move`, `try_move_direction` and
/// `shuffle`, which preserve the permutation invariant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Vec<Cell>,
    side: Side,
    empty: CellIndex,
}

impl Board {
    /// The solved board: `1, 2, .., side*side-1` with the empty slot last.
    pub fn solved(side: Side) -> Self {
        let side = side.max(PuzzleConfig::MIN_SIDE);
        let total = side * side;
        let mut cells: Vec<Cell> = (1..total)
            .map(|label| Cell::Tile(label as TileLabel))
            .collect();
        cells.push(Cell::Empty);
        Self {
            cells,
            side,
            empty: total - 1,
        }
    }

    /// Builds a board from raw cells, validating well-formedness: exactly
    /// one empty cell and the tile labels a permutation of
    /// `1..side*side-1`. Violation is a programming-error class condition,
    /// distinct from ordinary rejected moves.
    pub fn from_cells(side: Side, cells: Vec<Cell>) -> Result<Self> {
        if side < PuzzleConfig::MIN_SIDE || cells.len() != side * side {
            return Err(PuzzleError::MalformedBoard);
        }

        let mut empty = None;
        let mut seen = vec![false; cells.len() - 1];
        for (index, &cell) in cells.iter().enumerate() {
            match cell {
                Cell::Empty => {
                    if empty.replace(index).is_some() {
                        return Err(PuzzleError::MalformedBoard);
                    }
                }
                Cell::Tile(label) => {
                    let slot = usize::from(label)
                        .checked_sub(1)
                        .and_then(|i| seen.get_mut(i))
                        .ok_or(PuzzleError::MalformedBoard)?;
                    if core::mem::replace(slot, true) {
                        return Err(PuzzleError::MalformedBoard);
                    }
                }
            }
        }

        let empty = empty.ok_or(PuzzleError::MalformedBoard)?;
        Ok(Self { cells, side, empty })
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn total_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn empty_index(&self) -> CellIndex {
        self.empty
    }

    pub fn cell_at(&self, index: CellIndex) -> Cell {
        self.cells[index]
    }

    /// Current position of `tile`, if it exists on this board.
    pub fn index_of(&self, tile: TileLabel) -> Option<CellIndex> {
        self.cells.iter().position(|&cell| cell == Cell::Tile(tile))
    }

    /// Orthogonally adjacent indices of `index`, without wrapping across
    /// row boundaries. Always 2 to 4 entries.
    pub fn legal_neighbors(&self, index: CellIndex) -> SmallVec<[CellIndex; 4]> {
        let side = self.side;
        let (row, col) = index_to_row_col(index, side);
        let mut out = SmallVec::new();
        if row > 0 {
            out.push(row_col_to_index((row - 1, col), side));
        }
        if row < side - 1 {
            out.push(row_col_to_index((row + 1, col), side));
        }
        if col > 0 {
            out.push(row_col_to_index((row, col - 1), side));
        }
        if col < side - 1 {
            out.push(row_col_to_index((row, col + 1), side));
        }
        out
    }

    /// Exchanges the empty cell with the tile at `target` when they are
    /// grid-adjacent. A non-adjacent target (a tap on an unmovable tile)
    /// reports `NoChange`; only an out-of-range index is an error.
    pub fn try_move(&mut self, target: CellIndex) -> Result<MoveOutcome> {
        if target >= self.cells.len() {
            return Err(PuzzleError::InvalidIndex);
        }
        if !self.legal_neighbors(self.empty).contains(&target) {
            return Ok(MoveOutcome::NoChange);
        }
        self.cells.swap(self.empty, target);
        self.empty = target;
        Ok(MoveOutcome::Moved)
    }

    /// Moves the tile that travels visually in `direction`: the neighbor
    /// on the opposite side of the empty cell. Off-grid reports `NoChange`.
    pub fn try_move_direction(&mut self, direction: Direction) -> MoveOutcome {
        let (row, col) = index_to_row_col(self.empty, self.side);
        let (delta_row, delta_col) = direction.tile_offset();
        let target = row
            .checked_add_signed(delta_row)
            .zip(col.checked_add_signed(delta_col))
            .filter(|&(r, c)| r < self.side && c < self.side)
            .map(|row_col| row_col_to_index(row_col, self.side));
        match target {
            Some(target) => self.try_move(target).unwrap_or(MoveOutcome::NoChange),
            None => MoveOutcome::NoChange,
        }
    }

    /// Applies `moves` random legal empty-cell exchanges, each chosen
    /// uniformly among the empty cell's current neighbors. Every exchange
    /// is its own inverse, so the result stays reachable from solved. The
    /// fixed reference count does not guarantee a minimum scramble
    /// distance for larger grids; it is a tunable.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, moves: u32, rng: &mut R) {
        for _ in 0..moves {
            let choices = self.legal_neighbors(self.empty);
            let pick = choices[rng.random_range(0..choices.len())];
            self.cells.swap(self.empty, pick);
            self.empty = pick;
        }
    }

    /// `true` iff the cells read `1, 2, .., side*side-1, Empty`.
    pub fn is_solved(&self) -> bool {
        let last = self.cells.len() - 1;
        self.empty == last
            && self.cells[..last]
                .iter()
                .enumerate()
                .all(|(i, &cell)| cell == Cell::Tile((i + 1) as TileLabel))
    }
}
