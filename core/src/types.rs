use serde::{Deserialize, Serialize};

/// Side length of the square grid.
pub type Side = usize;

/// Linear cell index in row-major order.
pub type CellIndex = usize;

/// Label printed on a tile, `1..=side*side-1`.
pub type TileLabel = u16;

/// Row/column pair derived from a linear index.
pub type RowCol = (usize, usize);

pub const fn index_to_row_col(index: CellIndex, side: Side) -> RowCol {
    (index / side, index % side)
}

pub const fn row_col_to_index((row, col): RowCol, side: Side) -> CellIndex {
    row * side + col
}

/// Visual direction tiles travel when the player swipes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// `(row, col)` offset, relative to the empty cell, of the tile that
    /// travels on this swipe. The offset points opposite the swipe because
    /// the tile, not the empty slot, is what appears to move: swiping left
    /// pulls in the tile to the *right* of the empty cell.
    pub const fn tile_offset(self) -> (isize, isize) {
        use Direction::*;
        match self {
            Left => (0, 1),
            Right => (0, -1),
            Up => (1, 0),
            Down => (-1, 0),
        }
    }

    pub const fn opposite(self) -> Self {
        use Direction::*;
        match self {
            Left => Right,
            Right => Left,
            Up => Down,
            Down => Up,
        }
    }
}
