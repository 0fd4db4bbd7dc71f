use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("Cell index out of bounds")]
    InvalidIndex,
    #[error("Board cells must be a tile permutation with exactly one empty cell")]
    MalformedBoard,
}

pub type Result<T> = core::result::Result<T, PuzzleError>;
