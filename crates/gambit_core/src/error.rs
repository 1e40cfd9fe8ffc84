use thiserror::Error;

use crate::{Coord, Move};

/// Rejection reasons for the validated move entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("no piece on {0}")]
    EmptySquare(Coord),
    #[error("{0} is not a legal move")]
    Illegal(Move),
}
