use std::fmt;

use crate::Coord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastleSide {
    King,
    Queen,
}

/// How a move is executed. The kind is derived by the generator; plain
/// captures need no tag of their own because occupying the target square
/// displaces whatever stood there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    Normal,
    Promotion,
    EnPassant,
    Castle(CastleSide),
}

#[derive(Debug, Clone, Copy)]
pub struct Move {
    pub from: Coord,
    pub to: Coord,
    pub kind: MoveKind,
}

/// Equality is structural on the endpoints only; the kind is derived state,
/// never compared.
impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to
    }
}

impl Eq for Move {}

impl Move {
    pub fn new(from: Coord, to: Coord) -> Self {
        Self {
            from,
            to,
            kind: MoveKind::Normal,
        }
    }

    pub fn promotion(from: Coord, to: Coord) -> Self {
        Self {
            from,
            to,
            kind: MoveKind::Promotion,
        }
    }

    pub fn en_passant(from: Coord, to: Coord) -> Self {
        Self {
            from,
            to,
            kind: MoveKind::EnPassant,
        }
    }

    pub fn castle(from: Coord, to: Coord, side: CastleSide) -> Self {
        Self {
            from,
            to,
            kind: MoveKind::Castle(side),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}
