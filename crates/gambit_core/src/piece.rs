#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// +1.0 for White, -1.0 for Black; scores are White-positive by
    /// convention.
    pub fn sign(self) -> f32 {
        match self {
            Color::White => 1.0,
            Color::Black => -1.0,
        }
    }

    /// Direction of pawn advance along the row axis. White pawns move
    /// toward row 0.
    pub fn pawn_dir(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// The farthest rank, where a pawn of this color promotes.
    pub fn promotion_row(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// The only row a pawn of this color can capture en passant from: the
    /// rank beside the enemy's double-push landing squares.
    pub fn en_passant_row(self) -> u8 {
        match self {
            Color::White => 3,
            Color::Black => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Material value in pawns. The king stays finite and small so the
    /// positional terms remain visible; it is never actually captured.
    pub fn value(self) -> f32 {
        match self {
            PieceKind::Pawn => 1.0,
            PieceKind::Knight => 3.0,
            PieceKind::Bishop => 3.0,
            PieceKind::Rook => 5.0,
            PieceKind::Queen => 9.0,
            PieceKind::King => 100.0,
        }
    }
}

/// A piece on the board: an immutable kind/color tag plus the two mutable
/// flags the rules need. `moved` only ever transitions false to true;
/// `en_passant` is held by at most one pawn on the whole board and is
/// re-derived on every applied move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub moved: bool,
    pub en_passant: bool,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color) -> Self {
        Self {
            kind,
            color,
            moved: false,
            en_passant: false,
        }
    }

    /// Signed material value: positive for White, negative for Black.
    pub fn value(&self) -> f32 {
        self.kind.value() * self.color.sign()
    }
}
