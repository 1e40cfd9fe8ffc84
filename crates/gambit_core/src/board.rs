use log::trace;

use crate::{CastleSide, Color, Coord, Move, MoveError, MoveKind, Piece, PieceKind};

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, 1),
    (-2, -1),
    (2, 1),
    (2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

const BISHOP_DIRS: [(i8, i8); 4] = [(-1, 1), (-1, -1), (1, 1), (1, -1)];
const ROOK_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, -1), (0, 1)];
const QUEEN_DIRS: [(i8, i8); 8] = [
    (-1, 1),
    (-1, -1),
    (1, 1),
    (1, -1),
    (1, 0),
    (-1, 0),
    (0, -1),
    (0, 1),
];

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// The 8x8 grid of squares, each holding at most one piece, plus the most
/// recently applied move. The board does not track whose turn it is; every
/// legality query takes an explicit color.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
    last_move: Option<Move>,
}

/// Everything `undo_move` needs to restore the position exactly: the
/// pre-move occupant of every square the move touched, the previous
/// `last_move`, and the pawn (if any) that held the en-passant flag.
#[derive(Debug, Clone)]
pub struct Undo {
    squares: Vec<(Coord, Option<Piece>)>,
    last_move: Option<Move>,
    en_passant: Option<Coord>,
}

impl Board {
    /// The standard starting arrangement, all flags cleared.
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.add_pieces(Color::White);
        board.add_pieces(Color::Black);
        board
    }

    /// A board with no pieces, for scenario construction.
    pub fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
            last_move: None,
        }
    }

    fn add_pieces(&mut self, color: Color) {
        let (pawn_row, back_row) = match color {
            Color::White => (6, 7),
            Color::Black => (1, 0),
        };

        for col in 0..8 {
            self.squares[pawn_row][col] = Some(Piece::new(PieceKind::Pawn, color));
        }
        for (col, &kind) in BACK_RANK.iter().enumerate() {
            self.squares[back_row][col] = Some(Piece::new(kind, color));
        }
    }

    fn at(&self, c: Coord) -> &Option<Piece> {
        &self.squares[c.row as usize][c.col as usize]
    }

    fn at_mut(&mut self, c: Coord) -> &mut Option<Piece> {
        &mut self.squares[c.row as usize][c.col as usize]
    }

    pub fn piece_at(&self, c: Coord) -> Option<&Piece> {
        self.at(c).as_ref()
    }

    pub fn set_piece(&mut self, c: Coord, piece: Option<Piece>) {
        *self.at_mut(c) = piece;
    }

    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    fn is_empty(&self, c: Coord) -> bool {
        self.at(c).is_none()
    }

    fn has_enemy(&self, c: Coord, color: Color) -> bool {
        matches!(self.piece_at(c), Some(p) if p.color != color)
    }

    fn empty_or_enemy(&self, c: Coord, color: Color) -> bool {
        match self.piece_at(c) {
            Some(p) => p.color != color,
            None => true,
        }
    }

    /// Generates the moves of the piece on `at` as a fresh list; an empty
    /// square yields an empty list.
    ///
    /// With `filter_legal` set, every candidate is additionally checked to
    /// leave the mover's own king out of check, and castling is considered.
    /// Without it the result is pseudo-legal geometry only, the form the
    /// board uses internally to probe enemy threats without recursing.
    pub fn generate_moves(&self, at: Coord, filter_legal: bool) -> Vec<Move> {
        let piece = match self.piece_at(at) {
            Some(p) => *p,
            None => return Vec::new(),
        };

        let mut moves = Vec::new();
        match piece.kind {
            PieceKind::Pawn => self.pawn_moves(piece, at, &mut moves),
            PieceKind::Knight => self.step_moves(piece, at, &KNIGHT_OFFSETS, &mut moves),
            PieceKind::Bishop => self.slider_moves(piece, at, &BISHOP_DIRS, &mut moves),
            PieceKind::Rook => self.slider_moves(piece, at, &ROOK_DIRS, &mut moves),
            PieceKind::Queen => self.slider_moves(piece, at, &QUEEN_DIRS, &mut moves),
            PieceKind::King => self.step_moves(piece, at, &KING_OFFSETS, &mut moves),
        }

        if filter_legal {
            moves.retain(|mv| !self.exposes_king(piece.color, mv));
            // Castle candidates carry their own three-square safety probe,
            // so they join after the retain pass. Keeping them off the
            // pseudo-legal path also keeps the threat probe recursion-free;
            // a castle never captures, so threat detection loses nothing.
            if piece.kind == PieceKind::King {
                self.castle_moves(piece, at, &mut moves);
            }
        }

        moves
    }

    fn pawn_moves(&self, piece: Piece, at: Coord, moves: &mut Vec<Move>) {
        let dir = piece.color.pawn_dir();
        let steps = if piece.moved { 1 } else { 2 };

        // Pushes: blocked by the first occupant, so a blocked single step
        // also rules out the double step.
        let mut to = at;
        for _ in 0..steps {
            to = match to.offset(dir, 0) {
                Some(c) => c,
                None => break,
            };
            if !self.is_empty(to) {
                break;
            }
            moves.push(self.pawn_move(piece, at, to));
        }

        // Diagonal captures onto enemy-occupied squares only
        for dc in [-1, 1] {
            if let Some(to) = at.offset(dir, dc) {
                if self.has_enemy(to, piece.color) {
                    moves.push(self.pawn_move(piece, at, to));
                }
            }
        }

        // En passant: an adjacent enemy pawn that just double-pushed can be
        // taken on the empty square behind it, only from this one rank.
        if at.row == piece.color.en_passant_row() {
            for dc in [-1, 1] {
                if let Some(beside) = at.offset(0, dc) {
                    let eligible = matches!(
                        self.piece_at(beside),
                        Some(p) if p.color != piece.color
                            && p.kind == PieceKind::Pawn
                            && p.en_passant
                    );
                    if eligible {
                        let to = Coord {
                            row: (at.row as i8 + dir) as u8,
                            col: beside.col,
                        };
                        moves.push(Move::en_passant(at, to));
                    }
                }
            }
        }
    }

    /// Any pawn move onto the farthest rank promotes; the generator tags it
    /// here so apply can substitute the queen unconditionally.
    fn pawn_move(&self, piece: Piece, from: Coord, to: Coord) -> Move {
        if to.row == piece.color.promotion_row() {
            Move::promotion(from, to)
        } else {
            Move::new(from, to)
        }
    }

    fn step_moves(&self, piece: Piece, at: Coord, offsets: &[(i8, i8)], moves: &mut Vec<Move>) {
        for &(dr, dc) in offsets {
            if let Some(to) = at.offset(dr, dc) {
                if self.empty_or_enemy(to, piece.color) {
                    moves.push(Move::new(at, to));
                }
            }
        }
    }

    fn slider_moves(&self, piece: Piece, at: Coord, dirs: &[(i8, i8)], moves: &mut Vec<Move>) {
        for &(dr, dc) in dirs {
            let mut to = at;
            while let Some(next) = to.offset(dr, dc) {
                to = next;
                match self.piece_at(to) {
                    None => moves.push(Move::new(at, to)),
                    Some(occupant) => {
                        if occupant.color != piece.color {
                            moves.push(Move::new(at, to));
                        }
                        break;
                    }
                }
            }
        }
    }

    fn castle_moves(&self, king: Piece, at: Coord, moves: &mut Vec<Move>) {
        if king.moved {
            return;
        }

        let sides: [(CastleSide, u8, &[u8], [u8; 3]); 2] = [
            (CastleSide::King, 7, &[5, 6], [4, 5, 6]),
            (CastleSide::Queen, 0, &[1, 2, 3], [4, 3, 2]),
        ];

        for (side, rook_col, between, king_path) in sides {
            let rook_at = Coord {
                row: at.row,
                col: rook_col,
            };
            let rook_ok = matches!(
                self.piece_at(rook_at),
                Some(r) if r.kind == PieceKind::Rook && r.color == king.color && !r.moved
            );
            if !rook_ok {
                continue;
            }

            if between.iter().any(|&col| {
                !self.is_empty(Coord {
                    row: at.row,
                    col,
                })
            }) {
                continue;
            }

            // The king's start, transit, and destination squares must all be
            // attack-free, probed one king-step at a time.
            let safe = king_path.iter().all(|&col| {
                let step = Move::new(
                    at,
                    Coord {
                        row: at.row,
                        col,
                    },
                );
                !self.exposes_king(king.color, &step)
            });
            if safe {
                let to = Coord {
                    row: at.row,
                    col: king_path[2],
                };
                moves.push(Move::castle(at, to, side));
            }
        }
    }

    /// Whether playing `mv` would leave `color`'s king attacked. The probe
    /// clones the whole board so the tentative move cannot disturb the
    /// position a generation walk is still examining.
    fn exposes_king(&self, color: Color, mv: &Move) -> bool {
        let mut probe = self.clone();
        probe.apply_move(mv, true);
        probe.is_in_check(color)
    }

    fn find_king(&self, color: Color) -> Coord {
        for row in 0..8u8 {
            for col in 0..8u8 {
                let c = Coord { row, col };
                if matches!(
                    self.piece_at(c),
                    Some(p) if p.kind == PieceKind::King && p.color == color
                ) {
                    return c;
                }
            }
        }
        // Invariant: exactly one king per color exists at all times.
        panic!("no {:?} king on the board", color);
    }

    /// Whether any pseudo-legal move of `by` lands on `target`. Only
    /// meaningful for occupied targets (a pawn attacks diagonals only when
    /// something stands there), which is exactly the king-safety case.
    fn is_attacked(&self, target: Coord, by: Color) -> bool {
        for row in 0..8u8 {
            for col in 0..8u8 {
                let c = Coord { row, col };
                if matches!(self.piece_at(c), Some(p) if p.color == by)
                    && self
                        .generate_moves(c, false)
                        .iter()
                        .any(|mv| mv.to == target)
                {
                    return true;
                }
            }
        }
        false
    }

    /// Whether `color`'s king is currently attacked. Panics if that king is
    /// missing from the board, which no legal sequence of moves can cause.
    pub fn is_in_check(&self, color: Color) -> bool {
        let king = self.find_king(color);
        self.is_attacked(king, color.opposite())
    }

    /// Every legally-filtered move available to `color`, flattened across
    /// its pieces.
    pub fn legal_moves(&self, color: Color) -> Vec<Move> {
        let mut moves = Vec::new();
        for row in 0..8u8 {
            for col in 0..8u8 {
                let c = Coord { row, col };
                if matches!(self.piece_at(c), Some(p) if p.color == color) {
                    moves.extend(self.generate_moves(c, true));
                }
            }
        }
        moves
    }

    pub fn is_checkmate(&self, color: Color) -> bool {
        self.is_in_check(color) && self.legal_moves(color).is_empty()
    }

    pub fn is_stalemate(&self, color: Color) -> bool {
        !self.is_in_check(color) && self.legal_moves(color).is_empty()
    }

    /// Membership test: is `mv` among the legal moves of the piece on its
    /// origin square? Equality is on endpoints, so callers may pass a bare
    /// from/to pair.
    pub fn valid_move(&self, mv: &Move) -> bool {
        self.piece_at(mv.from).is_some() && self.generate_moves(mv.from, true).contains(mv)
    }

    /// Validated entry point for an externally driven move: rejects an
    /// empty origin or an illegal move, then applies with side effects
    /// enabled. The applied move is the generator's own candidate, so its
    /// derived kind is trusted over whatever the caller tagged.
    pub fn try_move(&mut self, mv: &Move) -> Result<(), MoveError> {
        if self.piece_at(mv.from).is_none() {
            return Err(MoveError::EmptySquare(mv.from));
        }
        let chosen = self
            .generate_moves(mv.from, true)
            .into_iter()
            .find(|m| m == mv)
            .ok_or(MoveError::Illegal(*mv))?;
        self.apply_move(&chosen, false);
        Ok(())
    }

    /// Mutates the grid in place: vacates the origin, occupies the target,
    /// and performs the move's side cases (en-passant removal, promotion
    /// substitution, paired rook relocation). Ends with the en-passant
    /// discipline: clear every pawn's flag, then set it on the moved pawn
    /// only if it advanced exactly two ranks.
    ///
    /// `quiet` suppresses externally observable side effects (the move
    /// log) for look-ahead probing; it never changes rules semantics.
    pub fn apply_move(&mut self, mv: &Move, quiet: bool) -> Undo {
        let mut undo = Undo {
            squares: vec![(mv.from, *self.at(mv.from)), (mv.to, *self.at(mv.to))],
            last_move: self.last_move,
            en_passant: self.en_passant_holder(),
        };

        let mut piece = self
            .at_mut(mv.from)
            .take()
            .expect("apply_move on an empty square");
        let double_push = piece.kind == PieceKind::Pawn
            && (mv.to.row as i8 - mv.from.row as i8).abs() == 2;

        match mv.kind {
            MoveKind::Normal => {}
            MoveKind::Promotion => piece.kind = PieceKind::Queen,
            MoveKind::EnPassant => {
                // The captured pawn stands beside the origin, not on the
                // landing square.
                let captured = Coord {
                    row: mv.from.row,
                    col: mv.to.col,
                };
                undo.squares.push((captured, *self.at(captured)));
                *self.at_mut(captured) = None;
            }
            MoveKind::Castle(side) => {
                let (rook_from, rook_to) = match side {
                    CastleSide::King => (
                        Coord {
                            row: mv.from.row,
                            col: 7,
                        },
                        Coord {
                            row: mv.from.row,
                            col: 5,
                        },
                    ),
                    CastleSide::Queen => (
                        Coord {
                            row: mv.from.row,
                            col: 0,
                        },
                        Coord {
                            row: mv.from.row,
                            col: 3,
                        },
                    ),
                };
                undo.squares.push((rook_from, *self.at(rook_from)));
                undo.squares.push((rook_to, *self.at(rook_to)));
                let mut rook = self
                    .at_mut(rook_from)
                    .take()
                    .expect("castle applied without its rook");
                rook.moved = true;
                *self.at_mut(rook_to) = Some(rook);
            }
        }

        piece.moved = true;
        *self.at_mut(mv.to) = Some(piece);
        self.last_move = Some(*mv);

        self.clear_en_passant_flags();
        if double_push {
            if let Some(p) = self.at_mut(mv.to) {
                p.en_passant = true;
            }
        }

        if !quiet {
            trace!("applied {mv}");
        }
        undo
    }

    /// Exact inverse of `apply_move` for the undo record it returned.
    pub fn undo_move(&mut self, undo: Undo) {
        // Reverse order so that a no-op probe (from == to) ends on the
        // origin snapshot.
        for (c, occupant) in undo.squares.into_iter().rev() {
            *self.at_mut(c) = occupant;
        }
        self.last_move = undo.last_move;

        self.clear_en_passant_flags();
        if let Some(holder) = undo.en_passant {
            if let Some(p) = self.at_mut(holder) {
                p.en_passant = true;
            }
        }
    }

    /// Post-move hook for an externally driven move: re-establishes the
    /// en-passant flag on the pawn at `at` under the clear-then-set rule,
    /// so the human path and the engine's apply path agree. No-op for
    /// anything but a pawn.
    pub fn set_true_en_passant(&mut self, at: Coord) {
        if !matches!(self.piece_at(at), Some(p) if p.kind == PieceKind::Pawn) {
            return;
        }
        self.clear_en_passant_flags();
        if let Some(p) = self.at_mut(at) {
            p.en_passant = true;
        }
    }

    fn en_passant_holder(&self) -> Option<Coord> {
        for row in 0..8u8 {
            for col in 0..8u8 {
                let c = Coord { row, col };
                if matches!(self.piece_at(c), Some(p) if p.en_passant) {
                    return Some(c);
                }
            }
        }
        None
    }

    fn clear_en_passant_flags(&mut self) {
        for row in &mut self.squares {
            for square in row.iter_mut() {
                if let Some(p) = square {
                    if p.kind == PieceKind::Pawn {
                        p.en_passant = false;
                    }
                }
            }
        }
    }

    /// Draw by material census: bare kings, king and one minor piece, or
    /// same-colored-square bishops with nothing else.
    pub fn is_insufficient_material(&self) -> bool {
        let mut minors: Vec<(Piece, Coord)> = Vec::new();
        for row in 0..8u8 {
            for col in 0..8u8 {
                let c = Coord { row, col };
                match self.piece_at(c) {
                    None => {}
                    Some(p) => match p.kind {
                        PieceKind::King => {}
                        PieceKind::Knight | PieceKind::Bishop => minors.push((*p, c)),
                        _ => return false,
                    },
                }
            }
        }

        match minors[..] {
            [] | [_] => true,
            [(a, ca), (b, cb)] => {
                a.kind == PieceKind::Bishop
                    && b.kind == PieceKind::Bishop
                    && a.color != b.color
                    && (ca.row + ca.col) % 2 == (cb.row + cb.col) % 2
            }
            _ => false,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
