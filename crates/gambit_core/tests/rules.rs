use gambit_core::{Board, CastleSide, Color, Coord, Move, MoveError, MoveKind, Piece, PieceKind};

fn sq(name: &str) -> Coord {
    Coord::from_algebraic(name).expect("bad square name in test")
}

fn mv(from: &str, to: &str) -> Move {
    Move::new(sq(from), sq(to))
}

fn put(board: &mut Board, kind: PieceKind, color: Color, at: &str) {
    board.set_piece(sq(at), Some(Piece::new(kind, color)));
}

fn put_moved(board: &mut Board, kind: PieceKind, color: Color, at: &str) {
    let mut piece = Piece::new(kind, color);
    piece.moved = true;
    board.set_piece(sq(at), Some(piece));
}

#[test]
fn twenty_legal_moves_from_the_start() {
    let board = Board::new();
    assert_eq!(board.legal_moves(Color::White).len(), 20);
    assert_eq!(board.legal_moves(Color::Black).len(), 20);
}

#[test]
fn no_legal_move_leaves_the_mover_in_check() {
    let mut board = Board::new();
    for color in [Color::White, Color::Black] {
        for mv in board.legal_moves(color) {
            let undo = board.apply_move(&mv, true);
            assert!(
                !board.is_in_check(color),
                "{mv} left the {color:?} king in check"
            );
            board.undo_move(undo);
        }
    }
}

#[test]
fn pinned_rook_stays_on_its_file() {
    let mut board = Board::empty();
    put(&mut board, PieceKind::King, Color::White, "e1");
    put(&mut board, PieceKind::Rook, Color::White, "e2");
    put(&mut board, PieceKind::King, Color::Black, "a8");
    put(&mut board, PieceKind::Rook, Color::Black, "e8");

    let moves = board.generate_moves(sq("e2"), true);
    assert!(!moves.is_empty());
    assert!(
        moves.iter().all(|m| m.to.col == sq("e2").col),
        "a pinned rook may only slide along the pin"
    );
}

#[test]
fn opening_scenario_rejects_the_illegal_reply() {
    let mut board = Board::new();

    let advance = mv("e2", "e4");
    assert!(board.valid_move(&advance));
    board.try_move(&advance).unwrap();
    assert_eq!(board.last_move(), Some(advance));

    // A rook "move" that goes nowhere is not in any legal set.
    let nowhere = mv("a8", "a8");
    assert!(!board.valid_move(&nowhere));
    assert_eq!(board.try_move(&nowhere), Err(MoveError::Illegal(nowhere)));

    let reply = mv("e7", "e5");
    assert!(board.valid_move(&reply));
    board.try_move(&reply).unwrap();
    assert_eq!(board.last_move(), Some(reply));
}

#[test]
fn try_move_rejects_an_empty_origin() {
    let mut board = Board::new();
    let ghost = mv("e4", "e5");
    assert_eq!(board.try_move(&ghost), Err(MoveError::EmptySquare(sq("e4"))));
}

#[test]
fn apply_and_undo_restore_the_position_exactly() {
    let mut board = Board::new();
    let before = board.clone();

    let undo = board.apply_move(&mv("e2", "e4"), true);
    assert_ne!(board, before);
    board.undo_move(undo);
    assert_eq!(board, before);
}

#[test]
fn apply_and_undo_round_trip_a_capture() {
    let mut board = Board::new();
    board.try_move(&mv("e2", "e4")).unwrap();
    board.try_move(&mv("d7", "d5")).unwrap();

    let before = board.clone();
    let capture = board
        .generate_moves(sq("e4"), true)
        .into_iter()
        .find(|m| m.to == sq("d5"))
        .expect("exd5 must be available");
    let undo = board.apply_move(&capture, true);
    assert!(board.piece_at(sq("e4")).is_none());
    board.undo_move(undo);
    assert_eq!(board, before);
}

#[test]
fn double_push_marks_the_pawn_and_the_next_ply_clears_it() {
    let mut board = Board::new();
    board.try_move(&mv("e2", "e4")).unwrap();
    assert!(board.piece_at(sq("e4")).unwrap().en_passant);

    board.try_move(&mv("a7", "a6")).unwrap();
    assert!(!board.piece_at(sq("e4")).unwrap().en_passant);
}

#[test]
fn en_passant_is_offered_only_the_ply_after_the_double_push() {
    let mut board = Board::new();
    board.try_move(&mv("e2", "e4")).unwrap();
    board.try_move(&mv("a7", "a6")).unwrap();
    board.try_move(&mv("e4", "e5")).unwrap();
    board.try_move(&mv("d7", "d5")).unwrap();

    // The black pawn just double-pushed past e5; the capture behind it is
    // on offer right now.
    let capture = board
        .generate_moves(sq("e5"), true)
        .into_iter()
        .find(|m| m.to == sq("d6"))
        .expect("en passant must be offered");
    assert_eq!(capture.kind, MoveKind::EnPassant);

    let before = board.clone();
    let undo = board.apply_move(&capture, true);
    assert!(board.piece_at(sq("d5")).is_none(), "the bypassed pawn is removed");
    assert!(board.piece_at(sq("d6")).is_some());
    board.undo_move(undo);
    assert_eq!(board, before);
}

#[test]
fn en_passant_expires_after_an_unrelated_ply() {
    let mut board = Board::new();
    board.try_move(&mv("e2", "e4")).unwrap();
    board.try_move(&mv("a7", "a6")).unwrap();
    board.try_move(&mv("e4", "e5")).unwrap();
    board.try_move(&mv("d7", "d5")).unwrap();
    board.try_move(&mv("h2", "h3")).unwrap();
    board.try_move(&mv("a6", "a5")).unwrap();

    assert!(
        !board
            .generate_moves(sq("e5"), true)
            .iter()
            .any(|m| m.to == sq("d6")),
        "the en passant window closed a ply ago"
    );
}

#[test]
fn set_true_en_passant_moves_the_single_flag() {
    let mut board = Board::new();
    board.try_move(&mv("e2", "e4")).unwrap();
    assert!(board.piece_at(sq("e4")).unwrap().en_passant);

    board.set_true_en_passant(sq("d7"));
    assert!(!board.piece_at(sq("e4")).unwrap().en_passant);
    assert!(board.piece_at(sq("d7")).unwrap().en_passant);

    // The hook ignores anything that is not a pawn.
    board.set_true_en_passant(sq("b8"));
    assert!(board.piece_at(sq("d7")).unwrap().en_passant);
}

#[test]
fn promotion_always_yields_a_queen() {
    let mut board = Board::empty();
    put(&mut board, PieceKind::King, Color::White, "e1");
    put(&mut board, PieceKind::King, Color::Black, "e8");
    put_moved(&mut board, PieceKind::Pawn, Color::White, "a7");
    put(&mut board, PieceKind::Knight, Color::Black, "b8");

    let moves = board.generate_moves(sq("a7"), true);
    let push = moves.iter().find(|m| m.to == sq("a8")).expect("a8 push");
    let capture = moves.iter().find(|m| m.to == sq("b8")).expect("xb8 capture");
    assert_eq!(push.kind, MoveKind::Promotion);
    assert_eq!(capture.kind, MoveKind::Promotion);

    let mut pushed = board.clone();
    pushed.apply_move(push, true);
    let promoted = pushed.piece_at(sq("a8")).unwrap();
    assert_eq!(promoted.kind, PieceKind::Queen);
    assert_eq!(promoted.color, Color::White);

    let mut captured = board.clone();
    captured.apply_move(capture, true);
    let promoted = captured.piece_at(sq("b8")).unwrap();
    assert_eq!(promoted.kind, PieceKind::Queen);
    assert_eq!(promoted.color, Color::White);
}

#[test]
fn kingside_castle_when_the_path_is_clear_and_safe() {
    let mut board = Board::new();
    board.set_piece(sq("f1"), None);
    board.set_piece(sq("g1"), None);

    let castle = board
        .generate_moves(sq("e1"), true)
        .into_iter()
        .find(|m| m.to == sq("g1"))
        .expect("kingside castle must be offered");
    assert_eq!(castle.kind, MoveKind::Castle(CastleSide::King));

    let before = board.clone();
    let undo = board.apply_move(&castle, true);
    assert_eq!(board.piece_at(sq("g1")).unwrap().kind, PieceKind::King);
    assert_eq!(board.piece_at(sq("f1")).unwrap().kind, PieceKind::Rook);
    assert!(board.piece_at(sq("h1")).is_none());
    assert!(board.piece_at(sq("f1")).unwrap().moved);

    board.undo_move(undo);
    assert_eq!(board, before);
}

#[test]
fn queenside_castle_relocates_the_far_rook() {
    let mut board = Board::new();
    board.set_piece(sq("b1"), None);
    board.set_piece(sq("c1"), None);
    board.set_piece(sq("d1"), None);

    let castle = board
        .generate_moves(sq("e1"), true)
        .into_iter()
        .find(|m| m.to == sq("c1"))
        .expect("queenside castle must be offered");
    assert_eq!(castle.kind, MoveKind::Castle(CastleSide::Queen));

    board.apply_move(&castle, true);
    assert_eq!(board.piece_at(sq("c1")).unwrap().kind, PieceKind::King);
    assert_eq!(board.piece_at(sq("d1")).unwrap().kind, PieceKind::Rook);
    assert!(board.piece_at(sq("a1")).is_none());
}

#[test]
fn no_castle_through_an_attacked_square() {
    let mut board = Board::new();
    board.set_piece(sq("f1"), None);
    board.set_piece(sq("g1"), None);
    // A rook bearing down the f-file covers the king's transit square.
    board.set_piece(sq("f2"), None);
    put_moved(&mut board, PieceKind::Rook, Color::Black, "f3");

    assert!(
        !board
            .generate_moves(sq("e1"), true)
            .iter()
            .any(|m| m.to == sq("g1")),
        "castling through check must be refused"
    );
}

#[test]
fn no_castle_once_the_rook_has_moved() {
    let mut board = Board::new();
    board.set_piece(sq("f1"), None);
    board.set_piece(sq("g1"), None);
    put_moved(&mut board, PieceKind::Rook, Color::White, "h1");

    assert!(
        !board
            .generate_moves(sq("e1"), true)
            .iter()
            .any(|m| m.to == sq("g1"))
    );
}

#[test]
fn back_rank_mate_is_checkmate() {
    let mut board = Board::empty();
    put(&mut board, PieceKind::King, Color::Black, "g8");
    put(&mut board, PieceKind::Pawn, Color::Black, "f7");
    put(&mut board, PieceKind::Pawn, Color::Black, "g7");
    put(&mut board, PieceKind::Pawn, Color::Black, "h7");
    put_moved(&mut board, PieceKind::Rook, Color::White, "b8");
    put(&mut board, PieceKind::King, Color::White, "e1");

    assert!(board.is_in_check(Color::Black));
    assert!(board.is_checkmate(Color::Black));
    assert!(!board.is_stalemate(Color::Black));
    assert!(board.legal_moves(Color::Black).is_empty());
    assert!(!board.is_checkmate(Color::White));
}

#[test]
fn cornered_king_with_no_moves_is_stalemate() {
    let mut board = Board::empty();
    put(&mut board, PieceKind::King, Color::Black, "a8");
    put_moved(&mut board, PieceKind::Queen, Color::White, "b6");
    put(&mut board, PieceKind::King, Color::White, "h1");

    assert!(!board.is_in_check(Color::Black));
    assert!(board.is_stalemate(Color::Black));
    assert!(!board.is_checkmate(Color::Black));
}

#[test]
fn insufficient_material_census() {
    let full = Board::new();
    assert!(!full.is_insufficient_material());

    let mut kings = Board::empty();
    put(&mut kings, PieceKind::King, Color::White, "e1");
    put(&mut kings, PieceKind::King, Color::Black, "e8");
    assert!(kings.is_insufficient_material());

    let mut knight = kings.clone();
    put(&mut knight, PieceKind::Knight, Color::White, "c3");
    assert!(knight.is_insufficient_material());

    // Bishops confined to the same square color can never meet.
    let mut bishops = kings.clone();
    put(&mut bishops, PieceKind::Bishop, Color::White, "c1");
    put(&mut bishops, PieceKind::Bishop, Color::Black, "f8");
    assert!(bishops.is_insufficient_material());

    let mut opposed = kings.clone();
    put(&mut opposed, PieceKind::Bishop, Color::White, "c1");
    put(&mut opposed, PieceKind::Bishop, Color::Black, "c8");
    assert!(!opposed.is_insufficient_material());

    let mut pawn = kings;
    put(&mut pawn, PieceKind::Pawn, Color::White, "a2");
    assert!(!pawn.is_insufficient_material());
}

#[test]
fn moved_flags_never_reset() {
    let mut board = Board::new();
    board.try_move(&mv("g1", "f3")).unwrap();
    assert!(board.piece_at(sq("f3")).unwrap().moved);
    board.try_move(&mv("g8", "f6")).unwrap();
    board.try_move(&mv("f3", "g1")).unwrap();
    // Back on its home square, but the flag stays up.
    assert!(board.piece_at(sq("g1")).unwrap().moved);
}

#[test]
fn blocked_pawns_cannot_push() {
    let mut board = Board::new();
    // A piece parked directly in front of the e-pawn blocks both push
    // lengths, and with empty capture diagonals the pawn has nothing left.
    put_moved(&mut board, PieceKind::Knight, Color::Black, "e3");
    assert!(board.generate_moves(sq("e2"), true).is_empty());

    // Blocking only the far square still allows the single step.
    let mut board = Board::new();
    put_moved(&mut board, PieceKind::Knight, Color::Black, "e4");
    let moves = board.generate_moves(sq("e2"), true);
    assert_eq!(moves.len(), 1);
    assert_eq!(moves[0].to, sq("e3"));
}
