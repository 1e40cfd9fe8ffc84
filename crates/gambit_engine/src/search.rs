use gambit_core::{Board, Color};

use crate::evaluation::Evaluator;

/// Depth-limited minimax with alpha-beta pruning. Maximizing nodes move
/// White, minimizing nodes move Black; depth 0 bottoms out into the
/// evaluator.
///
/// Every candidate is applied in place and fully undone before its sibling
/// is considered, so the board leaves this call exactly as it entered. A
/// node whose side has no legal reply scores as unbounded loss for that
/// side. Pruning skips siblings once `beta <= alpha`; it changes only
/// speed, never the returned value.
pub fn minimax(
    board: &mut Board,
    depth: u8,
    maximizing: bool,
    mut alpha: f32,
    mut beta: f32,
    evaluator: &dyn Evaluator,
) -> f32 {
    if depth == 0 {
        return evaluator.evaluate(board);
    }

    let color = if maximizing {
        Color::White
    } else {
        Color::Black
    };
    let moves = board.legal_moves(color);

    if maximizing {
        let mut best = f32::NEG_INFINITY;
        for mv in &moves {
            let undo = board.apply_move(mv, true);
            let score = minimax(board, depth - 1, false, alpha, beta, evaluator);
            board.undo_move(undo);

            best = best.max(score);
            alpha = alpha.max(score);
            if beta <= alpha {
                break;
            }
        }
        best
    } else {
        let mut best = f32::INFINITY;
        for mv in &moves {
            let undo = board.apply_move(mv, true);
            let score = minimax(board, depth - 1, true, alpha, beta, evaluator);
            board.undo_move(undo);

            best = best.min(score);
            beta = beta.min(score);
            if beta <= alpha {
                break;
            }
        }
        best
    }
}
