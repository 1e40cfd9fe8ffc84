use gambit_core::{Board, Color, Move};
use log::debug;
use rand::seq::SliceRandom;

use crate::evaluation::{Evaluator, PieceSquareEvaluator};
use crate::search::minimax;

const MIN_DEPTH: u8 = 1;

/// The adversarial move picker: a fixed search depth plus an evaluator,
/// default or externally supplied.
pub struct AIPlayer {
    depth: u8,
    evaluator: Box<dyn Evaluator>,
}

impl AIPlayer {
    pub fn new(depth: u8) -> Self {
        Self::with_evaluator(depth, Box::new(PieceSquareEvaluator))
    }

    pub fn with_evaluator(depth: u8, evaluator: Box<dyn Evaluator>) -> Self {
        AIPlayer {
            depth: depth.max(MIN_DEPTH),
            evaluator,
        }
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// The best discovered move for `color`, or `None` when the side has no
    /// legal move; the caller is expected to have already distinguished
    /// checkmate from stalemate. Root moves are shuffled so equal positions
    /// do not always produce the same game; the search is exhaustive to the
    /// configured depth, so the shuffle never affects correctness. The
    /// board is mutated during the search and restored before returning.
    pub fn get_best_move(&self, board: &mut Board, color: Color) -> Option<Move> {
        let mut moves = board.legal_moves(color);
        debug!(
            "searching {} root moves for {:?} at depth {}",
            moves.len(),
            color,
            self.depth
        );
        moves.shuffle(&mut rand::thread_rng());

        let maximizing = color == Color::White;
        let mut best: Option<(Move, f32)> = None;

        for mv in moves {
            let undo = board.apply_move(&mv, true);
            let score = minimax(
                board,
                self.depth - 1,
                !maximizing,
                f32::NEG_INFINITY,
                f32::INFINITY,
                self.evaluator.as_ref(),
            );
            board.undo_move(undo);

            // Strictly better replaces; ties keep the earliest seen.
            let better = match best {
                None => true,
                Some((_, best_score)) => {
                    if maximizing {
                        score > best_score
                    } else {
                        score < best_score
                    }
                }
            };
            if better {
                best = Some((mv, score));
            }
        }

        if let Some((mv, score)) = best {
            debug!("best move {mv} scored {score:.2}");
        }
        best.map(|(mv, _)| mv)
    }
}
