//! The seam for a swappable, externally supplied position scorer.
//!
//! The core never learns anything about the backing model: it hands over a
//! fixed-shape one-hot encoding, takes back a scalar, and falls back to the
//! default evaluator whenever the model cannot produce one. A single
//! mis-scored leaf can only cost search quality, never tree correctness.

use gambit_core::{Board, Color, Coord, PieceKind};
use log::warn;
use thiserror::Error;

use crate::evaluation::{Evaluator, PieceSquareEvaluator};

/// One occupancy plane per piece kind and color.
pub const PLANES: usize = 12;
/// Fixed shape of the encoded position handed to a scoring model.
pub const FEATURES: usize = PLANES * 64;

/// A conforming model reports in [-1, 1]; this lands it in the default
/// evaluator's material range.
const MODEL_SCALE: f32 = 100.0;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model produced a non-finite score")]
    BadScore,
    #[error("model backend unavailable: {0}")]
    Backend(String),
}

/// Contract for an external scoring backend. Loading, training, and
/// persistence of the model are entirely the implementor's concern.
pub trait ScoringModel {
    /// Scores an encoded position, White-positive, normalized to [-1, 1].
    fn score(&self, features: &[f32; FEATURES]) -> Result<f32, ModelError>;
}

/// One-hot occupancy encoding: plane-major, then row-major within a plane.
pub fn encode(board: &Board) -> [f32; FEATURES] {
    let mut features = [0.0; FEATURES];
    for row in 0..8u8 {
        for col in 0..8u8 {
            if let Some(piece) = board.piece_at(Coord { row, col }) {
                let plane = plane_index(piece.kind, piece.color);
                features[plane * 64 + (row as usize * 8 + col as usize)] = 1.0;
            }
        }
    }
    features
}

fn plane_index(kind: PieceKind, color: Color) -> usize {
    let kind_index = match kind {
        PieceKind::Pawn => 0,
        PieceKind::Knight => 1,
        PieceKind::Bishop => 2,
        PieceKind::Rook => 3,
        PieceKind::Queen => 4,
        PieceKind::King => 5,
    };
    match color {
        Color::White => kind_index,
        Color::Black => kind_index + 6,
    }
}

/// An [`Evaluator`] backed by an external model, with a deterministic
/// fallback: any model failure is logged and answered by the default
/// evaluator instead, never surfaced to the search.
pub struct ExternalEvaluator<M> {
    model: M,
    fallback: PieceSquareEvaluator,
}

impl<M> ExternalEvaluator<M> {
    pub fn new(model: M) -> Self {
        Self {
            model,
            fallback: PieceSquareEvaluator,
        }
    }
}

impl<M: ScoringModel> Evaluator for ExternalEvaluator<M> {
    fn evaluate(&self, board: &Board) -> f32 {
        let outcome = self
            .model
            .score(&encode(board))
            .and_then(|s| if s.is_finite() { Ok(s) } else { Err(ModelError::BadScore) });
        match outcome {
            Ok(score) => score * MODEL_SCALE,
            Err(err) => {
                warn!("external evaluator failed ({err}); using the default evaluator");
                self.fallback.evaluate(board)
            }
        }
    }
}
