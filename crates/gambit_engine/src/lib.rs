pub mod ai;
pub mod encoding;
pub mod evaluation;
pub mod search;

pub use ai::AIPlayer;
pub use encoding::{encode, ExternalEvaluator, ModelError, ScoringModel, FEATURES, PLANES};
pub use evaluation::{Evaluator, PieceSquareEvaluator};
pub use search::minimax;
