pub mod config;
pub mod error;
pub mod logger;
pub mod session_rng;
pub mod tictactoe;

pub use config::EngineConfig;
pub use error::{EngineError, InvalidMoveReason};
pub use session_rng::SessionRng;
pub use tictactoe::{
    AutomatedMove, Board, GameSession, Mark, MoveDecision, MoveOutcome, Position, SessionState,
    Verdict,
};
