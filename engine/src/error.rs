use thiserror::Error;

use crate::tictactoe::Mark;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidMoveReason {
    Occupied,
    OutOfBounds,
    GameOver,
}

impl std::fmt::Display for InvalidMoveReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            InvalidMoveReason::Occupied => "cell is already marked",
            InvalidMoveReason::OutOfBounds => "position out of bounds",
            InvalidMoveReason::GameOver => "game is already over",
        };
        f.write_str(text)
    }
}

/// Errors surfaced by [`GameSession`](crate::GameSession). None of them mutate
/// the session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EngineError {
    #[error("invalid move: {reason}")]
    InvalidMove { reason: InvalidMoveReason },

    #[error("out of turn: {expected:?} is due to move")]
    OutOfTurn { expected: Mark },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl EngineError {
    pub(crate) fn invalid_move(reason: InvalidMoveReason) -> Self {
        EngineError::InvalidMove { reason }
    }

    pub fn is_invalid_move(&self) -> bool {
        matches!(self, EngineError::InvalidMove { .. })
    }
}
