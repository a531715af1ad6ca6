mod board;
pub mod heuristic;
mod ledger;
pub mod move_selector;
pub mod search;
mod session;
pub mod settings;
mod tally;
mod types;
pub mod win_detector;

pub use board::Board;
pub use heuristic::{HeuristicWeights, evaluate_board};
pub use ledger::MoveFrequencyLedger;
pub use move_selector::{DecisionReason, MoveDecision, SelectorSettings, select_move};
pub use search::{FULL_DEPTH, SearchOptions, SearchOutcome, WIN_SCORE, search};
pub use session::{AutomatedMove, GameSession, MoveOutcome, SessionState};
pub use settings::{ResetPolicy, SessionSettings};
pub use tally::ScoreTally;
pub use types::{
    AUTOMATED_MARK, BOARD_SIZE, FirstMover, HUMAN_MARK, Mark, Position, Verdict, WinningLine,
};
pub use win_detector::{WINNING_LINES, check_win, check_win_with_line, evaluate};
