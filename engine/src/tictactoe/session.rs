use crate::config::{EngineConfig, Validate};
use crate::error::{EngineError, InvalidMoveReason};
use crate::session_rng::SessionRng;
use crate::{log, trace};
use super::board::Board;
use super::ledger::MoveFrequencyLedger;
use super::move_selector::{MoveDecision, select_move};
use super::tally::ScoreTally;
use super::types::{AUTOMATED_MARK, HUMAN_MARK, Mark, Position, Verdict, WinningLine};
use super::win_detector::{check_win_with_line, evaluate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingMove(Mark),
    Terminal(Verdict),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutomatedMove {
    pub position: Position,
    pub verdict: Verdict,
    pub decision: MoveDecision,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Verdict after the human move and, if one was played, the reply.
    pub verdict: Verdict,
    pub automated_reply: Option<AutomatedMove>,
}

/// One human-versus-bot match. Owns the board, the frequency ledger and the
/// tally; nothing is shared between sessions.
#[derive(Debug, Clone)]
pub struct GameSession {
    config: EngineConfig,
    board: Board,
    current_mark: Mark,
    turn_count: usize,
    forfeited_by: Option<Mark>,
    last_move: Option<Position>,
    ledger: MoveFrequencyLedger,
    tally: ScoreTally,
    rng: SessionRng,
}

impl GameSession {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate().map_err(EngineError::InvalidConfig)?;

        let rng = SessionRng::from_optional_seed(config.session.seed);
        log!(
            "New session: depth {}, first mover {:?}, seed {}",
            config.search.max_depth,
            config.session.first_mover,
            rng.seed()
        );

        Ok(Self {
            current_mark: config.session.first_mover.mark(),
            config,
            board: Board::new(),
            turn_count: 0,
            forfeited_by: None,
            last_move: None,
            ledger: MoveFrequencyLedger::new(),
            tally: ScoreTally::default(),
            rng,
        })
    }

    pub fn submit_human_move(&mut self, row: usize, col: usize) -> Result<MoveOutcome, EngineError> {
        let pos = Position::new(row, col);
        self.check_can_move(HUMAN_MARK)?;
        if !pos.is_on_board() {
            return Err(EngineError::invalid_move(InvalidMoveReason::OutOfBounds));
        }
        if !self.board.is_empty_at(pos) {
            return Err(EngineError::invalid_move(InvalidMoveReason::Occupied));
        }

        let mut verdict = self.apply_move(HUMAN_MARK, pos);

        let automated_reply = if !verdict.is_terminal() && self.config.session.auto_reply {
            let reply = self.play_automated_turn();
            verdict = reply.verdict;
            Some(reply)
        } else {
            None
        };

        Ok(MoveOutcome {
            verdict,
            automated_reply,
        })
    }

    pub fn request_automated_move(&mut self) -> Result<AutomatedMove, EngineError> {
        self.check_can_move(AUTOMATED_MARK)?;
        Ok(self.play_automated_turn())
    }

    /// Synthetic move an external turn clock submits when the human runs out
    /// of time. The bot is awarded the game.
    pub fn forfeit_human_turn(&mut self) -> Result<Verdict, EngineError> {
        self.check_can_move(HUMAN_MARK)?;

        self.forfeited_by = Some(HUMAN_MARK);
        let verdict = self.current_verdict();
        log!("Human forfeited on turn {}", self.turn_count + 1);
        self.tally.record(verdict);
        Ok(verdict)
    }

    pub fn reset_session(&mut self) {
        self.board = Board::new();
        self.current_mark = self.config.session.first_mover.mark();
        self.turn_count = 0;
        self.forfeited_by = None;
        self.last_move = None;

        let policy = self.config.session.reset;
        if policy.clear_ledger {
            self.ledger.clear();
        }
        if policy.clear_tally {
            self.tally.clear();
        }
        trace!("Session reset, {:?} to move", self.current_mark);
    }

    pub fn clear_ledger(&mut self) {
        self.ledger.clear();
    }

    pub fn current_board(&self) -> Board {
        self.board
    }

    pub fn current_verdict(&self) -> Verdict {
        match self.forfeited_by.and_then(|mark| mark.opponent()) {
            Some(winner) => Verdict::Win(winner),
            None => evaluate(&self.board),
        }
    }

    pub fn winning_line(&self) -> Option<WinningLine> {
        check_win_with_line(&self.board)
    }

    pub fn state(&self) -> SessionState {
        let verdict = self.current_verdict();
        if verdict.is_terminal() {
            SessionState::Terminal(verdict)
        } else {
            SessionState::AwaitingMove(self.current_mark)
        }
    }

    pub fn current_mark(&self) -> Mark {
        self.current_mark
    }

    pub fn turn_count(&self) -> usize {
        self.turn_count
    }

    pub fn last_move(&self) -> Option<Position> {
        self.last_move
    }

    pub fn ledger(&self) -> &MoveFrequencyLedger {
        &self.ledger
    }

    pub fn tally(&self) -> ScoreTally {
        self.tally
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn check_can_move(&self, mark: Mark) -> Result<(), EngineError> {
        if self.current_verdict().is_terminal() {
            return Err(EngineError::invalid_move(InvalidMoveReason::GameOver));
        }
        if self.current_mark != mark {
            return Err(EngineError::OutOfTurn {
                expected: self.current_mark,
            });
        }
        Ok(())
    }

    fn play_automated_turn(&mut self) -> AutomatedMove {
        let decision = select_move(
            &mut self.board,
            AUTOMATED_MARK,
            &self.ledger,
            &self.config,
            &mut self.rng,
        )
        .expect("a non-terminal board always has an empty cell");

        let verdict = self.apply_move(AUTOMATED_MARK, decision.position);
        log!(
            "Automated move {} ({:?}), verdict {:?}",
            decision.position,
            decision.reason,
            verdict
        );

        AutomatedMove {
            position: decision.position,
            verdict,
            decision,
        }
    }

    fn apply_move(&mut self, mark: Mark, pos: Position) -> Verdict {
        let placed = self.board.place(pos, mark);
        debug_assert!(placed, "move to {} must target an empty cell", pos);

        self.turn_count += 1;
        self.last_move = Some(pos);
        if mark == HUMAN_MARK {
            self.ledger.record(pos);
        }
        debug_assert_eq!(self.board.occupied_count(), self.turn_count);

        let verdict = evaluate(&self.board);
        if verdict.is_terminal() {
            self.tally.record(verdict);
            log!("Game over after {} turns: {:?} ({})", self.turn_count, verdict, self.tally);
        } else if let Some(next) = mark.opponent() {
            self.current_mark = next;
        }
        verdict
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::move_selector::DecisionReason;
    use crate::tictactoe::settings::ResetPolicy;
    use crate::tictactoe::FirstMover;
    use crate::tictactoe::search::{FULL_DEPTH, exact_move_values, loses_within};
    use std::collections::HashMap;

    fn config_with(first_mover: FirstMover, auto_reply: bool) -> EngineConfig {
        let mut config = EngineConfig::default();
        config.session.first_mover = first_mover;
        config.session.auto_reply = auto_reply;
        config.session.seed = Some(5);
        config
    }

    fn manual_session() -> GameSession {
        GameSession::new(config_with(FirstMover::Human, false)).unwrap()
    }

    /// Plays a fixed sequence of alternating moves without the bot.
    fn play_script(session: &mut GameSession, moves: &[(usize, usize)]) {
        for &(row, col) in moves {
            let pos = Position::new(row, col);
            let mark = session.current_mark;
            session.apply_move(mark, pos);
        }
    }

    #[test]
    fn test_new_session_awaits_human() {
        let session = GameSession::new(EngineConfig::default()).unwrap();

        assert_eq!(session.state(), SessionState::AwaitingMove(Mark::X));
        assert_eq!(session.current_verdict(), Verdict::InProgress);
        assert_eq!(session.turn_count(), 0);
        assert_eq!(session.current_board(), Board::new());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = EngineConfig::default();
        config.search.max_depth = 0;

        assert!(matches!(
            GameSession::new(config),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_human_move_gets_automatic_reply() {
        let mut session = GameSession::new(config_with(FirstMover::Human, true)).unwrap();

        let outcome = session.submit_human_move(0, 0).unwrap();
        let reply = outcome.automated_reply.unwrap();

        assert_eq!(outcome.verdict, Verdict::InProgress);
        assert_eq!(reply.position, Position::CENTER);
        assert_eq!(session.turn_count(), 2);
        assert_eq!(session.current_board().get(Position::CENTER), Some(Mark::O));
        assert_eq!(session.state(), SessionState::AwaitingMove(Mark::X));
        assert_eq!(session.ledger().count(Position::new(0, 0)), 1);
        assert_eq!(session.ledger().count(Position::CENTER), 0);
    }

    #[test]
    fn test_block_scenario_through_session() {
        let mut session = manual_session();
        play_script(&mut session, &[(0, 0), (1, 1)]);
        session.submit_human_move(0, 1).unwrap();

        let reply = session.request_automated_move().unwrap();

        assert_eq!(reply.position, Position::new(0, 2));
        assert_eq!(reply.decision.reason, DecisionReason::Blocking);
        assert_eq!(reply.verdict, Verdict::InProgress);
    }

    #[test]
    fn test_occupied_cell_is_rejected_without_mutation() {
        let mut session = manual_session();
        session.submit_human_move(1, 1).unwrap();
        session.request_automated_move().unwrap();
        let before_board = session.current_board();
        let before_ledger = session.ledger().clone();

        let err = session.submit_human_move(1, 1).unwrap_err();

        assert_eq!(err, EngineError::InvalidMove { reason: InvalidMoveReason::Occupied });
        assert_eq!(session.current_board(), before_board);
        assert_eq!(session.ledger(), &before_ledger);
        assert_eq!(session.turn_count(), 2);
    }

    #[test]
    fn test_out_of_bounds_is_invalid_move() {
        let mut session = manual_session();
        let err = session.submit_human_move(3, 0).unwrap_err();

        assert!(err.is_invalid_move());
        assert_eq!(session.turn_count(), 0);
    }

    #[test]
    fn test_out_of_turn_requests_are_rejected() {
        let mut session = manual_session();

        assert_eq!(
            session.request_automated_move().unwrap_err(),
            EngineError::OutOfTurn { expected: Mark::X }
        );

        session.submit_human_move(0, 0).unwrap();
        assert_eq!(
            session.submit_human_move(2, 2).unwrap_err(),
            EngineError::OutOfTurn { expected: Mark::O }
        );
        assert_eq!(session.turn_count(), 1);
    }

    #[test]
    fn test_full_board_draw_rejects_every_move() {
        let mut session = manual_session();
        play_script(
            &mut session,
            &[(0, 0), (0, 1), (0, 2), (1, 1), (1, 0), (1, 2), (2, 1), (2, 0), (2, 2)],
        );

        assert_eq!(session.current_board(), Board::from_rows(["XOX", "XOO", "OXX"]).unwrap());
        assert_eq!(session.current_verdict(), Verdict::Draw);
        assert_eq!(session.state(), SessionState::Terminal(Verdict::Draw));
        for pos in Position::all() {
            let err = session.submit_human_move(pos.row, pos.col).unwrap_err();
            assert_eq!(err, EngineError::InvalidMove { reason: InvalidMoveReason::GameOver });
        }
        assert!(session.request_automated_move().unwrap_err().is_invalid_move());
        assert_eq!(session.tally().draws, 1);
    }

    #[test]
    fn test_human_win_is_terminal_and_counted_once() {
        let mut session = manual_session();
        play_script(&mut session, &[(0, 0), (1, 0), (0, 1), (1, 1)]);

        let outcome = session.submit_human_move(0, 2).unwrap();

        assert_eq!(outcome.verdict, Verdict::Win(Mark::X));
        assert!(outcome.automated_reply.is_none());
        assert_eq!(session.winning_line().unwrap().mark, Mark::X);
        assert!(session.submit_human_move(2, 2).is_err());
        assert_eq!(session.tally().human_wins, 1);
        assert_eq!(session.tally().games_played(), 1);
    }

    #[test]
    fn test_forfeit_awards_bot_the_game() {
        let mut session = manual_session();
        session.submit_human_move(0, 0).unwrap();
        session.request_automated_move().unwrap();

        assert_eq!(session.forfeit_human_turn().unwrap(), Verdict::Win(Mark::O));
        assert_eq!(session.state(), SessionState::Terminal(Verdict::Win(Mark::O)));
        assert!(session.forfeit_human_turn().unwrap_err().is_invalid_move());
        assert_eq!(session.tally().automated_wins, 1);

        session.reset_session();
        assert_eq!(session.current_verdict(), Verdict::InProgress);
    }

    #[test]
    fn test_reset_twice_equals_reset_once() {
        let mut session = GameSession::new(config_with(FirstMover::Human, true)).unwrap();
        session.submit_human_move(0, 0).unwrap();
        session.submit_human_move(2, 2).unwrap();

        session.reset_session();
        let once = session.clone();
        session.reset_session();

        assert_eq!(session.current_board(), once.current_board());
        assert_eq!(session.state(), once.state());
        assert_eq!(session.turn_count(), 0);
        assert_eq!(session.last_move(), None);
        assert_eq!(session.ledger(), once.ledger());
        assert_eq!(session.tally(), once.tally());
    }

    #[test]
    fn test_reset_preserves_ledger_by_default() {
        let mut session = GameSession::new(config_with(FirstMover::Human, true)).unwrap();
        session.submit_human_move(0, 0).unwrap();
        session.reset_session();

        assert_eq!(session.ledger().count(Position::new(0, 0)), 1);

        session.clear_ledger();
        assert!(session.ledger().is_empty());
    }

    #[test]
    fn test_reset_policy_clears_ledger_and_tally() {
        let mut config = config_with(FirstMover::Human, false);
        config.session.reset = ResetPolicy {
            clear_ledger: true,
            clear_tally: true,
        };
        let mut session = GameSession::new(config).unwrap();
        session.submit_human_move(0, 0).unwrap();
        session.forfeit_human_turn().unwrap_err();
        session.request_automated_move().unwrap();
        session.forfeit_human_turn().unwrap();
        assert_eq!(session.tally().games_played(), 1);

        session.reset_session();

        assert!(session.ledger().is_empty());
        assert_eq!(session.tally(), ScoreTally::default());
    }

    #[test]
    fn test_automated_first_mover() {
        let mut session = GameSession::new(config_with(FirstMover::Automated, true)).unwrap();

        assert_eq!(session.state(), SessionState::AwaitingMove(Mark::O));
        assert!(session.submit_human_move(0, 0).is_err());

        let opening = session.request_automated_move().unwrap();
        assert_eq!(opening.verdict, Verdict::InProgress);
        assert_eq!(session.state(), SessionState::AwaitingMove(Mark::X));

        session.reset_session();
        assert_eq!(session.state(), SessionState::AwaitingMove(Mark::O));
    }

    fn config_at_depth(first_mover: FirstMover, max_depth: usize) -> EngineConfig {
        let mut config = config_with(first_mover, false);
        config.search.max_depth = max_depth;
        config
    }

    /// Walks every human reply against the bot. Wherever the bot had a move
    /// that does not lose within its search depth, it must not pick one that
    /// does; at full depth that means it never loses.
    fn assert_bot_avoids_visible_losses(
        session: &GameSession,
        exact: &mut HashMap<Board, Vec<(Position, i32)>>,
        games: &mut u32,
    ) {
        let horizon = session.config().search.max_depth;
        match session.state() {
            SessionState::Terminal(verdict) => {
                if horizon == FULL_DEPTH {
                    assert_ne!(verdict, Verdict::Win(Mark::X), "bot lost:\n{}", session.current_board());
                }
                *games += 1;
            }
            SessionState::AwaitingMove(Mark::O) => {
                let board = session.current_board();
                let values = exact
                    .entry(board)
                    .or_insert_with(|| {
                        let mut scratch = board;
                        exact_move_values(&mut scratch, Mark::O)
                    })
                    .clone();

                let mut next = session.clone();
                let reply = next.request_automated_move().unwrap();

                if values.iter().any(|&(_, v)| !loses_within(v, horizon)) {
                    let (_, chosen) = values.iter().find(|&&(p, _)| p == reply.position).copied().unwrap();
                    assert!(
                        !loses_within(chosen, horizon),
                        "depth {} plays {} (exact {}) on\n{}",
                        horizon,
                        reply.position,
                        chosen,
                        board
                    );
                }
                assert_bot_avoids_visible_losses(&next, exact, games);
            }
            SessionState::AwaitingMove(_) => {
                for pos in session.current_board().available_moves() {
                    let mut next = session.clone();
                    next.submit_human_move(pos.row, pos.col).unwrap();
                    assert_bot_avoids_visible_losses(&next, exact, games);
                }
            }
        }
    }

    #[test]
    fn test_full_depth_bot_never_loses_when_human_opens() {
        let session = GameSession::new(config_at_depth(FirstMover::Human, FULL_DEPTH)).unwrap();
        let mut games = 0;
        assert_bot_avoids_visible_losses(&session, &mut HashMap::new(), &mut games);
        assert!(games > 100);
    }

    #[test]
    fn test_full_depth_bot_never_loses_when_bot_opens() {
        let session = GameSession::new(config_at_depth(FirstMover::Automated, FULL_DEPTH)).unwrap();
        let mut games = 0;
        assert_bot_avoids_visible_losses(&session, &mut HashMap::new(), &mut games);
        assert!(games > 10);
    }

    #[test]
    fn test_shallow_bot_never_walks_into_a_loss_it_can_see() {
        let mut exact = HashMap::new();
        for max_depth in 2..FULL_DEPTH {
            for first_mover in [FirstMover::Human, FirstMover::Automated] {
                let session = GameSession::new(config_at_depth(first_mover, max_depth)).unwrap();
                let mut games = 0;
                assert_bot_avoids_visible_losses(&session, &mut exact, &mut games);
                assert!(games > 0);
            }
        }
    }
}
