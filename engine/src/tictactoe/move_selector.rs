use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::session_rng::SessionRng;
use crate::trace;
use super::board::Board;
use super::ledger::MoveFrequencyLedger;
use super::search::search;
use super::types::{Mark, Position};
use super::win_detector::completing_moves;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorSettings {
    /// Prefer the human's most played cell when it is an optimal move.
    pub frequency_bias: bool,
    /// Candidates the human has played more often than this are set aside
    /// while a less contested candidate exists.
    pub anti_repetition_threshold: Option<u32>,
}

impl Default for SelectorSettings {
    fn default() -> Self {
        Self {
            frequency_bias: true,
            anti_repetition_threshold: Some(3),
        }
    }
}

impl SelectorSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.anti_repetition_threshold == Some(0) {
            return Err("Anti-repetition threshold must be at least 1".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecisionReason {
    Winning,
    Blocking,
    Searched { score: i32, candidates: Vec<Position> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveDecision {
    pub position: Position,
    pub reason: DecisionReason,
}

impl MoveDecision {
    fn new(position: Position, reason: DecisionReason) -> Self {
        Self { position, reason }
    }
}

/// Picks the bot's move: take a win, else block, else search and break ties.
/// Returns `None` only when the board has no empty cell or `bot_mark` is
/// empty. The board is left as it was.
pub fn select_move(
    board: &mut Board,
    bot_mark: Mark,
    ledger: &MoveFrequencyLedger,
    config: &EngineConfig,
    rng: &mut SessionRng,
) -> Option<MoveDecision> {
    let human_mark = bot_mark.opponent()?;

    // A win on the board is taken ahead of the block override.
    if let Some(&pos) = completing_moves(board, bot_mark).first() {
        trace!("Winning move available at {}", pos);
        return Some(MoveDecision::new(pos, DecisionReason::Winning));
    }

    if let Some(&pos) = completing_moves(board, human_mark).first() {
        trace!("Blocking human threat at {}", pos);
        return Some(MoveDecision::new(pos, DecisionReason::Blocking));
    }

    let outcome = search(board, bot_mark, &config.search, &config.heuristic)?;
    trace!(
        "Search scored {} over {} nodes, candidates {:?}",
        outcome.score, outcome.nodes_visited, outcome.candidates
    );

    let position = break_tie(&outcome.candidates, ledger, &config.selector, rng)?;
    Some(MoveDecision::new(
        position,
        DecisionReason::Searched {
            score: outcome.score,
            candidates: outcome.candidates,
        },
    ))
}

fn break_tie(
    candidates: &[Position],
    ledger: &MoveFrequencyLedger,
    settings: &SelectorSettings,
    rng: &mut SessionRng,
) -> Option<Position> {
    let mut pool = candidates.to_vec();

    // Damping runs first, so a favourite over the threshold is never contested.
    if let Some(threshold) = settings.anti_repetition_threshold {
        let fresh: Vec<Position> = pool
            .iter()
            .copied()
            .filter(|&pos| ledger.count(pos) <= threshold)
            .collect();
        if !fresh.is_empty() && fresh.len() < pool.len() {
            trace!("Setting aside over-played candidates, {} remain", fresh.len());
            pool = fresh;
        }
    }

    if settings.frequency_bias
        && let Some((favourite, _)) = ledger.most_frequent()
        && pool.contains(&favourite)
    {
        return Some(favourite);
    }

    rng.choose(&pool).copied()
}
