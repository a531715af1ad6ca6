use serde::{Deserialize, Serialize};

use super::board::Board;
use super::types::{Mark, Position};
use super::win_detector::{completing_moves, has_open_two};

/// Weights of the depth-cutoff evaluation. All are applied symmetrically
/// except `unblocked_penalty`, which only ever counts against the bot.
///
/// The search clamps the result below the smallest terminal score reachable
/// at the cutoff, so large weights saturate instead of outranking a real win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicWeights {
    pub threat: i32,
    pub center: i32,
    pub corner: i32,
    pub edge: i32,
    pub unblocked_penalty: i32,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            threat: 4,
            center: 3,
            corner: 2,
            edge: 1,
            unblocked_penalty: 5,
        }
    }
}

impl HeuristicWeights {
    pub fn validate(&self) -> Result<(), String> {
        let weights = [
            ("threat", self.threat),
            ("center", self.center),
            ("corner", self.corner),
            ("edge", self.edge),
            ("unblocked_penalty", self.unblocked_penalty),
        ];
        for (name, value) in weights {
            if value < 0 {
                return Err(format!("Heuristic weight {} must not be negative, got {}", name, value));
            }
        }
        Ok(())
    }

    fn placement_weight(&self, pos: Position) -> i32 {
        if pos.is_center() {
            self.center
        } else if pos.is_corner() {
            self.corner
        } else {
            self.edge
        }
    }
}

/// Scores a non-terminal board from `bot_mark`'s point of view.
pub fn evaluate_board(board: &Board, bot_mark: Mark, weights: &HeuristicWeights) -> i32 {
    let Some(human_mark) = bot_mark.opponent() else {
        return 0;
    };

    let mut score = 0;

    if has_open_two(board, bot_mark) {
        score += weights.threat;
    }
    if has_open_two(board, human_mark) {
        score -= weights.threat;
    }

    for pos in Position::all() {
        match board.get(pos) {
            Some(mark) if mark == bot_mark => score += weights.placement_weight(pos),
            Some(mark) if mark == human_mark => score -= weights.placement_weight(pos),
            _ => {}
        }
    }

    if !completing_moves(board, human_mark).is_empty() {
        score -= weights.unblocked_penalty;
    }

    score
}
