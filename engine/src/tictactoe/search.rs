use serde::{Deserialize, Serialize};

use super::board::Board;
use super::heuristic::{HeuristicWeights, evaluate_board};
use super::types::{BOARD_SIZE, Mark, Position, Verdict};
use super::win_detector::evaluate;

/// Terminal scores are `WIN_SCORE - depth` for the bot and `depth - WIN_SCORE`
/// for the human, so faster wins and slower losses rank higher.
pub const WIN_SCORE: i32 = 10;
pub const FULL_DEPTH: usize = BOARD_SIZE * BOARD_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Plies below the root after which the heuristic replaces the search.
    pub max_depth: usize,
    pub pruning: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_depth: FULL_DEPTH,
            pruning: true,
        }
    }
}

impl SearchOptions {
    pub fn validate(&self) -> Result<(), String> {
        if self.max_depth == 0 || self.max_depth > FULL_DEPTH {
            return Err(format!(
                "Search depth must be between 1 and {}, got {}",
                FULL_DEPTH, self.max_depth
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub score: i32,
    /// Every root move reaching `score`, in row-major order.
    pub candidates: Vec<Position>,
    pub nodes_visited: u64,
}

struct SearchContext<'a> {
    bot_mark: Mark,
    human_mark: Mark,
    options: &'a SearchOptions,
    weights: &'a HeuristicWeights,
    nodes_visited: u64,
}

/// Searches the position with `bot_mark` to move and returns the optimal root
/// moves. `None` when the position is already decided or `bot_mark` is empty.
///
/// The board is borrowed for trial placements and is identical to its
/// pre-call contents when this returns.
pub fn search(
    board: &mut Board,
    bot_mark: Mark,
    options: &SearchOptions,
    weights: &HeuristicWeights,
) -> Option<SearchOutcome> {
    let human_mark = bot_mark.opponent()?;
    if evaluate(board).is_terminal() {
        return None;
    }

    let mut ctx = SearchContext {
        bot_mark,
        human_mark,
        options,
        weights,
        nodes_visited: 0,
    };

    let mut best_score = i32::MIN;
    let mut candidates = Vec::new();

    for pos in Position::all() {
        if !board.is_empty_at(pos) {
            continue;
        }

        // One below the best so far: strictly worse moves still fail low,
        // equal ones come back exact and join the candidate set.
        let alpha = if options.pruning && best_score != i32::MIN {
            best_score - 1
        } else {
            i32::MIN
        };

        board.place(pos, bot_mark);
        let score = minimax(board, &mut ctx, 1, false, alpha, i32::MAX);
        board.clear(pos);

        if score > best_score {
            best_score = score;
            candidates.clear();
            candidates.push(pos);
        } else if score == best_score {
            candidates.push(pos);
        }
    }

    Some(SearchOutcome {
        score: best_score,
        candidates,
        nodes_visited: ctx.nodes_visited,
    })
}

fn minimax(
    board: &mut Board,
    ctx: &mut SearchContext<'_>,
    depth: usize,
    is_maximizing: bool,
    mut alpha: i32,
    mut beta: i32,
) -> i32 {
    ctx.nodes_visited += 1;

    match evaluate(board) {
        Verdict::Win(winner) if winner == ctx.bot_mark => return WIN_SCORE - depth as i32,
        Verdict::Win(_) => return depth as i32 - WIN_SCORE,
        Verdict::Draw => return 0,
        Verdict::InProgress => {}
    }

    if depth >= ctx.options.max_depth {
        // Strictly inside the terminal scores reachable at this depth: any win
        // seen within the horizon ranks above it and any loss below it.
        let bound = (WIN_SCORE - depth as i32 - 1).max(0);
        return evaluate_board(board, ctx.bot_mark, ctx.weights).clamp(-bound, bound);
    }

    let mover = if is_maximizing { ctx.bot_mark } else { ctx.human_mark };
    let mut best = if is_maximizing { i32::MIN } else { i32::MAX };

    for pos in Position::all() {
        if !board.is_empty_at(pos) {
            continue;
        }

        board.place(pos, mover);
        let eval = minimax(board, ctx, depth + 1, !is_maximizing, alpha, beta);
        board.clear(pos);

        if is_maximizing {
            best = best.max(eval);
            alpha = alpha.max(best);
        } else {
            best = best.min(eval);
            beta = beta.min(best);
        }

        if ctx.options.pruning && beta <= alpha {
            break;
        }
    }

    best
}

/// Exhaustive value of every empty cell as a move for `bot_mark`, in
/// row-major order.
#[cfg(test)]
pub(crate) fn exact_move_values(board: &mut Board, bot_mark: Mark) -> Vec<(Position, i32)> {
    let Some(human_mark) = bot_mark.opponent() else {
        return Vec::new();
    };
    let options = SearchOptions::default();
    let weights = HeuristicWeights::default();
    let mut ctx = SearchContext {
        bot_mark,
        human_mark,
        options: &options,
        weights: &weights,
        nodes_visited: 0,
    };

    board
        .available_moves()
        .into_iter()
        .map(|pos| {
            board.place(pos, bot_mark);
            let value = minimax(board, &mut ctx, 1, false, i32::MIN, i32::MAX);
            board.clear(pos);
            (pos, value)
        })
        .collect()
}

/// True when `value` is a forced loss no deeper than `horizon` plies.
#[cfg(test)]
pub(crate) fn loses_within(value: i32, horizon: usize) -> bool {
    value <= horizon as i32 - WIN_SCORE
}
