use super::board::Board;
use super::types::{Mark, Position, Verdict, WinningLine};

const fn p(row: usize, col: usize) -> Position {
    Position::new(row, col)
}

pub const WINNING_LINES: [[Position; 3]; 8] = [
    [p(0, 0), p(0, 1), p(0, 2)],
    [p(1, 0), p(1, 1), p(1, 2)],
    [p(2, 0), p(2, 1), p(2, 2)],
    [p(0, 0), p(1, 0), p(2, 0)],
    [p(0, 1), p(1, 1), p(2, 1)],
    [p(0, 2), p(1, 2), p(2, 2)],
    [p(0, 0), p(1, 1), p(2, 2)],
    [p(0, 2), p(1, 1), p(2, 0)],
];

fn line_owner(board: &Board, line: &[Position; 3]) -> Option<Mark> {
    let first = board.get(line[0])?;
    if first == Mark::Empty {
        return None;
    }
    if line[1..].iter().all(|&pos| board.get(pos) == Some(first)) {
        Some(first)
    } else {
        None
    }
}

pub fn check_win(board: &Board) -> Option<Mark> {
    check_win_with_line(board).map(|line| line.mark)
}

pub fn check_win_with_line(board: &Board) -> Option<WinningLine> {
    WINNING_LINES
        .iter()
        .find_map(|line| line_owner(board, line).map(|mark| WinningLine::new(mark, *line)))
}

/// Win scan first, then fullness: a last move that fills the board and
/// completes a line is a win.
pub fn evaluate(board: &Board) -> Verdict {
    if let Some(mark) = check_win(board) {
        return Verdict::Win(mark);
    }
    if board.is_full() {
        Verdict::Draw
    } else {
        Verdict::InProgress
    }
}

/// Empty cells that would complete a line for `mark` right now, in row-major
/// order. Tried by placing on a copy of the board.
pub fn completing_moves(board: &Board, mark: Mark) -> Vec<Position> {
    let mut probe = *board;
    let mut moves = Vec::new();
    for pos in board.available_moves() {
        probe.place(pos, mark);
        if check_win(&probe) == Some(mark) {
            moves.push(pos);
        }
        probe.clear(pos);
    }
    moves
}

/// True when `mark` holds two cells of some line and the third is empty.
pub fn has_open_two(board: &Board, mark: Mark) -> bool {
    WINNING_LINES.iter().any(|line| {
        let owned = line.iter().filter(|&&pos| board.get(pos) == Some(mark)).count();
        let empty = line.iter().filter(|&&pos| board.is_empty_at(pos)).count();
        owned == 2 && empty == 1
    })
}
