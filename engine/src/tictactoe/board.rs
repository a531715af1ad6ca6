use super::types::{BOARD_SIZE, Mark, Position};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Mark; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from three rows of `X`, `O` and `.` characters.
    /// Returns `None` for anything that is not exactly 3×3 of those symbols.
    pub fn from_rows(rows: [&str; BOARD_SIZE]) -> Option<Self> {
        let mut board = Self::new();
        for (row, text) in rows.iter().enumerate() {
            let symbols: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
            if symbols.len() != BOARD_SIZE {
                return None;
            }
            for (col, symbol) in symbols.into_iter().enumerate() {
                board.cells[row][col] = match symbol {
                    'X' | 'x' => Mark::X,
                    'O' | 'o' => Mark::O,
                    '.' | '_' => Mark::Empty,
                    _ => return None,
                };
            }
        }
        Some(board)
    }

    pub fn get(&self, pos: Position) -> Option<Mark> {
        if !pos.is_on_board() {
            return None;
        }
        Some(self.cells[pos.row][pos.col])
    }

    pub fn is_empty_at(&self, pos: Position) -> bool {
        self.get(pos) == Some(Mark::Empty)
    }

    /// Writes `mark` into an empty cell. Returns `false` and leaves the board
    /// alone if the cell is off the board or already taken.
    pub fn place(&mut self, pos: Position, mark: Mark) -> bool {
        if mark == Mark::Empty || !self.is_empty_at(pos) {
            return false;
        }
        self.cells[pos.row][pos.col] = mark;
        true
    }

    /// Undo step for trial placements. Only the code that filled the cell
    /// may clear it.
    pub(crate) fn clear(&mut self, pos: Position) {
        self.cells[pos.row][pos.col] = Mark::Empty;
    }

    pub fn available_moves(&self) -> Vec<Position> {
        Position::all().filter(|&pos| self.is_empty_at(pos)).collect()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&cell| cell != Mark::Empty)
            .count()
    }

    pub fn is_full(&self) -> bool {
        self.occupied_count() == BOARD_SIZE * BOARD_SIZE
    }

    pub fn rows(&self) -> &[[Mark; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let line: String = row.iter().map(Mark::symbol).collect();
            f.write_str(&line)?;
        }
        Ok(())
    }
}
