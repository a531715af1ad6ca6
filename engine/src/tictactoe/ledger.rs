use std::collections::HashMap;

use super::types::Position;

/// How often the human has played each cell over the life of a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveFrequencyLedger {
    counts: HashMap<Position, u32>,
}

impl MoveFrequencyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, pos: Position) {
        *self.counts.entry(pos).or_insert(0) += 1;
    }

    pub fn count(&self, pos: Position) -> u32 {
        self.counts.get(&pos).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The human's favourite cell. Ties go to the first cell in row-major
    /// order so the answer does not depend on hash order.
    pub fn most_frequent(&self) -> Option<(Position, u32)> {
        let mut best: Option<(Position, u32)> = None;
        for pos in Position::all() {
            let count = self.count(pos);
            if count == 0 {
                continue;
            }
            if best.is_none_or(|(_, best_count)| count > best_count) {
                best = Some((pos, count));
            }
        }
        best
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }
}
