use super::types::{AUTOMATED_MARK, HUMAN_MARK, Verdict};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreTally {
    pub human_wins: u32,
    pub automated_wins: u32,
    pub draws: u32,
}

impl ScoreTally {
    pub fn record(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Win(mark) if mark == HUMAN_MARK => self.human_wins += 1,
            Verdict::Win(mark) if mark == AUTOMATED_MARK => self.automated_wins += 1,
            Verdict::Draw => self.draws += 1,
            _ => {}
        }
    }

    pub fn games_played(&self) -> u32 {
        self.human_wins + self.automated_wins + self.draws
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl std::fmt::Display for ScoreTally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "human {} / automated {} / draws {}",
            self.human_wins, self.automated_wins, self.draws
        )
    }
}
