use serde::{Deserialize, Serialize};

use super::types::FirstMover;

/// What `reset_session` wipes besides the board. Keeping both is
/// "session-long learning", clearing both is a clean rematch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResetPolicy {
    pub clear_ledger: bool,
    pub clear_tally: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    pub first_mover: FirstMover,
    /// Answer a human move with the bot's move inside the same call.
    pub auto_reply: bool,
    pub seed: Option<u64>,
    pub reset: ResetPolicy,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            first_mover: FirstMover::Human,
            auto_reply: true,
            seed: None,
            reset: ResetPolicy::default(),
        }
    }
}
