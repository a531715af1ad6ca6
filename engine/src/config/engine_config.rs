use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{ConfigManager, Validate};
use crate::tictactoe::heuristic::HeuristicWeights;
use crate::tictactoe::move_selector::SelectorSettings;
use crate::tictactoe::search::SearchOptions;
use crate::tictactoe::settings::SessionSettings;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub search: SearchOptions,
    pub heuristic: HeuristicWeights,
    pub selector: SelectorSettings,
    pub session: SessionSettings,
}

impl Validate for EngineConfig {
    fn validate(&self) -> Result<(), String> {
        self.search.validate()?;
        self.heuristic.validate()?;
        self.selector.validate()?;
        Ok(())
    }
}

/// Reads an engine config from a YAML file. A missing file gives the defaults.
pub fn load_engine_config(path: impl AsRef<Path>) -> Result<EngineConfig, String> {
    ConfigManager::from_yaml_file(path.as_ref()).load()
}
