//! Engine configuration, loadable from TOML.
//!
//! ```toml
//! depth = 3
//! pruning = true
//! repetition_window = 8
//! fallback_threshold_ms = 50
//! seed = 150
//!
//! [weights]
//! pawn = 100
//! queen = 900
//!
//! [heuristics]
//! check_bonus = 50
//! ```
//!
//! Every key is optional; missing keys take their default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::eval::PieceWeights;
use crate::heuristics::HeuristicWeights;
use crate::repetition::RepetitionMemory;
use crate::search::MATE_VALUE;
use crate::time_guard::TimeGuard;

/// Upper bound on the non-king pieces one side can have on the board.
const MAX_MATERIAL_PIECES: i32 = 16;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Plies searched from the root, the root move included
    pub depth: u8,
    /// Alpha-beta cutoffs; off runs plain minimax with identical results
    pub pruning: bool,
    pub weights: PieceWeights,
    pub heuristics: HeuristicWeights,
    /// Number of recent root moves penalised as repetitions
    pub repetition_window: usize,
    /// Below this much remaining time the engine plays a random move
    pub fallback_threshold_ms: u64,
    /// Seed for the fallback's random choice; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            pruning: true,
            weights: PieceWeights::default(),
            heuristics: HeuristicWeights::default(),
            repetition_window: RepetitionMemory::DEFAULT_CAPACITY,
            fallback_threshold_ms: TimeGuard::DEFAULT_THRESHOLD_MS,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth == 0 {
            return Err(ConfigError::Invalid("depth must be at least 1".into()));
        }
        if self.repetition_window == 0 {
            return Err(ConfigError::Invalid(
                "repetition_window must hold at least one move".into(),
            ));
        }
        if i32::from(self.weights.king) >= MATE_VALUE {
            return Err(ConfigError::Invalid(format!(
                "king weight {} must stay below the mate score {MATE_VALUE}",
                self.weights.king
            )));
        }
        // Kings cancel out; everything else can pile up on one side
        let heaviest = [
            self.weights.pawn,
            self.weights.knight,
            self.weights.bishop,
            self.weights.rook,
            self.weights.queen,
        ]
        .into_iter()
        .max()
        .unwrap_or(0);
        let swing = MAX_MATERIAL_PIECES * i32::from(heaviest);
        if swing >= MATE_VALUE {
            return Err(ConfigError::Invalid(format!(
                "piece weight {heaviest} allows a material swing of {swing}, \
                 which must stay below the mate score {MATE_VALUE}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
