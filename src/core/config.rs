//! Engine configuration.

use super::constants::*;
use super::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Tunables for a single game.
///
/// Every field has a default, so a JSON document only needs the keys it
/// wants to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the initial map (odd sizes keep home centered)
    pub map_size: usize,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Whether explored regions can be explored again at the repeat multiplier
    pub allow_revisits: bool,

    /// Rounds after which a battle ends in a stalemate
    pub stalemate_rounds: u32,

    /// HP lost when running from a monster before the first round
    pub encounter_flee_cost: u32,

    /// HP lost when running from a battle already under way
    pub retreat_flee_cost: u32,

    /// Gold paid to come back to life
    pub resurrection_cost: u64,

    /// Resurrection restores max_hp / this value
    pub resurrection_hp_divisor: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            map_size: DEFAULT_MAP_SIZE,
            seed: None,
            allow_revisits: false,
            stalemate_rounds: DEFAULT_STALEMATE_ROUNDS,
            encounter_flee_cost: ENCOUNTER_FLEE_HP_COST,
            retreat_flee_cost: RETREAT_FLEE_HP_COST,
            resurrection_cost: RESURRECTION_COST,
            resurrection_hp_divisor: RESURRECTION_HP_DIVISOR,
        }
    }
}

impl GameConfig {
    /// Reproducible config for tests and the autoplay binary
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Parses a (possibly partial) JSON document and validates it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.map_size == 0 {
            return Err(ConfigError::Invalid("map_size must be at least 1".into()));
        }
        if self.stalemate_rounds == 0 {
            return Err(ConfigError::Invalid(
                "stalemate_rounds must be at least 1".into(),
            ));
        }
        if self.resurrection_hp_divisor == 0 {
            return Err(ConfigError::Invalid(
                "resurrection_hp_divisor must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
