//! Engine configuration.
//!
//! Board geometry and deck composition are rules, not settings. What a host
//! may tune lives here: starting gold, seat limits, game length and the
//! room-code length. Loaded from JSON or built in code:
//!
//! ```
//! use kingdoms_engine::core::GameConfig;
//!
//! let config = GameConfig::from_json(r#"{"startingGold": 80}"#).unwrap();
//! assert_eq!(config.starting_gold, 80);
//! assert_eq!(config.max_players, 4);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::PayloadError;

/// Tunable engine settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    /// Gold every player starts the game with.
    pub starting_gold: i64,
    /// Fewest players allowed to start.
    pub min_players: usize,
    /// Most players a room seats. Cannot exceed the four colors.
    pub max_players: usize,
    /// Epoch after which the game ends.
    pub final_epoch: u8,
    /// Characters in a generated room code.
    pub room_code_len: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_gold: 50,
            min_players: 2,
            max_players: 4,
            final_epoch: 3,
            room_code_len: 6,
        }
    }
}

impl GameConfig {
    /// Default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, PayloadError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the settings are playable.
    pub fn validate(&self) -> Result<(), PayloadError> {
        if self.min_players < 2 || self.min_players > self.max_players {
            return Err(PayloadError::Config(format!(
                "player range {}..={} is not playable",
                self.min_players, self.max_players
            )));
        }
        if self.max_players > 4 {
            return Err(PayloadError::Config("at most 4 players supported".into()));
        }
        if self.final_epoch == 0 {
            return Err(PayloadError::Config("final epoch must be at least 1".into()));
        }
        if self.room_code_len == 0 {
            return Err(PayloadError::Config("room code cannot be empty".into()));
        }
        Ok(())
    }

    /// Set starting gold.
    #[must_use]
    pub fn with_starting_gold(mut self, gold: i64) -> Self {
        self.starting_gold = gold;
        self
    }

    /// Set the seat range.
    #[must_use]
    pub fn with_players(mut self, min: usize, max: usize) -> Self {
        self.min_players = min;
        self.max_players = max;
        self
    }

    /// Set the final epoch.
    #[must_use]
    pub fn with_final_epoch(mut self, epoch: u8) -> Self {
        self.final_epoch = epoch;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.starting_gold, 50);
        assert_eq!((config.min_players, config.max_players), (2, 4));
        assert_eq!(config.final_epoch, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = GameConfig::new()
            .with_starting_gold(10)
            .with_players(3, 4)
            .with_final_epoch(1);

        assert_eq!(config.starting_gold, 10);
        assert_eq!(config.min_players, 3);
        assert_eq!(config.final_epoch, 1);
    }

    #[test]
    fn test_rejects_unplayable() {
        assert!(GameConfig::new().with_players(1, 4).validate().is_err());
        assert!(GameConfig::new().with_players(2, 5).validate().is_err());
        assert!(GameConfig::new().with_players(4, 3).validate().is_err());
        assert!(GameConfig::new().with_final_epoch(0).validate().is_err());
        assert!(GameConfig::from_json(r#"{"maxPlayers": 9}"#).is_err());
    }
}
