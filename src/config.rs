//! Table rules and session settings.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Key under which the game is stored.
pub const DEFAULT_STORAGE_KEY: &str = "pinochle-game-state";

/// What `reset()` does with player names.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetPolicy {
    /// Restore the configured default names.
    #[default]
    ClearPlayers,
    /// Keep whatever names the teams currently have.
    KeepPlayers,
}

/// Errors rejected by [`GameConfigBuilder::build`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Minimum bid ({min}) exceeds maximum bid ({max})")]
    BidRange { min: u32, max: u32 },

    #[error("Trick total must be greater than zero")]
    ZeroTricks,

    #[error("Storage key must not be empty")]
    EmptyStorageKey,
}

/// Settings for one scoring session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub min_bid: u32,
    pub max_bid: u32,
    pub max_meld: u32,
    pub tricks_total: u32,
    pub reset_policy: ResetPolicy,
    /// Bidding also needs the calling player, not just the team.
    pub require_bidder_seat: bool,
    pub default_players: [[String; 2]; 2],
    pub storage_key: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_bid: 15,
            max_bid: 100,
            max_meld: 999,
            tricks_total: 25,
            reset_policy: ResetPolicy::ClearPlayers,
            require_bidder_seat: true,
            default_players: [
                ["Player 1".to_string(), "Player 2".to_string()],
                ["Player 3".to_string(), "Player 4".to_string()],
            ],
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl GameConfig {
    pub fn builder() -> GameConfigBuilder {
        GameConfigBuilder::new()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_bid > self.max_bid {
            return Err(ConfigError::BidRange {
                min: self.min_bid,
                max: self.max_bid,
            });
        }
        if self.tricks_total == 0 {
            return Err(ConfigError::ZeroTricks);
        }
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        Ok(())
    }
}

/// Builder for [`GameConfig`]
pub struct GameConfigBuilder {
    config: GameConfig,
}

impl GameConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: GameConfig::default(),
        }
    }

    pub fn min_bid(mut self, bid: u32) -> Self {
        self.config.min_bid = bid;
        self
    }

    pub fn max_bid(mut self, bid: u32) -> Self {
        self.config.max_bid = bid;
        self
    }

    pub fn max_meld(mut self, meld: u32) -> Self {
        self.config.max_meld = meld;
        self
    }

    pub fn tricks_total(mut self, total: u32) -> Self {
        self.config.tricks_total = total;
        self
    }

    pub fn reset_policy(mut self, policy: ResetPolicy) -> Self {
        self.config.reset_policy = policy;
        self
    }

    pub fn require_bidder_seat(mut self, required: bool) -> Self {
        self.config.require_bidder_seat = required;
        self
    }

    pub fn default_players(mut self, team1: [String; 2], team2: [String; 2]) -> Self {
        self.config.default_players = [team1, team2];
        self
    }

    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.config.storage_key = key.into();
        self
    }

    /// Build the config, rejecting inconsistent settings.
    pub fn build(self) -> Result<GameConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for GameConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
