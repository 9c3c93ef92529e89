//! Saving and restoring a game.
//!
//! A [`Checkpoint`] captures the durable part of a game (both teams and the
//! committed hands) as a single JSON blob. The in-progress hand and phase are
//! not saved; a restored game resumes at the bidding of its next hand.
//! Loading accepts the current layout or any earlier one known to
//! [`migrate`], upgrading step by step before deserializing.

use crate::config::GameConfig;
use crate::core::{GameState, Hand, Team};
use crate::validation::{validate_committed, violations_of};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

pub mod error;
pub mod migrate;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 2;

/// Serializable snapshot of a game's teams and hand history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Identifies the game; changes when the game is reset
    pub id: Uuid,

    /// When the checkpoint was taken
    pub saved_at: DateTime<Utc>,

    pub team1: Team,
    pub team2: Team,
    pub hands: Vec<Hand>,
}

impl Checkpoint {
    /// Snapshot the durable part of `state`.
    pub fn capture(id: Uuid, state: &GameState) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            id,
            saved_at: Utc::now(),
            team1: state.team1().clone(),
            team2: state.team2().clone(),
            hands: state.hands().to_vec(),
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        serde_json::to_vec(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Parse bytes in the current or any recognized earlier layout.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        let value = migrate::upgrade(value)?;
        serde_json::from_value(value)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }

    /// Check the invariants every saved game must hold.
    pub fn validate(&self, config: &GameConfig) -> Result<(), CheckpointError> {
        for (key, team) in [("team1", &self.team1), ("team2", &self.team2)] {
            if !team.is_consistent() {
                return Err(CheckpointError::ValidationFailed(format!(
                    "{key} score {} does not equal the sum of its hand deltas",
                    team.score
                )));
            }
            if team.hand_deltas.len() != self.hands.len() {
                return Err(CheckpointError::ValidationFailed(format!(
                    "{key} has {} hand deltas for {} hands",
                    team.hand_deltas.len(),
                    self.hands.len()
                )));
            }
        }

        for (i, hand) in self.hands.iter().enumerate() {
            if let Some(violation) = violations_of(validate_committed(hand, config)).first() {
                return Err(CheckpointError::ValidationFailed(format!(
                    "hand {}: {violation}",
                    i + 1
                )));
            }
        }

        Ok(())
    }

    /// Validate and turn back into a live game positioned at its next hand.
    pub fn restore(self, config: &GameConfig) -> Result<(Uuid, GameState), CheckpointError> {
        self.validate(config)?;
        let state = GameState::resume(self.team1, self.team2, self.hands, config);
        Ok((self.id, state))
    }
}
