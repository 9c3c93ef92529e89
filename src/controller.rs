//! The imperative shell around the game core.
//!
//! [`HandController`] owns the live [`GameState`], the session's
//! [`GameConfig`] and a [`Store`]. Each command asks the core for a
//! [`Step`](crate::core::Step), swaps in the new state and, when teams or hand
//! history changed, writes a checkpoint. Saving is best effort: a failed
//! write is logged and never blocks play.

use crate::checkpoint::{Checkpoint, CheckpointError};
use crate::config::GameConfig;
use crate::core::{
    ForwardAction, GameState, Hand, HandInProgress, HandPatch, HandRecord, Phase, Step,
    StepOutcome, Team, TeamId,
};
use crate::store::{Store, StoreError};
use crate::validation::HandViolation;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Why a saved game could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Checkpoint(#[from] CheckpointError),
}

/// Read and restore the saved game, `Ok(None)` if there is none.
pub fn load_saved<S: Store>(
    store: &S,
    config: &GameConfig,
) -> Result<Option<(Uuid, GameState)>, LoadError> {
    let Some(bytes) = store.load(&config.storage_key)? else {
        return Ok(None);
    };
    let restored = Checkpoint::from_bytes(&bytes)?.restore(config)?;
    Ok(Some(restored))
}

/// One scoring session: state, config and the store it saves to.
pub struct HandController<S: Store> {
    config: GameConfig,
    store: S,
    game_id: Uuid,
    state: GameState,
}

impl<S: Store> HandController<S> {
    /// Load the saved game from `store`, or start a fresh one if there is
    /// nothing saved or the saved data cannot be used.
    ///
    /// An invalid `config` is replaced by [`GameConfig::default`].
    pub fn open(store: S, config: GameConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                warn!(error = %err, "invalid game config, using defaults");
                GameConfig::default()
            }
        };
        let (game_id, state) = match load_saved(&store, &config) {
            Ok(Some((id, state))) => {
                info!(
                    game_id = %id,
                    hands = state.hands().len(),
                    "resumed saved game"
                );
                (id, state)
            }
            Ok(None) => {
                debug!(key = %config.storage_key, "no saved game, starting fresh");
                (Uuid::new_v4(), GameState::new(&config))
            }
            Err(err) => {
                warn!(
                    key = %config.storage_key,
                    error = %err,
                    "saved game unusable, starting fresh"
                );
                (Uuid::new_v4(), GameState::new(&config))
            }
        };

        Self {
            config,
            store,
            game_id,
            state,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn game_id(&self) -> Uuid {
        self.game_id
    }

    pub fn team1(&self) -> &Team {
        self.state.team1()
    }

    pub fn team2(&self) -> &Team {
        self.state.team2()
    }

    pub fn team(&self, team: TeamId) -> &Team {
        self.state.team(team)
    }

    pub fn hands(&self) -> &[Hand] {
        self.state.hands()
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn current_hand(&self) -> &HandInProgress {
        self.state.current_hand()
    }

    pub fn hand_number(&self) -> usize {
        self.state.hand_number()
    }

    pub fn records(&self) -> Vec<HandRecord<'_>> {
        self.state.records()
    }

    pub fn can_advance(&self) -> bool {
        self.state.can_advance(&self.config)
    }

    pub fn can_retreat(&self) -> bool {
        self.state.can_retreat()
    }

    pub fn is_bid_impossible(&self) -> bool {
        self.state.is_bid_impossible(&self.config)
    }

    pub fn forward_action(&self) -> ForwardAction {
        self.state.forward_action(&self.config)
    }

    /// Reasons the forward control is disabled, empty when it is enabled.
    pub fn violations(&self) -> Vec<HandViolation> {
        self.state.violations(&self.config)
    }

    pub fn advance(&mut self) -> StepOutcome {
        let step = self.state.advance(&self.config);
        self.apply(step)
    }

    pub fn retreat(&mut self) -> StepOutcome {
        let step = self.state.retreat(&self.config);
        self.apply(step)
    }

    pub fn update_current_hand(&mut self, patch: HandPatch) -> StepOutcome {
        let step = self.state.update_current_hand(&patch, &self.config);
        self.apply(step)
    }

    pub fn update_tricks(&mut self, team: TeamId, value: u32) -> StepOutcome {
        let step = self.state.update_tricks(team, value, &self.config);
        self.apply(step)
    }

    pub fn rename_players(&mut self, team: TeamId, players: [String; 2]) -> StepOutcome {
        let step = self.state.rename_players(team, players);
        self.apply(step)
    }

    /// Clear the game. Confirming with the user is the caller's job.
    pub fn reset(&mut self) -> StepOutcome {
        let step = self.state.reset(&self.config);
        self.apply(step)
    }

    /// Give back the store, e.g. to inspect what was saved.
    pub fn into_store(self) -> S {
        self.store
    }

    fn apply(&mut self, step: Step) -> StepOutcome {
        let Step { state, outcome } = step;
        let save_due = state.record_differs(&self.state) || outcome == StepOutcome::Reset;
        self.state = state;

        match &outcome {
            StepOutcome::Moved { from, to } => debug!(%from, %to, "phase changed"),
            StepOutcome::Committed {
                number,
                score,
                skipped_tricks,
            } => info!(
                hand = number,
                team1 = score.team1,
                team2 = score.team2,
                skipped_tricks,
                "hand committed"
            ),
            StepOutcome::Reopened { number, phase } => {
                info!(hand = number, %phase, "hand reopened for editing")
            }
            StepOutcome::Edited => debug!(phase = %self.state.phase(), "hand edited"),
            StepOutcome::Renamed { team } => debug!(%team, "players renamed"),
            StepOutcome::Reset => {
                self.game_id = Uuid::new_v4();
                info!(game_id = %self.game_id, "game reset");
            }
            StepOutcome::Rejected(violations) => debug!(
                phase = %self.state.phase(),
                violations = violations.len(),
                "advance rejected"
            ),
            StepOutcome::Unavailable => debug!("no earlier hand to reopen"),
        }

        if save_due {
            self.persist();
        }
        outcome
    }

    fn persist(&mut self) {
        let checkpoint = Checkpoint::capture(self.game_id, &self.state);
        let bytes = match checkpoint.to_bytes() {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(error = %err, "could not encode game for saving");
                return;
            }
        };
        if let Err(err) = self.store.save(&self.config.storage_key, &bytes) {
            warn!(key = %self.config.storage_key, error = %err, "could not save game");
        }
    }
}
