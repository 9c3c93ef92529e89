//! Core game types and the hand lifecycle.
//!
//! This module is the pure functional core:
//! - Team, hand and phase types
//! - Pure state transitions over [`GameState`]
//! - A read-only view of committed hand history
//!
//! Nothing here performs I/O or logging; the [`crate::controller`] shell
//! owns a `GameState`, applies steps and persists the result.

mod game;
mod history;
mod phase;
mod types;

pub use game::{GameState, Step, StepOutcome};
pub use history::{records, HandRecord};
pub use phase::{ForwardAction, Phase};
pub use types::{BidWinner, Hand, HandInProgress, HandPatch, Seat, Suit, Team, TeamId};
