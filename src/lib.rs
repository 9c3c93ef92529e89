//! Pinochle Score: hand lifecycle and bid-contract scoring for partnership Pinochle
//!
//! The crate follows a "pure core, imperative shell" layout. Scoring and the
//! hand lifecycle are pure functions over immutable values; persistence and
//! logging live in a thin controller around them.
//!
//! # Core Concepts
//!
//! - **Scoring**: `score_hand` turns a finished hand into a score change per team
//! - **Phases**: each hand is entered as Bidding, then Meld, then Tricks
//! - **Validation**: rules gating each forward move, reporting every violation
//! - **Undo**: stepping back from Bidding reopens the last hand and reverses its score
//! - **Checkpoints**: versioned saves that upgrade older layouts on load
//!
//! # Example
//!
//! ```rust
//! use pinochle_score::{
//!     BidWinner, GameConfig, HandController, HandPatch, MemoryStore, Phase, Seat, Suit, TeamId,
//! };
//!
//! let mut game = HandController::open(MemoryStore::new(), GameConfig::default());
//!
//! game.update_current_hand(
//!     HandPatch::new()
//!         .bid(20)
//!         .bid_winner(BidWinner::player(TeamId::Team1, Seat::First))
//!         .trump(Suit::Hearts),
//! );
//! game.advance(); // Meld
//! game.update_current_hand(HandPatch::new().meld(TeamId::Team1, 10));
//! game.advance(); // Tricks
//! game.update_tricks(TeamId::Team1, 12);
//! game.advance(); // scored
//!
//! assert_eq!(game.phase(), Phase::Bidding);
//! assert_eq!(game.team1().score, 22);
//! assert_eq!(game.team2().score, 13);
//! ```

pub mod checkpoint;
pub mod config;
pub mod controller;
pub mod core;
pub mod scoring;
pub mod store;
pub mod validation;

// Re-export commonly used types
pub use checkpoint::{Checkpoint, CheckpointError, CHECKPOINT_VERSION};
pub use config::{ConfigError, GameConfig, ResetPolicy};
pub use controller::{HandController, LoadError};
pub use self::core::{
    BidWinner, ForwardAction, GameState, Hand, HandInProgress, HandPatch, HandRecord, Phase, Seat,
    Step, StepOutcome, Suit, Team, TeamId,
};
pub use scoring::{score_hand, HandScore, Points};
pub use store::{FileStore, MemoryStore, Store, StoreError};
pub use validation::HandViolation;
