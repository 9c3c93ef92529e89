//! Shared helpers for integration tests.

#![allow(dead_code)]

use once_cell::sync::OnceCell;
use pinochle_score::{BidWinner, GameConfig, GameState, HandPatch, Phase, Seat, Suit, TeamId};
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Install a test subscriber once. Level comes from `TEST_LOG`, then
/// `RUST_LOG`, then `warn`.
pub fn init_logging() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

/// Raw inputs for one hand as a scorekeeper would enter them.
#[derive(Clone, Debug)]
pub struct HandInput {
    pub bidder: TeamId,
    pub seat: Seat,
    pub bid: u32,
    pub trump: Suit,
    pub team1_meld: u32,
    pub team2_meld: u32,
    pub team1_tricks: u32,
}

impl HandInput {
    pub fn bidding_patch(&self) -> HandPatch {
        HandPatch::new()
            .bid(self.bid)
            .bid_winner(BidWinner::player(self.bidder, self.seat))
            .trump(self.trump)
    }

    pub fn meld_patch(&self) -> HandPatch {
        HandPatch::new()
            .meld(TeamId::Team1, self.team1_meld)
            .meld(TeamId::Team2, self.team2_meld)
    }
}

/// Enter `input` up to the step just before the hand is committed.
pub fn enter_until_commit(state: &GameState, input: &HandInput, config: &GameConfig) -> GameState {
    let s = state.update_current_hand(&input.bidding_patch(), config).state;
    let s = s.advance(config).state;
    let s = s.update_current_hand(&input.meld_patch(), config).state;
    if s.is_bid_impossible(config) {
        return s;
    }
    let s = s.advance(config).state;
    assert_eq!(s.phase(), Phase::Tricks);
    s.update_tricks(TeamId::Team1, input.team1_tricks, config).state
}

/// Enter and commit a whole hand.
pub fn play(state: &GameState, input: &HandInput, config: &GameConfig) -> GameState {
    enter_until_commit(state, input, config).advance(config).state
}
