//! Reasons a hand cannot leave its current phase.

use crate::core::TeamId;
use thiserror::Error;

/// A single failed rule. These are reported to the caller, never raised.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HandViolation {
    #[error("Bid {bid} is below the minimum of {min}")]
    BidBelowMinimum { bid: u32, min: u32 },

    #[error("No team has won the bid")]
    MissingBidWinner,

    #[error("No player on {team} is recorded as the bidder")]
    MissingBidderSeat { team: TeamId },

    #[error("Trump suit has not been chosen")]
    MissingTrump,

    #[error("Tricks must total {expected} (got {team1} + {team2})")]
    TricksUnbalanced {
        team1: u32,
        team2: u32,
        expected: u32,
    },
}
