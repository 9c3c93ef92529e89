//! Phase rules, accumulating every violation instead of stopping at the first.

use crate::config::GameConfig;
use crate::core::{Hand, HandInProgress, Phase};
use crate::validation::violations::HandViolation;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Outcome of checking a hand against a set of rules.
pub type HandValidation = Validation<(), NonEmptyVec<HandViolation>>;

fn check(passes: bool, violation: impl FnOnce() -> HandViolation) -> HandValidation {
    if passes {
        Validation::success(())
    } else {
        Validation::fail(violation())
    }
}

fn bid_at_least_minimum(bid: u32, config: &GameConfig) -> HandValidation {
    check(bid >= config.min_bid, || HandViolation::BidBelowMinimum {
        bid,
        min: config.min_bid,
    })
}

/// Bidding is complete once the bid, its winner and trump are all known.
pub fn validate_bidding(hand: &HandInProgress, config: &GameConfig) -> HandValidation {
    let winner: HandValidation = match hand.bid_winner {
        None => Validation::fail(HandViolation::MissingBidWinner),
        Some(w) if config.require_bidder_seat && w.player.is_none() => {
            Validation::fail(HandViolation::MissingBidderSeat { team: w.team })
        }
        Some(_) => Validation::success(()),
    };

    let checks = vec![
        bid_at_least_minimum(hand.bid, config),
        winner,
        check(hand.trump.is_some(), || HandViolation::MissingTrump),
    ];

    Validation::all_vec(checks).map(|_| ())
}

/// Tricks are complete when both sides add up to the hand total.
pub fn validate_tricks(hand: &HandInProgress, config: &GameConfig) -> HandValidation {
    let (team1, team2) = (hand.team1_tricks, hand.team2_tricks);
    check(
        team1.saturating_add(team2) == config.tricks_total,
        || HandViolation::TricksUnbalanced {
            team1,
            team2,
            expected: config.tricks_total,
        },
    )
}

/// Rules gating the forward move out of `phase`. Meld has none.
pub fn validate_phase(phase: Phase, hand: &HandInProgress, config: &GameConfig) -> HandValidation {
    match phase {
        Phase::Bidding => validate_bidding(hand, config),
        Phase::Meld => Validation::success(()),
        Phase::Tricks => validate_tricks(hand, config),
    }
}

/// Rules every committed hand satisfies, used when loading saved games.
pub fn validate_committed(hand: &Hand, config: &GameConfig) -> HandValidation {
    let (team1, team2) = (hand.team1_tricks, hand.team2_tricks);
    let tricks_ok =
        team1.saturating_add(team2) == config.tricks_total || (team1 == 0 && team2 == 0);

    let checks = vec![
        bid_at_least_minimum(hand.bid, config),
        check(tricks_ok, || HandViolation::TricksUnbalanced {
            team1,
            team2,
            expected: config.tricks_total,
        }),
    ];

    Validation::all_vec(checks).map(|_| ())
}

/// Flatten a validation into the list of violations, empty on success.
pub fn violations_of(validation: HandValidation) -> Vec<HandViolation> {
    match validation {
        Validation::Success(_) => Vec::new(),
        Validation::Failure(errors) => errors.iter().cloned().collect(),
    }
}
