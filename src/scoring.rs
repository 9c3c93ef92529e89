//! Bid-contract scoring.
//!
//! Pure functions only. Inputs are assumed to be validated: a bid at or above
//! the minimum, and tricks that either sum to the hand total or are both zero.

use crate::core::{Hand, TeamId};
use serde::{Deserialize, Serialize};

/// Signed score contribution.
pub type Points = i32;

/// Score change for each team from one hand.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct HandScore {
    pub team1: Points,
    pub team2: Points,
}

impl HandScore {
    pub fn for_team(&self, team: TeamId) -> Points {
        match team {
            TeamId::Team1 => self.team1,
            TeamId::Team2 => self.team2,
        }
    }
}

/// Meld plus tricks, or nothing if the team took no tricks.
///
/// A team that takes no tricks forfeits its meld.
pub fn effective_points(meld: u32, tricks: u32) -> Points {
    if tricks == 0 {
        return 0;
    }
    Points::try_from(meld.saturating_add(tricks)).unwrap_or(Points::MAX)
}

/// True when `bid - bidder_meld` exceeds everything the tricks can provide.
pub fn is_bid_impossible(bid: u32, bidder_meld: u32, tricks_total: u32) -> bool {
    bid.saturating_sub(bidder_meld) > tricks_total
}

/// Score one hand under the bid contract.
///
/// The non-bidding team always keeps its effective points. The bidding team
/// keeps its effective points when they reach the bid, otherwise it is set
/// and loses exactly the bid.
pub fn score_hand(hand: &Hand) -> HandScore {
    let team1 = effective_points(hand.team1_meld, hand.team1_tricks);
    let team2 = effective_points(hand.team2_meld, hand.team2_tricks);

    let bidder = hand.bidder();
    let bidding_points = match bidder {
        TeamId::Team1 => team1,
        TeamId::Team2 => team2,
    };
    let bid = Points::try_from(hand.bid).unwrap_or(Points::MAX);
    let bidder_delta = if bidding_points >= bid { bidding_points } else { -bid };

    match bidder {
        TeamId::Team1 => HandScore {
            team1: bidder_delta,
            team2,
        },
        TeamId::Team2 => HandScore {
            team1,
            team2: bidder_delta,
        },
    }
}
