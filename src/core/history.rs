//! Read-only view over committed hands.
//!
//! Pairs each hand with the deltas recorded for it when it was committed and
//! the running totals after it, in play order.

use super::types::{Hand, Team};
use crate::scoring::HandScore;

/// One committed hand as shown in a history table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HandRecord<'a> {
    /// 1-based hand number.
    pub number: usize,
    pub hand: &'a Hand,
    /// Deltas recorded at commit time.
    pub score: HandScore,
    /// Team totals after this hand.
    pub totals: HandScore,
}

/// Build records for `hands` from the teams' recorded deltas.
///
/// Stops at the shortest of the three sequences; in a consistent game they
/// all have the same length.
pub fn records<'a>(hands: &'a [Hand], team1: &Team, team2: &Team) -> Vec<HandRecord<'a>> {
    let mut totals = HandScore::default();
    hands
        .iter()
        .zip(team1.hand_deltas.iter().zip(team2.hand_deltas.iter()))
        .enumerate()
        .map(|(i, (hand, (&d1, &d2)))| {
            totals.team1 = totals.team1.saturating_add(d1);
            totals.team2 = totals.team2.saturating_add(d2);
            HandRecord {
                number: i + 1,
                hand,
                score: HandScore {
                    team1: d1,
                    team2: d2,
                },
                totals,
            }
        })
        .collect()
}
