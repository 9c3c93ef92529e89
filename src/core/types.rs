//! Teams, hands and the in-progress hand being entered.
//!
//! Committed hands never carry unset values: the optional bid winner and
//! trump of [`HandInProgress`] only become a [`Hand`] through
//! [`HandInProgress::finalize`], which requires both.

use crate::config::GameConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two partnerships at the table.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamId {
    Team1,
    Team2,
}

impl TeamId {
    pub const BOTH: [TeamId; 2] = [TeamId::Team1, TeamId::Team2];

    /// The opposing partnership.
    pub fn other(self) -> Self {
        match self {
            Self::Team1 => Self::Team2,
            Self::Team2 => Self::Team1,
        }
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Team1 => f.write_str("team1"),
            Self::Team2 => f.write_str("team2"),
        }
    }
}

/// A player's position within their team.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seat {
    First,
    Second,
}

impl Seat {
    pub fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::First),
            1 => Some(Self::Second),
            _ => None,
        }
    }
}

/// Who took the bid. Scoring only ever looks at `team`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct BidWinner {
    pub team: TeamId,
    #[serde(default)]
    pub player: Option<Seat>,
}

impl BidWinner {
    pub fn team(team: TeamId) -> Self {
        Self { team, player: None }
    }

    pub fn player(team: TeamId, seat: Seat) -> Self {
        Self {
            team,
            player: Some(seat),
        }
    }
}

/// Trump suit named by the bidder.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    pub fn symbol(self) -> char {
        match self {
            Self::Hearts => '♥',
            Self::Diamonds => '♦',
            Self::Clubs => '♣',
            Self::Spades => '♠',
        }
    }

    pub fn is_red(self) -> bool {
        matches!(self, Self::Hearts | Self::Diamonds)
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Hearts => "hearts",
            Self::Diamonds => "diamonds",
            Self::Clubs => "clubs",
            Self::Spades => "spades",
        };
        f.write_str(name)
    }
}

/// A partnership: its two players, running score and per-hand contributions.
///
/// `score` always equals the sum of `hand_deltas`, and `hand_deltas` has one
/// entry per committed hand.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Team {
    pub players: [String; 2],
    pub score: i32,
    pub hand_deltas: Vec<i32>,
}

impl Team {
    pub fn new(players: [String; 2]) -> Self {
        Self {
            players,
            score: 0,
            hand_deltas: Vec::new(),
        }
    }

    /// Names joined for display, skipping blanks.
    pub fn display_name(&self) -> String {
        let names: Vec<&str> = self
            .players
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .collect();
        names.join(" & ")
    }

    pub fn player_name(&self, seat: Seat) -> &str {
        &self.players[seat.index()]
    }

    pub(crate) fn push_delta(&mut self, delta: i32) {
        self.score = self.score.saturating_add(delta);
        self.hand_deltas.push(delta);
    }

    pub(crate) fn pop_delta(&mut self) -> Option<i32> {
        let delta = self.hand_deltas.pop()?;
        self.score = self.score.saturating_sub(delta);
        Some(delta)
    }

    pub(crate) fn is_consistent(&self) -> bool {
        self.hand_deltas
            .iter()
            .try_fold(0i32, |acc, d| acc.checked_add(*d))
            .is_some_and(|sum| sum == self.score)
    }
}

/// A committed hand.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Hand {
    pub team1_meld: u32,
    pub team1_tricks: u32,
    pub team2_meld: u32,
    pub team2_tricks: u32,
    pub bid: u32,
    pub bid_winner: BidWinner,
    pub trump: Suit,
}

impl Hand {
    pub fn meld(&self, team: TeamId) -> u32 {
        match team {
            TeamId::Team1 => self.team1_meld,
            TeamId::Team2 => self.team2_meld,
        }
    }

    pub fn tricks(&self, team: TeamId) -> u32 {
        match team {
            TeamId::Team1 => self.team1_tricks,
            TeamId::Team2 => self.team2_tricks,
        }
    }

    pub fn bidder(&self) -> TeamId {
        self.bid_winner.team
    }

    /// Whether the bidder could not have reached the bid even taking every trick.
    pub fn was_bid_impossible(&self, tricks_total: u32) -> bool {
        crate::scoring::is_bid_impossible(self.bid, self.meld(self.bidder()), tricks_total)
    }
}

/// The hand currently being entered or corrected.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct HandInProgress {
    pub bid: u32,
    pub bid_winner: Option<BidWinner>,
    pub trump: Option<Suit>,
    pub team1_meld: u32,
    pub team2_meld: u32,
    pub team1_tricks: u32,
    pub team2_tricks: u32,
}

impl HandInProgress {
    /// A blank hand opening at the minimum bid.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            bid: config.min_bid,
            bid_winner: None,
            trump: None,
            team1_meld: 0,
            team2_meld: 0,
            team1_tricks: 0,
            team2_tricks: 0,
        }
    }

    pub fn meld(&self, team: TeamId) -> u32 {
        match team {
            TeamId::Team1 => self.team1_meld,
            TeamId::Team2 => self.team2_meld,
        }
    }

    pub fn tricks(&self, team: TeamId) -> u32 {
        match team {
            TeamId::Team1 => self.team1_tricks,
            TeamId::Team2 => self.team2_tricks,
        }
    }

    pub(crate) fn set_tricks(&mut self, team: TeamId, value: u32) {
        match team {
            TeamId::Team1 => self.team1_tricks = value,
            TeamId::Team2 => self.team2_tricks = value,
        }
    }

    /// False until a bid winner has been chosen.
    pub fn is_bid_impossible(&self, tricks_total: u32) -> bool {
        self.bid_winner.is_some_and(|winner| {
            crate::scoring::is_bid_impossible(self.bid, self.meld(winner.team), tricks_total)
        })
    }

    /// Freeze into a committed hand. `None` while bid winner or trump is unset.
    pub fn finalize(&self) -> Option<Hand> {
        Some(Hand {
            team1_meld: self.team1_meld,
            team1_tricks: self.team1_tricks,
            team2_meld: self.team2_meld,
            team2_tricks: self.team2_tricks,
            bid: self.bid,
            bid_winner: self.bid_winner?,
            trump: self.trump?,
        })
    }
}

impl From<&Hand> for HandInProgress {
    fn from(hand: &Hand) -> Self {
        Self {
            bid: hand.bid,
            bid_winner: Some(hand.bid_winner),
            trump: Some(hand.trump),
            team1_meld: hand.team1_meld,
            team2_meld: hand.team2_meld,
            team1_tricks: hand.team1_tricks,
            team2_tricks: hand.team2_tricks,
        }
    }
}

/// Partial update merged into the in-progress hand.
///
/// Unset fields are left alone; numeric fields are clamped into their legal
/// range when merged.
#[derive(Clone, Default, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct HandPatch {
    pub bid: Option<u32>,
    pub bid_winner: Option<BidWinner>,
    pub trump: Option<Suit>,
    pub team1_meld: Option<u32>,
    pub team2_meld: Option<u32>,
    pub team1_tricks: Option<u32>,
    pub team2_tricks: Option<u32>,
}

impl HandPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bid(mut self, bid: u32) -> Self {
        self.bid = Some(bid);
        self
    }

    pub fn bid_winner(mut self, winner: BidWinner) -> Self {
        self.bid_winner = Some(winner);
        self
    }

    pub fn trump(mut self, suit: Suit) -> Self {
        self.trump = Some(suit);
        self
    }

    pub fn meld(mut self, team: TeamId, value: u32) -> Self {
        match team {
            TeamId::Team1 => self.team1_meld = Some(value),
            TeamId::Team2 => self.team2_meld = Some(value),
        }
        self
    }

    pub fn tricks(mut self, team: TeamId, value: u32) -> Self {
        match team {
            TeamId::Team1 => self.team1_tricks = Some(value),
            TeamId::Team2 => self.team2_tricks = Some(value),
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge into `hand`, clamping out-of-range numbers.
    pub fn apply_to(&self, hand: &mut HandInProgress, config: &GameConfig) {
        if let Some(bid) = self.bid {
            hand.bid = bid.max(config.min_bid).min(config.max_bid);
        }
        if let Some(winner) = self.bid_winner {
            hand.bid_winner = Some(winner);
        }
        if let Some(trump) = self.trump {
            hand.trump = Some(trump);
        }
        if let Some(meld) = self.team1_meld {
            hand.team1_meld = meld.min(config.max_meld);
        }
        if let Some(meld) = self.team2_meld {
            hand.team2_meld = meld.min(config.max_meld);
        }
        if let Some(tricks) = self.team1_tricks {
            hand.team1_tricks = tricks.min(config.tricks_total);
        }
        if let Some(tricks) = self.team2_tricks {
            hand.team2_tricks = tricks.min(config.tricks_total);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_hand() -> Hand {
        Hand {
            team1_meld: 10,
            team1_tricks: 12,
            team2_meld: 4,
            team2_tricks: 13,
            bid: 20,
            bid_winner: BidWinner::player(TeamId::Team1, Seat::Second),
            trump: Suit::Spades,
        }
    }

    #[test]
    fn team_other_flips() {
        assert_eq!(TeamId::Team1.other(), TeamId::Team2);
        assert_eq!(TeamId::Team2.other(), TeamId::Team1);
    }

    #[test]
    fn seat_index_roundtrips() {
        assert_eq!(Seat::from_index(Seat::First.index()), Some(Seat::First));
        assert_eq!(Seat::from_index(Seat::Second.index()), Some(Seat::Second));
        assert_eq!(Seat::from_index(2), None);
    }

    #[test]
    fn display_name_skips_blank_players() {
        let team = Team::new(["Ann".into(), "Bob".into()]);
        assert_eq!(team.display_name(), "Ann & Bob");

        let legacy = Team::new(["Team 1".into(), String::new()]);
        assert_eq!(legacy.display_name(), "Team 1");
    }

    #[test]
    fn player_name_by_seat() {
        let team = Team::new(["Ann".into(), "Bob".into()]);
        assert_eq!(team.player_name(Seat::First), "Ann");
        assert_eq!(team.player_name(Seat::Second), "Bob");
    }

    #[test]
    fn suit_symbols_and_colours() {
        let symbols: String = Suit::ALL.iter().map(|s| s.symbol()).collect();
        assert_eq!(symbols, "♠♥♦♣");
        assert!(Suit::Hearts.is_red());
        assert!(Suit::Diamonds.is_red());
        assert!(!Suit::Clubs.is_red());
        assert!(!Suit::Spades.is_red());
    }

    #[test]
    fn deltas_keep_score_in_sync() {
        let mut team = Team::new(["A".into(), "B".into()]);
        team.push_delta(22);
        team.push_delta(-25);
        assert_eq!(team.score, -3);
        assert!(team.is_consistent());

        assert_eq!(team.pop_delta(), Some(-25));
        assert_eq!(team.score, 22);
        assert_eq!(team.hand_deltas, vec![22]);
        assert!(team.is_consistent());
    }

    #[test]
    fn inconsistent_team_is_detected() {
        let team = Team {
            players: ["A".into(), "B".into()],
            score: 10,
            hand_deltas: vec![4, 5],
        };
        assert!(!team.is_consistent());
    }

    #[test]
    fn finalize_requires_winner_and_trump() {
        let config = GameConfig::default();
        let mut hand = HandInProgress::new(&config);
        assert!(hand.finalize().is_none());

        hand.bid_winner = Some(BidWinner::team(TeamId::Team2));
        assert!(hand.finalize().is_none());

        hand.trump = Some(Suit::Hearts);
        let committed = hand.finalize().unwrap();
        assert_eq!(committed.bidder(), TeamId::Team2);
        assert_eq!(committed.bid, config.min_bid);
    }

    #[test]
    fn in_progress_from_hand_restores_every_field() {
        let hand = sample_hand();
        let restored = HandInProgress::from(&hand);
        assert_eq!(restored.finalize(), Some(hand));
    }

    #[test]
    fn bid_impossible_needs_a_winner() {
        let config = GameConfig::default();
        let mut hand = HandInProgress::new(&config);
        hand.bid = 60;
        assert!(!hand.is_bid_impossible(config.tricks_total));

        hand.bid_winner = Some(BidWinner::team(TeamId::Team1));
        assert!(hand.is_bid_impossible(config.tricks_total));

        hand.team1_meld = 35;
        assert!(!hand.is_bid_impossible(config.tricks_total));
    }

    #[test]
    fn patch_clamps_numbers() {
        let config = GameConfig::default();
        let mut hand = HandInProgress::new(&config);

        HandPatch::new()
            .bid(5)
            .meld(TeamId::Team1, 5000)
            .tricks(TeamId::Team2, 40)
            .apply_to(&mut hand, &config);

        assert_eq!(hand.bid, config.min_bid);
        assert_eq!(hand.team1_meld, config.max_meld);
        assert_eq!(hand.team2_tricks, config.tricks_total);

        HandPatch::new().bid(500).apply_to(&mut hand, &config);
        assert_eq!(hand.bid, config.max_bid);
    }

    #[test]
    fn patch_with_inverted_bid_range_does_not_panic() {
        let config = GameConfig {
            min_bid: 50,
            max_bid: 40,
            ..GameConfig::default()
        };
        let mut hand = HandInProgress::new(&config);

        HandPatch::new().bid(45).apply_to(&mut hand, &config);
        assert_eq!(hand.bid, 40);
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let config = GameConfig::default();
        let mut hand = HandInProgress::new(&config);
        let before = hand.clone();
        let patch = HandPatch::new();
        assert!(patch.is_empty());
        patch.apply_to(&mut hand, &config);
        assert_eq!(hand, before);
    }

    #[test]
    fn hand_serializes_with_lowercase_enums() {
        let json = serde_json::to_value(sample_hand()).unwrap();
        assert_eq!(json["trump"], "spades");
        assert_eq!(json["bid_winner"]["team"], "team1");
        assert_eq!(json["bid_winner"]["player"], "second");
    }
}
