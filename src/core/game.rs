//! The hand lifecycle as pure state transitions.
//!
//! Every command takes the current [`GameState`] by reference and returns a
//! [`Step`]: a complete replacement state plus a [`StepOutcome`] describing
//! what happened. A refused command returns an unchanged copy, so a caller
//! can never observe a half-applied mutation.

use super::history::{self, HandRecord};
use super::phase::{ForwardAction, Phase};
use super::types::{Hand, HandInProgress, HandPatch, Team, TeamId};
use crate::config::{GameConfig, ResetPolicy};
use crate::scoring::{score_hand, HandScore};
use crate::validation::{
    validate_bidding, validate_phase, validate_tricks, violations_of, HandValidation,
    HandViolation,
};
use stillwater::validation::Validation;

/// What a command did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Moved between phases of the same hand.
    Moved { from: Phase, to: Phase },

    /// The hand was scored and appended to history.
    Committed {
        number: usize,
        score: HandScore,
        /// The bid was unreachable, so tricks were skipped and recorded as 0/0.
        skipped_tricks: bool,
    },

    /// The last committed hand was taken back for editing.
    Reopened { number: usize, phase: Phase },

    /// Fields of the in-progress hand changed.
    Edited,

    /// A team's player names changed.
    Renamed { team: TeamId },

    /// The game was cleared.
    Reset,

    /// The forward move is blocked by these rules.
    Rejected(Vec<HandViolation>),

    /// Nothing to go back to.
    Unavailable,
}

impl StepOutcome {
    /// True when the command left the state as it was.
    pub fn is_noop(&self) -> bool {
        matches!(self, Self::Rejected(_) | Self::Unavailable)
    }
}

/// Result of a command: the replacement state and what happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    pub state: GameState,
    pub outcome: StepOutcome,
}

/// Teams, committed hands, the hand being entered and its phase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    team1: Team,
    team2: Team,
    hands: Vec<Hand>,
    current_hand: HandInProgress,
    phase: Phase,
}

impl GameState {
    /// A fresh game with the configured player names.
    pub fn new(config: &GameConfig) -> Self {
        let [team1, team2] = config.default_players.clone();
        Self {
            team1: Team::new(team1),
            team2: Team::new(team2),
            hands: Vec::new(),
            current_hand: HandInProgress::new(config),
            phase: Phase::Bidding,
        }
    }

    /// Resume a saved game at the start of its next hand.
    pub(crate) fn resume(team1: Team, team2: Team, hands: Vec<Hand>, config: &GameConfig) -> Self {
        Self {
            team1,
            team2,
            hands,
            current_hand: HandInProgress::new(config),
            phase: Phase::Bidding,
        }
    }

    pub fn team1(&self) -> &Team {
        &self.team1
    }

    pub fn team2(&self) -> &Team {
        &self.team2
    }

    pub fn team(&self, team: TeamId) -> &Team {
        match team {
            TeamId::Team1 => &self.team1,
            TeamId::Team2 => &self.team2,
        }
    }

    fn team_mut(&mut self, team: TeamId) -> &mut Team {
        match team {
            TeamId::Team1 => &mut self.team1,
            TeamId::Team2 => &mut self.team2,
        }
    }

    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    pub fn current_hand(&self) -> &HandInProgress {
        &self.current_hand
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Ordinal of the hand being entered.
    pub fn hand_number(&self) -> usize {
        self.hands.len() + 1
    }

    /// Committed hands with their recorded deltas and running totals.
    pub fn records(&self) -> Vec<HandRecord<'_>> {
        history::records(&self.hands, &self.team1, &self.team2)
    }

    /// True when teams or hand history differ, i.e. when a save is due.
    pub fn record_differs(&self, other: &GameState) -> bool {
        self.team1 != other.team1 || self.team2 != other.team2 || self.hands != other.hands
    }

    pub fn is_bid_impossible(&self, config: &GameConfig) -> bool {
        self.current_hand.is_bid_impossible(config.tricks_total)
    }

    fn forward_validation(&self, config: &GameConfig) -> HandValidation {
        let hand = &self.current_hand;
        match self.phase {
            Phase::Meld if self.is_bid_impossible(config) => validate_bidding(hand, config),
            Phase::Tricks => Validation::all_vec(vec![
                validate_bidding(hand, config),
                validate_tricks(hand, config),
            ])
            .map(|_| ()),
            phase => validate_phase(phase, hand, config),
        }
    }

    /// Everything currently blocking `advance`.
    pub fn violations(&self, config: &GameConfig) -> Vec<HandViolation> {
        violations_of(self.forward_validation(config))
    }

    pub fn can_advance(&self, config: &GameConfig) -> bool {
        self.forward_validation(config).is_success()
    }

    pub fn can_retreat(&self) -> bool {
        self.phase != Phase::Bidding || !self.hands.is_empty()
    }

    pub fn forward_action(&self, config: &GameConfig) -> ForwardAction {
        match self.phase {
            Phase::Tricks => ForwardAction::FinishHand,
            Phase::Meld if self.is_bid_impossible(config) => ForwardAction::FinishHand,
            _ => ForwardAction::Next,
        }
    }

    fn unchanged(&self, outcome: StepOutcome) -> Step {
        Step {
            state: self.clone(),
            outcome,
        }
    }

    fn moved_to(&self, to: Phase) -> Step {
        let mut next = self.clone();
        next.phase = to;
        Step {
            state: next,
            outcome: StepOutcome::Moved {
                from: self.phase,
                to,
            },
        }
    }

    /// Move forward: Bidding -> Meld -> Tricks -> commit, committing straight
    /// from Meld when the bid cannot be made.
    pub fn advance(&self, config: &GameConfig) -> Step {
        let violations = self.violations(config);
        if !violations.is_empty() {
            return self.unchanged(StepOutcome::Rejected(violations));
        }

        match self.phase {
            Phase::Bidding => self.moved_to(Phase::Meld),
            _ if self.forward_action(config).commits() => self.commit(config),
            _ => self.moved_to(Phase::Tricks),
        }
    }

    fn commit(&self, config: &GameConfig) -> Step {
        let Some(mut hand) = self.current_hand.finalize() else {
            return self.unchanged(StepOutcome::Rejected(violations_of(validate_bidding(
                &self.current_hand,
                config,
            ))));
        };

        let skipped_tricks = self.is_bid_impossible(config);
        if skipped_tricks {
            hand.team1_tricks = 0;
            hand.team2_tricks = 0;
        }

        let score = score_hand(&hand);
        let mut next = self.clone();
        next.hands.push(hand);
        next.team1.push_delta(score.team1);
        next.team2.push_delta(score.team2);
        next.current_hand = HandInProgress::new(config);
        next.phase = Phase::Bidding;

        let number = next.hands.len();
        Step {
            state: next,
            outcome: StepOutcome::Committed {
                number,
                score,
                skipped_tricks,
            },
        }
    }

    /// Move backward. From Bidding this reopens the last committed hand,
    /// reversing its score, at the phase it was last edited in.
    pub fn retreat(&self, config: &GameConfig) -> Step {
        if let Some(previous) = self.phase.previous() {
            return self.moved_to(previous);
        }

        let mut next = self.clone();
        let Some(hand) = next.hands.pop() else {
            return self.unchanged(StepOutcome::Unavailable);
        };
        next.team1.pop_delta();
        next.team2.pop_delta();

        let phase = if hand.was_bid_impossible(config.tricks_total) {
            Phase::Meld
        } else {
            Phase::Tricks
        };
        next.current_hand = HandInProgress::from(&hand);
        next.phase = phase;

        let number = next.hand_number();
        Step {
            state: next,
            outcome: StepOutcome::Reopened { number, phase },
        }
    }

    /// Merge fields into the in-progress hand. Allowed in any phase.
    pub fn update_current_hand(&self, patch: &HandPatch, config: &GameConfig) -> Step {
        let mut next = self.clone();
        patch.apply_to(&mut next.current_hand, config);
        Step {
            state: next,
            outcome: StepOutcome::Edited,
        }
    }

    /// Set one team's tricks and give the rest of the hand to the other team.
    pub fn update_tricks(&self, team: TeamId, value: u32, config: &GameConfig) -> Step {
        let value = value.min(config.tricks_total);
        let mut next = self.clone();
        next.current_hand.set_tricks(team, value);
        next.current_hand
            .set_tricks(team.other(), config.tricks_total - value);
        Step {
            state: next,
            outcome: StepOutcome::Edited,
        }
    }

    /// Change a team's player names. Scores are untouched.
    pub fn rename_players(&self, team: TeamId, players: [String; 2]) -> Step {
        let mut next = self.clone();
        next.team_mut(team).players = players;
        Step {
            state: next,
            outcome: StepOutcome::Renamed { team },
        }
    }

    /// Start over, keeping or clearing names according to the reset policy.
    pub fn reset(&self, config: &GameConfig) -> Step {
        let mut next = GameState::new(config);
        if config.reset_policy == ResetPolicy::KeepPlayers {
            next.team1.players = self.team1.players.clone();
            next.team2.players = self.team2.players.clone();
        }
        Step {
            state: next,
            outcome: StepOutcome::Reset,
        }
    }
}
