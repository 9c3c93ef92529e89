//! Hand phases.
//!
//! A hand moves Bidding -> Meld -> Tricks and is committed from Tricks, or
//! straight from Meld when the bid cannot be made.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the current hand is in its entry cycle.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Bidding,
    Meld,
    Tricks,
}

impl Phase {
    /// Name for display and logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bidding => "Bidding",
            Self::Meld => "Meld",
            Self::Tricks => "Tricks",
        }
    }

    /// The phase before this one inside a single hand.
    pub fn previous(&self) -> Option<Phase> {
        match self {
            Self::Bidding => None,
            Self::Meld => Some(Self::Bidding),
            Self::Tricks => Some(Self::Meld),
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What the forward control will do if pressed now.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum ForwardAction {
    Next,
    FinishHand,
}

impl ForwardAction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Next => "Next",
            Self::FinishHand => "Finish Hand",
        }
    }

    pub fn commits(&self) -> bool {
        matches!(self, Self::FinishHand)
    }
}
