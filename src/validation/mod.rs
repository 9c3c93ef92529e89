//! Validation rules gating phase transitions.
//!
//! Rules use stillwater's `Validation` so that a blocked transition reports
//! every unmet requirement in one pass. A failed rule is never an error: the
//! transition is simply refused and the violations are handed back to the
//! caller for display.

pub mod rules;
pub mod violations;

pub use rules::{
    validate_bidding, validate_committed, validate_phase, validate_tricks, violations_of,
    HandValidation,
};
pub use violations::HandViolation;
