//! Checkpoint error types.

use thiserror::Error;

/// Errors that can occur while saving or loading a game
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// Serialization to JSON failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Bytes were not valid JSON, or did not match the expected fields
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Saved by a newer release than this one
    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Versionless data that matches no known legacy layout
    #[error("Unrecognized saved game layout: {0}")]
    UnrecognizedShape(String),

    /// Data parsed but breaks a game invariant
    #[error("Checkpoint validation failed: {0}")]
    ValidationFailed(String),
}
