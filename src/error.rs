//! Error types for the pairing engine
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the crate. Domain failures are `PairingError` variants wrapped in
//! `anyhow::Error`; callers recover them with `downcast_ref`.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific pairing scenarios
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PairingError {
    #[error("No participants supplied for pairing")]
    EmptyField,

    #[error("Odd participant count {count}: inject a bye participant before pairing")]
    OddParticipantCount { count: usize },

    #[error("Duplicate participant id: {id}")]
    DuplicateParticipant { id: String },

    #[error("Edge weight {weight} does not fit the matching solver's weight type")]
    WeightOverflow { weight: u64 },

    #[error("Matching solver left participant at position {position} unmatched")]
    UnmatchedParticipant { position: usize },

    #[error("Matching solver paired position {position} with {opponent}, which is not symmetric")]
    AsymmetricPairing { position: usize, opponent: usize },

    #[error("Matching solver failed: {reason}")]
    SolverFailed { reason: String },

    #[error("Invalid standings: {reason}")]
    InvalidStandings { reason: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}
