//! Swiss Pairing - round pairings for Swiss-system tournaments
//!
//! This crate scores every candidate pairing of a round by rematch history and
//! standings, then selects the heaviest complete set of pairings with a
//! maximum-weight matching backend.

pub mod config;
pub mod error;
pub mod pairing;
pub mod round;
pub mod types;

// Re-export commonly used types and traits
pub use error::{PairingError, Result};
pub use types::*;

// Re-export key components
pub use pairing::{pairings, MatchingSolver, SwissPairer};
pub use round::{matchups, prepare_field, render, Matchup, OutputFormat, Standings};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
