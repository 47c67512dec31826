//! Swiss round pairing
//!
//! This module scores every candidate pairing of a round and selects the
//! heaviest set of pairings with a maximum-weight matching backend.

pub mod graph;
pub mod orchestrator;
pub mod quality;
pub mod solver;
pub mod weight;

// Re-export commonly used types
pub use graph::{build_edges, build_edges_parallel, highest_points};
pub use orchestrator::{pairings, validate_field, validate_matching, SwissPairer};
pub use quality::quality;
pub use solver::{ExhaustiveSolver, MatchingSolver, MwMatchingSolver, SolverKind, UNMATCHED};
pub use weight::weight;
