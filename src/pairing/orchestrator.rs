//! Round pairing orchestration
//!
//! Turns standings into a complete weighted graph, hands it to a matching
//! backend, and checks that the backend's answer is a total, symmetric
//! opponent assignment before returning it.

use std::collections::HashSet;

use tracing::{debug, error, info, warn};

use crate::config::PairingSettings;
use crate::error::{PairingError, Result};
use crate::pairing::graph::{build_edges, build_edges_parallel};
use crate::pairing::solver::{MatchingSolver, MwMatchingSolver, UNMATCHED};
use crate::types::{Edge, Pairing, Participant};

/// Pairs one round of a Swiss tournament
pub struct SwissPairer {
    solver: Box<dyn MatchingSolver>,
    settings: PairingSettings,
}

impl SwissPairer {
    /// Pairer with the default backend and settings
    pub fn new() -> Self {
        Self::with_solver(Box::new(MwMatchingSolver::new()))
    }

    pub fn with_solver(solver: Box<dyn MatchingSolver>) -> Self {
        Self {
            solver,
            settings: PairingSettings::default(),
        }
    }

    /// Pairer using the backend and options named in `settings`
    pub fn from_settings(settings: &PairingSettings) -> Self {
        Self {
            solver: settings.solver.build(),
            settings: settings.clone(),
        }
    }

    pub fn settings(&self) -> &PairingSettings {
        &self.settings
    }

    pub fn solver_name(&self) -> &'static str {
        self.solver.name()
    }

    /// Compute the opponent of every participant
    ///
    /// Position `i` of the result holds the position of `participants[i]`'s
    /// opponent. Where several assignments are optimal the same one is returned
    /// for the same input order.
    pub fn pair(&self, participants: &[Participant]) -> Result<Pairing> {
        if self.settings.validate_input {
            validate_field(participants)?;
        } else {
            warn!(
                "Input validation disabled; pairing {} participants as given",
                participants.len()
            );
        }

        let node_count = participants.len();
        if node_count == 0 {
            return Ok(Pairing::from_mates(Vec::new()));
        }

        let edges = self.build_graph(participants);

        debug!(
            "Running {} solver on {} participants",
            self.solver.name(),
            node_count
        );
        let mates = self.solver.solve(node_count, &edges)?;

        let pairing = validate_matching(node_count, mates).map_err(|e| {
            error!(
                "Matching solver {} broke pairing invariants: {}",
                self.solver.name(),
                e
            );
            e
        })?;

        info!(
            "Paired {} participants into {} matches (total weight {})",
            node_count,
            pairing.pairs().len(),
            pairing.total_weight(&edges)
        );
        Ok(pairing)
    }

    fn build_graph(&self, participants: &[Participant]) -> Vec<Edge> {
        if participants.len() >= self.settings.parallel_threshold {
            build_edges_parallel(participants)
        } else {
            build_edges(participants)
        }
    }
}

impl Default for SwissPairer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SwissPairer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwissPairer")
            .field("solver", &self.solver.name())
            .field("settings", &self.settings)
            .finish()
    }
}

/// Pair a round with the default backend and settings
pub fn pairings(participants: &[Participant]) -> Result<Pairing> {
    SwissPairer::new().pair(participants)
}

/// Check the caller's side of the contract: a non-empty, even field of
/// distinct ids
pub fn validate_field(participants: &[Participant]) -> Result<()> {
    if participants.is_empty() {
        return Err(PairingError::EmptyField.into());
    }

    if participants.len() % 2 != 0 {
        return Err(PairingError::OddParticipantCount {
            count: participants.len(),
        }
        .into());
    }

    let mut seen = HashSet::with_capacity(participants.len());
    for participant in participants {
        if !seen.insert(participant.id.as_str()) {
            return Err(PairingError::DuplicateParticipant {
                id: participant.id.clone(),
            }
            .into());
        }
    }

    Ok(())
}

/// Check a raw solver result and wrap it as a [`Pairing`]
///
/// The graph handed to the solver is complete, so any uncovered or
/// inconsistent position is an integration defect, never retried.
pub fn validate_matching(node_count: usize, mates: Vec<usize>) -> Result<Pairing> {
    if mates.len() != node_count {
        return Err(PairingError::SolverFailed {
            reason: format!(
                "expected {} entries in matching, got {}",
                node_count,
                mates.len()
            ),
        }
        .into());
    }

    for (position, &opponent) in mates.iter().enumerate() {
        if opponent == UNMATCHED || opponent >= node_count {
            return Err(PairingError::UnmatchedParticipant { position }.into());
        }
        if opponent == position || mates[opponent] != position {
            return Err(PairingError::AsymmetricPairing { position, opponent }.into());
        }
    }

    Ok(Pairing::from_mates(mates))
}
