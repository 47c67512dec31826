//! Pairing engine configuration

use serde::{Deserialize, Serialize};

use crate::pairing::solver::SolverKind;
use crate::types::DEFAULT_BYE_ID;

/// Options for pairing a round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PairingSettings {
    /// Id given to the synthetic bye participant
    pub bye_id: String,
    /// Matching backend
    pub solver: SolverKind,
    /// Field size from which edges are scored on the rayon pool
    pub parallel_threshold: usize,
    /// Reject empty, odd or duplicate-id fields before pairing
    pub validate_input: bool,
}

impl Default for PairingSettings {
    fn default() -> Self {
        Self {
            bye_id: DEFAULT_BYE_ID.to_string(),
            solver: SolverKind::default(),
            parallel_threshold: 256,
            validate_input: true,
        }
    }
}
