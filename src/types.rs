//! Common types used throughout the pairing engine

use serde::{Deserialize, Serialize};

/// Unique identifier for participants (and the synthetic bye slot)
pub type ParticipantId = String;

/// Standing score at the start of a round
pub type Points = u32;

/// Score of a candidate pairing (higher = more desirable)
pub type Weight = u64;

/// Default id for the synthetic bye participant
pub const DEFAULT_BYE_ID: &str = "BYE";

/// One entrant in the round being paired
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Participant {
    pub id: ParticipantId,
    pub points: Points,
    /// Ids previously faced, oldest first. May repeat.
    #[serde(default)]
    pub opponents: Vec<ParticipantId>,
}

impl Participant {
    pub fn new(
        id: impl Into<ParticipantId>,
        points: Points,
        opponents: impl IntoIterator<Item = impl Into<ParticipantId>>,
    ) -> Self {
        Self {
            id: id.into(),
            points,
            opponents: opponents.into_iter().map(Into::into).collect(),
        }
    }

    /// Synthetic bye slot: zero points and no history
    pub fn bye(id: impl Into<ParticipantId>) -> Self {
        Self {
            id: id.into(),
            points: 0,
            opponents: Vec::new(),
        }
    }

    /// Number of times `opponent` appears in this participant's history
    pub fn times_faced(&self, opponent: &str) -> usize {
        self.opponents.iter().filter(|id| *id == opponent).count()
    }
}

impl std::fmt::Display for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.id, self.points)
    }
}

/// Candidate pairing between positions `i < j` of the participant list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub i: usize,
    pub j: usize,
    pub weight: Weight,
}

impl Edge {
    pub fn new(i: usize, j: usize, weight: Weight) -> Self {
        Self { i, j, weight }
    }
}

impl From<(usize, usize, Weight)> for Edge {
    fn from((i, j, weight): (usize, usize, Weight)) -> Self {
        Self { i, j, weight }
    }
}

/// Validated opponent assignment for one round
///
/// Position `i` holds the position of `i`'s opponent. Always an involution
/// without fixed points; only the orchestrator constructs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Pairing {
    mates: Vec<usize>,
}

impl Pairing {
    pub(crate) fn from_mates(mates: Vec<usize>) -> Self {
        Self { mates }
    }

    pub fn opponent_of(&self, position: usize) -> Option<usize> {
        self.mates.get(position).copied()
    }

    pub fn len(&self) -> usize {
        self.mates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mates.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.mates
    }

    pub fn into_inner(self) -> Vec<usize> {
        self.mates
    }

    /// Each unordered pair once as `(i, j)` with `i < j`, ascending by `i`
    pub fn pairs(&self) -> Vec<(usize, usize)> {
        self.mates
            .iter()
            .enumerate()
            .filter(|(i, mate)| i < *mate)
            .map(|(i, mate)| (i, *mate))
            .collect()
    }

    /// Sum of the weights of the selected edges
    pub fn total_weight(&self, edges: &[Edge]) -> Weight {
        edges
            .iter()
            .filter(|edge| self.opponent_of(edge.i) == Some(edge.j))
            .fold(0, |total: Weight, edge| total.saturating_add(edge.weight))
    }
}

impl std::ops::Index<usize> for Pairing {
    type Output = usize;

    fn index(&self, position: usize) -> &usize {
        &self.mates[position]
    }
}
