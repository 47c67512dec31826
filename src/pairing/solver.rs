//! Maximum-weight matching backends
//!
//! The pairing orchestrator only needs "node count + weighted edges in,
//! partner array out". This module defines that capability as a trait and
//! provides the backends:
//! - `MwMatchingSolver` wraps the `mwmatching` crate (Edmonds' blossom
//!   algorithm) and is the default
//! - `ExhaustiveSolver` is an exact subset dynamic program for small graphs,
//!   useful as a reference oracle

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PairingError, Result};
use crate::types::{Edge, Weight};

/// Partner value for a node the solver could not cover
pub const UNMATCHED: usize = usize::MAX;

/// Trait for maximum-weight matching algorithms
#[cfg_attr(test, mockall::automock)]
pub trait MatchingSolver: Send + Sync {
    /// Find a maximum-weight matching
    ///
    /// # Arguments
    /// * `node_count` - Number of nodes; every edge endpoint is below this
    /// * `edges` - Undirected weighted edges
    ///
    /// # Returns
    /// A vector of length `node_count` where entry `k` is the partner of node
    /// `k`, or [`UNMATCHED`]
    fn solve(&self, node_count: usize, edges: &[Edge]) -> Result<Vec<usize>>;

    /// Backend name for logging
    fn name(&self) -> &'static str;
}

/// Available matching backends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolverKind {
    #[default]
    MwMatching,
    Exhaustive,
}

impl SolverKind {
    /// Instantiate the backend
    pub fn build(self) -> Box<dyn MatchingSolver> {
        match self {
            SolverKind::MwMatching => Box::new(MwMatchingSolver::new()),
            SolverKind::Exhaustive => Box::new(ExhaustiveSolver::new()),
        }
    }
}

impl std::fmt::Display for SolverKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverKind::MwMatching => write!(f, "mwmatching"),
            SolverKind::Exhaustive => write!(f, "exhaustive"),
        }
    }
}

impl FromStr for SolverKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mwmatching" => Ok(SolverKind::MwMatching),
            "exhaustive" => Ok(SolverKind::Exhaustive),
            other => Err(format!(
                "Unknown solver '{}' (expected mwmatching or exhaustive)",
                other
            )),
        }
    }
}

/// Blossom-algorithm backend from the `mwmatching` crate
///
/// The blossom algorithm seeds every dual variable with the largest edge weight
/// and evaluates `dual[i] + dual[j] - 2 * weight` in the crate's `i32`, so
/// weights are capped at a quarter of `i32::MAX`.
#[derive(Debug, Clone, Default)]
pub struct MwMatchingSolver;

impl MwMatchingSolver {
    /// Largest edge weight handed to the blossom algorithm
    pub const MAX_WEIGHT: Weight = (mwmatching::Weight::MAX / 4) as Weight;

    pub fn new() -> Self {
        Self
    }
}

impl MatchingSolver for MwMatchingSolver {
    fn solve(&self, node_count: usize, edges: &[Edge]) -> Result<Vec<usize>> {
        if edges.is_empty() {
            return Ok(vec![UNMATCHED; node_count]);
        }

        let converted = edges
            .iter()
            .map(|edge| {
                if edge.weight > Self::MAX_WEIGHT {
                    return Err(PairingError::WeightOverflow {
                        weight: edge.weight,
                    });
                }
                let weight = mwmatching::Weight::try_from(edge.weight).map_err(|_| {
                    PairingError::WeightOverflow {
                        weight: edge.weight,
                    }
                })?;
                Ok((edge.i, edge.j, weight))
            })
            .collect::<std::result::Result<mwmatching::Edges, PairingError>>()?;

        debug!(
            "Solving matching over {} nodes and {} edges with mwmatching",
            node_count,
            converted.len()
        );
        let mates = mwmatching::Matching::new(converted).solve();

        // The crate sizes its result by the largest endpoint and uses its own
        // sentinel for uncovered nodes; normalize both.
        let mut result: Vec<usize> = mates
            .into_iter()
            .take(node_count)
            .map(|mate| if mate < node_count { mate } else { UNMATCHED })
            .collect();
        result.resize(node_count, UNMATCHED);
        Ok(result)
    }

    fn name(&self) -> &'static str {
        "mwmatching"
    }
}

/// Exact matching by dynamic programming over node subsets
///
/// Runs in `O(2^n * n)` time and memory, so it refuses graphs larger than
/// [`ExhaustiveSolver::MAX_NODES`]. The lowest free node is left unmatched only
/// when that is strictly heavier than every pairing it could join; otherwise it
/// takes its lowest-numbered partner among equally heavy choices. On complete
/// graphs with positive weights, such as the ones the graph builder produces,
/// every node is therefore paired.
#[derive(Debug, Clone, Default)]
pub struct ExhaustiveSolver;

impl ExhaustiveSolver {
    pub const MAX_NODES: usize = 20;

    pub fn new() -> Self {
        Self
    }
}

impl MatchingSolver for ExhaustiveSolver {
    fn solve(&self, node_count: usize, edges: &[Edge]) -> Result<Vec<usize>> {
        if node_count > Self::MAX_NODES {
            return Err(PairingError::SolverFailed {
                reason: format!(
                    "exhaustive solver supports at most {} nodes, got {}",
                    Self::MAX_NODES,
                    node_count
                ),
            }
            .into());
        }

        let mut weights: Vec<Vec<Option<Weight>>> = vec![vec![None; node_count]; node_count];
        for edge in edges {
            if edge.i >= node_count || edge.j >= node_count || edge.i == edge.j {
                return Err(PairingError::SolverFailed {
                    reason: format!("invalid edge ({}, {})", edge.i, edge.j),
                }
                .into());
            }
            let slot = weights[edge.i][edge.j].max(Some(edge.weight));
            weights[edge.i][edge.j] = slot;
            weights[edge.j][edge.i] = slot;
        }

        debug!(
            "Solving matching over {} nodes and {} edges exhaustively",
            node_count,
            edges.len()
        );

        let full = (1usize << node_count) - 1;
        // best[mask]: heaviest matching within `mask`; partner[mask]: choice for
        // the lowest node of `mask`
        let mut best: Vec<Weight> = vec![0; full + 1];
        let mut partner: Vec<usize> = vec![UNMATCHED; full + 1];

        for mask in 1..=full {
            let low = mask.trailing_zeros() as usize;
            let rest = mask & !(1 << low);

            let mut choice: Option<(Weight, usize)> = None;
            for j in (low + 1)..node_count {
                if rest & (1 << j) == 0 {
                    continue;
                }
                if let Some(w) = weights[low][j] {
                    let total = w.saturating_add(best[rest & !(1 << j)]);
                    if choice.map_or(true, |(current, _)| total > current) {
                        choice = Some((total, j));
                    }
                }
            }
            if choice.map_or(true, |(current, _)| best[rest] > current) {
                choice = Some((best[rest], UNMATCHED));
            }

            if let Some((total, j)) = choice {
                best[mask] = total;
                partner[mask] = j;
            }
        }

        let mut result = vec![UNMATCHED; node_count];
        let mut mask = full;
        while mask != 0 {
            let low = mask.trailing_zeros() as usize;
            let mate = partner[mask];
            mask &= !(1 << low);
            if mate != UNMATCHED {
                result[low] = mate;
                result[mate] = low;
                mask &= !(1 << mate);
            }
        }
        Ok(result)
    }

    fn name(&self) -> &'static str {
        "exhaustive"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pairing::graph::build_edges;
    use crate::pairing::test_support::standings;

    fn square() -> Vec<Edge> {
        vec![
            Edge::new(0, 1, 1),
            Edge::new(0, 2, 10),
            Edge::new(0, 3, 1),
            Edge::new(1, 2, 1),
            Edge::new(1, 3, 10),
            Edge::new(2, 3, 1),
        ]
    }

    fn total(mates: &[usize], edges: &[Edge]) -> Weight {
        edges
            .iter()
            .filter(|edge| mates[edge.i] == edge.j)
            .map(|edge| edge.weight)
            .sum()
    }

    #[test]
    fn test_mwmatching_picks_heaviest_pairs() {
        let mates = MwMatchingSolver::new().solve(4, &square()).unwrap();
        assert_eq!(mates, vec![2, 3, 0, 1]);
    }

    #[test]
    fn test_exhaustive_picks_heaviest_pairs() {
        let mates = ExhaustiveSolver::new().solve(4, &square()).unwrap();
        assert_eq!(mates, vec![2, 3, 0, 1]);
    }

    #[test]
    fn test_solvers_agree_on_fixture_weight() {
        let edges = build_edges(&standings());

        let blossom = MwMatchingSolver::new().solve(8, &edges).unwrap();
        let exact = ExhaustiveSolver::new().solve(8, &edges).unwrap();

        assert!(!blossom.contains(&UNMATCHED));
        assert!(!exact.contains(&UNMATCHED));
        assert_eq!(total(&blossom, &edges), 34);
        assert_eq!(total(&exact, &edges), 34);
    }

    #[test]
    fn test_isolated_node_is_unmatched() {
        let edges = vec![Edge::new(0, 1, 5)];

        let blossom = MwMatchingSolver::new().solve(3, &edges).unwrap();
        assert_eq!(blossom, vec![1, 0, UNMATCHED]);

        let exact = ExhaustiveSolver::new().solve(3, &edges).unwrap();
        assert_eq!(exact, vec![1, 0, UNMATCHED]);
    }

    #[test]
    fn test_no_edges() {
        assert_eq!(MwMatchingSolver::new().solve(0, &[]).unwrap(), Vec::<usize>::new());
        assert_eq!(
            MwMatchingSolver::new().solve(2, &[]).unwrap(),
            vec![UNMATCHED, UNMATCHED]
        );
        assert_eq!(
            ExhaustiveSolver::new().solve(2, &[]).unwrap(),
            vec![UNMATCHED, UNMATCHED]
        );
    }

    #[test]
    fn test_weight_overflow_is_reported() {
        let edges = vec![Edge::new(0, 1, Weight::MAX)];
        let err = MwMatchingSolver::new().solve(2, &edges).unwrap_err();
        assert_eq!(
            err.downcast_ref::<PairingError>(),
            Some(&PairingError::WeightOverflow { weight: Weight::MAX })
        );
    }

    #[test]
    fn test_weight_beyond_blossom_headroom_is_reported() {
        let too_heavy = MwMatchingSolver::MAX_WEIGHT + 1;
        let err = MwMatchingSolver::new()
            .solve(2, &[Edge::new(0, 1, too_heavy)])
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<PairingError>(),
            Some(&PairingError::WeightOverflow { weight: too_heavy })
        );
    }

    #[test]
    fn test_heaviest_accepted_weight_is_solved() {
        let heaviest = MwMatchingSolver::MAX_WEIGHT;
        let edges = vec![
            Edge::new(0, 1, heaviest),
            Edge::new(0, 2, 1),
            Edge::new(1, 3, 1),
            Edge::new(2, 3, heaviest),
        ];
        let mates = MwMatchingSolver::new().solve(4, &edges).unwrap();
        assert_eq!(mates, vec![1, 0, 3, 2]);
    }

    #[test]
    fn test_exhaustive_prefers_unmatched_only_when_strictly_heavier() {
        // 0-1 is the only edge touching 0; leaving 0 free lets 1-2 score more.
        let edges = vec![Edge::new(0, 1, 1), Edge::new(1, 2, 5)];
        let mates = ExhaustiveSolver::new().solve(3, &edges).unwrap();
        assert_eq!(mates, vec![UNMATCHED, 2, 1]);

        let tied = vec![Edge::new(0, 1, 5), Edge::new(1, 2, 5)];
        let mates = ExhaustiveSolver::new().solve(3, &tied).unwrap();
        assert_eq!(mates, vec![1, 0, UNMATCHED]);
    }

    #[test]
    fn test_exhaustive_rejects_large_graphs() {
        let err = ExhaustiveSolver::new()
            .solve(ExhaustiveSolver::MAX_NODES + 2, &[])
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PairingError>(),
            Some(PairingError::SolverFailed { .. })
        ));
    }

    #[test]
    fn test_exhaustive_rejects_invalid_edges() {
        let err = ExhaustiveSolver::new()
            .solve(2, &[Edge::new(0, 0, 1)])
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PairingError>(),
            Some(PairingError::SolverFailed { .. })
        ));
    }

    #[test]
    fn test_solver_kind_parsing() {
        assert_eq!("mwmatching".parse::<SolverKind>(), Ok(SolverKind::MwMatching));
        assert_eq!("Exhaustive".parse::<SolverKind>(), Ok(SolverKind::Exhaustive));
        assert!("hungarian".parse::<SolverKind>().is_err());
        assert_eq!(SolverKind::default(), SolverKind::MwMatching);
        assert_eq!(SolverKind::Exhaustive.to_string(), "exhaustive");
    }

    #[test]
    fn test_solver_kind_builds_backend() {
        assert_eq!(SolverKind::MwMatching.build().name(), "mwmatching");
        assert_eq!(SolverKind::Exhaustive.build().name(), "exhaustive");
    }
}
