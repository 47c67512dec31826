//! Complete weighted graph over the participants of a round

use rayon::prelude::*;
use tracing::debug;

use crate::pairing::weight::weight;
use crate::types::{Edge, Participant, Points};

/// Highest points value in the field (0 for an empty field)
pub fn highest_points(participants: &[Participant]) -> Points {
    participants.iter().map(|p| p.points).max().unwrap_or(0)
}

/// Score every unordered pair of positions
///
/// Edges are emitted for `i < j`, ascending by `i` then `j`, so the solver sees
/// the same list for the same input order.
pub fn build_edges(participants: &[Participant]) -> Vec<Edge> {
    let highest = highest_points(participants);
    let n = participants.len();

    let mut edges = Vec::with_capacity(edge_count(n));
    for i in 0..n {
        for j in (i + 1)..n {
            edges.push(Edge::new(
                i,
                j,
                weight(highest, &participants[i], &participants[j]),
            ));
        }
    }

    debug!(
        "Built {} edges for {} participants (highest points {})",
        edges.len(),
        n,
        highest
    );
    edges
}

/// Same edge list as [`build_edges`], scored on the rayon thread pool
pub fn build_edges_parallel(participants: &[Participant]) -> Vec<Edge> {
    let highest = highest_points(participants);
    let n = participants.len();

    let edges: Vec<Edge> = (0..n)
        .into_par_iter()
        .flat_map_iter(|i| {
            ((i + 1)..n).map(move |j| {
                Edge::new(i, j, weight(highest, &participants[i], &participants[j]))
            })
        })
        .collect();

    debug!(
        "Built {} edges in parallel for {} participants (highest points {})",
        edges.len(),
        n,
        highest
    );
    edges
}

/// Number of edges in a complete graph on `n` nodes
pub fn edge_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}
