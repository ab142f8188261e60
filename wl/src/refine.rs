//! The WL refinement engine.
//!
//! Each round rehashes every node from its own color plus the sorted
//! multiset of `(direction, relation, neighbor_color)` triples. The sort
//! is the WL invariant: it makes the digest a function of the multiset,
//! not of neighbor iteration order. Convergence is decided on partition
//! equality, never on color equality, so the fixed point is independent
//! of hash collisions between rounds.

use veil_kernel::deadline::Deadline;
use veil_kernel::digest::hash_u64_words;
use veil_kernel::graph::CompactGraphV1;

use crate::coloring::{counts_of, ColorCounts, ColoringV1};
use crate::compliance::partition_of;

/// How many nodes to refine between deadline samples inside a round.
const DEADLINE_STRIDE: usize = 1024;

/// One node's refinement step.
///
/// No timestamp, address, or iteration-order-dependent value enters the
/// digest. An empty adjacency degenerates to hashing the node's own color
/// word, so isolated nodes do not collapse to a constant.
#[must_use]
pub fn refine_node(v: u32, graph: &CompactGraphV1, coloring: &[u64]) -> u64 {
    let triples = graph.neighbors(v);
    let own = coloring[v as usize];
    let mut sorted: Vec<(u64, u64, u64)> = triples
        .iter()
        .map(|e| {
            (
                e.dir.to_code(),
                u64::from(e.relation),
                coloring[e.neighbor as usize],
            )
        })
        .collect();
    sorted.sort_unstable();
    let mut words = Vec::with_capacity(1 + 3 * sorted.len());
    words.push(own);
    for (dir, relation, color) in sorted {
        words.push(dir);
        words.push(relation);
        words.push(color);
    }
    hash_u64_words(&words)
}

/// Apply one refinement round to every node.
///
/// Returns `None` when the deadline expires mid-round; the caller keeps
/// its current coloring unchanged.
#[must_use]
pub fn refine_round(
    graph: &CompactGraphV1,
    coloring: &[u64],
    deadline: &Deadline,
) -> Option<ColoringV1> {
    let n = graph.node_count() as usize;
    let mut next = Vec::with_capacity(n);
    for v in 0..n {
        if v % DEADLINE_STRIDE == 0 && deadline.expired() {
            return None;
        }
        #[allow(clippy::cast_possible_truncation)]
        next.push(refine_node(v as u32, graph, coloring));
    }
    Some(next)
}

/// Result of running refinement to a fixed point (or to the deadline).
#[derive(Debug, Clone)]
pub struct RefineOutcomeV1 {
    /// The final coloring: the first round whose partition equals its
    /// predecessor's, or the last completed round on timeout.
    pub coloring: ColoringV1,
    /// Frequencies of `coloring`.
    pub counts: ColorCounts,
    /// Completed rounds.
    pub rounds: u64,
    /// False when the deadline expired before the partition stabilized.
    pub converged: bool,
}

/// Refine a seed coloring until the induced partition stops changing.
///
/// Counts are rebuilt from the seed at entry, so callers only need a
/// consistent coloring. One refinement round is applied past
/// stabilization: the returned coloring is the round whose partition
/// first equals its predecessor's.
#[must_use]
pub fn refine_to_fixed_point(
    graph: &CompactGraphV1,
    seed: ColoringV1,
    deadline: &Deadline,
) -> RefineOutcomeV1 {
    let mut coloring = seed;
    let mut counts = counts_of(&coloring);
    let mut current_partition = partition_of(&coloring);
    let mut rounds: u64 = 0;
    loop {
        if deadline.expired() {
            return RefineOutcomeV1 {
                coloring,
                counts,
                rounds,
                converged: false,
            };
        }
        let Some(next) = refine_round(graph, &coloring, deadline) else {
            return RefineOutcomeV1 {
                coloring,
                counts,
                rounds,
                converged: false,
            };
        };
        let next_partition = partition_of(&next);
        let converged = next_partition == current_partition;
        counts = counts_of(&next);
        coloring = next;
        current_partition = next_partition;
        rounds += 1;
        if converged {
            return RefineOutcomeV1 {
                coloring,
                counts,
                rounds,
                converged: true,
            };
        }
    }
}
