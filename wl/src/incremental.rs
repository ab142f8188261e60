//! Incremental recoloring: BFS-bounded propagation of one changed node.
//!
//! After a single node's feature record has been mutated, propagate the
//! color change outward instead of re-running full refinement. Depth rides
//! in the queue itself, so no per-candidate distance array is
//! materialized. Each node is processed at most once: nodes are marked
//! visited when enqueued.
//!
//! This is a lower bound on the work the full engine would do. With no
//! distance limit and a single localized change it reaches the same fixed
//! point as a full re-run on BFS-connected graphs; under a limit the
//! caller accepts the approximation.

use std::collections::VecDeque;

use veil_kernel::deadline::Deadline;
use veil_kernel::graph::CompactGraphV1;

use crate::coloring::{reassign, ColorCounts, ColoringV1};
use crate::refine::refine_node;

/// Propagate a single node's new seed color through the graph.
///
/// `changed_color` is the rehash of the changed node's feature buffer;
/// the caller owns the feature flip that produced it. Counts are kept
/// consistent with the coloring throughout, so a compliance check on the
/// returned pair is sound even after a deadline cut.
#[must_use]
pub fn recolor_from(
    graph: &CompactGraphV1,
    changed: u32,
    changed_color: u64,
    mut coloring: ColoringV1,
    mut counts: ColorCounts,
    distance_limit: Option<u32>,
    deadline: &Deadline,
) -> (ColoringV1, ColorCounts) {
    let old = coloring[changed as usize];
    if changed_color != old {
        reassign(&mut counts, old, changed_color);
        coloring[changed as usize] = changed_color;
    }

    let mut visited = vec![false; graph.node_count() as usize];
    let mut queue: VecDeque<(u32, u32)> = VecDeque::new();
    visited[changed as usize] = true;
    queue.push_back((changed, 0));

    while let Some((v, depth)) = queue.pop_front() {
        if deadline.expired() {
            break;
        }
        if distance_limit.is_some_and(|limit| depth > limit) {
            continue;
        }
        let refined = refine_node(v, graph, &coloring);
        if refined != coloring[v as usize] {
            reassign(&mut counts, coloring[v as usize], refined);
            coloring[v as usize] = refined;
            // Neighbors join the frontier only while strictly inside the cap.
            let may_spread = distance_limit.is_none_or(|limit| depth < limit);
            if may_spread {
                for edge in graph.neighbors(v) {
                    if !visited[edge.neighbor as usize] {
                        visited[edge.neighbor as usize] = true;
                        queue.push_back((edge.neighbor, depth + 1));
                    }
                }
            }
        }
    }

    (coloring, counts)
}
