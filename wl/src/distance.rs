//! Multi-source BFS distances from the subject set.
//!
//! Edges are traversed regardless of direction: the compact adjacency
//! already carries both an edge and its reverse image, so following every
//! triple gives undirected distances. Unreachable nodes keep the infinite
//! sentinel; on deadline expiry the partially computed vector is returned
//! as-is.

use std::collections::{BTreeSet, VecDeque};

use veil_kernel::deadline::Deadline;
use veil_kernel::graph::CompactGraphV1;

/// Infinite distance sentinel. Real distances are edge counts `< n`.
pub const UNREACHABLE: u32 = u32::MAX;

/// Shortest-path distance (in edges) from the source set to every node.
#[must_use]
pub fn subject_distances(
    graph: &CompactGraphV1,
    sources: &BTreeSet<u32>,
    deadline: &Deadline,
) -> Vec<u32> {
    let n = graph.node_count() as usize;
    let mut dist = vec![UNREACHABLE; n];
    let mut queue: VecDeque<u32> = VecDeque::new();
    for s in sources {
        dist[*s as usize] = 0;
        queue.push_back(*s);
    }
    while let Some(v) = queue.pop_front() {
        if deadline.expired() {
            return dist;
        }
        let next = dist[v as usize] + 1;
        for edge in graph.neighbors(v) {
            if dist[edge.neighbor as usize] == UNREACHABLE {
                dist[edge.neighbor as usize] = next;
                queue.push_back(edge.neighbor);
            }
        }
    }
    dist
}
