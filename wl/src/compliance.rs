//! Compliance utilities: class sizes, memberships, and the canonical
//! partition used for fixed-point detection.

use std::collections::{BTreeSet, HashMap};

use crate::coloring::ColorCounts;

/// Color → member node indices, ascending. Materialized post-refinement
/// only; the refinement rounds themselves need counts, not members.
pub type ColorMembers = HashMap<u64, Vec<u32>>;

/// Build frequency and membership maps in one pass.
#[must_use]
pub fn counts_and_members(coloring: &[u64]) -> (ColorCounts, ColorMembers) {
    let mut counts = ColorCounts::new();
    let mut members = ColorMembers::new();
    for (idx, color) in coloring.iter().enumerate() {
        *counts.entry(*color).or_insert(0) += 1;
        #[allow(clippy::cast_possible_truncation)]
        members.entry(*color).or_default().push(idx as u32);
    }
    (counts, members)
}

/// True iff every subject's color class has at least `k` members.
#[must_use]
pub fn is_k_compliant(
    coloring: &[u64],
    counts: &ColorCounts,
    subjects: &BTreeSet<u32>,
    k: u32,
) -> bool {
    subjects.iter().all(|s| {
        counts
            .get(&coloring[*s as usize])
            .is_some_and(|n| *n >= k as usize)
    })
}

/// The canonical representation of the induced partition.
///
/// Classes hold ascending node indices and are ordered by their smallest
/// member. A total function of the partition, independent of the color
/// values, so fixed-point detection survives hash collisions between
/// refinement rounds.
#[must_use]
pub fn partition_of(coloring: &[u64]) -> Vec<Vec<u32>> {
    let mut classes: HashMap<u64, Vec<u32>> = HashMap::new();
    for (idx, color) in coloring.iter().enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        classes.entry(*color).or_default().push(idx as u32);
    }
    // Members are pushed in index order, so each class is already sorted.
    let mut partition: Vec<Vec<u32>> = classes.into_values().collect();
    partition.sort_unstable_by_key(|class| class[0]);
    partition
}
