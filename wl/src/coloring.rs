//! Colorings and color frequency maps.

use std::collections::HashMap;

use veil_kernel::digest::fast_hash64;
use veil_kernel::feature::FeatureRecordV1;

/// One 64-bit color per node, indexed by node index.
pub type ColoringV1 = Vec<u64>;

/// Color → frequency. Never iterated where order matters.
pub type ColorCounts = HashMap<u64, usize>;

/// Initial coloring: each node's color is the digest of its canonical
/// feature buffer.
#[must_use]
pub fn initial_coloring(features: &[FeatureRecordV1]) -> ColoringV1 {
    features.iter().map(|x| fast_hash64(x.buffer())).collect()
}

/// Rebuild a frequency map from a coloring.
#[must_use]
pub fn counts_of(coloring: &[u64]) -> ColorCounts {
    let mut counts = ColorCounts::with_capacity(coloring.len());
    for c in coloring {
        *counts.entry(*c).or_insert(0) += 1;
    }
    counts
}

/// Move one node from `old` to `new` in a frequency map.
///
/// Emptied entries are removed so counts never hold stale zero rows.
pub fn reassign(counts: &mut ColorCounts, old: u64, new: u64) {
    if old == new {
        return;
    }
    if let Some(n) = counts.get_mut(&old) {
        *n -= 1;
        if *n == 0 {
            counts.remove(&old);
        }
    }
    *counts.entry(new).or_insert(0) += 1;
}
