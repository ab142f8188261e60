//! Candidate verification: one trial per candidate blank.
//!
//! A trial flips a private copy of the candidate's feature record to
//! constant, recolors (incrementally or by full refinement), and checks
//! k-compliance. A candidate whose flip breaks compliance is a necessary
//! blank.
//!
//! Trials are isolated by construction: the baseline coloring and counts
//! are cloned per trial (never per worker), and the shared feature table
//! is read-only; the flip happens on the clone. Parallel dispatch splits
//! the ranked candidates into contiguous batches, one per worker, whose
//! union preserves the sequential order.

use std::collections::BTreeSet;

use rayon::prelude::*;

use veil_kernel::deadline::Deadline;
use veil_kernel::digest::fast_hash64;
use veil_kernel::feature::{FeatureRecordV1, NodeTypeV1};
use veil_kernel::graph::CompactGraphV1;

use crate::coloring::{ColorCounts, ColoringV1};
use crate::compliance::is_k_compliant;
use crate::distance::UNREACHABLE;
use crate::incremental::recolor_from;
use crate::refine::refine_to_fixed_point;

/// Which engine a trial runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrialModeV1 {
    /// Clone the converged coloring, patch the candidate's color, and run
    /// full refinement to a fixed point.
    ///
    /// The patched start is a heuristic: it is not equivalent to running
    /// WL from a fresh initial coloring of the mutated features, but both
    /// converge to the same verdict for compliance purposes. This is the
    /// chosen definition.
    Full,
    /// Propagate the candidate's rehash with the incremental engine.
    /// With `early_stop`, propagation is capped at the candidate's
    /// subject distance when that distance is finite.
    Incremental { early_stop: bool },
}

/// Shared, read-only context for all trials of one run.
#[derive(Debug, Clone, Copy)]
pub struct TrialContextV1<'a> {
    pub graph: &'a CompactGraphV1,
    pub features: &'a [FeatureRecordV1],
    /// Converged baseline coloring.
    pub baseline: &'a ColoringV1,
    /// Frequencies of `baseline`.
    pub counts: &'a ColorCounts,
    pub subjects: &'a BTreeSet<u32>,
    pub k: u32,
    /// Subject distances ([`UNREACHABLE`] for disconnected nodes).
    pub distances: &'a [u32],
    pub deadline: &'a Deadline,
}

/// Run one trial. True iff flipping `candidate` to constant breaks
/// k-compliance for at least one subject.
#[must_use]
pub fn candidate_is_necessary(ctx: &TrialContextV1<'_>, candidate: u32, mode: TrialModeV1) -> bool {
    let flipped = ctx.features[candidate as usize].with_node_type(NodeTypeV1::Constant);
    let flipped_color = fast_hash64(flipped.buffer());

    let (coloring, counts) = match mode {
        TrialModeV1::Incremental { early_stop } => {
            let limit = if early_stop {
                let d = ctx.distances[candidate as usize];
                (d != UNREACHABLE).then_some(d)
            } else {
                None
            };
            recolor_from(
                ctx.graph,
                candidate,
                flipped_color,
                ctx.baseline.clone(),
                ctx.counts.clone(),
                limit,
                ctx.deadline,
            )
        }
        TrialModeV1::Full => {
            // Patch only the candidate's color; the engine rebuilds counts
            // from the patched seed at entry.
            let mut trial = ctx.baseline.clone();
            trial[candidate as usize] = flipped_color;
            let outcome = refine_to_fixed_point(ctx.graph, trial, ctx.deadline);
            (outcome.coloring, outcome.counts)
        }
    };

    !is_k_compliant(&coloring, &counts, ctx.subjects, ctx.k)
}

/// One candidate's trial verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateVerdictV1 {
    pub candidate: u32,
    /// True iff the trial broke k-compliance.
    pub necessary: bool,
}

/// Result of verifying a ranked candidate list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationOutcomeV1 {
    /// Per-candidate verdicts for every trial that ran, in ranked order.
    /// Parallel batches are contiguous slices of the ranked list and are
    /// merged in batch order, so the order matches sequential mode.
    pub verdicts: Vec<CandidateVerdictV1>,
    /// True when the deadline cut the candidate list short.
    pub timed_out: bool,
}

impl VerificationOutcomeV1 {
    /// The candidates whose trial failed compliance.
    #[must_use]
    pub fn necessary_candidates(&self) -> BTreeSet<u32> {
        self.verdicts
            .iter()
            .filter(|v| v.necessary)
            .map(|v| v.candidate)
            .collect()
    }

    /// Trials actually run before the deadline.
    #[must_use]
    pub fn verified(&self) -> u64 {
        self.verdicts.len() as u64
    }
}

/// Verify candidates in exact ranked order on the caller's thread.
#[must_use]
pub fn verify_sequential(
    ctx: &TrialContextV1<'_>,
    ranked: &[u32],
    mode: TrialModeV1,
) -> VerificationOutcomeV1 {
    verify_slice(ctx, ranked, mode)
}

/// Verify candidates across the worker pool.
///
/// The ranked list is split into contiguous batches of size
/// `ceil(len / workers)`; batches run concurrently, trials within a batch
/// run in ranked order. Each trial is independent, so the union equals
/// the sequential result.
#[must_use]
pub fn verify_parallel(
    ctx: &TrialContextV1<'_>,
    ranked: &[u32],
    mode: TrialModeV1,
) -> VerificationOutcomeV1 {
    if ranked.is_empty() {
        return VerificationOutcomeV1 {
            verdicts: Vec::new(),
            timed_out: false,
        };
    }
    let workers = rayon::current_num_threads().max(1);
    let batch_size = ranked.len().div_ceil(workers).max(1);
    let batches: Vec<VerificationOutcomeV1> = ranked
        .par_chunks(batch_size)
        .map(|batch| verify_slice(ctx, batch, mode))
        .collect();

    let mut merged = VerificationOutcomeV1 {
        verdicts: Vec::with_capacity(ranked.len()),
        timed_out: false,
    };
    for b in batches {
        merged.verdicts.extend(b.verdicts);
        merged.timed_out |= b.timed_out;
    }
    merged
}

fn verify_slice(
    ctx: &TrialContextV1<'_>,
    candidates: &[u32],
    mode: TrialModeV1,
) -> VerificationOutcomeV1 {
    let mut verdicts = Vec::with_capacity(candidates.len());
    for b in candidates {
        if ctx.deadline.expired() {
            return VerificationOutcomeV1 {
                verdicts,
                timed_out: true,
            };
        }
        verdicts.push(CandidateVerdictV1 {
            candidate: *b,
            necessary: candidate_is_necessary(ctx, *b, mode),
        });
    }
    VerificationOutcomeV1 {
        verdicts,
        timed_out: false,
    }
}
