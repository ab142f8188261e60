//! The preprocessing driver: encode → initial color → refine → seed →
//! rank → verify.
//!
//! Every termination is a value. Timeouts surface as partial results with
//! `timed_out` set in the run report; infeasibility and the empty-subject
//! case are distinguished outcomes; only malformed inputs are errors.

use std::collections::BTreeSet;

use veil_kernel::deadline::Deadline;
use veil_kernel::feature::RawNodeV1;
use veil_kernel::graph::CompactGraphV1;
use veil_kernel::lexicon::LexiconV1;

use crate::coloring::initial_coloring;
use crate::compliance::{counts_and_members, is_k_compliant};
use crate::distance::subject_distances;
use crate::error::PreprocessError;
use crate::options::PreprocessOptionsV1;
use crate::refine::refine_to_fixed_point;
use crate::verify::{verify_parallel, verify_sequential, TrialContextV1, TrialModeV1};

/// One candidate's trial verdict, translated to its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerdictRecordV1 {
    pub identifier: String,
    /// True iff the trial broke k-compliance.
    pub necessary: bool,
}

/// Counters and the verdict trail for one run.
///
/// This is the `(result, reason_if_partial)` surface: `timed_out` and
/// `refinement_converged` say how much of the pipeline actually ran.
/// An `Infeasible` verdict is only authoritative when
/// `refinement_converged` is true. The mode that produced the run is not
/// repeated here; callers hold the options they passed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReportV1 {
    /// Completed refinement rounds on the baseline coloring.
    pub refinement_rounds: u64,
    /// False when the baseline refinement hit the deadline.
    pub refinement_converged: bool,
    /// Candidates that survived seeding and entered the ranked list.
    pub candidates_total: u64,
    /// Trials actually run before the deadline.
    pub candidates_verified: u64,
    /// Necessary blanks seeded before verification (subjects plus
    /// saturated classes).
    pub necessary_seeded: u64,
    /// Final size of the necessary set.
    pub necessary_total: u64,
    pub singleton_count: u64,
    /// Per-candidate trial verdicts in ranked order; empty when no
    /// trial ran (infeasible runs, expired budgets).
    pub verdicts: Vec<VerdictRecordV1>,
    /// True when any stage returned a partial result on deadline expiry.
    pub timed_out: bool,
}

/// The anonymization answer, translated back to node identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnonymizationV1 {
    /// Nodes whose identity must be hidden to preserve k-anonymity.
    pub necessary: BTreeSet<String>,
    /// Nodes alone in their color class; irrelevant to protect.
    pub singletons: BTreeSet<String>,
    pub report: RunReportV1,
}

/// How a preprocessing run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreprocessOutcomeV1 {
    /// The subject set was empty; there is nothing to anonymize.
    NothingToDo,
    /// The initial fixed point already violates k-compliance for some
    /// subject: no k-WL-compliant anonymization exists.
    Infeasible(RunReportV1),
    /// The computed necessary/singleton sets.
    Complete(AnonymizationV1),
}

/// Run the WL preprocessing pipeline.
///
/// # Errors
///
/// Returns [`PreprocessError`] only for boundary failures: invalid option
/// combinations, malformed raw features, or tables that disagree with the
/// graph. Everything else is a [`PreprocessOutcomeV1`].
pub fn preprocess(
    graph: &CompactGraphV1,
    raw: &[RawNodeV1],
    subjects: &BTreeSet<u32>,
    options: &PreprocessOptionsV1,
) -> Result<PreprocessOutcomeV1, PreprocessError> {
    options.validate()?;

    let n = graph.node_count();
    if raw.len() != n as usize {
        return Err(PreprocessError::NodeCountMismatch {
            graph: n,
            features: raw.len(),
        });
    }
    if let Some(s) = subjects.iter().find(|s| **s >= n) {
        return Err(PreprocessError::SubjectOutOfRange {
            subject: *s,
            node_count: n,
        });
    }
    if subjects.is_empty() {
        return Ok(PreprocessOutcomeV1::NothingToDo);
    }

    // The deadline starts after input validation: the budget pays for the
    // pipeline, not for the boundary checks.
    let deadline = Deadline::with_budget_seconds(options.max_seconds);

    let lexicon = LexiconV1::build(raw)?;
    let features = lexicon.materialize(raw)?;

    let refined = refine_to_fixed_point(graph, initial_coloring(&features), &deadline);
    let (counts, members) = counts_and_members(&refined.coloring);

    let mut report = RunReportV1 {
        refinement_rounds: refined.rounds,
        refinement_converged: refined.converged,
        candidates_total: 0,
        candidates_verified: 0,
        necessary_seeded: 0,
        necessary_total: 0,
        singleton_count: 0,
        verdicts: Vec::new(),
        timed_out: !refined.converged,
    };

    if !is_k_compliant(&refined.coloring, &counts, subjects, options.k) {
        return Ok(PreprocessOutcomeV1::Infeasible(report));
    }

    // Seed: all subjects, plus every member of a subject class that sits
    // exactly at k; losing any member would sink the class below k.
    let mut necessary: BTreeSet<u32> = subjects.clone();
    for s in subjects {
        let color = refined.coloring[*s as usize];
        if counts.get(&color) == Some(&(options.k as usize)) {
            if let Some(class) = members.get(&color) {
                necessary.extend(class.iter().copied());
            }
        }
    }
    let mut singletons_raw: BTreeSet<u32> = BTreeSet::new();
    for (idx, color) in refined.coloring.iter().enumerate() {
        if counts.get(color) == Some(&1) {
            #[allow(clippy::cast_possible_truncation)]
            singletons_raw.insert(idx as u32);
        }
    }
    report.necessary_seeded = necessary.len() as u64;

    // Rank the remaining candidates nearest-subject first: verification
    // yields the most impactful verdicts first if interrupted.
    let distances = subject_distances(graph, subjects, &deadline);
    let mut ranked: Vec<u32> = (0..n)
        .filter(|v| !necessary.contains(v) && !singletons_raw.contains(v))
        .collect();
    ranked.sort_by_key(|b| (distances[*b as usize], *b));
    report.candidates_total = ranked.len() as u64;

    let ctx = TrialContextV1 {
        graph,
        features: &features,
        baseline: &refined.coloring,
        counts: &counts,
        subjects,
        k: options.k,
        distances: &distances,
        deadline: &deadline,
    };
    let mode = if options.incremental {
        TrialModeV1::Incremental {
            early_stop: options.early_stop,
        }
    } else {
        TrialModeV1::Full
    };
    let verification = if options.parallel {
        verify_parallel(&ctx, &ranked, mode)
    } else {
        verify_sequential(&ctx, &ranked, mode)
    };

    necessary.extend(verification.necessary_candidates());
    // Singletons are irrelevant to protect; a node promoted to necessary
    // is never reported as both.
    let singletons: BTreeSet<u32> = singletons_raw
        .difference(&necessary)
        .copied()
        .collect();

    report.candidates_verified = verification.verified();
    report.verdicts = verification
        .verdicts
        .iter()
        .map(|v| VerdictRecordV1 {
            identifier: graph.identifier(v.candidate).to_string(),
            necessary: v.necessary,
        })
        .collect();
    report.timed_out |= verification.timed_out;
    report.necessary_total = necessary.len() as u64;
    report.singleton_count = singletons.len() as u64;

    let to_identifiers = |set: &BTreeSet<u32>| -> BTreeSet<String> {
        set.iter().map(|v| graph.identifier(*v).to_string()).collect()
    };
    Ok(PreprocessOutcomeV1::Complete(AnonymizationV1 {
        necessary: to_identifiers(&necessary),
        singletons: to_identifiers(&singletons),
        report,
    }))
}
