//! Shared helpers for the lock-test suite.
//!
//! Lock tests pin the behavior of the whole workspace: scenario outcomes
//! across every mode combination, the spec-level invariants, and the
//! binding byte formats.

#![forbid(unsafe_code)]

use std::collections::BTreeSet;

use veil_harness::builder::{build_graph, BuiltGraphV1};
use veil_harness::contract::GraphWorldV1;
use veil_wl::driver::{preprocess, AnonymizationV1, PreprocessOutcomeV1};
use veil_wl::options::PreprocessOptionsV1;

/// The six mode combinations every scenario must agree under:
/// `{sequential, parallel} × {full, incremental, incremental+early_stop}`.
#[must_use]
pub fn mode_matrix() -> Vec<PreprocessOptionsV1> {
    let mut modes = Vec::new();
    for parallel in [false, true] {
        for (incremental, early_stop) in [(false, false), (true, false), (true, true)] {
            modes.push(PreprocessOptionsV1 {
                k: 2,
                incremental,
                early_stop,
                parallel,
                max_seconds: 86400.0,
            });
        }
    }
    modes
}

/// Short label for assertion messages.
#[must_use]
pub fn mode_label(options: &PreprocessOptionsV1) -> String {
    format!(
        "parallel={} incremental={} early_stop={}",
        options.parallel, options.incremental, options.early_stop
    )
}

/// Build a world's fixture.
///
/// # Panics
///
/// Panics if the fixture spec is invalid (a test-authoring bug).
#[must_use]
pub fn build_world(world: &dyn GraphWorldV1) -> BuiltGraphV1 {
    build_graph(&world.spec()).expect("scenario fixture must build")
}

/// Run a world and unwrap the `Complete` outcome.
///
/// # Panics
///
/// Panics if the driver rejects the inputs or the outcome is not
/// `Complete`.
#[must_use]
pub fn run_complete(
    world: &dyn GraphWorldV1,
    options: &PreprocessOptionsV1,
) -> AnonymizationV1 {
    let built = build_world(world);
    let outcome = preprocess(&built.graph, &built.raw, &built.subjects, options)
        .expect("scenario inputs must be accepted");
    match outcome {
        PreprocessOutcomeV1::Complete(result) => result,
        other => panic!(
            "{} under {}: expected Complete, got {other:?}",
            world.world_id(),
            mode_label(options)
        ),
    }
}

/// Expected identifier set from bare node names (`s1`, `c4`, …).
#[must_use]
pub fn uris(names: &[&str]) -> BTreeSet<String> {
    names
        .iter()
        .map(|n| {
            if n.starts_with('s') {
                format!("http://example.org/subject/{n}")
            } else {
                format!("http://example.org/{n}")
            }
        })
        .collect()
}
