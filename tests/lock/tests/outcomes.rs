//! Outcome lock: infeasible, nothing-to-do, timeout, and boundary errors
//! through the public surfaces.

use lock_tests::uris;
use veil_harness::builder::{build_graph, edge, node, GraphSpecV1, SubjectRuleV1};
use veil_harness::runner::{run_world, write_bundle, RunError};
use veil_harness::worlds::shared_observers::SharedObservers;
use veil_wl::driver::{preprocess, PreprocessOutcomeV1};
use veil_wl::options::PreprocessOptionsV1;

fn options() -> PreprocessOptionsV1 {
    PreprocessOptionsV1 {
        k: 2,
        ..PreprocessOptionsV1::default()
    }
}

/// A subject alone on a directed chain: every class is a singleton.
fn lone_subject_spec() -> GraphSpecV1 {
    GraphSpecV1 {
        nodes: vec![
            node("http://example.org/subject/s1", &["Person"]),
            node("http://example.org/c2", &["Stop"]),
            node("http://example.org/c3", &["Stop"]),
        ],
        edges: vec![
            edge("http://example.org/subject/s1", "visits", "http://example.org/c2"),
            edge("http://example.org/c2", "visits", "http://example.org/c3"),
        ],
        subject_rule: SubjectRuleV1::UriContains("subject".into()),
    }
}

#[test]
fn lone_subject_is_infeasible() {
    let built = build_graph(&lone_subject_spec()).unwrap();
    let outcome = preprocess(&built.graph, &built.raw, &built.subjects, &options()).unwrap();
    let PreprocessOutcomeV1::Infeasible(report) = outcome else {
        panic!("expected Infeasible, got {outcome:?}");
    };
    assert!(report.refinement_converged);
    assert!(!report.timed_out);
    assert_eq!(report.candidates_total, 0);
}

#[test]
fn no_matching_subjects_is_nothing_to_do() {
    let mut spec = lone_subject_spec();
    spec.subject_rule = SubjectRuleV1::UriContains("nonexistent".into());
    let built = build_graph(&spec).unwrap();
    assert!(built.subjects.is_empty());
    let outcome = preprocess(&built.graph, &built.raw, &built.subjects, &options()).unwrap();
    assert_eq!(outcome, PreprocessOutcomeV1::NothingToDo);
}

#[test]
fn zero_budget_yields_seeded_partial_results() {
    let opts = PreprocessOptionsV1 {
        max_seconds: 0.0,
        ..options()
    };
    let run = run_world(&SharedObservers, &opts).unwrap();
    let PreprocessOutcomeV1::Complete(result) = &run.outcome else {
        panic!("expected partial Complete, got {:?}", run.outcome);
    };
    assert!(result.report.timed_out);
    assert!(!result.report.refinement_converged);
    assert_eq!(result.report.candidates_verified, 0);
    assert!(result.report.verdicts.is_empty());
    // The degree profiles alone already pair the subjects, so the seeded
    // set is exactly the subjects.
    assert_eq!(result.necessary, uris(&["s1", "s2"]));
}

#[test]
fn early_stop_without_incremental_is_rejected_at_the_boundary() {
    let opts = PreprocessOptionsV1 {
        incremental: false,
        early_stop: true,
        ..options()
    };
    let err = run_world(&SharedObservers, &opts).unwrap_err();
    assert!(matches!(err, RunError::Preprocess(_)), "got {err:?}");
}

#[test]
fn report_bundle_reflects_the_outcome_status() {
    let run = run_world(&SharedObservers, &options()).unwrap();
    let report: serde_json::Value = serde_json::from_slice(&run.bundle.bytes).unwrap();
    assert_eq!(report["world_id"], "shared_observers");
    assert_eq!(report["outcome"]["status"], "complete");
    assert_eq!(report["mode"]["k"], 2);
    let necessary = report["outcome"]["necessary"].as_array().unwrap();
    assert_eq!(necessary.len(), 4);
    // One serialized verdict per ranked candidate.
    let verdicts = report["outcome"]["run"]["verdicts"].as_array().unwrap();
    assert_eq!(
        verdicts.len() as u64,
        report["outcome"]["run"]["candidates_total"].as_u64().unwrap()
    );
    for verdict in verdicts {
        assert!(verdict["identifier"].is_string());
        assert!(verdict["necessary"].is_boolean());
    }
    // The digest field binds the report to its fixture.
    let fixture = report["graph_fixture"].as_str().unwrap();
    assert!(fixture.starts_with("sha256:"));
}

#[test]
fn written_bundles_match_their_recorded_digest() {
    let run = run_world(&SharedObservers, &options()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    write_bundle(&run, dir.path()).unwrap();

    let bytes = std::fs::read(dir.path().join("report.json")).unwrap();
    let recorded = std::fs::read_to_string(dir.path().join("report.digest")).unwrap();
    let recomputed = veil_kernel::content::content_hash(
        veil_kernel::content::DOMAIN_REPORT,
        &bytes,
    );
    assert_eq!(recorded.trim_end(), recomputed.as_str());
}
