//! Report bundles: the canonical, content-addressed record of a run.
//!
//! The report carries only deterministic content: identifier sets,
//! counters, mode echo, and the fixture digest that binds the result to
//! its input graph. Wall-clock timings live outside the hashed document
//! (see [`crate::runner`]).
//!
//! Canonical form: compact JSON with lexicographically sorted object keys
//! and integer-only numbers. `serde_json`'s maps are BTree-backed, so
//! building values with `json!` and serializing with `to_vec` yields that
//! form directly; the lock tests pin it.

use veil_kernel::content::{content_hash, ContentHash, DOMAIN_GRAPH_FIXTURE, DOMAIN_REPORT};
use veil_wl::driver::{PreprocessOutcomeV1, RunReportV1, VerdictRecordV1};
use veil_wl::options::PreprocessOptionsV1;

use crate::builder::{GraphSpecV1, SubjectRuleV1};

/// Typed failure for report serialization.
#[derive(Debug)]
pub enum ReportError {
    /// JSON serialization failed.
    Serialize { detail: String },
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serialize { detail } => write!(f, "report serialization failed: {detail}"),
        }
    }
}

impl std::error::Error for ReportError {}

/// Canonical report bytes plus their content hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportBundleV1 {
    /// Canonical JSON document.
    pub bytes: Vec<u8>,
    /// `content_hash(DOMAIN_REPORT, bytes)`.
    pub content_hash: ContentHash,
}

/// Content-address a fixture spec.
///
/// # Errors
///
/// Returns [`ReportError::Serialize`] if JSON serialization fails.
pub fn fixture_digest(spec: &GraphSpecV1) -> Result<ContentHash, ReportError> {
    let nodes: Vec<serde_json::Value> = spec
        .nodes
        .iter()
        .map(|n| {
            serde_json::json!({
                "concepts": n.concepts,
                "identifier": n.identifier,
            })
        })
        .collect();
    let edges: Vec<serde_json::Value> = spec
        .edges
        .iter()
        .map(|e| serde_json::json!([e.source, e.relation, e.target]))
        .collect();
    let value = serde_json::json!({
        "edges": edges,
        "nodes": nodes,
        "subject_rule": subject_rule_to_json(&spec.subject_rule),
    });
    let bytes = to_canonical_bytes(&value)?;
    Ok(content_hash(DOMAIN_GRAPH_FIXTURE, &bytes))
}

/// Build the canonical report bundle for one run.
///
/// # Errors
///
/// Returns [`ReportError::Serialize`] if JSON serialization fails.
pub fn build_report(
    world_id: &str,
    options: &PreprocessOptionsV1,
    outcome: &PreprocessOutcomeV1,
    graph_digest: &ContentHash,
) -> Result<ReportBundleV1, ReportError> {
    let value = serde_json::json!({
        "graph_fixture": graph_digest.as_str(),
        "mode": {
            "early_stop": options.early_stop,
            "incremental": options.incremental,
            "k": options.k,
            "parallel": options.parallel,
        },
        "outcome": outcome_to_json(outcome),
        "world_id": world_id,
    });
    let bytes = to_canonical_bytes(&value)?;
    let content_hash = content_hash(DOMAIN_REPORT, &bytes);
    Ok(ReportBundleV1 {
        bytes,
        content_hash,
    })
}

fn subject_rule_to_json(rule: &SubjectRuleV1) -> serde_json::Value {
    match rule {
        SubjectRuleV1::UriContains(needle) => {
            serde_json::json!({"type": "uri_contains", "needle": needle})
        }
        SubjectRuleV1::ConceptContains(needle) => {
            serde_json::json!({"type": "concept_contains", "needle": needle})
        }
    }
}

fn outcome_to_json(outcome: &PreprocessOutcomeV1) -> serde_json::Value {
    match outcome {
        PreprocessOutcomeV1::NothingToDo => serde_json::json!({"status": "nothing_to_do"}),
        PreprocessOutcomeV1::Infeasible(report) => serde_json::json!({
            "run": run_report_to_json(report),
            "status": "infeasible",
        }),
        PreprocessOutcomeV1::Complete(result) => serde_json::json!({
            "necessary": result.necessary.iter().collect::<Vec<_>>(),
            "run": run_report_to_json(&result.report),
            "singletons": result.singletons.iter().collect::<Vec<_>>(),
            "status": "complete",
        }),
    }
}

fn run_report_to_json(report: &RunReportV1) -> serde_json::Value {
    serde_json::json!({
        "candidates_total": report.candidates_total,
        "candidates_verified": report.candidates_verified,
        "necessary_seeded": report.necessary_seeded,
        "necessary_total": report.necessary_total,
        "refinement_converged": report.refinement_converged,
        "refinement_rounds": report.refinement_rounds,
        "singleton_count": report.singleton_count,
        "timed_out": report.timed_out,
        "verdicts": report.verdicts.iter().map(verdict_to_json).collect::<Vec<_>>(),
    })
}

fn verdict_to_json(verdict: &VerdictRecordV1) -> serde_json::Value {
    serde_json::json!({
        "identifier": verdict.identifier,
        "necessary": verdict.necessary,
    })
}

fn to_canonical_bytes(value: &serde_json::Value) -> Result<Vec<u8>, ReportError> {
    serde_json::to_vec(value).map_err(|e| ReportError::Serialize {
        detail: e.to_string(),
    })
}
