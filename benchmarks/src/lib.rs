//! Shared generators for the veil benchmark suites.
//!
//! All generators are deterministic: fixture shape is a pure function of
//! the size parameters, so benchmark runs are comparable across machines.

use veil_harness::builder::{
    build_graph, edge, node, BuiltGraphV1, EdgeSpecV1, GraphSpecV1, NodeSpecV1, SubjectRuleV1,
};
use veil_kernel::deadline::Deadline;
use veil_kernel::feature::FeatureRecordV1;
use veil_kernel::lexicon::LexiconV1;
use veil_wl::coloring::{counts_of, initial_coloring, ColorCounts, ColoringV1};
use veil_wl::refine::refine_to_fixed_point;

/// Two subjects, each heading a private chain of `depth` nodes.
///
/// Every chain node is a candidate whose trial must propagate along the
/// chain, so `depth` scales both refinement rounds and incremental work.
#[must_use]
pub fn mirrored_chains(depth: usize) -> GraphSpecV1 {
    let mut nodes: Vec<NodeSpecV1> = vec![
        node("http://example.org/subject/s1", &["Person"]),
        node("http://example.org/subject/s2", &["Person"]),
    ];
    let mut edges: Vec<EdgeSpecV1> = Vec::new();
    for side in ["a", "b"] {
        let subject = if side == "a" {
            "http://example.org/subject/s1"
        } else {
            "http://example.org/subject/s2"
        };
        let mut previous = subject.to_string();
        for i in 0..depth {
            let id = format!("http://example.org/{side}{i}");
            nodes.push(node(&id, &["Stop"]));
            edges.push(edge(&previous, "linksTo", &id));
            previous = id;
        }
    }
    GraphSpecV1 {
        nodes,
        edges,
        subject_rule: SubjectRuleV1::UriContains("subject".into()),
    }
}

/// Two subjects watched by `observers` nodes that each point at both.
///
/// Observer trials never split the subjects, so this shape measures the
/// cost of verifying many harmless candidates.
#[must_use]
pub fn observer_fan(observers: usize) -> GraphSpecV1 {
    let mut nodes: Vec<NodeSpecV1> = vec![
        node("http://example.org/subject/s1", &["Person"]),
        node("http://example.org/subject/s2", &["Person"]),
    ];
    let mut edges: Vec<EdgeSpecV1> = Vec::new();
    for i in 0..observers {
        let id = format!("http://example.org/w{i}");
        nodes.push(node(&id, &["Observer"]));
        edges.push(edge(&id, "watches", "http://example.org/subject/s1"));
        edges.push(edge(&id, "watches", "http://example.org/subject/s2"));
    }
    GraphSpecV1 {
        nodes,
        edges,
        subject_rule: SubjectRuleV1::UriContains("subject".into()),
    }
}

/// A built fixture with its converged baseline, ready for engine benches.
pub struct BaselineSetup {
    pub built: BuiltGraphV1,
    pub features: Vec<FeatureRecordV1>,
    pub coloring: ColoringV1,
    pub counts: ColorCounts,
}

/// Build a spec and refine it to the baseline fixed point.
///
/// # Panics
///
/// Panics if the generated spec is invalid or fails to converge.
/// Benchmark setup failures are fatal.
#[must_use]
pub fn baseline_setup(spec: &GraphSpecV1) -> BaselineSetup {
    let built = build_graph(spec).expect("generated spec must build");
    let lexicon = LexiconV1::build(&built.raw).expect("lexicon");
    let features = lexicon.materialize(&built.raw).expect("features");
    let outcome = refine_to_fixed_point(
        &built.graph,
        initial_coloring(&features),
        &Deadline::unlimited(),
    );
    assert!(outcome.converged, "baseline refinement must converge");
    let counts = counts_of(&outcome.coloring);
    BaselineSetup {
        built,
        features,
        coloring: outcome.coloring,
        counts,
    }
}
