//! `TwinLeaves`: the minimal mirror.
//!
//! Each subject owns one leaf. The leaves are each other's only cover, so
//! both are necessary. Expected with `k = 2`: necessary
//! `{s1, s2, c3, c4}`, no singletons.

use crate::builder::{edge, node, GraphSpecV1, SubjectRuleV1};
use crate::contract::GraphWorldV1;

const S1: &str = "http://example.org/subject/s1";
const S2: &str = "http://example.org/subject/s2";
const C3: &str = "http://example.org/c3";
const C4: &str = "http://example.org/c4";

/// Four-node mirror world.
pub struct TwinLeaves;

impl GraphWorldV1 for TwinLeaves {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "twin_leaves"
    }

    fn spec(&self) -> GraphSpecV1 {
        GraphSpecV1 {
            nodes: vec![
                node(S1, &["Person"]),
                node(S2, &["Person"]),
                node(C3, &["Asset"]),
                node(C4, &["Asset"]),
            ],
            edges: vec![edge(S1, "owns", C3), edge(S2, "owns", C4)],
            subject_rule: SubjectRuleV1::UriContains("subject".into()),
        }
    }
}
