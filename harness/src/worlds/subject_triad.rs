//! `SubjectTriad`: a color-uniform subject triangle plus a detached chain.
//!
//! The directed 3-cycle s1 → c4 → s2 → s1 never splits: every member sees
//! one incoming and one outgoing `follows` edge of the same color. Making
//! c4 a constant breaks the rotation and strands each subject alone. The
//! detached pair c3 → c5 contributes two singletons. Expected with
//! `k = 2`: necessary `{s1, s2, c4}`, singletons `{c3, c5}`.

use crate::builder::{edge, node, GraphSpecV1, SubjectRuleV1};
use crate::contract::GraphWorldV1;

const S1: &str = "http://example.org/subject/s1";
const S2: &str = "http://example.org/subject/s2";
const C3: &str = "http://example.org/c3";
const C4: &str = "http://example.org/c4";
const C5: &str = "http://example.org/c5";

/// Triangle-plus-chain world.
pub struct SubjectTriad;

impl GraphWorldV1 for SubjectTriad {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "subject_triad"
    }

    fn spec(&self) -> GraphSpecV1 {
        GraphSpecV1 {
            nodes: vec![
                node(S1, &["Peer"]),
                node(S2, &["Peer"]),
                node(C3, &["Peer"]),
                node(C4, &["Peer"]),
                node(C5, &["Peer"]),
            ],
            edges: vec![
                edge(S1, "follows", C4),
                edge(C4, "follows", S2),
                edge(S2, "follows", S1),
                edge(C3, "follows", C5),
            ],
            subject_rule: SubjectRuleV1::UriContains("subject".into()),
        }
    }
}
