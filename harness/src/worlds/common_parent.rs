//! `CommonParent`: a singleton that shields nobody.
//!
//! One parent node points at both subjects. It is alone in its class
//! (singleton) and distinguishing it would perturb both subjects equally
//! anyway. Each subject attends a private school; the schools are the
//! real cover. Expected with `k = 2`: necessary `{s1, s2, c4, c5}`,
//! singletons `{c3}`.

use crate::builder::{edge, node, GraphSpecV1, SubjectRuleV1};
use crate::contract::GraphWorldV1;

const S1: &str = "http://example.org/subject/s1";
const S2: &str = "http://example.org/subject/s2";
const C3: &str = "http://example.org/c3";
const C4: &str = "http://example.org/c4";
const C5: &str = "http://example.org/c5";

/// Parent-and-schools world.
pub struct CommonParent;

impl GraphWorldV1 for CommonParent {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "common_parent"
    }

    fn spec(&self) -> GraphSpecV1 {
        GraphSpecV1 {
            nodes: vec![
                node(S1, &["Student"]),
                node(S2, &["Student"]),
                node(C3, &["Parent"]),
                node(C4, &["School"]),
                node(C5, &["School"]),
            ],
            edges: vec![
                edge(C3, "parentOf", S1),
                edge(C3, "parentOf", S2),
                edge(S1, "attends", C4),
                edge(S2, "attends", C5),
            ],
            subject_rule: SubjectRuleV1::UriContains("subject".into()),
        }
    }
}
