//! `MirroredPairs`: every candidate is load-bearing.
//!
//! Both non-subject pairs attach one-per-subject: cities downstream over
//! `linksTo`, friends upstream over `knows`. Distinguishing any of
//! them breaks the subject mirror. Expected with `k = 2`: necessary
//! `{s1, s2, c3, c4, c5, c6}`, no singletons.

use crate::builder::{edge, node, GraphSpecV1, SubjectRuleV1};
use crate::contract::GraphWorldV1;

const S1: &str = "http://example.org/subject/s1";
const S2: &str = "http://example.org/subject/s2";
const C3: &str = "http://example.org/c3";
const C4: &str = "http://example.org/c4";
const C5: &str = "http://example.org/c5";
const C6: &str = "http://example.org/c6";

/// Two-relation mirror world.
pub struct MirroredPairs;

impl GraphWorldV1 for MirroredPairs {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "mirrored_pairs"
    }

    fn spec(&self) -> GraphSpecV1 {
        GraphSpecV1 {
            nodes: vec![
                node(S1, &["Person"]),
                node(S2, &["Person"]),
                node(C3, &["City"]),
                node(C4, &["Friend"]),
                node(C5, &["City"]),
                node(C6, &["Friend"]),
            ],
            edges: vec![
                edge(S1, "linksTo", C3),
                edge(S2, "linksTo", C5),
                edge(C4, "knows", S1),
                edge(C6, "knows", S2),
            ],
            subject_rule: SubjectRuleV1::UriContains("subject".into()),
        }
    }
}
