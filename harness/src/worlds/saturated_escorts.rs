//! `SaturatedEscorts`: a saturated subject class, a hub singleton, and
//! registries that spare their escorts.
//!
//! Each subject points at a private clinic (c3, c7), so distinguishing a
//! clinic splits the subjects. Two registries (c5, c6) each point at both
//! subjects, fed by a lone hub c4; distinguishing a registry perturbs the
//! subjects identically. Expected with `k = 2`: necessary
//! `{s1, s2, c3, c7}`, singletons `{c4}`.

use crate::builder::{edge, node, GraphSpecV1, SubjectRuleV1};
use crate::contract::GraphWorldV1;

const S1: &str = "http://example.org/subject/s1";
const S2: &str = "http://example.org/subject/s2";
const C3: &str = "http://example.org/c3";
const C4: &str = "http://example.org/c4";
const C5: &str = "http://example.org/c5";
const C6: &str = "http://example.org/c6";
const C7: &str = "http://example.org/c7";

/// Clinic/registry/hub world.
pub struct SaturatedEscorts;

impl GraphWorldV1 for SaturatedEscorts {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "saturated_escorts"
    }

    fn spec(&self) -> GraphSpecV1 {
        GraphSpecV1 {
            nodes: vec![
                node(S1, &["Person"]),
                node(S2, &["Person"]),
                node(C3, &["Clinic"]),
                node(C4, &["Hub"]),
                node(C5, &["Registry"]),
                node(C6, &["Registry"]),
                node(C7, &["Clinic"]),
            ],
            edges: vec![
                edge(S1, "linksTo", C3),
                edge(S2, "linksTo", C7),
                edge(C5, "linksTo", S1),
                edge(C5, "linksTo", S2),
                edge(C6, "linksTo", S1),
                edge(C6, "linksTo", S2),
                edge(C4, "linksTo", C5),
                edge(C4, "linksTo", C6),
            ],
            subject_rule: SubjectRuleV1::UriContains("subject".into()),
        }
    }
}
