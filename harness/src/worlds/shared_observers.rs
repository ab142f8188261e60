//! `SharedObservers`: escorts break the mirror, observers do not.
//!
//! Two subjects each point at a private asset (c4, c6), and two observers
//! (c3, c5) each point at *both* subjects. Distinguishing an asset
//! distinguishes its subject; distinguishing an observer perturbs both
//! subjects identically. Expected with `k = 2`: necessary
//! `{s1, s2, c4, c6}`, no singletons.

use crate::builder::{edge, node, GraphSpecV1, SubjectRuleV1};
use crate::contract::GraphWorldV1;

const S1: &str = "http://example.org/subject/s1";
const S2: &str = "http://example.org/subject/s2";
const C3: &str = "http://example.org/c3";
const C4: &str = "http://example.org/c4";
const C5: &str = "http://example.org/c5";
const C6: &str = "http://example.org/c6";

/// Escorts-vs-observers world.
pub struct SharedObservers;

impl GraphWorldV1 for SharedObservers {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "shared_observers"
    }

    fn spec(&self) -> GraphSpecV1 {
        GraphSpecV1 {
            nodes: vec![
                node(S1, &["Agent"]),
                node(S2, &["Agent"]),
                node(C3, &["Observer"]),
                node(C4, &["Asset"]),
                node(C5, &["Observer"]),
                node(C6, &["Asset"]),
            ],
            edges: vec![
                edge(S1, "linksTo", C4),
                edge(S2, "linksTo", C6),
                edge(C3, "linksTo", S1),
                edge(C3, "linksTo", S2),
                edge(C5, "linksTo", S1),
                edge(C5, "linksTo", S2),
            ],
            subject_rule: SubjectRuleV1::UriContains("subject".into()),
        }
    }
}
