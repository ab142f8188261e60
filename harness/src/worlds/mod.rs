//! Scenario worlds: small fixture graphs with known WL structure.
//!
//! Each world is a handful of nodes whose stable partition is forced by
//! symmetry: subjects come in a mirror-swappable pair (or triangle), and
//! the remaining nodes either preserve that mirror when distinguished or
//! break it. Subjects are identified by URI (`"subject"` substring).

pub mod common_parent;
pub mod mirrored_pairs;
pub mod saturated_escorts;
pub mod shared_observers;
pub mod subject_triad;
pub mod twin_leaves;

use crate::contract::GraphWorldV1;

/// All scenario worlds, in suite order.
#[must_use]
pub fn all_scenarios() -> Vec<Box<dyn GraphWorldV1>> {
    vec![
        Box::new(shared_observers::SharedObservers),
        Box::new(subject_triad::SubjectTriad),
        Box::new(saturated_escorts::SaturatedEscorts),
        Box::new(mirrored_pairs::MirroredPairs),
        Box::new(twin_leaves::TwinLeaves),
        Box::new(common_parent::CommonParent),
    ]
}
