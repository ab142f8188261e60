//! World contract: the minimal trait a scenario world must implement.
//!
//! Worlds provide domain data only: node and edge specs plus the
//! subject-detection rule. Worlds may NOT implement coloring, compliance
//! checks, or report hashing (driver/runner concerns).

use crate::builder::GraphSpecV1;

/// A scenario world: a named fixture graph.
pub trait GraphWorldV1 {
    /// Unique world identifier (e.g., `"shared_observers"`).
    fn world_id(&self) -> &str;

    /// The fixture specification the builder turns into core inputs.
    fn spec(&self) -> GraphSpecV1;
}
