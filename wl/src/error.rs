//! Typed preprocessing errors.
//!
//! Only boundary failures are errors: bad options or malformed inputs.
//! Timeouts, infeasibility, and the empty-subject case are outcomes
//! (see [`crate::driver::PreprocessOutcomeV1`]); no exception-like
//! control flow crosses the core.

use veil_kernel::feature::FeatureError;

/// Rejected option combinations. Checked pre-flight; never mid-run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    /// `early_stop` requires `incremental`.
    EarlyStopWithoutIncremental,
    /// `k` must be at least 1.
    ZeroK,
}

impl std::fmt::Display for OptionsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EarlyStopWithoutIncremental => {
                write!(f, "early_stop can only be enabled if incremental is enabled")
            }
            Self::ZeroK => write!(f, "k must be at least 1"),
        }
    }
}

impl std::error::Error for OptionsError {}

/// Typed failure for the preprocessing boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreprocessError {
    /// Invalid option combination.
    Options(OptionsError),
    /// Raw feature table malformed (descriptors, orderings, unknown names).
    Features(FeatureError),
    /// Raw feature table and graph disagree on the node count.
    NodeCountMismatch { graph: u32, features: usize },
    /// A subject index lies outside `0..n`.
    SubjectOutOfRange { subject: u32, node_count: u32 },
}

impl std::fmt::Display for PreprocessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Options(e) => write!(f, "invalid options: {e}"),
            Self::Features(e) => write!(f, "invalid features: {e}"),
            Self::NodeCountMismatch { graph, features } => write!(
                f,
                "graph has {graph} nodes but feature table has {features}"
            ),
            Self::SubjectOutOfRange {
                subject,
                node_count,
            } => write!(f, "subject {subject} outside 0..{node_count}"),
        }
    }
}

impl std::error::Error for PreprocessError {}

impl From<OptionsError> for PreprocessError {
    fn from(e: OptionsError) -> Self {
        Self::Options(e)
    }
}

impl From<FeatureError> for PreprocessError {
    fn from(e: FeatureError) -> Self {
        Self::Features(e)
    }
}
