//! Preprocessing options.

use crate::error::OptionsError;

/// Mode and budget configuration for one preprocessing run.
#[derive(Debug, Clone, PartialEq)]
pub struct PreprocessOptionsV1 {
    /// Minimum color-class size required for every subject.
    pub k: u32,
    /// Use the incremental engine for candidate trials instead of full
    /// refinement.
    pub incremental: bool,
    /// With `incremental`, cap propagation at the candidate's subject
    /// distance.
    pub early_stop: bool,
    /// Dispatch candidate batches to the worker pool.
    pub parallel: bool,
    /// Global time budget in seconds. Partial results on expiry.
    pub max_seconds: f64,
}

impl PreprocessOptionsV1 {
    /// Validate the option combination.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::EarlyStopWithoutIncremental`] or
    /// [`OptionsError::ZeroK`].
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.early_stop && !self.incremental {
            return Err(OptionsError::EarlyStopWithoutIncremental);
        }
        if self.k == 0 {
            return Err(OptionsError::ZeroK);
        }
        Ok(())
    }
}

impl Default for PreprocessOptionsV1 {
    fn default() -> Self {
        Self {
            k: 2,
            incremental: true,
            early_stop: false,
            parallel: false,
            max_seconds: 86400.0,
        }
    }
}
