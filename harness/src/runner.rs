//! Harness runner: build a world, run the driver, package the bundle.
//!
//! The runner uses only builder and driver APIs; it implements no WL
//! logic. It owns the two timings the report bundle deliberately leaves
//! out of the hashed document: fixture build time and preprocessing time.

use std::fs;
use std::path::Path;

use veil_wl::driver::{preprocess, PreprocessOutcomeV1};
use veil_wl::error::PreprocessError;
use veil_wl::options::PreprocessOptionsV1;

use crate::builder::{build_graph, BuildError};
use crate::contract::GraphWorldV1;
use crate::report::{build_report, fixture_digest, ReportBundleV1, ReportError};

/// Error during a harness run.
#[derive(Debug)]
pub enum RunError {
    /// Fixture construction failed.
    Build(BuildError),
    /// The driver rejected its inputs.
    Preprocess(PreprocessError),
    /// Report serialization failed.
    Report(ReportError),
    /// Bundle directory write failed.
    Io { detail: String },
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Build(e) => write!(f, "fixture build failed: {e}"),
            Self::Preprocess(e) => write!(f, "preprocess rejected inputs: {e}"),
            Self::Report(e) => write!(f, "report packaging failed: {e}"),
            Self::Io { detail } => write!(f, "bundle write failed: {detail}"),
        }
    }
}

impl std::error::Error for RunError {}

/// Wall-clock timings for one run. Not part of the hashed report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingsV1 {
    pub build_millis: u64,
    pub preprocess_millis: u64,
}

/// The packaged result of running one world.
#[derive(Debug)]
pub struct WorldRunV1 {
    pub outcome: PreprocessOutcomeV1,
    pub bundle: ReportBundleV1,
    pub timings: TimingsV1,
}

/// Build the world's fixture, run preprocessing, and package the report.
///
/// # Errors
///
/// Returns [`RunError`] for fixture, driver-boundary, or serialization
/// failures. Timeouts and infeasibility are carried inside `outcome`.
pub fn run_world(
    world: &dyn GraphWorldV1,
    options: &PreprocessOptionsV1,
) -> Result<WorldRunV1, RunError> {
    let spec = world.spec();

    let build_start = std::time::Instant::now();
    let built = build_graph(&spec).map_err(RunError::Build)?;
    let build_millis = u64::try_from(build_start.elapsed().as_millis()).unwrap_or(u64::MAX);

    let preprocess_start = std::time::Instant::now();
    let outcome = preprocess(&built.graph, &built.raw, &built.subjects, options)
        .map_err(RunError::Preprocess)?;
    let preprocess_millis =
        u64::try_from(preprocess_start.elapsed().as_millis()).unwrap_or(u64::MAX);

    let digest = fixture_digest(&spec).map_err(RunError::Report)?;
    let bundle =
        build_report(world.world_id(), options, &outcome, &digest).map_err(RunError::Report)?;

    Ok(WorldRunV1 {
        outcome,
        bundle,
        timings: TimingsV1 {
            build_millis,
            preprocess_millis,
        },
    })
}

/// Write a run's bundle to a directory: `report.json`, `report.digest`,
/// and `timings.json`.
///
/// # Errors
///
/// Returns [`RunError::Io`] on filesystem failures.
pub fn write_bundle(run: &WorldRunV1, dir: &Path) -> Result<(), RunError> {
    let io = |e: std::io::Error| RunError::Io {
        detail: e.to_string(),
    };
    fs::create_dir_all(dir).map_err(io)?;
    fs::write(dir.join("report.json"), &run.bundle.bytes).map_err(io)?;
    fs::write(
        dir.join("report.digest"),
        format!("{}\n", run.bundle.content_hash.as_str()),
    )
    .map_err(io)?;
    let timings = serde_json::json!({
        "build_millis": run.timings.build_millis,
        "preprocess_millis": run.timings.preprocess_millis,
    });
    let timing_bytes = serde_json::to_vec(&timings).map_err(|e| RunError::Io {
        detail: e.to_string(),
    })?;
    fs::write(dir.join("timings.json"), timing_bytes).map_err(io)?;
    Ok(())
}
