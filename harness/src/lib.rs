//! Veil Harness: world-level orchestration for the WL pipeline.
//!
//! The harness builds a world's fixture graph through the loader
//! interface (`builder`), runs the preprocessing driver, and packages the
//! outcome as a content-addressed report bundle.
//!
//! The harness does NOT implement WL logic; it delegates to `veil-wl`.
//! Worlds provide domain data only; the harness owns orchestration.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod builder;
pub mod contract;
pub mod report;
pub mod runner;
pub mod worlds;
