//! Veil WL: color refinement, incremental recoloring, and the
//! k-unmatchability preprocessing driver.
//!
//! This crate provides the WL layer for Veil. It depends only on
//! `veil-kernel`; it does NOT depend on `veil-harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! veil-kernel  ←  veil-wl  ←  veil-harness
//! (pure carrier)   (engines, driver)  (worlds, runner, reports)
//! ```
//!
//! # Key entry points
//!
//! - [`driver::preprocess`] -- the full pipeline: encode, initial color,
//!   refine, seed, rank, verify
//! - [`refine::refine_to_fixed_point`] -- the WL refinement engine
//! - [`incremental::recolor_from`] -- distance-bounded incremental recoloring
//! - [`verify::candidate_is_necessary`] -- a single candidate trial

#![forbid(unsafe_code)]

pub mod coloring;
pub mod compliance;
pub mod distance;
pub mod driver;
pub mod error;
pub mod incremental;
pub mod options;
pub mod refine;
pub mod verify;
