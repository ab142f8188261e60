//! Veil Kernel: the deterministic carrier layer of Veil.
//!
//! Pure data types and byte contracts only. The WL engines live in
//! `veil-wl`, orchestration in `veil-harness`.
//!
//! # Binding byte contracts
//!
//! Two byte formats are part of the stable output contract and are locked
//! by tests:
//!
//! - the canonical feature buffer ([`feature::FeatureRecordV1`])
//! - the little-endian word serialization fed to the color digest
//!   ([`digest::hash_u64_words`])
//!
//! # Module Dependency Direction
//!
//! `digest`, `content`, `deadline`, `graph` depend on nothing internal.
//! `feature` depends on nothing internal. `lexicon` depends on `feature`.
//!
//! One-way only. No cycles.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod content;
pub mod deadline;
pub mod digest;
pub mod feature;
pub mod graph;
pub mod lexicon;
