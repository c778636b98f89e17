//! # vmgate-core
//!
//! The decision pipeline for the vmgate admission engine.
//!
//! This crate provides:
//! - The two core traits (`PermissionOracle`, `FieldChecker`)
//! - The `AdmissionPipeline` that runs the ordered authorize/neutralize
//!   algorithm and emits a `Verdict`
//! - The system-metadata normalizer
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vmgate_core::{AdmissionPipeline, traits::{FieldChecker, PermissionOracle}};
//!
//! let pipeline = AdmissionPipeline::new(oracle, checkers);
//! let verdict = pipeline.evaluate(&request)?;
//! ```

pub mod metadata;
pub mod pipeline;
pub mod traits;

pub use metadata::normalize_system_metadata;
pub use pipeline::AdmissionPipeline;
