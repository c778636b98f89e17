//! The decision emitted for a single change request.
//!
//! A `Deny` is a legitimate, expected outcome — distinct from the error
//! cases in `error.rs`, which mean the evaluation itself could not be
//! completed.

use serde::{Deserialize, Serialize};

/// Why a change request was denied.
///
/// Distinguishing metadata from spec violations lets operators diagnose
/// which grant is missing. When both regions differ, metadata takes
/// priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DenyReason {
    /// An unauthorized difference remains in the resource's metadata.
    MetadataViolation,
    /// An unauthorized difference remains in the resource's spec.
    SpecViolation,
}

impl std::fmt::Display for DenyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DenyReason::MetadataViolation => f.write_str("metadata-violation"),
            DenyReason::SpecViolation => f.write_str("spec-violation"),
        }
    }
}

/// The final decision of the admission pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Every observed difference was authorized. The update may commit.
    Allow,

    /// An unauthorized difference remains after neutralization.
    Deny {
        /// Which region of the resource still differed.
        reason: DenyReason,
    },
}

impl Verdict {
    /// Return true for `Allow`.
    pub fn is_allow(&self) -> bool {
        matches!(self, Verdict::Allow)
    }
}
