//! Runtime error types for the vmgate evaluation pipeline.
//!
//! All fallible operations return `GateResult<T>`. An `Err` always means
//! "the evaluation could not be completed" — it is never a denial.
//! Callers must preserve this distinction (fail-closed at the transport
//! boundary, but the pipeline itself never coerces an error into a
//! verdict).

use thiserror::Error;

use crate::token::GrantToken;

/// The unified error type for the vmgate crates.
#[derive(Debug, Error)]
pub enum GateError {
    /// The permission oracle could not be reached at all.
    #[error("permission oracle unavailable: {reason}")]
    OracleUnavailable { reason: String },

    /// A single oracle query failed; carries the token so the failing
    /// grant check can be logged.
    #[error("permission query for token '{token}' failed: {reason}")]
    OracleQueryFailed { token: GrantToken, reason: String },

    /// The inbound request's old/new state is not the expected resource kind.
    ///
    /// Raised before any authorization logic runs.
    #[error("expected resource kind '{expected}' but got '{found}'")]
    TypeMismatch { expected: String, found: String },

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },
}

/// Convenience alias used throughout the vmgate crates.
pub type GateResult<T> = Result<T, GateError>;
