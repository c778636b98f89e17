//! Actor identity and request correlation types.
//!
//! An `Identity` is supplied by the transport layer once per incoming
//! change request and is read-only for the rest of the evaluation.
//! vmgate never authenticates anyone — it only consumes the identity
//! the admission boundary already established.

use serde::{Deserialize, Serialize};

/// The authenticated actor behind a change request.
///
/// All three fields come straight from the admission request's user info.
/// Groups participate in grant matching alongside the username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// The actor's username (e.g. "system:serviceaccount:apps:deployer").
    pub username: String,
    /// All groups the actor belongs to.
    pub groups: Vec<String>,
    /// Opaque unique id assigned by the authentication layer.
    pub uid: String,
}

impl Identity {
    /// Construct an identity from string-like parts.
    pub fn new(
        username: impl Into<String>,
        groups: Vec<String>,
        uid: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            groups,
            uid: uid.into(),
        }
    }
}

/// Unique identifier for a single pipeline evaluation.
///
/// Stamped on every evaluation so all log lines produced for one change
/// request can be correlated. Never persisted; no state outlives a request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub uuid::Uuid);

impl RequestId {
    /// Create a new, unique request ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
