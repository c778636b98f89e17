//! Authorization tokens and the per-request permission snapshot.
//!
//! vmgate uses a fixed, compiled-in token set: one token per field
//! category plus the `full-admin` bypass. Tokens are the vocabulary the
//! permission oracle understands — each maps to one grantable operation
//! on the managed resource.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A grantable authorization token.
///
/// The set is closed by design: the checker list is compiled, not
/// data-driven, so an open string type would only invite typos. The
/// kebab-case string forms (`as_str`) are what appear in grant config
/// files and log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GrantToken {
    /// Global bypass: authorizes any difference, including metadata.
    FullAdmin,
    /// All volumes, all disk attachments, all filesystem mounts.
    Storage,
    /// Network interface attachments and network definitions.
    Network,
    /// CPU topology and resource requests/limits.
    Compute,
    /// GPUs, host device passthrough, watchdog, TPM, input devices.
    Devices,
    /// Desired running flag and run-strategy.
    Lifecycle,
    /// Media inject/eject/swap on existing optical drives only.
    CdromMedia,
}

impl GrantToken {
    /// The stable string key for this token.
    pub fn as_str(&self) -> &'static str {
        match self {
            GrantToken::FullAdmin => "full-admin",
            GrantToken::Storage => "storage",
            GrantToken::Network => "network",
            GrantToken::Compute => "compute",
            GrantToken::Devices => "devices",
            GrantToken::Lifecycle => "lifecycle",
            GrantToken::CdromMedia => "cdrom-media",
        }
    }
}

impl std::fmt::Display for GrantToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GrantToken {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full-admin" => Ok(GrantToken::FullAdmin),
            "storage" => Ok(GrantToken::Storage),
            "network" => Ok(GrantToken::Network),
            "compute" => Ok(GrantToken::Compute),
            "devices" => Ok(GrantToken::Devices),
            "lifecycle" => Ok(GrantToken::Lifecycle),
            "cdrom-media" => Ok(GrantToken::CdromMedia),
            other => Err(format!("unknown grant token '{}'", other)),
        }
    }
}

/// The oracle's answers for one change request, resolved once up front.
///
/// Built by the pipeline during opt-in detection and immutable for the
/// rest of the evaluation. A token absent from the snapshot is treated
/// as not granted.
#[derive(Debug, Clone, Default)]
pub struct PermissionSnapshot {
    inner: HashMap<GrantToken, bool>,
}

impl PermissionSnapshot {
    /// Record the oracle's answer for one token.
    pub fn record(&mut self, token: GrantToken, granted: bool) {
        self.inner.insert(token, granted);
    }

    /// Return true if the token was recorded as granted.
    pub fn granted(&self, token: GrantToken) -> bool {
        self.inner.get(&token).copied().unwrap_or(false)
    }

    /// Return true if at least one recorded token is granted.
    ///
    /// This drives the opt-in restriction model: an actor with no
    /// granular grant at all falls back to coarse legacy authorization.
    pub fn any_granted(&self) -> bool {
        self.inner.values().any(|g| *g)
    }
}
