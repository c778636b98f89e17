//! The inbound change request shape.
//!
//! Constructed once per admission call by the transport layer. The two
//! snapshots are read-only inputs to the pipeline; working copies are
//! cloned from them inside a single evaluation and never escape it.

use serde::{Deserialize, Serialize};

use crate::identity::Identity;
use crate::machine::MachineSnapshot;

/// A proposed update: actor plus the resource's old and new state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeRequest {
    /// Who is asking.
    pub actor: Identity,
    /// Namespace of the target object, as stated by the admission request.
    pub namespace: String,
    /// Name of the target object.
    pub object_name: String,
    /// The stored state.
    pub old_state: MachineSnapshot,
    /// The proposed state.
    pub new_state: MachineSnapshot,
}
