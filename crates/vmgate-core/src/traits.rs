//! Core trait definitions for the vmgate decision pipeline.
//!
//! These two traits define the complete trust boundary:
//!
//! - `PermissionOracle` — trusted query (who may do what to which object)
//! - `FieldChecker`     — trusted footprint detector/eraser
//!
//! The pipeline wires them together in a fixed order. Checker
//! implementations are compiled in, never registered at runtime.

use vmgate_contracts::{
    error::GateResult,
    identity::Identity,
    machine::MachineSnapshot,
    token::GrantToken,
};

/// The abstract permission backend.
///
/// A `true` answer means the actor may apply the token's semantic
/// operation to the named object in that namespace; `false` means no such
/// grant exists. An `Err` means the query itself could not be completed —
/// it must never be interpreted as either grant or denial, and it aborts
/// the enclosing evaluation.
///
/// Implementations own their retry and timeout policy. A cancelled or
/// timed-out query surfaces as `GateError::OracleUnavailable`.
pub trait PermissionOracle: Send + Sync {
    /// Answer one authorization question.
    fn authorize(
        &self,
        actor: &Identity,
        namespace: &str,
        object_name: &str,
        token: GrantToken,
    ) -> GateResult<bool>;
}

/// One field category of the managed resource.
///
/// Each checker owns a fixed footprint of spec fields and knows how to
/// detect and erase changes within it. Checkers are totally ordered by the
/// pipeline: every subset checker runs before any checker whose footprint
/// contains it.
pub trait FieldChecker: Send + Sync {
    /// Human-readable name for log output (e.g. "storage").
    fn name(&self) -> &'static str;

    /// The token the oracle must grant for this checker's footprint.
    fn token(&self) -> GrantToken;

    /// Return true if this footprint differs between the two snapshots
    /// as they currently stand.
    ///
    /// The pipeline calls this on working copies that earlier checkers
    /// may already have neutralized — never on a fixed baseline.
    fn has_changed(&self, old: &MachineSnapshot, new: &MachineSnapshot) -> bool;

    /// Erase this footprint in both copies symmetrically.
    ///
    /// After this runs, the touched fields compare equal between the two
    /// copies regardless of their original values. Must be idempotent.
    fn neutralize(&self, old: &mut MachineSnapshot, new: &mut MachineSnapshot);
}
