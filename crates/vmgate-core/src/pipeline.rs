//! The admission pipeline: the ordered authorize/neutralize decision core.
//!
//! The pipeline enforces the vmgate evaluation model:
//!
//!   Kind guard → Full-admin bypass → Opt-in snapshot →
//!   Sequential neutralization → Metadata normalization → Residual diff
//!
//! The sequencing invariant is absolute: checkers run in the order given,
//! and each `has_changed` is evaluated on the working copies as earlier
//! checkers left them. A subset checker that neutralizes its footprint
//! first is exactly what lets the superset checker after it correctly see
//! no remaining diff. Reordering, or computing one baseline diff up
//! front, would break the hierarchical grant model.

use tracing::{debug, info, warn};

use vmgate_contracts::{
    error::{GateError, GateResult},
    identity::RequestId,
    machine::MachineSnapshot,
    request::ChangeRequest,
    token::{GrantToken, PermissionSnapshot},
    verdict::{DenyReason, Verdict},
};

use crate::metadata::normalize_system_metadata;
use crate::traits::{FieldChecker, PermissionOracle};

/// The decision core for one resource kind.
///
/// Construct once at startup with the compiled checker list and the
/// deployment's oracle; `evaluate` is stateless across invocations and
/// safe to call from concurrent requests.
pub struct AdmissionPipeline {
    oracle: Box<dyn PermissionOracle>,
    checkers: Vec<Box<dyn FieldChecker>>,
}

impl AdmissionPipeline {
    /// Create a pipeline over the given oracle and ordered checker list.
    ///
    /// The caller is responsible for the order invariant: every subset
    /// checker must precede any checker whose footprint contains it.
    pub fn new(oracle: Box<dyn PermissionOracle>, checkers: Vec<Box<dyn FieldChecker>>) -> Self {
        Self { oracle, checkers }
    }

    /// Decide whether the proposed update is permitted.
    ///
    /// # Pipeline
    ///
    /// 1. Verify both snapshots are the expected resource kind; a
    ///    mismatch is an error before any authorization logic runs.
    /// 2. Query `full-admin`: granted → `Allow` immediately, with no
    ///    neutralization and no metadata normalization. Full admin
    ///    authorizes literally any difference.
    /// 3. Query every checker token into a `PermissionSnapshot`. If none
    ///    resolved true, return `Allow` — the actor has not opted in to
    ///    granular restriction and coarse legacy authorization upstream
    ///    is assumed sufficient.
    /// 4. Clone both snapshots and fold the checker list over the copies
    ///    in order: changed + granted → neutralize both copies; changed +
    ///    not granted → leave untouched, because a superset checker later
    ///    in the order may still legitimately cover the same fields.
    /// 5. Normalize system-managed metadata on both copies.
    /// 6. Compare the copies: a metadata difference denies with
    ///    `metadata-violation` (checked first), a spec difference with
    ///    `spec-violation`, otherwise `Allow`.
    ///
    /// # Errors
    ///
    /// Any oracle error aborts the evaluation and is propagated with the
    /// failing token attached. An error is never a grant and never a
    /// denial. The input snapshots are never mutated.
    pub fn evaluate(&self, request: &ChangeRequest) -> GateResult<Verdict> {
        let request_id = RequestId::new();

        // ── Step 1: Kind guard ───────────────────────────────────────────────
        for state in [&request.old_state, &request.new_state] {
            if state.kind != MachineSnapshot::EXPECTED_KIND {
                return Err(GateError::TypeMismatch {
                    expected: MachineSnapshot::EXPECTED_KIND.to_string(),
                    found: state.kind.clone(),
                });
            }
        }

        debug!(
            request_id = %request_id,
            actor = %request.actor.username,
            namespace = %request.namespace,
            object = %request.object_name,
            "evaluating update request"
        );

        // ── Step 2: Full-admin bypass ────────────────────────────────────────
        //
        // A full-admin grant authorizes any difference, including metadata,
        // so nothing further runs.
        if self.query(request, GrantToken::FullAdmin)? {
            info!(
                request_id = %request_id,
                actor = %request.actor.username,
                "full-admin grant held, allowing unconditionally"
            );
            return Ok(Verdict::Allow);
        }

        // ── Step 3: Opt-in detection ─────────────────────────────────────────
        //
        // Resolve every checker token once; the snapshot is immutable for
        // the rest of the evaluation.
        let mut grants = PermissionSnapshot::default();
        for checker in &self.checkers {
            let granted = self.query(request, checker.token())?;
            grants.record(checker.token(), granted);
        }

        if !grants.any_granted() {
            debug!(
                request_id = %request_id,
                actor = %request.actor.username,
                "no granular grants held, legacy authorization applies"
            );
            return Ok(Verdict::Allow);
        }

        // ── Step 4: Sequential neutralization ────────────────────────────────
        //
        // The fold threads one (old, new) working pair through every
        // checker. has_changed always sees the copies as the previous
        // checkers left them; this is what makes subset-before-superset
        // ordering meaningful.
        let mut old_copy = request.old_state.clone();
        let mut new_copy = request.new_state.clone();

        for checker in &self.checkers {
            if !checker.has_changed(&old_copy, &new_copy) {
                continue;
            }

            if grants.granted(checker.token()) {
                debug!(
                    request_id = %request_id,
                    checker = checker.name(),
                    token = %checker.token(),
                    "footprint changed and authorized, neutralizing"
                );
                checker.neutralize(&mut old_copy, &mut new_copy);
            } else {
                // Not granted: do not deny yet. A superset checker later
                // in the order may hold the grant that covers this change.
                debug!(
                    request_id = %request_id,
                    checker = checker.name(),
                    token = %checker.token(),
                    "footprint changed without grant, deferring to residual diff"
                );
            }
        }

        // ── Step 5: Metadata normalization ───────────────────────────────────
        //
        // Always runs, after the checker pass, independent of any grant.
        normalize_system_metadata(&mut old_copy.metadata, &mut new_copy.metadata);

        // ── Step 6: Residual diff and verdict ────────────────────────────────
        let metadata_diff = old_copy.metadata != new_copy.metadata;
        let spec_diff = old_copy.spec != new_copy.spec;

        if metadata_diff {
            warn!(
                request_id = %request_id,
                actor = %request.actor.username,
                object = %request.object_name,
                "unauthorized metadata change remains after neutralization"
            );
            return Ok(Verdict::Deny {
                reason: DenyReason::MetadataViolation,
            });
        }

        if spec_diff {
            warn!(
                request_id = %request_id,
                actor = %request.actor.username,
                object = %request.object_name,
                "unauthorized spec change remains after neutralization"
            );
            return Ok(Verdict::Deny {
                reason: DenyReason::SpecViolation,
            });
        }

        debug!(request_id = %request_id, "all changes authorized");
        Ok(Verdict::Allow)
    }

    /// Issue one oracle query, attaching the token to any failure so the
    /// caller can log which grant check broke.
    fn query(&self, request: &ChangeRequest, token: GrantToken) -> GateResult<bool> {
        self.oracle
            .authorize(
                &request.actor,
                &request.namespace,
                &request.object_name,
                token,
            )
            .map_err(|err| match err {
                GateError::OracleUnavailable { reason } => {
                    warn!(token = %token, reason = %reason, "oracle query failed");
                    GateError::OracleQueryFailed { token, reason }
                }
                other => other,
            })
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
