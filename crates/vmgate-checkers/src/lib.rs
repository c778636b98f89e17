//! # vmgate-checkers
//!
//! The six field-category checkers for the vmgate admission engine, plus
//! the fixed pipeline order they must run in.
//!
//! ## Ordering
//!
//! The order returned by [`default_checkers`] is part of the permission
//! model, not a stylistic choice. The cdrom-media checker's footprint is
//! a subset of the storage checker's; running it first lets a granted
//! media change be erased from the working copies before the storage
//! checker looks, so the storage checker correctly sees no remaining
//! storage diff. The four independent checkers may appear in any order
//! among themselves.

pub mod cdrom;
pub mod compute;
pub mod devices;
pub mod lifecycle;
pub mod network;
pub mod storage;

#[cfg(test)]
pub(crate) mod testutil;

pub use cdrom::CdromMediaChecker;
pub use compute::ComputeChecker;
pub use devices::DevicesChecker;
pub use lifecycle::LifecycleChecker;
pub use network::NetworkChecker;
pub use storage::StorageChecker;

use vmgate_core::traits::FieldChecker;

/// The compiled checker list in pipeline order: independent checkers
/// first, then cdrom-media (subset) strictly before storage (superset).
pub fn default_checkers() -> Vec<Box<dyn FieldChecker>> {
    vec![
        Box::new(NetworkChecker),
        Box::new(ComputeChecker),
        Box::new(DevicesChecker),
        Box::new(LifecycleChecker),
        Box::new(CdromMediaChecker),
        Box::new(StorageChecker),
    ]
}

// ── Tests ─────────────────────────────────────────────────────────────────────
//
// End-to-end pipeline tests with the real checker set; unit tests for each
// checker live in their own modules.

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use vmgate_contracts::{
        error::GateResult,
        identity::Identity,
        machine::{
            CpuTopology, Disk, DiskBus, DiskTarget, MachineSnapshot, Volume, VolumeSource,
        },
        request::ChangeRequest,
        token::GrantToken,
        verdict::{DenyReason, Verdict},
    };
    use vmgate_core::{traits::PermissionOracle, AdmissionPipeline};

    use crate::testutil::machine_with_template;

    use super::default_checkers;

    // ── Helpers ───────────────────────────────────────────────────────────────

    struct FixedOracle {
        grants: HashSet<GrantToken>,
    }

    impl PermissionOracle for FixedOracle {
        fn authorize(
            &self,
            _actor: &Identity,
            _namespace: &str,
            _object_name: &str,
            token: GrantToken,
        ) -> GateResult<bool> {
            Ok(self.grants.contains(&token))
        }
    }

    fn pipeline_granting(tokens: &[GrantToken]) -> AdmissionPipeline {
        AdmissionPipeline::new(
            Box::new(FixedOracle {
                grants: tokens.iter().copied().collect(),
            }),
            default_checkers(),
        )
    }

    fn evaluate(
        tokens: &[GrantToken],
        old: MachineSnapshot,
        new: MachineSnapshot,
    ) -> Verdict {
        let request = ChangeRequest {
            actor: Identity::new("media-operator", vec![], "uid-77"),
            namespace: "default".to_string(),
            object_name: "vm-a".to_string(),
            old_state: old,
            new_state: new,
        };
        pipeline_granting(tokens).evaluate(&request).unwrap()
    }

    fn cdrom_disk(name: &str) -> Disk {
        Disk {
            name: name.to_string(),
            target: DiskTarget::Cdrom {
                bus: DiskBus::Sata,
                read_only: true,
            },
        }
    }

    fn media_volume(name: &str, backing: &str) -> Volume {
        Volume {
            name: name.to_string(),
            source: VolumeSource::DataVolume {
                name: backing.to_string(),
                hotpluggable: true,
            },
        }
    }

    /// A machine with one optical drive and the given inserted media.
    fn machine_with_media(backing: Option<&str>) -> MachineSnapshot {
        machine_with_template(|t| {
            t.domain.devices.disks.push(cdrom_disk("cdrom0"));
            if let Some(backing) = backing {
                t.volumes.push(media_volume("cdrom0", backing));
            }
        })
    }

    // ── Order sensitivity ─────────────────────────────────────────────────────

    /// A media swap with only the cdrom-media grant: the subset checker
    /// neutralizes the volumes before the storage checker looks, so the
    /// storage checker (ungranted) sees nothing and the verdict is Allow.
    #[test]
    fn test_media_swap_allowed_on_cdrom_grant_alone() {
        let verdict = evaluate(
            &[GrantToken::CdromMedia],
            machine_with_media(Some("install-iso")),
            machine_with_media(Some("recovery-iso")),
        );
        assert_eq!(verdict, Verdict::Allow);
    }

    /// The same actor adding a new optical drive: the cdrom-media guard
    /// disqualifies the change and the ungranted storage checker leaves
    /// the diff in place → Deny.
    #[test]
    fn test_new_drive_denied_on_cdrom_grant_alone() {
        let old = machine_with_media(None);
        let mut new = machine_with_media(None);
        new.spec
            .template
            .as_mut()
            .unwrap()
            .domain
            .devices
            .disks
            .push(cdrom_disk("cdrom1"));

        let verdict = evaluate(&[GrantToken::CdromMedia], old, new);
        assert_eq!(
            verdict,
            Verdict::Deny {
                reason: DenyReason::SpecViolation
            }
        );
    }

    // ── Hierarchical equivalence ──────────────────────────────────────────────

    /// storage alone covers a media change: the superset checker
    /// neutralizes everything the subset checker would have.
    #[test]
    fn test_storage_grant_covers_media_change() {
        let verdict = evaluate(
            &[GrantToken::Storage],
            machine_with_media(Some("install-iso")),
            machine_with_media(Some("recovery-iso")),
        );
        assert_eq!(verdict, Verdict::Allow);
    }

    /// Granting cdrom-media on top of storage changes nothing — for a
    /// media diff, a drive-set diff, and a combined diff.
    #[test]
    fn test_cdrom_plus_storage_equivalent_to_storage() {
        let cases: Vec<(MachineSnapshot, MachineSnapshot)> = vec![
            // Media swap.
            (
                machine_with_media(Some("install-iso")),
                machine_with_media(Some("recovery-iso")),
            ),
            // New optical drive.
            (machine_with_media(None), {
                let mut m = machine_with_media(None);
                m.spec
                    .template
                    .as_mut()
                    .unwrap()
                    .domain
                    .devices
                    .disks
                    .push(cdrom_disk("cdrom1"));
                m
            }),
            // Regular storage change plus media swap.
            (machine_with_media(Some("install-iso")), {
                let mut m = machine_with_media(Some("recovery-iso"));
                m.spec.template.as_mut().unwrap().volumes.push(Volume {
                    name: "scratch".to_string(),
                    source: VolumeSource::PersistentVolumeClaim {
                        claim_name: "scratch-claim".to_string(),
                        hotpluggable: false,
                    },
                });
                m
            }),
        ];

        for (old, new) in cases {
            let with_both = evaluate(
                &[GrantToken::Storage, GrantToken::CdromMedia],
                old.clone(),
                new.clone(),
            );
            let storage_only = evaluate(&[GrantToken::Storage], old, new);
            assert_eq!(with_both, storage_only);
        }
    }

    // ── Cross-category isolation ──────────────────────────────────────────────

    /// The worked example: cores 2 → 4 with only the storage grant.
    /// Compute's footprint changed, compute is ungranted, the diff
    /// survives → Deny(spec-violation).
    #[test]
    fn test_compute_change_denied_on_storage_grant() {
        let old = machine_with_template(|t| {
            t.domain.cpu = Some(CpuTopology { cores: 2, sockets: 1, threads: 1 });
            t.volumes.push(media_volume("v1", "backing"));
        });
        let new = machine_with_template(|t| {
            t.domain.cpu = Some(CpuTopology { cores: 4, sockets: 1, threads: 1 });
            t.volumes.push(media_volume("v1", "backing"));
        });

        let verdict = evaluate(&[GrantToken::Storage], old, new);
        assert_eq!(
            verdict,
            Verdict::Deny {
                reason: DenyReason::SpecViolation
            }
        );
    }

    /// Multiple changed categories, each granted, all neutralize → Allow.
    #[test]
    fn test_multiple_granted_categories_allow() {
        let old = machine_with_template(|t| {
            t.domain.cpu = Some(CpuTopology { cores: 2, sockets: 1, threads: 1 });
        });
        let mut new = machine_with_template(|t| {
            t.domain.cpu = Some(CpuTopology { cores: 4, sockets: 1, threads: 1 });
        });
        new.spec.running = Some(true);

        let verdict = evaluate(&[GrantToken::Compute, GrantToken::Lifecycle], old, new);
        assert_eq!(verdict, Verdict::Allow);
    }

    // ── Opt-in and bypass with the real checker set ───────────────────────────

    #[test]
    fn test_no_grants_allow_any_spec_change() {
        let old = machine_with_media(Some("install-iso"));
        let mut new = machine_with_media(None);
        new.spec.running = Some(true);

        let verdict = evaluate(&[], old, new);
        assert_eq!(verdict, Verdict::Allow);
    }

    #[test]
    fn test_full_admin_allows_metadata_change() {
        let old = machine_with_media(None);
        let mut new = machine_with_media(None);
        new.metadata
            .labels
            .insert("owner".to_string(), "ops".to_string());

        let verdict = evaluate(&[GrantToken::FullAdmin], old, new);
        assert_eq!(verdict, Verdict::Allow);
    }

    /// An opted-in actor touching labels is denied with metadata priority
    /// even when an unauthorized spec diff is also present.
    #[test]
    fn test_metadata_priority_with_real_checkers() {
        let old = machine_with_media(None);
        let mut new = machine_with_media(None);
        new.metadata
            .labels
            .insert("owner".to_string(), "ops".to_string());
        new.spec.running = Some(true);

        let verdict = evaluate(&[GrantToken::Compute], old, new);
        assert_eq!(
            verdict,
            Verdict::Deny {
                reason: DenyReason::MetadataViolation
            }
        );
    }
}
