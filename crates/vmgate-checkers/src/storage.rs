//! The storage checker: the superset over everything disk-shaped.
//!
//! Its footprint covers all volume definitions, all disk attachments, and
//! all filesystem mounts — including the CD-ROM attachments and media
//! volumes the cdrom-media checker owns a subset of. It must therefore
//! run LAST in the pipeline, after the subset checker has had its chance
//! to neutralize.

use vmgate_contracts::{machine::MachineSnapshot, token::GrantToken};
use vmgate_core::traits::FieldChecker;

/// Detects and erases changes to volumes, disks, and filesystems.
pub struct StorageChecker;

impl FieldChecker for StorageChecker {
    fn name(&self) -> &'static str {
        "storage"
    }

    fn token(&self) -> GrantToken {
        GrantToken::Storage
    }

    fn has_changed(&self, old: &MachineSnapshot, new: &MachineSnapshot) -> bool {
        let (Some(old_t), Some(new_t)) = (&old.spec.template, &new.spec.template) else {
            return false;
        };

        old_t.volumes != new_t.volumes
            || old_t.domain.devices.disks != new_t.domain.devices.disks
            || old_t.domain.devices.filesystems != new_t.domain.devices.filesystems
    }

    fn neutralize(&self, old: &mut MachineSnapshot, new: &mut MachineSnapshot) {
        let (Some(old_t), Some(new_t)) = (&mut old.spec.template, &mut new.spec.template) else {
            return;
        };

        old_t.volumes.clear();
        new_t.volumes.clear();

        old_t.domain.devices.disks.clear();
        new_t.domain.devices.disks.clear();

        old_t.domain.devices.filesystems.clear();
        new_t.domain.devices.filesystems.clear();
    }
}
