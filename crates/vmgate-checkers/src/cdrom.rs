//! The cdrom-media checker: the subset of storage a media operator may touch.
//!
//! Footprint: the volume entries that are (a) marked hotpluggable and
//! (b) bound by name to an existing optical disk attachment. That covers
//! media inject, eject, and swap on existing drives — and nothing else.
//!
//! Adding or removing an optical drive itself is a storage-level
//! privilege, so `has_changed` first compares the optical disk attachment
//! set between old and new and disqualifies the whole change if it
//! differs. `neutralize` likewise never touches the disks.
//!
//! Must run BEFORE the storage checker in the pipeline: the media volumes
//! it erases are inside the storage footprint, and erasing them first is
//! what lets a media-only change pass on the cdrom-media grant alone.

use std::collections::BTreeSet;

use vmgate_contracts::{
    machine::{Disk, MachineSnapshot, Volume},
    token::GrantToken,
};
use vmgate_core::traits::FieldChecker;

/// Detects and erases media changes on existing optical drives.
pub struct CdromMediaChecker;

impl CdromMediaChecker {
    /// All optical disk attachments, full values — identity and
    /// configuration both participate in the guard comparison.
    fn cdrom_disks(snapshot: &MachineSnapshot) -> Vec<&Disk> {
        snapshot
            .spec
            .template
            .iter()
            .flat_map(|t| t.domain.devices.disks.iter())
            .filter(|d| d.is_cdrom())
            .collect()
    }

    /// Hotpluggable volumes bound by name to an optical disk attachment.
    fn media_volumes(snapshot: &MachineSnapshot) -> Vec<&Volume> {
        let Some(template) = &snapshot.spec.template else {
            return Vec::new();
        };

        let cdrom_names: BTreeSet<&str> = template
            .domain
            .devices
            .disks
            .iter()
            .filter(|d| d.is_cdrom())
            .map(|d| d.name.as_str())
            .collect();

        template
            .volumes
            .iter()
            .filter(|v| cdrom_names.contains(v.name.as_str()) && v.is_hotpluggable())
            .collect()
    }

    fn media_volume_names(snapshot: &MachineSnapshot) -> BTreeSet<String> {
        Self::media_volumes(snapshot)
            .into_iter()
            .map(|v| v.name.clone())
            .collect()
    }
}

impl FieldChecker for CdromMediaChecker {
    fn name(&self) -> &'static str {
        "cdrom-media"
    }

    fn token(&self) -> GrantToken {
        GrantToken::CdromMedia
    }

    fn has_changed(&self, old: &MachineSnapshot, new: &MachineSnapshot) -> bool {
        // Guard: a changed optical drive set is never a media operation,
        // even though the drives are nominally CD-ROM related. The change
        // falls through to the storage checker's footprint.
        if Self::cdrom_disks(old) != Self::cdrom_disks(new) {
            return false;
        }

        Self::media_volumes(old) != Self::media_volumes(new)
    }

    fn neutralize(&self, old: &mut MachineSnapshot, new: &mut MachineSnapshot) {
        // Union of bound media volume names from both sides, so inject
        // (name only in new), eject (only in old), and swap (different
        // values under either name) all erase symmetrically.
        let mut names = Self::media_volume_names(old);
        names.extend(Self::media_volume_names(new));

        for snapshot in [old, new] {
            if let Some(template) = &mut snapshot.spec.template {
                template.volumes.retain(|v| !names.contains(&v.name));
            }
        }
        // The optical drives themselves are left alone: attachment
        // add/remove requires the storage grant.
    }
}
