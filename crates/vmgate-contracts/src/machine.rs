//! The managed resource model: a virtual machine snapshot.
//!
//! This is the structured value the pipeline diffs. Every type derives
//! `Clone` and `PartialEq` so field checkers can take independent working
//! copies and compare footprints structurally, without any bespoke diff
//! machinery.
//!
//! The model is a deliberate subset of the upstream VM schema — exactly
//! the regions some field checker inspects plus the system-managed
//! metadata the normalizer clears. vmgate never interprets these fields;
//! it only compares and erases them.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Snapshot root ─────────────────────────────────────────────────────────────

/// One version of the managed virtual machine resource.
///
/// Immutable in intent: the pipeline never mutates the snapshots it
/// receives, only clones produced with `Clone`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineSnapshot {
    /// The resource kind; must equal `EXPECTED_KIND` or the pipeline
    /// rejects the request before any authorization logic runs.
    pub kind: String,
    /// Name, namespace, labels, annotations, and system bookkeeping.
    pub metadata: ObjectMeta,
    /// The nested domain configuration.
    pub spec: MachineSpec,
}

impl MachineSnapshot {
    /// The only resource kind this engine evaluates.
    pub const EXPECTED_KIND: &'static str = "VirtualMachine";

    /// Construct a snapshot of the expected kind.
    pub fn new(metadata: ObjectMeta, spec: MachineSpec) -> Self {
        Self {
            kind: Self::EXPECTED_KIND.to_string(),
            metadata,
            spec,
        }
    }
}

// ── Metadata ──────────────────────────────────────────────────────────────────

/// Resource metadata.
///
/// The system-managed bookkeeping fields (resource version, generation,
/// managed fields, self link, uid, timestamps, grace period) differ across
/// any stored update for reasons unrelated to user intent; the metadata
/// normalizer clears them before the residual diff. Labels and
/// annotations are user-authored and are NOT cleared.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ObjectMeta {
    pub name: String,
    pub namespace: String,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    #[serde(default)]
    pub annotations: BTreeMap<String, String>,

    /// Version token bumped by the server on every write.
    #[serde(default)]
    pub resource_version: String,
    /// Generation counter bumped on spec changes.
    #[serde(default)]
    pub generation: i64,
    /// Server-managed field-ownership ledger.
    #[serde(default)]
    pub managed_fields: Vec<FieldOwner>,
    /// Deprecated self-link, still present on stored objects.
    #[serde(default)]
    pub self_link: String,
    /// Server-assigned unique identifier.
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub creation_timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub deletion_timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub deletion_grace_period_seconds: Option<i64>,
}

impl ObjectMeta {
    /// Construct metadata with only name and namespace set.
    pub fn named(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            ..Self::default()
        }
    }
}

/// One entry in the server's field-ownership ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldOwner {
    /// The client that owns the fields (e.g. "kubectl-edit").
    pub manager: String,
    /// The operation that established ownership ("Apply" or "Update").
    pub operation: String,
    /// When ownership was last asserted.
    pub time: Option<DateTime<Utc>>,
}

// ── Spec ──────────────────────────────────────────────────────────────────────

/// The machine's desired configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MachineSpec {
    /// Direct start/stop control. Mutually exclusive with `run_strategy`.
    #[serde(default)]
    pub running: Option<bool>,
    /// Advanced lifecycle strategy. Mutually exclusive with `running`.
    #[serde(default)]
    pub run_strategy: Option<RunStrategy>,
    /// The instance template; absent on skeleton objects.
    #[serde(default)]
    pub template: Option<InstanceTemplate>,
}

/// How the machine should be kept running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunStrategy {
    Always,
    Halted,
    Manual,
    RerunOnFailure,
}

/// The template the machine instance is stamped from.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InstanceTemplate {
    pub domain: DomainSpec,
    /// Backing storage definitions, bound to disks by name.
    #[serde(default)]
    pub volumes: Vec<Volume>,
    /// Network definitions, bound to interfaces by name.
    #[serde(default)]
    pub networks: Vec<Network>,
}

/// The guest domain: compute shape plus attached devices.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DomainSpec {
    #[serde(default)]
    pub cpu: Option<CpuTopology>,
    #[serde(default)]
    pub resources: ResourceRequirements,
    #[serde(default)]
    pub devices: DeviceList,
}

/// Guest CPU topology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuTopology {
    pub cores: u32,
    #[serde(default)]
    pub sockets: u32,
    #[serde(default)]
    pub threads: u32,
}

/// Resource requests and limits, keyed by resource name
/// (e.g. "memory", "cpu").
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResourceRequirements {
    #[serde(default)]
    pub requests: BTreeMap<String, String>,
    #[serde(default)]
    pub limits: BTreeMap<String, String>,
}

/// Every device attached to the guest.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeviceList {
    /// How volumes are attached to the guest.
    #[serde(default)]
    pub disks: Vec<Disk>,
    /// Shared filesystem mounts.
    #[serde(default)]
    pub filesystems: Vec<Filesystem>,
    /// Network interface attachments.
    #[serde(default)]
    pub interfaces: Vec<Interface>,
    #[serde(default)]
    pub gpus: Vec<Gpu>,
    #[serde(default)]
    pub host_devices: Vec<HostDevice>,
    #[serde(default)]
    pub watchdog: Option<Watchdog>,
    #[serde(default)]
    pub tpm: Option<Tpm>,
    #[serde(default)]
    pub inputs: Vec<InputDevice>,
}

// ── Storage ───────────────────────────────────────────────────────────────────

/// A disk attachment: binds a volume (by name) into the guest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disk {
    /// Must match the name of a volume in the template.
    pub name: String,
    pub target: DiskTarget,
}

impl Disk {
    /// Return true if this attachment presents as an optical drive.
    pub fn is_cdrom(&self) -> bool {
        matches!(self.target, DiskTarget::Cdrom { .. })
    }
}

/// How the disk is presented to the guest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiskTarget {
    Disk { bus: DiskBus },
    Cdrom { bus: DiskBus, read_only: bool },
    Lun { bus: DiskBus },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiskBus {
    Virtio,
    Sata,
    Scsi,
}

/// A backing storage definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volume {
    /// Binds this volume to the disk attachment of the same name.
    pub name: String,
    pub source: VolumeSource,
}

impl Volume {
    /// Return true if the volume is marked hotpluggable.
    ///
    /// Only claim-backed sources can be hotplugged; image and cloud-init
    /// sources are always cold.
    pub fn is_hotpluggable(&self) -> bool {
        match &self.source {
            VolumeSource::PersistentVolumeClaim { hotpluggable, .. } => *hotpluggable,
            VolumeSource::DataVolume { hotpluggable, .. } => *hotpluggable,
            VolumeSource::ContainerDisk { .. } | VolumeSource::CloudInit { .. } => false,
        }
    }
}

/// Where a volume's bytes come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VolumeSource {
    PersistentVolumeClaim {
        claim_name: String,
        #[serde(default)]
        hotpluggable: bool,
    },
    DataVolume {
        name: String,
        #[serde(default)]
        hotpluggable: bool,
    },
    ContainerDisk {
        image: String,
    },
    CloudInit {
        user_data: String,
    },
}

/// A shared filesystem mount (virtio-fs style).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filesystem {
    pub name: String,
    pub virtiofs: bool,
}

// ── Network ───────────────────────────────────────────────────────────────────

/// A guest-side network interface attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface {
    /// Must match the name of a network in the template.
    pub name: String,
    pub binding: InterfaceBinding,
    #[serde(default)]
    pub mac_address: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterfaceBinding {
    Bridge,
    Masquerade,
    Sriov,
}

/// A network definition the guest can attach to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    pub name: String,
    pub source: NetworkSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NetworkSource {
    /// The cluster's default pod network.
    Pod,
    /// A named secondary network.
    Multus { network_name: String },
}

// ── Devices ───────────────────────────────────────────────────────────────────

/// A GPU passed through to the guest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gpu {
    pub name: String,
    pub device_name: String,
}

/// An arbitrary host device passed through to the guest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostDevice {
    pub name: String,
    pub device_name: String,
}

/// A watchdog device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Watchdog {
    pub name: String,
    pub action: WatchdogAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WatchdogAction {
    Reset,
    Shutdown,
    Poweroff,
}

/// A TPM device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tpm {
    #[serde(default)]
    pub persistent: bool,
}

/// An input device (tablet, keyboard).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputDevice {
    pub name: String,
    pub bus: InputBus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputBus {
    Usb,
    Virtio,
}
