//! The four demo scenarios, each wiring real vmgate components together:
//! the TOML grant table, the compiled checker list, and the pipeline.

use vmgate_checkers::default_checkers;
use vmgate_contracts::{
    error::GateResult,
    identity::Identity,
    machine::{
        CpuTopology, Disk, DiskBus, DiskTarget, InstanceTemplate, MachineSnapshot, MachineSpec,
        ObjectMeta, Volume, VolumeSource,
    },
    request::ChangeRequest,
    verdict::Verdict,
};
use vmgate_core::AdmissionPipeline;
use vmgate_grants::GrantTable;

/// The grant table all scenarios run against.
const GRANTS_TOML: &str = r#"
[[grants]]
kind = "group"
subject = "cluster-admins"
namespace = "*"
object = "*"
tokens = ["full-admin"]

[[grants]]
kind = "group"
subject = "media-operators"
namespace = "apps"
object = "*"
tokens = ["cdrom-media"]

[[grants]]
kind = "user"
subject = "storage-admin"
namespace = "apps"
object = "*"
tokens = ["storage"]
"#;

fn pipeline() -> GateResult<AdmissionPipeline> {
    let table = GrantTable::from_toml_str(GRANTS_TOML)?;
    Ok(AdmissionPipeline::new(Box::new(table), default_checkers()))
}

// ── Machine builders ──────────────────────────────────────────────────────────

/// A VM with a root disk and one optical drive carrying the given media.
fn machine(media: Option<&str>) -> MachineSnapshot {
    let mut template = InstanceTemplate::default();

    template.domain.cpu = Some(CpuTopology {
        cores: 2,
        sockets: 1,
        threads: 1,
    });

    template.domain.devices.disks.push(Disk {
        name: "root".to_string(),
        target: DiskTarget::Disk { bus: DiskBus::Virtio },
    });
    template.domain.devices.disks.push(Disk {
        name: "cdrom0".to_string(),
        target: DiskTarget::Cdrom {
            bus: DiskBus::Sata,
            read_only: true,
        },
    });

    template.volumes.push(Volume {
        name: "root".to_string(),
        source: VolumeSource::PersistentVolumeClaim {
            claim_name: "web-root".to_string(),
            hotpluggable: false,
        },
    });
    if let Some(backing) = media {
        template.volumes.push(Volume {
            name: "cdrom0".to_string(),
            source: VolumeSource::DataVolume {
                name: backing.to_string(),
                hotpluggable: true,
            },
        });
    }

    MachineSnapshot::new(
        ObjectMeta::named("web-vm", "apps"),
        MachineSpec {
            running: Some(true),
            run_strategy: None,
            template: Some(template),
        },
    )
}

fn evaluate(
    actor: Identity,
    old: MachineSnapshot,
    new: MachineSnapshot,
) -> GateResult<Verdict> {
    let request = ChangeRequest {
        actor,
        namespace: "apps".to_string(),
        object_name: "web-vm".to_string(),
        old_state: old,
        new_state: new,
    };
    pipeline()?.evaluate(&request)
}

fn report(label: &str, verdict: &Verdict) {
    match verdict {
        Verdict::Allow => println!("  {label}: ALLOW"),
        Verdict::Deny { reason } => println!("  {label}: DENY ({reason})"),
    }
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

/// A cluster admin may change anything, including labels.
pub fn full_admin() -> GateResult<()> {
    println!("Scenario: full-admin bypass");

    let admin = Identity::new("root@corp", vec!["cluster-admins".to_string()], "uid-admin");

    let old = machine(None);
    let mut new = machine(None);
    new.spec.template.as_mut().unwrap().domain.cpu = Some(CpuTopology {
        cores: 8,
        sockets: 2,
        threads: 1,
    });
    new.metadata
        .labels
        .insert("tier".to_string(), "gold".to_string());

    let verdict = evaluate(admin, old, new)?;
    report("cpu resize + relabel", &verdict);
    println!();
    Ok(())
}

/// A user holding no granular token is never restricted by this engine.
pub fn legacy_user() -> GateResult<()> {
    println!("Scenario: legacy user with no granular grants");

    let user = Identity::new("dev@corp", vec!["developers".to_string()], "uid-dev");

    let old = machine(None);
    let mut new = machine(None);
    new.spec.running = Some(false);

    let verdict = evaluate(user, old, new)?;
    report("stop request", &verdict);
    println!();
    Ok(())
}

/// A media operator may swap ISO images in an existing drive but may not
/// attach a new drive.
pub fn cdrom_swap() -> GateResult<()> {
    println!("Scenario: media operator (cdrom-media only)");

    let operator = Identity::new(
        "media@corp",
        vec!["media-operators".to_string()],
        "uid-media",
    );

    // Swap: authorized by the cdrom-media grant.
    let verdict = evaluate(
        operator.clone(),
        machine(Some("install-iso")),
        machine(Some("recovery-iso")),
    )?;
    report("media swap", &verdict);

    // New optical drive: a storage operation the operator lacks.
    let old = machine(None);
    let mut new = machine(None);
    new.spec
        .template
        .as_mut()
        .unwrap()
        .domain
        .devices
        .disks
        .push(Disk {
            name: "cdrom1".to_string(),
            target: DiskTarget::Cdrom {
                bus: DiskBus::Sata,
                read_only: true,
            },
        });

    let verdict = evaluate(operator, old, new)?;
    report("new drive attach", &verdict);
    println!();
    Ok(())
}

/// A storage admin touching CPU topology is denied: the compute
/// footprint changed and only the storage token is held.
pub fn unauthorized_compute() -> GateResult<()> {
    println!("Scenario: storage admin changing CPU");

    let admin = Identity::new("storage-admin", vec![], "uid-storage");

    let old = machine(None);
    let mut new = machine(None);
    new.spec.template.as_mut().unwrap().domain.cpu = Some(CpuTopology {
        cores: 4,
        sockets: 1,
        threads: 1,
    });

    let verdict = evaluate(admin, old, new)?;
    report("cpu resize", &verdict);
    println!();
    Ok(())
}
