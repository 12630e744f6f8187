//! Allocator — consumes the license pools against the topology.
//!
//! Hosts are served first-come, first-served in topology order. The
//! strategy depends on the licensing mode:
//! 1. Host-level: each host's physical cores draw on Datacenter first; the
//!    uncovered remainder is charged to Standard.
//! 2. Per-VM: each VM draws on Standard, all-or-nothing, in list order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use corelic_core::{AllocationRecord, LicensePool, LicensingMode, Topology};

/// Per-host license usage for one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    /// Host-id → units consumed, in topology order.
    pub per_host: IndexMap<String, AllocationRecord>,
    /// Sum of declared host cores, in either mode.
    pub total_cores_used: u64,
}

impl Allocation {
    pub fn record(&self, host_id: &str) -> Option<&AllocationRecord> {
        self.per_host.get(host_id)
    }

    pub fn datacenter_used(&self) -> u64 {
        self.per_host.values().map(|r| u64::from(r.datacenter_used)).sum()
    }

    pub fn standard_used(&self) -> u64 {
        self.per_host.values().map(|r| u64::from(r.standard_used)).sum()
    }
}

/// Allocate `pool` across `topology` under `mode`.
///
/// The pool is taken by value as a starting balance; neither input is
/// modified.
pub fn allocate(topology: &Topology, pool: LicensePool, mode: LicensingMode) -> Allocation {
    match mode {
        LicensingMode::HostLevel => allocate_host_level(topology, pool),
        LicensingMode::PerVirtualMachine => allocate_per_vm(topology, pool),
    }
}

fn allocate_host_level(topology: &Topology, pool: LicensePool) -> Allocation {
    let mut allocation = Allocation::default();
    let mut remaining_datacenter = pool.datacenter;
    // Signed: may go negative to represent an unmet Standard deficit.
    let mut remaining_standard = i64::from(pool.standard);

    for host in topology.hosts() {
        allocation.total_cores_used += u64::from(host.cores);
        let need = host.cores;

        let record = if remaining_datacenter >= need {
            remaining_datacenter -= need;
            AllocationRecord {
                datacenter_used: need,
                standard_used: 0,
            }
        } else {
            let datacenter_used = remaining_datacenter;
            let uncovered = need.saturating_sub(datacenter_used);
            remaining_datacenter = 0;
            remaining_standard -= i64::from(uncovered);
            AllocationRecord {
                datacenter_used,
                standard_used: uncovered,
            }
        };

        debug!(
            host = %host.id,
            need,
            datacenter = record.datacenter_used,
            standard = record.standard_used,
            "allocated host"
        );
        allocation.per_host.insert(host.id.clone(), record);
    }

    if remaining_standard < 0 {
        warn!(
            deficit = -remaining_standard,
            "standard pool exhausted — uncovered host cores remain"
        );
    }

    allocation
}

fn allocate_per_vm(topology: &Topology, pool: LicensePool) -> Allocation {
    let mut allocation = Allocation::default();
    let mut remaining_standard = pool.standard;

    for host in topology.hosts() {
        allocation.total_cores_used += u64::from(host.cores);
        let mut standard_used: u32 = 0;

        for vm in &host.vms {
            if remaining_standard >= vm.cores {
                remaining_standard -= vm.cores;
                standard_used += vm.cores;
            } else {
                debug!(
                    host = %host.id,
                    vm = %vm.id,
                    need = vm.cores,
                    remaining = remaining_standard,
                    "VM left uncovered"
                );
            }
        }

        allocation.per_host.insert(
            host.id.clone(),
            AllocationRecord {
                datacenter_used: 0,
                standard_used,
            },
        );
    }

    allocation
}
