//! The compliance position read by the presentation layer.

use serde::{Deserialize, Serialize};
use tracing::debug;

use corelic_core::{ComplianceGap, LicensePool, LicensingMode, Topology};

use crate::allocator::{Allocation, allocate};
use crate::gap::estimate_gaps;

/// Allocator and gap results for one snapshot.
///
/// `gap` is computed independently of `allocation`; per-host usage need not
/// add up to the pool, and the two may disagree in per-VM mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompliancePosition {
    pub mode: LicensingMode,
    pub pool: LicensePool,
    pub allocation: Allocation,
    pub gap: ComplianceGap,
}

/// Recompute the whole position from scratch.
pub fn compute_position(
    topology: &Topology,
    pool: LicensePool,
    mode: LicensingMode,
) -> CompliancePosition {
    let allocation = allocate(topology, pool, mode);
    let gap = estimate_gaps(topology, pool, mode);

    debug!(
        mode = %mode,
        hosts = topology.len(),
        total_cores = allocation.total_cores_used,
        datacenter_gap = gap.datacenter_gap_cores,
        standard_gap = gap.standard_gap_cores,
        "computed compliance position"
    );

    CompliancePosition {
        mode,
        pool,
        allocation,
        gap,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corelic_core::{AllocationRecord, Host, VirtualMachine};

    #[test]
    fn two_hosts_host_level() {
        let topology: Topology = [Host::new("Host1", 48), Host::new("Host2", 64)]
            .into_iter()
            .collect();
        let position = compute_position(&topology, LicensePool::new(0, 100), LicensingMode::HostLevel);

        assert_eq!(
            position.allocation.record("Host2"),
            Some(&AllocationRecord {
                datacenter_used: 52,
                standard_used: 12,
            })
        );
        assert_eq!(position.gap.datacenter_gap_cores, 12);
        assert_eq!(position.gap.standard_gap_cores, 12);
    }

    #[test]
    fn per_vm_gap_is_more_optimistic_than_allocation() {
        // 4 + 4 + 4 demand with 10 units: the gap says 2 short, but the
        // allocator leaves a whole 4-core VM uncovered.
        let topology: Topology = [Host::new("h1", 48).with_vms(vec![
            VirtualMachine::new("a", 4),
            VirtualMachine::new("b", 4),
            VirtualMachine::new("c", 4),
        ])]
        .into_iter()
        .collect();
        let position = compute_position(
            &topology,
            LicensePool::new(10, 0),
            LicensingMode::PerVirtualMachine,
        );

        let uncovered = topology.vm_cores() - position.allocation.standard_used();
        assert_eq!(uncovered, 4);
        assert_eq!(position.gap.standard_gap_cores, 2);
    }

    #[test]
    fn recomputation_does_not_depend_on_previous_call() {
        let topology: Topology = [Host::new("h1", 16)].into_iter().collect();
        let first = compute_position(&topology, LicensePool::new(0, 8), LicensingMode::HostLevel);
        let _ = compute_position(&topology, LicensePool::new(0, 0), LicensingMode::PerVirtualMachine);
        let again = compute_position(&topology, LicensePool::new(0, 8), LicensingMode::HostLevel);
        assert_eq!(first, again);
    }

    #[test]
    fn serializes_to_json() {
        let topology: Topology = [Host::new("h1", 4)].into_iter().collect();
        let position = compute_position(&topology, LicensePool::new(0, 4), LicensingMode::HostLevel);

        let json = serde_json::to_value(&position).unwrap();
        assert_eq!(json["mode"], "host-level");
        assert_eq!(json["allocation"]["per_host"]["h1"]["datacenter_used"], 4);
        assert_eq!(json["gap"]["standard_gap_cores"], 0);
    }
}
