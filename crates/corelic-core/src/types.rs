//! Shared types used across corelic crates.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A virtual machine and the cores it requires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualMachine {
    pub id: String,
    pub cores: u32,
}

impl VirtualMachine {
    pub fn new(id: impl Into<String>, cores: u32) -> Self {
        Self { id: id.into(), cores }
    }
}

/// A virtualization host.
///
/// `cores` is the physical capacity and is independent of the VM core sum.
/// The order of `vms` is the allocation priority order in per-VM mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Host {
    pub id: String,
    pub name: String,
    pub cores: u32,
    #[serde(default)]
    pub vms: Vec<VirtualMachine>,
}

impl Host {
    pub fn new(id: impl Into<String>, cores: u32) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            cores,
            vms: Vec::new(),
        }
    }

    pub fn with_vms(mut self, vms: Vec<VirtualMachine>) -> Self {
        self.vms = vms;
        self
    }

    /// Sum of the cores required by the hosted VMs.
    pub fn vm_cores(&self) -> u64 {
        self.vms.iter().map(|vm| u64::from(vm.cores)).sum()
    }
}

/// Hosts keyed by id, in allocation priority order.
///
/// Insertion order is preserved and meaningful: earlier hosts are served
/// first by the allocator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Topology {
    hosts: IndexMap<String, Host>,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a host. Re-inserting an existing id replaces the host in place.
    pub fn insert(&mut self, host: Host) {
        self.hosts.insert(host.id.clone(), host);
    }

    pub fn get(&self, host_id: &str) -> Option<&Host> {
        self.hosts.get(host_id)
    }

    pub(crate) fn get_mut(&mut self, host_id: &str) -> Option<&mut Host> {
        self.hosts.get_mut(host_id)
    }

    pub fn contains(&self, host_id: &str) -> bool {
        self.hosts.contains_key(host_id)
    }

    /// Hosts in priority order.
    pub fn hosts(&self) -> impl DoubleEndedIterator<Item = &Host> + ExactSizeIterator {
        self.hosts.values()
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    /// Sum of declared physical cores across all hosts.
    pub fn declared_cores(&self) -> u64 {
        self.hosts().map(|h| u64::from(h.cores)).sum()
    }

    /// Sum of VM core requirements across all hosts.
    pub fn vm_cores(&self) -> u64 {
        self.hosts().map(Host::vm_cores).sum()
    }

    /// Locate a VM by id, returning its host id and position.
    pub fn find_vm(&self, vm_id: &str) -> Option<(&str, usize)> {
        self.hosts().find_map(|host| {
            host.vms
                .iter()
                .position(|vm| vm.id == vm_id)
                .map(|idx| (host.id.as_str(), idx))
        })
    }
}

impl FromIterator<Host> for Topology {
    fn from_iter<I: IntoIterator<Item = Host>>(iter: I) -> Self {
        let mut topology = Topology::new();
        for host in iter {
            topology.insert(host);
        }
        topology
    }
}

/// Available license units. One unit covers exactly one core.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicensePool {
    pub standard: u32,
    pub datacenter: u32,
}

impl LicensePool {
    pub fn new(standard: u32, datacenter: u32) -> Self {
        Self { standard, datacenter }
    }
}

/// How license demand is evaluated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LicensingMode {
    /// Each host's physical capacity is licensed, Datacenter first.
    #[default]
    HostLevel,
    /// Each VM's cores are licensed with Standard units only.
    #[serde(rename = "per-vm")]
    PerVirtualMachine,
}

impl LicensingMode {
    /// Map the per-VM toggle onto a mode.
    pub fn from_per_vm(per_vm: bool) -> Self {
        if per_vm {
            LicensingMode::PerVirtualMachine
        } else {
            LicensingMode::HostLevel
        }
    }

    pub fn is_per_vm(&self) -> bool {
        matches!(self, LicensingMode::PerVirtualMachine)
    }

    pub fn label(&self) -> &'static str {
        match self {
            LicensingMode::HostLevel => "host-level",
            LicensingMode::PerVirtualMachine => "per-vm",
        }
    }
}

impl fmt::Display for LicensingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown licensing mode: {0} (expected host-level or per-vm)")]
pub struct ParseModeError(pub String);

impl FromStr for LicensingMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "host-level" | "host" => Ok(LicensingMode::HostLevel),
            "per-vm" | "vm" => Ok(LicensingMode::PerVirtualMachine),
            other => Err(ParseModeError(other.to_string())),
        }
    }
}

/// License units consumed by a single host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRecord {
    pub datacenter_used: u32,
    pub standard_used: u32,
}

/// Additional license units needed for full coverage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceGap {
    pub datacenter_gap_cores: u64,
    pub standard_gap_cores: u64,
}

impl ComplianceGap {
    pub fn is_compliant(&self) -> bool {
        self.datacenter_gap_cores == 0 && self.standard_gap_cores == 0
    }
}
