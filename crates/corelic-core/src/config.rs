//! corelic.toml inventory parser.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::input::{clamp_count, parse_count};
use crate::types::{Host, LicensePool, LicensingMode, Topology, VirtualMachine};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorelicConfig {
    #[serde(default)]
    pub mode: LicensingMode,
    #[serde(default = "default_show_vm_cores")]
    pub show_vm_cores: bool,
    #[serde(default)]
    pub pool: PoolConfig,
    #[serde(default)]
    pub hosts: Vec<HostConfig>,
}

/// Entitlements as entered, coerced to counts on read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoolConfig {
    #[serde(default)]
    pub standard: RawCount,
    #[serde(default)]
    pub datacenter: RawCount,
}

/// Any TOML value is accepted; anything without a leading integer counts as 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCount {
    Int(i64),
    Float(f64),
    Text(String),
    Other(toml::Value),
}

impl Default for RawCount {
    fn default() -> Self {
        RawCount::Int(0)
    }
}

impl RawCount {
    pub fn value(&self) -> u32 {
        match self {
            RawCount::Int(n) => clamp_count(*n),
            RawCount::Float(f) if f.is_nan() || *f < 0.0 => 0,
            // `as` saturates at u32::MAX.
            RawCount::Float(f) => f.trunc() as u32,
            RawCount::Text(s) => parse_count(s),
            RawCount::Other(_) => 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostConfig {
    pub id: String,
    pub name: Option<String>,
    pub cores: u32,
    #[serde(default)]
    pub vms: Vec<VirtualMachine>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("duplicate host id: {0}")]
    DuplicateHost(String),

    #[error("duplicate VM id {vm} on host {host}")]
    DuplicateVm { host: String, vm: String },
}

fn default_show_vm_cores() -> bool {
    true
}

impl CorelicConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: CorelicConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject ids that would make the topology ambiguous.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut host_ids = HashSet::new();
        for host in &self.hosts {
            if !host_ids.insert(host.id.as_str()) {
                return Err(ConfigError::DuplicateHost(host.id.clone()));
            }
            let mut vm_ids = HashSet::new();
            for vm in &host.vms {
                if !vm_ids.insert(vm.id.as_str()) {
                    return Err(ConfigError::DuplicateVm {
                        host: host.id.clone(),
                        vm: vm.id.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Hosts in file order.
    pub fn topology(&self) -> Topology {
        self.hosts
            .iter()
            .map(|h| Host {
                id: h.id.clone(),
                name: h.name.clone().unwrap_or_else(|| h.id.clone()),
                cores: h.cores,
                vms: h.vms.clone(),
            })
            .collect()
    }

    pub fn pool(&self) -> LicensePool {
        LicensePool {
            standard: self.pool.standard.value(),
            datacenter: self.pool.datacenter.value(),
        }
    }

    pub fn mode(&self) -> LicensingMode {
        self.mode
    }

    /// The sample two-host inventory with an empty license pool.
    pub fn scaffold() -> Self {
        let host = |id: &str, cores: u32, first_vm: u32, vm_cores: &[u32]| HostConfig {
            id: id.to_string(),
            name: Some(id.to_string()),
            cores,
            vms: vm_cores
                .iter()
                .zip(first_vm..)
                .map(|(&c, n)| VirtualMachine::new(format!("vm{n}"), c))
                .collect(),
        };

        CorelicConfig {
            mode: LicensingMode::HostLevel,
            show_vm_cores: true,
            pool: PoolConfig::default(),
            hosts: vec![
                host("Host1", 48, 1, &[4, 4, 4, 4, 4, 2, 8, 2, 4, 8, 16]),
                host("Host2", 64, 12, &[8, 4, 8, 8, 8, 4, 4, 8, 8, 4, 4]),
            ],
        }
    }
}
