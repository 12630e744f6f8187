//! corelic-core — shared types for core-license compliance.
//!
//! Holds the host/VM topology, license pools, and the records produced by
//! the allocation engine in `corelic-alloc`. Also provides the boundary
//! pieces that feed the engine: raw numeric coercion, the `corelic.toml`
//! inventory parser, and the VM move operation.

pub mod config;
pub mod input;
pub mod topology;
pub mod types;

pub use config::{ConfigError, CorelicConfig};
pub use input::{parse_count, parse_pool};
pub use topology::{MoveOutcome, TopologyError, VmSlot, move_vm};
pub use types::*;
