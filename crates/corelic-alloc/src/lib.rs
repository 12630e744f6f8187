//! corelic allocation engine — pool consumption and compliance gaps.
//!
//! Two independent pure functions run over the same snapshot of hosts,
//! VMs, and license pools. Neither holds state between calls.
//!
//! # Components
//!
//! - **`allocator`** — Greedy, order-sensitive pool consumption per host
//! - **`gap`** — Additional license units needed for full coverage
//! - **`position`** — Both results bundled for the presentation layer
//! - **`report`** — Human-readable rendering of a position

pub mod allocator;
pub mod gap;
pub mod position;
pub mod report;

pub use allocator::{Allocation, allocate};
pub use gap::estimate_gaps;
pub use position::{CompliancePosition, compute_position};
pub use report::format_report;
