//! Boundary message types for the taskmesh control plane.
//!
//! Plain data exchanged between workers and the scheduler:
//!
//! - **Worker → Scheduler**: heartbeats, running-task reports
//! - **Scheduler → Worker**: heartbeat directives
//!
//! The transport and codec that carry these messages live elsewhere; this
//! crate only defines their shapes.

mod heartbeat;
mod report;

pub use heartbeat::{HeartbeatDirective, WorkerHeartbeat};
pub use report::RunningTaskReport;
