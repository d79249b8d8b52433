//! Taskmesh worker registry - the control plane's authoritative worker
//! index.
//!
//! The registry tracks every remote compute worker known to the scheduler:
//!
//! - **Heartbeat ingestion**: registering unseen shards, refreshing liveness
//! - **Maintenance sweeps**: suspecting and losing workers that go silent
//! - **Fair selection**: round-robin rotation, global or scoped to a host
//! - **Startup safety**: an initial-wait gate that prevents duplicate task
//!   launches across a scheduler restart
//!
//! # Architecture
//!
//! Worker records live in a single owning store keyed by shard id. The
//! global rotation pool and the per-host pools are secondary indexes of
//! shard ids resolved against that store, so there is exactly one copy of
//! every record to keep consistent. The registry performs no I/O, holds no
//! locks, and never reads a clock: every operation is synchronous, time
//! arrives on the caller's [`UpdateBatch`], and every externally visible
//! effect is a return value or an event appended to that batch.
//!
//! # Example
//!
//! ```
//! use taskmesh_proto::WorkerHeartbeat;
//! use taskmesh_scheduler::{RegistryConfig, UpdateBatch, WorkerRegistry};
//!
//! let mut registry = WorkerRegistry::new(RegistryConfig::default(), 1000);
//! let mut update = UpdateBatch::new(1001);
//! registry.process_heartbeat(&mut update, &WorkerHeartbeat::new("w1", "h1"));
//!
//! assert!(registry.find_worker("w1").is_some());
//! assert_eq!(registry.next_worker().unwrap().shard, "w1");
//! ```

pub mod config;
pub mod error;
pub mod lock;
pub mod pool;
pub mod registry;
pub mod update;
pub mod worker;

// Re-export main types
pub use config::RegistryConfig;
pub use error::{RegistryError, Result};
pub use lock::SharedRegistry;
pub use pool::RotatingPool;
pub use registry::WorkerRegistry;
pub use update::{RegistryEvent, UpdateBatch};
pub use worker::{ShardId, TaskId, Worker, WorkerState};
