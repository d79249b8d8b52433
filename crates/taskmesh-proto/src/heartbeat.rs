//! Heartbeat messages between workers and the scheduler.

use serde::{Deserialize, Serialize};

/// Periodic liveness report from a worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerHeartbeat {
    /// Stable shard identifier for the worker slot.
    pub shard: String,
    /// Host the worker process is running on.
    pub hostname: String,
    /// Start nonce of the worker process; grows across restarts of the same
    /// shard, so the scheduler can tell a restarted worker from a stale
    /// duplicate.
    pub instance_id: u64,
    /// Configuration generation the worker is currently running with.
    pub config_version: u64,
}

impl WorkerHeartbeat {
    /// Creates a heartbeat with the minimal required identity fields.
    #[must_use]
    pub fn new(shard: impl Into<String>, hostname: impl Into<String>) -> Self {
        Self {
            shard: shard.into(),
            hostname: hostname.into(),
            instance_id: 0,
            config_version: 0,
        }
    }

    /// Sets the worker process instance id.
    #[must_use]
    pub const fn with_instance(mut self, instance_id: u64) -> Self {
        self.instance_id = instance_id;
        self
    }

    /// Sets the config generation the worker reports.
    #[must_use]
    pub const fn with_config_version(mut self, config_version: u64) -> Self {
        self.config_version = config_version;
        self
    }
}

/// Instruction returned to a worker in response to a heartbeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeartbeatDirective {
    /// Heartbeat accepted, nothing to do.
    Acknowledge,
    /// The worker runs an outdated configuration and should refetch it.
    StaleConfig,
    /// The worker is a stale duplicate process and must shut itself down.
    TerminateSelf,
}
