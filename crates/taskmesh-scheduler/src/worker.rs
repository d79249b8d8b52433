//! Worker records tracked by the registry.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use taskmesh_proto::WorkerHeartbeat;

/// Stable shard identifier for a worker slot.
pub type ShardId = String;

/// Task identifier.
pub type TaskId = String;

/// One remote compute node, keyed by its shard id.
///
/// Created on the first heartbeat for an unseen shard and owned exclusively
/// by the registry's worker store; the rotation pools refer to it by shard
/// id only.
#[derive(Debug, Clone)]
pub struct Worker {
    /// Stable shard identifier.
    pub shard: ShardId,
    /// Host the worker is recorded on.
    pub hostname: String,
    /// Start nonce of the worker process currently holding the shard.
    pub instance_id: u64,
    /// Timestamp of the last accepted heartbeat (epoch seconds).
    pub last_heartbeat: u64,
    /// Liveness state.
    pub state: WorkerState,
    running_tasks: HashSet<TaskId>,
}

impl Worker {
    /// Creates a record for an unseen shard from its first heartbeat.
    #[must_use]
    pub fn from_heartbeat(msg: &WorkerHeartbeat, now: u64) -> Self {
        Self {
            shard: msg.shard.clone(),
            hostname: msg.hostname.clone(),
            instance_id: msg.instance_id,
            last_heartbeat: now,
            state: WorkerState::New,
            running_tasks: HashSet::new(),
        }
    }

    /// Refreshes liveness from an accepted heartbeat.
    ///
    /// A worker stays `New` until its running tasks are reported; anything
    /// else that still heartbeats is alive again.
    pub fn record_heartbeat(&mut self, now: u64) {
        self.last_heartbeat = now;
        if self.state != WorkerState::New {
            self.state = WorkerState::Healthy;
        }
    }

    /// Replaces the recorded running-task set with ground truth.
    ///
    /// Repeated calls overwrite. A `New` worker becomes `Healthy` once its
    /// tasks are known, since placement can now be reconciled against it.
    pub fn set_running_tasks<I>(&mut self, task_ids: I)
    where
        I: IntoIterator<Item = TaskId>,
    {
        self.running_tasks = task_ids.into_iter().collect();
        if self.state == WorkerState::New {
            self.state = WorkerState::Healthy;
        }
    }

    /// Restarts the record for a new worker process on the same shard.
    ///
    /// The previous process's task set no longer holds, so the worker drops
    /// back to `New` until it reports again.
    pub fn reset_instance(&mut self, instance_id: u64, now: u64) {
        self.instance_id = instance_id;
        self.last_heartbeat = now;
        self.state = WorkerState::New;
        self.running_tasks.clear();
    }

    /// Marks the worker suspected lost.
    pub fn mark_suspect(&mut self) {
        self.state = WorkerState::Suspect;
    }

    /// Marks the worker lost.
    pub fn mark_lost(&mut self) {
        self.state = WorkerState::Lost;
    }

    /// Tasks the worker currently reports as running.
    pub fn running_tasks(&self) -> &HashSet<TaskId> {
        &self.running_tasks
    }

    /// Returns whether the worker reports `task_id` as running.
    pub fn is_running(&self, task_id: &str) -> bool {
        self.running_tasks.contains(task_id)
    }
}

/// Worker liveness state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkerState {
    /// Seen, but its running tasks have not been reported yet.
    New,
    /// Heartbeating normally.
    Healthy,
    /// Missed heartbeats; may still come back.
    Suspect,
    /// Considered gone; its tasks are eligible for reassignment.
    Lost,
}

impl WorkerState {
    /// Returns true if the worker can take new placements.
    #[must_use]
    pub const fn is_available(self) -> bool {
        matches!(self, Self::Healthy)
    }
}
