//! Running-task reports from workers.

use serde::{Deserialize, Serialize};

/// Ground-truth report of the tasks a worker is currently executing.
///
/// Sent once after a worker (re)connects so the scheduler can reconcile its
/// placement bookkeeping against reality. Order of `task_ids` carries no
/// meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningTaskReport {
    /// Shard identifier of the reporting worker.
    pub shard: String,
    /// Identifiers of every task the worker is running.
    pub task_ids: Vec<String>,
}

impl RunningTaskReport {
    /// Creates a report for `shard` with no running tasks.
    #[must_use]
    pub fn new(shard: impl Into<String>) -> Self {
        Self {
            shard: shard.into(),
            task_ids: Vec::new(),
        }
    }

    /// Sets the running task ids.
    #[must_use]
    pub fn with_tasks<I, S>(mut self, task_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.task_ids = task_ids.into_iter().map(Into::into).collect();
        self
    }
}
