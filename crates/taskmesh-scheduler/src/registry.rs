//! Worker registry: the authoritative index of known workers.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::{info, warn};

use taskmesh_proto::{HeartbeatDirective, WorkerHeartbeat};

use crate::config::RegistryConfig;
use crate::error::{RegistryError, Result};
use crate::pool::RotatingPool;
use crate::update::{RegistryEvent, UpdateBatch};
use crate::worker::{ShardId, TaskId, Worker, WorkerState};

/// Authoritative index of known workers and gatekeeper for startup-safe
/// scheduling.
///
/// Every [`Worker`] record lives in a single owning store keyed by shard id.
/// The global rotation pool and the per-host pools are secondary indexes of
/// shard ids resolved against that store, so there is exactly one copy of
/// each record. Invariant: every shard in any host pool is present in the
/// store and in the global pool, and its worker's recorded hostname equals
/// that host pool's key.
///
/// All mutation goes through `&mut self`; a caller sharing the registry
/// across threads serialises access via [`SharedRegistry`](crate::SharedRegistry).
#[derive(Debug)]
pub struct WorkerRegistry {
    config: RegistryConfig,
    workers: HashMap<ShardId, Worker>,
    pool: RotatingPool,
    host_pools: HashMap<String, RotatingPool>,
    in_initial_wait: bool,
    start_time: u64,
}

impl WorkerRegistry {
    /// Creates an empty registry. `start_time` (epoch seconds) anchors the
    /// initial-wait deadline.
    #[must_use]
    pub fn new(config: RegistryConfig, start_time: u64) -> Self {
        Self {
            config,
            workers: HashMap::new(),
            pool: RotatingPool::new("all workers"),
            host_pools: HashMap::new(),
            in_initial_wait: true,
            start_time,
        }
    }

    /// Ingests one worker heartbeat.
    ///
    /// Unseen shards are registered into the store, the global pool, and the
    /// pool of the reported host. Known shards on their recorded host get a
    /// liveness refresh, with the instance id deciding between a plain
    /// refresh, a restart reset, and a terminate directive for a stale
    /// duplicate process. A heartbeat claiming a different host than the one
    /// on record is flagged through `update` and otherwise ignored.
    ///
    /// Returns the directive the worker should act on; `None` when no
    /// instruction is warranted.
    pub fn process_heartbeat(
        &mut self,
        update: &mut UpdateBatch,
        msg: &WorkerHeartbeat,
    ) -> Option<HeartbeatDirective> {
        let ack = if msg.config_version < self.config.config_version {
            HeartbeatDirective::StaleConfig
        } else {
            HeartbeatDirective::Acknowledge
        };

        let directive = match self.workers.entry(msg.shard.clone()) {
            Entry::Vacant(entry) => {
                info!(shard = %msg.shard, hostname = %msg.hostname, "worker registered");
                entry.insert(Worker::from_heartbeat(msg, update.now()));
                self.pool.insert(msg.shard.clone());
                Self::host_pool_entry(&mut self.host_pools, &msg.hostname)
                    .insert(msg.shard.clone());
                Some(ack)
            }
            Entry::Occupied(mut entry) => {
                let worker = entry.get_mut();
                if worker.hostname != msg.hostname {
                    warn!(
                        shard = %msg.shard,
                        recorded_host = %worker.hostname,
                        reported_host = %msg.hostname,
                        "heartbeat host mismatch, keeping recorded host"
                    );
                    update.push(RegistryEvent::HostMismatch {
                        shard: msg.shard.clone(),
                        recorded_host: worker.hostname.clone(),
                        reported_host: msg.hostname.clone(),
                    });
                    None
                } else if msg.instance_id < worker.instance_id {
                    // A process from before the shard's last restart.
                    warn!(
                        shard = %msg.shard,
                        instance_id = msg.instance_id,
                        current_instance_id = worker.instance_id,
                        "heartbeat from stale worker instance"
                    );
                    Some(HeartbeatDirective::TerminateSelf)
                } else {
                    if msg.instance_id > worker.instance_id {
                        info!(
                            shard = %msg.shard,
                            instance_id = msg.instance_id,
                            "worker process restarted"
                        );
                        worker.reset_instance(msg.instance_id, update.now());
                    } else {
                        worker.record_heartbeat(update.now());
                    }
                    Some(ack)
                }
            }
        };

        self.check_initial_wait(update);
        directive
    }

    /// Sweeps all workers for staleness and advances the initial-wait
    /// machine.
    ///
    /// Workers silent past the suspect timeout become `Suspect`; past the
    /// lost timeout they become `Lost` and a [`RegistryEvent::WorkerLost`]
    /// is appended, once per loss. Nothing is evicted here; reclamation is
    /// the caller's call via [`evict`](Self::evict).
    pub fn update_state(&mut self, update: &mut UpdateBatch) {
        let now = update.now();
        let suspect_after = self.config.suspect_timeout.as_secs();
        let lost_after = self.config.lost_timeout.as_secs();

        for worker in self.workers.values_mut() {
            let silence = now.saturating_sub(worker.last_heartbeat);
            if silence > lost_after {
                if worker.state != WorkerState::Lost {
                    warn!(shard = %worker.shard, silence_secs = silence, "worker lost");
                    worker.mark_lost();
                    update.push(RegistryEvent::WorkerLost {
                        shard: worker.shard.clone(),
                    });
                }
            } else if silence > suspect_after
                && matches!(worker.state, WorkerState::New | WorkerState::Healthy)
            {
                worker.mark_suspect();
            }
        }

        self.check_initial_wait(update);
    }

    /// Records ground truth about the tasks `shard` is already executing.
    ///
    /// Replaces the worker's recorded running-task set; repeated calls
    /// overwrite. The shard must already be known from a processed
    /// heartbeat.
    ///
    /// # Panics
    ///
    /// Panics if `shard` is unknown; reporting tasks for a worker that never
    /// heartbeated is an internal invariant violation.
    pub fn initialize_running_tasks<I>(&mut self, shard: &str, task_ids: I)
    where
        I: IntoIterator<Item = TaskId>,
    {
        let worker = self
            .workers
            .get_mut(shard)
            .unwrap_or_else(|| panic!("unknown worker: {shard}"));
        worker.set_running_tasks(task_ids);
    }

    /// Looks up a worker the registry is known to contain.
    ///
    /// # Panics
    ///
    /// Panics if `shard` is unknown. Reserved for call sites where absence
    /// is an internal invariant violation, such as resolving a shard the
    /// rotation pool just returned.
    #[must_use]
    pub fn require_worker(&self, shard: &str) -> &Worker {
        self.workers
            .get(shard)
            .unwrap_or_else(|| panic!("unknown worker: {shard}"))
    }

    /// Looks up a worker, failing recoverably when the shard is unknown.
    /// For call sites driven by external, potentially-stale input.
    pub fn worker(&self, shard: &str) -> Result<&Worker> {
        self.workers
            .get(shard)
            .ok_or_else(|| RegistryError::UnknownWorker(shard.to_owned()))
    }

    /// Looks up a worker where absence is an expected outcome.
    #[must_use]
    pub fn find_worker(&self, shard: &str) -> Option<&Worker> {
        self.workers.get(shard)
    }

    /// Selects the next worker in global rotation, or `None` when no worker
    /// is known.
    pub fn next_worker(&mut self) -> Option<&Worker> {
        let shard = self.pool.next_shard()?.to_owned();
        Some(self.require_worker(&shard))
    }

    /// Selects the next worker in rotation for `hostname`.
    ///
    /// A host with no workers yields an on-demand empty pool, and `None`;
    /// never an error.
    pub fn next_worker_for_host(&mut self, hostname: &str) -> Option<&Worker> {
        let shard = Self::host_pool_entry(&mut self.host_pools, hostname)
            .next_shard()?
            .to_owned();
        Some(self.require_worker(&shard))
    }

    /// Iterates over every known worker. Does not touch any rotation cursor.
    pub fn all_workers(&self) -> impl Iterator<Item = &Worker> {
        self.workers.values()
    }

    /// Iterates over the workers recorded on `hostname`. Does not touch any
    /// rotation cursor.
    pub fn all_workers_for_host<'a>(&'a self, hostname: &str) -> impl Iterator<Item = &'a Worker> + 'a {
        self.host_pools
            .get(hostname)
            .into_iter()
            .flat_map(|pool| pool.members())
            .map(move |shard| self.require_worker(shard))
    }

    /// Removes a worker from the registry entirely, returning its record.
    ///
    /// The only operation that shrinks the pools; a host pool left empty is
    /// dropped.
    pub fn evict(&mut self, shard: &str) -> Result<Worker> {
        let worker = self
            .workers
            .remove(shard)
            .ok_or_else(|| RegistryError::UnknownWorker(shard.to_owned()))?;
        self.pool.remove(shard);
        if let Some(pool) = self.host_pools.get_mut(&worker.hostname) {
            pool.remove(shard);
            if pool.is_empty() {
                self.host_pools.remove(&worker.hostname);
            }
        }
        info!(shard = %shard, hostname = %worker.hostname, "worker evicted");
        Ok(worker)
    }

    /// Reports whether the registry is still inside its startup wait.
    #[must_use]
    pub const fn in_initial_wait(&self) -> bool {
        self.in_initial_wait
    }

    /// Number of known workers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.workers.len()
    }

    /// Returns true if no workers are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    /// One-way WAITING → ACTIVE transition, checked on every heartbeat and
    /// maintenance turn. While waiting, tasks may still be running on
    /// workers from before a scheduler restart; placement that assumes "not
    /// in my bookkeeping means not running" must hold off until the wait
    /// ends.
    fn check_initial_wait(&mut self, update: &mut UpdateBatch) {
        if !self.in_initial_wait {
            return;
        }
        let elapsed = update.now().saturating_sub(self.start_time);
        if elapsed > self.config.initial_wait.as_secs() {
            self.in_initial_wait = false;
            info!(elapsed_secs = elapsed, "initial wait ended, placement may begin");
            update.push(RegistryEvent::InitialWaitEnded);
        }
    }

    /// Host pools are created on first use so an unknown host reads as an
    /// empty pool rather than an error.
    fn host_pool_entry<'a>(
        host_pools: &'a mut HashMap<String, RotatingPool>,
        hostname: &str,
    ) -> &'a mut RotatingPool {
        host_pools
            .entry(hostname.to_owned())
            .or_insert_with(|| RotatingPool::new(format!("host {hostname}")))
    }
}
