//! Common test utilities for registry integration tests.

pub mod fixtures;

use std::time::Duration;

use taskmesh_proto::{HeartbeatDirective, WorkerHeartbeat};
use taskmesh_scheduler::{RegistryConfig, RegistryEvent, UpdateBatch, WorkerRegistry};

/// Registry under test, with wrappers that open a fresh [`UpdateBatch`] per
/// logical turn and hand back the events it collected.
pub struct TestRegistry {
    pub registry: WorkerRegistry,
}

impl TestRegistry {
    /// Creates a registry with default configuration, constructed at
    /// `start_time`.
    pub fn new(start_time: u64) -> Self {
        Self::with_config(RegistryConfig::default(), start_time)
    }

    /// Creates a registry with custom configuration.
    pub fn with_config(config: RegistryConfig, start_time: u64) -> Self {
        Self {
            registry: WorkerRegistry::new(config, start_time),
        }
    }

    /// Creates a registry with a specific initial-wait duration.
    pub fn with_wait(wait_secs: u64, start_time: u64) -> Self {
        let config = RegistryConfig {
            initial_wait: Duration::from_secs(wait_secs),
            ..RegistryConfig::default()
        };
        Self::with_config(config, start_time)
    }

    /// Processes one heartbeat at `now`.
    pub fn heartbeat_at(
        &mut self,
        now: u64,
        msg: &WorkerHeartbeat,
    ) -> (Option<HeartbeatDirective>, Vec<RegistryEvent>) {
        let mut update = UpdateBatch::new(now);
        let directive = self.registry.process_heartbeat(&mut update, msg);
        (directive, update.drain())
    }

    /// Runs one maintenance sweep at `now`.
    pub fn tick(&mut self, now: u64) -> Vec<RegistryEvent> {
        let mut update = UpdateBatch::new(now);
        self.registry.update_state(&mut update);
        update.drain()
    }
}
