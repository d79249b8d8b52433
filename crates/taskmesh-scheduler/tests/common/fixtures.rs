//! Test fixtures for registry integration tests.

use taskmesh_proto::WorkerHeartbeat;

use super::TestRegistry;

/// Shorthand for a plain heartbeat.
pub fn heartbeat(shard: &str, hostname: &str) -> WorkerHeartbeat {
    WorkerHeartbeat::new(shard, hostname)
}

/// Registers a fleet of (shard, hostname) workers, one heartbeat each at
/// consecutive timestamps starting from `now`.
pub fn register_fleet(registry: &mut TestRegistry, now: u64, fleet: &[(&str, &str)]) {
    for (i, (shard, hostname)) in fleet.iter().enumerate() {
        let (directive, _) = registry.heartbeat_at(now + i as u64, &heartbeat(shard, hostname));
        assert!(directive.is_some(), "registration heartbeat for {shard}");
    }
}
