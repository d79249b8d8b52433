//! Shared ownership wrapper serialising registry access.

use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;

use crate::registry::WorkerRegistry;

/// Single-owner execution unit for a registry shared across threads.
///
/// [`WorkerRegistry`] methods take `&mut self` and the type holds no locks
/// of its own; this wrapper is the one place a lock exists. The guard
/// returned by [`lock`](Self::lock) is the exclusive-access token for one
/// logical turn (one heartbeat, one maintenance tick, one placement
/// decision), keeping all synchronisation at a single coarse boundary.
#[derive(Debug, Clone)]
pub struct SharedRegistry {
    inner: Arc<Mutex<WorkerRegistry>>,
}

impl SharedRegistry {
    /// Wraps a registry for shared use.
    #[must_use]
    pub fn new(registry: WorkerRegistry) -> Self {
        Self {
            inner: Arc::new(Mutex::new(registry)),
        }
    }

    /// Acquires exclusive access for one logical turn.
    pub fn lock(&self) -> MutexGuard<'_, WorkerRegistry> {
        self.inner.lock()
    }
}
