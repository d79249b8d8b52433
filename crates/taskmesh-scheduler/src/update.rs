//! Event accumulation for registry operations.

use crate::worker::ShardId;

/// Actionable events the registry emits for the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    /// A worker exceeded the lost timeout; its tasks need reassignment.
    WorkerLost {
        /// Shard of the lost worker.
        shard: ShardId,
    },
    /// A known shard heartbeated from a host other than its recorded one.
    /// The registry keeps the old record; remediation is caller policy.
    HostMismatch {
        /// Shard that heartbeated.
        shard: ShardId,
        /// Host the registry has on record.
        recorded_host: String,
        /// Host the heartbeat claimed.
        reported_host: String,
    },
    /// The startup wait is over; new placements may begin.
    InitialWaitEnded,
}

/// Output-only accumulator passed into registry operations.
///
/// Carries the wall-clock instant of the current logical turn, so the
/// registry evaluates deadlines rather than reading a clock itself, and
/// collects the events of that turn for the caller to drain.
#[derive(Debug)]
pub struct UpdateBatch {
    now: u64,
    events: Vec<RegistryEvent>,
}

impl UpdateBatch {
    /// Creates an empty batch for a turn happening at `now` (epoch seconds).
    #[must_use]
    pub const fn new(now: u64) -> Self {
        Self {
            now,
            events: Vec::new(),
        }
    }

    /// The instant this batch was opened at.
    #[must_use]
    pub const fn now(&self) -> u64 {
        self.now
    }

    pub(crate) fn push(&mut self, event: RegistryEvent) {
        self.events.push(event);
    }

    /// The events collected so far.
    pub fn events(&self) -> &[RegistryEvent] {
        &self.events
    }

    /// Takes the collected events, leaving the batch empty for reuse.
    pub fn drain(&mut self) -> Vec<RegistryEvent> {
        std::mem::take(&mut self.events)
    }

    /// Returns true if no events were collected.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of collected events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_and_drains() {
        let mut batch = UpdateBatch::new(1000);
        assert_eq!(batch.now(), 1000);
        assert!(batch.is_empty());

        batch.push(RegistryEvent::InitialWaitEnded);
        batch.push(RegistryEvent::WorkerLost {
            shard: "w1".to_string(),
        });
        assert_eq!(batch.len(), 2);

        let events = batch.drain();
        assert_eq!(events.len(), 2);
        assert!(batch.is_empty());
    }
}
