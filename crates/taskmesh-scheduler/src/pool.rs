//! Rotating shard pool with a fairness cursor.

use std::collections::BTreeSet;
use std::ops::Bound;

use crate::worker::ShardId;

/// Ordered membership set of shard ids with a round-robin cursor.
///
/// The pool is a secondary index: it holds shard ids only, and callers
/// resolve them against the registry's owning worker store. The cursor
/// remembers the last shard handed out and is allowed to point at a shard
/// that has since been removed; selection then restarts cleanly instead of
/// faulting.
#[derive(Debug)]
pub struct RotatingPool {
    /// Pool name, for log messages only.
    name: String,
    members: BTreeSet<ShardId>,
    cursor: Option<ShardId>,
}

impl RotatingPool {
    /// Creates an empty pool. `name` appears in log output.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: BTreeSet::new(),
            cursor: None,
        }
    }

    /// Adds a shard to the pool. Re-inserting a member is a no-op.
    pub fn insert(&mut self, shard: impl Into<ShardId>) {
        self.members.insert(shard.into());
    }

    /// Removes a shard, returning whether it was a member.
    ///
    /// Removing the currently-cursored shard is legal; the next selection
    /// restarts from an arbitrary member.
    pub fn remove(&mut self, shard: &str) -> bool {
        self.members.remove(shard)
    }

    /// Returns whether `shard` is a member.
    pub fn contains(&self, shard: &str) -> bool {
        self.members.contains(shard)
    }

    /// Returns the number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if the pool has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Selects the next shard in rotation and advances the cursor.
    ///
    /// Picks the member immediately after the cursor in set order, wrapping
    /// to the first member past the end. An unset cursor, or one whose shard
    /// left the pool, degrades to a fresh restart point. Returns `None` only
    /// when the pool is empty.
    pub fn next_shard(&mut self) -> Option<&str> {
        if self.members.is_empty() {
            return None;
        }
        let selected = match self.cursor.as_deref() {
            Some(cursor) => {
                if !self.members.contains(cursor) {
                    tracing::debug!(pool = %self.name, "cursor left the pool, restarting rotation");
                }
                self.members
                    .range::<str, _>((Bound::Excluded(cursor), Bound::Unbounded))
                    .next()
                    .or_else(|| self.members.iter().next())
            }
            None => self.members.iter().next(),
        }
        .cloned();
        self.cursor = selected;
        self.cursor.as_deref()
    }

    /// Read-only view of the membership, independent of the cursor.
    pub fn members(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(String::as_str)
    }
}
