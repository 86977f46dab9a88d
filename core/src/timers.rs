//! Timer Bag
//!
//! Owned collection of every unit of work an animator has scheduled,
//! keyed by identity. A unit removes its own entry when it fires; a unit
//! whose entry is already gone has been cancelled and must not run.

use std::collections::HashMap;
use std::fmt;

use tokio::task::JoinHandle;

/// Identity of one scheduled unit of work
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer-{}", self.0)
    }
}

/// Pending scheduled work, cancellable as a whole
#[derive(Debug, Default)]
pub struct TimerBag {
    next_id: u64,
    pending: HashMap<TimerId, JoinHandle<()>>,
}

impl TimerBag {
    /// Create an empty bag
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the identity for the next unit of work
    pub fn reserve(&mut self) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Track a spawned unit under a reserved identity
    pub fn insert(&mut self, id: TimerId, handle: JoinHandle<()>) {
        self.pending.insert(id, handle);
    }

    /// Claim the entry for a unit that is firing
    ///
    /// Returns `false` if the unit was cancelled and must not run.
    pub fn complete(&mut self, id: TimerId) -> bool {
        self.pending.remove(&id).is_some()
    }

    /// Abort and forget every pending unit, returning how many there were
    pub fn cancel_all(&mut self) -> usize {
        let count = self.pending.len();
        for (_, handle) in self.pending.drain() {
            handle.abort();
        }
        count
    }

    /// Number of pending units
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is pending
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Drop for TimerBag {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
