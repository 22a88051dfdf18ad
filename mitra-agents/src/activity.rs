//! Append-only log of routed events

use mitra_core::{AgentResponse, Timestamp};
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// One successful dispatch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityEntry {
    pub timestamp: Timestamp,
    pub agent: String,
    pub response: AgentResponse,
}

/// Activity log shared by concurrent requests.
///
/// Appends are serialized through a mutex so entries stay in arrival order.
/// With a capacity set, the oldest entries are evicted first.
#[derive(Debug, Default)]
pub struct ActivityLog {
    entries: Mutex<VecDeque<ActivityEntry>>,
    capacity: Option<usize>,
}

impl ActivityLog {
    /// Unbounded log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Log that keeps at most `capacity` entries.
    pub fn bounded(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity: Some(capacity),
        }
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    // Every critical section leaves the queue consistent; poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, VecDeque<ActivityEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn append(&self, entry: ActivityEntry) {
        let mut entries = self.lock();
        if let Some(capacity) = self.capacity {
            if capacity == 0 {
                return;
            }
            while entries.len() >= capacity {
                entries.pop_front();
            }
        }
        entries.push_back(entry);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy of the current entries, oldest first.
    pub fn snapshot(&self) -> Vec<ActivityEntry> {
        self.lock().iter().cloned().collect()
    }
}
