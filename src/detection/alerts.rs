//! Bounded, newest-first alert log

use std::collections::VecDeque;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single triggered alert. Never rewritten after insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertEntry {
    /// Stable identifier for downstream consumers.
    pub id: Uuid,
    /// Wall-clock insertion time.
    pub timestamp: DateTime<Utc>,
    /// Human-readable alert text.
    pub message: String,
}

impl fmt::Display for AlertEntry {
    /// Dashboard line format: `[HH:MM:SS] message`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.timestamp.format("%H:%M:%S"), self.message)
    }
}

/// Time-ordered record of triggered alerts, newest first.
///
/// Append-only from the engine side; the only removal is capacity eviction
/// from the tail. A condition that persists across ticks produces one
/// entry per tick, so the log reads as a pulse of the ongoing situation.
#[derive(Debug, Clone)]
pub struct AlertLog {
    entries: VecDeque<AlertEntry>,
    capacity: usize,
}

impl AlertLog {
    /// An empty log retaining at most `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Insert at the head, evicting the oldest entry once the log grows
    /// past capacity. Returns the inserted entry.
    pub fn append(&mut self, message: impl Into<String>) -> AlertEntry {
        let entry = AlertEntry {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            message: message.into(),
        };
        self.entries.push_front(entry.clone());
        self.entries.truncate(self.capacity);
        entry
    }

    /// All retained entries, newest first.
    pub fn snapshot(&self) -> Vec<AlertEntry> {
        self.entries.iter().cloned().collect()
    }

    /// The most recent entry, if any.
    pub fn latest(&self) -> Option<&AlertEntry> {
        self.entries.front()
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been logged yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of retained entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
