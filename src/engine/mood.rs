//! Mood history - bounded, insertion-ordered emotion check-in container
//!
//! Holds the most recent check-ins up to a fixed capacity, evicting the
//! oldest inserted entry first. Queries are read-only; eviction never
//! depends on timestamps or placement.

use std::collections::VecDeque;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::placement::{Placement, Position};
use super::EngineError;
use crate::domain::EmotionKind;

pub const DEFAULT_CAPACITY: usize = 30;

/// A single recorded emotion check-in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodEntry {
    pub kind: EmotionKind,
    pub intensity: f32,
    pub timestamp: DateTime<Utc>,
    /// Cosmetic placement hint for the visualization layer.
    pub position: Position,
}

/// Bounded FIFO container of mood entries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodHistory {
    entries: VecDeque<MoodEntry>,
    capacity: usize,
}

impl Default for MoodHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl MoodHistory {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: DEFAULT_CAPACITY,
        }
    }

    /// Create a history with a custom capacity. Capacity must be at least 1.
    pub fn with_capacity(capacity: usize) -> Result<Self, EngineError> {
        if capacity < 1 {
            return Err(EngineError::InvalidCapacity(capacity));
        }
        Ok(Self {
            entries: VecDeque::new(),
            capacity,
        })
    }

    /// Rebuild a history from persisted entries (oldest first). Entries
    /// beyond capacity are dropped from the front, as `add` would have.
    pub fn restore(capacity: usize, entries: Vec<MoodEntry>) -> Result<Self, EngineError> {
        if capacity < 1 {
            return Err(EngineError::InvalidCapacity(capacity));
        }
        let mut entries: VecDeque<MoodEntry> = entries.into();
        while entries.len() > capacity {
            entries.pop_front();
        }
        Ok(Self { entries, capacity })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &MoodEntry> {
        self.entries.iter()
    }

    /// Append an entry, evicting the oldest one past capacity.
    pub fn add(
        &mut self,
        kind: EmotionKind,
        intensity: f32,
        timestamp: DateTime<Utc>,
        placement: &mut dyn Placement,
    ) -> MoodEntry {
        let entry = MoodEntry {
            kind,
            intensity,
            timestamp,
            position: placement.place(),
        };
        self.entries.push_back(entry.clone());
        if self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        entry
    }

    /// Kind of the most recently added entry.
    pub fn recent_kind(&self) -> Option<EmotionKind> {
        self.entries.back().map(|e| e.kind)
    }

    /// Kinds of the last `n` entries, oldest-first.
    pub fn trend(&self, n: usize) -> Vec<EmotionKind> {
        let skip = self.entries.len().saturating_sub(n);
        self.entries.iter().skip(skip).map(|e| e.kind).collect()
    }

    /// All entries of a given kind, in insertion order.
    pub fn by_kind(&self, kind: EmotionKind) -> Vec<&MoodEntry> {
        self.entries.iter().filter(|e| e.kind == kind).collect()
    }

    /// Drop entries whose timestamp is older than `now - days`.
    pub fn prune_older_than(&mut self, days: u32, now: DateTime<Utc>) {
        let cutoff = now - Duration::days(days as i64);
        self.entries.retain(|e| e.timestamp >= cutoff);
    }
}
