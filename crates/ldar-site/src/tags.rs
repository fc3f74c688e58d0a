//! The global list of tags pending repair.
//!
//! Crews append here when a leak transitions to tagged; the external repair
//! process drains it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use ldar_core::{CrewId, LeakId, SiteId};

/// One newly tagged leak awaiting repair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TagEntry {
    pub site:    SiteId,
    pub leak:    LeakId,
    pub date:    NaiveDate,
    pub company: String,
    pub crew:    CrewId,
}

#[derive(Clone, Debug, Default)]
pub struct TagQueue {
    entries: Vec<TagEntry>,
}

impl TagQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: TagEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[TagEntry] {
        &self.entries
    }

    /// Remove and return every pending tag (hand-off to repair).
    pub fn drain(&mut self) -> Vec<TagEntry> {
        std::mem::take(&mut self.entries)
    }
}
