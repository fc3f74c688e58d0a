//! Leak records and their tag state.
//!
//! A leak is tagged at most once.  `TagState` makes the stamp (date,
//! company, crew) part of the `Tagged` variant so an untagged leak can never
//! carry a stale stamp, and [`TagState::tag`] is the only way to move
//! between the two states.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use ldar_core::{CrewId, LeakId, SiteId};

/// Whether the leak is still emitting.  Repair is an external process; the
/// engine only reads this.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeakStatus {
    Active,
    Repaired,
}

/// Who found the leak, and when.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TagRecord {
    pub date:          NaiveDate,
    pub company:       String,
    pub crew:          CrewId,
    /// Rate reported by the detecting sensor, g/s.
    pub measured_rate: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum TagState {
    Untagged,
    Tagged(TagRecord),
}

impl TagState {
    pub fn is_tagged(&self) -> bool {
        matches!(self, TagState::Tagged(_))
    }

    pub fn record(&self) -> Option<&TagRecord> {
        match self {
            TagState::Tagged(r) => Some(r),
            TagState::Untagged  => None,
        }
    }

    /// Perform the `untagged → tagged` transition.
    ///
    /// Returns `true` if this call tagged the leak, `false` (leaving the
    /// existing record untouched) if it was already tagged.
    pub fn tag(&mut self, record: TagRecord) -> bool {
        match self {
            TagState::Tagged(_) => false,
            TagState::Untagged => {
                *self = TagState::Tagged(record);
                true
            }
        }
    }
}

/// One physical emission point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Leak {
    pub id:              LeakId,
    pub site:            SiteId,
    /// Index of the equipment group the leak belongs to.
    pub equipment_group: u32,
    /// True emission rate, g/s.
    pub rate:            f64,
    pub status:          LeakStatus,
    pub tag:             TagState,
}

impl Leak {
    pub fn new(id: LeakId, site: SiteId, equipment_group: u32, rate: f64) -> Self {
        Self {
            id,
            site,
            equipment_group,
            rate,
            status: LeakStatus::Active,
            tag:    TagState::Untagged,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == LeakStatus::Active
    }

    #[inline]
    pub fn is_tagged(&self) -> bool {
        self.tag.is_tagged()
    }
}
