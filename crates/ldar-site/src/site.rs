//! Facilities and the per-company counters they carry.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use ldar_core::{GeoPoint, SiteId, Timestep};

use crate::Leak;

/// Running counters one company keeps on one site.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteCounters {
    /// Surveys completed over the whole run.
    pub surveys_conducted:      u32,
    /// Surveys completed since 1 January.
    pub surveys_done_this_year: u32,
    /// Timestep of the most recent survey, if any.
    pub last_survey:            Option<Timestep>,
    /// Leaks this company failed to detect on visits to this site.
    pub missed_leaks:           u64,
    /// Site-specific survey duration overriding the company default, minutes.
    pub survey_mins:            Option<f64>,
}

impl SiteCounters {
    /// Timesteps since the most recent survey, or `None` if never surveyed.
    pub fn t_since_last_survey(&self, now: Timestep) -> Option<u64> {
        self.last_survey.map(|t| now.since(t))
    }

    /// Record a completed survey at `now`.
    pub fn record_survey(&mut self, now: Timestep) {
        self.surveys_conducted += 1;
        self.surveys_done_this_year += 1;
        self.last_survey = Some(now);
    }
}

/// A monitored facility.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub id:                SiteId,
    pub facility_id:       String,
    pub location:          GeoPoint,
    /// Number of equipment groups leaks are aggregated into (≥ 1).
    pub equipment_groups:  u32,
    /// Number of fixed sensors installed (fixed deployments only).
    pub fixed_sensors:     u32,
    /// Currently flagged for follow-up.
    pub currently_flagged: bool,
    /// Leak count at initialization, used by the operator pathway.
    pub initial_leaks:     u32,
    pub leaks:             Vec<Leak>,
    counters:              BTreeMap<String, SiteCounters>,
}

impl Site {
    pub fn new(id: SiteId, facility_id: impl Into<String>, location: GeoPoint, equipment_groups: u32) -> Self {
        Self {
            id,
            facility_id: facility_id.into(),
            location,
            equipment_groups,
            fixed_sensors: 0,
            currently_flagged: false,
            initial_leaks: 0,
            leaks: Vec::new(),
            counters: BTreeMap::new(),
        }
    }

    /// Counters for company `label`, if that company has touched the site.
    pub fn counters(&self, label: &str) -> Option<&SiteCounters> {
        self.counters.get(label)
    }

    /// Counters for company `label`, created on first use.
    pub fn counters_mut(&mut self, label: &str) -> &mut SiteCounters {
        self.counters.entry(label.to_owned()).or_default()
    }

    /// Number of leaks still emitting.
    pub fn active_leak_count(&self) -> usize {
        self.leaks.iter().filter(|l| l.is_active()).count()
    }

    /// Reset every company's yearly survey count (called on 1 January).
    pub fn reset_yearly_counters(&mut self) {
        for c in self.counters.values_mut() {
            c.surveys_done_this_year = 0;
        }
    }
}
