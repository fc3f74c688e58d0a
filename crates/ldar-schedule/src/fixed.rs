//! Fixed deployments: one sensor bound to one site.

use ldar_core::{SiteId, Timestep};

use crate::{ScheduleError, ScheduleResult};

/// Cadence of a fixed sensor.  There is no travel, no time budget and no
/// rollover; the sensor measures its site whenever it is due.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedSchedule {
    site:          SiteId,
    interval_days: u64,
    last:          Option<Timestep>,
}

impl FixedSchedule {
    pub fn new(site: SiteId, interval_days: u64) -> ScheduleResult<Self> {
        if interval_days == 0 {
            return Err(ScheduleError::Config("measurement_interval_days must be at least 1".into()));
        }
        Ok(Self { site, interval_days, last: None })
    }

    #[inline]
    pub fn site(&self) -> SiteId {
        self.site
    }

    pub fn interval_days(&self) -> u64 {
        self.interval_days
    }

    /// A sensor that has never measured is always due.
    pub fn is_due(&self, now: Timestep) -> bool {
        self.last.is_none_or(|last| now.since(last) >= self.interval_days)
    }

    pub fn record(&mut self, now: Timestep) {
        self.last = Some(now);
    }
}
