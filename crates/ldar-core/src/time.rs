//! Simulation time model.
//!
//! # Design
//!
//! The run advances in whole days.  The canonical time unit is the integer
//! `Timestep` (day index since the start date); `SimClock` maps it to a
//! calendar date:
//!
//!   current_date = start_date + timestep days
//!
//! Using an integer timestep as the index into every counter series means
//! per-day accounting is exact and comparisons are O(1).  Intraday time
//! (a crew's hour of work) is tracked by the crew's scheduler, not by the
//! global clock; the clock's `hour` is whatever the external driver sets.

use std::fmt;

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};

// ── Timestep ──────────────────────────────────────────────────────────────────

/// An absolute simulation day counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestep(pub u64);

impl Timestep {
    pub const ZERO: Timestep = Timestep(0);

    /// Cast to `usize` for indexing a counter series.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Timesteps elapsed from `earlier` to `self` (saturating at zero).
    #[inline]
    pub fn since(self, earlier: Timestep) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Timestep {
    type Output = Timestep;
    #[inline]
    fn add(self, rhs: u64) -> Timestep {
        Timestep(self.0 + rhs)
    }
}

impl fmt::Display for Timestep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The global day clock: current date, timestep index and hour of day.
///
/// The external driver owns the clock and calls [`SimClock::advance`] once
/// per simulated day after every company has worked.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Calendar date of timestep 0.
    pub start_date: NaiveDate,
    /// The current timestep.
    pub current_timestep: Timestep,
    current_date: NaiveDate,
    hour: u32,
}

impl SimClock {
    /// Create a clock at timestep 0, midnight of `start_date`.
    pub fn new(start_date: NaiveDate) -> Self {
        Self {
            start_date,
            current_timestep: Timestep::ZERO,
            current_date: start_date,
            hour: 0,
        }
    }

    /// Advance to midnight of the next day.
    pub fn advance(&mut self) {
        self.current_timestep = self.current_timestep + 1;
        self.current_date = self
            .current_date
            .checked_add_days(Days::new(1))
            .unwrap_or(self.current_date);
        self.hour = 0;
    }

    /// Set the hour of day reported by [`SimClock::hour`] (clamped to 0–23).
    pub fn set_hour(&mut self, hour: u32) {
        self.hour = hour.min(23);
    }

    #[inline]
    pub fn current_date(&self) -> NaiveDate {
        self.current_date
    }

    /// Current date at the current hour.
    pub fn current_datetime(&self) -> NaiveDateTime {
        let time = NaiveTime::from_hms_opt(self.hour, 0, 0).unwrap_or_default();
        self.current_date.and_time(time)
    }

    #[inline]
    pub fn hour(&self) -> u32 {
        self.hour
    }

    #[inline]
    pub fn year(&self) -> i32 {
        self.current_date.year()
    }

    #[inline]
    pub fn month(&self) -> u32 {
        self.current_date.month()
    }

    /// `true` on 1 January, when yearly survey counters roll over.
    pub fn is_new_year(&self) -> bool {
        self.current_date.ordinal() == 1
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {:02}:00)", self.current_timestep, self.current_date, self.hour)
    }
}
