//! The mobile-crew visit scheduler.
//!
//! One `MobileSchedule` per crew.  It owns the crew's position and the
//! intraday clock; the crew drives it through the day:
//!
//! ```text
//! start_day → { plan_visit* → choose_site → update_schedule }* → end_day
//!                                        ↘ choose_accommodation
//! ```

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tracing::trace;

use ldar_core::{GeoPoint, SimRng, WeatherProvider};
use ldar_site::Site;

use crate::{
    DeploymentWindow, HomeBase, ScheduleError, ScheduleResult, TravelTime, VisitPlan,
    WeatherEnvelope,
};

/// Company-level scheduling parameters shared by all of its crews.
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduleSettings {
    /// Length of the working day, hours, in (0, 24].
    pub max_workday:    f64,
    /// Pick the nearest startable site instead of the first in pool order.
    pub route_planning: bool,
    pub window:         DeploymentWindow,
    pub envelope:       WeatherEnvelope,
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            max_workday:    8.0,
            route_planning: false,
            window:         DeploymentWindow::always(),
            envelope:       WeatherEnvelope::default(),
        }
    }
}

pub struct MobileSchedule {
    start_hour:     f64,
    end_hour:       f64,
    route_planning: bool,
    window:         DeploymentWindow,
    envelope:       WeatherEnvelope,
    travel:         Arc<dyn TravelTime>,
    home_bases:     Arc<[HomeBase]>,
    location:       GeoPoint,
    /// Set by `start_day`, cleared by `end_day`.
    day:            Option<NaiveDate>,
    elapsed_mins:   f64,
}

impl MobileSchedule {
    pub fn new(
        settings:   &ScheduleSettings,
        travel:     Arc<dyn TravelTime>,
        home_bases: Arc<[HomeBase]>,
        location:   GeoPoint,
    ) -> ScheduleResult<Self> {
        let w = settings.max_workday;
        if !(w > 0.0 && w <= 24.0) {
            return Err(ScheduleError::Config(format!("max_workday must be in (0, 24], got {w}")));
        }
        let start_hour = (24.0 - w) / 2.0;
        Ok(Self {
            start_hour,
            end_hour: start_hour + w,
            route_planning: settings.route_planning,
            window: settings.window.clone(),
            envelope: settings.envelope.clone(),
            travel,
            home_bases,
            location,
            day: None,
            elapsed_mins: 0.0,
        })
    }

    // ── Intraday clock ────────────────────────────────────────────────────

    pub fn start_hour(&self) -> f64 {
        self.start_hour
    }

    pub fn end_hour(&self) -> f64 {
        self.end_hour
    }

    /// Minutes in a full working day.
    pub fn budget_mins(&self) -> f64 {
        (self.end_hour - self.start_hour) * 60.0
    }

    pub fn elapsed_mins(&self) -> f64 {
        self.elapsed_mins
    }

    pub fn mins_left(&self) -> f64 {
        self.budget_mins() - self.elapsed_mins
    }

    /// Fractional hour of day on the crew's clock.
    pub fn current_hour(&self) -> f64 {
        self.start_hour + self.elapsed_mins / 60.0
    }

    pub fn within_workday(&self) -> bool {
        self.current_hour() < self.end_hour
    }

    /// Wall-clock time on the crew's clock, `None` outside a started day.
    pub fn current_time(&self) -> Option<NaiveDateTime> {
        let secs = (self.current_hour() * 3_600.0).round() as i64;
        self.day?
            .and_time(NaiveTime::MIN)
            .checked_add_signed(chrono::Duration::seconds(secs))
    }

    /// Reset the day's elapsed minutes.  Call once before any planning.
    pub fn start_day(&mut self, date: NaiveDate) {
        self.day = Some(date);
        self.elapsed_mins = 0.0;
    }

    /// Commit `mins` of travel and work.
    pub fn update_schedule(&mut self, mins: f64) {
        self.elapsed_mins += mins.max(0.0);
    }

    /// Close the day and return the minutes worked.
    pub fn end_day(&mut self) -> f64 {
        self.day = None;
        self.elapsed_mins
    }

    // ── Position ──────────────────────────────────────────────────────────

    pub fn location(&self) -> GeoPoint {
        self.location
    }

    pub fn set_location(&mut self, location: GeoPoint) {
        self.location = location;
    }

    pub fn home_bases(&self) -> &[HomeBase] {
        &self.home_bases
    }

    // ── Planning ──────────────────────────────────────────────────────────

    /// Plan a visit to `site` that needs `need_mins` of survey work.
    ///
    /// Returns `None` when the site cannot be reached today: no day has
    /// been started, the date is outside the deployment window, or the
    /// weather at the site is outside the envelope.  Draws travel time from
    /// `rng` but never moves the crew or its clock.
    pub fn plan_visit(
        &self,
        site:      &Site,
        need_mins: f64,
        weather:   &dyn WeatherProvider,
        rng:       &mut SimRng,
    ) -> Option<VisitPlan> {
        let day = self.day?;
        if !self.window.contains(day) {
            return None;
        }
        if !self.envelope.is_unbounded() && !self.envelope.permits(weather, day, site.location) {
            return None;
        }

        let travel_mins = self.travel.minutes(self.location, site.location, rng);
        let work_mins = self.mins_left() - travel_mins;
        let need_mins = need_mins.max(0.0);

        let plan = if need_mins <= work_mins {
            VisitPlan {
                site:           site.id,
                travel_mins,
                remaining_mins: 0.0,
                total_mins:     travel_mins + need_mins,
                rollover:       false,
                startable:      true,
            }
        } else {
            let done = work_mins.max(0.0);
            VisitPlan {
                site:           site.id,
                travel_mins,
                remaining_mins: need_mins - done,
                total_mins:     travel_mins + done,
                rollover:       true,
                startable:      work_mins > 0.0,
            }
        };
        Some(plan)
    }

    /// Pick the next stop among `plans`.
    ///
    /// Only startable plans qualify.  With route planning the nearest (least
    /// travel) wins; otherwise the first in input order.  Ties keep input
    /// order.
    pub fn choose_site<'p>(&self, plans: &'p [VisitPlan]) -> Option<&'p VisitPlan> {
        let mut startable = plans.iter().filter(|p| p.startable);
        if self.route_planning {
            startable.min_by(|a, b| a.travel_mins.total_cmp(&b.travel_mins))
        } else {
            startable.next()
        }
    }

    /// Move the crew to the home base minimising the distance from its
    /// current position plus, when given, the distance on to `toward`.
    ///
    /// Without home bases the crew stays where it is and `None` is returned.
    pub fn choose_accommodation(&mut self, toward: Option<GeoPoint>) -> Option<&HomeBase> {
        let here = self.location;
        let cost = |b: &HomeBase| {
            here.distance_km(b.location()) + toward.map_or(0.0, |t| b.location().distance_km(t))
        };
        let best = self
            .home_bases
            .iter()
            .min_by(|a, b| cost(a).total_cmp(&cost(b)))?;
        self.location = best.location();
        trace!(base = %best.name, location = %self.location, "accommodation chosen");
        Some(best)
    }
}

impl std::fmt::Debug for MobileSchedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MobileSchedule")
            .field("start_hour", &self.start_hour)
            .field("end_hour", &self.end_hour)
            .field("location", &self.location)
            .field("day", &self.day)
            .field("elapsed_mins", &self.elapsed_mins)
            .finish_non_exhaustive()
    }
}
