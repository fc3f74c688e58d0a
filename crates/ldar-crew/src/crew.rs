//! A crew and the day it works.
//!
//! # Day state machine
//!
//! ```text
//! Idle → DayStarted → (RolloverHandling) → SiteSelection ⇄ Visiting → DayEnded
//! ```
//!
//! A mobile crew first finishes yesterday's rollover site, if any.  It then
//! repeatedly plans every eligible site, visits the one the scheduler picks,
//! and stops when the working day is over, when a visit leaves a site
//! incomplete (the site becomes tomorrow's rollover), or when nothing can
//! be started.  Nothing is dispatched once the driver's clock has reached the
//! crew's end-of-day hour.  A fixed crew measures its one site when its
//! cadence is due.

use chrono::NaiveDateTime;
use rustc_hash::FxHashSet;
use tracing::debug;

use ldar_core::{CrewId, Metric, SiteId};
use ldar_detect::{DetectEnv, Sensor, SiteDetectionReport};
use ldar_schedule::{FixedSchedule, MobileSchedule, VisitPlan};
use ldar_site::{Aggregator, Site};

use crate::{CompanyConfig, CrewHooks, DayContext};

/// What a crew borrows from its company for one day.
#[derive(Copy, Clone)]
pub struct CompanyView<'a> {
    pub config:     &'a CompanyConfig,
    pub sensor:     &'a dyn Sensor,
    pub aggregator: &'a dyn Aggregator,
    pub hooks:      &'a dyn CrewHooks,
}

/// A partially surveyed site carried into the next day.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rollover {
    pub site:           SiteId,
    pub remaining_mins: f64,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum DayPhase {
    #[default]
    Idle,
    DayStarted,
    RolloverHandling,
    SiteSelection,
    Visiting,
    DayEnded,
}

pub enum CrewKind {
    Mobile {
        schedule: MobileSchedule,
        /// At most one site.
        rollover: Option<Rollover>,
    },
    Fixed {
        schedule: FixedSchedule,
    },
}

/// Summary of one crew day.
#[derive(Clone, Debug, PartialEq)]
pub struct CrewDay {
    pub crew:            CrewId,
    pub worked:          bool,
    pub sites_visited:   u32,
    /// Minutes of travel and work, mobile crews only.
    pub minutes:         f64,
    pub cost:            f64,
    /// Reports from site- and equipment-scale visits, candidates for flagging.
    pub candidate_flags: Vec<SiteDetectionReport>,
}

impl CrewDay {
    fn new(crew: CrewId) -> Self {
        Self {
            crew,
            worked: false,
            sites_visited: 0,
            minutes: 0.0,
            cost: 0.0,
            candidate_flags: Vec::new(),
        }
    }
}

pub struct Crew {
    id:           CrewId,
    name:         String,
    kind:         CrewKind,
    phase:        DayPhase,
    worked_today: bool,
}

impl Crew {
    pub fn mobile(id: CrewId, name: impl Into<String>, schedule: MobileSchedule) -> Self {
        Self::with_kind(id, name.into(), CrewKind::Mobile { schedule, rollover: None })
    }

    pub fn fixed(id: CrewId, name: impl Into<String>, schedule: FixedSchedule) -> Self {
        Self::with_kind(id, name.into(), CrewKind::Fixed { schedule })
    }

    fn with_kind(id: CrewId, name: String, kind: CrewKind) -> Self {
        Self { id, name, kind, phase: DayPhase::Idle, worked_today: false }
    }

    pub fn id(&self) -> CrewId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &CrewKind {
        &self.kind
    }

    pub fn phase(&self) -> DayPhase {
        self.phase
    }

    pub fn worked_today(&self) -> bool {
        self.worked_today
    }

    pub fn rollover(&self) -> Option<&Rollover> {
        match &self.kind {
            CrewKind::Mobile { rollover, .. } => rollover.as_ref(),
            CrewKind::Fixed { .. } => None,
        }
    }

    pub fn mobile_schedule(&self) -> Option<&MobileSchedule> {
        match &self.kind {
            CrewKind::Mobile { schedule, .. } => Some(schedule),
            CrewKind::Fixed { .. } => None,
        }
    }

    /// Work one simulated day.
    ///
    /// `pool` lists the sites the company wants surveyed, in priority order.
    /// `visited` holds sites already taken today by any crew of the company;
    /// sites this crew visits are added to it.  Accrues the day's operating
    /// cost when any site was visited.
    pub fn work_a_day(
        &mut self,
        company: &CompanyView<'_>,
        sites:   &mut [Site],
        pool:    &[SiteId],
        visited: &mut FxHashSet<SiteId>,
        ctx:     &mut DayContext<'_>,
    ) -> CrewDay {
        self.phase = DayPhase::DayStarted;
        self.worked_today = false;

        let mut run = DayRun { crew: self.id, company, ctx: &mut *ctx, day: CrewDay::new(self.id) };
        match &mut self.kind {
            CrewKind::Mobile { schedule, rollover } => {
                run.mobile(schedule, rollover, &mut self.phase, sites, pool, visited);
            }
            CrewKind::Fixed { schedule } => run.fixed(schedule, &mut self.phase, sites),
        }
        let mut day = run.day;

        self.phase = DayPhase::DayEnded;
        self.worked_today = day.worked;

        let label = company.config.label.as_str();
        if day.worked {
            let t = ctx.clock.current_timestep;
            day.cost = company.config.cost.daily(day.minutes, day.sites_visited);
            ctx.timeseries.add(label, Metric::Cost, t, day.cost);
            ctx.timeseries.add_total_cost(t, day.cost);
        }
        debug!(
            company = label,
            crew = %self.name,
            sites = day.sites_visited,
            minutes = day.minutes,
            rollover = self.rollover().is_some(),
            "crew day"
        );
        day
    }
}

// ── One day's run ─────────────────────────────────────────────────────────────

struct DayRun<'v, 'c> {
    crew:    CrewId,
    company: &'v CompanyView<'v>,
    ctx:     &'v mut DayContext<'c>,
    day:     CrewDay,
}

impl DayRun<'_, '_> {
    fn mobile(
        &mut self,
        schedule: &mut MobileSchedule,
        rollover: &mut Option<Rollover>,
        phase:    &mut DayPhase,
        sites:    &mut [Site],
        pool:     &[SiteId],
        visited:  &mut FxHashSet<SiteId>,
    ) {
        if pool.is_empty() && rollover.is_none() {
            return;
        }
        if self.past_end_of_day(schedule) {
            return;
        }
        schedule.start_day(self.ctx.clock.current_date());

        if let Some(carried) = rollover.take() {
            *phase = DayPhase::RolloverHandling;
            if !self.finish_rollover(carried, schedule, rollover, sites, visited) {
                self.day.minutes = schedule.end_day();
                return;
            }
        }

        while schedule.within_workday() && !self.past_end_of_day(schedule) {
            *phase = DayPhase::SiteSelection;
            let plans = self.plan_pool(schedule, sites, pool, visited);

            let Some(plan) = schedule.choose_site(&plans).copied() else {
                // Nothing can be started: spend the night towards the
                // cheapest candidate.
                let target = plans
                    .iter()
                    .min_by(|a, b| a.total_mins.total_cmp(&b.total_mins))
                    .and_then(|p| sites.get(p.site.index()))
                    .map(|s| s.location);
                if target.is_some() {
                    schedule.choose_accommodation(target);
                }
                break;
            };

            *phase = DayPhase::Visiting;
            self.visit_planned(&plan, schedule, sites, visited);
            if plan.rollover {
                self.carry(plan, schedule, rollover);
                break;
            }
        }
        self.day.minutes = schedule.end_day();
    }

    /// The driver's clock has reached the crew's end-of-day hour.
    fn past_end_of_day(&self, schedule: &MobileSchedule) -> bool {
        f64::from(self.ctx.clock.hour()) >= schedule.end_hour()
    }

    /// Returns `true` when the crew may go on to other sites today.
    fn finish_rollover(
        &mut self,
        carried:  Rollover,
        schedule: &mut MobileSchedule,
        rollover: &mut Option<Rollover>,
        sites:    &mut [Site],
        visited:  &mut FxHashSet<SiteId>,
    ) -> bool {
        let plan = sites.get(carried.site.index()).and_then(|site| {
            schedule.plan_visit(site, carried.remaining_mins, self.ctx.weather, self.ctx.rng)
        });
        match plan {
            Some(plan) if plan.startable => {
                self.visit_planned(&plan, schedule, sites, visited);
                if plan.rollover {
                    self.carry(plan, schedule, rollover);
                    false
                } else {
                    debug!(crew = %self.crew, site = %carried.site, "rollover cleared");
                    true
                }
            }
            _ => {
                debug!(crew = %self.crew, site = %carried.site, "rollover site unreachable today");
                *rollover = Some(carried);
                false
            }
        }
    }

    fn carry(&mut self, plan: VisitPlan, schedule: &mut MobileSchedule, rollover: &mut Option<Rollover>) {
        *rollover = Some(Rollover { site: plan.site, remaining_mins: plan.remaining_mins });
        debug!(crew = %self.crew, site = %plan.site, remaining = plan.remaining_mins, "rollover carried");
        schedule.choose_accommodation(None);
    }

    fn plan_pool(
        &mut self,
        schedule: &MobileSchedule,
        sites:    &[Site],
        pool:     &[SiteId],
        visited:  &FxHashSet<SiteId>,
    ) -> Vec<VisitPlan> {
        let config = self.company.config;
        let mut plans = Vec::with_capacity(pool.len());
        for id in pool {
            if visited.contains(id) {
                continue;
            }
            let Some(site) = sites.get(id.index()) else { continue };
            let need = site
                .counters(&config.label)
                .and_then(|c| c.survey_mins)
                .unwrap_or(config.survey_mins);
            if let Some(plan) = schedule.plan_visit(site, need, self.ctx.weather, self.ctx.rng) {
                plans.push(plan);
            }
        }
        plans
    }

    fn visit_planned(
        &mut self,
        plan:     &VisitPlan,
        schedule: &mut MobileSchedule,
        sites:    &mut [Site],
        visited:  &mut FxHashSet<SiteId>,
    ) {
        let Some(site) = sites.get_mut(plan.site.index()) else { return };
        schedule.update_schedule(plan.travel_mins);
        let at = schedule
            .current_time()
            .unwrap_or_else(|| self.ctx.clock.current_datetime());
        self.visit(site, at);
        schedule.update_schedule(plan.total_mins - plan.travel_mins);
        schedule.set_location(site.location);
        visited.insert(plan.site);
    }

    fn fixed(&mut self, schedule: &mut FixedSchedule, phase: &mut DayPhase, sites: &mut [Site]) {
        let t = self.ctx.clock.current_timestep;
        if !schedule.is_due(t) {
            return;
        }
        let Some(site) = sites.get_mut(schedule.site().index()) else { return };
        *phase = DayPhase::Visiting;
        let at = self.ctx.clock.current_datetime();
        self.visit(site, at);
        schedule.record(t);
    }

    /// Survey `site`: aggregate, vent, detect, then update flags and counters.
    fn visit(&mut self, site: &mut Site, at: NaiveDateTime) {
        let company = self.company;
        let label = company.config.label.as_str();
        let t = self.ctx.clock.current_timestep;

        company.hooks.pre_visit(self.crew, site);

        let mut rates = company.aggregator.aggregate(site);
        let venting = match self.ctx.vents {
            Some(vents) => self.ctx.rng.choose(vents).copied().unwrap_or(0.0),
            None => 0.0,
        };
        if venting != 0.0 {
            rates.add_venting(venting);
        }

        let mut report = {
            let mut env = DetectEnv {
                clock:      self.ctx.clock,
                at,
                rng:        &mut *self.ctx.rng,
                timeseries: &mut *self.ctx.timeseries,
                tags:       &mut *self.ctx.tags,
                weather:    self.ctx.weather,
                label,
                crew:       self.crew,
            };
            company.sensor.detect(site, &rates, venting, &mut env)
        };

        company.hooks.post_visit(self.crew, site, &mut report);

        if company.config.measurement_scale.is_leak_level() {
            site.currently_flagged = false;
        } else {
            self.day.candidate_flags.push(report);
        }

        self.ctx.timeseries.incr(label, Metric::SitesVisited, t);
        site.counters_mut(label).record_survey(t);
        self.day.sites_visited += 1;
        self.day.worked = true;
    }
}
