//! A company: one configuration, one sensor, many crews.

use std::cmp::Reverse;

use rustc_hash::FxHashSet;

use ldar_core::{Metric, SimClock, SiteId, Timestep};
use ldar_detect::Sensor;
use ldar_site::{Aggregator, Site};

use crate::{CompanyConfig, CompanyView, Crew, CrewDay, CrewHooks, DayContext, DeploymentType};

/// What a company did on one day.
#[derive(Clone, Debug, PartialEq)]
pub struct DayOutcome {
    pub crews:   Vec<CrewDay>,
    /// Sites newly flagged for follow-up.
    pub flagged: Vec<SiteId>,
}

impl DayOutcome {
    pub fn sites_visited(&self) -> u32 {
        self.crews.iter().map(|c| c.sites_visited).sum()
    }

    pub fn cost(&self) -> f64 {
        self.crews.iter().map(|c| c.cost).sum()
    }

    pub fn worked(&self) -> bool {
        self.crews.iter().any(|c| c.worked)
    }
}

/// Built with [`CompanyBuilder`][crate::CompanyBuilder].
pub struct Company {
    pub(crate) config:        CompanyConfig,
    pub(crate) sensor:        Box<dyn Sensor>,
    pub(crate) aggregator:    Box<dyn Aggregator>,
    pub(crate) hooks:         Box<dyn CrewHooks>,
    pub(crate) crews:         Vec<Crew>,
    /// Sites taken by any crew today, including pending rollovers.
    pub(crate) visited_today: FxHashSet<SiteId>,
}

impl Company {
    pub fn label(&self) -> &str {
        &self.config.label
    }

    pub fn config(&self) -> &CompanyConfig {
        &self.config
    }

    pub fn sensor_id(&self) -> &str {
        self.sensor.id()
    }

    pub fn crews(&self) -> &[Crew] {
        &self.crews
    }

    /// Sites due a survey at `now`, longest-unsurveyed first.
    ///
    /// A site is due when this company has surveyed it fewer than
    /// `surveys_per_year` times this year and at least `min_interval_days`
    /// have passed since the last survey.  Never-surveyed sites lead.
    pub fn site_pool(&self, sites: &[Site], now: Timestep) -> Vec<SiteId> {
        let label = self.config.label.as_str();
        let mut due: Vec<(SiteId, u64)> = sites
            .iter()
            .filter_map(|site| {
                let since = match site.counters(label) {
                    None => u64::MAX,
                    Some(c) => {
                        if c.surveys_done_this_year >= self.config.surveys_per_year {
                            return None;
                        }
                        c.t_since_last_survey(now).unwrap_or(u64::MAX)
                    }
                };
                (since >= self.config.min_interval_days).then_some((site.id, since))
            })
            .collect();
        due.sort_by_key(|&(_, since)| Reverse(since));
        due.into_iter().map(|(id, _)| id).collect()
    }

    /// Run every crew for one day, then flag sites from the candidate
    /// reports.
    pub fn work_a_day(&mut self, sites: &mut [Site], ctx: &mut DayContext<'_>) -> DayOutcome {
        let t = ctx.clock.current_timestep;
        let pool = match self.config.deployment_type {
            DeploymentType::Mobile => self.site_pool(sites, t),
            DeploymentType::Fixed => Vec::new(),
        };

        self.visited_today.clear();
        self.visited_today
            .extend(self.crews.iter().filter_map(|c| c.rollover()).map(|r| r.site));

        let view = CompanyView {
            config:     &self.config,
            sensor:     &*self.sensor,
            aggregator: &*self.aggregator,
            hooks:      &*self.hooks,
        };
        let mut crews = Vec::with_capacity(self.crews.len());
        for crew in &mut self.crews {
            crews.push(crew.work_a_day(&view, sites, &pool, &mut self.visited_today, ctx));
        }

        let flagged = self.flag_sites(&crews, sites, ctx, t);
        DayOutcome { crews, flagged }
    }

    fn flag_sites(
        &self,
        crews: &[CrewDay],
        sites: &mut [Site],
        ctx:   &mut DayContext<'_>,
        t:     Timestep,
    ) -> Vec<SiteId> {
        let threshold = self.config.follow_up_threshold;
        let mut flagged = Vec::new();
        for report in crews.iter().flat_map(|c| &c.candidate_flags) {
            if !report.found_leak || report.site_measured_rate < threshold {
                continue;
            }
            let Some(site) = sites.get_mut(report.site.index()) else { continue };
            if site.currently_flagged {
                continue;
            }
            site.currently_flagged = true;
            ctx.timeseries.incr(&self.config.label, Metric::Flags, t);
            flagged.push(site.id);
        }
        flagged
    }
}

/// Calendar bookkeeping shared by every company, run once at the start of
/// each day before any company works: yearly survey counts reset on
/// 1 January.
pub fn begin_day(sites: &mut [Site], clock: &SimClock) {
    if clock.is_new_year() {
        for site in sites {
            site.reset_yearly_counters();
        }
    }
}
