//! The informal operator pathway: site staff noticing leaks during routine
//! work, without a survey.
//!
//! Every active leak gets one draw per day with
//!
//! ```text
//! leak_term = (Σ initial leaks / active leaks) · mean initial leaks
//! p         = min(1, LPR·7 / leak_term + max_det_op · rate / max_rate) · strength
//! ```
//!
//! Detections tag as company `operator`, crew 1.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use ldar_core::{CrewId, Metric, Timeseries};
use ldar_detect::{DetectEnv, update_tag};
use ldar_site::Site;

use crate::{CrewError, CrewResult, DayContext};

pub const OPERATOR_LABEL: &str = "operator";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OperatorConfig {
    /// Leak production rate, new leaks per site per day.
    #[serde(rename = "LPR")]
    pub lpr:        f64,
    /// Detection probability for the largest leak.
    pub max_det_op: f64,
    #[serde(rename = "operator_strength", alias = "strength")]
    pub strength:   f64,
    /// Rate normalising the size term, g/s.  Defaults to the largest active
    /// leak on the day.
    #[serde(default)]
    pub max_rate:   Option<f64>,
}

impl OperatorConfig {
    pub fn validate(&self) -> CrewResult<()> {
        if !(self.lpr >= 0.0) || !(self.max_det_op >= 0.0) {
            return Err(CrewError::Config("operator LPR and max_det_op must be non-negative".into()));
        }
        if !(0.0..=1.0).contains(&self.strength) {
            return Err(CrewError::Config(format!("operator strength {} outside [0, 1]", self.strength)));
        }
        if self.max_rate.is_some_and(|r| !(r > 0.0)) {
            return Err(CrewError::Config("operator max_rate must be positive".into()));
        }
        Ok(())
    }
}

pub struct Operator {
    config:    OperatorConfig,
    init_sum:  f64,
    init_mean: f64,
}

impl Operator {
    /// Capture the initial leak census and register the operator counters.
    pub fn new(config: OperatorConfig, sites: &[Site], timeseries: &mut Timeseries) -> CrewResult<Self> {
        config.validate()?;
        let init_sum: f64 = sites.iter().map(|s| f64::from(s.initial_leaks)).sum();
        let init_mean = if sites.is_empty() { 0.0 } else { init_sum / sites.len() as f64 };
        timeseries.register(OPERATOR_LABEL, Metric::Tags);
        timeseries.register(OPERATOR_LABEL, Metric::RedundTags);
        Ok(Self { config, init_sum, init_mean })
    }

    pub fn config(&self) -> &OperatorConfig {
        &self.config
    }

    /// Daily detection probability of a leak of `rate` g/s.
    ///
    /// A site census without initial leaks contributes nothing through the
    /// LPR term.
    pub fn detection_probability(&self, rate: f64, active: usize, max_rate: f64) -> f64 {
        if active == 0 {
            return 0.0;
        }
        let leak_term = self.init_sum / active as f64 * self.init_mean;
        let mut p = if leak_term > 0.0 { self.config.lpr * 7.0 / leak_term } else { 0.0 };
        if max_rate > 0.0 {
            p += self.config.max_det_op * rate / max_rate;
        }
        (p.min(1.0) * self.config.strength).clamp(0.0, 1.0)
    }

    /// One day of operator detections.  Returns the number of new tags.
    pub fn work_a_day(&self, sites: &mut [Site], ctx: &mut DayContext<'_>) -> u32 {
        let active: usize = sites.iter().map(Site::active_leak_count).sum();
        if active == 0 {
            warn!(date = %ctx.clock.current_date(), "operator day with no active leaks");
            return 0;
        }
        let max_rate = self.config.max_rate.unwrap_or_else(|| {
            sites
                .iter()
                .flat_map(|s| &s.leaks)
                .filter(|l| l.is_active())
                .map(|l| l.rate)
                .fold(0.0, f64::max)
        });

        let mut env = DetectEnv {
            clock:      ctx.clock,
            at:         ctx.clock.current_datetime(),
            rng:        &mut *ctx.rng,
            timeseries: &mut *ctx.timeseries,
            tags:       &mut *ctx.tags,
            weather:    ctx.weather,
            label:      OPERATOR_LABEL,
            crew:       CrewId(1),
        };

        let mut new_tags = 0;
        for site in sites.iter_mut() {
            for leak in site.leaks.iter_mut().filter(|l| l.is_active()) {
                let rate = leak.rate;
                let p = self.detection_probability(rate, active, max_rate);
                if env.rng.bernoulli(p) && update_tag(leak, rate, &mut env) {
                    new_tags += 1;
                }
            }
        }
        debug!(active, new_tags, "operator day");
        new_tags
    }
}
