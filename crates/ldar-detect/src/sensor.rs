//! The `Sensor` trait and the environment a detection runs in.

use chrono::NaiveDateTime;

use ldar_core::{CrewId, LeakId, Metric, SimClock, SimRng, SiteId, Timeseries, WeatherProvider};
use ldar_site::{AggregateRates, Site, TagQueue};

/// Everything a detection may read or mutate besides the site itself.
///
/// Built by the crew for each visit; all borrows end when the visit does.
pub struct DetectEnv<'a> {
    pub clock:      &'a SimClock,
    /// Time of the visit, used for covariate lookups.
    pub at:         NaiveDateTime,
    pub rng:        &'a mut SimRng,
    pub timeseries: &'a mut Timeseries,
    pub tags:       &'a mut TagQueue,
    pub weather:    &'a dyn WeatherProvider,
    /// Label of the detecting company.
    pub label:      &'a str,
    pub crew:       CrewId,
}

impl DetectEnv<'_> {
    /// Record `n` missed leaks on the site and in the counters table.
    pub fn record_missed(&mut self, site: &mut Site, n: u64) {
        if n == 0 {
            return;
        }
        site.counters_mut(self.label).missed_leaks += n;
        self.timeseries
            .add(self.label, Metric::MissedLeaks, self.clock.current_timestep, n as f64);
    }
}

/// The result of one visit.
#[derive(Clone, Debug, PartialEq)]
pub struct SiteDetectionReport {
    pub site:                 SiteId,
    pub leaks_present:        Vec<LeakId>,
    /// True site rate including venting, g/s.
    pub site_true_rate:       f64,
    /// Rate the crew reports, g/s.
    pub site_measured_rate:   f64,
    /// Measured rate per equipment group (equipment scale only).
    pub equip_measured_rates: Vec<f64>,
    pub vent_rate:            f64,
    /// At least one leak (or group, or the site) was detected.
    pub found_leak:           bool,
}

impl SiteDetectionReport {
    /// An empty report for `site` carrying the true rates of the visit.
    pub fn new(site: &Site, rates: &AggregateRates, venting: f64) -> Self {
        Self {
            site:                 site.id,
            leaks_present:        rates.leaks_present.iter().map(|&i| site.leaks[i].id).collect(),
            site_true_rate:       rates.site_rate,
            site_measured_rate:   0.0,
            equip_measured_rates: Vec::new(),
            vent_rate:            venting,
            found_leak:           false,
        }
    }
}

/// A detection technology.
///
/// `rates` are the aggregate rates the crew saw on arrival, with venting
/// already added; `venting` is reported back unchanged.
///
/// # Thread safety
///
/// Sensors are immutable after construction, so they are `Send + Sync` and
/// may be shared by every crew of a company.
pub trait Sensor: Send + Sync {
    /// Registry id of this sensor (e.g. `"METEC_wind"`).
    fn id(&self) -> &str;

    fn detect(
        &self,
        site:    &mut Site,
        rates:   &AggregateRates,
        venting: f64,
        env:     &mut DetectEnv<'_>,
    ) -> SiteDetectionReport;
}
