//! Logistic PoD sensors fitted to METEC controlled-release data.
//!
//! MDL layout: `[a, b]` or `[a, b, floor]`.
//!
//! - `a`, `b` — curve parameters of `PoD = 1 / (1 + e^(a − b·r))`.
//! - `floor` — hard sensitivity cutoff.  Rates ≤ `floor × 3.6` are missed
//!   without a draw.  The cutoff is compared against the raw rate in g/s,
//!   never the wind-normalized one.
//!
//! `r` is the rate in kg/h, divided by the preceding hour's mean wind speed
//! in km/h for the wind variant.  Zero or missing wind gives PoD 0.

use ldar_core::WeatherVar;
use ldar_site::{AggregateRates, Site};

use crate::pod::{GS_TO_KGH, logistic_pod, measured_rate, wind_normalized_rate};
use crate::{
    DetectEnv, DetectError, DetectResult, MeasurementScale, Sensor, SensorSettings,
    SiteDetectionReport, update_tag,
};

pub const METEC_NO_WIND: &str = "METEC_no_wind";
pub const METEC_WIND: &str = "METEC_wind";

#[derive(Clone, Debug, PartialEq)]
pub struct LogisticSensor {
    id:    &'static str,
    a:     f64,
    b:     f64,
    floor: Option<f64>,
    qe:    f64,
    scale: MeasurementScale,
    wind:  bool,
}

impl LogisticSensor {
    /// Registry factory for `METEC_no_wind` (2 or 3 MDL values).
    pub fn no_wind(settings: &SensorSettings) -> DetectResult<Self> {
        Self::build(METEC_NO_WIND, settings, false)
    }

    /// Registry factory for `METEC_wind` (exactly 3 MDL values).
    pub fn wind(settings: &SensorSettings) -> DetectResult<Self> {
        if settings.sensor.mdl.len() != 3 {
            return Err(DetectError::MdlCount {
                sensor:   METEC_WIND.into(),
                expected: "3",
                got:      settings.sensor.mdl.len(),
            });
        }
        Self::build(METEC_WIND, settings, true)
    }

    fn build(id: &'static str, settings: &SensorSettings, wind: bool) -> DetectResult<Self> {
        let mdl = &settings.sensor.mdl;
        if !(2..=3).contains(&mdl.len()) {
            return Err(DetectError::MdlCount { sensor: id.into(), expected: "2 or 3", got: mdl.len() });
        }
        if mdl.iter().any(|v| !v.is_finite()) {
            return Err(DetectError::InvalidParameter {
                sensor: id.into(),
                reason: "MDL values must be finite".into(),
            });
        }
        Ok(Self {
            id,
            a:     mdl[0],
            b:     mdl[1],
            floor: mdl.get(2).copied(),
            qe:    settings.sensor.qe,
            scale: settings.scale,
            wind,
        })
    }

    /// Rates at or below the floor cutoff are always missed.
    pub fn below_floor(&self, rate_gs: f64) -> bool {
        self.floor.is_some_and(|f| rate_gs <= f * GS_TO_KGH)
    }

    /// PoD for `rate_gs`, given the mean wind (m/s) when the curve is
    /// wind-normalized.  Clamped to [0, 1].
    pub fn pod(&self, rate_gs: f64, wind_ms: Option<f64>) -> f64 {
        if !(rate_gs > 0.0) {
            return 0.0;
        }
        let r = if self.wind {
            match wind_normalized_rate(rate_gs, wind_ms) {
                Some(r) => r,
                None    => return 0.0,
            }
        } else {
            rate_gs * GS_TO_KGH
        };
        logistic_pod(self.a, self.b, r).min(1.0)
    }

    /// Floor check, then one Bernoulli draw.  No draw below the floor.
    fn attempt(&self, rate_gs: f64, wind_ms: Option<f64>, env: &mut DetectEnv<'_>) -> bool {
        if self.below_floor(rate_gs) {
            return false;
        }
        env.rng.bernoulli(self.pod(rate_gs, wind_ms))
    }
}

impl Sensor for LogisticSensor {
    fn id(&self) -> &str {
        self.id
    }

    fn detect(
        &self,
        site:    &mut Site,
        rates:   &AggregateRates,
        venting: f64,
        env:     &mut DetectEnv<'_>,
    ) -> SiteDetectionReport {
        let mut report = SiteDetectionReport::new(site, rates, venting);
        let wind = if self.wind {
            env.weather.mean(WeatherVar::Wind, env.at, 1, site.location)
        } else {
            None
        };
        let n_leaks = rates.leaks_present.len() as u64;

        match self.scale {
            MeasurementScale::Site => {
                if self.attempt(rates.site_rate, wind, env) {
                    report.found_leak = true;
                    report.site_measured_rate = measured_rate(rates.site_rate, self.qe, env.rng);
                } else {
                    env.record_missed(site, n_leaks);
                }
            }

            MeasurementScale::Equipment => {
                let groups = rates.equipment_rates.len().max(1);
                for (g, &rate) in rates.equipment_rates.iter().enumerate() {
                    let m_rate = if self.attempt(rate, wind, env) {
                        report.found_leak = true;
                        measured_rate(rate, self.qe, env.rng)
                    } else {
                        let in_group = rates
                            .leaks_present
                            .iter()
                            .filter(|&&i| (site.leaks[i].equipment_group as usize).min(groups - 1) == g)
                            .count() as u64;
                        env.record_missed(site, in_group);
                        0.0
                    };
                    report.equip_measured_rates.push(m_rate);
                    report.site_measured_rate += m_rate;
                }
            }

            MeasurementScale::Component => {
                for &i in &rates.leaks_present {
                    let rate = site.leaks[i].rate;
                    if self.attempt(rate, wind, env) {
                        report.found_leak = true;
                        let m_rate = measured_rate(rate, self.qe, env.rng);
                        if update_tag(&mut site.leaks[i], m_rate, env) {
                            report.site_measured_rate += m_rate;
                        }
                    } else {
                        env.record_missed(site, 1);
                    }
                }
            }
        }
        report
    }
}
