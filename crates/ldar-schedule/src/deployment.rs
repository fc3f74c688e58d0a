//! When and in what conditions a mobile crew may deploy.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use ldar_core::{GeoPoint, WeatherProvider, WeatherVar};

// ── Calendar window ───────────────────────────────────────────────────────────

/// Years and months in which a company operates.  An empty list means
/// "every year" (or "every month").
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentWindow {
    #[serde(default)]
    pub years:  Vec<i32>,
    /// Calendar months, 1–12.
    #[serde(default)]
    pub months: Vec<u32>,
}

impl DeploymentWindow {
    /// A window that never excludes a date.
    pub fn always() -> Self {
        Self::default()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        (self.years.is_empty() || self.years.contains(&date.year()))
            && (self.months.is_empty() || self.months.contains(&date.month()))
    }
}

// ── Weather envelope ──────────────────────────────────────────────────────────

/// Inclusive `[min, max]` range, written as a two-element array in config.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }
}

impl From<(f64, f64)> for Bounds {
    fn from((min, max): (f64, f64)) -> Self {
        Self { min, max }
    }
}

impl From<Bounds> for (f64, f64) {
    fn from(b: Bounds) -> Self {
        (b.min, b.max)
    }
}

/// Daily-mean weather limits outside which a site is unreachable.
///
/// Each variable is checked only when bounded.  A day with no data for a
/// bounded variable is treated as workable.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherEnvelope {
    #[serde(default)]
    pub wind:   Option<Bounds>,
    #[serde(default)]
    pub temp:   Option<Bounds>,
    #[serde(default)]
    pub precip: Option<Bounds>,
}

impl WeatherEnvelope {
    pub fn is_unbounded(&self) -> bool {
        self.wind.is_none() && self.temp.is_none() && self.precip.is_none()
    }

    /// `true` if the daily means at `location` on `date` are all in bounds.
    pub fn permits(&self, weather: &dyn WeatherProvider, date: NaiveDate, location: GeoPoint) -> bool {
        let start = date.and_time(chrono::NaiveTime::MIN);
        [
            (WeatherVar::Wind, self.wind),
            (WeatherVar::Temp, self.temp),
            (WeatherVar::Precip, self.precip),
        ]
        .into_iter()
        .all(|(var, bounds)| match bounds {
            None => true,
            Some(b) => weather.mean(var, start, 24, location).is_none_or(|v| b.contains(v)),
        })
    }
}
