//! Travel-time providers.
//!
//! The scheduler asks a [`TravelTime`] for the minutes between the crew's
//! current location and a candidate site.  Providers may draw from the run
//! RNG; the scheduler calls them once per candidate in pool order, so the
//! draw sequence is reproducible under a fixed seed.

use ldar_core::{GeoPoint, SimRng};

use crate::{ScheduleError, ScheduleResult};

/// Pluggable travel-time model.
///
/// # Thread safety
///
/// Implementations are shared by every crew of a company and must be
/// `Send + Sync`.
pub trait TravelTime: Send + Sync {
    /// Minutes to travel from `from` to `to`.  Never negative.
    fn minutes(&self, from: GeoPoint, to: GeoPoint, rng: &mut SimRng) -> f64;
}

// ── SpeedTravel ───────────────────────────────────────────────────────────────

/// Great-circle distance divided by a speed drawn from an empirical list.
#[derive(Clone, Debug, PartialEq)]
pub struct SpeedTravel {
    speeds_kmh: Vec<f64>,
}

impl SpeedTravel {
    pub fn new(speeds_kmh: Vec<f64>) -> ScheduleResult<Self> {
        if speeds_kmh.is_empty() {
            return Err(ScheduleError::Config("speed_list is empty".into()));
        }
        if let Some(s) = speeds_kmh.iter().find(|s| !(**s > 0.0) || !s.is_finite()) {
            return Err(ScheduleError::Config(format!("speed_list holds non-positive speed {s}")));
        }
        Ok(Self { speeds_kmh })
    }
}

impl TravelTime for SpeedTravel {
    fn minutes(&self, from: GeoPoint, to: GeoPoint, rng: &mut SimRng) -> f64 {
        // Non-empty by construction.
        let speed = rng.choose(&self.speeds_kmh).copied().unwrap_or(f64::INFINITY);
        from.distance_km(to) / speed * 60.0
    }
}

// ── SampledTravel ─────────────────────────────────────────────────────────────

/// Minutes drawn from an empirical between-sites list, ignoring geography.
#[derive(Clone, Debug, PartialEq)]
pub struct SampledTravel {
    mins: Vec<f64>,
}

impl SampledTravel {
    pub fn new(mins: Vec<f64>) -> ScheduleResult<Self> {
        if mins.is_empty() {
            return Err(ScheduleError::Config("travel_mins is empty".into()));
        }
        if let Some(m) = mins.iter().find(|m| !(**m >= 0.0) || !m.is_finite()) {
            return Err(ScheduleError::Config(format!("travel_mins holds invalid value {m}")));
        }
        Ok(Self { mins })
    }
}

impl TravelTime for SampledTravel {
    fn minutes(&self, _from: GeoPoint, _to: GeoPoint, rng: &mut SimRng) -> f64 {
        rng.choose(&self.mins).copied().unwrap_or(0.0)
    }
}

// ── ConstantTravel ────────────────────────────────────────────────────────────

/// The same number of minutes between any two points.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ConstantTravel(pub f64);

impl TravelTime for ConstantTravel {
    #[inline]
    fn minutes(&self, _from: GeoPoint, _to: GeoPoint, _rng: &mut SimRng) -> f64 {
        self.0.max(0.0)
    }
}
