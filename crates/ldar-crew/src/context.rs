//! Mutable run state handed to companies each day.

use ldar_core::{SimClock, SimRng, Timeseries, WeatherProvider};
use ldar_site::TagQueue;

/// Everything outside the site list that a company day reads or writes.
///
/// Built by the driver once per day and lent to each company in turn; the
/// RNG is consumed crew-major, then site-major, then leak-major.
pub struct DayContext<'a> {
    pub clock:      &'a SimClock,
    pub rng:        &'a mut SimRng,
    pub timeseries: &'a mut Timeseries,
    /// Leaks awaiting repair.
    pub tags:       &'a mut TagQueue,
    pub weather:    &'a dyn WeatherProvider,
    /// Empirical vent rates (g/s); `Some` when venting is considered.
    pub vents:      Option<&'a [f64]>,
}

impl<'a> DayContext<'a> {
    pub fn new(
        clock:      &'a SimClock,
        rng:        &'a mut SimRng,
        timeseries: &'a mut Timeseries,
        tags:       &'a mut TagQueue,
        weather:    &'a dyn WeatherProvider,
    ) -> Self {
        Self { clock, rng, timeseries, tags, weather, vents: None }
    }

    /// Add a sampled vent rate to every visit.
    pub fn with_venting(mut self, vents: &'a [f64]) -> Self {
        self.vents = Some(vents);
        self
    }
}
