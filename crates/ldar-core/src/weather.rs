//! Weather covariates consumed by sensors and schedulers.
//!
//! Weather data provisioning is external to the engine; implementors of
//! [`WeatherProvider`] adapt whatever gridded or station data the
//! application loads.

use chrono::NaiveDateTime;

use crate::GeoPoint;

/// A weather variable that can be queried hourly.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeatherVar {
    /// Wind speed, m/s.
    Wind,
    /// Air temperature, °C.
    Temp,
    /// Precipitation, mm/h.
    Precip,
}

/// Source of hourly weather values at a location.
pub trait WeatherProvider {
    /// Hourly values of `var` at `location` for the `hours` hours preceding
    /// (and including) `at`.  May return fewer values than requested; an
    /// empty vec means "no data".
    fn hourly(&self, var: WeatherVar, at: NaiveDateTime, hours: u32, location: GeoPoint) -> Vec<f64>;

    /// Mean of [`hourly`][Self::hourly], or `None` when there is no data.
    fn mean(&self, var: WeatherVar, at: NaiveDateTime, hours: u32, location: GeoPoint) -> Option<f64> {
        let values = self.hourly(var, at, hours, location);
        if values.is_empty() {
            return None;
        }
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// A provider that reports the same value for every hour and location.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ConstantWeather {
    pub wind:   f64,
    pub temp:   f64,
    pub precip: f64,
}

impl Default for ConstantWeather {
    fn default() -> Self {
        Self { wind: 5.0, temp: 10.0, precip: 0.0 }
    }
}

impl WeatherProvider for ConstantWeather {
    fn hourly(&self, var: WeatherVar, _at: NaiveDateTime, hours: u32, _location: GeoPoint) -> Vec<f64> {
        let value = match var {
            WeatherVar::Wind   => self.wind,
            WeatherVar::Temp   => self.temp,
            WeatherVar::Precip => self.precip,
        };
        vec![value; hours.max(1) as usize]
    }
}
