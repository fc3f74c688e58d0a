//! Sensor lookup by configuration id.
//!
//! A company names its sensor by string (`"OGI_camera"`, `"METEC_wind"`,
//! …).  [`SensorRegistry::resolve`] turns that into a boxed [`Sensor`] once,
//! at company construction; an unknown id or a malformed MDL list is a
//! configuration error, never a silent default.
//!
//! Applications add their own technologies with
//! [`SensorRegistry::register`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::logistic::{METEC_NO_WIND, METEC_WIND};
use crate::ogi::OGI_CAMERA;
use crate::{DetectError, DetectResult, FixedCurveSensor, LogisticSensor, MeasurementScale, Sensor};

/// The `sensor` block of a company configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SensorConfig {
    /// Registry id of the technology.
    #[serde(rename = "type")]
    pub kind: String,
    /// Minimum detection limit parameters; meaning depends on the sensor.
    #[serde(rename = "MDL", default)]
    pub mdl:  Vec<f64>,
    /// Quantification error (standard deviation of the relative error).
    #[serde(rename = "QE", default)]
    pub qe:   f64,
}

/// Everything a factory needs to build a sensor for one company.
#[derive(Clone, Debug, PartialEq)]
pub struct SensorSettings {
    pub sensor:            SensorConfig,
    pub scale:             MeasurementScale,
    pub temporal_coverage: f64,
}

pub type SensorFactory = fn(&SensorSettings) -> DetectResult<Box<dyn Sensor>>;

/// Map from sensor id to factory.
pub struct SensorRegistry {
    factories: BTreeMap<String, SensorFactory>,
}

impl SensorRegistry {
    /// An empty registry.
    pub fn empty() -> Self {
        Self { factories: BTreeMap::new() }
    }

    /// A registry holding the built-in technologies.
    pub fn builtin() -> Self {
        let mut reg = Self::empty();
        reg.register(METEC_NO_WIND, build_metec_no_wind);
        reg.register(METEC_WIND, build_metec_wind);
        reg.register(OGI_CAMERA, build_ogi_camera);
        reg
    }

    /// Add (or replace) the factory for `id`.
    pub fn register(&mut self, id: &str, factory: SensorFactory) {
        self.factories.insert(id.to_owned(), factory);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    /// Registered ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Build the sensor named by `settings.sensor.kind`.
    pub fn resolve(&self, settings: &SensorSettings) -> DetectResult<Box<dyn Sensor>> {
        if !(0.0..=1.0).contains(&settings.temporal_coverage) {
            return Err(DetectError::InvalidParameter {
                sensor: settings.sensor.kind.clone(),
                reason: format!("temporal coverage {} outside [0, 1]", settings.temporal_coverage),
            });
        }
        if settings.sensor.qe < 0.0 {
            return Err(DetectError::InvalidParameter {
                sensor: settings.sensor.kind.clone(),
                reason: format!("negative quantification error {}", settings.sensor.qe),
            });
        }
        let factory = self
            .factories
            .get(&settings.sensor.kind)
            .ok_or_else(|| DetectError::UnknownSensor(settings.sensor.kind.clone()))?;
        factory(settings)
    }
}

impl Default for SensorRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

// ── Built-in factories ────────────────────────────────────────────────────────

fn build_metec_no_wind(s: &SensorSettings) -> DetectResult<Box<dyn Sensor>> {
    Ok(Box::new(LogisticSensor::no_wind(s)?))
}

fn build_metec_wind(s: &SensorSettings) -> DetectResult<Box<dyn Sensor>> {
    Ok(Box::new(LogisticSensor::wind(s)?))
}

fn build_ogi_camera(s: &SensorSettings) -> DetectResult<Box<dyn Sensor>> {
    Ok(Box::new(FixedCurveSensor::ogi(s)?))
}
