//! Company configuration.
//!
//! A company is a configuration, not a type: every variant (mobile screening
//! crews, fixed sensors, OGI follow-up) is one [`CompanyConfig`] record.
//!
//! ```json
//! {
//!   "label": "OGI",
//!   "deployment_type": "mobile",
//!   "measurement_scale": "component",
//!   "sensor": { "type": "OGI_camera", "MDL": [0.01275, 2.78e-6], "QE": 0.0 },
//!   "n_crews": 2,
//!   "max_workday": 10,
//!   "survey_mins": 120,
//!   "surveys_per_year": 3,
//!   "min_interval_days": 60,
//!   "cost": { "upfront": 0, "per_day": 600, "per_hour": 0, "per_site": 0 },
//!   "scheduling": { "route_planning": true, "speed_list": [60, 80, 100] }
//! }
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use ldar_core::GeoPoint;
use ldar_detect::{MeasurementScale, SensorConfig, SensorSettings};
use ldar_schedule::{
    ConstantTravel, DeploymentWindow, HomeBase, SampledTravel, ScheduleSettings, SpeedTravel,
    TravelTime, WeatherEnvelope, load_home_bases_csv,
};

use crate::{CrewError, CrewResult};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentType {
    #[default]
    Mobile,
    Fixed,
}

/// Operating costs, in currency units.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostConfig {
    /// Charged once per crew (per sensor for fixed deployments) at start.
    pub upfront:  f64,
    pub per_day:  f64,
    pub per_hour: f64,
    pub per_site: f64,
}

impl CostConfig {
    /// Cost of one worked day.
    pub fn daily(&self, minutes: f64, sites: u32) -> f64 {
        self.per_day + self.per_hour * minutes / 60.0 + self.per_site * f64::from(sites)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixedConfig {
    pub measurement_interval_days: u64,
}

impl Default for FixedConfig {
    fn default() -> Self {
        Self { measurement_interval_days: 1 }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulingConfig {
    pub route_planning:    bool,
    /// Travel speeds sampled for route planning, km/h.
    pub speed_list:        Option<Vec<f64>>,
    /// Between-site travel minutes sampled when not route planning.
    pub travel_mins:       Option<Vec<f64>>,
    pub home_bases:        Vec<HomeBase>,
    /// CSV of additional home bases (`name,lon,lat`).
    pub home_bases_file:   Option<PathBuf>,
    pub init_location:     Option<GeoPoint>,
    pub deployment_years:  Vec<i32>,
    pub deployment_months: Vec<u32>,
}

fn one() -> f64 {
    1.0
}

fn one_u32() -> u32 {
    1
}

fn default_workday() -> f64 {
    8.0
}

fn default_survey_mins() -> f64 {
    240.0
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompanyConfig {
    pub label:               String,
    #[serde(default)]
    pub deployment_type:     DeploymentType,
    pub measurement_scale:   MeasurementScale,
    pub sensor:              SensorConfig,
    #[serde(default = "one")]
    pub temporal_coverage:   f64,
    /// Mobile deployments only.
    #[serde(default = "one_u32")]
    pub n_crews:             u32,
    #[serde(default)]
    pub cost:                CostConfig,
    /// Working hours per day.
    #[serde(default = "default_workday")]
    pub max_workday:         f64,
    /// Survey minutes per site, unless the site overrides it.
    #[serde(default = "default_survey_mins")]
    pub survey_mins:         f64,
    #[serde(default = "one_u32")]
    pub surveys_per_year:    u32,
    #[serde(default)]
    pub min_interval_days:   u64,
    #[serde(default)]
    pub weather_envs:        WeatherEnvelope,
    /// Measured site rate (g/s) at or above which a detection flags the site.
    #[serde(default)]
    pub follow_up_threshold: f64,
    #[serde(default)]
    pub fixed:               FixedConfig,
    #[serde(default)]
    pub scheduling:          SchedulingConfig,
}

impl CompanyConfig {
    /// A mobile company with defaults for everything but the essentials.
    pub fn new(label: &str, scale: MeasurementScale, sensor: SensorConfig) -> Self {
        Self {
            label:               label.to_owned(),
            deployment_type:     DeploymentType::Mobile,
            measurement_scale:   scale,
            sensor,
            temporal_coverage:   one(),
            n_crews:             one_u32(),
            cost:                CostConfig::default(),
            max_workday:         default_workday(),
            survey_mins:         default_survey_mins(),
            surveys_per_year:    one_u32(),
            min_interval_days:   0,
            weather_envs:        WeatherEnvelope::default(),
            follow_up_threshold: 0.0,
            fixed:               FixedConfig::default(),
            scheduling:          SchedulingConfig::default(),
        }
    }

    /// Parse and validate a JSON record.
    pub fn from_json(json: &str) -> CrewResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that cannot run.  Sensor-specific checks (MDL
    /// layout, known ids) happen when the sensor is resolved.
    pub fn validate(&self) -> CrewResult<()> {
        let fail = |msg: String| Err(CrewError::Config(format!("{}: {msg}", self.label)));

        if self.label.trim().is_empty() {
            return Err(CrewError::Config("company label is empty".into()));
        }
        if !(0.0..=1.0).contains(&self.temporal_coverage) {
            return fail(format!("temporal_coverage {} outside [0, 1]", self.temporal_coverage));
        }
        if !(self.max_workday > 0.0 && self.max_workday <= 24.0) {
            return fail(format!("max_workday must be in (0, 24], got {}", self.max_workday));
        }
        if !(self.survey_mins >= 0.0) {
            return fail(format!("negative survey_mins {}", self.survey_mins));
        }
        let c = &self.cost;
        if [c.upfront, c.per_day, c.per_hour, c.per_site].iter().any(|v| !(*v >= 0.0)) {
            return fail("costs must be non-negative".into());
        }
        match self.deployment_type {
            DeploymentType::Mobile if self.n_crews == 0 => fail("n_crews must be at least 1".into()),
            DeploymentType::Fixed if self.fixed.measurement_interval_days == 0 => {
                fail("measurement_interval_days must be at least 1".into())
            }
            _ => Ok(()),
        }
    }

    pub fn sensor_settings(&self) -> SensorSettings {
        SensorSettings {
            sensor:            self.sensor.clone(),
            scale:             self.measurement_scale,
            temporal_coverage: self.temporal_coverage,
        }
    }

    pub fn schedule_settings(&self) -> ScheduleSettings {
        ScheduleSettings {
            max_workday:    self.max_workday,
            route_planning: self.scheduling.route_planning,
            window:         DeploymentWindow {
                years:  self.scheduling.deployment_years.clone(),
                months: self.scheduling.deployment_months.clone(),
            },
            envelope:       self.weather_envs.clone(),
        }
    }

    /// The travel-time model the scheduling block describes.
    ///
    /// Route planning samples speeds from `speed_list`; otherwise minutes are
    /// sampled from `travel_mins`.  A company with neither travels for free.
    pub fn travel_time(&self) -> CrewResult<Arc<dyn TravelTime>> {
        let s = &self.scheduling;
        if s.route_planning {
            let speeds = s.speed_list.clone().ok_or_else(|| {
                CrewError::Config(format!("{}: route_planning requires speed_list", self.label))
            })?;
            return Ok(Arc::new(SpeedTravel::new(speeds)?));
        }
        match &s.travel_mins {
            Some(mins) => Ok(Arc::new(SampledTravel::new(mins.clone())?)),
            None       => Ok(Arc::new(ConstantTravel(0.0))),
        }
    }

    /// Inline home bases followed by those in `home_bases_file`.
    pub fn home_bases(&self) -> CrewResult<Vec<HomeBase>> {
        let mut bases = self.scheduling.home_bases.clone();
        if let Some(path) = &self.scheduling.home_bases_file {
            bases.extend(load_home_bases_csv(path)?);
        }
        Ok(bases)
    }
}
