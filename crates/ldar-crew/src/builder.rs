//! Fluent builder for constructing a [`Company`].

use std::sync::Arc;

use rustc_hash::FxHashSet;
use tracing::info;

use ldar_core::{CrewId, GeoPoint, Metric, SimClock, Timeseries};
use ldar_detect::SensorRegistry;
use ldar_schedule::{FixedSchedule, HomeBase, MobileSchedule, TravelTime};
use ldar_site::{Aggregator, EquipmentAggregator, Site};

use crate::{Company, CompanyConfig, Crew, CrewHooks, CrewResult, DeploymentType, NoopHooks};

/// Fluent builder for [`Company`].
///
/// # Optional inputs (have defaults)
///
/// | Method           | Default                                  |
/// |------------------|------------------------------------------|
/// | `.registry(r)`   | `SensorRegistry::builtin()`              |
/// | `.hooks(h)`      | `NoopHooks`                              |
/// | `.aggregator(a)` | `EquipmentAggregator`                    |
/// | `.travel(t)`     | from the config's `scheduling` block     |
///
/// # Example
///
/// ```rust,ignore
/// let config = CompanyConfig::from_json(json)?;
/// let mut company = CompanyBuilder::new(config).build(&sites, &clock, &mut timeseries)?;
/// let outcome = company.work_a_day(&mut sites, &mut ctx);
/// ```
pub struct CompanyBuilder {
    config:     CompanyConfig,
    registry:   Option<SensorRegistry>,
    hooks:      Option<Box<dyn CrewHooks>>,
    aggregator: Option<Box<dyn Aggregator>>,
    travel:     Option<Arc<dyn TravelTime>>,
}

impl CompanyBuilder {
    pub fn new(config: CompanyConfig) -> Self {
        Self { config, registry: None, hooks: None, aggregator: None, travel: None }
    }

    /// Resolve the sensor from `registry` instead of the built-in one.
    pub fn registry(mut self, registry: SensorRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn hooks(mut self, hooks: impl CrewHooks + 'static) -> Self {
        self.hooks = Some(Box::new(hooks));
        self
    }

    pub fn aggregator(mut self, aggregator: impl Aggregator + 'static) -> Self {
        self.aggregator = Some(Box::new(aggregator));
        self
    }

    /// Override the travel-time model built from the config.
    pub fn travel(mut self, travel: Arc<dyn TravelTime>) -> Self {
        self.travel = Some(travel);
        self
    }

    /// Validate the config, resolve the sensor, create the crews, register
    /// the company's counters and charge upfront costs at the current
    /// timestep.
    pub fn build(self, sites: &[Site], clock: &SimClock, timeseries: &mut Timeseries) -> CrewResult<Company> {
        let config = self.config;
        config.validate()?;

        let registry = self.registry.unwrap_or_default();
        let sensor = registry.resolve(&config.sensor_settings())?;

        let crews = match config.deployment_type {
            DeploymentType::Mobile => {
                let travel = match self.travel {
                    Some(t) => t,
                    None => config.travel_time()?,
                };
                mobile_crews(&config, travel, sites)?
            }
            DeploymentType::Fixed => fixed_crews(&config, sites)?,
        };

        let label = config.label.as_str();
        for metric in [
            Metric::SitesVisited,
            Metric::MissedLeaks,
            Metric::RedundTags,
            Metric::Tags,
            Metric::Flags,
            Metric::Cost,
        ] {
            timeseries.register(label, metric);
        }
        let upfront = config.cost.upfront * crews.len() as f64;
        if upfront > 0.0 {
            timeseries.add(label, Metric::Cost, clock.current_timestep, upfront);
            timeseries.add_total_cost(clock.current_timestep, upfront);
        }

        info!(
            company = label,
            deployment = ?config.deployment_type,
            crews = crews.len(),
            sensor = sensor.id(),
            "company initialised"
        );

        Ok(Company {
            config,
            sensor,
            aggregator:    self.aggregator.unwrap_or_else(|| Box::new(EquipmentAggregator)),
            hooks:         self.hooks.unwrap_or_else(|| Box::new(NoopHooks)),
            crews,
            visited_today: FxHashSet::default(),
        })
    }
}

fn mobile_crews(config: &CompanyConfig, travel: Arc<dyn TravelTime>, sites: &[Site]) -> CrewResult<Vec<Crew>> {
    let bases: Arc<[HomeBase]> = config.home_bases()?.into();
    let start = config
        .scheduling
        .init_location
        .or_else(|| bases.first().map(HomeBase::location))
        .or_else(|| sites.first().map(|s| s.location))
        .unwrap_or(GeoPoint::new(0.0, 0.0));
    let settings = config.schedule_settings();

    (1..=config.n_crews)
        .map(|n| -> CrewResult<Crew> {
            let schedule = MobileSchedule::new(&settings, Arc::clone(&travel), Arc::clone(&bases), start)?;
            Ok(Crew::mobile(CrewId(n), format!("{}-{n}", config.label), schedule))
        })
        .collect()
}

/// One crew per installed sensor, named `{facility_id}-{n}`.
fn fixed_crews(config: &CompanyConfig, sites: &[Site]) -> CrewResult<Vec<Crew>> {
    let interval = config.fixed.measurement_interval_days;
    let mut crews = Vec::new();
    for site in sites {
        for n in 1..=site.fixed_sensors {
            let id = CrewId(crews.len() as u32 + 1);
            let schedule = FixedSchedule::new(site.id, interval)?;
            crews.push(Crew::fixed(id, format!("{}-{n}", site.facility_id), schedule));
        }
    }
    Ok(crews)
}
