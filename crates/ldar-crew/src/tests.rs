//! Unit tests for ldar-crew.

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use ldar_core::{
    ConstantWeather, CrewId, GeoPoint, Metric, SimClock, SimRng, SiteId, Timeseries, Timestep,
    timeseries::TOTAL_LABEL,
};
use ldar_detect::{MeasurementScale, SensorConfig};
use ldar_schedule::ConstantTravel;
use ldar_site::{Site, SiteStoreBuilder, TagQueue};

use crate::{
    Company, CompanyBuilder, CompanyConfig, CrewHooks, DayContext, DayOutcome, begin_day,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

const LABEL: &str = "OGI";

/// Owns everything a company day borrows.
struct World {
    clock:      SimClock,
    rng:        SimRng,
    timeseries: Timeseries,
    tags:       TagQueue,
    weather:    ConstantWeather,
    sites:      Vec<Site>,
}

impl World {
    fn new(sites: Vec<Site>) -> Self {
        Self::starting(sites, NaiveDate::from_ymd_opt(2021, 6, 1).unwrap(), 7)
    }

    fn starting(sites: Vec<Site>, date: NaiveDate, seed: u64) -> Self {
        Self {
            clock: SimClock::new(date),
            rng: SimRng::new(seed),
            timeseries: Timeseries::new(30),
            tags: TagQueue::new(),
            weather: ConstantWeather::default(),
            sites,
        }
    }

    /// Company with constant 30-minute travel.
    fn company(&mut self, config: CompanyConfig) -> Company {
        self.build(CompanyBuilder::new(config).travel(Arc::new(ConstantTravel(30.0))))
    }

    fn build(&mut self, builder: CompanyBuilder) -> Company {
        builder.build(&self.sites, &self.clock, &mut self.timeseries).unwrap()
    }

    fn work(&mut self, company: &mut Company) -> DayOutcome {
        let mut ctx = DayContext::new(
            &self.clock,
            &mut self.rng,
            &mut self.timeseries,
            &mut self.tags,
            &self.weather,
        );
        company.work_a_day(&mut self.sites, &mut ctx)
    }

    fn work_vented(&mut self, company: &mut Company, vents: &[f64]) -> DayOutcome {
        let mut ctx = DayContext::new(
            &self.clock,
            &mut self.rng,
            &mut self.timeseries,
            &mut self.tags,
            &self.weather,
        )
        .with_venting(vents);
        company.work_a_day(&mut self.sites, &mut ctx)
    }

    fn next_day(&mut self) {
        self.clock.advance();
        begin_day(&mut self.sites, &self.clock);
    }

    fn now(&self) -> Timestep {
        self.clock.current_timestep
    }

    fn today(&self, label: &str, metric: Metric) -> f64 {
        self.timeseries.get(label, metric, self.now())
    }
}

/// Logistic curve that detects any positive rate.
fn sure_sensor() -> SensorConfig {
    SensorConfig { kind: "METEC_no_wind".into(), mdl: vec![-100.0, 0.0], qe: 0.0 }
}

fn config(scale: MeasurementScale) -> CompanyConfig {
    let mut c = CompanyConfig::new(LABEL, scale, sure_sensor());
    c.survey_mins = 60.0;
    c.surveys_per_year = 5;
    c
}

/// `n` single-leak sites 0.1° of latitude apart.
fn sites(n: usize, rate: f64) -> Vec<Site> {
    let mut b = SiteStoreBuilder::new();
    for i in 0..n {
        b = b
            .site(&format!("F-{i:03}"), GeoPoint::new(51.0 + i as f64 * 0.1, -114.0), 1)
            .leak(rate, 0);
    }
    b.build().unwrap()
}

/// Records the order in which sites are visited.
#[derive(Clone, Default)]
struct Recorder(Arc<Mutex<Vec<SiteId>>>);

impl Recorder {
    fn visits(&self) -> Vec<SiteId> {
        self.0.lock().unwrap().clone()
    }
}

impl CrewHooks for Recorder {
    fn pre_visit(&self, _crew: CrewId, site: &mut Site) {
        self.0.lock().unwrap().push(site.id);
    }
}

// ── Configuration ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod config_tests {
    use std::io::Write;

    use ldar_schedule::HomeBase;

    use crate::{CostConfig, CrewError, DeploymentType};

    use super::*;

    const OGI_JSON: &str = r#"{
        "label": "OGI",
        "deployment_type": "mobile",
        "measurement_scale": "component",
        "sensor": { "type": "OGI_camera", "MDL": [0.01275, 2.78e-6] },
        "n_crews": 2,
        "max_workday": 10,
        "survey_mins": 120,
        "surveys_per_year": 3,
        "min_interval_days": 60,
        "cost": { "per_day": 600 },
        "scheduling": { "route_planning": true, "speed_list": [60, 80, 100] }
    }"#;

    #[test]
    fn parses_with_defaults() {
        let c = CompanyConfig::from_json(OGI_JSON).unwrap();
        assert_eq!(c.label, "OGI");
        assert_eq!(c.deployment_type, DeploymentType::Mobile);
        assert_eq!(c.measurement_scale, MeasurementScale::Component);
        assert_eq!(c.sensor.kind, "OGI_camera");
        assert_eq!(c.n_crews, 2);
        assert_eq!(c.temporal_coverage, 1.0);
        assert_eq!(c.cost.per_day, 600.0);
        assert_eq!(c.cost.upfront, 0.0);
        assert_eq!(c.fixed.measurement_interval_days, 1);
        assert!(c.weather_envs.is_unbounded());
        assert!(c.travel_time().is_ok());
    }

    #[test]
    fn unknown_deployment_type() {
        let json = OGI_JSON.replace(r#""mobile""#, r#""aerial""#);
        assert!(matches!(CompanyConfig::from_json(&json), Err(CrewError::Json(_))));
    }

    #[test]
    fn validation_rules() {
        let base = config(MeasurementScale::Site);
        assert!(base.validate().is_ok());

        let mut c = base.clone();
        c.max_workday = 0.0;
        assert!(matches!(c.validate(), Err(CrewError::Config(_))));

        let mut c = base.clone();
        c.temporal_coverage = 1.5;
        assert!(c.validate().is_err());

        let mut c = base.clone();
        c.n_crews = 0;
        assert!(c.validate().is_err());

        let mut c = base.clone();
        c.cost.per_hour = -1.0;
        assert!(c.validate().is_err());

        let mut c = base;
        c.label = "  ".into();
        assert!(c.validate().is_err());
    }

    #[test]
    fn travel_model_selection() {
        let mut c = config(MeasurementScale::Site);
        c.scheduling.route_planning = true;
        assert!(matches!(c.travel_time(), Err(CrewError::Config(_))));

        c.scheduling.route_planning = false;
        c.scheduling.travel_mins = Some(vec![]);
        assert!(matches!(c.travel_time(), Err(CrewError::Schedule(_))));

        c.scheduling.travel_mins = None;
        let free = c.travel_time().unwrap();
        let p = GeoPoint::new(51.0, -114.0);
        assert_eq!(free.minutes(p, GeoPoint::new(52.0, -113.0), &mut SimRng::new(1)), 0.0);
    }

    #[test]
    fn home_bases_inline_then_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name,lon,lat").unwrap();
        writeln!(file, "Camp,-113.5,52.0").unwrap();

        let mut c = config(MeasurementScale::Site);
        c.scheduling.home_bases = vec![HomeBase::new("Inline", GeoPoint::new(51.0, -114.0))];
        c.scheduling.home_bases_file = Some(file.path().to_path_buf());

        let bases = c.home_bases().unwrap();
        let names: Vec<&str> = bases.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["Inline", "Camp"]);
    }

    #[test]
    fn daily_cost_formula() {
        let cost = CostConfig { upfront: 0.0, per_day: 100.0, per_hour: 10.0, per_site: 5.0 };
        assert_eq!(cost.daily(270.0, 3), 160.0);
    }
}

// ── Company construction ──────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use ldar_detect::DetectError;

    use crate::{CrewError, DeploymentType};

    use super::*;

    #[test]
    fn unknown_sensor_fails_at_construction() {
        let mut c = config(MeasurementScale::Site);
        c.sensor.kind = "drone".into();
        let mut w = World::new(sites(1, 1.0));
        let err = CompanyBuilder::new(c)
            .build(&w.sites, &w.clock, &mut w.timeseries)
            .err()
            .unwrap();
        assert!(matches!(err, CrewError::Detect(DetectError::UnknownSensor(_))));
    }

    #[test]
    fn mobile_crews_and_upfront_cost() {
        let mut c = config(MeasurementScale::Site);
        c.n_crews = 3;
        c.cost.upfront = 1_000.0;
        c.scheduling.init_location = Some(GeoPoint::new(50.0, -113.0));
        let mut w = World::new(sites(2, 1.0));
        let company = w.company(c);

        let names: Vec<&str> = company.crews().iter().map(|c| c.name()).collect();
        assert_eq!(names, ["OGI-1", "OGI-2", "OGI-3"]);
        assert_eq!(company.crews()[2].id(), CrewId(3));
        assert_eq!(
            company.crews()[0].mobile_schedule().unwrap().location(),
            GeoPoint::new(50.0, -113.0)
        );
        assert_eq!(company.sensor_id(), "METEC_no_wind");
        assert_eq!(w.today(LABEL, Metric::Cost), 3_000.0);
        assert_eq!(w.today(TOTAL_LABEL, Metric::DailyCost), 3_000.0);
        assert!(w.timeseries.series(LABEL, Metric::Flags).is_some());
    }

    #[test]
    fn fixed_crew_per_sensor() {
        let sites = SiteStoreBuilder::new()
            .site("F-A", GeoPoint::new(51.0, -114.0), 1)
            .fixed_sensors(2)
            .site("F-B", GeoPoint::new(51.1, -114.0), 1)
            .fixed_sensors(1)
            .site("F-C", GeoPoint::new(51.2, -114.0), 1)
            .build()
            .unwrap();
        let mut c = config(MeasurementScale::Site);
        c.deployment_type = DeploymentType::Fixed;
        c.cost.upfront = 500.0;
        let mut w = World::new(sites);
        let company = w.company(c);

        let names: Vec<&str> = company.crews().iter().map(|c| c.name()).collect();
        assert_eq!(names, ["F-A-1", "F-A-2", "F-B-1"]);
        assert!(company.crews().iter().all(|c| c.mobile_schedule().is_none()));
        assert_eq!(w.today(LABEL, Metric::Cost), 1_500.0);
    }
}

// ── Site pool ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod pool_tests {
    use super::*;

    #[test]
    fn quota_interval_and_order() {
        let mut c = config(MeasurementScale::Site);
        c.surveys_per_year = 1;
        c.min_interval_days = 3;
        let mut w = World::new(sites(4, 1.0));
        let company = w.company(c);

        // S1 reached its yearly quota; S2 last surveyed 4 days ago; S3 1 day ago.
        w.sites[1].counters_mut(LABEL).surveys_done_this_year = 1;
        w.sites[1].counters_mut(LABEL).last_survey = Some(Timestep(0));
        w.sites[2].counters_mut(LABEL).last_survey = Some(Timestep(1));
        w.sites[3].counters_mut(LABEL).last_survey = Some(Timestep(4));

        let pool = company.site_pool(&w.sites, Timestep(5));
        assert_eq!(pool, vec![SiteId(0), SiteId(2)]);
    }

    #[test]
    fn longest_unsurveyed_first() {
        let mut w = World::new(sites(3, 1.0));
        let company = w.company(config(MeasurementScale::Site));
        w.sites[0].counters_mut(LABEL).last_survey = Some(Timestep(8));
        w.sites[1].counters_mut(LABEL).last_survey = Some(Timestep(2));

        let pool = company.site_pool(&w.sites, Timestep(10));
        assert_eq!(pool, vec![SiteId(2), SiteId(1), SiteId(0)]);
    }

    #[test]
    fn begin_day_resets_yearly_counts() {
        let mut w = World::starting(sites(1, 1.0), NaiveDate::from_ymd_opt(2021, 12, 31).unwrap(), 7);
        let mut company = w.company(config(MeasurementScale::Site));
        w.work(&mut company);
        assert_eq!(w.sites[0].counters(LABEL).unwrap().surveys_done_this_year, 1);

        w.next_day();
        let c = w.sites[0].counters(LABEL).unwrap();
        assert_eq!(c.surveys_done_this_year, 0);
        assert_eq!(c.surveys_conducted, 1);
    }
}

// ── Crew day ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod crew_day_tests {
    use crate::{DayPhase, Rollover};

    use super::*;

    #[test]
    fn visits_until_pool_exhausted_and_charges_cost() {
        let mut c = config(MeasurementScale::Component);
        c.cost.per_day = 100.0;
        c.cost.per_hour = 10.0;
        c.cost.per_site = 5.0;
        let mut w = World::new(sites(3, 1.0));
        let mut company = w.company(c);

        let out = w.work(&mut company);

        assert!(out.worked());
        assert_eq!(out.sites_visited(), 3);
        // 3 × (30 travel + 60 survey).
        assert_eq!(out.crews[0].minutes, 270.0);
        assert_eq!(out.cost(), 160.0);
        assert_eq!(w.today(LABEL, Metric::SitesVisited), 3.0);
        assert_eq!(w.today(LABEL, Metric::Cost), 160.0);
        assert_eq!(w.today(TOTAL_LABEL, Metric::DailyCost), 160.0);
        assert_eq!(w.tags.len(), 3);
        assert!(company.crews()[0].worked_today());
        assert_eq!(company.crews()[0].phase(), DayPhase::DayEnded);
        // The crew ends the day at the last site.
        assert_eq!(
            company.crews()[0].mobile_schedule().unwrap().location(),
            w.sites[2].location
        );
    }

    #[test]
    fn nothing_reachable_is_an_idle_day() {
        let mut c = config(MeasurementScale::Component);
        c.cost.per_day = 100.0;
        c.scheduling.deployment_months = vec![1];
        let mut w = World::new(sites(2, 1.0));
        let mut company = w.company(c);

        let out = w.work(&mut company);

        assert!(!out.worked());
        assert_eq!(out.cost(), 0.0);
        assert!(!company.crews()[0].worked_today());
        assert!(company.crews()[0].rollover().is_none());
        assert_eq!(w.timeseries.total(LABEL, Metric::Cost), 0.0);
        assert_eq!(w.timeseries.total(TOTAL_LABEL, Metric::DailyCost), 0.0);
    }

    #[test]
    fn empty_pool_is_a_no_op() {
        let mut c = config(MeasurementScale::Component);
        c.surveys_per_year = 1;
        let mut w = World::new(sites(1, 1.0));
        let mut company = w.company(c);
        assert_eq!(w.work(&mut company).sites_visited(), 1);

        w.next_day();
        let out = w.work(&mut company);
        assert!(!out.worked());
        assert_eq!(out.crews[0].minutes, 0.0);
    }

    /// Site 0 needs 600 minutes, site 1 needs 60; 8-hour days, 30-minute hops.
    fn rollover_world(rec: &Recorder) -> (World, Company) {
        let sites = SiteStoreBuilder::new()
            .site("F-000", GeoPoint::new(51.0, -114.0), 1)
            .leak(1.0, 0)
            .survey_mins(LABEL, 600.0)
            .site("F-001", GeoPoint::new(51.1, -114.0), 1)
            .leak(1.0, 0)
            .build()
            .unwrap();
        let mut c = config(MeasurementScale::Component);
        c.weather_envs.wind = Some(ldar_schedule::Bounds::new(0.0, 10.0));
        let mut w = World::new(sites);
        let company = w.build(
            CompanyBuilder::new(c)
                .travel(Arc::new(ConstantTravel(30.0)))
                .hooks(rec.clone()),
        );
        (w, company)
    }

    #[test]
    fn incomplete_site_rolls_over_and_ends_the_day() {
        let rec = Recorder::default();
        let (mut w, mut company) = rollover_world(&rec);

        let out = w.work(&mut company);

        assert_eq!(rec.visits(), vec![SiteId(0)]);
        assert_eq!(out.crews[0].minutes, 480.0);
        assert_eq!(
            company.crews()[0].rollover(),
            Some(&Rollover { site: SiteId(0), remaining_mins: 150.0 })
        );
    }

    #[test]
    fn rollover_site_is_attempted_first_next_day() {
        let rec = Recorder::default();
        let (mut w, mut company) = rollover_world(&rec);
        w.work(&mut company);

        w.next_day();
        let out = w.work(&mut company);

        // Site 1 leads the pool (never surveyed) but the rollover goes first.
        assert_eq!(rec.visits(), vec![SiteId(0), SiteId(0), SiteId(1)]);
        assert!(company.crews()[0].rollover().is_none());
        // 30 + 150 for the rollover, 30 + 60 for site 1.
        assert_eq!(out.crews[0].minutes, 270.0);
    }

    #[test]
    fn rollover_blocked_by_weather_is_kept() {
        let rec = Recorder::default();
        let (mut w, mut company) = rollover_world(&rec);
        w.work(&mut company);

        w.next_day();
        w.weather.wind = 20.0;
        let out = w.work(&mut company);

        assert!(!out.worked());
        assert_eq!(out.cost(), 0.0);
        assert_eq!(rec.visits(), vec![SiteId(0)]);
        assert_eq!(
            company.crews()[0].rollover(),
            Some(&Rollover { site: SiteId(0), remaining_mins: 150.0 })
        );
    }

    #[test]
    fn rollover_finished_when_nothing_else_is_due() {
        let sites = SiteStoreBuilder::new()
            .site("F-000", GeoPoint::new(51.0, -114.0), 1)
            .leak(1.0, 0)
            .survey_mins(LABEL, 600.0)
            .build()
            .unwrap();
        let mut c = config(MeasurementScale::Component);
        c.surveys_per_year = 1;
        let rec = Recorder::default();
        let mut w = World::new(sites);
        let mut company = w.build(
            CompanyBuilder::new(c)
                .travel(Arc::new(ConstantTravel(30.0)))
                .hooks(rec.clone()),
        );
        w.work(&mut company);

        // The partial visit used up the yearly quota, so the pool is empty.
        w.next_day();
        assert!(company.site_pool(&w.sites, w.now()).is_empty());
        let out = w.work(&mut company);

        assert!(out.worked());
        assert_eq!(rec.visits(), vec![SiteId(0), SiteId(0)]);
        assert!(company.crews()[0].rollover().is_none());
        assert_eq!(out.crews[0].minutes, 180.0);
    }

    #[test]
    fn no_dispatch_after_end_of_day_hour() {
        let mut w = World::new(sites(2, 1.0));
        let mut company = w.company(config(MeasurementScale::Component));
        // 8-hour workday: 08:00 to 16:00.
        w.clock.set_hour(20);

        let out = w.work(&mut company);

        assert!(!out.worked());
        assert_eq!(out.sites_visited(), 0);
        assert_eq!(out.cost(), 0.0);
        assert_eq!(w.today(LABEL, Metric::SitesVisited), 0.0);
    }

    #[test]
    fn rollover_waits_while_past_end_of_day_hour() {
        let rec = Recorder::default();
        let (mut w, mut company) = rollover_world(&rec);
        w.work(&mut company);

        w.next_day();
        w.clock.set_hour(16);
        let out = w.work(&mut company);

        assert!(!out.worked());
        assert_eq!(rec.visits(), vec![SiteId(0)]);
        assert_eq!(
            company.crews()[0].rollover(),
            Some(&Rollover { site: SiteId(0), remaining_mins: 150.0 })
        );

        // Within working hours the rollover goes first.
        w.next_day();
        w.clock.set_hour(9);
        w.work(&mut company);
        assert_eq!(rec.visits()[1], SiteId(0));
        assert!(company.crews()[0].rollover().is_none());
    }

    #[test]
    fn no_site_visited_twice_in_a_day() {
        let mut c = config(MeasurementScale::Component);
        c.n_crews = 2;
        let mut w = World::new(sites(1, 1.0));
        let mut company = w.company(c);

        let out = w.work(&mut company);

        assert_eq!(out.sites_visited(), 1);
        assert!(out.crews[0].worked);
        assert!(!out.crews[1].worked);
    }

    #[test]
    fn same_seed_same_run() {
        let run = || {
            let mut b = SiteStoreBuilder::new();
            for i in 0..6 {
                b = b
                    .site(&format!("F-{i}"), GeoPoint::new(51.0 + 0.05 * i as f64, -114.0), 2)
                    .leak(0.002 * (i + 1) as f64, 0)
                    .leak(0.02 * (i + 1) as f64, 1);
            }
            let mut c = CompanyConfig::new(
                LABEL,
                MeasurementScale::Component,
                SensorConfig { kind: "OGI_camera".into(), mdl: vec![0.01275, 2.78e-6], qe: 0.2 },
            );
            c.survey_mins = 90.0;
            c.surveys_per_year = 10;
            c.scheduling.travel_mins = Some(vec![20.0, 40.0, 60.0]);

            let mut w = World::new(b.build().unwrap());
            let mut company = w.build(CompanyBuilder::new(c));
            for _ in 0..5 {
                w.work(&mut company);
                w.next_day();
            }
            let series: Vec<(String, Vec<f64>)> =
                w.timeseries.iter().map(|(k, v)| (k.column_name(), v.to_vec())).collect();
            (series, w.tags.entries().to_vec())
        };
        assert_eq!(run(), run());
    }
}

// ── Flags and venting ─────────────────────────────────────────────────────────

#[cfg(test)]
mod flag_tests {
    use super::*;

    #[test]
    fn site_scale_flags_above_threshold() {
        let mut c = config(MeasurementScale::Site);
        c.follow_up_threshold = 0.5;
        let mut sites = sites(2, 1.0);
        sites[1].leaks[0].rate = 0.1;
        let mut w = World::new(sites);
        let mut company = w.company(c);

        let out = w.work(&mut company);

        assert_eq!(out.flagged, vec![SiteId(0)]);
        assert!(w.sites[0].currently_flagged);
        assert!(!w.sites[1].currently_flagged);
        assert_eq!(w.today(LABEL, Metric::Flags), 1.0);
        assert_eq!(out.crews[0].candidate_flags.len(), 2);
        // Site scale never tags.
        assert!(w.tags.is_empty());
    }

    #[test]
    fn already_flagged_site_is_not_counted_again() {
        let mut c = config(MeasurementScale::Site);
        c.follow_up_threshold = 0.5;
        let mut w = World::new(sites(1, 1.0));
        w.sites[0].currently_flagged = true;
        let mut company = w.company(c);

        let out = w.work(&mut company);

        assert!(out.flagged.is_empty());
        assert_eq!(w.today(LABEL, Metric::Flags), 0.0);
    }

    #[test]
    fn component_scale_clears_flag() {
        let mut w = World::new(sites(1, 1.0));
        w.sites[0].currently_flagged = true;
        let mut company = w.company(config(MeasurementScale::Component));

        let out = w.work(&mut company);

        assert!(!w.sites[0].currently_flagged);
        assert!(out.crews[0].candidate_flags.is_empty());
    }

    #[test]
    fn venting_adds_to_site_rate() {
        let empty = SiteStoreBuilder::new()
            .site("F-000", GeoPoint::new(51.0, -114.0), 2)
            .build()
            .unwrap();
        let mut w = World::new(empty);
        let mut company = w.company(config(MeasurementScale::Site));

        let out = w.work_vented(&mut company, &[2.0]);

        let report = &out.crews[0].candidate_flags[0];
        assert_eq!(report.vent_rate, 2.0);
        assert_eq!(report.site_true_rate, 2.0);
        assert!(report.found_leak);
        assert_eq!(report.site_measured_rate, 2.0);
    }
}

// ── Fixed deployments ─────────────────────────────────────────────────────────

#[cfg(test)]
mod fixed_tests {
    use crate::DeploymentType;

    use super::*;

    #[test]
    fn measures_on_cadence_and_charges_worked_days() {
        let sites = SiteStoreBuilder::new()
            .site("F-000", GeoPoint::new(51.0, -114.0), 1)
            .leak(1.0, 0)
            .fixed_sensors(1)
            .build()
            .unwrap();
        let mut c = config(MeasurementScale::Site);
        c.deployment_type = DeploymentType::Fixed;
        c.fixed.measurement_interval_days = 2;
        c.cost.per_day = 10.0;
        c.cost.per_site = 1.0;
        let mut w = World::new(sites);
        let mut company = w.company(c);

        let mut worked = Vec::new();
        for _ in 0..4 {
            worked.push(w.work(&mut company).worked());
            w.next_day();
        }

        assert_eq!(worked, [true, false, true, false]);
        assert_eq!(w.timeseries.total(LABEL, Metric::SitesVisited), 2.0);
        assert_eq!(w.timeseries.total(LABEL, Metric::Cost), 22.0);
    }
}

// ── Operator ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod operator_tests {
    use ldar_site::LeakStatus;

    use crate::{OPERATOR_LABEL, Operator, OperatorConfig};

    use super::*;

    /// Site 0: rates 1 and 2; site 1: four leaks of 0.5.
    fn census() -> Vec<Site> {
        SiteStoreBuilder::new()
            .site("F-000", GeoPoint::new(51.0, -114.0), 1)
            .leak(1.0, 0)
            .leak(2.0, 0)
            .site("F-001", GeoPoint::new(51.1, -114.0), 1)
            .leak(0.5, 0)
            .leak(0.5, 0)
            .leak(0.5, 0)
            .leak(0.5, 0)
            .build()
            .unwrap()
    }

    fn operator(w: &mut World, lpr: f64, max_det_op: f64, strength: f64) -> Operator {
        let config = OperatorConfig { lpr, max_det_op, strength, max_rate: None };
        Operator::new(config, &w.sites, &mut w.timeseries).unwrap()
    }

    fn run(w: &mut World, op: &Operator) -> u32 {
        let mut ctx = DayContext::new(&w.clock, &mut w.rng, &mut w.timeseries, &mut w.tags, &w.weather);
        op.work_a_day(&mut w.sites, &mut ctx)
    }

    #[test]
    fn probability_formula() {
        let mut w = World::new(census());
        let op = operator(&mut w, 0.003, 0.1, 1.0);
        // leak_term = 6/6 · 3 = 3 → 0.003·7/3 + 0.1·(1/2).
        let p = op.detection_probability(1.0, 6, 2.0);
        assert!((p - 0.057).abs() < 1e-12);
        // Half the leaks repaired: leak_term = 6.
        let p = op.detection_probability(1.0, 3, 2.0);
        assert!((p - 0.0535).abs() < 1e-12);
        assert_eq!(op.detection_probability(1.0, 0, 2.0), 0.0);
    }

    #[test]
    fn probability_clamped_then_scaled() {
        let mut w = World::new(census());
        let op = operator(&mut w, 0.0, 5.0, 0.5);
        assert_eq!(op.detection_probability(2.0, 6, 2.0), 0.5);
    }

    #[test]
    fn largest_leak_is_certain_with_full_max_det_op() {
        let mut w = World::new(census());
        let op = operator(&mut w, 0.0, 1.0, 1.0);

        let new_tags = run(&mut w, &op);
        assert!(new_tags >= 1);
        assert!(w.sites[0].leaks[1].is_tagged());
        let record = w.sites[0].leaks[1].tag.record().unwrap();
        assert_eq!(record.company, OPERATOR_LABEL);
        assert_eq!(record.crew, CrewId(1));
        assert_eq!(w.today(OPERATOR_LABEL, Metric::Tags), f64::from(new_tags));
    }

    #[test]
    fn repeat_detection_is_redundant() {
        let mut w = World::new(census());
        let config = OperatorConfig { lpr: 0.0, max_det_op: 1.0, strength: 1.0, max_rate: Some(0.5) };
        let op = Operator::new(config, &w.sites, &mut w.timeseries).unwrap();

        assert_eq!(run(&mut w, &op), 6);
        assert_eq!(run(&mut w, &op), 0);
        assert_eq!(w.tags.len(), 6);
        assert_eq!(w.today(OPERATOR_LABEL, Metric::RedundTags), 6.0);
    }

    #[test]
    fn zero_strength_never_detects() {
        let mut w = World::new(census());
        let op = operator(&mut w, 1.0, 1.0, 0.0);
        assert_eq!(run(&mut w, &op), 0);
        assert!(w.tags.is_empty());
    }

    #[test]
    fn no_active_leaks() {
        let mut w = World::new(census());
        for leak in w.sites.iter_mut().flat_map(|s| s.leaks.iter_mut()) {
            leak.status = LeakStatus::Repaired;
        }
        let op = operator(&mut w, 1.0, 1.0, 1.0);
        assert_eq!(run(&mut w, &op), 0);
    }

    #[test]
    fn config_from_json_and_validation() {
        let c: OperatorConfig =
            serde_json::from_str(r#"{"LPR": 0.0065, "max_det_op": 0.1, "operator_strength": 0.5}"#)
                .unwrap();
        assert_eq!(c.strength, 0.5);
        assert!(c.max_rate.is_none());
        assert!(c.validate().is_ok());

        let bad = OperatorConfig { strength: 1.5, ..c };
        assert!(bad.validate().is_err());
    }
}
