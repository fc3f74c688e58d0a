//! basin — one year of LDAR programs over a synthetic production basin.
//!
//! Forty well pads scattered around two field offices.  A ground OGI
//! company tags individual leaks while an aerial company screens whole
//! sites for follow-up.  Every tenth pad also carries a continuous monitor,
//! and site operators report leaks informally on the side.
//!
//! Set `RUST_LOG=debug` to see every crew day.

use std::f64::consts::TAU;
use std::io::Cursor;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ldar_core::{GeoPoint, Metric, SimClock, SimRng, Timeseries, WeatherProvider, WeatherVar};
use ldar_crew::{
    Company, CompanyBuilder, CompanyConfig, DayContext, Operator, OperatorConfig, begin_day,
    OPERATOR_LABEL,
};
use ldar_output::{CsvWriter, OutputWriter};
use ldar_schedule::load_home_bases_reader;
use ldar_site::{Site, SiteStoreBuilder, TagQueue};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:       u64   = 42;
const SITE_COUNT: usize = 40;
const SIM_DAYS:   usize = 365;
const OUTPUT_DIR: &str  = "output/basin";

/// Venting emissions sampled per visit, g/s.
const VENTS: [f64; 6] = [0.0, 0.0, 0.0, 0.05, 0.2, 1.5];

const HOME_BASES_CSV: &str = "\
name,lon,lat\n\
Drayton Valley,-114.98,53.22\n\
Rocky Mountain House,-114.92,52.37\n\
";

const COMPANIES_JSON: &str = r#"[
    {
        "label": "OGI",
        "measurement_scale": "component",
        "sensor": { "type": "OGI_camera", "MDL": [0.01275, 2.78e-6], "QE": 0.3 },
        "n_crews": 2,
        "max_workday": 10,
        "survey_mins": 180,
        "surveys_per_year": 3,
        "min_interval_days": 90,
        "cost": { "upfront": 5000, "per_day": 600, "per_hour": 40, "per_site": 25 },
        "weather_envs": { "wind": [0, 10], "temp": [-25, 40], "precip": [0, 1] },
        "scheduling": {
            "route_planning": true,
            "speed_list": [60, 80, 100],
            "deployment_months": [4, 5, 6, 7, 8, 9, 10]
        }
    },
    {
        "label": "aerial",
        "measurement_scale": "site",
        "sensor": { "type": "METEC_wind", "MDL": [2.0, 8.0, 0.0], "QE": 0.2 },
        "max_workday": 6,
        "survey_mins": 15,
        "surveys_per_year": 6,
        "min_interval_days": 30,
        "follow_up_threshold": 0.5,
        "cost": { "per_day": 3000 },
        "weather_envs": { "wind": [0, 8] },
        "scheduling": { "travel_mins": [5, 10, 15] }
    },
    {
        "label": "CM",
        "deployment_type": "fixed",
        "measurement_scale": "site",
        "sensor": { "type": "METEC_no_wind", "MDL": [3.0, 4.0] },
        "temporal_coverage": 0.8,
        "follow_up_threshold": 0.2,
        "cost": { "upfront": 20000, "per_day": 5 }
    }
]"#;

const OPERATOR_JSON: &str = r#"{ "LPR": 0.0065, "max_det_op": 0.05, "operator_strength": 0.5 }"#;

// ── Weather ───────────────────────────────────────────────────────────────────

/// Smooth seasonal cycle with a daily wind peak in the afternoon.
struct SeasonalWeather;

impl SeasonalWeather {
    fn value(var: WeatherVar, at: NaiveDateTime) -> f64 {
        let season = (f64::from(at.ordinal()) / 365.0 * TAU).cos();
        let hour = f64::from(at.hour());
        match var {
            WeatherVar::Wind   => 4.0 + 2.0 * season + 2.0 * ((hour - 15.0) / 24.0 * TAU).cos(),
            WeatherVar::Temp   => 5.0 - 15.0 * season,
            WeatherVar::Precip => if at.day() % 9 == 0 { 2.0 } else { 0.0 },
        }
    }
}

impl WeatherProvider for SeasonalWeather {
    fn hourly(&self, var: WeatherVar, at: NaiveDateTime, hours: u32, _location: GeoPoint) -> Vec<f64> {
        (0..hours.max(1))
            .rev()
            .map(|h| Self::value(var, at - chrono::Duration::hours(i64::from(h))))
            .collect()
    }
}

// ── Sites ─────────────────────────────────────────────────────────────────────

/// Pads within ~50 km of the field offices, each with a few log-normal leaks.
fn build_sites(rng: &mut SimRng) -> Result<Vec<Site>> {
    let mut b = SiteStoreBuilder::new();
    for i in 0..SITE_COUNT {
        let location = GeoPoint::new(rng.gen_range(52.3..53.3), rng.gen_range(-115.6..-114.4));
        let groups = rng.gen_range(2..6u32);
        b = b.site(&format!("PAD-{i:03}"), location, groups);
        for _ in 0..rng.gen_range(0..5usize) {
            let rate = rng.normal(-4.0, 1.5).exp();
            b = b.leak(rate, rng.gen_range(0..groups));
        }
        if i % 10 == 0 {
            b = b.fixed_sensors(1);
        }
    }
    Ok(b.build()?)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let start = NaiveDate::from_ymd_opt(2023, 1, 1).context("invalid start date")?;
    let mut clock = SimClock::new(start);
    let mut rng = SimRng::new(SEED);
    let mut timeseries = Timeseries::new(SIM_DAYS);
    let mut tags = TagQueue::new();
    let weather = SeasonalWeather;

    // 1. Sites.
    let mut sites = build_sites(&mut rng.child(1))?;
    let leaks: usize = sites.iter().map(|s| s.leaks.len()).sum();
    info!(sites = sites.len(), leaks, "basin built");

    // 2. Companies.
    let home_bases = load_home_bases_reader(Cursor::new(HOME_BASES_CSV))?;
    let configs: Vec<CompanyConfig> = serde_json::from_str(COMPANIES_JSON)?;
    let mut companies: Vec<Company> = Vec::with_capacity(configs.len());
    for mut config in configs {
        config.scheduling.home_bases = home_bases.clone();
        let company = CompanyBuilder::new(config)
            .build(&sites, &clock, &mut timeseries)
            .context("company configuration")?;
        companies.push(company);
    }
    let operator = Operator::new(serde_json::from_str::<OperatorConfig>(OPERATOR_JSON)?, &sites, &mut timeseries)?;

    // 3. Output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let mut out = CsvWriter::new(Path::new(OUTPUT_DIR))?;

    // 4. Run.
    let t0 = Instant::now();
    let mut flagged = 0usize;
    for _ in 0..SIM_DAYS {
        begin_day(&mut sites, &clock);
        for company in &mut companies {
            let mut ctx = DayContext::new(&clock, &mut rng, &mut timeseries, &mut tags, &weather)
                .with_venting(&VENTS);
            flagged += company.work_a_day(&mut sites, &mut ctx).flagged.len();
        }
        let mut ctx = DayContext::new(&clock, &mut rng, &mut timeseries, &mut tags, &weather);
        operator.work_a_day(&mut sites, &mut ctx);

        out.write_tags(&tags.drain())?;
        clock.advance();
    }
    out.write_timeseries(&timeseries, start)?;
    out.finish()?;
    info!(elapsed_s = t0.elapsed().as_secs_f64(), "run complete");

    // 5. Summary.
    println!();
    println!("{:<10} {:>8} {:>8} {:>8} {:>12}", "Company", "Visits", "Tags", "Missed", "Cost");
    println!("{}", "-".repeat(50));
    let labels = companies.iter().map(Company::label).chain([OPERATOR_LABEL]);
    for label in labels {
        println!(
            "{:<10} {:>8} {:>8} {:>8} {:>12.0}",
            label,
            timeseries.total(label, Metric::SitesVisited),
            timeseries.total(label, Metric::Tags),
            timeseries.total(label, Metric::MissedLeaks),
            timeseries.total(label, Metric::Cost),
        );
    }
    println!();
    println!("Sites flagged for follow-up: {flagged}");
    println!("Output written to {OUTPUT_DIR}/");

    Ok(())
}
