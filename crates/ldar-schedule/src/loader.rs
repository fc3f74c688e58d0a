//! Home-base CSV loader.
//!
//! # CSV format
//!
//! One row per overnight base.  Extra columns are ignored.
//!
//! ```csv
//! name,lon,lat
//! Red Deer,-113.81,52.27
//! Drumheller,-112.71,51.46
//! ```

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use ldar_core::GeoPoint;

use crate::{ScheduleError, ScheduleResult};

/// A town or camp where a mobile crew can stay overnight.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HomeBase {
    pub name: String,
    pub lon:  f64,
    pub lat:  f64,
}

impl HomeBase {
    pub fn new(name: impl Into<String>, location: GeoPoint) -> Self {
        Self { name: name.into(), lon: location.lon, lat: location.lat }
    }

    #[inline]
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }

    fn validate(&self) -> ScheduleResult<()> {
        GeoPoint::checked(self.lat, self.lon)?;
        Ok(())
    }
}

/// Load home bases from a CSV file.
pub fn load_home_bases_csv(path: &Path) -> ScheduleResult<Vec<HomeBase>> {
    let file = std::fs::File::open(path)?;
    load_home_bases_reader(file)
}

/// Like [`load_home_bases_csv`] but accepts any `Read` source.
pub fn load_home_bases_reader<R: Read>(reader: R) -> ScheduleResult<Vec<HomeBase>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut bases = Vec::new();
    for result in csv_reader.deserialize::<HomeBase>() {
        let base = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
        base.validate()?;
        bases.push(base);
    }
    Ok(bases)
}
