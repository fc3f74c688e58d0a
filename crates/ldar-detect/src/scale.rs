//! Granularity at which a sensor evaluates detection.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementScale {
    /// One draw against the aggregate site rate.
    Site,
    /// One draw per equipment group.
    Equipment,
    /// One draw per leak; the only scale that tags leaks.
    #[serde(alias = "leak")]
    Component,
}

impl MeasurementScale {
    /// Leak-level measurement clears the site flag instead of queueing the
    /// site for follow-up.
    pub fn is_leak_level(self) -> bool {
        self == MeasurementScale::Component
    }
}

impl fmt::Display for MeasurementScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MeasurementScale::Site      => "site",
            MeasurementScale::Equipment => "equipment",
            MeasurementScale::Component => "component",
        })
    }
}
