//! `ldar-core` — foundational types for the LDAR simulation engine.
//!
//! This crate is a dependency of every other `ldar-*` crate.  It has no
//! `ldar-*` dependencies and only a handful of external ones (`rand`,
//! `rand_distr`, `chrono`, `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `LeakId`, `SiteId`, `CrewId`                          |
//! | [`geo`]         | `GeoPoint`, haversine distance                        |
//! | [`time`]        | `Timestep`, `SimClock`                                |
//! | [`rng`]         | `SimRng` (the single seeded source for a run)         |
//! | [`timeseries`]  | `Metric`, `CounterKey`, `Timeseries`                  |
//! | [`weather`]     | `WeatherVar`, `WeatherProvider`, `ConstantWeather`    |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;
pub mod timeseries;
pub mod weather;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::GeoPoint;
pub use ids::{CrewId, LeakId, SiteId};
pub use rng::SimRng;
pub use time::{SimClock, Timestep};
pub use timeseries::{CounterKey, Metric, Timeseries};
pub use weather::{ConstantWeather, WeatherProvider, WeatherVar};
