//! `ldar-schedule` — where a crew can go today, and how long it takes.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                       |
//! |-----------------|----------------------------------------------------------------|
//! | [`mobile`]      | `MobileSchedule`: daily time budget, planning, site choice, accommodation |
//! | [`plan`]        | `VisitPlan`                                                    |
//! | [`fixed`]       | `FixedSchedule`: one sensor bound to one site with a cadence   |
//! | [`deployment`]  | `DeploymentWindow`, `WeatherEnvelope`, `Bounds`                |
//! | [`travel`]      | `TravelTime` trait, `SpeedTravel`, `SampledTravel`, `ConstantTravel` |
//! | [`loader`]      | `HomeBase`, `load_home_bases_csv`, `load_home_bases_reader`    |
//! | [`error`]       | `ScheduleError`, `ScheduleResult<T>`                           |
//!
//! # Day model (summary)
//!
//! A crew works `max_workday` hours centred on noon:
//!
//! ```text
//! start_hour = (24 − max_workday) / 2
//! end_hour   = start_hour + max_workday
//! ```
//!
//! The schedule keeps an intraday clock of minutes elapsed since
//! `start_hour`.  Planning a visit never moves that clock; only
//! [`MobileSchedule::update_schedule`] does.

pub mod deployment;
pub mod error;
pub mod fixed;
pub mod loader;
pub mod mobile;
pub mod plan;
pub mod travel;


pub use deployment::{Bounds, DeploymentWindow, WeatherEnvelope};
pub use error::{ScheduleError, ScheduleResult};
pub use fixed::FixedSchedule;
pub use loader::{HomeBase, load_home_bases_csv, load_home_bases_reader};
pub use mobile::{MobileSchedule, ScheduleSettings};
pub use plan::VisitPlan;
pub use travel::{ConstantTravel, SampledTravel, SpeedTravel, TravelTime};
