//! `ldar-crew` — companies, their crews, and the daily work loop.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | [`config`]   | `CompanyConfig` and its blocks (cost, scheduling, fixed)        |
//! | [`builder`]  | `CompanyBuilder`                                                |
//! | [`company`]  | `Company`, `DayOutcome`, `begin_day`                            |
//! | [`crew`]     | `Crew`, `CrewKind`, `DayPhase`, `Rollover`, `CrewDay`           |
//! | [`operator`] | `Operator`, `OperatorConfig`                                    |
//! | [`hooks`]    | `CrewHooks` trait, `NoopHooks`                                  |
//! | [`context`]  | `DayContext`                                                    |
//! | [`error`]    | `CrewError`, `CrewResult<T>`                                    |
//!
//! # Daily flow
//!
//! ```text
//! driver ─ begin_day(sites, clock)
//!        ├ Company::work_a_day ─ Crew::work_a_day ─ { plan, choose, visit → Sensor::detect }
//!        └ Operator::work_a_day
//! ```
//!
//! The driver owns the clock, the sites and the counters table and lends
//! them to each company through a [`DayContext`].

pub mod builder;
pub mod company;
pub mod config;
pub mod context;
pub mod crew;
pub mod error;
pub mod hooks;
pub mod operator;

#[cfg(test)]
mod tests;

pub use builder::CompanyBuilder;
pub use company::{Company, DayOutcome, begin_day};
pub use config::{CompanyConfig, CostConfig, DeploymentType, FixedConfig, SchedulingConfig};
pub use context::DayContext;
pub use crew::{CompanyView, Crew, CrewDay, CrewKind, DayPhase, Rollover};
pub use error::{CrewError, CrewResult};
pub use hooks::{CrewHooks, NoopHooks};
pub use operator::{OPERATOR_LABEL, Operator, OperatorConfig};
