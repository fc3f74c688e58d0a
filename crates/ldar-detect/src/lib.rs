//! `ldar-detect` — turning true emission rates into detections and tags.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                           |
//! |--------------|--------------------------------------------------------------------|
//! | [`pod`]      | Closed-form PoD curves, unit constants, quantification error       |
//! | [`scale`]    | `MeasurementScale` (site / equipment / component)                  |
//! | [`sensor`]   | `Sensor` trait, `DetectEnv`, `SiteDetectionReport`                 |
//! | [`logistic`] | `LogisticSensor` — METEC curves, with or without wind              |
//! | [`ogi`]      | `FixedCurveSensor` — OGI camera curve with temporal coverage       |
//! | [`registry`] | `SensorRegistry`, `SensorConfig`, `SensorSettings`                 |
//! | [`tag`]      | `update_tag` — the leak-tag state machine with its side effects    |
//! | [`error`]    | `DetectError`, `DetectResult<T>`                                   |
//!
//! # Design notes
//!
//! Sensors are resolved once, when a company is constructed, from the
//! string id in its configuration.  After that every visit is a plain
//! trait-object call: `sensor.detect(site, rates, venting, env)`.
//!
//! Sensors own no mutable state.  Everything a detection touches (the
//! site's counters, leak tags, the counters table, the tag queue, the
//! run's RNG) is lent to it through `&mut Site` and [`DetectEnv`].

pub mod error;
pub mod logistic;
pub mod ogi;
pub mod pod;
pub mod registry;
pub mod scale;
pub mod sensor;
pub mod tag;


pub use error::{DetectError, DetectResult};
pub use logistic::LogisticSensor;
pub use ogi::FixedCurveSensor;
pub use registry::{SensorConfig, SensorFactory, SensorRegistry, SensorSettings};
pub use scale::MeasurementScale;
pub use sensor::{DetectEnv, Sensor, SiteDetectionReport};
pub use tag::update_tag;
