//! `ldar-site` — the entities every crew mutates.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`leak`]      | `Leak`, `LeakStatus`, `TagState`, `TagRecord`                |
//! | [`site`]      | `Site`, `SiteCounters`                                       |
//! | [`tags`]      | `TagQueue`, `TagEntry` (tags pending repair)                 |
//! | [`aggregate`] | `Aggregator` trait, `AggregateRates`, `EquipmentAggregator`  |
//! | [`builder`]   | `SiteStoreBuilder`                                           |
//! | [`error`]     | `SiteError`, `SiteResult<T>`                                 |
//!
//! # Ownership
//!
//! Sites own their leaks.  The site table (`Vec<Site>`, indexed by
//! `SiteId`) is owned by the simulation state and lent mutably to one crew
//! at a time, so a visit can update the site's counters and its leaks' tag
//! state through a single `&mut Site`.

pub mod aggregate;
pub mod builder;
pub mod error;
pub mod leak;
pub mod site;
pub mod tags;


pub use aggregate::{AggregateRates, Aggregator, EquipmentAggregator};
pub use builder::SiteStoreBuilder;
pub use error::{SiteError, SiteResult};
pub use leak::{Leak, LeakStatus, TagRecord, TagState};
pub use site::{Site, SiteCounters};
pub use tags::{TagEntry, TagQueue};
