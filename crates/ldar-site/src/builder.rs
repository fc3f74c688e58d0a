//! Fluent builder for constructing the site table in one step.
//!
//! # Usage
//!
//! ```rust
//! use ldar_core::GeoPoint;
//! use ldar_site::SiteStoreBuilder;
//!
//! let sites = SiteStoreBuilder::new()
//!     .site("F-001", GeoPoint::new(51.0, -114.0), 2)
//!     .leak(0.05, 0)
//!     .leak(1.20, 1)
//!     .site("F-002", GeoPoint::new(51.1, -114.2), 1)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(sites.len(), 2);
//! assert_eq!(sites[0].leaks.len(), 2);
//! ```
//!
//! Site ids are assigned in insertion order so `sites[id.index()].id == id`;
//! leak ids are unique across the whole table.

use ldar_core::{GeoPoint, LeakId, SiteId};

use crate::{Leak, Site, SiteError, SiteResult};

/// Fluent builder for the site table (`Vec<Site>` indexed by `SiteId`).
///
/// Per-site modifiers (`leak`, `fixed_sensors`, `survey_mins`) apply to the
/// most recently added site.  Errors are deferred to [`build`](Self::build).
#[derive(Default)]
pub struct SiteStoreBuilder {
    sites:     Vec<Site>,
    next_leak: u32,
    error:     Option<SiteError>,
}

impl SiteStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new site.
    pub fn site(mut self, facility_id: &str, location: GeoPoint, equipment_groups: u32) -> Self {
        let id = SiteId(self.sites.len() as u32);
        if equipment_groups == 0 && self.error.is_none() {
            self.error = Some(SiteError::NoEquipmentGroups { site: id });
        }
        self.sites.push(Site::new(id, facility_id, location, equipment_groups));
        self
    }

    /// Add an active, untagged leak (rate in g/s) to the current site.
    pub fn leak(mut self, rate: f64, equipment_group: u32) -> Self {
        let id = LeakId(self.next_leak);
        self.next_leak += 1;
        match self.sites.last_mut() {
            None => {
                self.error.get_or_insert(SiteError::LeakWithoutSite);
            }
            Some(site) => {
                if equipment_group >= site.equipment_groups {
                    self.error.get_or_insert(SiteError::EquipmentGroupOutOfRange {
                        site:   site.id,
                        group:  equipment_group,
                        groups: site.equipment_groups,
                    });
                } else if rate < 0.0 {
                    self.error.get_or_insert(SiteError::NegativeRate { site: site.id, rate });
                }
                site.leaks.push(Leak::new(id, site.id, equipment_group, rate));
            }
        }
        self
    }

    /// Set the number of fixed sensors on the current site.
    pub fn fixed_sensors(mut self, n: u32) -> Self {
        if let Some(site) = self.sites.last_mut() {
            site.fixed_sensors = n;
        }
        self
    }

    /// Override company `label`'s survey duration on the current site.
    pub fn survey_mins(mut self, label: &str, mins: f64) -> Self {
        if let Some(site) = self.sites.last_mut() {
            site.counters_mut(label).survey_mins = Some(mins);
        }
        self
    }

    /// Validate and return the site table.
    pub fn build(mut self) -> SiteResult<Vec<Site>> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        for site in &mut self.sites {
            site.initial_leaks = site.leaks.len() as u32;
        }
        Ok(self.sites)
    }
}
