use ldar_core::SiteId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("leak added before any site")]
    LeakWithoutSite,

    #[error("site {site} has zero equipment groups")]
    NoEquipmentGroups { site: SiteId },

    #[error("leak equipment group {group} out of range for site {site} ({groups} groups)")]
    EquipmentGroupOutOfRange {
        site:   SiteId,
        group:  u32,
        groups: u32,
    },

    #[error("negative leak rate {rate} at site {site}")]
    NegativeRate { site: SiteId, rate: f64 },
}

pub type SiteResult<T> = Result<T, SiteError>;
