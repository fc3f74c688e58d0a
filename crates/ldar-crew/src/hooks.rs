//! Per-visit extension points.

use ldar_core::CrewId;
use ldar_detect::SiteDetectionReport;
use ldar_site::Site;

/// Company-specific behaviour around each site visit.
///
/// Both methods default to no-ops, so a company only overrides what it
/// changes.  Hooks run inside the crew's day and see the same site the
/// sensor does.
pub trait CrewHooks: Send + Sync {
    /// Called on arrival, before the site's rates are aggregated.
    fn pre_visit(&self, _crew: CrewId, _site: &mut Site) {}

    /// Called after detection, before flags and counters are updated.
    fn post_visit(&self, _crew: CrewId, _site: &mut Site, _report: &mut SiteDetectionReport) {}
}

/// Hooks that change nothing.
pub struct NoopHooks;

impl CrewHooks for NoopHooks {}
