//! The per-site, per-day visit plan.

use ldar_core::SiteId;

/// What visiting `site` right now would cost.
///
/// Plans are ephemeral: built fresh for every candidate site each time the
/// crew picks its next stop, and discarded at the end of the day.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VisitPlan {
    pub site:           SiteId,
    /// Travel from the crew's current location, minutes.
    pub travel_mins:    f64,
    /// Survey minutes still owed after today's visit; 0 when it completes.
    pub remaining_mins: f64,
    /// Minutes this visit consumes today (travel + work).
    pub total_mins:     f64,
    /// Visiting today would leave the site incomplete.
    pub rollover:       bool,
    /// Any work time is left after travelling there.
    pub startable:      bool,
}

impl VisitPlan {
    #[inline]
    pub fn completes_today(&self) -> bool {
        self.remaining_mins == 0.0
    }
}
