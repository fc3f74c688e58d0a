//! The leak-tag state machine and its side effects.

use ldar_core::Metric;
use ldar_site::{Leak, TagEntry, TagRecord};

use crate::DetectEnv;

/// Tag `leak` on behalf of `env.label` / `env.crew`.
///
/// On the `untagged → tagged` transition the leak is stamped with the
/// current date, the detecting company and crew, and `measured_rate`; it is
/// appended to the tags-pending-repair queue and `{label}_tags` is
/// incremented.  On an already-tagged leak only `{label}_redund_tags` is
/// incremented.
///
/// Returns `true` only when this call performed the transition; callers add
/// the leak's measured rate to the site total only in that case.
pub fn update_tag(leak: &mut Leak, measured_rate: f64, env: &mut DetectEnv<'_>) -> bool {
    let t = env.clock.current_timestep;
    let date = env.clock.current_date();
    let newly_tagged = leak.tag.tag(TagRecord {
        date,
        company: env.label.to_owned(),
        crew: env.crew,
        measured_rate,
    });

    if newly_tagged {
        env.tags.push(TagEntry {
            site:    leak.site,
            leak:    leak.id,
            date,
            company: env.label.to_owned(),
            crew:    env.crew,
        });
        env.timeseries.incr(env.label, Metric::Tags, t);
        tracing::trace!(leak = %leak.id, site = %leak.site, company = env.label, "leak tagged");
    } else {
        env.timeseries.incr(env.label, Metric::RedundTags, t);
    }
    newly_tagged
}
