//! Emission aggregation: per-leak rates → per-equipment and per-site rates.
//!
//! Aggregation is an external collaborator of the crews.  [`Aggregator`] is
//! the seam; [`EquipmentAggregator`] is the straightforward sum used when the
//! application has nothing more specific.

use crate::Site;

/// The rates a crew sees when it arrives at a site.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AggregateRates {
    /// Indices into `site.leaks` of the leaks present (active) today.
    pub leaks_present:   Vec<usize>,
    /// Summed rate per equipment group, g/s.  Length = `site.equipment_groups`.
    pub equipment_rates: Vec<f64>,
    /// Summed rate over the whole site, g/s.
    pub site_rate:       f64,
}

impl AggregateRates {
    /// Add a vented rate: the whole amount to the site, split equally across
    /// equipment groups.
    pub fn add_venting(&mut self, venting: f64) {
        if venting == 0.0 {
            return;
        }
        self.site_rate += venting;
        let n = self.equipment_rates.len();
        if n > 0 {
            let share = venting / n as f64;
            for r in &mut self.equipment_rates {
                *r += share;
            }
        }
    }
}

pub trait Aggregator {
    fn aggregate(&self, site: &Site) -> AggregateRates;
}

/// Sums active leaks by equipment group.
///
/// Leaks whose group index is out of range are folded into the last group.
#[derive(Copy, Clone, Debug, Default)]
pub struct EquipmentAggregator;

impl Aggregator for EquipmentAggregator {
    fn aggregate(&self, site: &Site) -> AggregateRates {
        let groups = site.equipment_groups.max(1) as usize;
        let mut rates = AggregateRates {
            leaks_present:   Vec::new(),
            equipment_rates: vec![0.0; groups],
            site_rate:       0.0,
        };
        for (i, leak) in site.leaks.iter().enumerate() {
            if !leak.is_active() {
                continue;
            }
            let group = (leak.equipment_group as usize).min(groups - 1);
            rates.leaks_present.push(i);
            rates.equipment_rates[group] += leak.rate;
            rates.site_rate += leak.rate;
        }
        rates
    }
}
