//! Per-timestep counters table keyed by (company label, metric).
//!
//! Every series is a dense `Vec<f64>` indexed by `Timestep`.  Keys are kept
//! in a `BTreeMap` so that iteration (and therefore CSV column order) is
//! deterministic.  Series grow on demand: adding to a timestep past the end
//! extends the series with zeros.

use std::collections::BTreeMap;
use std::fmt;

use crate::Timestep;

/// Label under which run-wide series (e.g. `total_daily_cost`) are stored.
pub const TOTAL_LABEL: &str = "total";

/// The counters produced by companies, crews and the operator.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Metric {
    SitesVisited,
    MissedLeaks,
    RedundTags,
    Tags,
    Flags,
    Cost,
    DailyCost,
}

impl Metric {
    pub fn as_str(self) -> &'static str {
        match self {
            Metric::SitesVisited => "sites_visited",
            Metric::MissedLeaks  => "missed_leaks",
            Metric::RedundTags   => "redund_tags",
            Metric::Tags         => "tags",
            Metric::Flags        => "flags",
            Metric::Cost         => "cost",
            Metric::DailyCost    => "daily_cost",
        }
    }
}

/// Key of one counter series.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CounterKey {
    pub label:  String,
    pub metric: Metric,
}

impl CounterKey {
    pub fn new(label: &str, metric: Metric) -> Self {
        Self { label: label.to_owned(), metric }
    }

    /// The `{label}_{metric}` column name used by reporting layers.
    pub fn column_name(&self) -> String {
        format!("{}_{}", self.label, self.metric.as_str())
    }
}

impl fmt::Display for CounterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.column_name())
    }
}

/// The counters table.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timeseries {
    n_timesteps: usize,
    series:      BTreeMap<CounterKey, Vec<f64>>,
}

impl Timeseries {
    /// Create an empty table sized for `n_timesteps` days.
    pub fn new(n_timesteps: usize) -> Self {
        Self { n_timesteps, series: BTreeMap::new() }
    }

    /// Number of timesteps every series spans.
    pub fn n_timesteps(&self) -> usize {
        self.n_timesteps
    }

    /// Create the series for `(label, metric)` if absent (all zeros).
    pub fn register(&mut self, label: &str, metric: Metric) {
        let n = self.n_timesteps;
        self.series
            .entry(CounterKey::new(label, metric))
            .or_insert_with(|| vec![0.0; n]);
    }

    /// Add `value` to the `(label, metric)` series at `t`.
    pub fn add(&mut self, label: &str, metric: Metric, t: Timestep, value: f64) {
        let idx = t.index();
        if idx >= self.n_timesteps {
            self.n_timesteps = idx + 1;
        }
        let n = self.n_timesteps;
        let series = self
            .series
            .entry(CounterKey::new(label, metric))
            .or_insert_with(|| vec![0.0; n]);
        if series.len() <= idx {
            series.resize(idx + 1, 0.0);
        }
        series[idx] += value;
    }

    /// Increment the `(label, metric)` series at `t` by one.
    #[inline]
    pub fn incr(&mut self, label: &str, metric: Metric, t: Timestep) {
        self.add(label, metric, t, 1.0);
    }

    /// Add to the run-wide `total_daily_cost` series.
    #[inline]
    pub fn add_total_cost(&mut self, t: Timestep, value: f64) {
        self.add(TOTAL_LABEL, Metric::DailyCost, t, value);
    }

    /// Value at `t`, or 0 if the series or timestep does not exist.
    pub fn get(&self, label: &str, metric: Metric, t: Timestep) -> f64 {
        self.series(label, metric)
            .and_then(|s| s.get(t.index()).copied())
            .unwrap_or(0.0)
    }

    /// Full series for `(label, metric)`, if registered.
    pub fn series(&self, label: &str, metric: Metric) -> Option<&[f64]> {
        self.series
            .get(&CounterKey::new(label, metric))
            .map(Vec::as_slice)
    }

    /// Sum of a series over the whole run.
    pub fn total(&self, label: &str, metric: Metric) -> f64 {
        self.series(label, metric).map_or(0.0, |s| s.iter().sum())
    }

    /// Iterate all series in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&CounterKey, &[f64])> {
        self.series.iter().map(|(k, v)| (k, v.as_slice()))
    }
}
