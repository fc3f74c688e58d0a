//! The `OutputWriter` trait implemented by output backends.

use chrono::NaiveDate;

use ldar_core::Timeseries;
use ldar_site::TagEntry;

use crate::OutputResult;

pub trait OutputWriter {
    /// Append tag-queue entries.  May be called any number of times.
    fn write_tags(&mut self, entries: &[TagEntry]) -> OutputResult<()>;

    /// Write the whole counters table; day 0 is `start`.
    fn write_timeseries(&mut self, timeseries: &Timeseries, start: NaiveDate) -> OutputResult<()>;

    /// Flush all underlying file handles.
    ///
    /// Idempotent; writes after the first call fail with
    /// [`OutputError::Finished`][crate::OutputError::Finished].
    fn finish(&mut self) -> OutputResult<()>;
}
