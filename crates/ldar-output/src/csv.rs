//! CSV output backend.
//!
//! Creates `tags.csv` at construction and `timeseries.csv` when the counters
//! table is written.  Series shorter than the table are padded with zeros.

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::{Days, NaiveDate};
use csv::Writer;

use ldar_core::Timeseries;
use ldar_site::TagEntry;

use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

pub const TAGS_FILE: &str = "tags.csv";
pub const TIMESERIES_FILE: &str = "timeseries.csv";

pub struct CsvWriter {
    dir:      PathBuf,
    tags:     Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Create `tags.csv` in `dir` and write its header row.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut tags = Writer::from_path(dir.join(TAGS_FILE))?;
        tags.write_record(["site", "leak", "date", "company", "crew"])?;
        Ok(Self { dir: dir.to_path_buf(), tags, finished: false })
    }

    fn check_open(&self) -> OutputResult<()> {
        if self.finished { Err(OutputError::Finished) } else { Ok(()) }
    }
}

impl OutputWriter for CsvWriter {
    fn write_tags(&mut self, entries: &[TagEntry]) -> OutputResult<()> {
        self.check_open()?;
        for e in entries {
            self.tags.write_record(&[
                e.site.0.to_string(),
                e.leak.0.to_string(),
                e.date.to_string(),
                e.company.clone(),
                e.crew.0.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_timeseries(&mut self, timeseries: &Timeseries, start: NaiveDate) -> OutputResult<()> {
        self.check_open()?;
        let mut w = Writer::from_path(self.dir.join(TIMESERIES_FILE))?;

        let columns: Vec<(String, &[f64])> =
            timeseries.iter().map(|(k, v)| (k.column_name(), v)).collect();
        let rows = columns
            .iter()
            .map(|(_, v)| v.len())
            .fold(timeseries.n_timesteps(), usize::max);

        let mut header = vec!["timestep".to_owned(), "date".to_owned()];
        header.extend(columns.iter().map(|(name, _)| name.clone()));
        w.write_record(&header)?;

        for t in 0..rows {
            let date = start
                .checked_add_days(Days::new(t as u64))
                .map_or_else(String::new, |d| d.to_string());
            let mut record = Vec::with_capacity(columns.len() + 2);
            record.push(t.to_string());
            record.push(date);
            record.extend(columns.iter().map(|(_, v)| v.get(t).copied().unwrap_or(0.0).to_string()));
            w.write_record(&record)?;
        }
        w.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.tags.flush()?;
        Ok(())
    }
}
