//! `ldar-output` — run output writers for the LDAR simulation engine.
//!
//! | File             | Contents                                                      |
//! |------------------|---------------------------------------------------------------|
//! | `timeseries.csv` | one row per day: `timestep`, `date`, then one column per counter |
//! | `tags.csv`       | one row per tag-queue entry                                   |
//!
//! # Usage
//!
//! ```rust,ignore
//! use ldar_output::{CsvWriter, OutputWriter};
//!
//! let mut out = CsvWriter::new(Path::new("./output"))?;
//! out.write_tags(&tags.drain())?;          // daily, as the queue fills
//! out.write_timeseries(&timeseries, start)?; // once, at the end of the run
//! out.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use writer::OutputWriter;
