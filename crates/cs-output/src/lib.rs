//! `cs-output` — status and data output for the rust_cosim bridge.
//!
//! | Feature   | Backend | Files created        |
//! |-----------|---------|----------------------|
//! | *(none)*  | CSV     | `tick_summaries.csv` |
//! | `sqlite`  | SQLite  | `output.db`          |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`BridgeOutputObserver`].  [`StatusLine`] is the console status line.
//! Both implement `cs_sync::SyncObserver`; pair them with a tuple to use
//! both in one run.
//!
//! # Usage
//!
//! ```rust,ignore
//! use cs_output::{BridgeOutputObserver, CsvWriter, StatusLine};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = (StatusLine::new(std::io::stdout()), BridgeOutputObserver::new(writer));
//! sync.run(&mut obs)?;
//! if let Some(e) = obs.1.take_error() { eprintln!("output error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod status;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::BridgeOutputObserver;
pub use row::TickSummaryRow;
pub use status::{StatusLine, format_status};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
