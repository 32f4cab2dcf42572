//! Call-log spreadsheet to per-number call statistics report.
//!
//! Pipeline: [`calls::reader`] loads and filters the sheet, [`calls::analyzer`]
//! groups calls by number and aggregates them, [`report::builder`] shapes the
//! rows of the Incoming/Outgoing sheets and [`report::writer`] saves the xlsx.

pub mod calls;
pub mod config;
pub mod error;
pub mod report;

use std::path::Path;

pub use calls::{CallLog, Direction, NumberStats};
pub use config::Settings;
pub use error::{ReportError, Result};
pub use report::{Report, ReportBuilder};

/// Load `source`, build both sheets and write them to `settings.output_file`
pub fn run(source: &Path, settings: &Settings) -> Result<Report> {
    let log = CallLog::load(source, settings)?;
    let report = ReportBuilder::for_source(source)
        .with_evening_hour(settings.evening_hour)
        .build_report(&log);
    report::write_report(&report, &settings.output_file)?;
    Ok(report)
}
