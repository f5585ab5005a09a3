//! Report writers for comparison results.

mod csv_writer;
mod report_traits;
mod xlsx_writer;


use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::errors::Error;

pub use csv_writer::CsvReportWriter;
pub use report_traits::ReportWriter;
pub use xlsx_writer::XlsxReportWriter;

/// Output formats the bundled writers produce.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Xlsx,
    Csv,
}

impl ReportFormat {
    pub fn writer(&self) -> Arc<dyn ReportWriter> {
        match self {
            ReportFormat::Xlsx => Arc::new(XlsxReportWriter::new()),
            ReportFormat::Csv => Arc::new(CsvReportWriter::new()),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Xlsx => f.write_str("xlsx"),
            ReportFormat::Csv => f.write_str("csv"),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xlsx" => Ok(ReportFormat::Xlsx),
            "csv" => Ok(ReportFormat::Csv),
            other => Err(Error::Config(format!(
                "Unknown report format '{}'. Expected xlsx or csv",
                other
            ))),
        }
    }
}
