use std::fs;
use std::path::{Path, PathBuf};

use csv::WriterBuilder;

use super::report_traits::{staging_dir, ReportWriter};
use crate::compare::ComparisonResult;
use crate::errors::Result;
use crate::holdings::HoldingRecord;

/// One CSV file per category inside the output directory.
///
/// The three files are written to a staging directory first and moved into
/// place once all of them are complete.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvReportWriter;

impl CsvReportWriter {
    pub fn new() -> Self {
        CsvReportWriter
    }

    /// `new investments` -> `new_investments.csv`
    pub fn file_name(sheet_name: &str) -> String {
        format!("{}.csv", sheet_name.replace(' ', "_"))
    }
}

impl ReportWriter for CsvReportWriter {
    fn write_report(&self, output_path: &Path, result: &ComparisonResult) -> Result<PathBuf> {
        let staging = tempfile::Builder::new()
            .prefix(".report")
            .tempdir_in(staging_dir(output_path))?;

        let mut file_names = Vec::with_capacity(3);
        for (sheet_name, portfolio) in result.categories() {
            let file_name = Self::file_name(sheet_name);
            let mut writer = WriterBuilder::new()
                .has_headers(false)
                .from_path(staging.path().join(&file_name))?;

            writer.write_record(HoldingRecord::FIELD_NAMES)?;
            for holding in portfolio.values() {
                writer.write_record(record_fields(holding))?;
            }
            writer.flush()?;
            file_names.push(file_name);
        }

        fs::create_dir_all(output_path)?;
        for file_name in &file_names {
            fs::rename(staging.path().join(file_name), output_path.join(file_name))?;
        }

        Ok(output_path.to_path_buf())
    }
}

fn record_fields(holding: &HoldingRecord) -> [String; 7] {
    [
        holding.issuer_id.clone(),
        holding.issuer_name.clone(),
        holding.category.clone(),
        holding.currency.clone(),
        holding.nominal_value.to_string(),
        holding.share_value.map(|v| v.to_string()).unwrap_or_default(),
        holding.fair_value.map(|v| v.to_string()).unwrap_or_default(),
    ]
}
