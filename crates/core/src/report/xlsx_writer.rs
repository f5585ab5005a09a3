use std::path::{Path, PathBuf};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_xlsxwriter::{Workbook, Worksheet};

use super::report_traits::{staging_dir, ReportWriter};
use crate::compare::ComparisonResult;
use crate::errors::Result;
use crate::holdings::HoldingRecord;

/// One workbook, one right-to-left worksheet per category.
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxReportWriter;

impl XlsxReportWriter {
    pub fn new() -> Self {
        XlsxReportWriter
    }
}

impl ReportWriter for XlsxReportWriter {
    fn write_report(&self, output_path: &Path, result: &ComparisonResult) -> Result<PathBuf> {
        let mut workbook = Workbook::new();
        for (sheet_name, portfolio) in result.categories() {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(sheet_name)?;
            worksheet.set_right_to_left(true);

            for (col, field) in HoldingRecord::FIELD_NAMES.iter().enumerate() {
                worksheet.write_string(0, col as u16, *field)?;
            }
            for (index, holding) in portfolio.values().enumerate() {
                write_holding(worksheet, index as u32 + 1, holding)?;
            }
        }

        let staging = tempfile::Builder::new()
            .prefix(".report")
            .suffix(".xlsx")
            .tempfile_in(staging_dir(output_path))?;
        workbook.save(staging.path())?;
        staging.persist(output_path).map_err(|err| err.error)?;

        Ok(output_path.to_path_buf())
    }
}

fn write_holding(worksheet: &mut Worksheet, row: u32, holding: &HoldingRecord) -> Result<()> {
    worksheet.write_string(row, 0, &holding.issuer_id)?;
    worksheet.write_string(row, 1, &holding.issuer_name)?;
    worksheet.write_string(row, 2, &holding.category)?;
    worksheet.write_string(row, 3, &holding.currency)?;
    worksheet.write_number(row, 4, to_f64(holding.nominal_value))?;
    if let Some(share_value) = holding.share_value {
        worksheet.write_number(row, 5, to_f64(share_value))?;
    }
    if let Some(fair_value) = holding.fair_value {
        worksheet.write_number(row, 6, to_f64(fair_value))?;
    }
    Ok(())
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}
