use std::path::Path;

use log::{debug, info};

use super::layout::ColumnLayout;
use super::parser_config::ParserConfig;
use super::row_normalizer::RowNormalizer;
use crate::errors::Result;
use crate::holdings::{aggregate, HoldingRecord, Portfolio};
use crate::spreadsheet::{data_rows, find_header_row, RowSource, SheetRow, Worksheet};

/// Parses one quarterly holdings sheet.
///
/// Construction resolves the column layout, either from a publisher preset
/// or by locating the header row. Reading the holdings consumes the parser.
#[derive(Debug)]
pub struct PortfolioParser<S> {
    source: S,
    normalizer: RowNormalizer,
    first_data_row: u32,
}

impl PortfolioParser<Worksheet> {
    /// Opens the configured worksheet of an `.xls` or `.xlsx` file.
    pub fn open(path: impl AsRef<Path>, config: &ParserConfig) -> Result<Self> {
        let path = path.as_ref();
        let sheet = Worksheet::open(path, config.effective_sheet_name())?;
        let parser = Self::from_source(sheet, config)?;
        info!(
            "Opened {} (sheet '{}', data from row {})",
            path.display(),
            parser.source.name(),
            parser.first_data_row
        );
        Ok(parser)
    }
}

impl<S: RowSource> PortfolioParser<S> {
    pub fn from_source(source: S, config: &ParserConfig) -> Result<Self> {
        config.validate()?;

        let (layout, first_data_row) = match config.publisher {
            Some(publisher) => {
                let preset = publisher.preset();
                debug!("Using {} preset layout", publisher);
                (preset.columns, preset.first_data_row(source.format()))
            }
            None => {
                let header_row = find_header_row(
                    &source,
                    config.header_markers.as_slice(),
                    config.header_scan_rows,
                )?;
                let layout = ColumnLayout::detect(&source.row(header_row), &config.column_labels)?;
                (layout, config.first_data_row.max(header_row + 1))
            }
        };
        debug!("Resolved column layout {:?}", layout);

        Ok(PortfolioParser {
            source,
            normalizer: RowNormalizer::new(layout, config),
            first_data_row,
        })
    }

    pub fn layout(&self) -> &ColumnLayout {
        self.normalizer.layout()
    }

    pub fn first_data_row(&self) -> u32 {
        self.first_data_row
    }

    /// Lazy stream of holdings, one per data row with an issuer id.
    pub fn holdings(self) -> impl Iterator<Item = Result<HoldingRecord>> {
        let filter = self.normalizer.clone();
        let normalizer = self.normalizer;

        data_rows(self.source, self.first_data_row, move |row: &SheetRow| {
            filter.has_issuer_id(row)
        })
        .map(move |row| normalizer.normalize(&row))
    }

    /// Parses every row and sums them per `(issuer_id, currency)`.
    pub fn into_portfolio(self) -> Result<Portfolio> {
        aggregate(self.holdings())
    }
}
