use std::str::FromStr;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::layout::ColumnLayout;
use super::parser_config::ParserConfig;
use crate::constants::VALUE_DECIMAL_PRECISION;
use crate::errors::{Error, Result};
use crate::holdings::HoldingRecord;
use crate::spreadsheet::{Cell, SheetRow};

/// Turns raw sheet rows into [`HoldingRecord`]s for one resolved layout.
#[derive(Debug, Clone)]
pub struct RowNormalizer {
    layout: ColumnLayout,
    blank_sentinels: Vec<String>,
    fair_value_multiplier: Decimal,
    default_currency: String,
}

impl RowNormalizer {
    pub fn new(layout: ColumnLayout, config: &ParserConfig) -> Self {
        RowNormalizer {
            layout,
            blank_sentinels: config
                .blank_sentinels
                .iter()
                .map(|s| s.trim().to_string())
                .collect(),
            fair_value_multiplier: config.fair_value_multiplier,
            default_currency: config.default_currency.clone(),
        }
    }

    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    /// Cleaned issuer id: trimmed text, blank sentinels mapped to "".
    pub fn issuer_id(&self, row: &SheetRow) -> String {
        let cell = row.cell(self.layout.issuer_id);
        let text = match cell {
            Cell::Text(text) => text.trim().to_string(),
            other => other.to_text(),
        };
        if self.is_sentinel(&text) {
            String::new()
        } else {
            text
        }
    }

    /// Row filter used by the sheet reader.
    pub fn has_issuer_id(&self, row: &SheetRow) -> bool {
        !self.issuer_id(row).is_empty()
    }

    pub fn normalize(&self, row: &SheetRow) -> Result<HoldingRecord> {
        let nominal_value = self
            .decimal_at(row, Some(self.layout.nominal_value))?
            .unwrap_or(Decimal::ZERO);

        let currency = match self.layout.currency.map(|col| row.cell(col)) {
            Some(cell) if !cell.is_blank() => cell.to_text(),
            _ => self.default_currency.clone(),
        };

        let mut record = HoldingRecord::new(self.issuer_id(row), currency, round(nominal_value))
            .with_name(self.text_at(row, self.layout.issuer_name))
            .with_category(self.text_at(row, self.layout.category));

        if let Some(share_value) = self.decimal_at(row, self.layout.share_value)? {
            record = record.with_share_value(round(share_value));
        }
        if let Some(column) = self.layout.fair_value {
            if let Some(fair_value) = self.decimal_at(row, Some(column))? {
                let scaled = fair_value
                    .checked_mul(self.fair_value_multiplier)
                    .ok_or_else(|| Error::InvalidNumber {
                        row: row.index,
                        column,
                        value: row.cell(column).to_text(),
                    })?;
                record = record.with_fair_value(round(scaled));
            }
        }

        Ok(record)
    }

    fn text_at(&self, row: &SheetRow, column: Option<usize>) -> String {
        column.map(|col| row.cell(col).to_text()).unwrap_or_default()
    }

    fn decimal_at(&self, row: &SheetRow, column: Option<usize>) -> Result<Option<Decimal>> {
        let Some(column) = column else {
            return Ok(None);
        };

        let invalid = |value: String| Error::InvalidNumber {
            row: row.index,
            column,
            value,
        };

        match row.cell(column) {
            Cell::Empty => Ok(None),
            Cell::Number(n) => Decimal::from_f64(*n)
                .map(Some)
                .ok_or_else(|| invalid(n.to_string())),
            Cell::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() || self.is_sentinel(trimmed) {
                    return Ok(None);
                }
                parse_decimal_text(trimmed)
                    .map(Some)
                    .ok_or_else(|| invalid(text.clone()))
            }
            other => Err(invalid(other.to_text())),
        }
    }

    fn is_sentinel(&self, text: &str) -> bool {
        self.blank_sentinels.iter().any(|s| s == text)
    }
}

/// Parses numbers as publishers type them: thousands separators and inner
/// spaces are dropped, scientific notation is accepted.
fn parse_decimal_text(text: &str) -> Option<Decimal> {
    let cleaned: String = text
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();

    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()
}

fn round(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(
        VALUE_DECIMAL_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    )
}
