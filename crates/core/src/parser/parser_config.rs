//! Layout configuration for the portfolio parser.

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::layout::Publisher;
use crate::constants::{
    BLANK_CELL_SENTINEL, DEFAULT_CURRENCY, DEFAULT_FAIR_VALUE_MULTIPLIER, DEFAULT_FIRST_DATA_ROW,
    DEFAULT_HEADER_SCAN_ROWS, DEFAULT_SHEET_NAME,
};
use crate::errors::{Error, Result};

/// Acceptable header labels for each holding field. A column matches when its
/// text starts with one of the labels; lists are tried column by column.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnLabels {
    pub issuer_name: Vec<String>,
    pub issuer_id: Vec<String>,
    pub category: Vec<String>,
    pub currency: Vec<String>,
    pub nominal_value: Vec<String>,
    pub share_value: Vec<String>,
    pub fair_value: Vec<String>,
}

impl Default for ColumnLabels {
    fn default() -> Self {
        ColumnLabels {
            issuer_name: labels(&["שם המנפיק/שם נייר ערך", "שם נייר ערך", "שם המנפיק"]),
            issuer_id: labels(&["מספר מנפיק", "מס' מנפיק"]),
            category: labels(&["ענף מסחר"]),
            currency: labels(&["סוג מטבע", "מטבע"]),
            nominal_value: labels(&["ערך נקוב", "ערך נומינלי"]),
            share_value: labels(&["שער"]),
            fair_value: labels(&["שווי הוגן", "שווי שוק"]),
        }
    }
}

/// Configuration of one parse: where the data lives and how cells are cleaned.
///
/// Deserializes from camelCase JSON; every field is optional.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ParserConfig {
    /// Worksheet to read (ignored when a publisher preset is selected)
    pub sheet_name: String,
    /// First data row, 0-based (ignored when a publisher preset is selected)
    pub first_data_row: u32,
    /// Rows scanned from the top when looking for the header row
    pub header_scan_rows: u32,
    /// Cell texts that identify the header row (exact match)
    pub header_markers: Vec<String>,
    pub column_labels: ColumnLabels,
    /// Cell texts that mean "empty"
    pub blank_sentinels: Vec<String>,
    /// Fair values are stated in thousands
    pub fair_value_multiplier: Decimal,
    /// Currency used when the layout has no currency column or the cell is empty
    pub default_currency: String,
    /// `"layout"` in JSON: `"detect"` or a publisher preset name
    #[serde(rename = "layout", with = "layout_setting")]
    pub publisher: Option<Publisher>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            first_data_row: DEFAULT_FIRST_DATA_ROW,
            header_scan_rows: DEFAULT_HEADER_SCAN_ROWS,
            header_markers: labels(&["שם המנפיק/שם נייר ערך", "שם נייר ערך", "מספר מנפיק"]),
            column_labels: ColumnLabels::default(),
            blank_sentinels: labels(&[BLANK_CELL_SENTINEL]),
            fair_value_multiplier: Decimal::from(DEFAULT_FAIR_VALUE_MULTIPLIER),
            default_currency: DEFAULT_CURRENCY.to_string(),
            publisher: None,
        }
    }
}

/// `"detect"` maps to `None`, anything else must name a publisher.
mod layout_setting {
    use serde::{de, Deserialize, Deserializer, Serializer};

    use crate::parser::Publisher;

    const DETECT: &str = "detect";
    const VARIANTS: &[&str] = &[DETECT, "menora", "harel", "altshuler", "phoenix"];

    pub fn serialize<S: Serializer>(
        publisher: &Option<Publisher>,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(publisher.map(|p| p.as_str()).unwrap_or(DETECT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Option<Publisher>, D::Error> {
        let value = String::deserialize(deserializer)?;
        if value.trim().eq_ignore_ascii_case(DETECT) {
            return Ok(None);
        }
        value
            .parse::<Publisher>()
            .map(Some)
            .map_err(|_| de::Error::unknown_variant(&value, VARIANTS))
    }
}

impl ParserConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ParserConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    pub fn with_publisher(mut self, publisher: Option<Publisher>) -> Self {
        self.publisher = publisher;
        self
    }

    /// Worksheet name actually read: the preset's when a publisher is set.
    pub fn effective_sheet_name(&self) -> &str {
        match self.publisher {
            Some(publisher) => publisher.preset().sheet_name,
            None => &self.sheet_name,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.publisher.is_none() {
            if self.header_markers.iter().all(|m| m.trim().is_empty()) {
                return Err(Error::Config("headerMarkers must not be empty".to_string()));
            }
            if self.column_labels.issuer_id.is_empty() {
                return Err(Error::Config("columnLabels.issuerId must not be empty".to_string()));
            }
            if self.column_labels.nominal_value.is_empty() {
                return Err(Error::Config(
                    "columnLabels.nominalValue must not be empty".to_string(),
                ));
            }
        }
        if self.fair_value_multiplier <= Decimal::ZERO {
            return Err(Error::Config(format!(
                "fairValueMultiplier must be positive, got {}",
                self.fair_value_multiplier
            )));
        }
        Ok(())
    }
}

fn labels(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
