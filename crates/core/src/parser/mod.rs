//! Portfolio parser - layout configuration, publisher presets, row
//! normalization and the sheet-to-portfolio pipeline.

mod layout;
mod parser_config;
mod portfolio_parser;
mod row_normalizer;

#[cfg(test)]
mod parser_tests;

pub use layout::{ColumnLayout, LayoutPreset, Publisher};
pub use parser_config::{ColumnLabels, ParserConfig};
pub use portfolio_parser::PortfolioParser;
pub use row_normalizer::RowNormalizer;
