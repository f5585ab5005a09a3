//! Quarterly Diff Core - reading fund holding reports and diffing quarters.
//!
//! A quarter's report is read from an `.xls`/`.xlsx` worksheet, normalized
//! into [`HoldingRecord`]s, aggregated per `(issuer_id, currency)` and
//! compared against the previous quarter. The outcome is written as a
//! three-sheet report.

pub mod compare;
pub mod constants;
pub mod errors;
pub mod holdings;
pub mod parser;
pub mod report;
pub mod spreadsheet;

pub use compare::{
    compare_portfolios, ComparisonOutcome, ComparisonResult, ComparisonService,
    ComparisonServiceTrait, ComparisonSummary,
};
pub use holdings::{HoldingKey, HoldingRecord, Portfolio};
pub use parser::{ParserConfig, PortfolioParser, Publisher};
pub use report::{ReportFormat, ReportWriter};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
