//! Holdings module - the normalized holding record, its key, and the
//! aggregated per-quarter portfolio.

mod aggregator;
mod holdings_model;


pub use aggregator::{aggregate, aggregate_holdings};
pub use holdings_model::{HoldingKey, HoldingRecord, Portfolio};
