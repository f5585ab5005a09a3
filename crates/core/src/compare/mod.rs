//! Quarter comparison - the three-way diff and the service running it.

mod comparator;
mod compare_model;
mod compare_service;
mod compare_traits;



pub use comparator::compare_portfolios;
pub use compare_model::{ComparisonOutcome, ComparisonResult, ComparisonSummary};
pub use compare_service::ComparisonService;
pub use compare_traits::ComparisonServiceTrait;
