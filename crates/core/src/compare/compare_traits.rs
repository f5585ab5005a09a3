use std::path::Path;

use super::compare_model::{ComparisonOutcome, ComparisonResult};
use crate::errors::Result;

/// Trait defining the contract for comparison service operations.
pub trait ComparisonServiceTrait: Send + Sync {
    /// Parses both quarters and diffs them.
    fn compare(&self, previous_path: &Path, current_path: &Path) -> Result<ComparisonResult>;

    /// Same as `compare`, then writes the report to `output_path`.
    fn compare_and_write(
        &self,
        previous_path: &Path,
        current_path: &Path,
        output_path: &Path,
    ) -> Result<ComparisonOutcome>;
}
