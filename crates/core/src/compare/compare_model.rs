use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{
    DEPRECATED_INVESTMENTS_SHEET, NEW_INVESTMENTS_SHEET, UPDATED_INVESTMENTS_SHEET,
};
use crate::holdings::Portfolio;

/// Three-way diff between two quarters.
///
/// `updated` holds delta records (`current - previous`). The three maps are
/// disjoint; a holding unchanged between quarters appears in none of them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComparisonResult {
    pub new: Portfolio,
    pub updated: Portfolio,
    pub deprecated: Portfolio,
}

impl ComparisonResult {
    pub fn is_empty(&self) -> bool {
        self.new.is_empty() && self.updated.is_empty() && self.deprecated.is_empty()
    }

    pub fn summary(&self) -> ComparisonSummary {
        ComparisonSummary {
            new: self.new.len(),
            updated: self.updated.len(),
            deprecated: self.deprecated.len(),
        }
    }

    /// Report categories in output order, with their sheet titles.
    pub fn categories(&self) -> [(&'static str, &Portfolio); 3] {
        [
            (NEW_INVESTMENTS_SHEET, &self.new),
            (UPDATED_INVESTMENTS_SHEET, &self.updated),
            (DEPRECATED_INVESTMENTS_SHEET, &self.deprecated),
        ]
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonSummary {
    pub new: usize,
    pub updated: usize,
    pub deprecated: usize,
}

/// What a comparison run produced: the diff and where the report went.
#[derive(Debug, Clone)]
pub struct ComparisonOutcome {
    pub result: ComparisonResult,
    pub output_path: PathBuf,
}
