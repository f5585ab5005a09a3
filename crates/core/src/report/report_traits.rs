use std::path::{Path, PathBuf};

use crate::compare::ComparisonResult;
use crate::errors::Result;

/// Writes a comparison result somewhere a person can read it.
///
/// Categories come out in the order new, updated, deprecated, each with a
/// header row of [`HoldingRecord::FIELD_NAMES`](crate::holdings::HoldingRecord::FIELD_NAMES)
/// followed by one row per holding. Existing output is replaced only once
/// the whole report has been written; a failed write leaves it untouched.
pub trait ReportWriter: Send + Sync {
    /// Returns the path actually written.
    fn write_report(&self, output_path: &Path, result: &ComparisonResult) -> Result<PathBuf>;
}

/// Directory that receives the staging copy of a report, next to its final
/// location so the last step is a rename.
pub(crate) fn staging_dir(output_path: &Path) -> &Path {
    output_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}
