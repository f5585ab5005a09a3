//! Locates the header row of a holdings sheet and the columns inside it.
//!
//! Publishers move columns around between years and between each other, so
//! nothing here relies on fixed positions: rows and columns are found by
//! matching cell text against lists of acceptable labels.

use log::debug;

use super::cell::Cell;
use super::row_source::RowSource;
use crate::errors::{Error, Result};

/// Returns the index of the first row, among the top `scan_rows`, holding a
/// cell whose trimmed text equals one of `markers`.
pub fn find_header_row<S, M>(source: &S, markers: &[M], scan_rows: u32) -> Result<u32>
where
    S: RowSource + ?Sized,
    M: AsRef<str>,
{
    let last = scan_rows.min(source.row_count());

    for index in 0..last {
        let row = source.row(index);
        let is_header = row.iter().any(|cell| {
            cell.as_text()
                .map(|text| markers.iter().any(|m| text.trim() == m.as_ref()))
                .unwrap_or(false)
        });
        if is_header {
            debug!("Header row found at index {}", index);
            return Ok(index);
        }
    }

    Err(Error::HeaderNotFound {
        field: "header row".to_string(),
        labels: to_owned_labels(markers),
    })
}

/// Returns the first column whose trimmed text starts with one of `labels`.
pub fn find_column<L: AsRef<str>>(header: &[Cell], labels: &[L]) -> Option<usize> {
    header.iter().position(|cell| {
        cell.as_text()
            .map(|text| {
                let text = text.trim();
                labels
                    .iter()
                    .any(|label| !label.as_ref().is_empty() && text.starts_with(label.as_ref()))
            })
            .unwrap_or(false)
    })
}

/// Same as [`find_column`], failing with `HeaderNotFound` for `field`.
pub fn require_column<L: AsRef<str>>(header: &[Cell], field: &str, labels: &[L]) -> Result<usize> {
    find_column(header, labels).ok_or_else(|| Error::HeaderNotFound {
        field: field.to_string(),
        labels: to_owned_labels(labels),
    })
}

fn to_owned_labels<L: AsRef<str>>(labels: &[L]) -> Vec<String> {
    labels.iter().map(|l| l.as_ref().to_string()).collect()
}
