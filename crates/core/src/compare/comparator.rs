use log::info;

use super::compare_model::ComparisonResult;
use crate::errors::Result;
use crate::holdings::Portfolio;

/// Diffs two quarters.
///
/// Keys only in `current` are new. Keys in both whose nominal value moved go
/// to `updated` as `current - previous`. Keys only in `previous` are
/// deprecated, carried over unchanged. Everything else is dropped.
pub fn compare_portfolios(previous: &Portfolio, current: &Portfolio) -> Result<ComparisonResult> {
    let mut result = ComparisonResult {
        deprecated: previous.clone(),
        ..Default::default()
    };

    for (key, current_holding) in current {
        match previous.get(key) {
            None => {
                result.new.insert(current_holding.clone());
            }
            Some(previous_holding) => {
                if current_holding.nominal_value != previous_holding.nominal_value {
                    result.updated.insert(current_holding.try_sub(previous_holding)?);
                }
            }
        }
        result.deprecated.remove(key);
    }

    let summary = result.summary();
    info!(
        "Compared {} previous and {} current holdings: {} new, {} updated, {} deprecated",
        previous.len(),
        current.len(),
        summary.new,
        summary.updated,
        summary.deprecated
    );
    Ok(result)
}
