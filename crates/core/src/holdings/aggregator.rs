use std::collections::btree_map::Entry;

use log::debug;

use super::holdings_model::{HoldingRecord, Portfolio};
use crate::errors::Result;

/// Folds a stream of parsed holdings into a [`Portfolio`].
///
/// Rows sharing an `(issuer_id, currency)` key are summed. The accumulator of
/// a key keeps the descriptive fields of the first row seen for it. The first
/// error in the stream aborts the fold.
pub fn aggregate<I>(records: I) -> Result<Portfolio>
where
    I: IntoIterator<Item = Result<HoldingRecord>>,
{
    let mut portfolio = Portfolio::new();
    let mut rows = 0usize;

    for record in records {
        let record = record?;
        rows += 1;

        let accumulator = match portfolio.entry(record.key()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(record.zeroed()),
        };
        *accumulator = accumulator.try_add(&record)?;
    }

    debug!("Aggregated {} rows into {} holdings", rows, portfolio.len());
    Ok(portfolio)
}

/// Same as [`aggregate`] for records that are already known to be valid.
pub fn aggregate_holdings<I>(records: I) -> Result<Portfolio>
where
    I: IntoIterator<Item = HoldingRecord>,
{
    aggregate(records.into_iter().map(Ok))
}
