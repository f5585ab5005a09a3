use super::cell::SheetRow;
use super::row_source::RowSource;

/// Lazy iterator over the data rows of a sheet.
///
/// Walks from a start row to the end of the sheet and yields only the rows
/// accepted by the predicate. It owns its source and cannot be restarted:
/// callers that need a second pass must collect what they need.
pub struct DataRows<S, P> {
    source: S,
    next: u32,
    end: u32,
    predicate: P,
}

impl<S, P> DataRows<S, P>
where
    S: RowSource,
    P: FnMut(&SheetRow) -> bool,
{
    pub fn new(source: S, start_row: u32, predicate: P) -> Self {
        let end = source.row_count();
        DataRows {
            source,
            next: start_row,
            end,
            predicate,
        }
    }
}

impl<S, P> Iterator for DataRows<S, P>
where
    S: RowSource,
    P: FnMut(&SheetRow) -> bool,
{
    type Item = SheetRow;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next < self.end {
            let row = SheetRow::new(self.next, self.source.row(self.next));
            self.next += 1;
            if (self.predicate)(&row) {
                return Some(row);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.end.saturating_sub(self.next) as usize))
    }
}

/// Data rows of `source` from `start_row` on, filtered by `predicate`.
pub fn data_rows<S, P>(source: S, start_row: u32, predicate: P) -> DataRows<S, P>
where
    S: RowSource,
    P: FnMut(&SheetRow) -> bool,
{
    DataRows::new(source, start_row, predicate)
}
