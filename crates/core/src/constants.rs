/// Worksheet holding the equity positions in most publishers' quarterly reports
pub const DEFAULT_SHEET_NAME: &str = "מניות";

/// First data row (0-based) below the header block
pub const DEFAULT_FIRST_DATA_ROW: u32 = 12;

/// How many rows from the top are scanned for the header row
pub const DEFAULT_HEADER_SCAN_ROWS: u32 = 50;

/// Fair values are published in thousands
pub const DEFAULT_FAIR_VALUE_MULTIPLIER: u32 = 1000;

/// Currency assumed when a layout has no currency column
pub const DEFAULT_CURRENCY: &str = "שקל חדש";

/// Text some publishers put in cells that are meant to be empty
pub const BLANK_CELL_SENTINEL: &str = "תא ריק";

/// Decimal precision for every stored value
pub const VALUE_DECIMAL_PRECISION: u32 = 2;

/// Share prices are quoted per 100 units
pub const SHARE_VALUE_UNIT: u32 = 100;

pub const NEW_INVESTMENTS_SHEET: &str = "new investments";
pub const UPDATED_INVESTMENTS_SHEET: &str = "updated investments";
pub const DEPRECATED_INVESTMENTS_SHEET: &str = "deprecated investments";
