use std::ffi::OsStr;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{open_workbook, Data, Range, Reader, Xls, Xlsx};
use log::{debug, warn};

use super::cell::Cell;
use crate::errors::{Error, Result};

/// Anything rows can be read from by absolute index.
///
/// Rows are indexed from the top of the sheet (0-based) and cells by absolute
/// column, whatever the used range of the underlying sheet is.
pub trait RowSource {
    /// One past the last row holding data.
    fn row_count(&self) -> u32;

    /// Cells of the row at `index`. Rows past the end are empty.
    fn row(&self, index: u32) -> Vec<Cell>;

    /// Workbook format the rows were loaded from, if any.
    fn format(&self) -> Option<SpreadsheetFormat> {
        None
    }
}

impl<S: RowSource + ?Sized> RowSource for &S {
    fn row_count(&self) -> u32 {
        (**self).row_count()
    }

    fn row(&self, index: u32) -> Vec<Cell> {
        (**self).row(index)
    }

    fn format(&self) -> Option<SpreadsheetFormat> {
        (**self).format()
    }
}

impl<S: RowSource + ?Sized> RowSource for Box<S> {
    fn row_count(&self) -> u32 {
        (**self).row_count()
    }

    fn row(&self, index: u32) -> Vec<Cell> {
        (**self).row(index)
    }

    fn format(&self) -> Option<SpreadsheetFormat> {
        (**self).format()
    }
}

/// Physical workbook encoding, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpreadsheetFormat {
    /// Legacy binary workbook (`.xls`).
    Xls,
    /// Zip-based workbook (`.xlsx`).
    Xlsx,
}

impl SpreadsheetFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(OsStr::to_str)
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "xls" => Ok(SpreadsheetFormat::Xls),
            "xlsx" => Ok(SpreadsheetFormat::Xlsx),
            _ => Err(Error::UnsupportedFormat {
                path: path.to_path_buf(),
                extension: format!(".{}", extension),
            }),
        }
    }
}

impl fmt::Display for SpreadsheetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpreadsheetFormat::Xls => write!(f, "xls"),
            SpreadsheetFormat::Xlsx => write!(f, "xlsx"),
        }
    }
}

/// A worksheet loaded from an `.xls` or `.xlsx` file.
///
/// The workbook file is only held while the sheet is read; once `open`
/// returns, on success or failure, the handle has been released.
#[derive(Debug, Clone)]
pub struct Worksheet {
    name: String,
    format: SpreadsheetFormat,
    range: Range<Data>,
}

impl Worksheet {
    pub fn open(path: impl AsRef<Path>, sheet_name: &str) -> Result<Self> {
        let path = path.as_ref();
        let format = SpreadsheetFormat::from_path(path)?;

        let (name, range) = match format {
            SpreadsheetFormat::Xls => read_sheet::<Xls<BufReader<File>>>(path, sheet_name)?,
            SpreadsheetFormat::Xlsx => read_sheet::<Xlsx<BufReader<File>>>(path, sheet_name)?,
        };

        debug!(
            "Loaded sheet '{}' from {} ({} rows, {} format)",
            name,
            path.display(),
            range.end().map(|(row, _)| row + 1).unwrap_or(0),
            format
        );

        Ok(Worksheet {
            name,
            format,
            range,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn column_count(&self) -> u32 {
        self.range.end().map(|(_, col)| col + 1).unwrap_or(0)
    }
}

impl RowSource for Worksheet {
    fn row_count(&self) -> u32 {
        self.range.end().map(|(row, _)| row + 1).unwrap_or(0)
    }

    fn row(&self, index: u32) -> Vec<Cell> {
        (0..self.column_count())
            .map(|col| {
                self.range
                    .get_value((index, col))
                    .map(Cell::from)
                    .unwrap_or_default()
            })
            .collect()
    }

    fn format(&self) -> Option<SpreadsheetFormat> {
        Some(self.format)
    }
}

fn read_sheet<R>(path: &Path, sheet_name: &str) -> Result<(String, Range<Data>)>
where
    R: Reader<BufReader<File>>,
    calamine::Error: From<R::Error>,
{
    let mut workbook: R = open_workbook(path).map_err(calamine::Error::from)?;
    let available = workbook.sheet_names();

    // Publishers are not consistent about trailing spaces in sheet names.
    let name = match available.iter().find(|name| name.as_str() == sheet_name) {
        Some(name) => name.clone(),
        None => match available
            .iter()
            .find(|name| name.trim() == sheet_name.trim())
        {
            Some(name) => {
                warn!(
                    "Sheet '{}' matched '{}' only after trimming whitespace",
                    name, sheet_name
                );
                name.clone()
            }
            None => {
                return Err(Error::SheetNotFound {
                    sheet: sheet_name.to_string(),
                    available,
                })
            }
        },
    };

    let range = workbook
        .worksheet_range(&name)
        .map_err(calamine::Error::from)?;
    Ok((name, range))
}

/// An in-memory sheet. Row `i` of `rows` is sheet row `i`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridSheet {
    rows: Vec<Vec<Cell>>,
}

impl GridSheet {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        GridSheet { rows }
    }

    /// Builds a sheet from text cells; empty strings become empty cells.
    pub fn from_text(rows: &[&[&str]]) -> Self {
        GridSheet {
            rows: rows
                .iter()
                .map(|row| row.iter().map(|text| Cell::from(*text)).collect())
                .collect(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }
}

impl RowSource for GridSheet {
    fn row_count(&self) -> u32 {
        self.rows.len() as u32
    }

    fn row(&self, index: u32) -> Vec<Cell> {
        self.rows.get(index as usize).cloned().unwrap_or_default()
    }
}
