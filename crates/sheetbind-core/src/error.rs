//! Grid errors

use thiserror::Error;

/// Shorthand for grid results
pub type Result<T> = std::result::Result<T, Error>;

/// Why a grid access or sheet change was refused
#[derive(Debug, Error)]
pub enum Error {
    /// A1 text that does not name a cell
    #[error("bad cell reference: {0}")]
    InvalidAddress(String),

    /// 0-based row, then the last usable row
    #[error("row {0} is past the last row ({1})")]
    RowOutOfBounds(u32, u32),

    /// 0-based column, then the last usable column
    #[error("column {0} is past the last column ({1})")]
    ColumnOutOfBounds(u32, u16),

    /// Requested index, then the number of sheets
    #[error("no sheet at index {0}; the workbook has {1}")]
    SheetOutOfBounds(usize, usize),

    #[error("no sheet named '{0}'")]
    SheetNotFound(String),

    /// Empty, too long, or holding a forbidden character
    #[error("unusable sheet name: {0}")]
    InvalidSheetName(String),

    /// Another sheet already has this name, ignoring case
    #[error("sheet name '{0}' is taken")]
    DuplicateSheetName(String),
}
