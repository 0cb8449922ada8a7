//! # sheetbind-core
//!
//! In-memory grid model for the sheetbind binding library.
//!
//! This crate provides the fundamental types the binder reads and writes:
//! - [`CellValue`] - Cell values (numbers, strings, booleans, dates, errors)
//! - [`CellAddress`] - A1-style cell addressing
//! - [`CellComment`] - Cell notes
//! - [`Workbook`], [`Worksheet`] - The document structures
//!
//! ## Example
//!
//! ```rust
//! use sheetbind_core::{Workbook, CellValue};
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.worksheet_mut(0).unwrap();
//!
//! // Using string addresses
//! sheet.set_cell_value("A1", "Hello").unwrap();
//! sheet.set_cell_value("B1", 42.0).unwrap();
//!
//! // Or using row/column indices (0-based)
//! sheet.set_cell_value_at(1, 0, CellValue::string("World")).unwrap();
//! assert_eq!(sheet.row_count(), 2);
//! ```

pub mod cell;
pub mod comment;
pub mod error;
pub mod workbook;
pub mod worksheet;

pub use cell::{
    column_index, column_letters, datetime_to_serial, serial_to_datetime, CellAddress, CellError,
    CellStorage, CellValue, SharedString,
};
pub use comment::CellComment;
pub use error::{Error, Result};
pub use workbook::Workbook;
pub use worksheet::Worksheet;

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
