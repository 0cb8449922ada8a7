//! Cell-related types and utilities
//!
//! This module contains:
//! - [`CellValue`] - The value stored in a cell
//! - [`CellAddress`] - A cell's location (e.g., "A1")
//! - [`CellStorage`] - Sparse storage backing a worksheet
//! - serial date helpers for the 1900 date system

mod address;
mod date;
mod storage;
mod value;

pub use address::{column_index, column_letters, CellAddress};
pub use date::{datetime_to_serial, serial_to_datetime};
pub use storage::CellStorage;
pub use value::{CellError, CellValue, SharedString};
