//! End-to-end tests for sheetbind.
//!
//! Each test builds the workbook it needs in memory, binds a container to it
//! through a `SheetBinder` and asserts on the container, the grid and the
//! report. Set `RUST_LOG=sheetbind=trace` to see column resolution.

mod mappings;
mod properties;
mod records;

// Re-export common utilities for submodules
pub use common::*;
