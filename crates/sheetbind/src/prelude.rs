//! Prelude module - common imports for sheetbind users
//!
//! ```rust
//! use sheetbind::prelude::*;
//! ```

pub use crate::{
    record,
    // Configuration
    Axis,
    BindOptions,
    // Errors
    BindError,
    BindResult,
    // Cell types
    CellValue,
    Direction,
    // Binding
    Grid,
    Sheet,
    SheetBinder,
    TagMap,
    Tags,
    Workbook,
};
