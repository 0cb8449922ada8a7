//! Per-field binding metadata
//!
//! Records declare tags next to their fields in [`record!`](crate::record);
//! callers can replace them for a single call through a [`TagMap`].
//!
//! ```rust
//! use sheetbind::{TagMap, Tags};
//!
//! let mut tags = TagMap::new();
//! tags.insert("age".into(), Tags::new().column_index(2).required());
//! tags.insert("notes".into(), Tags::new().skip());
//! ```

use std::collections::HashMap;

use sheetbind_core::CellValue;

/// Tag overrides keyed by field name, map key or sequence position
pub type TagMap = HashMap<String, Tags>;

/// Binding rules for one field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tags {
    /// Header label to match on read and to write on marshal
    pub column_name: Option<String>,
    /// 1-based column number relative to the axis origin
    pub column_index: Option<usize>,
    /// Exclude the field from binding altogether
    pub skip: bool,
    /// Reject empty cells and missing columns
    pub required: bool,
    /// Value used when the cell is empty
    pub default: Option<CellValue>,
}

impl Tags {
    /// Tags with no rules
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind to the column with this header label
    pub fn column_name(mut self, name: impl Into<String>) -> Self {
        self.column_name = Some(name.into());
        self
    }

    /// Bind to this 1-based column
    pub fn column_index(mut self, index: usize) -> Self {
        self.column_index = Some(index);
        self
    }

    /// Leave the field out
    pub fn skip(mut self) -> Self {
        self.skip = true;
        self
    }

    /// Require a column and a non-empty cell
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Use `value` for empty cells
    pub fn default_value(mut self, value: impl Into<CellValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// 0-based column offset from `column_index`
    ///
    /// Returns `None` when no index is set; an index of 0 is rejected.
    pub(crate) fn offset(&self, field: &str) -> crate::BindResult<Option<usize>> {
        match self.column_index {
            Some(0) => Err(crate::BindError::ConfigNotValid(format!(
                "column index of `{}` must be 1 or greater",
                field
            ))),
            Some(index) => Ok(Some(index - 1)),
            None => Ok(None),
        }
    }
}
