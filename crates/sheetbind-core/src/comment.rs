//! Notes attached to single cells
//!
//! ## Example
//!
//! ```rust
//! use sheetbind_core::{Workbook, CellComment};
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.worksheet_mut(0).unwrap();
//!
//! sheet.set_comment("A1", CellComment::new("ops", "checked by hand")).unwrap();
//! assert!(sheet.comment("A1").unwrap().is_some());
//! ```

/// A note on one cell, with an optional author
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellComment {
    /// Empty when unknown
    pub author: String,
    pub text: String,
}

impl CellComment {
    pub fn new(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            text: text.into(),
        }
    }

    /// A note without an author
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            author: String::new(),
            text: text.into(),
        }
    }

    pub fn has_author(&self) -> bool {
        !self.author.is_empty()
    }
}

impl std::fmt::Display for CellComment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.has_author() {
            write!(f, "[{}]: {}", self.author, self.text)
        } else {
            write!(f, "{}", self.text)
        }
    }
}
