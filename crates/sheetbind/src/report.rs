//! Outcome of a successful call

use crate::element::Shape;

/// One resolved column
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Column {
    /// Header label, empty when the region has no header
    pub name: String,
    /// 0-based position from the axis origin
    pub position: usize,
    /// Field, map key or sequence index bound to the column
    pub field: String,
}

/// Summary of the last successful unmarshal or marshal
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BindReport {
    /// Shape of the bound elements
    pub shape: Shape,
    /// Resolved columns in position order
    pub columns: Vec<Column>,
    /// Number of data lines read or written
    pub rows: usize,
}

impl BindReport {
    /// Column bound to `field`
    pub fn column(&self, field: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.field == field)
    }

    /// Header labels in position order
    pub fn header(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}
