//! Worksheet type

use std::collections::BTreeMap;

use crate::cell::{CellAddress, CellStorage, CellValue};
use crate::comment::CellComment;
use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};

/// A worksheet (single sheet in a workbook)
#[derive(Debug, Clone)]
pub struct Worksheet {
    /// Sheet name
    name: String,
    /// Cell storage
    cells: CellStorage,
    /// Cell comments (keyed by (row, col))
    comments: BTreeMap<(u32, u16), CellComment>,
}

impl Worksheet {
    /// Create a new worksheet with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            cells: CellStorage::new(),
            comments: BTreeMap::new(),
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the sheet name
    pub fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = name.into();
    }

    // === Cell Access ===

    /// Get cell value by address string (e.g., "A1")
    pub fn get_value(&self, address: &str) -> Result<CellValue> {
        let addr = CellAddress::parse(address)?;
        Ok(self.get_value_at(addr.row, addr.col))
    }

    /// Get cell value by indices
    pub fn get_value_at(&self, row: u32, col: u16) -> CellValue {
        self.cells.get(row, col).cloned().unwrap_or(CellValue::Empty)
    }

    /// Set a cell value by address string
    pub fn set_cell_value<V: Into<CellValue>>(&mut self, address: &str, value: V) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_value_at(addr.row, addr.col, value)
    }

    /// Set a cell value by row and column indices
    pub fn set_cell_value_at<V: Into<CellValue>>(
        &mut self,
        row: u32,
        col: u16,
        value: V,
    ) -> Result<()> {
        self.validate_cell_position(row, col)?;
        self.cells.set(row, col, value.into());
        Ok(())
    }

    /// Set a whole row of values starting at column A
    pub fn set_row_values<V, I>(&mut self, row: u32, values: I) -> Result<()>
    where
        V: Into<CellValue>,
        I: IntoIterator<Item = V>,
    {
        for (col, value) in values.into_iter().enumerate() {
            let col = u16::try_from(col)
                .map_err(|_| Error::ColumnOutOfBounds(col as u32, MAX_COLS - 1))?;
            self.set_cell_value_at(row, col, value)?;
        }
        Ok(())
    }

    /// Clear a cell by indices
    pub fn clear_cell_at(&mut self, row: u32, col: u16) {
        self.cells.remove(row, col);
    }

    /// Clear every cell (comments are kept)
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Get the bounds of all non-empty cells as (min_row, min_col, max_row, max_col)
    pub fn used_bounds(&self) -> Option<(u32, u16, u32, u16)> {
        self.cells.used_bounds()
    }

    /// Number of rows from the top of the sheet to the last used row
    pub fn row_count(&self) -> u32 {
        self.used_bounds().map_or(0, |(_, _, max_row, _)| max_row + 1)
    }

    /// Number of columns from column A to the last used column
    pub fn col_count(&self) -> u16 {
        self.used_bounds().map_or(0, |(_, _, _, max_col)| max_col + 1)
    }

    /// Iterate over the values of one row as (col, value)
    pub fn row_values(&self, row: u32) -> impl Iterator<Item = (u16, &CellValue)> {
        self.cells.iter_row(row)
    }

    /// Get the number of non-empty cells
    pub fn cell_count(&self) -> usize {
        self.cells.cell_count()
    }

    /// Check if the worksheet is empty
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    // === Comments ===

    /// Set a comment on a cell by address string
    pub fn set_comment(&mut self, address: &str, comment: CellComment) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_comment_at(addr.row, addr.col, comment);
        Ok(())
    }

    /// Set a comment on a cell by row and column indices
    pub fn set_comment_at(&mut self, row: u32, col: u16, comment: CellComment) {
        self.comments.insert((row, col), comment);
    }

    /// Get a comment from a cell by address string
    pub fn comment(&self, address: &str) -> Result<Option<&CellComment>> {
        let addr = CellAddress::parse(address)?;
        Ok(self.comment_at(addr.row, addr.col))
    }

    /// Get a comment from a cell by row and column indices
    pub fn comment_at(&self, row: u32, col: u16) -> Option<&CellComment> {
        self.comments.get(&(row, col))
    }

    /// Remove a comment from a cell by row and column indices
    pub fn remove_comment_at(&mut self, row: u32, col: u16) -> Option<CellComment> {
        self.comments.remove(&(row, col))
    }

    /// Get the number of comments in this worksheet
    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }

    /// Iterate over all comments in row order
    pub fn comments(&self) -> impl Iterator<Item = (CellAddress, &CellComment)> {
        self.comments
            .iter()
            .map(|(&(row, col), comment)| (CellAddress::new(row, col), comment))
    }

    fn validate_cell_position(&self, row: u32, col: u16) -> Result<()> {
        if row >= MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS - 1));
        }
        if col >= MAX_COLS {
            return Err(Error::ColumnOutOfBounds(col as u32, MAX_COLS - 1));
        }
        Ok(())
    }
}
