//! Grid access capability
//!
//! The binder never touches a file format directly. Everything it needs from
//! the underlying spreadsheet goes through [`Grid`]: per-cell reads and writes
//! on a named sheet, the used extent of a sheet, and sheet metadata.

use sheetbind_core::{CellAddress, CellComment, CellValue, Error, Result, Workbook, Worksheet};

/// Rectangular cell store the binder reads from and writes to
///
/// Rows and columns are 0-based. `row_count` and `col_count` report the extent
/// from the top-left corner of the sheet to its last used row and column.
pub trait Grid {
    /// Read one cell
    fn cell(&self, sheet: &str, row: u32, col: u16) -> Result<CellValue>;

    /// Write one cell; [`CellValue::Empty`] clears it
    fn set_cell(&mut self, sheet: &str, row: u32, col: u16, value: CellValue) -> Result<()>;

    /// Number of rows up to the last used one
    fn row_count(&self, sheet: &str) -> Result<u32>;

    /// Number of columns up to the last used one
    fn col_count(&self, sheet: &str) -> Result<u16>;

    /// Index of the sheet with this name
    fn sheet_index(&self, name: &str) -> Option<usize>;

    /// Name of the sheet at this index
    fn sheet_name(&self, index: usize) -> Option<String>;

    /// Rename a sheet
    fn set_sheet_name(&mut self, old: &str, new: &str) -> Result<()>;

    /// Index of the active sheet
    fn active_sheet_index(&self) -> usize;

    /// Make a sheet active
    fn set_active_sheet(&mut self, index: usize) -> Result<()>;

    /// All comments of a sheet in row order
    fn comments(&self, sheet: &str) -> Result<Vec<(CellAddress, CellComment)>>;
}

impl<G: Grid + ?Sized> Grid for &mut G {
    fn cell(&self, sheet: &str, row: u32, col: u16) -> Result<CellValue> {
        (**self).cell(sheet, row, col)
    }

    fn set_cell(&mut self, sheet: &str, row: u32, col: u16, value: CellValue) -> Result<()> {
        (**self).set_cell(sheet, row, col, value)
    }

    fn row_count(&self, sheet: &str) -> Result<u32> {
        (**self).row_count(sheet)
    }

    fn col_count(&self, sheet: &str) -> Result<u16> {
        (**self).col_count(sheet)
    }

    fn sheet_index(&self, name: &str) -> Option<usize> {
        (**self).sheet_index(name)
    }

    fn sheet_name(&self, index: usize) -> Option<String> {
        (**self).sheet_name(index)
    }

    fn set_sheet_name(&mut self, old: &str, new: &str) -> Result<()> {
        (**self).set_sheet_name(old, new)
    }

    fn active_sheet_index(&self) -> usize {
        (**self).active_sheet_index()
    }

    fn set_active_sheet(&mut self, index: usize) -> Result<()> {
        (**self).set_active_sheet(index)
    }

    fn comments(&self, sheet: &str) -> Result<Vec<(CellAddress, CellComment)>> {
        (**self).comments(sheet)
    }
}

fn worksheet<'a>(workbook: &'a Workbook, sheet: &str) -> Result<&'a Worksheet> {
    workbook
        .worksheet_by_name(sheet)
        .ok_or_else(|| Error::SheetNotFound(sheet.to_string()))
}

impl Grid for Workbook {
    fn cell(&self, sheet: &str, row: u32, col: u16) -> Result<CellValue> {
        Ok(worksheet(self, sheet)?.get_value_at(row, col))
    }

    fn set_cell(&mut self, sheet: &str, row: u32, col: u16, value: CellValue) -> Result<()> {
        self.worksheet_by_name_mut(sheet)
            .ok_or_else(|| Error::SheetNotFound(sheet.to_string()))?
            .set_cell_value_at(row, col, value)
    }

    fn row_count(&self, sheet: &str) -> Result<u32> {
        Ok(worksheet(self, sheet)?.row_count())
    }

    fn col_count(&self, sheet: &str) -> Result<u16> {
        Ok(worksheet(self, sheet)?.col_count())
    }

    fn sheet_index(&self, name: &str) -> Option<usize> {
        Workbook::sheet_index(self, name)
    }

    fn sheet_name(&self, index: usize) -> Option<String> {
        self.worksheet(index).map(|ws| ws.name().to_string())
    }

    fn set_sheet_name(&mut self, old: &str, new: &str) -> Result<()> {
        let index =
            Workbook::sheet_index(self, old).ok_or_else(|| Error::SheetNotFound(old.to_string()))?;
        self.rename_worksheet(index, new)
    }

    fn active_sheet_index(&self) -> usize {
        self.active_sheet()
    }

    fn set_active_sheet(&mut self, index: usize) -> Result<()> {
        Workbook::set_active_sheet(self, index)
    }

    fn comments(&self, sheet: &str) -> Result<Vec<(CellAddress, CellComment)>> {
        Ok(worksheet(self, sheet)?
            .comments()
            .map(|(addr, comment)| (addr, comment.clone()))
            .collect())
    }
}
