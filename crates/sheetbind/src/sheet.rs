//! Sheet selection
//!
//! A binder reads and writes the sheet it has selected. Selection goes through
//! the grid: lookups by name or index fail with
//! [`BindError::SheetNotFound`] when the grid has no such sheet.

use sheetbind_core::{CellAddress, CellComment};
use tracing::debug;

use crate::binder::SheetBinder;
use crate::error::{BindError, BindResult};
use crate::grid::Grid;

/// A sheet of the attached grid
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sheet {
    /// Sheet name
    pub name: String,
    /// 0-based sheet index
    pub index: usize,
}

impl Sheet {
    /// Create a sheet reference
    pub fn new(name: impl Into<String>, index: usize) -> Self {
        Self {
            name: name.into(),
            index,
        }
    }

    /// Check that the sheet can be bound
    pub fn validate(&self) -> BindResult<()> {
        if self.name.is_empty() {
            return Err(BindError::SheetNameEmpty);
        }
        Ok(())
    }

    /// Whether [`Sheet::validate`] passes
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

impl<G: Grid> SheetBinder<G> {
    fn attached(&self) -> BindResult<&G> {
        self.grid().ok_or(BindError::GridMissing)
    }

    /// The selected sheet
    pub fn sheet(&self) -> Option<&Sheet> {
        self.selected.as_ref()
    }

    /// Look up a sheet by name
    pub fn sheet_by_name(&self, name: &str) -> BindResult<Sheet> {
        let grid = self.attached()?;
        if name.is_empty() {
            return Err(BindError::SheetNameEmpty);
        }
        let index = grid
            .sheet_index(name)
            .ok_or_else(|| BindError::SheetNotFound(name.to_string()))?;
        Ok(Sheet::new(name, index))
    }

    /// Look up a sheet by index
    pub fn sheet_from_index(&self, index: usize) -> BindResult<Sheet> {
        let name = self
            .attached()?
            .sheet_name(index)
            .ok_or_else(|| BindError::SheetNotFound(format!("#{}", index)))?;
        Ok(Sheet::new(name, index))
    }

    /// The grid's active sheet
    pub fn active_sheet(&self) -> BindResult<Sheet> {
        let index = self.attached()?.active_sheet_index();
        self.sheet_from_index(index)
    }

    /// Select a sheet for binding
    pub fn set_sheet(&mut self, sheet: Sheet) -> BindResult<()> {
        sheet.validate()?;
        debug!(sheet = %sheet.name, index = sheet.index, "selected sheet");
        self.selected = Some(sheet);
        Ok(())
    }

    /// Select the sheet with this name
    pub fn set_sheet_from_name(&mut self, name: &str) -> BindResult<()> {
        let sheet = self.sheet_by_name(name)?;
        self.set_sheet(sheet)
    }

    /// Select the sheet at this index
    pub fn set_sheet_from_index(&mut self, index: usize) -> BindResult<()> {
        let sheet = self.sheet_from_index(index)?;
        self.set_sheet(sheet)
    }

    /// Make a sheet active in the grid and select it
    pub fn set_active_sheet(&mut self, sheet: &Sheet) -> BindResult<()> {
        sheet.validate()?;
        self.grid_mut()
            .ok_or(BindError::GridMissing)?
            .set_active_sheet(sheet.index)?;
        self.set_sheet(sheet.clone())
    }

    /// Rename the active sheet and select it under its new name
    pub fn set_active_sheet_name(&mut self, name: &str) -> BindResult<()> {
        let active = self.active_sheet()?;
        self.grid_mut()
            .ok_or(BindError::GridMissing)?
            .set_sheet_name(&active.name, name)?;
        self.set_sheet_from_name(name)
    }

    /// Comment of a cell on the selected sheet
    pub fn comment(&self, cell: &str) -> BindResult<Option<CellComment>> {
        let addr = CellAddress::parse(cell)?;
        Ok(self
            .comments()?
            .into_iter()
            .find(|(at, _)| at.row == addr.row && at.col == addr.col)
            .map(|(_, comment)| comment))
    }

    /// All comments of the selected sheet in row order
    pub fn comments(&self) -> BindResult<Vec<(CellAddress, CellComment)>> {
        let grid = self.attached()?;
        let sheet = self.selected.as_ref().ok_or(BindError::SheetNotValid)?;
        sheet.validate()?;
        Ok(grid.comments(&sheet.name)?)
    }
}
