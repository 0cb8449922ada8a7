//! Cell access for one call

use sheetbind_core::CellValue;
use tracing::trace;

use crate::axis::Layout;
use crate::error::BindResult;
use crate::grid::Grid;
use crate::strategy::Binding;

/// A grid, a sheet and a layout, borrowed for the length of one call
pub(crate) struct Session<'a, G: Grid + ?Sized> {
    grid: &'a mut G,
    sheet: &'a str,
    layout: Layout,
}

impl<'a, G: Grid + ?Sized> Session<'a, G> {
    pub(crate) fn new(grid: &'a mut G, sheet: &'a str, layout: Layout) -> Self {
        Self {
            grid,
            sheet,
            layout,
        }
    }

    pub(crate) fn sheet(&self) -> &str {
        self.sheet
    }

    pub(crate) fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Lines and positions covered by the used range
    pub(crate) fn extent(&self) -> BindResult<(usize, usize)> {
        self.layout.extent(&*self.grid, self.sheet)
    }

    pub(crate) fn read(&self, line: usize, pos: usize) -> BindResult<CellValue> {
        let (row, col) = self.layout.cell(line, pos)?;
        Ok(self.grid.cell(self.sheet, row, col)?)
    }

    pub(crate) fn write(&mut self, line: usize, pos: usize, value: CellValue) -> BindResult<()> {
        let (row, col) = self.layout.cell(line, pos)?;
        self.grid.set_cell(self.sheet, row, col, value)?;
        Ok(())
    }

    /// Labels of line 0, trimmed; blank cells give empty labels
    pub(crate) fn read_labels(&self, width: usize) -> BindResult<Vec<String>> {
        (0..width)
            .map(|pos| Ok(self.read(0, pos)?.to_string().trim().to_string()))
            .collect()
    }

    /// Cells of one data line in binding order
    pub(crate) fn read_line(
        &self,
        line: usize,
        bindings: &[Binding],
    ) -> BindResult<Vec<CellValue>> {
        bindings
            .iter()
            .map(|b| self.read(line, b.column.position))
            .collect()
    }

    /// Write a prepared batch of cells
    pub(crate) fn write_all(&mut self, cells: Vec<(usize, usize, CellValue)>) -> BindResult<()> {
        trace!(sheet = self.sheet, cells = cells.len(), "writing cells");
        for (line, pos, value) in cells {
            self.write(line, pos, value)?;
        }
        Ok(())
    }
}
