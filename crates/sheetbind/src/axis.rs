//! Orientation and origin of a bound region
//!
//! An [`Axis`] fixes where a region starts and which way records run. The
//! [`Layout`] built from it turns `(line, position)` pairs into grid
//! coordinates: a *line* is one record (a row for [`Direction::Rows`], a
//! column for [`Direction::Columns`]) and a *position* is one field within it.

use sheetbind_core::{CellAddress, MAX_COLS, MAX_ROWS};

use crate::error::{BindError, BindResult};
use crate::grid::Grid;

/// Which way records run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    /// One record per row, header in the origin row
    #[default]
    Rows,
    /// One record per column, header in the origin column
    Columns,
}

/// Origin cell and direction of a region
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Axis {
    /// Record direction
    pub direction: Direction,
    /// 0-based origin row
    pub row: u32,
    /// 0-based origin column
    pub col: u16,
}

impl Axis {
    /// Row-major axis at the given origin
    pub fn rows(row: u32, col: u16) -> Self {
        Self {
            direction: Direction::Rows,
            row,
            col,
        }
    }

    /// Column-major axis at the given origin
    pub fn columns(row: u32, col: u16) -> Self {
        Self {
            direction: Direction::Columns,
            row,
            col,
        }
    }

    /// Row-major axis at an A1 reference
    ///
    /// ```rust
    /// use sheetbind::Axis;
    ///
    /// let axis = Axis::parse("B3").unwrap();
    /// assert_eq!((axis.row, axis.col), (2, 1));
    /// ```
    pub fn parse(origin: &str) -> BindResult<Self> {
        let addr = CellAddress::parse(origin)?;
        Ok(Self::rows(addr.row, addr.col))
    }

    /// Column-major axis at an A1 reference
    pub fn parse_columns(origin: &str) -> BindResult<Self> {
        let addr = CellAddress::parse(origin)?;
        Ok(Self::columns(addr.row, addr.col))
    }

    /// Check that the origin lies inside the sheet limits
    pub fn is_valid(&self) -> bool {
        self.row < MAX_ROWS && self.col < MAX_COLS
    }

    /// A1 reference of the origin
    pub fn origin(&self) -> String {
        CellAddress::new(self.row, self.col).to_a1_string()
    }
}

/// Coordinate mapping for one call
#[derive(Debug, Clone, Copy)]
pub(crate) struct Layout {
    axis: Axis,
}

impl Layout {
    pub(crate) fn new(axis: Axis) -> Self {
        Self { axis }
    }

    /// Grid cell of `(line, pos)`
    pub(crate) fn cell(&self, line: usize, pos: usize) -> BindResult<(u32, u16)> {
        let (row_off, col_off) = match self.axis.direction {
            Direction::Rows => (line, pos),
            Direction::Columns => (pos, line),
        };
        let row = self.axis.row as u64 + row_off as u64;
        let col = self.axis.col as u64 + col_off as u64;
        if row >= MAX_ROWS as u64 {
            return Err(sheetbind_core::Error::RowOutOfBounds(
                u32::try_from(row).unwrap_or(u32::MAX),
                MAX_ROWS - 1,
            )
            .into());
        }
        if col >= MAX_COLS as u64 {
            return Err(sheetbind_core::Error::ColumnOutOfBounds(
                u32::try_from(col).unwrap_or(u32::MAX),
                MAX_COLS - 1,
            )
            .into());
        }
        Ok((row as u32, col as u16))
    }

    /// A1 name of `(line, pos)` for error context
    pub(crate) fn name(&self, line: usize, pos: usize) -> String {
        match self.cell(line, pos) {
            Ok((row, col)) => CellAddress::new(row, col).to_a1_string(),
            Err(_) => format!("line {} position {}", line, pos),
        }
    }

    /// 1-based grid row of `(line, pos)` for error context
    pub(crate) fn row_number(&self, line: usize, pos: usize) -> u32 {
        self.cell(line, pos).map(|(row, _)| row + 1).unwrap_or(0)
    }

    /// Number of lines and positions the sheet's used range covers
    pub(crate) fn extent<G: Grid + ?Sized>(
        &self,
        grid: &G,
        sheet: &str,
    ) -> BindResult<(usize, usize)> {
        let rows = (grid.row_count(sheet)? as usize).saturating_sub(self.axis.row as usize);
        let cols = (grid.col_count(sheet)? as usize).saturating_sub(self.axis.col as usize);
        Ok(match self.axis.direction {
            Direction::Rows => (rows, cols),
            Direction::Columns => (cols, rows),
        })
    }
}

/// Validate an axis before any grid access
pub(crate) fn check(axis: &Axis) -> BindResult<()> {
    if axis.is_valid() {
        Ok(())
    } else {
        Err(BindError::AxisNotValid)
    }
}
