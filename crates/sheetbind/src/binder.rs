//! The binding engine
//!
//! [`SheetBinder`] owns a grid handle, a sheet selection, an axis and options.
//! Each [`unmarshal`](SheetBinder::unmarshal) or
//! [`marshal`](SheetBinder::marshal) call runs the same pipeline: validate the
//! configuration, classify the container, build the strategy for its shape,
//! resolve columns and walk the data lines.
//!
//! ## Example
//!
//! ```rust
//! use sheetbind::{record, SheetBinder, Tags};
//! use sheetbind_core::Workbook;
//!
//! record! {
//!     #[derive(Debug, Default, PartialEq)]
//!     struct Person {
//!         name: String => Tags::new().column_name("Name"),
//!         age: i64,
//!     }
//! }
//!
//! let mut workbook = Workbook::new();
//! let mut binder = SheetBinder::new(&mut workbook);
//! binder.set_sheet_from_name("Sheet1").unwrap();
//!
//! let people = vec![Person { name: "Ada".into(), age: 36 }];
//! binder.marshal(&people).unwrap();
//!
//! let mut read: Vec<Person> = Vec::new();
//! binder.unmarshal(&mut read).unwrap();
//! assert_eq!(read, people);
//! ```

use sheetbind_core::CellValue;
use tracing::{debug, trace};

use crate::axis::{self, Axis, Layout};
use crate::container::{classify, Container};
use crate::element::{Element, Shape};
use crate::error::{BindError, BindResult};
use crate::grid::Grid;
use crate::options::BindOptions;
use crate::report::BindReport;
use crate::session::Session;
use crate::sheet::Sheet;
use crate::strategy::{bind_cell, strategy_for, unbind_cell, Strategy};
use crate::tag::TagMap;

/// Binds containers to a sheet of a grid
#[derive(Debug)]
pub struct SheetBinder<G: Grid> {
    grid: Option<G>,
    pub(crate) selected: Option<Sheet>,
    axis: Axis,
    options: BindOptions,
    report: Option<BindReport>,
}

impl<G: Grid> Default for SheetBinder<G> {
    fn default() -> Self {
        Self {
            grid: None,
            selected: None,
            axis: Axis::default(),
            options: BindOptions::default(),
            report: None,
        }
    }
}

impl<G: Grid> SheetBinder<G> {
    /// Create a binder over a grid, with no sheet selected
    pub fn new(grid: G) -> Self {
        Self {
            grid: Some(grid),
            ..Self::default()
        }
    }

    /// Attach a grid, returning the previous one
    ///
    /// The sheet selection is cleared; sheets belong to the grid.
    pub fn attach(&mut self, grid: G) -> Option<G> {
        self.selected = None;
        self.report = None;
        self.grid.replace(grid)
    }

    /// Detach the grid
    pub fn detach(&mut self) -> Option<G> {
        self.selected = None;
        self.report = None;
        self.grid.take()
    }

    /// The attached grid
    pub fn grid(&self) -> Option<&G> {
        self.grid.as_ref()
    }

    /// The attached grid, mutably
    pub fn grid_mut(&mut self) -> Option<&mut G> {
        self.grid.as_mut()
    }

    /// Consume the binder, returning its grid
    pub fn into_grid(self) -> Option<G> {
        self.grid
    }

    /// Current options
    pub fn options(&self) -> &BindOptions {
        &self.options
    }

    /// Replace the options
    pub fn set_options(&mut self, options: BindOptions) {
        self.options = options;
    }

    /// Builder-style [`set_options`](Self::set_options)
    pub fn with_options(mut self, options: BindOptions) -> Self {
        self.options = options;
        self
    }

    /// Current axis
    pub fn axis(&self) -> &Axis {
        &self.axis
    }

    /// Replace the axis
    pub fn set_axis(&mut self, axis: Axis) {
        self.axis = axis;
    }

    /// Builder-style [`set_axis`](Self::set_axis)
    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    /// Summary of the last call, if it succeeded
    pub fn report(&self) -> Option<&BindReport> {
        self.report.as_ref()
    }

    /// Read every data line of the region and append one element per line
    ///
    /// On error the container is left as it was.
    pub fn unmarshal<C>(&mut self, container: &mut C) -> BindResult<()>
    where
        C: Container + ?Sized,
    {
        self.unmarshal_with_tags(container, &TagMap::new())
    }

    /// [`unmarshal`](Self::unmarshal) with tag overrides
    pub fn unmarshal_with_tags<C>(&mut self, container: &mut C, tags: &TagMap) -> BindResult<()>
    where
        C: Container + ?Sized,
    {
        self.report = None;
        self.validate()?;
        let shape = classify(&*container, true)?;
        let strategy = strategy_for::<C::Item>(shape, tags, &self.options)?;
        let options = self.options.clone();

        let (items, report) = {
            let session = self.session()?;
            debug!(
                sheet = session.sheet(),
                origin = %session.layout().name(0, 0),
                %shape,
                "unmarshal"
            );
            read_lines(&session, strategy.as_ref(), &options, shape)?
        };

        for item in items {
            container.push(item)?;
        }
        debug!(rows = report.rows, "unmarshal complete");
        self.report = Some(report);
        Ok(())
    }

    /// Write a header line, when the shape has one, and one data line per element
    ///
    /// Repeated calls write the same region again.
    pub fn marshal<C>(&mut self, container: &C) -> BindResult<()>
    where
        C: Container + ?Sized,
    {
        self.marshal_with_tags(container, &TagMap::new())
    }

    /// [`marshal`](Self::marshal) with tag overrides
    pub fn marshal_with_tags<C>(&mut self, container: &C, tags: &TagMap) -> BindResult<()>
    where
        C: Container + ?Sized,
    {
        self.report = None;
        self.validate()?;
        let shape = classify(container, false)?;
        let strategy = strategy_for::<C::Item>(shape, tags, &self.options)?;
        let elements: Vec<&C::Item> = (0..container.len())
            .filter_map(|i| container.item(i))
            .collect();

        let report = {
            let mut session = self.session()?;
            debug!(sheet = session.sheet(), %shape, elements = elements.len(), "marshal");
            write_lines(&mut session, strategy.as_ref(), &elements, shape)?
        };

        debug!(rows = report.rows, "marshal complete");
        self.report = Some(report);
        Ok(())
    }

    /// Check grid, then sheet, then axis, without touching the grid
    fn validate(&self) -> BindResult<()> {
        if self.grid.is_none() {
            return Err(BindError::GridMissing);
        }
        match &self.selected {
            Some(sheet) if sheet.is_valid() => {}
            _ => return Err(BindError::SheetNotValid),
        }
        axis::check(&self.axis)
    }

    fn session(&mut self) -> BindResult<Session<'_, G>> {
        let layout = Layout::new(self.axis);
        let grid = self.grid.as_mut().ok_or(BindError::GridMissing)?;
        let sheet = self.selected.as_ref().ok_or(BindError::SheetNotValid)?;
        Ok(Session::new(grid, &sheet.name, layout))
    }
}

fn read_lines<E, G>(
    session: &Session<'_, G>,
    strategy: &dyn Strategy<E>,
    options: &BindOptions,
    shape: Shape,
) -> BindResult<(Vec<E>, BindReport)>
where
    E: Element,
    G: Grid,
{
    let (lines, width) = session.extent()?;
    if lines == 0 {
        return Ok((
            Vec::new(),
            BindReport {
                shape,
                columns: Vec::new(),
                rows: 0,
            },
        ));
    }

    let has_header = strategy.has_header();
    let header = if has_header {
        Some(session.read_labels(width)?)
    } else {
        None
    };
    let bindings = strategy.read_columns(header.as_deref(), width)?;

    // Mapping entries and sequence slots exist for every column, records keep defaults
    let fill_blank = shape != Shape::Record;
    let mut items = Vec::new();
    for line in usize::from(has_header)..lines {
        let cells = session.read_line(line, &bindings)?;
        if options.skip_blank_lines && cells.iter().all(CellValue::is_blank) {
            trace!(line, "skipping blank line");
            continue;
        }

        let mut item = E::default();
        for (binding, cell) in bindings.iter().zip(&cells) {
            bind_cell(&mut item, binding, cell, session.layout(), line, fill_blank)?;
        }
        items.push(item);
    }

    let report = BindReport {
        shape,
        columns: bindings.into_iter().map(|b| b.column).collect(),
        rows: items.len(),
    };
    Ok((items, report))
}

fn write_lines<E, G>(
    session: &mut Session<'_, G>,
    strategy: &dyn Strategy<E>,
    elements: &[&E],
    shape: Shape,
) -> BindResult<BindReport>
where
    E: Element,
    G: Grid,
{
    let has_header = strategy.has_header();
    let existing = if has_header {
        let (_, width) = session.extent()?;
        Some(session.read_labels(width)?)
    } else {
        None
    };
    let bindings = strategy.write_columns(elements, existing.as_deref())?;
    let layout = *session.layout();
    let start = usize::from(has_header);

    // Everything is converted and bounds-checked before the first write
    if let Some(last) = bindings.iter().map(|b| b.column.position).max() {
        if !elements.is_empty() {
            layout.cell(start + elements.len() - 1, last)?;
        }
    }

    let mut cells = Vec::with_capacity((elements.len() + 1) * bindings.len());
    if has_header {
        for binding in bindings.iter().filter(|b| !b.column.name.is_empty()) {
            layout.cell(0, binding.column.position)?;
            cells.push((
                0,
                binding.column.position,
                CellValue::string(binding.column.name.as_str()),
            ));
        }
    }
    for (i, element) in elements.iter().enumerate() {
        let line = start + i;
        for binding in &bindings {
            let value = unbind_cell(*element, binding, &layout, line)?;
            cells.push((line, binding.column.position, value));
        }
    }
    session.write_all(cells)?;

    Ok(BindReport {
        shape,
        columns: bindings.into_iter().map(|b| b.column).collect(),
        rows: elements.len(),
    })
}
