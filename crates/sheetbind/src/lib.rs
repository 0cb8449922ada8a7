//! # sheetbind
//!
//! Bind in-memory collections to the rows or columns of a spreadsheet.
//!
//! A [`SheetBinder`] reads a sheet region into a container of elements
//! ([`unmarshal`](SheetBinder::unmarshal)) and writes a container back out
//! ([`marshal`](SheetBinder::marshal)). Three element shapes are supported:
//!
//! - **Records**: structs declared with [`record!`], one field per column,
//!   matched through [`Tags`], header labels or field order
//! - **Mappings**: `IndexMap`, `BTreeMap` or `HashMap` keyed by header label
//! - **Sequences**: `Vec<V>`, one item per column position
//!
//! Regions run along rows or columns from any origin cell ([`Axis`]). Cell
//! storage comes through the [`Grid`] trait, implemented for
//! [`sheetbind_core::Workbook`].
//!
//! ## Example
//!
//! ```rust
//! use sheetbind::prelude::*;
//!
//! record! {
//!     #[derive(Debug, Default, PartialEq)]
//!     pub struct Person {
//!         pub name: String => Tags::new().column_name("Name"),
//!         pub age: i64 => Tags::new().column_index(2),
//!         pub active: bool => Tags::new().column_name("Active"),
//!     }
//! }
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.worksheet_mut(0).unwrap();
//! sheet.set_row_values(0, ["Name", "Age", "Active"]).unwrap();
//! sheet.set_cell_value("A2", "Ada").unwrap();
//! sheet.set_cell_value("B2", 36.0).unwrap();
//! sheet.set_cell_value("C2", true).unwrap();
//!
//! let mut binder = SheetBinder::new(&mut workbook);
//! binder.set_sheet_from_name("Sheet1").unwrap();
//!
//! let mut people: Vec<Person> = Vec::new();
//! binder.unmarshal(&mut people).unwrap();
//! assert_eq!(people[0], Person { name: "Ada".into(), age: 36, active: true });
//! ```

pub mod axis;
pub mod binder;
pub mod container;
pub mod element;
pub mod error;
pub mod grid;
pub mod options;
pub mod prelude;
pub mod report;
pub mod sheet;
pub mod tag;
pub mod value;

mod session;
mod strategy;

pub use axis::{Axis, Direction};
pub use binder::SheetBinder;
pub use container::{classify, Container};
pub use element::{Direct, Element, FieldDef, FieldKey, Shape};
pub use error::{BindError, BindResult};
pub use grid::Grid;
pub use options::BindOptions;
pub use report::{BindReport, Column};
pub use sheet::Sheet;
pub use tag::{TagMap, Tags};
#[cfg(feature = "serde")]
pub use value::Json;
pub use value::{ConvertError, FieldValue};

pub use sheetbind_core::{CellAddress, CellComment, CellValue, Workbook};
