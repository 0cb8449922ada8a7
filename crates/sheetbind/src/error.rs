//! Error types for sheetbind

use thiserror::Error;

/// Result type for binding operations
pub type BindResult<T> = std::result::Result<T, BindError>;

/// Errors that can occur while binding a container to a sheet
#[derive(Debug, Error)]
pub enum BindError {
    /// The binder has no grid attached
    #[error("grid handle is not set")]
    GridMissing,

    /// No usable sheet is selected
    #[error("sheet is not valid")]
    SheetNotValid,

    /// A sheet was built with an empty name
    #[error("sheet name is empty")]
    SheetNameEmpty,

    /// The grid has no sheet with this name or index
    #[error("sheet not found: {0}")]
    SheetNotFound(String),

    /// The axis origin lies outside the sheet
    #[error("axis is not valid")]
    AxisNotValid,

    /// Tags or options cannot be resolved into a column layout
    #[error("binding configuration is not valid: {0}")]
    ConfigNotValid(String),

    /// The container cannot take part in this operation
    #[error("container is not valid: {0}")]
    ContainerInvalid(&'static str),

    /// No strategy binds the container's element type
    #[error("no strategy found for element type {0}")]
    NoStrategyFound(&'static str),

    /// A value could not be converted between a cell and a field
    #[error("cannot convert {found} at {cell} (row {row}) into field `{field}` of type {expected}{}", detail_suffix(.detail))]
    Conversion {
        /// A1 reference of the cell
        cell: String,
        /// 1-based grid row
        row: u32,
        /// Field, map key or position being bound
        field: String,
        /// Expected field type
        expected: &'static str,
        /// Kind of value found
        found: &'static str,
        /// Extra information from the converter
        detail: Option<String>,
    },

    /// A required field was bound to an empty cell
    #[error("required field `{field}` is empty at {cell} (row {row})")]
    RequiredFieldEmpty {
        /// A1 reference of the cell
        cell: String,
        /// 1-based grid row
        row: u32,
        /// Field being bound
        field: String,
    },

    /// A required field has no column in the sheet
    #[error("required field `{field}` has no matching column")]
    MissingColumn {
        /// Field without a column
        field: String,
    },

    /// Strict mapping mode met a key outside the header
    #[error("element {element} has key `{key}` that is not in the header")]
    UnknownMappingKey {
        /// Offending key
        key: String,
        /// 0-based element index in the container
        element: usize,
    },

    /// Error raised by the grid
    #[error(transparent)]
    Grid(#[from] sheetbind_core::Error),
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|d| format!(": {}", d))
        .unwrap_or_default()
}
