//! Conversion between cell values and field values
//!
//! [`FieldValue`] is implemented for every type a record field, map value or
//! sequence item can hold. Conversions are lenient in the direction a
//! spreadsheet user would expect: numbers stored as text parse, booleans
//! accept `yes`/`no`, dates accept serial numbers.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use sheetbind_core::{serial_to_datetime, CellValue};
use thiserror::Error;

/// Largest integer an f64 holds exactly (2^53)
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A value that could not be converted
///
/// The binder attaches the cell, row and field to this before reporting it.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("expected {expected}, found {found}")]
pub struct ConvertError {
    /// Type the conversion was aiming for
    pub expected: &'static str,
    /// Kind of value that was found
    pub found: &'static str,
    /// Extra information (parse failures, range errors)
    pub detail: Option<String>,
}

impl ConvertError {
    /// Conversion from `value` into `expected` is impossible
    pub fn new(expected: &'static str, value: &CellValue) -> Self {
        Self {
            expected,
            found: value.type_name(),
            detail: None,
        }
    }

    /// Attach a detail message
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// A type that converts to and from a single cell
pub trait FieldValue: Sized {
    /// Name of the type in error messages
    const TYPE_NAME: &'static str;

    /// Convert into the grid's native value
    fn to_cell(&self) -> Result<CellValue, ConvertError>;

    /// Convert from a non-empty cell value
    ///
    /// The binder decides what an empty cell means before calling this;
    /// implementations only see [`CellValue::Empty`] through `Option<T>` or
    /// when an empty default is configured.
    fn from_cell(value: &CellValue) -> Result<Self, ConvertError>;
}

impl FieldValue for CellValue {
    const TYPE_NAME: &'static str = "cell";

    fn to_cell(&self) -> Result<CellValue, ConvertError> {
        Ok(self.clone())
    }

    fn from_cell(value: &CellValue) -> Result<Self, ConvertError> {
        Ok(value.clone())
    }
}

impl FieldValue for String {
    const TYPE_NAME: &'static str = "string";

    fn to_cell(&self) -> Result<CellValue, ConvertError> {
        Ok(CellValue::string(self.as_str()))
    }

    fn from_cell(value: &CellValue) -> Result<Self, ConvertError> {
        match value {
            CellValue::Error(e) => {
                Err(ConvertError::new(Self::TYPE_NAME, value).with_detail(e.as_str()))
            }
            other => Ok(other.to_string()),
        }
    }
}

impl FieldValue for bool {
    const TYPE_NAME: &'static str = "bool";

    fn to_cell(&self) -> Result<CellValue, ConvertError> {
        Ok(CellValue::Boolean(*self))
    }

    fn from_cell(value: &CellValue) -> Result<Self, ConvertError> {
        match value {
            CellValue::Boolean(b) => Ok(*b),
            CellValue::Number(n) => Ok(*n != 0.0),
            CellValue::String(s) => match s.as_str().trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" => Ok(true),
                "false" | "no" | "0" => Ok(false),
                other => Err(ConvertError::new(Self::TYPE_NAME, value)
                    .with_detail(format!("'{}' is not a boolean", other))),
            },
            _ => Err(ConvertError::new(Self::TYPE_NAME, value)),
        }
    }
}

/// Read a cell as a number, parsing text when needed
fn number(expected: &'static str, value: &CellValue) -> Result<f64, ConvertError> {
    match value {
        CellValue::Number(n) => Ok(*n),
        CellValue::Boolean(b) => Ok(if *b { 1.0 } else { 0.0 }),
        CellValue::String(s) => s.as_str().trim().parse::<f64>().map_err(|e| {
            ConvertError::new(expected, value).with_detail(format!("'{}': {}", s, e))
        }),
        _ => Err(ConvertError::new(expected, value)),
    }
}

macro_rules! integer_field {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FieldValue for $ty {
                const TYPE_NAME: &'static str = stringify!($ty);

                fn to_cell(&self) -> Result<CellValue, ConvertError> {
                    let n = *self as f64;
                    if n.abs() > MAX_EXACT_INTEGER {
                        return Err(ConvertError {
                            expected: "number",
                            found: Self::TYPE_NAME,
                            detail: Some(format!("{} cannot be stored exactly", self)),
                        });
                    }
                    Ok(CellValue::Number(n))
                }

                fn from_cell(value: &CellValue) -> Result<Self, ConvertError> {
                    let n = number(Self::TYPE_NAME, value)?;
                    let out_of_range = || {
                        ConvertError::new(Self::TYPE_NAME, value)
                            .with_detail(format!("{} is out of range", n))
                    };
                    // `MAX as f64` rounds up for 64-bit types; i128 holds every bound exactly
                    if !n.is_finite() || n.fract() != 0.0 || n.abs() >= 2f64.powi(127) {
                        return Err(out_of_range());
                    }
                    <$ty>::try_from(n as i128).map_err(|_| out_of_range())
                }
            }
        )*
    };
}

integer_field!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl FieldValue for f64 {
    const TYPE_NAME: &'static str = "f64";

    fn to_cell(&self) -> Result<CellValue, ConvertError> {
        Ok(CellValue::Number(*self))
    }

    fn from_cell(value: &CellValue) -> Result<Self, ConvertError> {
        number(Self::TYPE_NAME, value)
    }
}

impl FieldValue for f32 {
    const TYPE_NAME: &'static str = "f32";

    fn to_cell(&self) -> Result<CellValue, ConvertError> {
        Ok(CellValue::Number(*self as f64))
    }

    fn from_cell(value: &CellValue) -> Result<Self, ConvertError> {
        number(Self::TYPE_NAME, value).map(|n| n as f32)
    }
}

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

impl FieldValue for NaiveDateTime {
    const TYPE_NAME: &'static str = "datetime";

    fn to_cell(&self) -> Result<CellValue, ConvertError> {
        Ok(CellValue::DateTime(*self))
    }

    fn from_cell(value: &CellValue) -> Result<Self, ConvertError> {
        match value {
            CellValue::DateTime(dt) => Ok(*dt),
            CellValue::Number(n) => serial_to_datetime(*n).ok_or_else(|| {
                ConvertError::new(Self::TYPE_NAME, value)
                    .with_detail(format!("{} is not a valid date serial", n))
            }),
            CellValue::String(s) => {
                let text = s.as_str().trim();
                DATETIME_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                    .or_else(|| {
                        NaiveDate::parse_from_str(text, "%Y-%m-%d")
                            .ok()
                            .map(|d| d.and_time(NaiveTime::MIN))
                    })
                    .ok_or_else(|| {
                        ConvertError::new(Self::TYPE_NAME, value)
                            .with_detail(format!("'{}' is not a date", text))
                    })
            }
            _ => Err(ConvertError::new(Self::TYPE_NAME, value)),
        }
    }
}

impl FieldValue for NaiveDate {
    const TYPE_NAME: &'static str = "date";

    fn to_cell(&self) -> Result<CellValue, ConvertError> {
        Ok(CellValue::from(*self))
    }

    fn from_cell(value: &CellValue) -> Result<Self, ConvertError> {
        NaiveDateTime::from_cell(value)
            .map(|dt| dt.date())
            .map_err(|e| ConvertError {
                expected: Self::TYPE_NAME,
                ..e
            })
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    const TYPE_NAME: &'static str = T::TYPE_NAME;

    fn to_cell(&self) -> Result<CellValue, ConvertError> {
        match self {
            Some(v) => v.to_cell(),
            None => Ok(CellValue::Empty),
        }
    }

    fn from_cell(value: &CellValue) -> Result<Self, ConvertError> {
        if value.is_blank() {
            Ok(None)
        } else {
            T::from_cell(value).map(Some)
        }
    }
}

#[cfg(feature = "serde")]
mod json {
    use super::{ConvertError, FieldValue};
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Serialize};
    use sheetbind_core::CellValue;

    /// A nested value stored in one cell as JSON text
    ///
    /// ```rust
    /// use sheetbind::{FieldValue, Json};
    /// use serde::{Deserialize, Serialize};
    ///
    /// #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    /// struct Address {
    ///     city: String,
    /// }
    ///
    /// let cell = Json(Address { city: "Oslo".into() }).to_cell().unwrap();
    /// assert_eq!(cell.as_string(), Some(r#"{"city":"Oslo"}"#));
    /// ```
    #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Json<T>(pub T);

    impl<T: Serialize + DeserializeOwned> FieldValue for Json<T> {
        const TYPE_NAME: &'static str = "json";

        fn to_cell(&self) -> Result<CellValue, ConvertError> {
            serde_json::to_string(&self.0)
                .map(CellValue::string)
                .map_err(|e| ConvertError {
                    expected: "string",
                    found: Self::TYPE_NAME,
                    detail: Some(e.to_string()),
                })
        }

        fn from_cell(value: &CellValue) -> Result<Self, ConvertError> {
            let text = value
                .as_string()
                .ok_or_else(|| ConvertError::new(Self::TYPE_NAME, value))?;
            serde_json::from_str(text)
                .map(Json)
                .map_err(|e| ConvertError::new(Self::TYPE_NAME, value).with_detail(e.to_string()))
        }
    }
}

#[cfg(feature = "serde")]
pub use json::Json;
