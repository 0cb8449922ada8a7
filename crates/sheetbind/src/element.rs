//! Element shapes and field access
//!
//! Every container element implements [`Element`]. The trait tells the binder
//! which [`Shape`] the element has and gives it uniform read/write access to
//! the element's fields, map entries or positions, so strategies never need to
//! know the concrete type.
//!
//! | Shape | Types |
//! |---|---|
//! | [`Shape::Record`] | structs declared with [`record!`](crate::record) |
//! | [`Shape::Mapping`] | `IndexMap<String, V>`, `BTreeMap<String, V>`, `HashMap<String, V, S>` |
//! | [`Shape::Sequence`] | `Vec<V>` |
//! | [`Shape::Scalar`] | plain values such as `String` or `i64` (not bindable) |
//!
//! One level of `Box` is looked through: `Box<Person>` binds like `Person`.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;

use indexmap::IndexMap;
use sheetbind_core::CellValue;

use crate::tag::TagMap;
use crate::value::{ConvertError, FieldValue};

/// Structural category of a container element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Shape {
    /// Named fields with a fixed set of names
    Record,
    /// Text keys to values
    Mapping,
    /// Values addressed by position
    Sequence,
    /// A single value with no fields
    Scalar,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Shape::Record => "record",
            Shape::Mapping => "mapping",
            Shape::Sequence => "sequence",
            Shape::Scalar => "scalar",
        };
        f.write_str(name)
    }
}

/// Address of a value inside an element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKey<'a> {
    /// Record field or map key
    Name(&'a str),
    /// Sequence position
    Position(usize),
}

impl fmt::Display for FieldKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKey::Name(name) => f.write_str(name),
            FieldKey::Position(pos) => write!(f, "{}", pos),
        }
    }
}

/// Declared field of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// Field name as written in the struct
    pub name: &'static str,
    /// Name of the field's value type
    pub type_name: &'static str,
}

/// A value the binder can read from and write to one grid line
pub trait Element: Default {
    /// Structural category, fixed per type
    const SHAPE: Shape;

    /// Type name used in error messages
    const TYPE_NAME: &'static str;

    /// Declared fields of a record, in declaration order
    fn fields() -> &'static [FieldDef] {
        &[]
    }

    /// Tags declared next to the fields of a record
    fn tags() -> TagMap {
        TagMap::new()
    }

    /// Keys present in a mapping, in iteration order
    fn keys(&self) -> Vec<String> {
        Vec::new()
    }

    /// Number of positions a sequence holds
    fn width(&self) -> usize {
        0
    }

    /// Read one value as a cell
    fn get(&self, key: FieldKey<'_>) -> Result<CellValue, ConvertError>;

    /// Write one value from a cell
    fn set(&mut self, key: FieldKey<'_>, value: &CellValue) -> Result<(), ConvertError>;
}

/// Element types that are not themselves a `Box`
///
/// Only `Box<T>` with `T: Direct` is an element, so a doubly boxed element
/// type does not compile.
pub trait Direct: Element {}

impl<T: Element + Direct> Element for Box<T> {
    const SHAPE: Shape = T::SHAPE;
    const TYPE_NAME: &'static str = T::TYPE_NAME;

    fn fields() -> &'static [FieldDef] {
        T::fields()
    }

    fn tags() -> TagMap {
        T::tags()
    }

    fn keys(&self) -> Vec<String> {
        (**self).keys()
    }

    fn width(&self) -> usize {
        (**self).width()
    }

    fn get(&self, key: FieldKey<'_>) -> Result<CellValue, ConvertError> {
        (**self).get(key)
    }

    fn set(&mut self, key: FieldKey<'_>, value: &CellValue) -> Result<(), ConvertError> {
        (**self).set(key, value)
    }
}

impl ConvertError {
    /// The element has no value at `key`
    pub fn unknown_key(key: FieldKey<'_>) -> Self {
        Self {
            expected: "field",
            found: "unknown key",
            detail: Some(key.to_string()),
        }
    }
}

macro_rules! scalar_element {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Element for $ty {
                const SHAPE: Shape = Shape::Scalar;
                const TYPE_NAME: &'static str = <$ty as FieldValue>::TYPE_NAME;

                fn get(&self, _key: FieldKey<'_>) -> Result<CellValue, ConvertError> {
                    self.to_cell()
                }

                fn set(&mut self, _key: FieldKey<'_>, value: &CellValue) -> Result<(), ConvertError> {
                    *self = <$ty as FieldValue>::from_cell(value)?;
                    Ok(())
                }
            }

            impl Direct for $ty {}
        )*
    };
}

scalar_element!(String, bool, i32, i64, u32, u64, f64, CellValue);

/// Cell for an optional map entry
fn entry_cell<V: FieldValue>(value: Option<&V>) -> Result<CellValue, ConvertError> {
    value.map_or(Ok(CellValue::Empty), FieldValue::to_cell)
}

/// Map value for a cell; blank cells give the default
fn entry_value<V: FieldValue + Default>(value: &CellValue) -> Result<V, ConvertError> {
    if value.is_blank() {
        Ok(V::default())
    } else {
        V::from_cell(value)
    }
}

impl<V: FieldValue + Default> Element for IndexMap<String, V> {
    const SHAPE: Shape = Shape::Mapping;
    const TYPE_NAME: &'static str = "IndexMap";

    fn keys(&self) -> Vec<String> {
        IndexMap::keys(self).cloned().collect()
    }

    fn get(&self, key: FieldKey<'_>) -> Result<CellValue, ConvertError> {
        match key {
            FieldKey::Name(name) => entry_cell(IndexMap::get(self, name)),
            other => Err(ConvertError::unknown_key(other)),
        }
    }

    fn set(&mut self, key: FieldKey<'_>, value: &CellValue) -> Result<(), ConvertError> {
        match key {
            FieldKey::Name(name) => {
                self.insert(name.to_string(), entry_value(value)?);
                Ok(())
            }
            other => Err(ConvertError::unknown_key(other)),
        }
    }
}

impl<V: FieldValue + Default> Direct for IndexMap<String, V> {}

impl<V: FieldValue + Default> Element for BTreeMap<String, V> {
    const SHAPE: Shape = Shape::Mapping;
    const TYPE_NAME: &'static str = "BTreeMap";

    fn keys(&self) -> Vec<String> {
        BTreeMap::keys(self).cloned().collect()
    }

    fn get(&self, key: FieldKey<'_>) -> Result<CellValue, ConvertError> {
        match key {
            FieldKey::Name(name) => entry_cell(BTreeMap::get(self, name)),
            other => Err(ConvertError::unknown_key(other)),
        }
    }

    fn set(&mut self, key: FieldKey<'_>, value: &CellValue) -> Result<(), ConvertError> {
        match key {
            FieldKey::Name(name) => {
                self.insert(name.to_string(), entry_value(value)?);
                Ok(())
            }
            other => Err(ConvertError::unknown_key(other)),
        }
    }
}

impl<V: FieldValue + Default> Direct for BTreeMap<String, V> {}

impl<V, S> Element for HashMap<String, V, S>
where
    V: FieldValue + Default,
    S: BuildHasher + Default,
{
    const SHAPE: Shape = Shape::Mapping;
    const TYPE_NAME: &'static str = "HashMap";

    /// Sorted, since hash order is not stable across runs
    fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = HashMap::keys(self).cloned().collect();
        keys.sort();
        keys
    }

    fn get(&self, key: FieldKey<'_>) -> Result<CellValue, ConvertError> {
        match key {
            FieldKey::Name(name) => entry_cell(HashMap::get(self, name)),
            other => Err(ConvertError::unknown_key(other)),
        }
    }

    fn set(&mut self, key: FieldKey<'_>, value: &CellValue) -> Result<(), ConvertError> {
        match key {
            FieldKey::Name(name) => {
                self.insert(name.to_string(), entry_value(value)?);
                Ok(())
            }
            other => Err(ConvertError::unknown_key(other)),
        }
    }
}

impl<V, S> Direct for HashMap<String, V, S>
where
    V: FieldValue + Default,
    S: BuildHasher + Default,
{
}

impl<V: FieldValue + Default> Element for Vec<V> {
    const SHAPE: Shape = Shape::Sequence;
    const TYPE_NAME: &'static str = "Vec";

    fn width(&self) -> usize {
        Vec::len(self)
    }

    fn get(&self, key: FieldKey<'_>) -> Result<CellValue, ConvertError> {
        match key {
            FieldKey::Position(pos) => entry_cell(self.as_slice().get(pos)),
            other => Err(ConvertError::unknown_key(other)),
        }
    }

    fn set(&mut self, key: FieldKey<'_>, value: &CellValue) -> Result<(), ConvertError> {
        match key {
            FieldKey::Position(pos) => {
                let value = entry_value(value)?;
                if pos >= Vec::len(self) {
                    self.resize_with(pos + 1, V::default);
                }
                self[pos] = value;
                Ok(())
            }
            other => Err(ConvertError::unknown_key(other)),
        }
    }
}

impl<V: FieldValue + Default> Direct for Vec<V> {}

/// Declare a struct that binds as a record
///
/// Each field may carry a [`Tags`](crate::Tags) expression after `=>`. The
/// struct must implement `Default`; empty cells leave fields at their default
/// value.
///
/// ```rust
/// use sheetbind::{record, Tags};
///
/// record! {
///     #[derive(Debug, Default, PartialEq)]
///     pub struct Person {
///         pub name: String => Tags::new().column_name("Name"),
///         pub age: i64 => Tags::new().column_index(2),
///         pub active: bool,
///     }
/// }
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $fvis:vis $field:ident : $ty:ty $(=> $tag:expr)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$fmeta])*
                $fvis $field: $ty,
            )*
        }

        impl $crate::Element for $name {
            const SHAPE: $crate::Shape = $crate::Shape::Record;
            const TYPE_NAME: &'static str = stringify!($name);

            fn fields() -> &'static [$crate::FieldDef] {
                const FIELDS: &[$crate::FieldDef] = &[
                    $(
                        $crate::FieldDef {
                            name: stringify!($field),
                            type_name: <$ty as $crate::FieldValue>::TYPE_NAME,
                        },
                    )*
                ];
                FIELDS
            }

            fn tags() -> $crate::TagMap {
                #[allow(unused_mut)]
                let mut tags = $crate::TagMap::new();
                $($(
                    tags.insert(::std::string::String::from(stringify!($field)), $tag);
                )?)*
                tags
            }

            fn get(
                &self,
                key: $crate::FieldKey<'_>,
            ) -> ::std::result::Result<$crate::CellValue, $crate::ConvertError> {
                match key {
                    $(
                        $crate::FieldKey::Name(name) if name == stringify!($field) => {
                            $crate::FieldValue::to_cell(&self.$field)
                        }
                    )*
                    other => ::std::result::Result::Err($crate::ConvertError::unknown_key(other)),
                }
            }

            fn set(
                &mut self,
                key: $crate::FieldKey<'_>,
                value: &$crate::CellValue,
            ) -> ::std::result::Result<(), $crate::ConvertError> {
                match key {
                    $(
                        $crate::FieldKey::Name(name) if name == stringify!($field) => {
                            self.$field = <$ty as $crate::FieldValue>::from_cell(value)?;
                            ::std::result::Result::Ok(())
                        }
                    )*
                    other => ::std::result::Result::Err($crate::ConvertError::unknown_key(other)),
                }
            }
        }

        impl $crate::Direct for $name {}
    };
}
