//! Column resolution per element shape
//!
//! A strategy turns tags, header labels and element contents into a list of
//! [`Binding`]s. The binder then walks data lines and moves values through
//! those bindings the same way for every shape.

mod mapping;
mod record;
mod sequence;

use std::collections::{HashMap, HashSet};

use sheetbind_core::CellValue;
use tracing::trace;

use crate::axis::Layout;
use crate::element::{Element, FieldKey, Shape};
use crate::error::{BindError, BindResult};
use crate::options::BindOptions;
use crate::report::Column;
use crate::tag::{TagMap, Tags};
use crate::value::ConvertError;

pub(crate) use mapping::MappingStrategy;
pub(crate) use record::RecordStrategy;
pub(crate) use sequence::SequenceStrategy;

/// Where a binding reads and writes inside an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Slot {
    Name(String),
    Position(usize),
}

impl Slot {
    fn key(&self) -> FieldKey<'_> {
        match self {
            Slot::Name(name) => FieldKey::Name(name),
            Slot::Position(pos) => FieldKey::Position(*pos),
        }
    }
}

/// A resolved column and the rules that apply to it
#[derive(Debug, Clone)]
pub(crate) struct Binding {
    pub(crate) column: Column,
    pub(crate) slot: Slot,
    pub(crate) rule: Tags,
}

impl Binding {
    pub(crate) fn new(column: Column, slot: Slot, rule: Tags) -> Self {
        trace!(
            field = %column.field,
            position = column.position,
            label = %column.name,
            "resolved column"
        );
        Self { column, slot, rule }
    }
}

/// Column resolution for one element shape
pub(crate) trait Strategy<E: Element> {
    /// Whether line 0 of the region is a header
    fn has_header(&self) -> bool;

    /// Bindings for reading, given the header labels when there is a header
    fn read_columns(&self, header: Option<&[String]>, width: usize) -> BindResult<Vec<Binding>>;

    /// Bindings for writing, given the elements and any labels already in the grid
    fn write_columns(
        &self,
        elements: &[&E],
        existing: Option<&[String]>,
    ) -> BindResult<Vec<Binding>>;
}

/// Build the strategy for a classified shape
///
/// Tag problems are reported here, before the grid is touched.
pub(crate) fn strategy_for<E: Element>(
    shape: Shape,
    overrides: &TagMap,
    options: &BindOptions,
) -> BindResult<Box<dyn Strategy<E>>> {
    match shape {
        Shape::Record => Ok(Box::new(RecordStrategy::new::<E>(overrides, options)?)),
        Shape::Mapping => Ok(Box::new(MappingStrategy::new(overrides, options)?)),
        Shape::Sequence => Ok(Box::new(SequenceStrategy::new(overrides)?)),
        Shape::Scalar => Err(BindError::NoStrategyFound(E::TYPE_NAME)),
    }
}

/// Position of a header label: exact match first, then ASCII case-insensitive
pub(crate) fn find_label(labels: &[String], name: &str) -> Option<usize> {
    if name.is_empty() {
        return None;
    }
    labels
        .iter()
        .position(|label| label == name)
        .or_else(|| labels.iter().position(|label| label.eq_ignore_ascii_case(name)))
}

/// Allocator of column positions for marshal
#[derive(Debug, Default)]
pub(crate) struct Slots {
    taken: HashMap<usize, String>,
    reserved: HashSet<usize>,
    next: usize,
}

impl Slots {
    /// Positions in `reserved` are skipped by [`Slots::next_free`] but can still be claimed
    pub(crate) fn with_reserved(reserved: impl IntoIterator<Item = usize>) -> Self {
        Self {
            reserved: reserved.into_iter().collect(),
            ..Self::default()
        }
    }

    pub(crate) fn claim(&mut self, pos: usize, field: &str) -> BindResult<()> {
        if let Some(other) = self.taken.get(&pos) {
            return Err(BindError::ConfigNotValid(format!(
                "`{}` and `{}` both bind column {}",
                other,
                field,
                pos + 1
            )));
        }
        self.taken.insert(pos, field.to_string());
        Ok(())
    }

    pub(crate) fn next_free(&mut self, field: &str) -> usize {
        while self.taken.contains_key(&self.next) || self.reserved.contains(&self.next) {
            self.next += 1;
        }
        let pos = self.next;
        self.taken.insert(pos, field.to_string());
        pos
    }
}

/// Put one cell into an element
///
/// Blank cells take the `default` tag, fail when required, and otherwise
/// either reset the value (`fill_blank`) or leave it untouched.
pub(crate) fn bind_cell<E: Element>(
    element: &mut E,
    binding: &Binding,
    value: &CellValue,
    layout: &Layout,
    line: usize,
    fill_blank: bool,
) -> BindResult<()> {
    let pos = binding.column.position;
    let value = if value.is_blank() {
        match &binding.rule.default {
            Some(default) => default,
            None if binding.rule.required => {
                return Err(BindError::RequiredFieldEmpty {
                    cell: layout.name(line, pos),
                    row: layout.row_number(line, pos),
                    field: binding.column.field.clone(),
                });
            }
            None if fill_blank => value,
            None => return Ok(()),
        }
    } else {
        value
    };

    element
        .set(binding.slot.key(), value)
        .map_err(|e| conversion(e, binding, layout, line))
}

/// Take one cell out of an element
pub(crate) fn unbind_cell<E: Element>(
    element: &E,
    binding: &Binding,
    layout: &Layout,
    line: usize,
) -> BindResult<CellValue> {
    element
        .get(binding.slot.key())
        .map_err(|e| conversion(e, binding, layout, line))
}

fn conversion(e: ConvertError, binding: &Binding, layout: &Layout, line: usize) -> BindError {
    let pos = binding.column.position;
    BindError::Conversion {
        cell: layout.name(line, pos),
        row: layout.row_number(line, pos),
        field: binding.column.field.clone(),
        expected: e.expected,
        found: e.found,
        detail: e.detail,
    }
}
