//! Sequences: element positions follow grid positions

use std::collections::BTreeMap;

use crate::element::Element;
use crate::error::{BindError, BindResult};
use crate::report::Column;
use crate::strategy::{Binding, Slot, Strategy};
use crate::tag::{TagMap, Tags};

/// Tags are keyed by 0-based grid position written as decimal text
pub(crate) struct SequenceStrategy {
    tags: BTreeMap<usize, Tags>,
}

impl SequenceStrategy {
    pub(crate) fn new(overrides: &TagMap) -> BindResult<Self> {
        let tags: BTreeMap<usize, Tags> = overrides
            .iter()
            .map(|(key, rule)| {
                key.trim()
                    .parse::<usize>()
                    .map(|pos| (pos, rule.clone()))
                    .map_err(|_| {
                        BindError::ConfigNotValid(format!(
                            "sequence tag key `{}` is not a position",
                            key
                        ))
                    })
            })
            .collect::<BindResult<_>>()?;
        Ok(Self { tags })
    }

    fn rule(&self, pos: usize) -> Tags {
        self.tags.get(&pos).cloned().unwrap_or_default()
    }

    fn is_skipped(&self, pos: usize) -> bool {
        self.tags.get(&pos).is_some_and(|rule| rule.skip)
    }

    /// The first `count` grid positions that are not skipped
    fn positions(&self, count: usize) -> impl Iterator<Item = usize> + '_ {
        (0..).filter(move |pos| !self.is_skipped(*pos)).take(count)
    }

    fn bindings(
        &self,
        positions: impl Iterator<Item = usize>,
        label_at: impl Fn(usize) -> String,
    ) -> Vec<Binding> {
        positions
            .enumerate()
            .map(|(index, pos)| {
                Binding::new(
                    Column {
                        name: label_at(pos),
                        position: pos,
                        field: index.to_string(),
                    },
                    Slot::Position(index),
                    self.rule(pos),
                )
            })
            .collect()
    }
}

impl<E: Element> Strategy<E> for SequenceStrategy {
    fn has_header(&self) -> bool {
        self.tags
            .values()
            .any(|rule| !rule.skip && rule.column_name.is_some())
    }

    fn read_columns(&self, header: Option<&[String]>, width: usize) -> BindResult<Vec<Binding>> {
        let positions = (0..width).filter(|pos| !self.is_skipped(*pos));
        Ok(self.bindings(positions, |pos| {
            header
                .and_then(|labels| labels.get(pos))
                .cloned()
                .unwrap_or_default()
        }))
    }

    fn write_columns(
        &self,
        elements: &[&E],
        _existing: Option<&[String]>,
    ) -> BindResult<Vec<Binding>> {
        let width = elements.iter().map(|e| e.width()).max().unwrap_or(0);
        Ok(self.bindings(self.positions(width), |pos| {
            self.tags
                .get(&pos)
                .and_then(|rule| rule.column_name.clone())
                .unwrap_or_default()
        }))
    }
}
