//! Records: named fields bound through tags, header labels or order

use crate::element::{Element, FieldDef};
use crate::error::{BindError, BindResult};
use crate::options::BindOptions;
use crate::report::Column;
use crate::strategy::{find_label, Binding, Slot, Slots, Strategy};
use crate::tag::{TagMap, Tags};

pub(crate) struct RecordStrategy {
    fields: &'static [FieldDef],
    tags: TagMap,
    has_header: bool,
}

impl RecordStrategy {
    /// Merge declared tags with call overrides
    ///
    /// An override replaces the declared tags of its field; an override for a
    /// field the record does not have is rejected.
    pub(crate) fn new<E: Element>(overrides: &TagMap, options: &BindOptions) -> BindResult<Self> {
        let fields = E::fields();
        let mut tags = E::tags();
        for (name, rule) in overrides {
            if !fields.iter().any(|f| f.name == name) {
                return Err(BindError::ConfigNotValid(format!(
                    "{} has no field `{}`",
                    E::TYPE_NAME,
                    name
                )));
            }
            tags.insert(name.clone(), rule.clone());
        }

        let strategy = Self {
            fields,
            tags,
            has_header: options.has_header,
        };
        for (field, rule) in strategy.bound_fields() {
            rule.offset(field.name)?;
        }
        Ok(strategy)
    }

    /// Fields that take part in binding, in declaration order
    fn bound_fields(&self) -> impl Iterator<Item = (&'static FieldDef, Tags)> + '_ {
        self.fields.iter().filter_map(move |field| {
            let rule = self.tags.get(field.name).cloned().unwrap_or_default();
            (!rule.skip).then_some((field, rule))
        })
    }

    /// Position of every bound field
    ///
    /// Explicit positions (tag name in `header`, column index, field name in
    /// `header`) are claimed first. With `fill` set, the remaining fields then
    /// take free positions in declaration order, skipping `reserved`.
    fn resolve(
        &self,
        header: Option<&[String]>,
        reserved: Vec<usize>,
        fill: bool,
    ) -> BindResult<Vec<(&'static FieldDef, Tags, Option<usize>)>> {
        let mut slots = Slots::with_reserved(reserved);
        let mut resolved = Vec::new();
        for (field, rule) in self.bound_fields() {
            let explicit = explicit_position(field, &rule, header)?;
            if let Some(pos) = explicit {
                slots.claim(pos, field.name)?;
            }
            resolved.push((field, rule, explicit));
        }
        if fill {
            for (field, _, pos) in resolved.iter_mut() {
                if pos.is_none() {
                    *pos = Some(slots.next_free(field.name));
                }
            }
        }
        Ok(resolved)
    }
}

fn explicit_position(
    field: &FieldDef,
    rule: &Tags,
    header: Option<&[String]>,
) -> BindResult<Option<usize>> {
    let by_tag_name = rule
        .column_name
        .as_deref()
        .and_then(|name| header.and_then(|labels| find_label(labels, name)));
    if by_tag_name.is_some() {
        return Ok(by_tag_name);
    }
    if let Some(pos) = rule.offset(field.name)? {
        return Ok(Some(pos));
    }
    Ok(header.and_then(|labels| find_label(labels, field.name)))
}

fn binding(field: &FieldDef, label: String, position: usize, rule: Tags) -> Binding {
    Binding::new(
        Column {
            name: label,
            position,
            field: field.name.to_string(),
        },
        Slot::Name(field.name.to_string()),
        rule,
    )
}

impl<E: Element> Strategy<E> for RecordStrategy {
    fn has_header(&self) -> bool {
        self.has_header
    }

    fn read_columns(&self, header: Option<&[String]>, _width: usize) -> BindResult<Vec<Binding>> {
        let label_at = |pos: usize| {
            header
                .and_then(|labels| labels.get(pos))
                .cloned()
                .unwrap_or_default()
        };

        // Without a header, untagged fields take free positions in declaration order
        let mut bindings = Vec::new();
        for (field, rule, pos) in self.resolve(header, Vec::new(), header.is_none())? {
            match pos {
                Some(pos) => bindings.push(binding(field, label_at(pos), pos, rule)),
                None if rule.required => {
                    return Err(BindError::MissingColumn {
                        field: field.name.to_string(),
                    });
                }
                None => {}
            }
        }
        bindings.sort_by_key(|b| b.column.position);
        Ok(bindings)
    }

    fn write_columns(
        &self,
        _elements: &[&E],
        existing: Option<&[String]>,
    ) -> BindResult<Vec<Binding>> {
        let existing = existing.filter(|labels| labels.iter().any(|l| !l.is_empty()));
        let reserved = existing
            .map(|labels| {
                labels
                    .iter()
                    .enumerate()
                    .filter(|(_, l)| !l.is_empty())
                    .map(|(pos, _)| pos)
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        let mut bindings = Vec::new();
        for (field, rule, pos) in self.resolve(existing, reserved, true)? {
            let Some(pos) = pos else { continue };
            let label = if !self.has_header {
                String::new()
            } else {
                existing
                    .and_then(|header| header.get(pos))
                    .filter(|l| !l.is_empty())
                    .cloned()
                    .or_else(|| rule.column_name.clone())
                    .unwrap_or_else(|| field.name.to_string())
            };
            bindings.push(binding(field, label, pos, rule));
        }
        bindings.sort_by_key(|b| b.column.position);
        Ok(bindings)
    }
}
