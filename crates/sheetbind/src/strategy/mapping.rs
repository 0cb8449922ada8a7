//! Mappings: header labels become keys

use indexmap::IndexSet;

use crate::element::Element;
use crate::error::{BindError, BindResult};
use crate::options::BindOptions;
use crate::report::Column;
use crate::strategy::{find_label, Binding, Slot, Slots, Strategy};
use crate::tag::{TagMap, Tags};

pub(crate) struct MappingStrategy {
    tags: TagMap,
    strict_keys: bool,
}

impl MappingStrategy {
    pub(crate) fn new(overrides: &TagMap, options: &BindOptions) -> BindResult<Self> {
        if !options.has_header {
            return Err(BindError::ConfigNotValid(
                "mappings need a header line for their keys".into(),
            ));
        }
        for (key, rule) in overrides {
            if !rule.skip {
                rule.offset(key)?;
            }
        }
        Ok(Self {
            tags: overrides.clone(),
            strict_keys: options.strict_keys,
        })
    }

    fn rule(&self, key: &str) -> Tags {
        self.tags.get(key).cloned().unwrap_or_default()
    }

    fn is_skipped(&self, key: &str) -> bool {
        self.tags.get(key).is_some_and(|rule| rule.skip)
    }

    /// Tagged keys in a stable order
    fn tagged(&self) -> Vec<(&String, &Tags)> {
        let mut tagged: Vec<_> = self.tags.iter().filter(|(_, rule)| !rule.skip).collect();
        tagged.sort_by(|a, b| a.0.cmp(b.0));
        tagged
    }
}

fn binding(key: &str, label: String, position: usize, rule: Tags) -> Binding {
    Binding::new(
        Column {
            name: label,
            position,
            field: key.to_string(),
        },
        Slot::Name(key.to_string()),
        rule,
    )
}

impl<E: Element> Strategy<E> for MappingStrategy {
    fn has_header(&self) -> bool {
        true
    }

    fn read_columns(&self, header: Option<&[String]>, _width: usize) -> BindResult<Vec<Binding>> {
        let labels = header.unwrap_or_default();
        let mut bindings = Vec::new();
        let mut claimed = Vec::new();

        for (key, rule) in self.tagged() {
            let name = rule.column_name.as_deref().unwrap_or(key);
            let by_name = find_label(labels, name);
            let pos = match by_name {
                Some(pos) => Some(pos),
                None => rule.offset(key)?,
            };
            match pos {
                Some(pos) => {
                    let label = labels.get(pos).cloned().unwrap_or_default();
                    claimed.push(pos);
                    bindings.push(binding(key, label, pos, rule.clone()));
                }
                None if rule.required => {
                    return Err(BindError::MissingColumn { field: key.clone() })
                }
                None => {}
            }
        }

        for (pos, label) in labels.iter().enumerate() {
            if label.is_empty() || claimed.contains(&pos) || self.is_skipped(label) {
                continue;
            }
            if bindings.iter().any(|b| b.column.field == *label) {
                continue;
            }
            bindings.push(binding(label, label.clone(), pos, self.rule(label)));
        }

        bindings.sort_by_key(|b| b.column.position);
        Ok(bindings)
    }

    fn write_columns(
        &self,
        elements: &[&E],
        _existing: Option<&[String]>,
    ) -> BindResult<Vec<Binding>> {
        let mut keys: IndexSet<String> = IndexSet::new();
        for (index, element) in elements.iter().enumerate() {
            for key in element.keys() {
                if self.is_skipped(&key) || keys.contains(&key) {
                    continue;
                }
                if self.strict_keys && index > 0 {
                    return Err(BindError::UnknownMappingKey {
                        key,
                        element: index,
                    });
                }
                keys.insert(key);
            }
        }

        let mut slots = Slots::default();
        let mut positions = Vec::with_capacity(keys.len());
        for key in &keys {
            let pos = self.rule(key).offset(key)?;
            if let Some(pos) = pos {
                slots.claim(pos, key)?;
            }
            positions.push(pos);
        }

        let mut bindings = Vec::with_capacity(keys.len());
        for (key, pos) in keys.iter().zip(positions) {
            let pos = pos.unwrap_or_else(|| slots.next_free(key));
            let rule = self.rule(key);
            let label = rule.column_name.clone().unwrap_or_else(|| key.clone());
            bindings.push(binding(key, label, pos, rule));
        }
        bindings.sort_by_key(|b| b.column.position);
        Ok(bindings)
    }
}
