//! Positional layout descriptors.
//!
//! A layout is an ordered instruction list read in lockstep with the value
//! cells of a source table. Position 0 belongs to the row-identity column and
//! is never resolved; the first field instruction lives at position 1.
//!
//! # Step contract
//!
//! Cell index and layout position diverge: every source column consumes one
//! *step*, and a step spans one to three layout entries.
//!
//! | Entries at the cursor                     | Width |
//! |-------------------------------------------|-------|
//! | `Field`                                   | 1     |
//! | `SelectMarker`, `SelectSpec`              | 2     |
//! | `SectionField`, `Field`                   | 2     |
//! | `SectionField`, `SelectMarker`, `SelectSpec` | 3  |
//!
//! [`LayoutCursor`] owns that arithmetic so callers only track the cell index.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{LayoutFault, ModelError, Result};

/// Sentinel announcing that the next entry holds select options.
pub const SELECT_MARKER: &str = "next_is_select";

/// Substring that turns an entry into a section break.
const SECTION_KEYWORD: &str = "section";

/// A layout entry as written in a job configuration.
///
/// Strings name fields (or sentinels); single-key tables carry select options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawLayoutEntry {
    Name(String),
    Options(BTreeMap<String, Vec<String>>),
}

impl From<&str> for RawLayoutEntry {
    fn from(value: &str) -> Self {
        Self::Name(value.to_string())
    }
}

/// A classified layout instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutEntry {
    /// Plain control bound to the named field.
    Field(String),
    /// Section break; the following entry is the field it precedes.
    SectionField(String),
    /// The next entry is a [`LayoutEntry::SelectSpec`].
    SelectMarker,
    SelectSpec {
        field_name: String,
        options: Vec<String>,
    },
}

impl LayoutEntry {
    fn classify(raw: RawLayoutEntry, position: usize) -> Result<Self> {
        match raw {
            RawLayoutEntry::Name(name) if name == SELECT_MARKER => Ok(Self::SelectMarker),
            RawLayoutEntry::Name(name) if name.contains(SECTION_KEYWORD) => {
                Ok(Self::SectionField(name))
            }
            RawLayoutEntry::Name(name) => Ok(Self::Field(name)),
            RawLayoutEntry::Options(map) => {
                if map.len() != 1 {
                    return Err(ModelError::layout(
                        position,
                        LayoutFault::SelectSpecKeys(map.len()),
                    ));
                }
                let Some((field_name, options)) = map.into_iter().next() else {
                    return Err(ModelError::layout(position, LayoutFault::SelectSpecKeys(0)));
                };
                Ok(Self::SelectSpec {
                    field_name,
                    options,
                })
            }
        }
    }

    /// Label carried by a section entry: the text after the first `_`.
    pub fn section_label(&self) -> Option<&str> {
        match self {
            Self::SectionField(name) => {
                Some(name.split_once('_').map_or("", |(_, label)| label))
            }
            _ => None,
        }
    }
}

/// What a resolved step binds its column to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldBinding<'a> {
    Field { name: &'a str },
    Select { name: &'a str, options: &'a [String] },
}

impl<'a> FieldBinding<'a> {
    /// Name of the field as written in the layout.
    pub fn name(&self) -> &'a str {
        match self {
            Self::Field { name } | Self::Select { name, .. } => name,
        }
    }
}

/// One column's worth of layout instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedStep<'a> {
    /// Layout position where the step starts.
    pub position: usize,
    pub section: Option<&'a str>,
    pub binding: FieldBinding<'a>,
    /// Number of layout entries the step consumes.
    pub width: usize,
}

/// A validated layout descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutDescriptor {
    entries: Vec<LayoutEntry>,
}

impl LayoutDescriptor {
    /// Classify and validate raw entries.
    ///
    /// Every select options table must directly follow [`SELECT_MARKER`], and
    /// every marker must be followed by an options table.
    pub fn new(raw: impl IntoIterator<Item = RawLayoutEntry>) -> Result<Self> {
        let entries = raw
            .into_iter()
            .enumerate()
            .map(|(position, entry)| LayoutEntry::classify(entry, position))
            .collect::<Result<Vec<_>>>()?;
        Self::from_entries(entries)
    }

    pub fn from_entries(entries: Vec<LayoutEntry>) -> Result<Self> {
        for (position, entry) in entries.iter().enumerate() {
            match entry {
                LayoutEntry::SelectSpec { .. } => {
                    let preceded = position
                        .checked_sub(1)
                        .and_then(|prev| entries.get(prev))
                        .is_some_and(|prev| *prev == LayoutEntry::SelectMarker);
                    if !preceded {
                        return Err(ModelError::layout(position, LayoutFault::OrphanedSelectSpec));
                    }
                }
                LayoutEntry::SelectMarker => {
                    let followed = matches!(
                        entries.get(position + 1),
                        Some(LayoutEntry::SelectSpec { .. })
                    );
                    if !followed {
                        return Err(ModelError::layout(position, LayoutFault::MissingSelectSpec));
                    }
                }
                LayoutEntry::Field(_) | LayoutEntry::SectionField(_) => {}
            }
        }
        Ok(Self { entries })
    }

    pub fn at(&self, position: usize) -> Option<&LayoutEntry> {
        self.entries.get(position)
    }

    /// Single-entry advance; multi-entry steps are composed from this.
    pub const fn advance(cursor: usize) -> usize {
        cursor + 1
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cursor positioned on the first field instruction.
    pub fn cursor(&self) -> LayoutCursor<'_> {
        LayoutCursor {
            layout: self,
            position: 1,
        }
    }

    /// Resolve every step from position 1 to the end of the layout.
    pub fn steps(&self) -> Result<Vec<ResolvedStep<'_>>> {
        let mut cursor = self.cursor();
        let mut steps = Vec::new();
        while cursor.position() < self.len() {
            let step = cursor.resolve()?;
            cursor.advance(&step);
            steps.push(step);
        }
        Ok(steps)
    }
}

/// Explicit cursor over a [`LayoutDescriptor`].
#[derive(Debug, Clone)]
pub struct LayoutCursor<'a> {
    layout: &'a LayoutDescriptor,
    position: usize,
}

impl<'a> LayoutCursor<'a> {
    pub fn position(&self) -> usize {
        self.position
    }

    /// Resolve the step starting at the cursor without moving it.
    ///
    /// Running past the end means the source has more columns than the layout
    /// describes.
    pub fn resolve(&self) -> Result<ResolvedStep<'a>> {
        let layout = self.layout;
        let start = self.position;
        let entry = layout
            .at(start)
            .ok_or(ModelError::layout(start, LayoutFault::ShorterThanSource))?;

        let (section, field_position) = match entry {
            LayoutEntry::SectionField(_) => (entry.section_label(), LayoutDescriptor::advance(start)),
            _ => (None, start),
        };

        let field_entry = layout.at(field_position).ok_or(ModelError::layout(
            field_position,
            LayoutFault::SectionWithoutField,
        ))?;
        let (binding, end) = match field_entry {
            LayoutEntry::Field(name) => (
                FieldBinding::Field {
                    name: name.as_str(),
                },
                LayoutDescriptor::advance(field_position),
            ),
            LayoutEntry::SelectMarker => {
                let spec_position = LayoutDescriptor::advance(field_position);
                match layout.at(spec_position) {
                    Some(LayoutEntry::SelectSpec {
                        field_name,
                        options,
                    }) => (
                        FieldBinding::Select {
                            name: field_name.as_str(),
                            options: options.as_slice(),
                        },
                        LayoutDescriptor::advance(spec_position),
                    ),
                    _ => {
                        return Err(ModelError::layout(
                            field_position,
                            LayoutFault::MissingSelectSpec,
                        ));
                    }
                }
            }
            LayoutEntry::SectionField(_) => {
                return Err(ModelError::layout(start, LayoutFault::SectionWithoutField));
            }
            LayoutEntry::SelectSpec { .. } => {
                return Err(ModelError::layout(
                    field_position,
                    LayoutFault::OrphanedSelectSpec,
                ));
            }
        };

        Ok(ResolvedStep {
            position: start,
            section,
            binding,
            width: end - start,
        })
    }

    /// Move past a step previously returned by [`LayoutCursor::resolve`].
    pub fn advance(&mut self, step: &ResolvedStep<'_>) {
        for _ in 0..step.width {
            self.position = LayoutDescriptor::advance(self.position);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(raw: Vec<RawLayoutEntry>) -> LayoutDescriptor {
        LayoutDescriptor::new(raw).expect("valid layout")
    }

    fn options(name: &str, values: &[&str]) -> RawLayoutEntry {
        let mut map = BTreeMap::new();
        map.insert(
            name.to_string(),
            values.iter().map(|value| (*value).to_string()).collect(),
        );
        RawLayoutEntry::Options(map)
    }

    #[test]
    fn classifies_entries() {
        let layout = descriptor(vec![
            "".into(),
            "title".into(),
            "section_Billing".into(),
            "amount".into(),
            SELECT_MARKER.into(),
            options("plan", &["A", "B"]),
        ]);
        assert_eq!(layout.at(1), Some(&LayoutEntry::Field("title".into())));
        assert_eq!(layout.at(2).and_then(LayoutEntry::section_label), Some("Billing"));
        assert_eq!(layout.at(4), Some(&LayoutEntry::SelectMarker));
        assert!(matches!(layout.at(5), Some(LayoutEntry::SelectSpec { field_name, .. }) if field_name == "plan"));
    }

    #[test]
    fn cursor_steps_have_variable_width() {
        let layout = descriptor(vec![
            "".into(),
            "title".into(),
            "section_Billing".into(),
            "amount".into(),
            SELECT_MARKER.into(),
            options("plan", &["A", "B"]),
            "section_Plan".into(),
            SELECT_MARKER.into(),
            options("tier", &["1"]),
        ]);
        let steps = layout.steps().expect("steps");
        let widths: Vec<usize> = steps.iter().map(|step| step.width).collect();
        assert_eq!(widths, vec![1, 2, 2, 3]);
        let positions: Vec<usize> = steps.iter().map(|step| step.position).collect();
        assert_eq!(positions, vec![1, 2, 4, 6]);
        assert_eq!(steps[1].section, Some("Billing"));
        assert_eq!(steps[3].section, Some("Plan"));
        assert_eq!(steps[3].binding.name(), "tier");
    }

    #[test]
    fn resolving_past_the_end_is_malformed() {
        let layout = descriptor(vec!["".into(), "title".into()]);
        let mut cursor = layout.cursor();
        let step = cursor.resolve().expect("first step");
        cursor.advance(&step);
        assert_eq!(
            cursor.resolve(),
            Err(ModelError::MalformedLayout {
                position: 2,
                fault: LayoutFault::ShorterThanSource
            })
        );
    }

    #[test]
    fn trailing_section_is_malformed() {
        let layout = descriptor(vec!["".into(), "section_Tail".into()]);
        assert_eq!(
            layout.steps(),
            Err(ModelError::MalformedLayout {
                position: 2,
                fault: LayoutFault::SectionWithoutField
            })
        );
    }

    #[test]
    fn section_label_without_underscore_is_empty() {
        let entry = LayoutEntry::SectionField("section".into());
        assert_eq!(entry.section_label(), Some(""));
    }

    #[test]
    fn section_label_keeps_later_underscores() {
        let entry = LayoutEntry::SectionField("section_Site_Details".into());
        assert_eq!(entry.section_label(), Some("Site_Details"));
    }
}
