//! Form model produced by one table transformation.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::ids::{ElementIds, StatusTag, form_id};

/// Display pattern of calendar-enabled date inputs.
pub const CALENDAR_PATTERN: &str = "yyyy/MM/dd";

/// Presentation tags attached to a field group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PresentationTag {
    DescriptionField,
    IdField,
    DateField,
}

impl PresentationTag {
    /// Class name the host stylesheet expects.
    pub fn class_name(self) -> &'static str {
        match self {
            Self::DescriptionField => "descriptionField",
            Self::IdField => "idField",
            Self::DateField => "dateField",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ControlKind {
    TextInput,
    DateInput {
        /// Display pattern when a date picker is attached.
        calendar: Option<String>,
    },
    Select {
        /// Options in render order, leading empty option included.
        options: Vec<String>,
    },
    TextArea {
        resizable: bool,
    },
}

impl ControlKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::TextInput => "text",
            Self::DateInput { calendar: Some(_) } => "date (calendar)",
            Self::DateInput { calendar: None } => "date",
            Self::Select { .. } => "select",
            Self::TextArea { .. } => "textarea",
        }
    }
}

/// One editable control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Control {
    pub kind: ControlKind,
    /// Bound field name submitted with the form.
    pub name: String,
    /// Initial value, after any normalization.
    pub value: String,
    /// Source column index.
    pub index: usize,
    pub tags: BTreeSet<PresentationTag>,
}

impl Control {
    pub fn has_tag(&self, tag: PresentationTag) -> bool {
        self.tags.contains(&tag)
    }

    /// Index of the option matching the initial value.
    ///
    /// `None` for non-select controls and for values that match no option;
    /// the host decides what an unmatched select shows.
    pub fn selected_option(&self) -> Option<usize> {
        match &self.kind {
            ControlKind::Select { options } => {
                options.iter().position(|option| *option == self.value)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionBreak {
    pub label: String,
}

/// A labeled control, optionally introduced by a section break.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldGroup {
    pub index: usize,
    pub section: Option<SectionBreak>,
    pub label: String,
    pub control: Control,
}

/// Root of a generated form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormModel {
    pub status: StatusTag,
    pub record_id: String,
    pub groups: Vec<FieldGroup>,
}

impl FormModel {
    pub fn new(status: StatusTag, record_id: impl Into<String>) -> Self {
        Self {
            status,
            record_id: record_id.into(),
            groups: Vec::new(),
        }
    }

    pub fn id(&self) -> String {
        form_id(&self.status)
    }

    pub fn ids(&self, index: usize) -> ElementIds<'_> {
        ElementIds::new(&self.status, index)
    }

    pub fn push(&mut self, group: FieldGroup) {
        self.groups.push(group);
    }

    pub fn section_count(&self) -> usize {
        self.groups
            .iter()
            .filter(|group| group.section.is_some())
            .count()
    }

    pub fn group(&self, name: &str) -> Option<&FieldGroup> {
        self.groups.iter().find(|group| group.control.name == name)
    }
}
