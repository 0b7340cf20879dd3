//! Control construction from a resolved layout step and a source cell.
//!
//! Control kinds are chosen by an ordered list of [`ControlRule`]s; the
//! first rule whose predicate holds builds the control. Presentation tags are
//! applied afterwards, independently of the chosen kind.

use std::collections::BTreeSet;

use linkform_ingest::SourceCell;
use linkform_model::{CALENDAR_PATTERN, Control, ControlKind, FieldBinding, PresentationTag};
use tracing::debug;

use crate::normalization::{digits_only, parse_compact_date, strip_calendar_suffix};
use crate::rules::ControlRules;

/// Control-kind rule, evaluated in [`ControlRule::PRIORITY`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlRule {
    /// Free-text note column rendered as a text area.
    InternalNote,
    /// Layout binds the column to a select.
    Select,
    /// Field name marks a date.
    Date,
    /// Fallback single-line input.
    Text,
}

impl ControlRule {
    pub const PRIORITY: [Self; 4] = [Self::InternalNote, Self::Select, Self::Date, Self::Text];

    pub fn display_name(self) -> &'static str {
        match self {
            Self::InternalNote => "Internal note",
            Self::Select => "Select",
            Self::Date => "Date",
            Self::Text => "Text",
        }
    }

    fn matches(self, rules: &ControlRules, binding: &FieldBinding<'_>, label: &str) -> bool {
        match self {
            Self::InternalNote => rules.is_textarea_label(label),
            Self::Select => matches!(binding, FieldBinding::Select { .. }),
            Self::Date => rules.is_date_name(binding.name()),
            Self::Text => true,
        }
    }
}

/// Label and control produced for one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltField {
    pub label: String,
    pub control: Control,
    pub rule: ControlRule,
}

/// Builds controls from rule tables.
#[derive(Debug, Clone, Default)]
pub struct ControlFactory {
    rules: ControlRules,
}

impl ControlFactory {
    pub fn new(rules: ControlRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ControlRules {
        &self.rules
    }

    /// Build the label and control for the cell at `index`.
    pub fn build(&self, binding: FieldBinding<'_>, cell: &SourceCell, index: usize) -> BuiltField {
        let label = self.rules.derive_label(&cell.header);
        let rule = ControlRule::PRIORITY
            .into_iter()
            .find(|rule| rule.matches(&self.rules, &binding, &label))
            .unwrap_or(ControlRule::Text);

        let mut tags = BTreeSet::new();
        let (kind, name, value) = match rule {
            ControlRule::InternalNote => (
                ControlKind::TextArea { resizable: false },
                binding.name().to_string(),
                cell.value.clone(),
            ),
            ControlRule::Select => {
                let listed: &[String] = match binding {
                    FieldBinding::Select { options, .. } => options,
                    FieldBinding::Field { .. } => &[],
                };
                let options = std::iter::once(String::new())
                    .chain(listed.iter().cloned())
                    .collect();
                (
                    ControlKind::Select { options },
                    binding.name().to_string(),
                    cell.value.clone(),
                )
            }
            ControlRule::Date => {
                let (name, calendar) = strip_calendar_suffix(binding.name());
                let value = digits_only(&cell.value);
                if !value.is_empty() && parse_compact_date(&value).is_none() {
                    debug!(field = %name, "date value is not yyyyMMdd, kept as digits");
                }
                tags.insert(PresentationTag::DateField);
                (
                    ControlKind::DateInput {
                        calendar: calendar.then(|| CALENDAR_PATTERN.to_string()),
                    },
                    name,
                    value,
                )
            }
            ControlRule::Text => (
                ControlKind::TextInput,
                binding.name().to_string(),
                cell.value.clone(),
            ),
        };

        if self.rules.is_description_name(&name) {
            tags.insert(PresentationTag::DescriptionField);
        }
        if self.rules.is_id_label(&label) {
            tags.insert(PresentationTag::IdField);
        }

        BuiltField {
            label,
            control: Control {
                kind,
                name,
                value,
                index,
                tags,
            },
            rule,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(header: &str, value: &str) -> SourceCell {
        SourceCell {
            header: header.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn internal_note_wins_over_select() {
        let factory = ControlFactory::default();
        let options = vec!["A".to_string()];
        let built = factory.build(
            FieldBinding::Select {
                name: "note",
                options: &options,
            },
            &cell("連絡_社内連絡", "line"),
            3,
        );
        assert_eq!(built.rule, ControlRule::InternalNote);
        assert_eq!(built.control.kind, ControlKind::TextArea { resizable: false });
        assert_eq!(built.control.value, "line");
        assert_eq!(built.control.index, 3);
    }

    #[test]
    fn select_gets_leading_empty_option() {
        let factory = ControlFactory::default();
        let options = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let built = factory.build(
            FieldBinding::Select {
                name: "plan",
                options: &options,
            },
            &cell("契約_プラン", "B"),
            1,
        );
        assert_eq!(
            built.control.kind,
            ControlKind::Select {
                options: vec!["".into(), "A".into(), "B".into(), "C".into()]
            }
        );
        assert_eq!(built.control.name, "plan");
        assert_eq!(built.control.selected_option(), Some(2));
    }

    #[test]
    fn unmatched_select_value_selects_nothing() {
        let factory = ControlFactory::default();
        let options = vec!["A".to_string()];
        let built = factory.build(
            FieldBinding::Select {
                name: "plan",
                options: &options,
            },
            &cell("プラン", "Z"),
            1,
        );
        assert_eq!(built.control.value, "Z");
        assert_eq!(built.control.selected_option(), None);
    }

    #[test]
    fn calendar_date_is_normalized() {
        let factory = ControlFactory::default();
        let built = factory.build(
            FieldBinding::Field {
                name: "dueDate_calendar",
            },
            &cell("日程_期限", "2024年03月05日(火)"),
            2,
        );
        assert_eq!(built.control.name, "dueDate");
        assert_eq!(built.control.value, "20240305");
        assert_eq!(
            built.control.kind,
            ControlKind::DateInput {
                calendar: Some(CALENDAR_PATTERN.to_string())
            }
        );
        assert!(built.control.has_tag(PresentationTag::DateField));
    }

    #[test]
    fn plain_date_has_no_calendar() {
        let factory = ControlFactory::default();
        let built = factory.build(
            FieldBinding::Field { name: "startDate" },
            &cell("開始日", "未定"),
            2,
        );
        assert_eq!(built.control.kind, ControlKind::DateInput { calendar: None });
        assert_eq!(built.control.value, "");
    }

    #[test]
    fn tags_apply_to_any_kind() {
        let factory = ControlFactory::default();
        let built = factory.build(
            FieldBinding::Field {
                name: "noteDescription",
            },
            &cell("備考_登録者ID", "x"),
            4,
        );
        assert_eq!(built.rule, ControlRule::Text);
        assert_eq!(built.label, "登録者ID");
        assert!(built.control.has_tag(PresentationTag::DescriptionField));
        assert!(built.control.has_tag(PresentationTag::IdField));
        assert!(!built.control.has_tag(PresentationTag::DateField));
    }
}
