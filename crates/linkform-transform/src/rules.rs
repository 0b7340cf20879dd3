//! Label rewrites and naming heuristics.
//!
//! Heuristics are data: adding a rule means adding an entry, not another
//! branch in the factory.

use serde::{Deserialize, Serialize};

/// Label of the free-text "internal note" column.
pub const INTERNAL_NOTE_LABEL: &str = "社内連絡";

/// Labels identifying registrant / receiver id columns.
pub const ID_LABEL_MARKERS: &[&str] = &["登録者ID", "受領者ID"];

/// Field-name fragment marking long description fields.
pub const DESCRIPTION_MARKER: &str = "Description";

/// Field-name fragment marking date fields.
pub const DATE_MARKER: &str = "Date";

/// A literal-label rewrite: labels containing `contains` become `replacement`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelRewrite {
    pub contains: String,
    pub replacement: String,
}

impl LabelRewrite {
    pub fn new(contains: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            contains: contains.into(),
            replacement: replacement.into(),
        }
    }
}

/// Rule tables consulted by the control factory.
///
/// Missing tables fall back to the defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlRules {
    /// Applied in order; the first match wins.
    pub label_rewrites: Vec<LabelRewrite>,
    /// Labels rendered as a text area.
    pub textarea_labels: Vec<String>,
    pub id_label_markers: Vec<String>,
    pub description_marker: String,
    pub date_marker: String,
}

impl Default for ControlRules {
    fn default() -> Self {
        Self {
            label_rewrites: vec![LabelRewrite::new("工事実施依頼日(", "工事実施依頼日")],
            textarea_labels: vec![INTERNAL_NOTE_LABEL.to_string()],
            id_label_markers: ID_LABEL_MARKERS
                .iter()
                .map(|marker| (*marker).to_string())
                .collect(),
            description_marker: DESCRIPTION_MARKER.to_string(),
            date_marker: DATE_MARKER.to_string(),
        }
    }
}

impl ControlRules {
    /// Display label for a header cell.
    ///
    /// Headers may carry a `group_label` prefix; only the text after the
    /// first `_` is shown. Rewrites run on the stripped label.
    pub fn derive_label(&self, header: &str) -> String {
        let label = header.split_once('_').map_or(header, |(_, rest)| rest);
        self.label_rewrites
            .iter()
            .find(|rule| label.contains(rule.contains.as_str()))
            .map_or_else(|| label.to_string(), |rule| rule.replacement.clone())
    }

    pub fn is_textarea_label(&self, label: &str) -> bool {
        self.textarea_labels.iter().any(|candidate| candidate == label)
    }

    pub fn is_id_label(&self, label: &str) -> bool {
        self.id_label_markers
            .iter()
            .any(|marker| label.contains(marker.as_str()))
    }

    pub fn is_description_name(&self, name: &str) -> bool {
        name.contains(self.description_marker.as_str())
    }

    pub fn is_date_name(&self, name: &str) -> bool {
        name.contains(self.date_marker.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_keeps_text_after_first_underscore() {
        let rules = ControlRules::default();
        assert_eq!(rules.derive_label("基本_件名"), "件名");
        assert_eq!(rules.derive_label("a_b_c"), "b_c");
        assert_eq!(rules.derive_label("件名"), "件名");
    }

    #[test]
    fn label_rewrite_table_applies() {
        let rules = ControlRules::default();
        assert_eq!(
            rules.derive_label("日程_工事実施依頼日(予定)"),
            "工事実施依頼日"
        );
    }

    #[test]
    fn extra_rewrites_are_additions() {
        let mut rules = ControlRules::default();
        rules
            .label_rewrites
            .push(LabelRewrite::new("完了日(", "完了日"));
        assert_eq!(rules.derive_label("完了日(実績)"), "完了日");
    }

    #[test]
    fn id_labels_match_either_marker() {
        let rules = ControlRules::default();
        assert!(rules.is_id_label("登録者ID"));
        assert!(rules.is_id_label("受領者ID(社員番号)"));
        assert!(!rules.is_id_label("担当者"));
    }
}
