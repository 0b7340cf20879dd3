//! Raw-value normalization for generated controls.

use chrono::NaiveDate;

/// Suffix marking a date field that gets a date picker.
pub const CALENDAR_SUFFIX: &str = "_calendar";

/// Keep ASCII digits only.
///
/// Source tables render dates with separators and a weekday annotation
/// (`2024年03月05日(火)`); the editable value is the bare `20240305`.
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Split the calendar suffix off a field name.
///
/// Returns the bound name and whether the suffix was present.
pub fn strip_calendar_suffix(name: &str) -> (String, bool) {
    if name.contains(CALENDAR_SUFFIX) {
        (name.replacen(CALENDAR_SUFFIX, "", 1), true)
    } else {
        (name.to_string(), false)
    }
}

/// Parse normalized digits as a `yyyyMMdd` date.
pub fn parse_compact_date(digits: &str) -> Option<NaiveDate> {
    if digits.len() != 8 {
        return None;
    }
    NaiveDate::parse_from_str(digits, "%Y%m%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_everything_but_digits() {
        assert_eq!(digits_only("2024年03月05日(火)"), "20240305");
        assert_eq!(digits_only("2024/03/05"), "20240305");
        assert_eq!(digits_only("未定"), "");
    }

    #[test]
    fn strips_calendar_suffix_once() {
        assert_eq!(
            strip_calendar_suffix("dueDate_calendar"),
            ("dueDate".to_string(), true)
        );
        assert_eq!(
            strip_calendar_suffix("dueDate"),
            ("dueDate".to_string(), false)
        );
    }

    #[test]
    fn compact_date_requires_a_real_day() {
        assert_eq!(
            parse_compact_date("20240305"),
            NaiveDate::from_ymd_opt(2024, 3, 5)
        );
        assert!(parse_compact_date("20241305").is_none());
        assert!(parse_compact_date("202403").is_none());
        assert!(parse_compact_date("").is_none());
    }
}
