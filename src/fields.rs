//! Enumerations and field helpers for tasks.
//!
//! This module defines the structured field types shared by the store, the
//! query engine and the interchange codec: priority and category enums, the
//! list-view filter and sort selectors, display labels, and the lenient
//! parsers that fall back to defaults instead of failing.

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Priority classification for tasks.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    #[serde(alias = "Urgent")]
    Urgent,
    #[serde(alias = "Important")]
    Important,
    #[serde(alias = "Normal")]
    #[default]
    Normal,
}

impl Priority {
    /// Sort rank: Urgent before Important before Normal.
    pub fn rank(self) -> u8 {
        match self {
            Priority::Urgent => 0,
            Priority::Important => 1,
            Priority::Normal => 2,
        }
    }

    pub const ALL: [Priority; 3] = [Priority::Urgent, Priority::Important, Priority::Normal];
}

/// Task categorisation buckets.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    #[serde(alias = "Work")]
    Work,
    #[serde(alias = "Personal")]
    Personal,
    #[serde(alias = "Study")]
    Study,
    #[serde(alias = "Other")]
    #[default]
    Other,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Work,
        Category::Personal,
        Category::Study,
        Category::Other,
    ];
}

/// Completion filter for the list view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
}

/// Available sorting options for the list view.
///
/// Every mode sorts incomplete tasks ahead of completed ones first; the mode
/// only picks the secondary key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SortMode {
    #[default]
    Insertion,
    Priority,
    DueDate,
    Name,
}

/// Format a priority for display and CSV interchange.
pub fn format_priority(p: Priority) -> &'static str {
    match p {
        Priority::Urgent => "Urgent",
        Priority::Important => "Important",
        Priority::Normal => "Normal",
    }
}

/// Format a category for display and CSV interchange.
pub fn format_category(c: Category) -> &'static str {
    match c {
        Category::Work => "Work",
        Category::Personal => "Personal",
        Category::Study => "Study",
        Category::Other => "Other",
    }
}

/// Format a status filter for the status bar.
pub fn format_status_filter(f: StatusFilter) -> &'static str {
    match f {
        StatusFilter::All => "All",
        StatusFilter::Pending => "Pending",
        StatusFilter::Completed => "Completed",
    }
}

/// Format a sort mode for the status bar.
pub fn format_sort_mode(s: SortMode) -> &'static str {
    match s {
        SortMode::Insertion => "Insertion",
        SortMode::Priority => "Priority",
        SortMode::DueDate => "Due date",
        SortMode::Name => "Name (A-Z)",
    }
}

/// Parse a priority label from CSV input.
///
/// Only an exact (trimmed) label counts; anything else falls back to Normal.
pub fn parse_priority_label(s: &str) -> Priority {
    match s.trim() {
        "Urgent" => Priority::Urgent,
        "Important" => Priority::Important,
        "Normal" => Priority::Normal,
        _ => Priority::Normal,
    }
}

/// Parse a category label from CSV input, falling back to Other.
pub fn parse_category_label(s: &str) -> Category {
    match s.trim() {
        "Work" => Category::Work,
        "Personal" => Category::Personal,
        "Study" => Category::Study,
        "Other" => Category::Other,
        _ => Category::Other,
    }
}

/// Lenient priority coercion for JSON import.
///
/// Accepts display labels and serde names in any case; unknown values
/// coerce to Normal.
pub fn lenient_priority(s: &str) -> Priority {
    match s.trim().to_lowercase().as_str() {
        "urgent" => Priority::Urgent,
        "important" => Priority::Important,
        _ => Priority::Normal,
    }
}

/// Lenient category coercion for JSON import, defaulting to Other.
pub fn lenient_category(s: &str) -> Category {
    match s.trim().to_lowercase().as_str() {
        "work" => Category::Work,
        "personal" => Category::Personal,
        "study" => Category::Study,
        _ => Category::Other,
    }
}

/// Parse human-friendly due date input from the task form.
///
/// Supports:
/// - "today", "tomorrow"
/// - "in 3d", "in 2w"
/// - "YYYY-MM-DD" format
pub fn parse_due_input(s: &str) -> Option<NaiveDate> {
    let s = s.trim().to_lowercase();
    let today = Local::now().date_naive();

    match s.as_str() {
        "today" => return Some(today),
        "tomorrow" => return Some(today + Duration::days(1)),
        _ => {}
    }

    if let Some(rest) = s.strip_prefix("in ") {
        if let Some(nd) = rest.strip_suffix('d') {
            if let Ok(days) = nd.trim().parse::<i64>() {
                return Some(today + Duration::days(days));
            }
        }
        if let Some(nw) = rest.strip_suffix('w') {
            if let Ok(weeks) = nw.trim().parse::<i64>() {
                return Some(today + Duration::weeks(weeks));
            }
        }
    }

    NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()
}

/// Fallback date parse for CSV import after the strict `%Y-%m-%d` attempt.
///
/// Tries common slash- and dot-separated spellings plus datetime forms whose
/// date portion is usable. Returns None when nothing matches; the caller
/// leaves the due date unset rather than failing the row.
pub fn parse_date_lenient(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y"];
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    const DATETIME_FORMATS: [&str; 3] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    None
}

/// Format a due date relative to today ("today", "tomorrow", "in 3d", "2d late").
pub fn format_due_relative(due: Option<NaiveDate>, today: NaiveDate) -> String {
    match due {
        None => "-".into(),
        Some(d) => {
            let delta = d - today;
            if delta.num_days() == 0 {
                "today".into()
            } else if delta.num_days() == 1 {
                "tomorrow".into()
            } else if delta.num_days() > 1 {
                format!("in {}d", delta.num_days())
            } else {
                format!("{}d late", -delta.num_days())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_labels_round_trip() {
        for p in Priority::ALL {
            assert_eq!(parse_priority_label(format_priority(p)), p);
        }
    }

    #[test]
    fn unknown_priority_defaults_to_normal() {
        assert_eq!(parse_priority_label("Critical"), Priority::Normal);
        assert_eq!(parse_priority_label(""), Priority::Normal);
        // CSV matching is exact: serde spelling is not a label
        assert_eq!(parse_priority_label("urgent"), Priority::Normal);
    }

    #[test]
    fn unknown_category_defaults_to_other() {
        assert_eq!(parse_category_label("Errands"), Category::Other);
        assert_eq!(parse_category_label("  Work "), Category::Work);
    }

    #[test]
    fn lenient_parsers_accept_serde_names() {
        assert_eq!(lenient_priority("urgent"), Priority::Urgent);
        assert_eq!(lenient_priority("Important"), Priority::Important);
        assert_eq!(lenient_priority("???"), Priority::Normal);
        assert_eq!(lenient_category("STUDY"), Category::Study);
        assert_eq!(lenient_category("garden"), Category::Other);
    }

    #[test]
    fn due_input_parses_iso_and_relative() {
        let today = Local::now().date_naive();
        assert_eq!(parse_due_input("today"), Some(today));
        assert_eq!(parse_due_input("tomorrow"), Some(today + Duration::days(1)));
        assert_eq!(parse_due_input("in 3d"), Some(today + Duration::days(3)));
        assert_eq!(parse_due_input("in 2w"), Some(today + Duration::weeks(2)));
        assert_eq!(
            parse_due_input("2026-03-01"),
            NaiveDate::from_ymd_opt(2026, 3, 1)
        );
        assert_eq!(parse_due_input("next sometime"), None);
    }

    #[test]
    fn lenient_date_accepts_common_spellings() {
        let expected = NaiveDate::from_ymd_opt(2025, 12, 24);
        assert_eq!(parse_date_lenient("2025-12-24"), expected);
        assert_eq!(parse_date_lenient("2025/12/24"), expected);
        assert_eq!(parse_date_lenient("24/12/2025"), expected);
        assert_eq!(parse_date_lenient("2025-12-24 08:30:00"), expected);
        assert_eq!(parse_date_lenient("not-a-date"), None);
        assert_eq!(parse_date_lenient(""), None);
    }

    #[test]
    fn serde_uses_kebab_case_with_aliases() {
        assert_eq!(
            serde_json::to_string(&Priority::Urgent).unwrap(),
            "\"urgent\""
        );
        let p: Priority = serde_json::from_str("\"Urgent\"").unwrap();
        assert_eq!(p, Priority::Urgent);
        let c: Category = serde_json::from_str("\"personal\"").unwrap();
        assert_eq!(c, Category::Personal);
    }
}
