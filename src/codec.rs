//! CSV and JSON interchange for the task list.
//!
//! Export walks the store's full sequence; import parses defensively, falls
//! back to per-field defaults instead of failing rows, and replaces the store
//! wholesale only once the whole payload has been accepted. The file-level
//! entry points dispatch on the extension.

use std::fs;
use std::path::Path;

use chrono::{NaiveDate, TimeZone, Utc};
use serde::Deserialize;

use crate::error::{Result, TrackerError};
use crate::fields::{
    format_category, format_priority, lenient_category, lenient_priority, parse_category_label,
    parse_date_lenient, parse_priority_label,
};
use crate::store::TaskStore;
use crate::task::Task;

/// Column order of the tabular export.
pub const CSV_COLUMNS: [&str; 7] = [
    "ID",
    "Name",
    "Completed",
    "Priority",
    "Category",
    "Due Date",
    "Created Date",
];

/// Values accepted as "completed" in tabular import, lowercased and trimmed.
const AFFIRMATIVE: [&str; 6] = ["yes", "true", "1", "x", "✓", "✅"];

/// Render the full store as CSV, one row per task in sequence order.
pub fn export_csv(store: &TaskStore) -> String {
    let mut out = String::new();
    out.push_str(&CSV_COLUMNS.join(","));
    out.push('\n');

    for task in store.tasks() {
        let due = task.due_date.map(|d| d.to_string()).unwrap_or_default();
        let created = Utc
            .timestamp_opt(task.created_at, 0)
            .single()
            .map(|dt| dt.date_naive().to_string())
            .unwrap_or_default();
        let row = [
            task.id.to_string(),
            escape_csv(&task.name),
            (if task.completed { "Yes" } else { "No" }).to_string(),
            format_priority(task.priority).to_string(),
            format_category(task.category).to_string(),
            due,
            created,
        ];
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

/// Render the full task list as pretty-printed JSON, all fields verbatim.
pub fn export_json(store: &TaskStore) -> Result<String> {
    Ok(serde_json::to_string_pretty(store.tasks())?)
}

/// Parse tabular input into tasks ready for a wholesale replace.
///
/// `counter` is the store's current next-id, used for the id fallback rule.
/// Returns the tasks in input order together with the new counter value (one
/// greater than the maximum imported id).
pub fn import_csv(content: &str, counter: u64) -> Result<(Vec<Task>, u64)> {
    let mut lines = content.lines();
    let header = lines.next().ok_or(TrackerError::NoValidRows)?;
    let columns = parse_csv_line(header);
    let col = |name: &str| columns.iter().position(|c| c.trim() == name);

    let name_col = col("Name").ok_or(TrackerError::MissingColumn("Name"))?;
    let id_col = col("ID");
    let completed_col = col("Completed");
    let priority_col = col("Priority");
    let category_col = col("Category");
    let due_col = col("Due Date");

    let now = Utc::now().timestamp();
    let mut tasks: Vec<Task> = Vec::new();

    for (row_index, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let fields = parse_csv_line(line);

        // Name is required; "-" is the placeholder for a missing value.
        let name = cell(&fields, Some(name_col));
        if name.is_empty() || name == "-" {
            continue;
        }

        let id = match cell(&fields, id_col) {
            "" | "-" => counter + row_index as u64,
            raw => parse_row_id(raw).unwrap_or(counter + row_index as u64),
        };

        let completed = {
            let value = cell(&fields, completed_col).to_lowercase();
            AFFIRMATIVE.contains(&value.as_str())
        };

        let priority = parse_priority_label(cell(&fields, priority_col));
        let category = parse_category_label(cell(&fields, category_col));

        let due_date = match cell(&fields, due_col) {
            "" | "-" => None,
            raw => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .or_else(|| parse_date_lenient(raw)),
        };

        let order = tasks.len() as i64;
        tasks.push(Task {
            id,
            name: name.to_string(),
            completed,
            priority,
            category,
            due_date,
            created_at: now,
            order,
        });
    }

    if tasks.is_empty() {
        return Err(TrackerError::NoValidRows);
    }
    let max_id = tasks.iter().map(|t| t.id).max().unwrap_or(0);
    Ok((tasks, max_id + 1))
}

/// One record of the structured import, decoded leniently.
///
/// Unknown priority/category spellings coerce to the defaults; a missing
/// `order` takes the record's position in the array.
#[derive(Debug, Deserialize)]
struct RawTask {
    #[serde(default)]
    id: Option<u64>,
    name: String,
    #[serde(default)]
    completed: bool,
    #[serde(default)]
    priority: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    due_date: Option<String>,
    #[serde(default)]
    created_at: Option<i64>,
    #[serde(default)]
    order: Option<i64>,
}

/// Parse structured input into tasks ready for a wholesale replace.
///
/// The payload must be a JSON array; any other shape is malformed. Returns
/// the new counter value, or `None` when the (accepted) array was empty and
/// the caller should keep its current counter.
pub fn import_json(content: &str) -> Result<(Vec<Task>, Option<u64>)> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    if !value.is_array() {
        return Err(TrackerError::NotAnArray);
    }
    let raw: Vec<RawTask> = serde_json::from_value(value)?;

    let now = Utc::now().timestamp();
    let tasks: Vec<Task> = raw
        .into_iter()
        .enumerate()
        .map(|(idx, r)| Task {
            id: r.id.unwrap_or(idx as u64),
            name: r.name,
            completed: r.completed,
            priority: r.priority.as_deref().map(lenient_priority).unwrap_or_default(),
            category: r.category.as_deref().map(lenient_category).unwrap_or_default(),
            due_date: r.due_date.as_deref().and_then(parse_date_lenient),
            created_at: r.created_at.unwrap_or(now),
            order: r.order.unwrap_or(idx as i64),
        })
        .collect();

    let next_id = tasks.iter().map(|t| t.id).max().map(|max| max + 1);
    Ok((tasks, next_id))
}

/// Import a file into the store, dispatching on the extension.
///
/// The store is replaced wholesale on success and untouched on any error.
/// Returns the number of imported tasks.
pub fn import_file(store: &mut TaskStore, path: &Path) -> Result<usize> {
    let ext = extension_of(path);
    match ext.as_str() {
        "csv" => {
            let content = fs::read_to_string(path)?;
            let (tasks, next_id) = import_csv(&content, store.next_id())?;
            let count = tasks.len();
            store.replace_all(tasks, next_id);
            Ok(count)
        }
        "json" => {
            let content = fs::read_to_string(path)?;
            let (tasks, next_id) = import_json(&content)?;
            let count = tasks.len();
            let next_id = next_id.unwrap_or_else(|| store.next_id());
            store.replace_all(tasks, next_id);
            Ok(count)
        }
        other => Err(TrackerError::UnsupportedFormat(other.to_string())),
    }
}

/// Export the store to a file, dispatching on the extension.
///
/// Returns the number of exported tasks.
pub fn export_file(store: &TaskStore, path: &Path) -> Result<usize> {
    let ext = extension_of(path);
    let content = match ext.as_str() {
        "csv" => export_csv(store),
        "json" => export_json(store)?,
        other => return Err(TrackerError::UnsupportedFormat(other.to_string())),
    };
    fs::write(path, content)?;
    Ok(store.len())
}

/// Trimmed contents of an optional column in a parsed row.
fn cell<'a>(fields: &'a [String], idx: Option<usize>) -> &'a str {
    idx.and_then(|i| fields.get(i))
        .map(|s| s.trim())
        .unwrap_or("")
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default()
}

/// Coerce a raw id cell to an integer: direct parse first, then through a
/// float so "3.0" style spreadsheet output still counts.
fn parse_row_id(raw: &str) -> Option<u64> {
    if let Ok(id) = raw.parse::<u64>() {
        return Some(id);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite() && *f >= 0.0)
        .map(|f| f as u64)
}

/// Quote a CSV field when it contains separators, quotes or newlines.
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Split one CSV line into fields, honouring quoted fields with doubled
/// quotes. Trailing carriage returns from CRLF files are dropped.
fn parse_csv_line(line: &str) -> Vec<String> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{Category, Priority};
    use tempfile::TempDir;

    fn seeded_store() -> TaskStore {
        let mut store = TaskStore::new();
        store
            .create(
                "Write report",
                Priority::Urgent,
                Category::Work,
                NaiveDate::from_ymd_opt(2026, 9, 1),
            )
            .unwrap();
        store
            .create("Buy milk, eggs", Priority::Normal, Category::Personal, None)
            .unwrap();
        store.toggle_completion(0);
        store
    }

    #[test]
    fn csv_export_has_header_and_rows_in_sequence_order() {
        let store = seeded_store();
        let csv = export_csv(&store);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "ID,Name,Completed,Priority,Category,Due Date,Created Date");
        assert!(lines[1].starts_with("0,Write report,Yes,Urgent,Work,2026-09-01,"));
        // comma in the name forces quoting
        assert!(lines[2].starts_with("1,\"Buy milk, eggs\",No,Normal,Personal,,"));
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn csv_quoting_survives_reimport() {
        let store = seeded_store();
        let csv = export_csv(&store);
        let (tasks, _) = import_csv(&csv, 0).unwrap();
        assert_eq!(tasks[1].name, "Buy milk, eggs");
    }

    #[test]
    fn csv_import_uses_explicit_ids_and_falls_back_per_row() {
        let csv = "ID,Name\n7,first\n,second\nbogus,third\n3.0,fourth\n";
        let (tasks, next_id) = import_csv(csv, 100).unwrap();
        let ids: Vec<u64> = tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![7, 101, 102, 3]);
        assert_eq!(next_id, 103);
    }

    #[test]
    fn csv_import_is_lenient_per_field() {
        let csv = "Name,Priority,Due Date\nBuy milk,,not-a-date\n";
        let (tasks, _) = import_csv(csv, 0).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].name, "Buy milk");
        assert_eq!(tasks[0].priority, Priority::Normal);
        assert_eq!(tasks[0].category, Category::Other);
        assert_eq!(tasks[0].due_date, None);
        assert!(!tasks[0].completed);
    }

    #[test]
    fn csv_import_accepts_affirmative_completion_tokens() {
        let csv = "Name,Completed\na,yes\nb,TRUE\nc,1\nd,x\ne,✓\nf,✅\ng,no\nh,\n";
        let (tasks, _) = import_csv(csv, 0).unwrap();
        let flags: Vec<bool> = tasks.iter().map(|t| t.completed).collect();
        assert_eq!(flags, vec![true, true, true, true, true, true, false, false]);
    }

    #[test]
    fn csv_import_skips_blank_and_placeholder_names() {
        let csv = "ID,Name\n1,kept\n2,\n3,   \n4,-\n5,also kept\n";
        let (tasks, _) = import_csv(csv, 0).unwrap();
        let names: Vec<&str> = tasks.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["kept", "also kept"]);
        // order is dense over the kept rows
        let orders: Vec<i64> = tasks.iter().map(|t| t.order).collect();
        assert_eq!(orders, vec![0, 1]);
    }

    #[test]
    fn csv_import_parses_dates_strictly_then_leniently() {
        let csv = "Name,Due Date\na,2026-05-04\nb,04/05/2026\nc,garbage\n";
        let (tasks, _) = import_csv(csv, 0).unwrap();
        assert_eq!(tasks[0].due_date, NaiveDate::from_ymd_opt(2026, 5, 4));
        assert_eq!(tasks[1].due_date, NaiveDate::from_ymd_opt(2026, 5, 4));
        assert_eq!(tasks[2].due_date, None);
    }

    #[test]
    fn csv_import_requires_name_column() {
        let csv = "ID,Title\n1,whoops\n";
        let err = import_csv(csv, 0);
        assert!(matches!(err, Err(TrackerError::MissingColumn("Name"))));
    }

    #[test]
    fn csv_import_with_no_usable_rows_is_rejected() {
        let csv = "ID,Name\n1,\n2,-\n";
        assert!(matches!(import_csv(csv, 0), Err(TrackerError::NoValidRows)));
        assert!(matches!(import_csv("ID,Name\n", 0), Err(TrackerError::NoValidRows)));
    }

    #[test]
    fn json_round_trip_preserves_everything_but_created_at() {
        let mut store = seeded_store();
        // manual reorder so order does not just mirror the id
        store.move_task(1, crate::store::Direction::Up);
        let json = export_json(&store).unwrap();

        let (tasks, next_id) = import_json(&json).unwrap();
        assert_eq!(next_id, Some(2));
        assert_eq!(tasks.len(), 2);
        for (got, want) in tasks.iter().zip(store.tasks()) {
            assert_eq!(got.id, want.id);
            assert_eq!(got.name, want.name);
            assert_eq!(got.completed, want.completed);
            assert_eq!(got.priority, want.priority);
            assert_eq!(got.category, want.category);
            assert_eq!(got.due_date, want.due_date);
            assert_eq!(got.order, want.order);
        }
    }

    #[test]
    fn json_import_rejects_non_array_payloads() {
        assert!(matches!(
            import_json("{\"tasks\": []}"),
            Err(TrackerError::NotAnArray)
        ));
        assert!(matches!(import_json("42"), Err(TrackerError::NotAnArray)));
        assert!(matches!(import_json("not json"), Err(TrackerError::Json(_))));
    }

    #[test]
    fn json_import_accepts_empty_array() {
        let (tasks, next_id) = import_json("[]").unwrap();
        assert!(tasks.is_empty());
        assert_eq!(next_id, None);
    }

    #[test]
    fn json_import_assigns_missing_order_by_position() {
        let json = r#"[
            {"id": 5, "name": "a"},
            {"id": 2, "name": "b", "order": 9}
        ]"#;
        let (tasks, next_id) = import_json(json).unwrap();
        assert_eq!(tasks[0].order, 0);
        assert_eq!(tasks[1].order, 9);
        assert_eq!(next_id, Some(6));
    }

    #[test]
    fn json_import_coerces_unknown_enum_values() {
        let json = r#"[{"id": 0, "name": "a", "priority": "sky-high", "category": "hobby"}]"#;
        let (tasks, _) = import_json(json).unwrap();
        assert_eq!(tasks[0].priority, Priority::Normal);
        assert_eq!(tasks[0].category, Category::Other);
    }

    #[test]
    fn file_round_trip_through_both_formats() {
        let dir = TempDir::new().unwrap();
        let store = seeded_store();

        for name in ["tasks.csv", "tasks.json"] {
            let path = dir.path().join(name);
            assert_eq!(export_file(&store, &path).unwrap(), 2);

            let mut imported = TaskStore::new();
            assert_eq!(import_file(&mut imported, &path).unwrap(), 2);
            assert_eq!(imported.len(), 2);
            assert_eq!(imported.next_id(), 2);
            assert_eq!(imported.get(0).unwrap().name, "Write report");
        }
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.xlsx");
        let mut store = seeded_store();
        assert!(matches!(
            export_file(&store, &path),
            Err(TrackerError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            import_file(&mut store, &path),
            Err(TrackerError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn failed_import_leaves_store_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{\"not\": \"an array\"}").unwrap();

        let mut store = seeded_store();
        assert!(import_file(&mut store, &path).is_err());
        assert_eq!(store.len(), 2);
        assert_eq!(store.next_id(), 2);
    }
}
