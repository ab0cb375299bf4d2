//! JSON item-list parsing with non-fatal per-record errors.
//!
//! The item file is a JSON array of records:
//!
//! ```json
//! [
//!   {"id": "t-1", "kind": "task", "title": "Write report",
//!    "start": "2024-06-03", "due": "2024-06-05"},
//!   {"id": "ev-7", "kind": "external", "title": "Conference",
//!    "due": "2024-06-10T09:30:00"}
//! ]
//! ```
//!
//! `start` defaults to `due` when absent. Dates accept `YYYY-MM-DD` or
//! `YYYY-MM-DDTHH:MM:SS`. A record that fails validation is skipped and
//! reported as a [`MalformedItem`]; only an unreadable file or a document
//! that is not a JSON array is fatal.

use crate::model::{CalendarItem, DataError, ItemId, ItemKind};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::path::Path;
use tracing::warn;

/// Raw record shape as it appears in the file, before validation.
#[derive(Debug, Clone, Deserialize)]
struct RawItem {
    id: String,
    #[serde(default = "default_kind")]
    kind: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    start: Option<String>,
    due: Option<String>,
}

fn default_kind() -> String {
    "task".to_string()
}

/// A record that failed validation and was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedItem {
    /// Zero-based position of the record in the input array.
    pub index: usize,
    /// Human-readable reason the record was rejected.
    pub reason: String,
}

/// Result of parsing an item file: the good records plus the skipped ones.
#[derive(Debug, Clone, Default)]
pub struct ParsedItems {
    /// Validated items, in file order.
    pub items: Vec<CalendarItem>,
    /// Records that were skipped, with reasons.
    pub malformed: Vec<MalformedItem>,
}

/// Parse a date string as either a bare date (midnight) or a datetime.
fn parse_date(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = s.parse::<NaiveDateTime>() {
        return Some(dt);
    }
    s.parse::<NaiveDate>()
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Validate one raw record into a [`CalendarItem`].
fn validate(raw: RawItem) -> Result<CalendarItem, String> {
    let id = ItemId::new(raw.id).map_err(|e| e.to_string())?;

    let kind = match raw.kind.as_str() {
        "task" => ItemKind::Task,
        "external" => ItemKind::External,
        other => return Err(format!("unknown kind {:?}", other)),
    };

    let due_str = raw.due.ok_or_else(|| "missing due date".to_string())?;
    let due = parse_date(&due_str).ok_or_else(|| format!("unparsable due date {:?}", due_str))?;

    let start = match raw.start {
        Some(ref s) => {
            parse_date(s).ok_or_else(|| format!("unparsable start date {:?}", s))?
        }
        None => due,
    };

    let title = raw.title.unwrap_or_else(|| id.as_str().to_string());

    // due < start is clamped to a zero-width span by the constructor
    Ok(CalendarItem::new(id, kind, title, start, due))
}

/// Parse an item document. Per-record failures are collected, not fatal.
pub fn parse_items(document: &str, path: &Path) -> Result<ParsedItems, DataError> {
    let raw: Vec<serde_json::Value> =
        serde_json::from_str(document).map_err(|e| DataError::NotAnArray {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    let mut parsed = ParsedItems::default();
    for (index, value) in raw.into_iter().enumerate() {
        let record = serde_json::from_value::<RawItem>(value)
            .map_err(|e| e.to_string())
            .and_then(validate);
        match record {
            Ok(item) => parsed.items.push(item),
            Err(reason) => parsed.malformed.push(MalformedItem { index, reason }),
        }
    }
    Ok(parsed)
}

/// Read and parse the item file at `path`.
///
/// Malformed records are logged at `warn` and returned for the status bar;
/// the viewer stays usable with the remaining data.
pub fn load_items(path: &Path) -> Result<ParsedItems, DataError> {
    if !path.exists() {
        return Err(DataError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let document = std::fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed = parse_items(&document, path)?;
    for malformed in &parsed.malformed {
        warn!(
            "Skipping malformed item at index {}: {}",
            malformed.index, malformed.reason
        );
    }
    Ok(parsed)
}
