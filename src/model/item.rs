//! Calendar items: the engine's sole input shape.
//!
//! Upstream data sources (task lists, external calendar feeds) are
//! normalized into [`CalendarItem`] before they ever reach the layout
//! engine. The `kind` tag affects rendering color only, never layout.

use super::identifiers::ItemId;
use chrono::{NaiveDate, NaiveDateTime};

/// Discriminates tasks from external calendar events.
///
/// Layout treats both identically; the view uses the tag to pick bar colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// A task owned by the user.
    Task,
    /// An event imported from an external calendar.
    External,
}

/// A date-ranged item as consumed by the layout engine.
///
/// # Invariants
/// - `due >= start`, enforced by the constructor: a due date earlier than
///   the start date is clamped to a zero-width span (`due = start`). Every
///   construction path (parsing, rescheduling) goes through [`Self::new`],
///   so the engine never sees a negative span.
///
/// Layout operates at day granularity; the time-of-day components only
/// matter for duration-preserving rescheduling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarItem {
    id: ItemId,
    kind: ItemKind,
    title: String,
    start: NaiveDateTime,
    due: NaiveDateTime,
}

impl CalendarItem {
    /// Create an item, clamping `due < start` to a zero-width span.
    pub fn new(
        id: ItemId,
        kind: ItemKind,
        title: impl Into<String>,
        start: NaiveDateTime,
        due: NaiveDateTime,
    ) -> Self {
        let due = due.max(start);
        Self {
            id,
            kind,
            title: title.into(),
            start,
            due,
        }
    }

    /// Create a single-day item (start defaults to due).
    pub fn from_due_only(
        id: ItemId,
        kind: ItemKind,
        title: impl Into<String>,
        due: NaiveDateTime,
    ) -> Self {
        Self::new(id, kind, title, due, due)
    }

    /// Stable identifier of the item.
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    /// Task or external event.
    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    /// Display title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Start of the item's span.
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// End of the item's span (inclusive), never before `start`.
    pub fn due(&self) -> NaiveDateTime {
        self.due
    }

    /// First calendar day the item occupies.
    pub fn start_day(&self) -> NaiveDate {
        self.start.date()
    }

    /// Last calendar day the item occupies (inclusive).
    pub fn due_day(&self) -> NaiveDate {
        self.due.date()
    }

    /// Whether the item's day span intersects `[first, last]` (inclusive).
    pub fn overlaps_days(&self, first: NaiveDate, last: NaiveDate) -> bool {
        self.due_day() >= first && self.start_day() <= last
    }

    /// Reschedule to a new target day, preserving duration.
    ///
    /// The new due date is `drop_date` with the original due time-of-day;
    /// the new start is re-derived from the preserved `due - start` delta.
    /// Dropping a 2-day item (Mar 1 - Mar 3) on Mar 10 yields Mar 8 - Mar 10.
    pub fn rescheduled_to(&self, drop_date: NaiveDate) -> Self {
        let duration = self.due - self.start;
        let new_due = drop_date.and_time(self.due.time());
        let new_start = new_due - duration;
        Self::new(
            self.id.clone(),
            self.kind,
            self.title.clone(),
            new_start,
            new_due,
        )
    }
}
