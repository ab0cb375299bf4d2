//! Calendar layout engine.
//!
//! Pure, synchronous interval-to-lane layout: given a reference date, a view
//! granularity, and a set of date-ranged items, produce week rows of day
//! cells with a collision-free lane assignment for every item overlapping
//! each week, plus per-day overflow counts when the lane budget runs out.
//!
//! [`CalendarLayout::compute`] is THE canonical entry point. The view layer
//! never does its own placement math; it only positions what the engine
//! hands back. There is no incremental path: every change to the reference
//! date, granularity, or item set recomputes the whole layout from scratch.

pub mod grid;
pub mod lanes;

pub use grid::{generate_days, week_start, DayCell, Granularity, InvalidGranularity};
pub use lanes::{
    pack_lanes, DayColumn, InvalidDayColumn, LaneIndex, LayoutItem, WeekLayout,
};

use crate::model::CalendarItem;
use chrono::{Duration, NaiveDate};

/// One rendered week: exactly 7 day cells (Sunday-first) plus the lane
/// layout of every item overlapping the week.
///
/// An item spanning multiple weeks appears independently in each week it
/// overlaps, with its columns clamped to that week's 0-6 range; the visual
/// bar is drawn per week row, not as one continuous cross-week bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekRow {
    days: Vec<DayCell>,
    layout: WeekLayout,
}

impl WeekRow {
    /// The 7 day cells of this week, Sunday first.
    pub fn days(&self) -> &[DayCell] {
        &self.days
    }

    /// First day (Sunday) of the week.
    pub fn first_day(&self) -> NaiveDate {
        self.days[0].date
    }

    /// Last day (Saturday) of the week.
    pub fn last_day(&self) -> NaiveDate {
        self.days[6].date
    }

    /// Items placed in lanes for this week, in assignment order.
    pub fn placed(&self) -> &[LayoutItem] {
        &self.layout.placed
    }

    /// Per-day count of items that did not fit in any lane.
    pub fn overflow_by_day(&self) -> &[u32; 7] {
        &self.layout.overflow_by_day
    }

    /// Whether any day of this week overflowed.
    pub fn has_overflow(&self) -> bool {
        self.layout.overflow_by_day.iter().any(|&n| n > 0)
    }
}

/// Complete layout for one view: all week rows of the visible range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarLayout {
    weeks: Vec<WeekRow>,
}

impl CalendarLayout {
    /// Compute the full layout from scratch.
    ///
    /// Pure function of its inputs: generates the day grid for the
    /// granularity, buckets it into weeks, selects the items overlapping
    /// each week, and first-fit packs them into at most `max_lanes` lanes.
    pub fn compute(
        reference: NaiveDate,
        granularity: Granularity,
        items: &[CalendarItem],
        max_lanes: usize,
    ) -> Self {
        let cells = generate_days(reference, granularity);

        // generate_days guarantees length % 7 == 0
        let weeks = cells
            .chunks_exact(7)
            .map(|chunk| {
                let week_first = chunk[0].date;
                let week_last = week_first + Duration::days(6);
                let week_items = lanes::overlapping_items(items, week_first, week_last);
                let layout = pack_lanes(week_first, &week_items, max_lanes);
                WeekRow {
                    days: chunk.to_vec(),
                    layout,
                }
            })
            .collect();

        Self { weeks }
    }

    /// The week rows, top to bottom.
    pub fn weeks(&self) -> &[WeekRow] {
        &self.weeks
    }
}
