//! First-fit lane packing (greedy interval coloring with a fixed palette).
//!
//! Each week row has `max_lanes` horizontal lanes. Items are assigned in
//! `(start day asc, due day desc)` order to the lowest-indexed lane whose occupied
//! column ranges they do not overlap; items that fit nowhere increment a
//! per-day overflow count instead of being dropped. Deterministic,
//! O(items x max_lanes) per week, no backtracking. This does not minimize
//! the number of lanes used; it guarantees collision-free placement within
//! the lane budget and stable results across recomputes.

use crate::model::CalendarItem;
use chrono::NaiveDate;
use thiserror::Error;

/// Error returned when constructing a [`DayColumn`] outside 0-6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Day column must be in 0..=6 (got {0})")]
pub struct InvalidDayColumn(pub u8);

/// Day-of-week column within a week row. 0 is Sunday, 6 is Saturday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayColumn(u8);

impl DayColumn {
    /// Sunday.
    pub const FIRST: Self = Self(0);
    /// Saturday.
    pub const LAST: Self = Self(6);

    /// Smart constructor validating the 0..=6 range.
    pub fn new(column: u8) -> Result<Self, InvalidDayColumn> {
        if column > 6 {
            Err(InvalidDayColumn(column))
        } else {
            Ok(Self(column))
        }
    }

    /// Get the raw column value.
    pub fn get(&self) -> u8 {
        self.0
    }

    /// Day offset from the week start, clamped into the week.
    fn from_clamped_offset(days: i64) -> Self {
        Self(days.clamp(0, 6) as u8)
    }
}

/// Validated lane index, always below the lane budget it was created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LaneIndex(usize);

impl LaneIndex {
    /// Create a validated lane index.
    ///
    /// Returns `None` if `index >= max_lanes`.
    pub fn new(index: usize, max_lanes: usize) -> Option<Self> {
        if index < max_lanes {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Get the raw index value.
    pub fn get(&self) -> usize {
        self.0
    }
}

/// One item placed within a week row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutItem {
    item_index: usize,
    start_column: DayColumn,
    end_column: DayColumn,
    lane: LaneIndex,
}

impl LayoutItem {
    /// Index of the item in the engine's input slice.
    pub fn item_index(&self) -> usize {
        self.item_index
    }

    /// First column the bar covers (clamped to this week).
    pub fn start_column(&self) -> DayColumn {
        self.start_column
    }

    /// Last column the bar covers, inclusive (clamped to this week).
    pub fn end_column(&self) -> DayColumn {
        self.end_column
    }

    /// Assigned lane (vertical slot within the week row).
    pub fn lane(&self) -> LaneIndex {
        self.lane
    }

    /// Number of columns the bar covers (1-7).
    pub fn width(&self) -> u8 {
        self.end_column.get() - self.start_column.get() + 1
    }
}

/// Result of packing one week's items.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WeekLayout {
    /// Collision-free lane assignments.
    pub placed: Vec<LayoutItem>,
    /// Overflowed-item count per day column.
    pub overflow_by_day: [u32; 7],
}

/// Select the items whose day span intersects `[week_first, week_last]`,
/// keeping their indices in the input slice as back-references.
///
/// The overlap test is inclusive: an item touching any day of the week is
/// included even if most of its span lies outside.
pub fn overlapping_items<'a>(
    items: &'a [CalendarItem],
    week_first: NaiveDate,
    week_last: NaiveDate,
) -> Vec<(usize, &'a CalendarItem)> {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.overlaps_days(week_first, week_last))
        .collect()
}

/// First-fit pack one week's items into at most `max_lanes` lanes.
///
/// Items are sorted by start day ascending, then due day descending, so
/// that wide items claim lanes before narrow ones starting the same day.
/// Ordering works at day granularity; time-of-day components never affect
/// it. The sort is stable; pairs with equal day spans keep their input
/// order. This ordering is what keeps packing visually stable across
/// recomputes and must not change.
///
/// Callers are expected to pass only items overlapping the week (see
/// [`overlapping_items`]); columns are clamped to 0-6 regardless.
pub fn pack_lanes(
    week_first: NaiveDate,
    week_items: &[(usize, &CalendarItem)],
    max_lanes: usize,
) -> WeekLayout {
    let mut ordered: Vec<(usize, &CalendarItem)> = week_items.to_vec();
    ordered.sort_by(|(_, a), (_, b)| {
        a.start_day()
            .cmp(&b.start_day())
            .then(b.due_day().cmp(&a.due_day()))
    });

    // Occupied column ranges per lane
    let mut lanes: Vec<Vec<(u8, u8)>> = vec![Vec::new(); max_lanes];
    let mut placed = Vec::with_capacity(ordered.len());
    let mut overflow_by_day = [0u32; 7];

    for (item_index, item) in ordered {
        let start_column =
            DayColumn::from_clamped_offset((item.start_day() - week_first).num_days());
        let end_column = DayColumn::from_clamped_offset((item.due_day() - week_first).num_days());
        let (s, e) = (start_column.get(), end_column.get());

        let mut assigned = None;
        for (index, lane) in lanes.iter_mut().enumerate() {
            let fits = lane.iter().all(|&(ls, le)| e < ls || s > le);
            if fits {
                lane.push((s, e));
                assigned = LaneIndex::new(index, max_lanes);
                break;
            }
        }

        match assigned {
            Some(lane) => placed.push(LayoutItem {
                item_index,
                start_column,
                end_column,
                lane,
            }),
            None => {
                for column in s..=e {
                    overflow_by_day[column as usize] += 1;
                }
            }
        }
    }

    WeekLayout {
        placed,
        overflow_by_day,
    }
}
