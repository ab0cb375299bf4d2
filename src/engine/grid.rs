//! Day-cell generation and week bucketing.
//!
//! All views are built from whole Sunday-first weeks: [`generate_days`]
//! always returns a multiple of 7 cells, so the caller can chunk the result
//! into week rows without remainder handling.

use chrono::{Datelike, Duration, Months, NaiveDate};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// View zoom level controlling how many days surround the reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Granularity {
    /// A single week.
    Week,
    /// One calendar month on a fixed 6x7 grid.
    #[default]
    Month,
    /// Three months aligned to quarter boundaries (Jan/Apr/Jul/Oct).
    Quarter,
    /// Six months aligned to semester boundaries (Jan/Jul).
    Semester,
}

/// Error returned when parsing an unknown granularity name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown granularity {0:?} (expected week, month, quarter, or semester)")]
pub struct InvalidGranularity(pub String);

impl Granularity {
    /// Canonical lowercase name, as accepted by config and CLI.
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Week => "week",
            Granularity::Month => "month",
            Granularity::Quarter => "quarter",
            Granularity::Semester => "semester",
        }
    }

    /// Number of calendar months the view spans, or `None` for week view.
    pub fn months_spanned(&self) -> Option<u32> {
        match self {
            Granularity::Week => None,
            Granularity::Month => Some(1),
            Granularity::Quarter => Some(3),
            Granularity::Semester => Some(6),
        }
    }

    /// Next granularity in the zoom cycle (week -> month -> quarter ->
    /// semester -> week).
    pub fn cycled(&self) -> Self {
        match self {
            Granularity::Week => Granularity::Month,
            Granularity::Month => Granularity::Quarter,
            Granularity::Quarter => Granularity::Semester,
            Granularity::Semester => Granularity::Week,
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = InvalidGranularity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "week" => Ok(Granularity::Week),
            "month" => Ok(Granularity::Month),
            "quarter" => Ok(Granularity::Quarter),
            "semester" => Ok(Granularity::Semester),
            other => Err(InvalidGranularity(other.to_string())),
        }
    }
}

/// One cell of the calendar grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    /// The calendar date of this cell.
    pub date: NaiveDate,
    /// Whether the date lies inside the reference granularity (e.g. the
    /// current month for month view). Padding days are rendered dimmed.
    pub in_reference_granularity: bool,
}

/// The Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

/// The Saturday on or after `date`.
fn week_end(date: NaiveDate) -> NaiveDate {
    week_start(date) + Duration::days(6)
}

/// First day of the month containing `date`.
fn first_of_month(date: NaiveDate) -> NaiveDate {
    // Day 1 exists in every month
    date.with_day(1).unwrap_or(date)
}

/// Generate the day cells for the view around `reference`.
///
/// Total over any valid date. The result length is always a multiple of 7:
/// - week: exactly 7 cells from the Sunday on/before the reference;
/// - month: exactly 42 cells (fixed 6x7 grid), padded with neighbor-month
///   days marked `in_reference_granularity = false`;
/// - quarter/semester: 3 or 6 months from the month-aligned boundary,
///   padded at both ends to whole Sunday-Saturday weeks.
pub fn generate_days(reference: NaiveDate, granularity: Granularity) -> Vec<DayCell> {
    match granularity {
        Granularity::Week => {
            let start = week_start(reference);
            (0..7)
                .map(|i| DayCell {
                    date: start + Duration::days(i),
                    in_reference_granularity: true,
                })
                .collect()
        }
        Granularity::Month => {
            let grid_start = week_start(first_of_month(reference));
            (0..42)
                .map(|i| {
                    let date = grid_start + Duration::days(i);
                    DayCell {
                        date,
                        in_reference_granularity: date.year() == reference.year()
                            && date.month() == reference.month(),
                    }
                })
                .collect()
        }
        Granularity::Quarter | Granularity::Semester => {
            // months_spanned is Some for everything but week view
            let span = granularity.months_spanned().unwrap_or(1);
            let aligned_month0 = (reference.month0() / span) * span;
            let period_first = NaiveDate::from_ymd_opt(reference.year(), aligned_month0 + 1, 1)
                .unwrap_or_else(|| first_of_month(reference));
            let period_last = period_first + Months::new(span) - Duration::days(1);

            let grid_start = week_start(period_first);
            let grid_end = week_end(period_last);
            let total = (grid_end - grid_start).num_days() + 1;
            (0..total)
                .map(|i| {
                    let date = grid_start + Duration::days(i);
                    DayCell {
                        date,
                        in_reference_granularity: date >= period_first && date <= period_last,
                    }
                })
                .collect()
        }
    }
}
