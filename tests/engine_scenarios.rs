//! End-to-end layout scenarios over the public engine API.

use calgrid::engine::{CalendarLayout, DayColumn, Granularity};
use calgrid::model::{CalendarItem, ItemId, ItemKind};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn item(id: &str, start: NaiveDate, due: NaiveDate) -> CalendarItem {
    CalendarItem::new(
        ItemId::new(id).unwrap(),
        ItemKind::Task,
        id,
        start.and_hms_opt(0, 0, 0).unwrap(),
        due.and_hms_opt(0, 0, 0).unwrap(),
    )
}

#[test]
fn single_item_single_week() {
    // Mon Jun 3 - Wed Jun 5 in the week starting Sunday Jun 2.
    let items = vec![item("a", date(2024, 6, 3), date(2024, 6, 5))];
    let layout = CalendarLayout::compute(date(2024, 6, 5), Granularity::Week, &items, 4);

    assert_eq!(layout.weeks().len(), 1);
    let week = &layout.weeks()[0];
    assert_eq!(week.first_day(), date(2024, 6, 2));

    assert_eq!(week.placed().len(), 1);
    let placed = &week.placed()[0];
    assert_eq!(placed.start_column().get(), 1);
    assert_eq!(placed.end_column().get(), 3);
    assert_eq!(placed.lane().get(), 0);
    assert_eq!(week.overflow_by_day(), &[0; 7]);
}

#[test]
fn exact_lane_overflow() {
    // 5 items on the same day with a budget of 4: lanes 0-3 fill, one
    // item overflows that column.
    let items: Vec<CalendarItem> = (0..5)
        .map(|i| item(&format!("i{}", i), date(2024, 6, 4), date(2024, 6, 4)))
        .collect();
    let layout = CalendarLayout::compute(date(2024, 6, 4), Granularity::Week, &items, 4);

    let week = &layout.weeks()[0];
    assert_eq!(week.placed().len(), 4);

    let mut lanes: Vec<usize> = week.placed().iter().map(|p| p.lane().get()).collect();
    lanes.sort_unstable();
    assert_eq!(lanes, vec![0, 1, 2, 3]);

    // Jun 4 2024 is a Tuesday
    assert_eq!(week.overflow_by_day()[2], 1);
    assert_eq!(week.overflow_by_day().iter().sum::<u32>(), 1);
}

#[test]
fn n_mutually_overlapping_items_overflow_exactly_n_minus_budget() {
    for n in 1..10usize {
        let items: Vec<CalendarItem> = (0..n)
            .map(|i| item(&format!("i{}", i), date(2024, 6, 4), date(2024, 6, 4)))
            .collect();
        let layout = CalendarLayout::compute(date(2024, 6, 4), Granularity::Week, &items, 4);
        let week = &layout.weeks()[0];

        assert_eq!(week.placed().len(), n.min(4));
        assert_eq!(
            week.overflow_by_day()[2] as usize,
            n.saturating_sub(4),
            "n = {}",
            n
        );
    }
}

#[test]
fn cross_week_item_appears_in_three_weeks_clamped() {
    // Jun 1 (Sat) through Jun 15 (Sat) crosses three week rows.
    let items = vec![item("span", date(2024, 6, 1), date(2024, 6, 15))];
    let layout = CalendarLayout::compute(date(2024, 6, 15), Granularity::Month, &items, 4);

    let placements: Vec<(NaiveDate, DayColumn, DayColumn)> = layout
        .weeks()
        .iter()
        .flat_map(|week| {
            week.placed()
                .iter()
                .map(|p| (week.first_day(), p.start_column(), p.end_column()))
                .collect::<Vec<_>>()
        })
        .collect();

    assert_eq!(placements.len(), 3);
    assert_eq!(
        placements[0],
        (date(2024, 5, 26), DayColumn::LAST, DayColumn::LAST)
    );
    assert_eq!(
        placements[1],
        (date(2024, 6, 2), DayColumn::FIRST, DayColumn::LAST)
    );
    assert_eq!(
        placements[2],
        (date(2024, 6, 9), DayColumn::FIRST, DayColumn::LAST)
    );
}

#[test]
fn items_straddling_the_view_edge_are_included() {
    // Month view of June; item runs from late May into early June.
    let items = vec![item("edge", date(2024, 5, 20), date(2024, 5, 28))];
    let layout = CalendarLayout::compute(date(2024, 6, 15), Granularity::Month, &items, 4);

    // May 28 falls in the leading padding week (May 26 - Jun 1).
    let first_week = &layout.weeks()[0];
    assert_eq!(first_week.placed().len(), 1);
    assert_eq!(first_week.placed()[0].start_column(), DayColumn::FIRST);
    assert_eq!(first_week.placed()[0].end_column().get(), 2);
}

#[test]
fn dense_month_keeps_every_week_collision_free() {
    // A tangle of overlapping spans across the whole month.
    let items: Vec<CalendarItem> = (0..25)
        .map(|i| {
            let start = date(2024, 6, 1 + (i % 20) as u32);
            let due = date(2024, 6, (3 + i % 25) as u32);
            item(&format!("i{}", i), start, due)
        })
        .collect();
    let layout = CalendarLayout::compute(date(2024, 6, 15), Granularity::Month, &items, 4);

    for week in layout.weeks() {
        for (i, a) in week.placed().iter().enumerate() {
            for b in &week.placed()[i + 1..] {
                if a.lane() == b.lane() {
                    let disjoint =
                        a.end_column() < b.start_column() || a.start_column() > b.end_column();
                    assert!(
                        disjoint,
                        "collision in week starting {}",
                        week.first_day()
                    );
                }
            }
        }
    }
}

#[test]
fn quarter_view_packs_items_from_all_three_months() {
    let items = vec![
        item("apr", date(2024, 4, 10), date(2024, 4, 12)),
        item("may", date(2024, 5, 10), date(2024, 5, 12)),
        item("jun", date(2024, 6, 10), date(2024, 6, 12)),
    ];
    let layout = CalendarLayout::compute(date(2024, 5, 1), Granularity::Quarter, &items, 4);

    let total_placed: usize = layout.weeks().iter().map(|w| w.placed().len()).sum();
    assert_eq!(total_placed, 3);
}

#[test]
fn inverted_span_lays_out_as_single_day() {
    // Constructor clamps due < start to a zero-width span.
    let items = vec![item("inv", date(2024, 6, 7), date(2024, 6, 3))];
    let layout = CalendarLayout::compute(date(2024, 6, 5), Granularity::Week, &items, 4);

    let week = &layout.weeks()[0];
    assert_eq!(week.placed().len(), 1);
    let placed = &week.placed()[0];
    assert_eq!(placed.start_column(), placed.end_column());
    // Clamped to the start date, Friday Jun 7.
    assert_eq!(placed.start_column().get(), 5);
}
