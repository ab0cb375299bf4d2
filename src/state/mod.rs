//! Application state and mutation handlers.
//!
//! `AppState` owns the inputs to the layout engine (reference date,
//! granularity, item set, lane budget) plus UI-only state (selection).
//! Every mutation ends in [`AppState::relayout`]: the layout is a cached
//! pure function of the inputs, never patched incrementally.

use crate::engine::{CalendarLayout, Granularity};
use crate::model::CalendarItem;
use chrono::{Datelike, Duration, Months, NaiveDate};
use tracing::debug;

/// Mutable application state driving the view.
pub struct AppState {
    reference_date: NaiveDate,
    granularity: Granularity,
    items: Vec<CalendarItem>,
    max_lanes: usize,
    /// Index into `items` of the selected item, if any.
    selected: Option<usize>,
    layout: CalendarLayout,
    /// Today, fixed at startup; drives the `t` key and day highlighting.
    today: NaiveDate,
}

impl AppState {
    /// Create state and compute the initial layout.
    pub fn new(
        reference_date: NaiveDate,
        granularity: Granularity,
        items: Vec<CalendarItem>,
        max_lanes: usize,
    ) -> Self {
        let layout = CalendarLayout::compute(reference_date, granularity, &items, max_lanes);
        let selected = if items.is_empty() { None } else { Some(0) };
        Self {
            reference_date,
            granularity,
            items,
            max_lanes,
            selected,
            layout,
            today: reference_date,
        }
    }

    /// Record the real current date (for `t` / today highlighting).
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// The date the view is centered on.
    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    /// Current view granularity.
    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// The full working set of items, in file order.
    pub fn items(&self) -> &[CalendarItem] {
        &self.items
    }

    /// Lane budget per week row.
    pub fn max_lanes(&self) -> usize {
        self.max_lanes
    }

    /// The cached layout for the current inputs.
    pub fn layout(&self) -> &CalendarLayout {
        &self.layout
    }

    /// The date highlighted as today.
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// The selected item, if any.
    pub fn selected_item(&self) -> Option<&CalendarItem> {
        self.selected.and_then(|i| self.items.get(i))
    }

    /// Index of the selected item in the item slice.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Recompute the layout from current inputs.
    fn relayout(&mut self) {
        self.layout = CalendarLayout::compute(
            self.reference_date,
            self.granularity,
            &self.items,
            self.max_lanes,
        );
    }

    /// Step the reference date forward or backward by one view period.
    ///
    /// Week view steps 7 days; month-based views step by their month span.
    /// Month stepping snaps to the first of the month so repeated steps
    /// from e.g. Jan 31 never drift.
    fn step_period(&mut self, forward: bool) {
        self.reference_date = match self.granularity.months_spanned() {
            None => {
                let delta = Duration::days(7);
                if forward {
                    self.reference_date + delta
                } else {
                    self.reference_date - delta
                }
            }
            Some(months) => {
                let first = self
                    .reference_date
                    .with_day(1)
                    .unwrap_or(self.reference_date);
                if forward {
                    first + Months::new(months)
                } else {
                    first - Months::new(months)
                }
            }
        };
        debug!(reference = %self.reference_date, "Period changed");
        self.relayout();
    }

    /// Move to the next period.
    pub fn next_period(&mut self) {
        self.step_period(true);
    }

    /// Move to the previous period.
    pub fn prev_period(&mut self) {
        self.step_period(false);
    }

    /// Jump the view back to today.
    pub fn goto_today(&mut self) {
        self.reference_date = self.today;
        self.relayout();
    }

    /// Switch to a specific granularity.
    pub fn set_granularity(&mut self, granularity: Granularity) {
        if self.granularity != granularity {
            self.granularity = granularity;
            debug!(granularity = %granularity, "Granularity changed");
            self.relayout();
        }
    }

    /// Cycle week -> month -> quarter -> semester -> week.
    pub fn cycle_granularity(&mut self) {
        self.set_granularity(self.granularity.cycled());
    }

    /// Select the next item (wraps around).
    pub fn select_next(&mut self) {
        if self.items.is_empty() {
            self.selected = None;
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) => (i + 1) % self.items.len(),
            None => 0,
        });
    }

    /// Select the previous item (wraps around).
    pub fn select_prev(&mut self) {
        if self.items.is_empty() {
            self.selected = None;
            return;
        }
        self.selected = Some(match self.selected {
            Some(0) | None => self.items.len() - 1,
            Some(i) => i - 1,
        });
    }

    /// Reschedule the selected item to a new due day, preserving duration,
    /// then recompute the layout. This is the "item was moved to date X"
    /// entry point; pointer mechanics live with the caller.
    pub fn reschedule_selected(&mut self, drop_date: NaiveDate) {
        let Some(index) = self.selected else {
            return;
        };
        if let Some(item) = self.items.get(index) {
            let moved = item.rescheduled_to(drop_date);
            debug!(
                id = %moved.id(),
                start = %moved.start_day(),
                due = %moved.due_day(),
                "Item rescheduled"
            );
            self.items[index] = moved;
            self.relayout();
        }
    }

    /// Shift the selected item's due day by `days`, preserving duration.
    pub fn shift_selected(&mut self, days: i64) {
        if let Some(item) = self.selected_item() {
            let target = item.due_day() + Duration::days(days);
            self.reschedule_selected(target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ItemId, ItemKind};

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

    fn state_with(items: Vec<CalendarItem>) -> AppState {
        AppState::new(date(2024, 6, 15), Granularity::Month, items, 4)
    }

    #[test]
    fn new_computes_initial_layout() {
        let state = state_with(vec![item("a", date(2024, 6, 3), date(2024, 6, 5))]);
        let placed: usize = state.layout().weeks().iter().map(|w| w.placed().len()).sum();
        assert_eq!(placed, 1);
    }

    #[test]
    fn first_item_selected_on_startup() {
        let state = state_with(vec![item("a", date(2024, 6, 3), date(2024, 6, 5))]);
        assert_eq!(state.selected_index(), Some(0));
    }

    #[test]
    fn empty_items_mean_no_selection() {
        let state = state_with(vec![]);
        assert_eq!(state.selected_index(), None);
    }

    #[test]
    fn next_period_month_steps_one_month() {
        let mut state = state_with(vec![]);
        state.next_period();
        assert_eq!(state.reference_date(), date(2024, 7, 1));
    }

    #[test]
    fn prev_period_month_steps_back() {
        let mut state = state_with(vec![]);
        state.prev_period();
        assert_eq!(state.reference_date(), date(2024, 5, 1));
    }

    #[test]
    fn month_stepping_does_not_drift_from_month_end() {
        let mut state = AppState::new(date(2024, 1, 31), Granularity::Month, vec![], 4);
        state.next_period();
        assert_eq!(state.reference_date(), date(2024, 2, 1));
        state.next_period();
        assert_eq!(state.reference_date(), date(2024, 3, 1));
    }

    #[test]
    fn week_stepping_moves_seven_days() {
        let mut state = AppState::new(date(2024, 6, 5), Granularity::Week, vec![], 4);
        state.next_period();
        assert_eq!(state.reference_date(), date(2024, 6, 12));
        state.prev_period();
        state.prev_period();
        assert_eq!(state.reference_date(), date(2024, 5, 29));
    }

    #[test]
    fn quarter_stepping_moves_three_months() {
        let mut state = AppState::new(date(2024, 5, 20), Granularity::Quarter, vec![], 4);
        state.next_period();
        assert_eq!(state.reference_date(), date(2024, 8, 1));
    }

    #[test]
    fn goto_today_restores_reference() {
        let mut state = state_with(vec![]).with_today(date(2024, 6, 15));
        state.next_period();
        state.next_period();
        state.goto_today();
        assert_eq!(state.reference_date(), date(2024, 6, 15));
    }

    #[test]
    fn cycle_granularity_wraps() {
        let mut state = state_with(vec![]);
        assert_eq!(state.granularity(), Granularity::Month);
        state.cycle_granularity();
        assert_eq!(state.granularity(), Granularity::Quarter);
        state.cycle_granularity();
        state.cycle_granularity();
        assert_eq!(state.granularity(), Granularity::Week);
    }

    #[test]
    fn selection_cycles_forward_and_backward() {
        let mut state = state_with(vec![
            item("a", date(2024, 6, 3), date(2024, 6, 3)),
            item("b", date(2024, 6, 4), date(2024, 6, 4)),
        ]);
        assert_eq!(state.selected_index(), Some(0));
        state.select_next();
        assert_eq!(state.selected_index(), Some(1));
        state.select_next();
        assert_eq!(state.selected_index(), Some(0));
        state.select_prev();
        assert_eq!(state.selected_index(), Some(1));
    }

    #[test]
    fn reschedule_selected_moves_item_and_relayouts() {
        let mut state = state_with(vec![item("a", date(2024, 6, 3), date(2024, 6, 5))]);
        state.reschedule_selected(date(2024, 6, 12));

        let moved = &state.items()[0];
        assert_eq!(moved.due_day(), date(2024, 6, 12));
        assert_eq!(moved.start_day(), date(2024, 6, 10));

        // Layout follows the item to its new week.
        let week = state
            .layout()
            .weeks()
            .iter()
            .find(|w| !w.placed().is_empty())
            .unwrap();
        assert_eq!(week.first_day(), date(2024, 6, 9));
    }

    #[test]
    fn shift_selected_moves_by_days() {
        let mut state = state_with(vec![item("a", date(2024, 6, 3), date(2024, 6, 5))]);
        state.shift_selected(1);
        assert_eq!(state.items()[0].due_day(), date(2024, 6, 6));
        assert_eq!(state.items()[0].start_day(), date(2024, 6, 4));
        state.shift_selected(-2);
        assert_eq!(state.items()[0].due_day(), date(2024, 6, 4));
    }

    #[test]
    fn reschedule_with_no_selection_is_a_no_op() {
        let mut state = state_with(vec![]);
        state.reschedule_selected(date(2024, 6, 12));
        assert!(state.items().is_empty());
    }
}
