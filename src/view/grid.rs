//! Calendar grid rendering.
//!
//! Draws what the engine computed and nothing more: day-number rows per
//! week, one bar per placed `LayoutItem` at its lane row and column span,
//! and "+N" markers for overflowed days. All placement math lives in
//! `crate::engine`; this module only maps columns and lanes to terminal
//! cells.

use crate::engine::{LayoutItem, WeekRow};
use crate::state::AppState;
use crate::view::styles::CalendarStyles;
use chrono::Datelike;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthChar;

/// Render the full calendar screen: header, week grid, status bar.
pub fn render_calendar(frame: &mut Frame, state: &AppState) {
    let styles = CalendarStyles::new();

    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header bar
            Constraint::Min(0),    // Week grid
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, vertical_chunks[0], state, &styles);
    render_weeks(frame, vertical_chunks[1], state, &styles);
    render_status_bar(frame, vertical_chunks[2], state, &styles);
}

/// Header: period label, granularity, selected item.
fn render_header(frame: &mut Frame, area: Rect, state: &AppState, styles: &CalendarStyles) {
    let period = state.reference_date().format("%B %Y");
    let selected = state
        .selected_item()
        .map(|item| format!(" | {}", item.title()))
        .unwrap_or_default();
    let text = format!(
        "{} | {} view | {} items{}",
        period,
        state.granularity(),
        state.items().len(),
        selected
    );
    frame.render_widget(Paragraph::new(Line::from(text)).style(styles.header), area);
}

/// Status bar with keyboard hints.
fn render_status_bar(frame: &mut Frame, area: Rect, _state: &AppState, styles: &CalendarStyles) {
    let text = "q: quit | \u{2190}/\u{2192}: period | t: today | g: view | Tab: select | </>: move item";
    frame.render_widget(Paragraph::new(Line::from(text)).style(styles.status), area);
}

/// Left x coordinate of `column` (0-7; 7 gives the right edge).
///
/// Columns divide the width evenly with the remainder spread across the
/// leftmost columns, so adjacent weeks always align vertically.
fn column_x(area: Rect, column: u16) -> u16 {
    area.x + (u32::from(area.width) * u32::from(column) / 7) as u16
}

/// Render all week rows, splitting the area height evenly.
///
/// Weeks that do not fit (tiny terminal, semester view) are simply not
/// drawn; the engine output is unaffected.
fn render_weeks(frame: &mut Frame, area: Rect, state: &AppState, styles: &CalendarStyles) {
    let weeks = state.layout().weeks();
    if weeks.is_empty() || area.height == 0 || area.width < 7 {
        return;
    }

    // At least a day-number line and one lane line per week.
    let week_height = (area.height / weeks.len() as u16).max(2);

    for (index, week) in weeks.iter().enumerate() {
        let y = area.y + index as u16 * week_height;
        if y + week_height > area.y + area.height {
            break;
        }
        let week_area = Rect::new(area.x, y, area.width, week_height);
        render_week(frame, week_area, week, state, styles);
    }
}

/// Render one week row: day numbers, lane bars, overflow markers.
fn render_week(
    frame: &mut Frame,
    area: Rect,
    week: &WeekRow,
    state: &AppState,
    styles: &CalendarStyles,
) {
    render_day_numbers(frame, area, week, state, styles);

    // Remaining lines hold lanes; the last one is reserved for "+N"
    // markers when any day of this week overflowed.
    let lane_rows = area.height.saturating_sub(1);
    let overflow_row = if week.has_overflow() && lane_rows > 0 {
        Some(area.y + area.height - 1)
    } else {
        None
    };
    let visible_lanes = if overflow_row.is_some() {
        lane_rows.saturating_sub(1)
    } else {
        lane_rows
    };

    for placed in week.placed() {
        let lane = placed.lane().get() as u16;
        if lane >= visible_lanes {
            continue; // terminal too short for this lane
        }
        render_bar(frame, area, area.y + 1 + lane, placed, state, styles);
    }

    if let Some(y) = overflow_row {
        render_overflow_markers(frame, area, y, week, styles);
    }
}

/// Day-number line: "Jun 1" on month starts, bare day number otherwise.
fn render_day_numbers(
    frame: &mut Frame,
    area: Rect,
    week: &WeekRow,
    state: &AppState,
    styles: &CalendarStyles,
) {
    for (column, cell) in week.days().iter().enumerate() {
        let column = column as u16;
        let x = column_x(area, column);
        let width = column_x(area, column + 1).saturating_sub(x);
        if width == 0 {
            continue;
        }

        let label = if cell.date.day() == 1 {
            cell.date.format("%b %-d").to_string()
        } else {
            cell.date.day().to_string()
        };
        let style = if cell.date == state.today() {
            styles.today
        } else if cell.in_reference_granularity {
            styles.day_header
        } else {
            styles.day_padding
        };

        let cell_area = Rect::new(x, area.y, width, 1);
        frame.render_widget(
            Paragraph::new(Line::from(truncate_to_width(&label, width as usize))).style(style),
            cell_area,
        );
    }
}

/// One item bar spanning its column range at the given row.
fn render_bar(
    frame: &mut Frame,
    week_area: Rect,
    y: u16,
    placed: &LayoutItem,
    state: &AppState,
    styles: &CalendarStyles,
) {
    let x = column_x(week_area, placed.start_column().get() as u16);
    let end_x = column_x(week_area, placed.end_column().get() as u16 + 1);
    let width = end_x.saturating_sub(x);
    if width == 0 {
        return;
    }

    let Some(item) = state.items().get(placed.item_index()) else {
        return; // engine output always references the input slice
    };
    let is_selected = state.selected_index() == Some(placed.item_index());
    let style = styles.bar(item.kind(), is_selected);

    let bar_area = Rect::new(x, y, width, 1);
    frame.render_widget(
        Paragraph::new(Line::from(truncate_to_width(item.title(), width as usize))).style(style),
        bar_area,
    );
}

/// "+N" markers for each overflowed day column.
fn render_overflow_markers(
    frame: &mut Frame,
    week_area: Rect,
    y: u16,
    week: &WeekRow,
    styles: &CalendarStyles,
) {
    for (column, &count) in week.overflow_by_day().iter().enumerate() {
        if count == 0 {
            continue;
        }
        let column = column as u16;
        let x = column_x(week_area, column);
        let width = column_x(week_area, column + 1).saturating_sub(x);
        if width == 0 {
            continue;
        }
        let marker = format!("+{}", count);
        let cell_area = Rect::new(x, y, width, 1);
        frame.render_widget(
            Paragraph::new(Line::from(truncate_to_width(&marker, width as usize)))
                .style(styles.overflow),
            cell_area,
        );
    }
}

/// Truncate a label to a display width, respecting wide characters.
fn truncate_to_width(label: &str, max_width: usize) -> String {
    let mut width = 0;
    let mut out = String::new();
    for ch in label.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width {
            break;
        }
        width += ch_width;
        out.push(ch);
    }
    out
}

// ===== Tests =====

#[cfg(test)]
#[path = "grid_tests.rs"]
mod tests;
