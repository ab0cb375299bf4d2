//! Centralized styles for calendar rendering.

use crate::model::ItemKind;
use ratatui::style::{Color, Modifier, Style};

/// Styles for day headers, item bars, and overflow markers.
///
/// Created once per frame so every pane colors items consistently.
#[derive(Debug, Clone)]
pub struct CalendarStyles {
    /// Day-number header for days inside the reference granularity.
    pub day_header: Style,
    /// Day-number header for padding days outside the granularity.
    pub day_padding: Style,
    /// Day-number header for today.
    pub today: Style,
    /// Bar style for tasks.
    pub task: Style,
    /// Bar style for external events.
    pub external: Style,
    /// Extra emphasis for the selected item's bars.
    pub selected: Style,
    /// "+N" overflow markers.
    pub overflow: Style,
    /// Header bar at the top of the screen.
    pub header: Style,
    /// Status bar at the bottom of the screen.
    pub status: Style,
}

impl CalendarStyles {
    /// Build the default color scheme.
    pub fn new() -> Self {
        Self {
            day_header: Style::default().fg(Color::White),
            day_padding: Style::default().fg(Color::DarkGray),
            today: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            task: Style::default().fg(Color::Black).bg(Color::Cyan),
            external: Style::default().fg(Color::Black).bg(Color::Magenta),
            selected: Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            overflow: Style::default().fg(Color::Red),
            header: Style::default().fg(Color::Cyan),
            status: Style::default().fg(Color::Gray),
        }
    }

    /// Style for an item bar, honoring kind and selection.
    pub fn bar(&self, kind: ItemKind, is_selected: bool) -> Style {
        if is_selected {
            self.selected
        } else {
            match kind {
                ItemKind::Task => self.task,
                ItemKind::External => self.external,
            }
        }
    }
}

impl Default for CalendarStyles {
    fn default() -> Self {
        Self::new()
    }
}
