//! Scrolling table over any [`Sheet`]

use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use crate::sheet::Sheet;

/// Cursor and scroll position within a sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableState {
    pub selected_index: usize,
    pub scroll_offset: usize,
}

impl TableState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_next(&mut self, max_items: usize) {
        if max_items > 0 {
            self.selected_index = (self.selected_index + 1).min(max_items - 1);
        }
    }

    pub fn select_previous(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn page_down(&mut self, max_items: usize, page_size: usize) {
        if max_items > 0 {
            self.selected_index = (self.selected_index + page_size.max(1)).min(max_items - 1);
        }
    }

    pub fn page_up(&mut self, page_size: usize) {
        self.selected_index = self.selected_index.saturating_sub(page_size.max(1));
    }

    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    pub fn select_last(&mut self, max_items: usize) {
        self.selected_index = max_items.saturating_sub(1);
    }

    /// Keep the selection inside the visible window.
    pub fn update_scroll(&mut self, visible_items: usize) {
        if visible_items == 0 {
            return;
        }
        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        } else if self.selected_index >= self.scroll_offset + visible_items {
            self.scroll_offset = self.selected_index - visible_items + 1;
        }
    }
}

/// Draw the rows of `sheet` that fit in `area`.
///
/// Only the visible window is turned into widgets, so a glyphs sheet with
/// tens of thousands of rows costs the same as a short one.
pub fn draw(f: &mut Frame, sheet: &dyn Sheet, state: &mut TableState, area: Rect) {
    // Borders and the header row.
    let visible_height = area.height.saturating_sub(3) as usize;
    state.update_scroll(visible_height);

    let columns = sheet.column_names();
    let window: Vec<_> = (state.scroll_offset..sheet.row_count())
        .take(visible_height)
        .map(|row| sheet.row_cells(row))
        .collect();

    let widths: Vec<Constraint> = columns
        .iter()
        .enumerate()
        .map(|(col, name)| {
            let widest = window
                .iter()
                .map(|cells| cells[col].to_string().chars().count())
                .max()
                .unwrap_or(0);
            Constraint::Length(widest.max(name.len()) as u16)
        })
        .collect();

    let header = Row::new(columns.iter().map(|name| Cell::from(*name))).style(
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    );

    let rows = window.into_iter().map(|cells| {
        Row::new(cells.into_iter().map(|cell| {
            let alignment = if cell.is_numeric() {
                Alignment::Right
            } else {
                Alignment::Left
            };
            Cell::from(Line::from(cell.to_string()).alignment(alignment))
        }))
    });

    let title = format!(
        "{} ({} {})",
        sheet.name(),
        sheet.row_count(),
        sheet.rowtype()
    );
    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(2)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(title, Style::default().fg(Color::Green))),
        )
        .highlight_style(
            Style::default()
                .bg(Color::Yellow)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut widget_state = ratatui::widgets::TableState::default();
    if sheet.row_count() > 0 {
        widget_state.select(Some(state.selected_index.saturating_sub(state.scroll_offset)));
    }
    f.render_stateful_widget(table, area, &mut widget_state);
}
