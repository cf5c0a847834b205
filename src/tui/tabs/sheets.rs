//! The sheet stack
//!
//! The cmap sheet sits at the bottom. Opening a row pushes a glyphs sheet,
//! and opening a glyph pushes its drawing. `q`/`Esc` pops.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{layout::Rect, Frame};

use super::glyph_view::{self, GlyphStyle, GlyphView};
use super::table::{self, TableState};
use crate::sheet::{CmapSheet, GlyphsSheet, Sheet};
use crate::tui::communication::Request;

#[derive(Debug)]
pub enum SheetView {
    Cmap { sheet: CmapSheet, table: TableState },
    Glyphs { sheet: GlyphsSheet, table: TableState },
    Glyph(GlyphView),
}

impl SheetView {
    pub fn name(&self) -> &str {
        match self {
            SheetView::Cmap { sheet, .. } => sheet.name(),
            SheetView::Glyphs { sheet, .. } => sheet.name(),
            SheetView::Glyph(view) => &view.name,
        }
    }

    /// The table behind this view, if it is one.
    pub fn table(&self) -> Option<(&dyn Sheet, &TableState)> {
        match self {
            SheetView::Cmap { sheet, table } => Some((sheet as &dyn Sheet, table)),
            SheetView::Glyphs { sheet, table } => Some((sheet as &dyn Sheet, table)),
            SheetView::Glyph(_) => None,
        }
    }

    /// Request that opens the selected row.
    pub fn open_selected(&self) -> Option<Request> {
        match self {
            SheetView::Cmap { sheet, table } => {
                sheet
                    .row(table.selected_index)
                    .map(|subtable| Request::OpenSubtable {
                        subtable: Arc::clone(subtable),
                        sheet_name: sheet.glyphs_sheet_name(),
                    })
            }
            SheetView::Glyphs { sheet, table } => {
                sheet
                    .row(table.selected_index)
                    .map(|row| Request::RenderGlyph {
                        glyph: row.glyph.clone(),
                        view_name: sheet.glyph_view_name(row),
                    })
            }
            SheetView::Glyph(_) => None,
        }
    }
}

/// What a key press on the Sheets tab asks the app to do.
#[derive(Debug)]
pub enum SheetAction {
    None,
    Request(Request),
    Pop,
}

#[derive(Debug, Default)]
pub struct SheetsState {
    stack: Vec<SheetView>,
    /// Rows visible in the last drawn table, used for paging.
    page_size: usize,
}

impl SheetsState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, view: SheetView) {
        tracing::debug!("Opened '{}'", view.name());
        self.stack.push(view);
    }

    /// Replace the whole stack with the root sheet.
    pub fn set_root(&mut self, sheet: CmapSheet) {
        self.stack.clear();
        self.push(SheetView::Cmap {
            sheet,
            table: TableState::new(),
        });
    }

    /// Pop the top view unless it is the root. Returns whether one was popped.
    pub fn pop(&mut self) -> bool {
        if self.stack.len() > 1 {
            if let Some(view) = self.stack.pop() {
                tracing::debug!("Closed '{}'", view.name());
            }
            true
        } else {
            false
        }
    }

    pub fn top(&self) -> Option<&SheetView> {
        self.stack.last()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Names of the stacked views, bottom first.
    pub fn breadcrumbs(&self) -> Vec<&str> {
        self.stack.iter().map(SheetView::name).collect()
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) -> SheetAction {
        let page_size = self.page_size.max(1);
        let Some(view) = self.stack.last_mut() else {
            return match key.code {
                KeyCode::Char('q') | KeyCode::Esc => SheetAction::Pop,
                _ => SheetAction::None,
            };
        };

        if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
            && !key.modifiers.contains(KeyModifiers::CONTROL)
        {
            return SheetAction::Pop;
        }
        if key.code == KeyCode::Enter {
            return view
                .open_selected()
                .map_or(SheetAction::None, SheetAction::Request);
        }

        let (rows, table) = match view {
            SheetView::Cmap { sheet, table } => (sheet.row_count(), table),
            SheetView::Glyphs { sheet, table } => (sheet.row_count(), table),
            SheetView::Glyph(_) => return SheetAction::None,
        };
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => table.select_next(rows),
            KeyCode::Up | KeyCode::Char('k') => table.select_previous(),
            KeyCode::PageDown => table.page_down(rows, page_size),
            KeyCode::PageUp => table.page_up(page_size),
            KeyCode::Home | KeyCode::Char('g') => table.select_first(),
            KeyCode::End | KeyCode::Char('G') => table.select_last(rows),
            _ => {}
        }
        SheetAction::None
    }

    pub fn draw(&mut self, f: &mut Frame, style: &GlyphStyle, area: Rect) {
        self.page_size = area.height.saturating_sub(3) as usize;
        match self.stack.last_mut() {
            Some(SheetView::Cmap { sheet, table }) => table::draw(f, &*sheet, table, area),
            Some(SheetView::Glyphs { sheet, table }) => table::draw(f, &*sheet, table, area),
            Some(SheetView::Glyph(view)) => glyph_view::draw(f, view, style, area),
            None => {
                let waiting = ratatui::widgets::Paragraph::new("Reading cmap...").block(
                    ratatui::widgets::Block::default()
                        .borders(ratatui::widgets::Borders::ALL)
                        .title("Sheets"),
                );
                f.render_widget(waiting, area);
            }
        }
    }
}
