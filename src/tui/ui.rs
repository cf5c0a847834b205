use crate::tui::{
    app::{App, StatusKind},
    tabs::{help, logs, sheets::SheetView, TabType},
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Tabs},
    Frame,
};

pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.size());

    draw_tabs(f, app, chunks[0]);
    draw_tab_content(f, app, chunks[1]);
    draw_status(f, app, chunks[2]);
}

fn draw_tabs(f: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = app
        .tabs
        .iter()
        .enumerate()
        .map(|(i, tab)| Line::from(format!("{}.{}", i + 1, tab.title())))
        .collect();

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title("glyphsheet"))
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .select(app.current_tab)
        .divider("│");

    f.render_widget(tabs, area);
}

fn draw_tab_content(f: &mut Frame, app: &mut App, area: Rect) {
    match app.current_tab_type() {
        TabType::Sheets => app.sheets.draw(f, &app.glyph_style, area),
        TabType::Logs => logs::draw(f, &mut app.logs_state, &app.logs, area),
        TabType::Help => help::draw(f, area),
    }
}

/// Where the cursor is: sheet path and row, or segment count for a glyph.
pub fn position_summary(app: &App) -> String {
    let path = app.sheets.breadcrumbs().join(" > ");
    match app.sheets.top() {
        Some(SheetView::Glyph(view)) => format!(
            "{path} | {} segments",
            view.drawing.segments.len()
        ),
        Some(view) => match view.table() {
            Some((sheet, table)) if sheet.row_count() > 0 => format!(
                "{path} | {} {}/{}",
                sheet.rowtype(),
                table.selected_index + 1,
                sheet.row_count()
            ),
            Some((sheet, _)) => format!("{path} | no {}", sheet.rowtype()),
            None => path,
        },
        None => "opening font...".to_string(),
    }
}

fn draw_status(f: &mut Frame, app: &App, area: Rect) {
    if let Some(progress) = app.loading.as_ref().and_then(|l| l.progress.as_ref()) {
        let label = if progress.is_cancelled() {
            format!("{}: cancelling", progress.label())
        } else {
            format!(
                "{}: {}/{} ({}%)  Ctrl+C to cancel",
                progress.label(),
                progress.done(),
                progress.total(),
                progress.percent()
            )
        };
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Yellow).bg(Color::DarkGray))
            .ratio(progress.ratio())
            .label(label);
        f.render_widget(gauge, area);
        return;
    }

    let mut spans = vec![Span::styled(
        position_summary(app),
        Style::default().fg(Color::Gray),
    )];
    if let Some(status) = &app.status {
        let color = match status.kind {
            StatusKind::Info => Color::White,
            StatusKind::Warning => Color::Yellow,
            StatusKind::Error => Color::Red,
        };
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            status.text.as_str(),
            Style::default().fg(color),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font_source::{CmapSubtableInfo, GlyphRecord, GlyphSet};
    use crate::sheet::{GlyphsSheet, Progress};
    use crate::tui::tabs::{glyph_view::GlyphStyle, table::TableState};
    use tokio::sync::mpsc;

    #[test]
    fn test_position_summary() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = App::new(tx, GlyphStyle::default());
        assert_eq!(position_summary(&app), "opening font...");

        let subtable = CmapSubtableInfo {
            index: 0,
            format: 4,
            language: 0,
            length: 0,
            platform_id: 3,
            encoding_id: 1,
            mappings: vec![(0x41, 0), (0x42, 0)],
        };
        let glyphs = GlyphSet::from_records(vec![GlyphRecord {
            glyph_id: 0,
            name: "A".into(),
            width: None,
            lsb: None,
            height: None,
            tsb: None,
        }]);
        let sheet = GlyphsSheet::load("Demo_glyphs", &subtable, &glyphs, &Progress::new("", 2));
        app.sheets.push(SheetView::Glyphs {
            sheet,
            table: TableState::new(),
        });

        assert_eq!(position_summary(&app), "Demo_glyphs | glyphs 1/2");
    }
}
