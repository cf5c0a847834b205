use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn heading(text: &str) -> Line<'_> {
    Line::from(Span::styled(
        text,
        Style::default().add_modifier(Modifier::BOLD),
    ))
}

/// Draw the Help tab UI
pub fn draw(f: &mut Frame, area: Rect) {
    let help_text = vec![
        heading("Global Controls:"),
        Line::from(""),
        Line::from("  Ctrl+Q         - Quit application"),
        Line::from("  Ctrl+C         - Cancel a running load"),
        Line::from("  Tab            - Next tab"),
        Line::from("  Shift+Tab      - Previous tab"),
        Line::from("  1-3            - Jump to tab by number"),
        Line::from(""),
        heading("Sheets Tab:"),
        Line::from(""),
        Line::from("  ↑/↓ or j/k     - Move the row cursor"),
        Line::from("  Page Up/Down   - Move by page"),
        Line::from("  Home/End       - First/last row"),
        Line::from("  Enter          - Open the subtable or glyph under the cursor"),
        Line::from("  q or Esc       - Close the current sheet (quits on the first)"),
        Line::from(""),
        heading("Sheets:"),
        Line::from(""),
        Line::from("  font tables    - One row per cmap subtable"),
        Line::from("  glyphs         - Codepoints of one subtable with glyph metrics"),
        Line::from("  glyph          - The outline of one glyph; baseline and advance in gray"),
        Line::from(""),
        heading("Logs Tab:"),
        Line::from(""),
        Line::from("  ↑/↓ or j/k     - Scroll"),
        Line::from("  Home/End       - Oldest line / follow new lines"),
    ];

    let paragraph = Paragraph::new(help_text)
        .block(Block::default().borders(Borders::ALL).title("Help"))
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}
