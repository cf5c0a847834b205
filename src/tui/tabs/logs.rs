use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

#[derive(Debug, Clone)]
pub struct LogsState {
    pub scroll_offset: usize,
    pub auto_scroll: bool,
    /// Lines that fit in the last drawn frame.
    pub visible_lines: usize,
}

impl Default for LogsState {
    fn default() -> Self {
        Self::new()
    }
}

impl LogsState {
    pub fn new() -> Self {
        Self {
            scroll_offset: 0,
            auto_scroll: true,
            visible_lines: 20,
        }
    }

    pub fn scroll_up(&mut self) {
        if self.scroll_offset > 0 {
            self.scroll_offset -= 1;
            self.auto_scroll = false;
        }
    }

    pub fn scroll_down(&mut self, max_lines: usize) {
        if self.scroll_offset + self.visible_lines < max_lines {
            self.scroll_offset += 1;
        } else {
            self.auto_scroll = true;
        }
    }

    pub fn update_auto_scroll(&mut self, max_lines: usize) {
        if self.auto_scroll {
            self.scroll_offset = max_lines.saturating_sub(self.visible_lines);
        }
    }

    pub fn handle_key_event(&mut self, key: KeyEvent, max_lines: usize) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.scroll_up(),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_down(max_lines),
            KeyCode::Home => {
                self.scroll_offset = 0;
                self.auto_scroll = false;
            }
            KeyCode::End => self.auto_scroll = true,
            _ => {}
        }
    }
}

fn level_color(line: &str) -> Color {
    if line.contains("ERROR") {
        Color::Red
    } else if line.contains("WARN") {
        Color::Yellow
    } else if line.contains("DEBUG") || line.contains("TRACE") {
        Color::DarkGray
    } else {
        Color::White
    }
}

pub fn draw(f: &mut Frame, state: &mut LogsState, logs: &[String], area: Rect) {
    state.visible_lines = area.height.saturating_sub(2) as usize;
    state.update_auto_scroll(logs.len());

    let lines: Vec<Line> = logs
        .iter()
        .skip(state.scroll_offset)
        .take(state.visible_lines)
        .map(|line| Line::from(Span::styled(line.as_str(), Style::default().fg(level_color(line)))))
        .collect();

    let title = if state.auto_scroll {
        format!("Logs ({})", logs.len())
    } else {
        format!("Logs ({}) - End to follow", logs.len())
    };
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(title, Style::default().fg(Color::Green))),
    );
    f.render_widget(paragraph, area);
}
