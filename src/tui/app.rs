use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::Backend, Terminal};
use tokio::sync::mpsc;

use crate::core::settings::{MAX_LOG_LINES, TICK_RATE_MS};
use crate::sheet::{Progress, Sheet};
use crate::tui::{
    communication::{AppMessage, Request, RequestId, TuiMessage},
    events::{handle_events, InputEvent},
    tabs::{
        glyph_view::{GlyphStyle, GlyphView},
        logs::LogsState,
        sheets::{SheetAction, SheetView, SheetsState},
        table::TableState,
        TabType,
    },
    ui,
};

/// A request the UI is waiting for.
#[derive(Debug, Clone)]
pub struct Loading {
    /// Only replies carrying this id are accepted.
    pub id: RequestId,
    /// Name of the sheet or view that will be pushed.
    pub name: String,
    pub progress: Option<Arc<Progress>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub text: String,
}

pub struct App {
    pub tabs: Vec<TabType>,
    pub current_tab: usize,
    pub app_tx: mpsc::UnboundedSender<TuiMessage>,
    pub sheets: SheetsState,
    pub logs: Vec<String>,
    pub logs_state: LogsState,
    pub loading: Option<Loading>,
    next_request: RequestId,
    pub status: Option<Status>,
    pub glyph_style: GlyphStyle,
    pub should_quit: bool,
}

impl App {
    pub fn new(app_tx: mpsc::UnboundedSender<TuiMessage>, glyph_style: GlyphStyle) -> Self {
        Self {
            tabs: TabType::ALL.to_vec(),
            current_tab: 0,
            app_tx,
            sheets: SheetsState::new(),
            logs: Vec::new(),
            logs_state: LogsState::new(),
            loading: None,
            next_request: 0,
            status: None,
            glyph_style,
            should_quit: false,
        }
    }

    pub async fn run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        app_rx: &mut mpsc::UnboundedReceiver<AppMessage>,
        log_rx: &mut mpsc::UnboundedReceiver<String>,
    ) -> Result<()> {
        let (input_tx, mut input_rx) = mpsc::unbounded_channel();
        tokio::spawn(handle_events(input_tx));

        self.send(TuiMessage::LoadCmap);
        let mut tick = tokio::time::interval(Duration::from_millis(TICK_RATE_MS));

        loop {
            terminal.draw(|f| ui::draw(f, self))?;

            tokio::select! {
                Some(input_event) = input_rx.recv() => {
                    match input_event {
                        InputEvent::Key(key) => self.handle_key_event(key),
                        // The next draw picks up the new size.
                        InputEvent::Resize(_, _) => {}
                    }
                }
                Some(app_message) = app_rx.recv() => {
                    self.handle_app_message(app_message);
                }
                Some(line) = log_rx.recv() => {
                    self.push_log(line);
                }
                // Redraw so the progress gauge moves.
                _ = tick.tick() => {}
            }

            if self.should_quit {
                self.send(TuiMessage::Quit);
                break;
            }
        }

        Ok(())
    }

    fn send(&mut self, message: TuiMessage) {
        if self.app_tx.send(message).is_err() {
            self.set_status(StatusKind::Error, "Font worker stopped");
        }
    }

    fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status = Some(Status {
            kind,
            text: text.into(),
        });
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                self.cancel_load();
            }
            (KeyCode::Tab, _) => {
                self.next_tab();
            }
            (KeyCode::BackTab, _) => {
                self.previous_tab();
            }
            (KeyCode::Char(c), _) if c.is_ascii_digit() => {
                if let Some(digit) = c.to_digit(10) {
                    let tab_index = (digit as usize).saturating_sub(1);
                    if tab_index < self.tabs.len() {
                        self.current_tab = tab_index;
                    }
                }
            }
            _ => match self.current_tab_type() {
                TabType::Sheets => match self.sheets.handle_key_event(key) {
                    SheetAction::None => {}
                    SheetAction::Request(request) => self.request(request),
                    SheetAction::Pop => self.pop(),
                },
                TabType::Logs | TabType::Help
                    if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) =>
                {
                    self.current_tab = 0;
                }
                TabType::Logs => self.logs_state.handle_key_event(key, self.logs.len()),
                TabType::Help => {}
            },
        }
    }

    /// Send a request that will push a new view when it completes. It
    /// replaces whatever the UI was waiting for before.
    fn request(&mut self, request: Request) {
        let id = self.next_request;
        self.next_request += 1;
        let name = request.target_name().to_string();
        self.set_status(StatusKind::Info, format!("Loading {name}..."));
        self.loading = Some(Loading {
            id,
            name,
            progress: None,
        });
        self.send(TuiMessage::Submit { id, request });
    }

    fn pop(&mut self) {
        if let Some(loading) = self.loading.take() {
            // Back out of the pending view instead of the current one.
            self.send(TuiMessage::Cancel);
            self.set_status(StatusKind::Info, format!("Cancelled {}", loading.name));
        } else if self.sheets.pop() {
            self.status = None;
        } else {
            self.should_quit = true;
        }
    }

    fn cancel_load(&mut self) {
        match &self.loading {
            Some(Loading {
                name,
                progress: Some(_),
                ..
            }) => {
                let text = format!("Cancelling {name}...");
                self.send(TuiMessage::Cancel);
                self.set_status(StatusKind::Warning, text);
            }
            _ => self.set_status(StatusKind::Info, "Nothing to cancel"),
        }
    }

    /// Clear the pending request if `id` is the one being waited for.
    fn finish_loading(&mut self, id: RequestId, name: &str) -> bool {
        match &self.loading {
            Some(loading) if loading.id == id => {
                self.loading = None;
                true
            }
            _ => {
                tracing::debug!("Ignoring result #{id} for '{name}'; no longer waiting for it");
                false
            }
        }
    }

    pub fn handle_app_message(&mut self, message: AppMessage) {
        match message {
            AppMessage::CmapLoaded(sheet) => {
                let skipped = sheet.skipped();
                if let Some(first) = skipped.first() {
                    self.set_status(
                        StatusKind::Warning,
                        format!("{} cmap subtable(s) skipped: {first}", skipped.len()),
                    );
                } else {
                    self.set_status(
                        StatusKind::Info,
                        format!("{} cmap subtables", sheet.row_count()),
                    );
                }
                self.sheets.set_root(sheet);
            }
            AppMessage::LoadStarted { id, progress } => {
                if let Some(loading) = &mut self.loading {
                    if loading.id == id {
                        loading.progress = Some(progress);
                    }
                }
            }
            AppMessage::GlyphsLoaded { id, sheet } => {
                if !self.finish_loading(id, sheet.name()) {
                    return;
                }
                if sheet.is_partial() {
                    self.set_status(
                        StatusKind::Warning,
                        format!("Partial: loading stopped after {} glyphs", sheet.row_count()),
                    );
                } else {
                    self.set_status(StatusKind::Info, format!("{} glyphs", sheet.row_count()));
                }
                self.sheets.push(SheetView::Glyphs {
                    sheet,
                    table: TableState::new(),
                });
            }
            AppMessage::GlyphRendered {
                id,
                glyph,
                view_name,
                drawing,
            } => {
                if !self.finish_loading(id, &view_name) {
                    return;
                }
                self.set_status(
                    StatusKind::Info,
                    format!(
                        "{} segments ({} lines, {} curves)",
                        drawing.segments.len(),
                        drawing.line_count(),
                        drawing.curve_count()
                    ),
                );
                self.sheets.push(SheetView::Glyph(GlyphView {
                    name: view_name,
                    glyph,
                    drawing,
                }));
            }
            AppMessage::Error {
                id,
                context,
                message,
            } => {
                if let Some(id) = id {
                    if !self.finish_loading(id, &context) {
                        return;
                    }
                }
                self.set_status(StatusKind::Error, format!("{context}: {message}"));
            }
        }
    }

    pub fn push_log(&mut self, line: String) {
        self.logs.push(line);
        if self.logs.len() > MAX_LOG_LINES {
            self.logs.drain(0..self.logs.len() - MAX_LOG_LINES);
        }
    }

    pub fn next_tab(&mut self) {
        self.current_tab = (self.current_tab + 1) % self.tabs.len();
    }

    pub fn previous_tab(&mut self) {
        if self.current_tab > 0 {
            self.current_tab -= 1;
        } else {
            self.current_tab = self.tabs.len() - 1;
        }
    }

    pub fn current_tab_type(&self) -> TabType {
        self.tabs[self.current_tab]
    }
}
