pub mod app;
pub mod communication;
pub mod events;
pub mod tabs;
pub mod ui;
pub mod worker;

use crate::core::settings::Settings;
use crate::font_source::FontFile;
use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tokio::sync::mpsc;

/// Browse `font` in the terminal until the user quits.
pub async fn run_tui(
    font: FontFile,
    settings: Settings,
    mut log_rx: mpsc::UnboundedReceiver<String>,
) -> Result<()> {
    let (tui_tx, tui_rx) = mpsc::unbounded_channel();
    let (app_tx, mut app_rx) = mpsc::unbounded_channel();
    let font_name = font.display_name();
    let worker = tokio::spawn(worker::Worker::new(font, font_name, app_tx).run(tui_rx));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = app::App::new(tui_tx, tabs::glyph_view::GlyphStyle::from_settings(&settings));
    let result = app.run(&mut terminal, &mut app_rx, &mut log_rx).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Quit was sent on the way out; the worker only has to drain.
    drop(app);
    if let Err(e) = worker.await {
        tracing::warn!("Font worker ended abnormally: {e}");
    }

    result
}

/// Leave raw mode and the alternate screen. Safe to call more than once.
pub fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}
