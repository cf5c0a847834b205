use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use std::time::Duration;
use tokio::sync::mpsc;

const POLL_INTERVAL: Duration = Duration::from_millis(16);

pub enum InputEvent {
    Key(KeyEvent),
    Resize(u16, u16),
}

/// Forward terminal input until the receiving side goes away.
pub async fn handle_events(tx: mpsc::UnboundedSender<InputEvent>) -> anyhow::Result<()> {
    loop {
        if event::poll(Duration::ZERO)? {
            let sent = match event::read()? {
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    tx.send(InputEvent::Key(key_event))
                }
                Event::Resize(cols, rows) => tx.send(InputEvent::Resize(cols, rows)),
                _ => Ok(()),
            };
            if sent.is_err() {
                break;
            }
        }
        if tx.is_closed() {
            break;
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
    Ok(())
}
