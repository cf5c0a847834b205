//! Application logging
//!
//! Everything logs through `tracing`. Where the events end up depends on how
//! glyphsheet runs: batch mode writes them to stderr, the TUI receives them
//! as lines over a channel and shows them in the Logs tab. Either way they
//! can also go to a daily log file in ~/.config/glyphsheet/logs/.

use std::fs;
use std::io;
use std::path::Path;

use tokio::sync::mpsc::UnboundedSender;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::core::config_file::ConfigFile;
use crate::core::settings::{Settings, DEFAULT_LOG_LEVEL};

/// File name prefix of the rolling log file; the date is appended.
pub const LOG_FILE_PREFIX: &str = "glyphsheet.log";

/// Where formatted log lines go besides the optional log file.
#[derive(Debug, Clone)]
pub enum LogTarget {
    Stderr,
    /// One message per formatted event, without trailing newline.
    Channel(UnboundedSender<String>),
}

/// Keeps the background file writer alive. Drop it last so buffered lines
/// reach the log file.
#[derive(Default)]
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins over the configured level.
pub fn init(settings: &Settings, target: LogTarget) -> anyhow::Result<LogGuard> {
    let filter = build_filter(&settings.log_level);

    let (file_layer, file_guard) = if settings.log_to_file {
        let logs_dir = ConfigFile::logs_dir();
        match file_writer(&logs_dir) {
            Ok((writer, guard)) => (
                Some(fmt::layer().with_writer(writer).with_ansi(false)),
                Some(guard),
            ),
            Err(e) => {
                eprintln!("Failed to open log directory {:?}: {}", logs_dir, e);
                (None, None)
            }
        }
    } else {
        (None, None)
    };

    let (stderr_layer, channel_layer) = match target {
        LogTarget::Stderr => (
            Some(fmt::layer().with_writer(io::stderr).with_target(false)),
            None,
        ),
        LogTarget::Channel(tx) => (
            None,
            Some(
                fmt::layer()
                    .with_writer(ChannelWriter { tx })
                    .with_ansi(false)
                    .with_target(false)
                    .without_time(),
            ),
        ),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(channel_layer)
        .with(file_layer)
        .try_init()?;

    tracing::info!(
        "=== glyphsheet {} started at {} ===",
        env!("CARGO_PKG_VERSION"),
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    );
    if file_guard.is_some() {
        tracing::info!("Logging to {:?}", ConfigFile::logs_dir());
    }

    Ok(LogGuard { _file: file_guard })
}

fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

fn file_writer(
    logs_dir: &Path,
) -> io::Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    fs::create_dir_all(logs_dir)?;
    let appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX);
    Ok(tracing_appender::non_blocking(appender))
}

/// Hands each formatted event to a channel.
#[derive(Debug, Clone)]
pub struct ChannelWriter {
    tx: UnboundedSender<String>,
}

impl ChannelWriter {
    pub fn new(tx: UnboundedSender<String>) -> Self {
        Self { tx }
    }
}

impl<'a> MakeWriter<'a> for ChannelWriter {
    type Writer = LineBuffer;

    fn make_writer(&'a self) -> LineBuffer {
        LineBuffer {
            tx: self.tx.clone(),
            buf: Vec::new(),
        }
    }
}

/// Collects one event and sends it when dropped.
pub struct LineBuffer {
    tx: UnboundedSender<String>,
    buf: Vec<u8>,
}

impl io::Write for LineBuffer {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for LineBuffer {
    fn drop(&mut self) {
        let text = String::from_utf8_lossy(&self.buf);
        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            // The receiver is gone once the UI has shut down.
            let _ = self.tx.send(line.to_string());
        }
    }
}
