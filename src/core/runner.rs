//! Application runner logic
//!
//! Handles the different ways to run glyphsheet

use std::io::{self, Write};
use std::path::Path;

use anyhow::{anyhow, Context, Result};

use crate::core::batch::{run_batch, BatchRequest};
use crate::core::cli::CliArgs;
use crate::core::config_file::ConfigFile;
use crate::core::settings::Settings;
use crate::font_source::FontFile;
use crate::logging::{self, LogTarget};

/// Run glyphsheet with the given CLI arguments.
pub fn run_app(cli_args: CliArgs) -> Result<()> {
    if cli_args.new_config {
        return ConfigFile::initialize_config_directory()
            .context("Failed to initialize config directory");
    }

    cli_args.validate().map_err(anyhow::Error::msg)?;

    let (settings, warnings) = load_settings(&cli_args, &ConfigFile::config_path());
    let path = cli_args
        .font
        .as_deref()
        .ok_or_else(|| anyhow!("No font file given"))?;

    if cli_args.batch {
        run_batch_mode(&cli_args, &settings, &warnings, path)
    } else {
        run_interactive(&settings, &warnings, path)
    }
}

/// Read the config file and merge it with the CLI arguments. Nothing is
/// logged yet; the returned warnings are reported after `logging::init`.
fn load_settings(cli_args: &CliArgs, config_path: &Path) -> (Settings, Vec<String>) {
    let mut warnings = Vec::new();
    let config = ConfigFile::load_from(config_path).unwrap_or_else(|e| {
        warnings.push(format!("{e:#}; using defaults"));
        None
    });
    let (settings, resolve_warnings) = Settings::resolve(cli_args, config.as_ref());
    warnings.extend(resolve_warnings);
    (settings, warnings)
}

fn report_warnings(warnings: &[String]) {
    for warning in warnings {
        tracing::warn!("{warning}");
    }
}

fn open_font(path: &Path, settings: &Settings) -> Result<FontFile> {
    FontFile::open(path, settings.load)
        .with_context(|| format!("Failed to open font {}", path.display()))
}

fn run_batch_mode(
    cli_args: &CliArgs,
    settings: &Settings,
    warnings: &[String],
    path: &Path,
) -> Result<()> {
    let _log_guard = logging::init(settings, LogTarget::Stderr)?;
    report_warnings(warnings);
    let font = open_font(path, settings)?;

    let request = BatchRequest {
        subtable: cli_args.subtable,
        glyph: cli_args.glyph_selector(),
        format: settings.format,
    };
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    run_batch(&font, &font.display_name(), &request, &mut out)?;
    out.flush()?;
    Ok(())
}

#[cfg(feature = "tui")]
fn run_interactive(settings: &Settings, warnings: &[String], path: &Path) -> Result<()> {
    // Logs go to the Logs tab; stderr would corrupt the alternate screen.
    let (log_tx, log_rx) = tokio::sync::mpsc::unbounded_channel();
    let _log_guard = logging::init(settings, LogTarget::Channel(log_tx))?;
    report_warnings(warnings);

    // Open before entering raw mode so failures print normally.
    let font = open_font(path, settings)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?;
    runtime.block_on(crate::tui::run_tui(font, settings.clone(), log_rx))
}

#[cfg(not(feature = "tui"))]
fn run_interactive(_settings: &Settings, _warnings: &[String], _path: &Path) -> Result<()> {
    anyhow::bail!("glyphsheet was built without the `tui` feature; use --batch")
}
