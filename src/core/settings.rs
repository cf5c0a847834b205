//! Resolved application settings
//!
//! CLI arguments override the user config file, which overrides the
//! built-in defaults below.

use super::cli::{CliArgs, OutputFormat};
use super::config_file::{ConfigFile, GlyphMarker};
use crate::font_source::LoadOptions;

pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_GLYPH_COLOR: &str = "cyan";
pub const DEFAULT_ASPECT_RATIO: f64 = 1.0;

/// Milliseconds between UI redraws while a load is running.
pub const TICK_RATE_MS: u64 = 100;

/// Log lines kept in the Logs tab.
pub const MAX_LOG_LINES: usize = 1000;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub load: LoadOptions,
    pub log_level: String,
    pub log_to_file: bool,
    pub glyph_color: String,
    pub glyph_marker: GlyphMarker,
    pub aspect_ratio: f64,
    pub format: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            load: LoadOptions::default(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_to_file: false,
            glyph_color: DEFAULT_GLYPH_COLOR.to_string(),
            glyph_marker: GlyphMarker::default(),
            aspect_ratio: DEFAULT_ASPECT_RATIO,
            format: OutputFormat::default(),
        }
    }
}

impl Settings {
    /// Merge the sources. Also returns warnings about ignored config values;
    /// the caller logs them once logging is up.
    pub fn resolve(cli: &CliArgs, config: Option<&ConfigFile>) -> (Self, Vec<String>) {
        let defaults = Self::default();
        let config = config.cloned().unwrap_or_default();
        let mut warnings = Vec::new();

        let aspect_ratio = match config.aspect_ratio {
            Some(ratio) if ratio.is_finite() && ratio > 0.0 => ratio,
            Some(ratio) => {
                warnings.push(format!("Ignoring aspect_ratio {ratio}; it must be positive"));
                defaults.aspect_ratio
            }
            None => defaults.aspect_ratio,
        };

        let settings = Self {
            load: LoadOptions {
                font_number: cli
                    .font_number
                    .or(config.font_number)
                    .unwrap_or(defaults.load.font_number),
                strict: cli.strict || config.strict_parsing.unwrap_or(defaults.load.strict),
            },
            log_level: cli
                .log_level
                .clone()
                .or(config.log_level)
                .unwrap_or(defaults.log_level),
            log_to_file: config.log_to_file.unwrap_or(defaults.log_to_file),
            glyph_color: config.glyph_color.unwrap_or(defaults.glyph_color),
            glyph_marker: config.glyph_marker.unwrap_or(defaults.glyph_marker),
            aspect_ratio,
            format: cli.format,
        };
        (settings, warnings)
    }
}
