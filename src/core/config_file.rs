//! User configuration file handling
//!
//! Manages settings from ~/.config/glyphsheet/settings.json

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// How glyph outlines are plotted in the terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlyphMarker {
    #[default]
    Braille,
    Dot,
    Block,
    HalfBlock,
}

/// User configuration from ~/.config/glyphsheet/settings.json
///
/// These settings override built-in defaults but are overridden by CLI arguments
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ConfigFile {
    /// Face index to open in font collections
    pub font_number: Option<u32>,
    /// Fail on unreadable cmap subtables instead of skipping them
    pub strict_parsing: Option<bool>,
    /// Log filter, e.g. "info" or "glyphsheet=debug"
    pub log_level: Option<String>,
    /// Also write logs to ~/.config/glyphsheet/logs/
    pub log_to_file: Option<bool>,
    /// Color name or #rrggbb for glyph outlines
    pub glyph_color: Option<String>,
    /// Plot marker for glyph outlines
    pub glyph_marker: Option<GlyphMarker>,
    /// Width/height ratio of one font unit on screen
    pub aspect_ratio: Option<f64>,
}

impl ConfigFile {
    /// Get the path to the glyphsheet config directory
    pub fn config_dir() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")));
        config_dir.join("glyphsheet")
    }

    /// Get the path to the user config file
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("settings.json")
    }

    /// Get the path to the logs directory
    pub fn logs_dir() -> PathBuf {
        Self::config_dir().join("logs")
    }

    /// Load configuration from the user config file
    pub fn load() -> anyhow::Result<Option<Self>> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`; `Ok(None)` if there is no file.
    ///
    /// Runs before logging is set up, so problems are returned rather than logged.
    pub fn load_from(path: &Path) -> anyhow::Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let contents =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let config =
            serde_json::from_str(&contents).with_context(|| format!("Failed to parse {:?}", path))?;
        Ok(Some(config))
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;

        tracing::debug!("Saved settings to {:?}", path);
        Ok(())
    }

    /// The values used when nothing is configured, written by `--new-config`.
    pub fn with_defaults() -> Self {
        Self {
            font_number: Some(0),
            strict_parsing: Some(false),
            log_level: Some("info".to_string()),
            log_to_file: Some(false),
            glyph_color: Some("cyan".to_string()),
            glyph_marker: Some(GlyphMarker::Braille),
            aspect_ratio: Some(1.0),
        }
    }

    /// Initialize the user configuration directory
    ///
    /// This creates:
    /// 1. The ~/.config/glyphsheet directory
    /// 2. A settings.json file with default values
    /// 3. A logs/ directory
    pub fn initialize_config_directory() -> anyhow::Result<()> {
        Self::initialize_in(&Self::config_dir())
    }

    pub fn initialize_in(config_dir: &Path) -> anyhow::Result<()> {
        fs::create_dir_all(config_dir)?;
        println!("Created config directory: {:?}", config_dir);

        let logs_dir = config_dir.join("logs");
        fs::create_dir_all(&logs_dir)?;
        println!("Created logs directory: {:?}", logs_dir);

        let settings_path = config_dir.join("settings.json");
        if !settings_path.exists() {
            Self::with_defaults().save_to(&settings_path)?;
            println!("Created settings file: {:?}", settings_path);
        } else {
            println!("Settings file already exists: {:?}", settings_path);
        }

        println!("\nConfiguration initialized successfully!");
        println!("  - Edit settings at: {:?}", settings_path);
        println!("  - View application logs in: {:?}", logs_dir);

        Ok(())
    }
}
