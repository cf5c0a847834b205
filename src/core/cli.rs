//! Command line interface for glyphsheet
//!
//! Handles parsing command line arguments and validating them before any
//! font is opened, so mistakes come back as readable messages.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// File extensions glyphsheet will open.
pub const FONT_EXTENSIONS: &[&str] = &["ttf", "otf", "ttc", "otc"];

/// Output format for `--batch`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Tab-separated values with a header row
    #[default]
    Tsv,
    /// A JSON array of objects
    Json,
}

/// glyphsheet CLI arguments
///
/// Examples:
///   glyphsheet MyFont.ttf                          # Browse interactively
///   glyphsheet --batch MyFont.ttf                  # Print the cmap subtables
///   glyphsheet --batch -s 1 MyFont.ttf             # Print glyphs of subtable 1
///   glyphsheet --batch -s 1 -g U+0041 MyFont.ttf   # Print the outline of 'A'
///   glyphsheet -n 2 Collection.ttc                 # Open the third face
#[derive(Parser, Debug, Clone, Default)]
#[clap(
    name = "glyphsheet",
    version,
    about = "Browse cmap subtables, glyph metrics and outlines of TrueType/OpenType fonts",
    long_about = "glyphsheet opens a TrueType or OpenType font and shows its character map subtables as a table. Opening a subtable lists its codepoints with glyph metrics; opening a glyph draws its outline in the terminal."
)]
pub struct CliArgs {
    /// Font file to open (.ttf, .otf, .ttc or .otc)
    #[clap(value_name = "FONT")]
    pub font: Option<PathBuf>,

    /// Face index inside a font collection
    #[clap(
        long = "font-number",
        short = 'n',
        help = "Face index inside a font collection",
        long_help = "Index of the face to open when FONT is a collection (.ttc/.otc). Defaults to the config file setting, then 0."
    )]
    pub font_number: Option<u32>,

    /// Fail on unreadable cmap subtables instead of skipping them
    #[clap(
        long = "strict",
        help = "Fail on unreadable cmap subtables",
        long_help = "By default a cmap subtable that cannot be parsed is skipped with a warning. With --strict the whole load fails instead."
    )]
    pub strict: bool,

    /// Print a sheet to stdout instead of starting the terminal UI
    #[clap(
        long = "batch",
        short = 'b',
        help = "Print a sheet to stdout and exit",
        long_help = "Print a sheet to stdout and exit. Without --subtable the cmap subtables are printed; with --subtable the glyphs of that subtable; with --glyph the outline segments of that glyph."
    )]
    pub batch: bool,

    /// Subtable row to open in batch mode
    #[clap(long = "subtable", short = 's', value_name = "INDEX")]
    pub subtable: Option<usize>,

    /// Glyph to draw in batch mode: a glyph name, U+XXXX or gidN
    #[clap(long = "glyph", short = 'g', value_name = "GLYPH")]
    pub glyph: Option<String>,

    /// Batch output format
    #[clap(long = "format", short = 'f', value_enum, default_value_t = OutputFormat::Tsv)]
    pub format: OutputFormat,

    /// Log level filter (error, warn, info, debug, trace)
    #[clap(
        long = "log-level",
        help = "Log level filter",
        long_help = "Log level filter such as 'info' or 'glyphsheet=debug'. RUST_LOG takes precedence when set."
    )]
    pub log_level: Option<String>,

    /// Initialize the user configuration directory
    #[clap(
        long = "new-config",
        help = "Initialize the user config directory",
        long_help = "Create ~/.config/glyphsheet with a settings.json holding the default values and a logs/ directory."
    )]
    pub new_config: bool,
}

/// What to do with a glyph in batch mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlyphSelector {
    Name(String),
    Codepoint(u32),
    Id(u32),
}

impl GlyphSelector {
    /// Parse `U+0041`, `gid12` or a plain glyph name.
    pub fn parse(input: &str) -> Self {
        if let Some(hex) = input
            .strip_prefix("U+")
            .or_else(|| input.strip_prefix("u+"))
        {
            if let Ok(cp) = u32::from_str_radix(hex, 16) {
                return GlyphSelector::Codepoint(cp);
            }
        }
        if let Some(id) = input.strip_prefix("gid") {
            if let Ok(id) = id.parse() {
                return GlyphSelector::Id(id);
            }
        }
        GlyphSelector::Name(input.to_string())
    }
}

impl CliArgs {
    /// Validate the CLI arguments after parsing
    pub fn validate(&self) -> Result<(), String> {
        if self.new_config {
            return Ok(());
        }

        let Some(path) = &self.font else {
            return Err("No font file given.\nUsage: glyphsheet [OPTIONS] <FONT>".to_string());
        };

        if !path.exists() {
            return Err(format!(
                "Font file does not exist: {}\nMake sure the path is correct and the file exists.",
                path.display()
            ));
        }
        if !path.is_file() {
            return Err(format!("Not a file: {}", path.display()));
        }

        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase());
        match extension {
            Some(ext) if FONT_EXTENSIONS.contains(&ext.as_str()) => {}
            Some(ext) => {
                return Err(format!(
                    "Unsupported file type '.{ext}': {}\nSupported extensions: {}",
                    path.display(),
                    FONT_EXTENSIONS.join(", ")
                ))
            }
            None => {
                return Err(format!(
                    "File has no extension: {}\nExpected one of: {}",
                    path.display(),
                    FONT_EXTENSIONS.join(", ")
                ))
            }
        }

        if !self.batch && (self.subtable.is_some() || self.glyph.is_some()) {
            return Err("--subtable and --glyph only apply with --batch".to_string());
        }

        Ok(())
    }

    pub fn glyph_selector(&self) -> Option<GlyphSelector> {
        self.glyph.as_deref().map(GlyphSelector::parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_parse_batch_flags() {
        let args = CliArgs::try_parse_from([
            "glyphsheet",
            "--batch",
            "-s",
            "2",
            "-g",
            "U+0041",
            "--format",
            "json",
            "font.ttf",
        ])
        .unwrap();

        assert!(args.batch);
        assert_eq!(args.subtable, Some(2));
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.font, Some(PathBuf::from("font.ttf")));
        assert_eq!(args.glyph_selector(), Some(GlyphSelector::Codepoint(0x41)));
    }

    #[test]
    fn test_default_format_is_tsv() {
        let args = CliArgs::try_parse_from(["glyphsheet", "font.otf"]).unwrap();
        assert_eq!(args.format, OutputFormat::Tsv);
        assert!(!args.strict);
    }

    #[test]
    fn test_glyph_selector_forms() {
        assert_eq!(GlyphSelector::parse("u+20ac"), GlyphSelector::Codepoint(0x20AC));
        assert_eq!(GlyphSelector::parse("gid7"), GlyphSelector::Id(7));
        assert_eq!(GlyphSelector::parse("gidget"), GlyphSelector::Name("gidget".into()));
        assert_eq!(GlyphSelector::parse("A"), GlyphSelector::Name("A".into()));
        assert_eq!(GlyphSelector::parse("U+XYZ"), GlyphSelector::Name("U+XYZ".into()));
    }

    #[test]
    fn test_validate_requires_font() {
        let args = CliArgs::default();
        assert!(args.validate().is_err());

        let args = CliArgs {
            new_config: true,
            ..CliArgs::default()
        };
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validate_checks_extension() {
        let dir = tempfile::tempdir().unwrap();
        let font = dir.path().join("Font.TTF");
        let text = dir.path().join("notes.txt");
        fs::write(&font, b"placeholder").unwrap();
        fs::write(&text, b"placeholder").unwrap();

        let ok = CliArgs {
            font: Some(font),
            ..CliArgs::default()
        };
        assert!(ok.validate().is_ok());

        let bad = CliArgs {
            font: Some(text),
            ..CliArgs::default()
        };
        let err = bad.validate().unwrap_err();
        assert!(err.contains("Unsupported file type '.txt'"));
    }

    #[test]
    fn test_validate_rejects_batch_only_flags() {
        let dir = tempfile::tempdir().unwrap();
        let font = dir.path().join("Font.ttf");
        fs::write(&font, b"placeholder").unwrap();

        let args = CliArgs {
            font: Some(font),
            subtable: Some(0),
            ..CliArgs::default()
        };
        assert!(args.validate().is_err());
    }
}
