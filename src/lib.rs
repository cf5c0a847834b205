//! glyphsheet
//!
//! Browse the cmap subtables, glyph metrics and outlines of TrueType and
//! OpenType fonts as sheets, in the terminal or as TSV/JSON.
pub mod core;
pub mod font_source;
pub mod logging;
pub mod outline;
pub mod sheet;
#[cfg(feature = "tui")]
pub mod tui;
