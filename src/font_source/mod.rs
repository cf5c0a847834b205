//! Font data access
//!
//! All binary parsing is done by skrifa/read-fonts. This module defines the
//! small interface the rest of the crate needs from a font ([`FontLibrary`])
//! and the skrifa-backed implementation ([`FontFile`]).

pub mod cmap;
pub mod error;
pub mod font;
pub mod glyphs;

pub use cmap::{CmapSubtableInfo, CmapTables, SkippedSubtable};
pub use error::FontError;
pub use font::{FontFile, LoadOptions};
pub use glyphs::{GlyphRecord, GlyphSet};

use skrifa::outline::OutlinePen;

use crate::outline::{GlyphDrawing, GlyphPen, RecordingCanvas};

/// What the sheets need from a parsed font.
pub trait FontLibrary {
    /// Every cmap subtable, in encoding record order.
    fn cmap_subtables(&self) -> Result<CmapTables, FontError>;

    /// Names and metrics for every glyph.
    fn glyph_set(&self) -> Result<GlyphSet, FontError>;

    /// Feed the unscaled outline of `glyph_id` into `pen`.
    fn draw_glyph(&self, glyph_id: u32, pen: &mut dyn OutlinePen) -> Result<(), FontError>;
}

/// Decompose one glyph into a finished drawing.
///
/// Nothing is returned for a glyph that fails part way through; a cubic
/// segment anywhere in the outline fails the whole glyph.
pub fn render_glyph(
    font: &dyn FontLibrary,
    glyph: &GlyphRecord,
) -> Result<GlyphDrawing, FontError> {
    let mut canvas = RecordingCanvas::new();
    let mut pen = GlyphPen::new(&mut canvas);
    font.draw_glyph(glyph.glyph_id, &mut pen)?;
    pen.finish()?;
    let drawing = canvas.into_drawing(glyph.name.clone());
    tracing::debug!(
        "Rendered glyph '{}' ({} lines, {} curves)",
        drawing.name,
        drawing.line_count(),
        drawing.curve_count()
    );
    Ok(drawing)
}
