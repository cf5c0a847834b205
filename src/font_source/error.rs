//! Typed errors for font loading and drawing.

use std::path::PathBuf;

use thiserror::Error;

use crate::outline::OutlineError;

#[derive(Debug, Error)]
pub enum FontError {
    /// The font file could not be read from disk.
    #[error("failed to read font file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The font library rejected the data.
    #[error("failed to parse font: {0}")]
    Parse(String),

    /// A table needed for the operation is absent or unreadable.
    #[error("font has no usable '{0}' table")]
    MissingTable(&'static str),

    /// A cmap subtable failed to parse while strict parsing was requested.
    #[error("cmap subtable {index} (platform {platform_id}, encoding {encoding_id}) is unreadable: {reason}")]
    BadSubtable {
        index: usize,
        platform_id: u16,
        encoding_id: u16,
        reason: String,
    },

    #[error("glyph {0} is not in the font")]
    GlyphNotFound(u32),

    /// The font library failed while decomposing an outline.
    #[error("failed to draw glyph {glyph_id}: {reason}")]
    Draw { glyph_id: u32, reason: String },

    #[error(transparent)]
    Outline(#[from] OutlineError),
}
