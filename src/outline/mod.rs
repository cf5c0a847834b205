//! Glyph outline decomposition
//!
//! The font library walks a glyph's contours and calls back into a pen.
//! [`GlyphPen`] turns those callbacks into straight segments and quadratic
//! curves on a [`Canvas`]. [`RecordingCanvas`] keeps them so the UI (or batch
//! output) can draw them later.

pub mod canvas;
pub mod pen;

pub use canvas::{Canvas, GlyphDrawing, RecordingCanvas, Segment};
pub use pen::{GlyphPen, OutlineError};
