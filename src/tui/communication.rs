//! Messages between the UI loop and the font worker

use std::sync::Arc;

use crate::font_source::{CmapSubtableInfo, GlyphRecord};
use crate::outline::GlyphDrawing;
use crate::sheet::{CmapSheet, GlyphsSheet, Progress};

/// Tags a request and every reply to it. Increases with each request.
pub type RequestId = u64;

/// Work that opens a new view when it completes.
#[derive(Debug, Clone)]
pub enum Request {
    /// Build the glyphs sheet of one subtable.
    OpenSubtable {
        subtable: Arc<CmapSubtableInfo>,
        sheet_name: String,
    },
    RenderGlyph {
        glyph: GlyphRecord,
        view_name: String,
    },
}

impl Request {
    /// Name of the view the request will push.
    pub fn target_name(&self) -> &str {
        match self {
            Request::OpenSubtable { sheet_name, .. } => sheet_name,
            Request::RenderGlyph { view_name, .. } => view_name,
        }
    }
}

/// UI → worker.
#[derive(Debug, Clone)]
pub enum TuiMessage {
    LoadCmap,
    Submit { id: RequestId, request: Request },
    /// Stop the running glyphs load; it still reports the rows read so far.
    Cancel,
    Quit,
}

/// Worker → UI.
#[derive(Debug)]
pub enum AppMessage {
    CmapLoaded(CmapSheet),
    LoadStarted {
        id: RequestId,
        progress: Arc<Progress>,
    },
    GlyphsLoaded {
        id: RequestId,
        sheet: GlyphsSheet,
    },
    GlyphRendered {
        id: RequestId,
        glyph: GlyphRecord,
        view_name: String,
        drawing: GlyphDrawing,
    },
    /// A job failed; `context` names what was being done. `id` is `None`
    /// for the cmap load.
    Error {
        id: Option<RequestId>,
        context: String,
        message: String,
    },
}
