//! Background font worker
//!
//! Receives [`TuiMessage`]s and runs each request on tokio's blocking pool so
//! the UI keeps drawing while a large subtable loads. Results come back as
//! [`AppMessage`]s.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::mpsc;

use crate::font_source::{
    render_glyph, CmapSubtableInfo, FontError, FontLibrary, GlyphRecord, GlyphSet,
};
use crate::sheet::{CmapSheet, GlyphsSheet, Progress};
use crate::tui::communication::{AppMessage, Request, RequestId, TuiMessage};

type GlyphCache = Arc<Mutex<Option<Arc<GlyphSet>>>>;

pub struct Worker<F> {
    font: Arc<F>,
    font_name: String,
    glyphs: GlyphCache,
    /// Progress of the most recent glyphs load.
    current: Option<Arc<Progress>>,
    tx: mpsc::UnboundedSender<AppMessage>,
}

impl<F> Worker<F>
where
    F: FontLibrary + Send + Sync + 'static,
{
    pub fn new(font: F, font_name: impl Into<String>, tx: mpsc::UnboundedSender<AppMessage>) -> Self {
        Self {
            font: Arc::new(font),
            font_name: font_name.into(),
            glyphs: GlyphCache::default(),
            current: None,
            tx,
        }
    }

    /// Serve requests until [`TuiMessage::Quit`] or the sender is dropped.
    pub async fn run(mut self, mut rx: mpsc::UnboundedReceiver<TuiMessage>) {
        while let Some(message) = rx.recv().await {
            match message {
                TuiMessage::LoadCmap => self.load_cmap(),
                TuiMessage::Submit { id, request } => match request {
                    Request::OpenSubtable {
                        subtable,
                        sheet_name,
                    } => self.open_subtable(id, subtable, sheet_name),
                    Request::RenderGlyph { glyph, view_name } => {
                        self.render_glyph(id, glyph, view_name)
                    }
                },
                TuiMessage::Cancel => self.cancel(),
                TuiMessage::Quit => break,
            }
        }
        self.cancel();
        tracing::debug!("Font worker stopped");
    }

    fn cancel(&mut self) {
        if let Some(progress) = self.current.take() {
            if progress.done() < progress.total() {
                tracing::info!("Cancelling '{}'", progress.label());
            }
            progress.cancel();
        }
    }

    fn load_cmap(&self) {
        let font = Arc::clone(&self.font);
        let name = self.font_name.clone();
        self.spawn_job(
            None,
            "Reading cmap".to_string(),
            move || CmapSheet::load(name, font.as_ref()),
            AppMessage::CmapLoaded,
        );
    }

    fn open_subtable(&mut self, id: RequestId, subtable: Arc<CmapSubtableInfo>, sheet_name: String) {
        // Only one glyphs load runs at a time.
        self.cancel();

        let progress = Arc::new(Progress::new(sheet_name.clone(), subtable.mapping_count()));
        self.current = Some(Arc::clone(&progress));
        let _ = self.tx.send(AppMessage::LoadStarted {
            id,
            progress: Arc::clone(&progress),
        });

        let font = Arc::clone(&self.font);
        let cache = Arc::clone(&self.glyphs);
        self.spawn_job(
            Some(id),
            format!("Loading {sheet_name}"),
            move || {
                let glyphs = cached_glyph_set(font.as_ref(), &cache)?;
                Ok(GlyphsSheet::load(sheet_name, &subtable, &glyphs, &progress))
            },
            move |sheet| AppMessage::GlyphsLoaded { id, sheet },
        );
    }

    fn render_glyph(&self, id: RequestId, glyph: GlyphRecord, view_name: String) {
        let font = Arc::clone(&self.font);
        self.spawn_job(
            Some(id),
            format!("Rendering {view_name}"),
            move || render_glyph(font.as_ref(), &glyph).map(|d| (glyph, d)),
            move |(glyph, drawing)| AppMessage::GlyphRendered {
                id,
                glyph,
                view_name,
                drawing,
            },
        );
    }

    fn spawn_job<T, J, R>(&self, id: Option<RequestId>, context: String, job: J, reply: R)
    where
        T: Send + 'static,
        J: FnOnce() -> Result<T, FontError> + Send + 'static,
        R: FnOnce(T) -> AppMessage + Send + 'static,
    {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let message = match tokio::task::spawn_blocking(job).await {
                Ok(Ok(value)) => reply(value),
                Ok(Err(e)) => {
                    tracing::error!("{context}: {e}");
                    AppMessage::Error {
                        id,
                        context,
                        message: e.to_string(),
                    }
                }
                Err(e) => {
                    tracing::error!("{context}: task failed: {e}");
                    AppMessage::Error {
                        id,
                        context,
                        message: format!("task failed: {e}"),
                    }
                }
            };
            // The UI may already be gone.
            let _ = tx.send(message);
        });
    }
}

/// The glyph set is read once per font and shared by every glyphs sheet.
fn cached_glyph_set<F: FontLibrary + ?Sized>(
    font: &F,
    cache: &Mutex<Option<Arc<GlyphSet>>>,
) -> Result<Arc<GlyphSet>, FontError> {
    let mut slot = cache.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(glyphs) = slot.as_ref() {
        return Ok(Arc::clone(glyphs));
    }
    let glyphs = Arc::new(font.glyph_set()?);
    *slot = Some(Arc::clone(&glyphs));
    Ok(glyphs)
}
