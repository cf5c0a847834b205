//! Font files opened through skrifa

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use skrifa::instance::{LocationRef, Size};
use skrifa::outline::{DrawSettings, OutlinePen};
use skrifa::raw::{FileRef, FontRef, TableProvider};
use skrifa::{GlyphId, MetadataProvider};

use super::cmap::{read_cmap, CmapTables};
use super::glyphs::{read_glyph_set, GlyphSet};
use super::{FontError, FontLibrary};

/// How a font file should be opened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Face index inside a collection; 0 for plain font files.
    pub font_number: u32,
    /// Fail on unreadable cmap subtables instead of skipping them.
    pub strict: bool,
}

/// A font file held in memory.
///
/// Cloning is cheap; the bytes are shared.
#[derive(Debug, Clone)]
pub struct FontFile {
    path: PathBuf,
    data: Arc<[u8]>,
    options: LoadOptions,
    face_count: u32,
}

impl FontFile {
    /// Read `path` and check that the requested face parses.
    pub fn open(path: impl AsRef<Path>, options: LoadOptions) -> Result<Self, FontError> {
        let path = path.as_ref().to_path_buf();
        let bytes = fs::read(&path).map_err(|source| FontError::Io {
            path: path.clone(),
            source,
        })?;
        let font = Self::from_bytes(path, bytes, options)?;
        tracing::info!(
            "Opened {} ({} bytes, face {} of {})",
            font.path.display(),
            font.data.len(),
            options.font_number,
            font.face_count
        );
        Ok(font)
    }

    /// Wrap bytes that were already read. `path` is only used for naming.
    pub fn from_bytes(
        path: impl Into<PathBuf>,
        bytes: impl Into<Arc<[u8]>>,
        options: LoadOptions,
    ) -> Result<Self, FontError> {
        let data: Arc<[u8]> = bytes.into();
        let face_count = match FileRef::new(&data).map_err(|e| FontError::Parse(e.to_string()))? {
            FileRef::Font(_) => 1,
            FileRef::Collection(collection) => collection.len(),
        };
        FontRef::from_index(&data, options.font_number)
            .map_err(|e| FontError::Parse(e.to_string()))?;
        Ok(Self {
            path: path.into(),
            data,
            options,
            face_count,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn face_count(&self) -> u32 {
        self.face_count
    }

    /// File stem, used as the name of the top-level sheet.
    pub fn display_name(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "font".to_string())
    }

    fn font_ref(&self) -> Result<FontRef<'_>, FontError> {
        FontRef::from_index(&self.data, self.options.font_number)
            .map_err(|e| FontError::Parse(e.to_string()))
    }
}

impl FontLibrary for FontFile {
    fn cmap_subtables(&self) -> Result<CmapTables, FontError> {
        let font = self.font_ref()?;
        let cmap = font.cmap().map_err(|_| FontError::MissingTable("cmap"))?;
        read_cmap(&cmap, self.options.strict)
    }

    fn glyph_set(&self) -> Result<GlyphSet, FontError> {
        read_glyph_set(&self.font_ref()?)
    }

    fn draw_glyph(&self, glyph_id: u32, pen: &mut dyn OutlinePen) -> Result<(), FontError> {
        let font = self.font_ref()?;
        let outlines = font.outline_glyphs();
        let glyph = outlines
            .get(GlyphId::new(glyph_id))
            .ok_or(FontError::GlyphNotFound(glyph_id))?;
        let settings = DrawSettings::unhinted(Size::unscaled(), LocationRef::default());
        glyph
            .draw(settings, &mut ForwardPen(pen))
            .map_err(|e| FontError::Draw {
                glyph_id,
                reason: e.to_string(),
            })?;
        Ok(())
    }
}

/// Lets a `dyn OutlinePen` go where skrifa expects a sized pen.
struct ForwardPen<'a>(&'a mut dyn OutlinePen);

impl OutlinePen for ForwardPen<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        self.0.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.0.line_to(x, y);
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.0.quad_to(cx0, cy0, x, y);
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.0.curve_to(cx0, cy0, cx1, cy1, x, y);
    }

    fn close(&mut self) {
        self.0.close();
    }
}
