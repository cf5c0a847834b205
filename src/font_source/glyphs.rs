//! Per-glyph names and metrics

use serde::Serialize;
use skrifa::instance::{LocationRef, Size};
use skrifa::raw::{FontRef, TableProvider};
use skrifa::{GlyphId, GlyphNames, MetadataProvider};

use super::FontError;

/// Metrics of one glyph in font units.
///
/// `height` and `tsb` come from the vertical metrics table and are absent in
/// fonts without one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlyphRecord {
    pub glyph_id: u32,
    pub name: String,
    pub width: Option<f32>,
    pub lsb: Option<f32>,
    pub height: Option<u16>,
    pub tsb: Option<i16>,
}

/// Every glyph of a font, indexed by glyph id.
#[derive(Debug, Clone, Default)]
pub struct GlyphSet {
    glyphs: Vec<GlyphRecord>,
}

impl GlyphSet {
    pub fn from_records(glyphs: Vec<GlyphRecord>) -> Self {
        Self { glyphs }
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn get(&self, glyph_id: u32) -> Option<&GlyphRecord> {
        self.glyphs.get(glyph_id as usize)
    }

    pub fn by_name(&self, name: &str) -> Option<&GlyphRecord> {
        self.glyphs.iter().find(|g| g.name == name)
    }
}

/// Collect names and metrics for every glyph in `maxp`.
pub fn read_glyph_set(font: &FontRef<'_>) -> Result<GlyphSet, FontError> {
    let num_glyphs = font
        .maxp()
        .map_err(|_| FontError::MissingTable("maxp"))?
        .num_glyphs() as u32;

    let metrics = font.glyph_metrics(Size::unscaled(), LocationRef::default());
    let names = GlyphNames::new(font);
    let vertical = font.vmtx().ok();
    if vertical.is_none() {
        tracing::debug!("no vmtx table; glyph heights left empty");
    }

    let glyphs = (0..num_glyphs)
        .map(|id| {
            let gid = GlyphId::new(id);
            let name = names
                .get(gid)
                .map(|n| n.as_str().to_string())
                .unwrap_or_else(|| format!("gid{id}"));
            let (height, tsb) = match &vertical {
                Some(vmtx) => {
                    let long = vmtx.v_metrics();
                    let ix = id as usize;
                    let height = long
                        .get(ix)
                        .or_else(|| long.last())
                        .map(|m| m.advance());
                    let tsb = long.get(ix).map(|m| m.side_bearing()).or_else(|| {
                        vmtx.top_side_bearings()
                            .get(ix.saturating_sub(long.len()))
                            .map(|b| b.get())
                    });
                    (height, tsb)
                }
                None => (None, None),
            };
            GlyphRecord {
                glyph_id: id,
                name,
                width: metrics.advance_width(gid),
                lsb: metrics.left_side_bearing(gid),
                height,
                tsb,
            }
        })
        .collect();

    Ok(GlyphSet { glyphs })
}
