//! Glyphs of one cmap subtable: codepoint, glyph name and metrics

use super::{cell_of, CellValue, Column, Progress, Sheet};
use crate::font_source::{CmapSubtableInfo, GlyphRecord, GlyphSet};

/// One mapping of the subtable joined with its glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphRow {
    pub codepoint: u32,
    pub glyph: GlyphRecord,
}

const COLUMNS: &[Column<GlyphRow>] = &[
    Column::new("codepoint", |r| CellValue::Hex(r.codepoint)),
    Column::new("glyphid", |r| CellValue::Text(r.glyph.name.clone())),
    Column::new("height", |r| r.glyph.height.into()),
    Column::new("width", |r| r.glyph.width.into()),
    Column::new("lsb", |r| r.glyph.lsb.into()),
    Column::new("tsb", |r| r.glyph.tsb.into()),
];

#[derive(Debug, Clone)]
pub struct GlyphsSheet {
    name: String,
    rows: Vec<GlyphRow>,
    /// Loading was cancelled before every mapping was read.
    partial: bool,
}

impl GlyphsSheet {
    /// Join every mapping of `subtable` with its glyph record.
    ///
    /// Iteration goes through `progress`; if it is cancelled the sheet keeps
    /// the rows read so far and [`GlyphsSheet::is_partial`] returns true.
    pub fn load(
        name: impl Into<String>,
        subtable: &CmapSubtableInfo,
        glyphs: &GlyphSet,
        progress: &Progress,
    ) -> Self {
        let name = name.into();
        let rows: Vec<GlyphRow> = progress
            .wrap(subtable.mappings.iter())
            .log_every(10)
            .map(|&(codepoint, glyph_id)| GlyphRow {
                codepoint,
                glyph: glyphs.get(glyph_id).cloned().unwrap_or_else(|| {
                    tracing::debug!("U+{codepoint:04X} maps to glyph {glyph_id}, beyond maxp");
                    GlyphRecord {
                        glyph_id,
                        name: format!("gid{glyph_id}"),
                        width: None,
                        lsb: None,
                        height: None,
                        tsb: None,
                    }
                }),
            })
            .collect();

        let partial = rows.len() < subtable.mappings.len();
        if partial {
            tracing::warn!(
                "Loading '{}' cancelled after {} of {} glyphs",
                name,
                rows.len(),
                subtable.mappings.len()
            );
        } else {
            tracing::info!("Loaded {} glyphs into '{}'", rows.len(), name);
        }
        Self {
            name,
            rows,
            partial,
        }
    }

    pub fn row(&self, index: usize) -> Option<&GlyphRow> {
        self.rows.get(index)
    }

    pub fn is_partial(&self) -> bool {
        self.partial
    }

    /// Name of the canvas view opened from `row`.
    pub fn glyph_view_name(&self, row: &GlyphRow) -> String {
        format!("{}_{}", self.name, row.glyph.name)
    }
}

impl Sheet for GlyphsSheet {
    fn name(&self) -> &str {
        &self.name
    }

    fn rowtype(&self) -> &'static str {
        "glyphs"
    }

    fn column_names(&self) -> Vec<&'static str> {
        COLUMNS.iter().map(|c| c.name).collect()
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn cell(&self, row: usize, col: usize) -> CellValue {
        cell_of(&self.rows, COLUMNS, row, col)
    }
}
