//! Non-interactive output
//!
//! `--batch` prints one sheet (or one glyph outline) to a writer and exits.

use std::io::Write;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};

use super::cli::{GlyphSelector, OutputFormat};
use crate::font_source::{render_glyph, CmapSubtableInfo, FontLibrary, GlyphRecord, GlyphSet};
use crate::outline::GlyphDrawing;
use crate::sheet::{CmapSheet, GlyphsSheet, Progress, Sheet};

/// What to print.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchRequest {
    /// Row of the cmap sheet to open.
    pub subtable: Option<usize>,
    pub glyph: Option<GlyphSelector>,
    pub format: OutputFormat,
}

pub fn run_batch(
    font: &dyn FontLibrary,
    font_name: &str,
    request: &BatchRequest,
    out: &mut impl Write,
) -> Result<()> {
    let cmap = CmapSheet::load(font_name, font).context("Failed to read the cmap table")?;
    for skipped in cmap.skipped() {
        tracing::warn!("{skipped}");
    }

    if let Some(selector) = &request.glyph {
        let glyphs = font.glyph_set()?;
        let subtable = match request.subtable {
            Some(index) => Some(subtable_at(&cmap, index)?),
            None => cmap.first_unicode(),
        };
        let glyph = resolve_glyph(selector, subtable.map(Arc::as_ref), &glyphs)?;
        let drawing = render_glyph(font, &glyph)
            .with_context(|| format!("Failed to draw glyph '{}'", glyph.name))?;
        return write_drawing(&drawing, request.format, out);
    }

    match request.subtable {
        None => write_sheet(&cmap, request.format, out),
        Some(index) => {
            let subtable = subtable_at(&cmap, index)?;
            let glyphs = font.glyph_set()?;
            let progress = Progress::new(
                format!("{} glyphs", subtable.label()),
                subtable.mapping_count(),
            );
            let sheet = GlyphsSheet::load(cmap.glyphs_sheet_name(), subtable, &glyphs, &progress);
            write_sheet(&sheet, request.format, out)
        }
    }
}

fn subtable_at(cmap: &CmapSheet, index: usize) -> Result<&Arc<CmapSubtableInfo>> {
    cmap.row(index).ok_or_else(|| {
        anyhow!(
            "No cmap subtable at index {index}; the font has {}",
            cmap.row_count()
        )
    })
}

/// Find the glyph named by `selector`. Codepoints are looked up in
/// `subtable`, which callers default to the first Unicode subtable.
pub fn resolve_glyph(
    selector: &GlyphSelector,
    subtable: Option<&CmapSubtableInfo>,
    glyphs: &GlyphSet,
) -> Result<GlyphRecord> {
    let record = match selector {
        GlyphSelector::Id(id) => glyphs.get(*id),
        GlyphSelector::Name(name) => glyphs.by_name(name),
        GlyphSelector::Codepoint(cp) => {
            let subtable =
                subtable.ok_or_else(|| anyhow!("No Unicode cmap subtable to look up U+{cp:04X}"))?;
            let glyph_id = subtable
                .glyph_for(*cp)
                .ok_or_else(|| anyhow!("U+{cp:04X} is not mapped by subtable {}", subtable.label()))?;
            glyphs.get(glyph_id)
        }
    };
    record
        .cloned()
        .ok_or_else(|| anyhow!("Glyph not found: {selector:?}"))
}

/// Print every row of `sheet`.
pub fn write_sheet(sheet: &dyn Sheet, format: OutputFormat, out: &mut impl Write) -> Result<()> {
    let columns = sheet.column_names();
    match format {
        OutputFormat::Tsv => {
            writeln!(out, "{}", columns.join("\t"))?;
            for row in 0..sheet.row_count() {
                let cells: Vec<String> = sheet
                    .row_cells(row)
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                writeln!(out, "{}", cells.join("\t"))?;
            }
        }
        OutputFormat::Json => {
            let rows: Vec<serde_json::Value> = (0..sheet.row_count())
                .map(|row| {
                    let object: serde_json::Map<String, serde_json::Value> = columns
                        .iter()
                        .zip(sheet.row_cells(row))
                        .map(|(name, cell)| (name.to_string(), cell.to_json()))
                        .collect();
                    serde_json::Value::Object(object)
                })
                .collect();
            serde_json::to_writer_pretty(&mut *out, &rows)?;
            writeln!(out)?;
        }
    }
    tracing::debug!("Wrote {} rows of '{}'", sheet.row_count(), sheet.name());
    Ok(())
}

pub fn write_drawing(
    drawing: &GlyphDrawing,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    match format {
        OutputFormat::Tsv => {
            for segment in &drawing.segments {
                writeln!(out, "{}", segment.to_fields().join("\t"))?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, drawing)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
