//! Top-level sheet: one row per cmap subtable

use std::sync::Arc;

use super::{cell_of, CellValue, Column, Sheet};
use crate::font_source::{CmapSubtableInfo, FontError, FontLibrary, SkippedSubtable};

type Row = Arc<CmapSubtableInfo>;

const COLUMNS: &[Column<Row>] = &[
    Column::new("cmap", |r| CellValue::Text(format!("{} mappings", r.mapping_count()))),
    Column::new("format", |r| CellValue::Int(r.format as i64)),
    Column::new("language", |r| CellValue::Int(r.language as i64)),
    Column::new("length", |r| CellValue::Int(r.length as i64)),
    Column::new("platEncID", |r| CellValue::Int(r.encoding_id as i64)),
    Column::new("platformID", |r| CellValue::Int(r.platform_id as i64)),
    Column::new("isSymbol", |r| CellValue::Bool(r.is_symbol())),
    Column::new("isUnicode", |r| CellValue::Bool(r.is_unicode())),
];

#[derive(Debug, Clone)]
pub struct CmapSheet {
    name: String,
    rows: Vec<Row>,
    skipped: Vec<SkippedSubtable>,
}

impl CmapSheet {
    pub fn load(name: impl Into<String>, font: &dyn FontLibrary) -> Result<Self, FontError> {
        let tables = font.cmap_subtables()?;
        let sheet = Self {
            name: name.into(),
            rows: tables.subtables.into_iter().map(Arc::new).collect(),
            skipped: tables.skipped,
        };
        tracing::info!(
            "Loaded {} cmap subtables for '{}' ({} skipped)",
            sheet.rows.len(),
            sheet.name,
            sheet.skipped.len()
        );
        Ok(sheet)
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Subtables the parser rejected; non-empty only in tolerant mode.
    pub fn skipped(&self) -> &[SkippedSubtable] {
        &self.skipped
    }

    /// Name of the glyphs sheet opened from a row of this sheet.
    pub fn glyphs_sheet_name(&self) -> String {
        format!("{}_glyphs", self.name)
    }

    /// First subtable that maps Unicode codepoints, if any.
    pub fn first_unicode(&self) -> Option<&Row> {
        self.rows.iter().find(|r| r.is_unicode())
    }
}

impl Sheet for CmapSheet {
    fn name(&self) -> &str {
        &self.name
    }

    fn rowtype(&self) -> &'static str {
        "font tables"
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font_source::{CmapTables, GlyphSet};
    use skrifa::outline::OutlinePen;

    struct TablesOnly(Vec<CmapSubtableInfo>);

    impl FontLibrary for TablesOnly {
        fn cmap_subtables(&self) -> Result<CmapTables, FontError> {
            Ok(CmapTables {
                subtables: self.0.clone(),
                skipped: Vec::new(),
            })
        }

        fn glyph_set(&self) -> Result<GlyphSet, FontError> {
            Ok(GlyphSet::default())
        }

        fn draw_glyph(&self, glyph_id: u32, _pen: &mut dyn OutlinePen) -> Result<(), FontError> {
            Err(FontError::GlyphNotFound(glyph_id))
        }
    }

    fn info(index: usize, platform_id: u16, encoding_id: u16) -> CmapSubtableInfo {
        CmapSubtableInfo {
            index,
            format: 4,
            language: 0,
            length: 56,
            platform_id,
            encoding_id,
            mappings: vec![(0x41, 1), (0x42, 2)],
        }
    }

    #[test]
    fn test_columns_and_cells() {
        let font = TablesOnly(vec![info(0, 1, 0), info(1, 3, 1)]);
        let sheet = CmapSheet::load("Demo", &font).unwrap();

        assert_eq!(
            sheet.column_names(),
            vec![
                "cmap",
                "format",
                "language",
                "length",
                "platEncID",
                "platformID",
                "isSymbol",
                "isUnicode"
            ]
        );
        assert_eq!(sheet.rowtype(), "font tables");
        assert_eq!(sheet.row_count(), 2);
        assert_eq!(sheet.cell(1, 0), CellValue::Text("2 mappings".into()));
        assert_eq!(sheet.cell(1, 1), CellValue::Int(4));
        assert_eq!(sheet.cell(1, 3), CellValue::Int(56));
        assert_eq!(sheet.cell(1, 4), CellValue::Int(1));
        assert_eq!(sheet.cell(1, 5), CellValue::Int(3));
        assert_eq!(sheet.cell(1, 6), CellValue::Bool(false));
        assert_eq!(sheet.cell(1, 7), CellValue::Bool(true));
        assert_eq!(sheet.cell(0, 7), CellValue::Bool(false));
    }

    #[test]
    fn test_naming_and_unicode_lookup() {
        let font = TablesOnly(vec![info(0, 1, 0), info(1, 3, 1)]);
        let sheet = CmapSheet::load("Demo", &font).unwrap();

        assert_eq!(sheet.name(), "Demo");
        assert_eq!(sheet.glyphs_sheet_name(), "Demo_glyphs");
        assert_eq!(sheet.first_unicode().map(|r| r.index), Some(1));
    }
}
