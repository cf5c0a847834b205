//! Sheets: typed rows and columns over font data
//!
//! A sheet is a read-only table. Each column knows its name, how to pull a
//! value out of a row, and how that value is displayed. The TUI and batch
//! output both render sheets through [`Sheet`] without knowing the row type.

pub mod cmap_sheet;
pub mod glyphs_sheet;
pub mod progress;

pub use cmap_sheet::CmapSheet;
pub use glyphs_sheet::{GlyphRow, GlyphsSheet};
pub use progress::{Progress, ProgressIter};

use std::fmt;

/// Value of one cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Int(i64),
    /// Integer shown as uppercase hexadecimal, e.g. codepoints.
    Hex(u32),
    Float(f64),
    Bool(bool),
    Text(String),
    /// The row has no value for this column.
    Missing,
}

impl CellValue {
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            CellValue::Int(v) => serde_json::Value::from(*v),
            CellValue::Hex(v) => serde_json::Value::from(*v),
            CellValue::Float(v) => serde_json::Value::from(*v),
            CellValue::Bool(v) => serde_json::Value::from(*v),
            CellValue::Text(v) => serde_json::Value::from(v.as_str()),
            CellValue::Missing => serde_json::Value::Null,
        }
    }

    /// Whether the UI should right-align this value.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            CellValue::Int(_) | CellValue::Hex(_) | CellValue::Float(_)
        )
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Int(v) => write!(f, "{v}"),
            CellValue::Hex(v) => write!(f, "{v:X}"),
            CellValue::Float(v) if v.fract() == 0.0 => write!(f, "{}", *v as i64),
            CellValue::Float(v) => write!(f, "{v:.2}"),
            CellValue::Bool(v) => write!(f, "{v}"),
            CellValue::Text(v) => f.write_str(v),
            CellValue::Missing => Ok(()),
        }
    }
}

impl From<Option<f32>> for CellValue {
    fn from(value: Option<f32>) -> Self {
        value.map_or(CellValue::Missing, |v| CellValue::Float(v as f64))
    }
}

impl From<Option<u16>> for CellValue {
    fn from(value: Option<u16>) -> Self {
        value.map_or(CellValue::Missing, |v| CellValue::Int(v as i64))
    }
}

impl From<Option<i16>> for CellValue {
    fn from(value: Option<i16>) -> Self {
        value.map_or(CellValue::Missing, |v| CellValue::Int(v as i64))
    }
}

/// A named column over rows of type `R`.
pub struct Column<R> {
    pub name: &'static str,
    getter: fn(&R) -> CellValue,
}

impl<R> Column<R> {
    pub const fn new(name: &'static str, getter: fn(&R) -> CellValue) -> Self {
        Self { name, getter }
    }

    pub fn get(&self, row: &R) -> CellValue {
        (self.getter)(row)
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column").field("name", &self.name).finish()
    }
}

/// A read-only table the UI can display.
pub trait Sheet {
    fn name(&self) -> &str;

    /// What one row represents, e.g. "glyphs".
    fn rowtype(&self) -> &'static str;

    fn column_names(&self) -> Vec<&'static str>;

    fn row_count(&self) -> usize;

    /// Cell at (`row`, `col`); [`CellValue::Missing`] when out of range.
    fn cell(&self, row: usize, col: usize) -> CellValue;

    fn row_cells(&self, row: usize) -> Vec<CellValue> {
        (0..self.column_names().len())
            .map(|col| self.cell(row, col))
            .collect()
    }
}

/// Shared [`Sheet::cell`] implementation for sheets backed by a row slice and
/// a static column list.
pub(crate) fn cell_of<R>(rows: &[R], columns: &[Column<R>], row: usize, col: usize) -> CellValue {
    match (rows.get(row), columns.get(col)) {
        (Some(row), Some(column)) => column.get(row),
        _ => CellValue::Missing,
    }
}
