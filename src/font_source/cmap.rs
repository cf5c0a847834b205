//! Character map subtables
//!
//! One [`CmapSubtableInfo`] per encoding record in the `cmap` table. The
//! mapping itself comes from read-fonts' subtable views; this module only
//! collects it into owned rows.

use serde::Serialize;
use skrifa::raw::tables::cmap::{Cmap, CmapSubtable, EncodingRecord, PlatformId};

use super::FontError;

const PLATFORM_UNICODE: u16 = 0;
const PLATFORM_WINDOWS: u16 = 3;
const WINDOWS_SYMBOL: u16 = 0;
const WINDOWS_UNICODE_BMP: u16 = 1;
const WINDOWS_UNICODE_FULL: u16 = 10;

/// Highest Unicode scalar value. Codepoints past it are never listed.
pub const MAX_CODEPOINT: u32 = 0x10FFFF;

/// Stand-in for platform ids read-fonts does not recognize.
pub const PLATFORM_UNKNOWN: u16 = u16::MAX;

/// One cmap subtable and its codepoint → glyph id mapping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CmapSubtableInfo {
    /// Position of the encoding record in the cmap table.
    pub index: usize,
    pub format: u16,
    pub language: u32,
    pub length: u32,
    pub platform_id: u16,
    pub encoding_id: u16,
    /// Sorted by codepoint.
    #[serde(skip)]
    pub mappings: Vec<(u32, u32)>,
}

impl CmapSubtableInfo {
    pub fn is_unicode(&self) -> bool {
        self.platform_id == PLATFORM_UNICODE
            || (self.platform_id == PLATFORM_WINDOWS
                && matches!(
                    self.encoding_id,
                    WINDOWS_SYMBOL | WINDOWS_UNICODE_BMP | WINDOWS_UNICODE_FULL
                ))
    }

    pub fn is_symbol(&self) -> bool {
        self.platform_id == PLATFORM_WINDOWS && self.encoding_id == WINDOWS_SYMBOL
    }

    pub fn mapping_count(&self) -> usize {
        self.mappings.len()
    }

    pub fn glyph_for(&self, codepoint: u32) -> Option<u32> {
        self.mappings
            .binary_search_by_key(&codepoint, |(cp, _)| *cp)
            .ok()
            .map(|ix| self.mappings[ix].1)
    }

    /// Short label used in sheet names and logs, e.g. `3/1 fmt4`.
    pub fn label(&self) -> String {
        format!("{}/{} fmt{}", self.platform_id, self.encoding_id, self.format)
    }
}

/// A subtable that could not be read and was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSubtable {
    pub index: usize,
    pub platform_id: u16,
    pub encoding_id: u16,
    pub reason: String,
}

impl std::fmt::Display for SkippedSubtable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "cmap subtable {} ({}/{}) skipped: {}",
            self.index, self.platform_id, self.encoding_id, self.reason
        )
    }
}

/// Result of reading every subtable of a cmap.
#[derive(Debug, Clone, Default)]
pub struct CmapTables {
    pub subtables: Vec<CmapSubtableInfo>,
    pub skipped: Vec<SkippedSubtable>,
}

pub fn platform_number(platform: PlatformId) -> u16 {
    match platform {
        PlatformId::Unicode => 0,
        PlatformId::Macintosh => 1,
        PlatformId::ISO => 2,
        PlatformId::Windows => 3,
        PlatformId::Custom => 4,
        #[allow(unreachable_patterns)]
        _ => PLATFORM_UNKNOWN,
    }
}

/// Read every encoding record of `cmap`, in table order.
///
/// With `strict` unset, a subtable the parser rejects is recorded in
/// [`CmapTables::skipped`] and reading continues.
pub fn read_cmap(cmap: &Cmap<'_>, strict: bool) -> Result<CmapTables, FontError> {
    let mut tables = CmapTables::default();
    for (index, record) in cmap.encoding_records().iter().enumerate() {
        let platform_id = platform_number(record.platform_id());
        let encoding_id = record.encoding_id();
        match read_subtable(cmap, record, index) {
            Ok(info) => tables.subtables.push(info),
            Err(reason) if strict => {
                return Err(FontError::BadSubtable {
                    index,
                    platform_id,
                    encoding_id,
                    reason,
                })
            }
            Err(reason) => {
                let skipped = SkippedSubtable {
                    index,
                    platform_id,
                    encoding_id,
                    reason,
                };
                tracing::warn!("{skipped}");
                tables.skipped.push(skipped);
            }
        }
    }
    Ok(tables)
}

fn read_subtable(
    cmap: &Cmap<'_>,
    record: &EncodingRecord,
    index: usize,
) -> Result<CmapSubtableInfo, String> {
    let subtable = record
        .subtable(cmap.offset_data())
        .map_err(|e| e.to_string())?;

    let (format, language, length, mut mappings): (u16, u32, u32, Vec<(u32, u32)>) =
        match &subtable {
            CmapSubtable::Format0(t) => (
                t.format(),
                t.language() as u32,
                t.length() as u32,
                t.glyph_id_array()
                    .iter()
                    .enumerate()
                    .map(|(cp, gid)| (cp as u32, *gid as u32))
                    .collect(),
            ),
            CmapSubtable::Format2(t) => {
                tracing::debug!("cmap subtable {index}: format 2 mappings are not listed");
                (t.format(), t.language() as u32, t.length() as u32, Vec::new())
            }
            CmapSubtable::Format4(t) => (
                t.format(),
                t.language() as u32,
                t.length() as u32,
                t.iter()
                    .map(|(cp, gid)| (cp, gid.to_u32()))
                    .filter(|(_, gid)| *gid != 0)
                    .collect(),
            ),
            CmapSubtable::Format6(t) => {
                let first = t.first_code() as u32;
                (
                    t.format(),
                    t.language() as u32,
                    t.length() as u32,
                    t.glyph_id_array()
                        .iter()
                        .enumerate()
                        .map(|(i, gid)| (first + i as u32, gid.get() as u32))
                        .collect(),
                )
            }
            CmapSubtable::Format8(t) => {
                tracing::debug!("cmap subtable {index}: format 8 mappings are not listed");
                (t.format(), t.language(), t.length(), Vec::new())
            }
            CmapSubtable::Format10(t) => (
                t.format(),
                t.language(),
                t.length(),
                // Empty when the start is already past Unicode.
                (t.start_char_code()..=MAX_CODEPOINT)
                    .zip(t.glyph_id_array().iter().take(t.num_chars() as usize))
                    .map(|(cp, gid)| (cp, gid.get() as u32))
                    .collect(),
            ),
            CmapSubtable::Format12(t) => {
                check_group_ranges(
                    t.groups()
                        .iter()
                        .map(|g| (g.start_char_code(), g.end_char_code())),
                )?;
                (
                    t.format(),
                    t.language(),
                    t.length(),
                    t.iter()
                        .map(|(cp, gid)| (cp, gid.to_u32()))
                        .filter(|(_, gid)| *gid != 0)
                        .collect(),
                )
            }
            CmapSubtable::Format13(t) => {
                check_group_ranges(
                    t.groups()
                        .iter()
                        .map(|g| (g.start_char_code(), g.end_char_code())),
                )?;
                (
                    t.format(),
                    t.language(),
                    t.length(),
                    t.groups()
                        .iter()
                        .flat_map(|group| {
                            let gid = group.glyph_id();
                            (group.start_char_code()..=group.end_char_code())
                                .map(move |cp| (cp, gid))
                        })
                        .collect(),
                )
            }
            // Variation sequences only; no default codepoint mapping of its own.
            CmapSubtable::Format14(t) => (t.format(), 0, t.length(), Vec::new()),
        };

    mappings.sort_unstable_by_key(|(cp, _)| *cp);
    mappings.dedup_by_key(|(cp, _)| *cp);

    Ok(CmapSubtableInfo {
        index,
        format,
        language,
        length,
        platform_id: platform_number(record.platform_id()),
        encoding_id: record.encoding_id(),
        mappings,
    })
}

/// Groups of formats 12 and 13 are expanded one codepoint at a time, so
/// their ranges must be ordered, within Unicode, and no larger in total
/// than Unicode itself.
fn check_group_ranges(groups: impl Iterator<Item = (u32, u32)>) -> Result<(), String> {
    let mut total: u64 = 0;
    for (i, (start, end)) in groups.enumerate() {
        if start > end {
            return Err(format!("group {i} starts at U+{start:04X} after its end U+{end:04X}"));
        }
        if end > MAX_CODEPOINT {
            return Err(format!("group {i} ends at U+{end:04X}, past U+{MAX_CODEPOINT:X}"));
        }
        total += (end - start) as u64 + 1;
    }
    if total > MAX_CODEPOINT as u64 + 1 {
        return Err(format!("groups cover {total} codepoints, more than Unicode has"));
    }
    Ok(())
}
