//! Small TrueType fonts built in memory for integration tests.
//!
//! The font has three glyphs:
//! - 0 `.notdef`, empty
//! - 1 `square`, four on-curve points from (100, 0) to (500, 600)
//! - 2 `tri`, on (50, 0), off (300, 700), on (550, 0)
//!
//! and maps 'A' and 'B' to glyphs 1 and 2 through a format 4 subtable shared
//! by the (0, 3) and (3, 1) encoding records, plus U+1F600 to glyph 2 through
//! a (3, 10) format 12 subtable.
//!
//! [`TestFont::with_array_formats`] appends formats 0, 6, 13 and 10, in
//! that record order.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub const SQUARE: u32 = 1;
pub const TRI: u32 = 2;

const UNITS_PER_EM: u16 = 1000;

struct Glyph {
    /// (x, y, on_curve)
    points: &'static [(i16, i16, bool)],
    advance: u16,
    lsb: i16,
    v_advance: u16,
    tsb: i16,
}

const GLYPHS: [Glyph; 3] = [
    Glyph {
        points: &[],
        advance: 500,
        lsb: 0,
        v_advance: 1000,
        tsb: 0,
    },
    Glyph {
        points: &[
            (100, 0, true),
            (100, 600, true),
            (500, 600, true),
            (500, 0, true),
        ],
        advance: 600,
        lsb: 100,
        v_advance: 1000,
        tsb: 200,
    },
    Glyph {
        points: &[(50, 0, true), (300, 700, false), (550, 0, true)],
        advance: 600,
        lsb: 50,
        v_advance: 1000,
        tsb: 100,
    },
];

#[derive(Debug, Clone, Default)]
pub struct TestFont {
    vertical: bool,
    broken_subtable: bool,
    no_names: bool,
    array_formats: bool,
    oversized_group: bool,
}

impl TestFont {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add vhea/vmtx. Glyph 2 takes its top side bearing from the short
    /// array after the long metrics.
    pub fn with_vertical_metrics(mut self) -> Self {
        self.vertical = true;
        self
    }

    /// Add a (1, 0) encoding record pointing at a subtable of unknown format.
    pub fn with_broken_subtable(mut self) -> Self {
        self.broken_subtable = true;
        self
    }

    /// Append (1, 0) format 0, (1, 1) format 6, (0, 6) format 13 and
    /// (3, 10) format 10 subtables. Each maps some codes to glyph 0.
    pub fn with_array_formats(mut self) -> Self {
        self.array_formats = true;
        self
    }

    /// Append a (0, 6) format 13 subtable whose one group spans
    /// 0..=0xFFFFFF.
    pub fn with_oversized_group(mut self) -> Self {
        self.oversized_group = true;
        self
    }

    /// Use a version 3 post table, which carries no glyph names.
    pub fn without_glyph_names(mut self) -> Self {
        self.no_names = true;
        self
    }

    pub fn write_to(&self, dir: &Path, file_name: &str) -> PathBuf {
        let path = dir.join(file_name);
        fs::write(&path, self.build()).expect("write test font");
        path
    }

    pub fn build(&self) -> Vec<u8> {
        let (glyf, loca) = glyf_and_loca();
        let mut tables: Vec<(&[u8; 4], Vec<u8>)> = vec![
            (b"cmap", self.cmap()),
            (b"glyf", glyf),
            (b"head", head()),
            (b"hhea", hhea()),
            (b"hmtx", hmtx()),
            (b"loca", loca),
            (b"maxp", maxp()),
            (b"post", self.post()),
        ];
        if self.vertical {
            tables.push((b"vhea", vhea()));
            tables.push((b"vmtx", vmtx()));
        }
        font_file(&tables)
    }

    fn cmap(&self) -> Vec<u8> {
        // (platform, encoding, index into `subtables`)
        let mut records: Vec<(u16, u16, usize)> = vec![(0, 3, 0)];
        let mut subtables = vec![cmap_format4(), cmap_format12()];
        if self.broken_subtable {
            subtables.push(vec![0x00, 0x63, 0x00, 0x00]);
            records.push((1, 0, subtables.len() - 1));
        }
        records.push((3, 1, 0));
        records.push((3, 10, 1));
        if self.array_formats {
            for (platform, encoding, subtable) in [
                (1, 0, cmap_format0()),
                (1, 1, cmap_format6()),
                (0, 6, cmap_format13(&[(0x30, 0x39, SQUARE), (0xE000, 0xE001, 0)])),
                (3, 10, cmap_format10()),
            ] {
                subtables.push(subtable);
                records.push((platform, encoding, subtables.len() - 1));
            }
        }
        if self.oversized_group {
            subtables.push(cmap_format13(&[(0, 0x00FF_FFFF, SQUARE)]));
            records.push((0, 6, subtables.len() - 1));
        }

        let mut offsets = Vec::new();
        let mut offset = 4 + 8 * records.len() as u32;
        for subtable in &subtables {
            offsets.push(offset);
            offset += subtable.len() as u32;
        }

        let mut out = Vec::new();
        put_u16(&mut out, 0);
        put_u16(&mut out, records.len() as u16);
        for (platform, encoding, subtable) in records {
            put_u16(&mut out, platform);
            put_u16(&mut out, encoding);
            put_u32(&mut out, offsets[subtable]);
        }
        for subtable in subtables {
            out.extend(subtable);
        }
        out
    }

    fn post(&self) -> Vec<u8> {
        let mut out = Vec::new();
        put_u32(&mut out, if self.no_names { 0x0003_0000 } else { 0x0002_0000 });
        put_u32(&mut out, 0); // italicAngle
        put_i16(&mut out, -100); // underlinePosition
        put_i16(&mut out, 50); // underlineThickness
        for _ in 0..5 {
            put_u32(&mut out, 0);
        }
        if self.no_names {
            return out;
        }
        put_u16(&mut out, GLYPHS.len() as u16);
        // 0 is the standard .notdef; custom names start at 258.
        for index in [0u16, 258, 259] {
            put_u16(&mut out, index);
        }
        for name in ["square", "tri"] {
            out.push(name.len() as u8);
            out.extend_from_slice(name.as_bytes());
        }
        out
    }
}

/// Format 4: one segment for 'A'..'B' plus the closing 0xFFFF segment.
fn cmap_format4() -> Vec<u8> {
    let seg_count: u16 = 2;
    let mut out = Vec::new();
    put_u16(&mut out, 4);
    put_u16(&mut out, 16 + 8 * seg_count);
    put_u16(&mut out, 0); // language
    put_u16(&mut out, seg_count * 2);
    put_u16(&mut out, 4); // searchRange
    put_u16(&mut out, 1); // entrySelector
    put_u16(&mut out, 0); // rangeShift
    for end in [0x42u16, 0xFFFF] {
        put_u16(&mut out, end);
    }
    put_u16(&mut out, 0); // reservedPad
    for start in [0x41u16, 0xFFFF] {
        put_u16(&mut out, start);
    }
    for delta in [SQUARE as i16 - 0x41, 1] {
        put_i16(&mut out, delta);
    }
    for _ in 0..seg_count {
        put_u16(&mut out, 0); // idRangeOffset
    }
    out
}

fn cmap_format12() -> Vec<u8> {
    let groups: [(u32, u32, u32); 2] = [(0x41, 0x42, SQUARE), (0x1F600, 0x1F600, TRI)];
    let mut out = Vec::new();
    put_u16(&mut out, 12);
    put_u16(&mut out, 0);
    put_u32(&mut out, 16 + 12 * groups.len() as u32);
    put_u32(&mut out, 0); // language
    put_u32(&mut out, groups.len() as u32);
    for (start, end, glyph) in groups {
        put_u32(&mut out, start);
        put_u32(&mut out, end);
        put_u32(&mut out, glyph);
    }
    out
}

/// Format 0: 'A' and 'B' map to the two glyphs, every other byte to 0.
fn cmap_format0() -> Vec<u8> {
    let mut out = Vec::new();
    put_u16(&mut out, 0);
    put_u16(&mut out, 6 + 256);
    put_u16(&mut out, 0); // language
    out.extend((0..=255u8).map(|code| match code {
        0x41 => SQUARE as u8,
        0x42 => TRI as u8,
        _ => 0,
    }));
    out
}

/// Format 6: 'a', 'b', 'c' map to square, 0, tri.
fn cmap_format6() -> Vec<u8> {
    let glyphs = [SQUARE as u16, 0, TRI as u16];
    let mut out = Vec::new();
    put_u16(&mut out, 6);
    put_u16(&mut out, 10 + 2 * glyphs.len() as u16);
    put_u16(&mut out, 0); // language
    put_u16(&mut out, 0x61);
    put_u16(&mut out, glyphs.len() as u16);
    for glyph in glyphs {
        put_u16(&mut out, glyph);
    }
    out
}

/// Format 10 starting two codes below the end of Unicode, with one glyph
/// more than fits.
fn cmap_format10() -> Vec<u8> {
    let glyphs = [SQUARE as u16, TRI as u16, SQUARE as u16];
    let mut out = Vec::new();
    put_u16(&mut out, 10);
    put_u16(&mut out, 0);
    put_u32(&mut out, 20 + 2 * glyphs.len() as u32);
    put_u32(&mut out, 0); // language
    put_u32(&mut out, 0x10FFFE);
    put_u32(&mut out, glyphs.len() as u32);
    for glyph in glyphs {
        put_u16(&mut out, glyph);
    }
    out
}

/// Format 13 with (start, end, glyph) groups.
fn cmap_format13(groups: &[(u32, u32, u32)]) -> Vec<u8> {
    let mut out = Vec::new();
    put_u16(&mut out, 13);
    put_u16(&mut out, 0);
    put_u32(&mut out, 16 + 12 * groups.len() as u32);
    put_u32(&mut out, 0); // language
    put_u32(&mut out, groups.len() as u32);
    for &(start, end, glyph) in groups {
        put_u32(&mut out, start);
        put_u32(&mut out, end);
        put_u32(&mut out, glyph);
    }
    out
}

fn simple_glyph(points: &[(i16, i16, bool)]) -> Vec<u8> {
    if points.is_empty() {
        return Vec::new();
    }
    let x_min = points.iter().map(|p| p.0).min().unwrap_or(0);
    let x_max = points.iter().map(|p| p.0).max().unwrap_or(0);
    let y_min = points.iter().map(|p| p.1).min().unwrap_or(0);
    let y_max = points.iter().map(|p| p.1).max().unwrap_or(0);

    let mut out = Vec::new();
    put_i16(&mut out, 1); // one contour
    for v in [x_min, y_min, x_max, y_max] {
        put_i16(&mut out, v);
    }
    put_u16(&mut out, points.len() as u16 - 1);
    put_u16(&mut out, 0); // no instructions
    for &(_, _, on_curve) in points {
        // Neither short nor same: every coordinate is a full i16 delta.
        out.push(if on_curve { 0x01 } else { 0x00 });
    }
    let mut prev = 0;
    for &(x, _, _) in points {
        put_i16(&mut out, x - prev);
        prev = x;
    }
    let mut prev = 0;
    for &(_, y, _) in points {
        put_i16(&mut out, y - prev);
        prev = y;
    }
    while out.len() % 4 != 0 {
        out.push(0);
    }
    out
}

fn glyf_and_loca() -> (Vec<u8>, Vec<u8>) {
    let mut glyf = Vec::new();
    let mut loca = Vec::new();
    for glyph in &GLYPHS {
        put_u32(&mut loca, glyf.len() as u32);
        glyf.extend(simple_glyph(glyph.points));
    }
    put_u32(&mut loca, glyf.len() as u32);
    (glyf, loca)
}

fn head() -> Vec<u8> {
    let mut out = Vec::new();
    put_u16(&mut out, 1);
    put_u16(&mut out, 0);
    put_u32(&mut out, 0x0001_0000); // fontRevision
    put_u32(&mut out, 0); // checksumAdjustment
    put_u32(&mut out, 0x5F0F_3CF5);
    put_u16(&mut out, 0x000B); // flags
    put_u16(&mut out, UNITS_PER_EM);
    out.extend_from_slice(&[0; 16]); // created, modified
    for v in [0i16, 0, 600, 700] {
        put_i16(&mut out, v);
    }
    put_u16(&mut out, 0); // macStyle
    put_u16(&mut out, 8); // lowestRecPPEM
    put_i16(&mut out, 2); // fontDirectionHint
    put_i16(&mut out, 1); // indexToLocFormat: long
    put_i16(&mut out, 0); // glyphDataFormat
    out
}

fn hhea() -> Vec<u8> {
    let mut out = Vec::new();
    put_u16(&mut out, 1);
    put_u16(&mut out, 0);
    put_i16(&mut out, 800); // ascender
    put_i16(&mut out, -200); // descender
    put_i16(&mut out, 0); // lineGap
    put_u16(&mut out, 600); // advanceWidthMax
    put_i16(&mut out, 0); // minLeftSideBearing
    put_i16(&mut out, 0); // minRightSideBearing
    put_i16(&mut out, 550); // xMaxExtent
    put_i16(&mut out, 1); // caretSlopeRise
    put_i16(&mut out, 0); // caretSlopeRun
    put_i16(&mut out, 0); // caretOffset
    out.extend_from_slice(&[0; 8]);
    put_i16(&mut out, 0); // metricDataFormat
    put_u16(&mut out, GLYPHS.len() as u16);
    out
}

fn hmtx() -> Vec<u8> {
    let mut out = Vec::new();
    for glyph in &GLYPHS {
        put_u16(&mut out, glyph.advance);
        put_i16(&mut out, glyph.lsb);
    }
    out
}

/// Long vertical metrics for the first two glyphs only.
const LONG_VER_METRICS: usize = 2;

fn vhea() -> Vec<u8> {
    let mut out = Vec::new();
    put_u32(&mut out, 0x0001_0000);
    put_i16(&mut out, 500); // vertTypoAscender
    put_i16(&mut out, -500); // vertTypoDescender
    put_i16(&mut out, 0); // vertTypoLineGap
    put_u16(&mut out, 1000); // advanceHeightMax
    put_i16(&mut out, 0); // minTopSideBearing
    put_i16(&mut out, 0); // minBottomSideBearing
    put_i16(&mut out, 700); // yMaxExtent
    put_i16(&mut out, 0); // caretSlopeRise
    put_i16(&mut out, 1); // caretSlopeRun
    put_i16(&mut out, 0); // caretOffset
    out.extend_from_slice(&[0; 8]);
    put_i16(&mut out, 0); // metricDataFormat
    put_u16(&mut out, LONG_VER_METRICS as u16);
    out
}

fn vmtx() -> Vec<u8> {
    let mut out = Vec::new();
    for glyph in &GLYPHS[..LONG_VER_METRICS] {
        put_u16(&mut out, glyph.v_advance);
        put_i16(&mut out, glyph.tsb);
    }
    for glyph in &GLYPHS[LONG_VER_METRICS..] {
        put_i16(&mut out, glyph.tsb);
    }
    out
}

fn maxp() -> Vec<u8> {
    let mut out = Vec::new();
    put_u32(&mut out, 0x0001_0000);
    put_u16(&mut out, GLYPHS.len() as u16);
    put_u16(&mut out, 4); // maxPoints
    put_u16(&mut out, 1); // maxContours
    put_u16(&mut out, 0); // maxCompositePoints
    put_u16(&mut out, 0); // maxCompositeContours
    put_u16(&mut out, 2); // maxZones
    for _ in 0..8 {
        put_u16(&mut out, 0);
    }
    out
}

/// Table directory followed by 4-byte aligned tables. `tables` must be
/// sorted by tag.
fn font_file(tables: &[(&[u8; 4], Vec<u8>)]) -> Vec<u8> {
    let num_tables = tables.len() as u16;
    let entry_selector = 15 - num_tables.leading_zeros() as u16;
    let search_range = 16 * (1u16 << entry_selector);

    let mut out = Vec::new();
    put_u32(&mut out, 0x0001_0000);
    put_u16(&mut out, num_tables);
    put_u16(&mut out, search_range);
    put_u16(&mut out, entry_selector);
    put_u16(&mut out, num_tables * 16 - search_range);

    let mut offset = 12 + 16 * tables.len() as u32;
    for (tag, data) in tables {
        out.extend_from_slice(*tag);
        put_u32(&mut out, checksum(data));
        put_u32(&mut out, offset);
        put_u32(&mut out, data.len() as u32);
        offset += padded_len(data.len()) as u32;
    }
    for (_, data) in tables {
        out.extend_from_slice(data);
        out.resize(out.len() + padded_len(data.len()) - data.len(), 0);
    }
    out
}

fn padded_len(len: usize) -> usize {
    (len + 3) & !3
}

fn checksum(data: &[u8]) -> u32 {
    data.chunks(4).fold(0u32, |sum, chunk| {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        sum.wrapping_add(u32::from_be_bytes(word))
    })
}

fn put_u16(out: &mut Vec<u8>, v: u16) {
    out.extend_from_slice(&v.to_be_bytes());
}

fn put_i16(out: &mut Vec<u8>, v: i16) {
    out.extend_from_slice(&v.to_be_bytes());
}

fn put_u32(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_be_bytes());
}
