//! Drawing surfaces for glyph outlines
//!
//! Coordinates are font units with Y pointing up, the way outlines are stored
//! in the font. Whatever displays a drawing is responsible for flipping.

use kurbo::{Line, ParamCurve, ParamCurveArclen, ParamCurveExtrema, Point, QuadBez, Rect};
use serde::Serialize;

/// Accuracy passed to kurbo when measuring curve length for flattening.
const ARCLEN_ACCURACY: f64 = 1e-3;

/// Upper bound on the number of pieces a single quadratic is split into.
const MAX_CURVE_STEPS: usize = 64;

/// The two primitives a glyph pen needs from a drawing surface.
pub trait Canvas {
    /// Draw a straight segment.
    fn line(&mut self, from: Point, to: Point);

    /// Draw a quadratic curve from `from` to `to` bent toward `ctrl`.
    fn qcurve(&mut self, from: Point, ctrl: Point, to: Point);
}

/// One drawn element of a glyph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Segment {
    Line(Line),
    #[serde(rename = "qcurve")]
    Quad(QuadBez),
}

impl Segment {
    pub fn bounding_box(&self) -> Rect {
        match self {
            Segment::Line(line) => line.bounding_box(),
            Segment::Quad(quad) => quad.bounding_box(),
        }
    }

    /// Approximate the segment with straight lines no longer than `step`.
    ///
    /// Lines come back unchanged. Quadratics are sampled at evenly spaced
    /// parameter values; the count grows with arc length.
    pub fn flatten(&self, step: f64) -> Vec<Line> {
        match self {
            Segment::Line(line) => vec![*line],
            Segment::Quad(quad) => {
                let length = quad.arclen(ARCLEN_ACCURACY);
                let steps = if step > 0.0 {
                    ((length / step).ceil() as usize).clamp(1, MAX_CURVE_STEPS)
                } else {
                    MAX_CURVE_STEPS
                };
                let mut lines = Vec::with_capacity(steps);
                let mut prev = quad.p0;
                for i in 1..=steps {
                    let next = if i == steps {
                        quad.p2
                    } else {
                        quad.eval(i as f64 / steps as f64)
                    };
                    lines.push(Line::new(prev, next));
                    prev = next;
                }
                lines
            }
        }
    }

    /// Batch-output representation: `line x1 y1 x2 y2` or
    /// `qcurve x1 y1 cx cy x2 y2`.
    pub fn to_fields(&self) -> Vec<String> {
        match self {
            Segment::Line(line) => {
                let mut fields = vec!["line".to_string()];
                fields.extend(coords(&[line.p0, line.p1]));
                fields
            }
            Segment::Quad(quad) => {
                let mut fields = vec!["qcurve".to_string()];
                fields.extend(coords(&[quad.p0, quad.p1, quad.p2]));
                fields
            }
        }
    }
}

fn coords(points: &[Point]) -> Vec<String> {
    points
        .iter()
        .flat_map(|p| [format_coord(p.x), format_coord(p.y)])
        .collect()
}

/// Outline coordinates are integers in almost every font; print them without
/// a trailing `.0`.
fn format_coord(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// A canvas that remembers everything drawn on it.
#[derive(Debug, Default, Clone)]
pub struct RecordingCanvas {
    segments: Vec<Segment>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn into_drawing(self, name: impl Into<String>) -> GlyphDrawing {
        GlyphDrawing::new(name, self.segments)
    }
}

impl Canvas for RecordingCanvas {
    fn line(&mut self, from: Point, to: Point) {
        self.segments.push(Segment::Line(Line::new(from, to)));
    }

    fn qcurve(&mut self, from: Point, ctrl: Point, to: Point) {
        self.segments.push(Segment::Quad(QuadBez::new(from, ctrl, to)));
    }
}

/// The finished drawing of one glyph.
#[derive(Debug, Clone, Serialize)]
pub struct GlyphDrawing {
    pub name: String,
    pub segments: Vec<Segment>,
    /// Union of all segment bounds; `None` for glyphs with no outline
    /// (space, for instance).
    pub bounds: Option<Rect>,
}

impl GlyphDrawing {
    pub fn new(name: impl Into<String>, segments: Vec<Segment>) -> Self {
        let bounds = segments
            .iter()
            .map(Segment::bounding_box)
            .reduce(|acc, rect| acc.union(rect));
        Self {
            name: name.into(),
            segments,
            bounds,
        }
    }

    pub fn line_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Line(_)))
            .count()
    }

    pub fn curve_count(&self) -> usize {
        self.segments.len() - self.line_count()
    }
}
