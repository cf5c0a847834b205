//! Pen adapter from outline callbacks to canvas primitives
//!
//! The pen only tracks two things: where it currently is, and where the
//! current subpath started so that `close_path` can draw the closing edge.
//! Quadratic curves are handed to the canvas as-is. Cubic curves are not
//! supported and fail the render.

use kurbo::Point;
use skrifa::outline::OutlinePen;
use thiserror::Error;

use super::Canvas;

/// Reasons a glyph outline cannot be drawn by [`GlyphPen`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OutlineError {
    /// The outline contains a cubic bezier segment (CFF/CFF2 outlines).
    #[error("not implemented: cubic curves")]
    CubicUnsupported,
}

/// Turns move/line/curve/close/end callbacks into canvas segments.
pub struct GlyphPen<'c, C: Canvas + ?Sized> {
    canvas: &'c mut C,
    /// Current pen position.
    last: Option<Point>,
    /// First point of the current subpath.
    path_start: Option<Point>,
    /// First error hit; later events are ignored once set.
    error: Option<OutlineError>,
}

impl<'c, C: Canvas + ?Sized> GlyphPen<'c, C> {
    pub fn new(canvas: &'c mut C) -> Self {
        Self {
            canvas,
            last: None,
            path_start: None,
            error: None,
        }
    }

    pub fn current_point(&self) -> Option<Point> {
        self.last
    }

    pub fn subpath_start(&self) -> Option<Point> {
        self.path_start
    }

    pub fn error(&self) -> Option<OutlineError> {
        self.error
    }

    pub fn move_to(&mut self, to: Point) {
        if self.error.is_some() {
            return;
        }
        self.last = Some(to);
        if self.path_start.is_none() {
            self.path_start = Some(to);
        }
    }

    pub fn line_to(&mut self, to: Point) {
        if self.error.is_some() {
            return;
        }
        match self.last {
            Some(from) => self.canvas.line(from, to),
            None => tracing::debug!("line_to without a current point; treating as move"),
        }
        self.move_to(to);
    }

    pub fn qcurve_to(&mut self, ctrl: Point, to: Point) {
        if self.error.is_some() {
            return;
        }
        match self.last {
            Some(from) => self.canvas.qcurve(from, ctrl, to),
            None => tracing::debug!("qcurve_to without a current point; treating as move"),
        }
        self.move_to(to);
    }

    /// Always fails; the error also latches so the rest of the outline is
    /// skipped.
    pub fn curve_to(&mut self, _ctrl0: Point, _ctrl1: Point, _to: Point) -> Result<(), OutlineError> {
        let err = OutlineError::CubicUnsupported;
        if self.error.is_none() {
            self.error = Some(err);
        }
        Err(err)
    }

    pub fn close_path(&mut self) {
        if self.error.is_some() {
            return;
        }
        if let (Some(start), Some(last)) = (self.path_start, self.last) {
            if start != last {
                self.canvas.line(last, start);
            }
        }
        self.path_start = None;
        self.last = None;
    }

    pub fn end_path(&mut self) {
        self.path_start = None;
        self.last = None;
    }

    /// Finish the outline: end any open subpath and report the first error.
    pub fn finish(mut self) -> Result<(), OutlineError> {
        self.end_path();
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl<C: Canvas + ?Sized> OutlinePen for GlyphPen<'_, C> {
    fn move_to(&mut self, x: f32, y: f32) {
        GlyphPen::move_to(self, point(x, y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        GlyphPen::line_to(self, point(x, y));
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.qcurve_to(point(cx0, cy0), point(x, y));
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        // Latched in `self.error`; surfaced by `finish`.
        let _ = GlyphPen::curve_to(self, point(cx0, cy0), point(cx1, cy1), point(x, y));
    }

    fn close(&mut self) {
        self.close_path();
    }
}

fn point(x: f32, y: f32) -> Point {
    Point::new(x as f64, y as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::{RecordingCanvas, Segment};
    use kurbo::{Line, QuadBez};

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_closed_subpath_at_start_adds_no_segment() {
        let mut canvas = RecordingCanvas::new();
        let mut pen = GlyphPen::new(&mut canvas);
        pen.move_to(p(0.0, 0.0));
        pen.line_to(p(100.0, 0.0));
        pen.line_to(p(100.0, 100.0));
        pen.line_to(p(0.0, 0.0));
        pen.close_path();
        pen.finish().unwrap();

        assert_eq!(canvas.segments().len(), 3);
    }

    #[test]
    fn test_open_subpath_gets_one_closing_segment() {
        let mut canvas = RecordingCanvas::new();
        let mut pen = GlyphPen::new(&mut canvas);
        pen.move_to(p(0.0, 0.0));
        pen.line_to(p(100.0, 0.0));
        pen.line_to(p(100.0, 100.0));
        pen.close_path();
        pen.finish().unwrap();

        let segments = canvas.segments();
        assert_eq!(segments.len(), 3);
        assert_eq!(
            segments[2],
            Segment::Line(Line::new(p(100.0, 100.0), p(0.0, 0.0)))
        );
    }

    #[test]
    fn test_close_clears_state() {
        let mut canvas = RecordingCanvas::new();
        let mut pen = GlyphPen::new(&mut canvas);
        pen.move_to(p(0.0, 0.0));
        pen.line_to(p(10.0, 0.0));
        pen.close_path();

        assert_eq!(pen.current_point(), None);
        assert_eq!(pen.subpath_start(), None);
    }

    #[test]
    fn test_end_path_clears_without_emitting() {
        let mut canvas = RecordingCanvas::new();
        let mut pen = GlyphPen::new(&mut canvas);
        pen.move_to(p(0.0, 0.0));
        pen.line_to(p(50.0, 0.0));
        pen.line_to(p(50.0, 50.0));
        pen.end_path();

        assert_eq!(pen.current_point(), None);
        assert_eq!(pen.subpath_start(), None);
        pen.finish().unwrap();
        assert_eq!(canvas.segments().len(), 2);
    }

    #[test]
    fn test_move_after_close_starts_new_subpath() {
        let mut canvas = RecordingCanvas::new();
        let mut pen = GlyphPen::new(&mut canvas);
        pen.move_to(p(0.0, 0.0));
        pen.line_to(p(10.0, 0.0));
        pen.line_to(p(10.0, 10.0));
        pen.close_path();

        pen.move_to(p(200.0, 200.0));
        assert_eq!(pen.subpath_start(), Some(p(200.0, 200.0)));
        pen.line_to(p(300.0, 200.0));
        pen.close_path();
        pen.finish().unwrap();

        let segments = canvas.segments();
        assert_eq!(segments.len(), 5);
        assert_eq!(
            segments[4],
            Segment::Line(Line::new(p(300.0, 200.0), p(200.0, 200.0)))
        );
    }

    #[test]
    fn test_move_after_end_starts_new_subpath() {
        let mut canvas = RecordingCanvas::new();
        let mut pen = GlyphPen::new(&mut canvas);
        pen.move_to(p(0.0, 0.0));
        pen.line_to(p(10.0, 0.0));
        pen.end_path();
        pen.move_to(p(5.0, 5.0));

        assert_eq!(pen.subpath_start(), Some(p(5.0, 5.0)));
        assert_eq!(pen.current_point(), Some(p(5.0, 5.0)));
    }

    #[test]
    fn test_second_move_keeps_subpath_start() {
        let mut canvas = RecordingCanvas::new();
        let mut pen = GlyphPen::new(&mut canvas);
        pen.move_to(p(0.0, 0.0));
        pen.move_to(p(10.0, 10.0));

        assert_eq!(pen.subpath_start(), Some(p(0.0, 0.0)));
        assert_eq!(pen.current_point(), Some(p(10.0, 10.0)));
    }

    #[test]
    fn test_cubic_always_fails() {
        let mut canvas = RecordingCanvas::new();
        let mut pen = GlyphPen::new(&mut canvas);
        assert_eq!(
            pen.curve_to(p(0.0, 0.0), p(1.0, 1.0), p(2.0, 0.0)),
            Err(OutlineError::CubicUnsupported)
        );

        pen.move_to(p(0.0, 0.0));
        pen.line_to(p(10.0, 0.0));
        assert_eq!(
            pen.curve_to(p(10.0, 5.0), p(5.0, 10.0), p(0.0, 10.0)),
            Err(OutlineError::CubicUnsupported)
        );
        assert_eq!(pen.finish(), Err(OutlineError::CubicUnsupported));
    }

    #[test]
    fn test_events_after_cubic_are_ignored() {
        let mut canvas = RecordingCanvas::new();
        let mut pen = GlyphPen::new(&mut canvas);
        pen.move_to(p(0.0, 0.0));
        OutlinePen::curve_to(&mut pen, 1.0, 1.0, 2.0, 2.0, 3.0, 0.0);
        pen.line_to(p(10.0, 0.0));
        pen.close_path();

        assert_eq!(pen.finish(), Err(OutlineError::CubicUnsupported));
        assert!(canvas.is_empty());
    }

    #[test]
    fn test_quad_emits_one_curve_and_advances() {
        let mut canvas = RecordingCanvas::new();
        let mut pen = GlyphPen::new(&mut canvas);
        pen.move_to(p(0.0, 0.0));
        pen.qcurve_to(p(50.0, 100.0), p(100.0, 0.0));

        assert_eq!(pen.current_point(), Some(p(100.0, 0.0)));
        pen.finish().unwrap();
        assert_eq!(
            canvas.segments(),
            &[Segment::Quad(QuadBez::new(
                p(0.0, 0.0),
                p(50.0, 100.0),
                p(100.0, 0.0)
            ))]
        );
    }

    #[test]
    fn test_line_without_current_point_moves() {
        let mut canvas = RecordingCanvas::new();
        let mut pen = GlyphPen::new(&mut canvas);
        pen.line_to(p(10.0, 10.0));

        assert_eq!(pen.current_point(), Some(p(10.0, 10.0)));
        assert_eq!(pen.subpath_start(), Some(p(10.0, 10.0)));
        pen.finish().unwrap();
        assert!(canvas.is_empty());
    }

    #[test]
    fn test_drives_through_outline_pen_trait() {
        let mut canvas = RecordingCanvas::new();
        let mut pen = GlyphPen::new(&mut canvas);
        {
            let sink: &mut dyn OutlinePen = &mut pen;
            sink.move_to(0.0, 0.0);
            sink.quad_to(50.0, 100.0, 100.0, 0.0);
            sink.close();
        }
        pen.finish().unwrap();

        let segments = canvas.segments();
        assert_eq!(segments.len(), 2);
        assert!(matches!(segments[0], Segment::Quad(_)));
        assert_eq!(
            segments[1],
            Segment::Line(Line::new(p(100.0, 0.0), p(0.0, 0.0)))
        );
    }
}
