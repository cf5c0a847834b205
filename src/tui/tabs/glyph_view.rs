//! Glyph outline drawn on a terminal canvas
//!
//! The canvas uses font units directly. ratatui's canvas already has y
//! pointing up, so outlines are drawn without flipping.

use std::str::FromStr;

use kurbo::Rect;
use ratatui::{
    layout::Rect as Area,
    style::{Color, Style},
    symbols::Marker,
    text::Span,
    widgets::{
        canvas::{Canvas, Line as CanvasLine},
        Block, Borders,
    },
    Frame,
};

use crate::core::config_file::GlyphMarker;
use crate::core::settings::{Settings, DEFAULT_GLYPH_COLOR};
use crate::font_source::GlyphRecord;
use crate::outline::GlyphDrawing;

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f64 = 2.0;

/// Space left around the glyph, as a fraction of its larger side.
const MARGIN: f64 = 0.05;

/// Shown when a glyph has no outline, in font units.
const EMPTY_EXTENT: f64 = 1000.0;

/// A rendered glyph on the sheet stack.
#[derive(Debug, Clone)]
pub struct GlyphView {
    pub name: String,
    pub glyph: GlyphRecord,
    pub drawing: GlyphDrawing,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphStyle {
    pub color: Color,
    pub marker: Marker,
    /// Screen width of one horizontal font unit relative to a vertical one.
    pub aspect_ratio: f64,
}

impl GlyphStyle {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            color: parse_color(&settings.glyph_color),
            marker: marker_for(settings.glyph_marker),
            aspect_ratio: settings.aspect_ratio,
        }
    }
}

impl Default for GlyphStyle {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

pub fn marker_for(marker: GlyphMarker) -> Marker {
    match marker {
        GlyphMarker::Braille => Marker::Braille,
        GlyphMarker::Dot => Marker::Dot,
        GlyphMarker::Block => Marker::Block,
        GlyphMarker::HalfBlock => Marker::HalfBlock,
    }
}

/// Color names or `#rrggbb`; unknown values fall back to the default color.
pub fn parse_color(name: &str) -> Color {
    Color::from_str(name).unwrap_or_else(|_| {
        tracing::warn!("Unknown glyph color '{name}', using {DEFAULT_GLYPH_COLOR}");
        Color::Cyan
    })
}

/// Canvas x and y bounds that show all of `bounds` in a `cols` × `rows`
/// cell area, centered, keeping one font unit `aspect_ratio` times as wide as
/// it is tall.
pub fn fit_bounds(bounds: Rect, cols: u16, rows: u16, aspect_ratio: f64) -> ([f64; 2], [f64; 2]) {
    let pad = MARGIN * bounds.width().max(bounds.height());
    let padded = bounds.inflate(pad, pad);
    if cols == 0 || rows == 0 {
        return ([padded.x0, padded.x1], [padded.y0, padded.y1]);
    }

    // Physical size in cell widths.
    let phys_w = cols as f64;
    let phys_h = rows as f64 * CELL_ASPECT;
    let width = padded.width().max(1.0);
    let height = padded.height().max(1.0);

    // Font units per physical unit, vertically.
    let scale = (width * aspect_ratio / phys_w).max(height / phys_h);
    let x_span = phys_w * scale / aspect_ratio;
    let y_span = phys_h * scale;

    let center = padded.center();
    (
        [center.x - x_span / 2.0, center.x + x_span / 2.0],
        [center.y - y_span / 2.0, center.y + y_span / 2.0],
    )
}

pub fn draw(f: &mut Frame, view: &GlyphView, style: &GlyphStyle, area: Area) {
    let title = match view.glyph.width {
        Some(width) => format!("{} (advance {})", view.name, width),
        None => view.name.clone(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title, Style::default().fg(Color::Green)));
    let inner = block.inner(area);

    let bounds = view
        .drawing
        .bounds
        .unwrap_or_else(|| Rect::new(0.0, 0.0, EMPTY_EXTENT, EMPTY_EXTENT));
    let (x_bounds, y_bounds) = fit_bounds(bounds, inner.width, inner.height, style.aspect_ratio);

    // Roughly two dots per step at braille resolution.
    let step = (y_bounds[1] - y_bounds[0]) / (inner.height.max(1) as f64 * 2.0);
    let lines: Vec<kurbo::Line> = view
        .drawing
        .segments
        .iter()
        .flat_map(|segment| segment.flatten(step))
        .collect();
    let advance = view.glyph.width.map(f64::from);

    let canvas = Canvas::default()
        .block(block)
        .marker(style.marker)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(move |ctx| {
            // Baseline and advance.
            ctx.draw(&CanvasLine {
                x1: x_bounds[0],
                y1: 0.0,
                x2: x_bounds[1],
                y2: 0.0,
                color: Color::DarkGray,
            });
            if let Some(advance) = advance {
                for x in [0.0, advance] {
                    ctx.draw(&CanvasLine {
                        x1: x,
                        y1: y_bounds[0],
                        x2: x,
                        y2: y_bounds[1],
                        color: Color::DarkGray,
                    });
                }
            }
            ctx.layer();
            for line in &lines {
                ctx.draw(&CanvasLine {
                    x1: line.p0.x,
                    y1: line.p0.y,
                    x2: line.p1.x,
                    y2: line.p1.y,
                    color: style.color,
                });
            }
        });

    f.render_widget(canvas, area);
}
