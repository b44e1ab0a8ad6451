//! [`CanvasContext`] on top of any plotters [`DrawingBackend`].
//!
//! Lets the canvas renderer target real raster output (`BitMapBackend`, PNG)
//! or plotters' own SVG writer. Usage:
//! ```ignore
//!     use plotters_svg::SVGBackend;
//!     use vecplot::plotters_canvas::PlottersCanvas;
//!     use vecplot::render::{canvas::CanvasRenderer, render};
//!
//!     let mut buf = String::new();
//!     {
//!         let mut canvas = PlottersCanvas::new(SVGBackend::with_string(&mut buf, (300, 300)));
//!         render(&mut CanvasRenderer::new(&mut canvas), &vectors, &transform, &config)?;
//!         canvas.present()?;
//!     }
//! ```
//!
//! Plotters has no line caps, so `lineCap` is tracked but not drawn. Dash
//! patterns are emulated by splitting each subpath into its "on" runs.
//! Bitmap text needs a registered font (see [`register_font_file`]); the SVG
//! backend writes `<text>` elements and needs none.

use crate::color::parse_css_color;
use crate::config::FontSpec;
use crate::error::{RenderError, Result};
use crate::models::Point;
use crate::render::canvas::{CanvasContext, CanvasState};
use crate::render::{TextAlign, TextBaseline};
use anyhow::{Context, anyhow};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

pub struct PlottersCanvas<DB: DrawingBackend> {
    area: DrawingArea<DB, Shift>,
    state: CanvasState,
}

impl<DB: DrawingBackend> PlottersCanvas<DB> {
    pub fn new(backend: DB) -> Self {
        let area = backend.into_drawing_area();
        let (w, h) = area.dim_in_pixel();
        Self {
            area,
            state: CanvasState::new(w as f64, h as f64),
        }
    }

    /// Flush pending output to the backend's target.
    pub fn present(&self) -> Result<()> {
        self.area.present().map_err(backend_err)
    }
}

fn backend_err<E: std::fmt::Debug>(e: E) -> RenderError {
    RenderError::Backend(format!("{e:?}"))
}

/// Resolve a CSS color, falling back to black for forms we cannot parse.
pub fn rgb_color(css: &str) -> RGBColor {
    match parse_css_color(css) {
        Some(c) => RGBColor(c.r, c.g, c.b),
        None => {
            log::warn!("unsupported color `{css}`, drawing in black");
            BLACK
        }
    }
}

fn to_backend(p: Point) -> (i32, i32) {
    (p.x.round() as i32, p.y.round() as i32)
}

fn lerp(a: Point, b: Point, t: f64) -> Point {
    Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
}

/// Split a polyline into the visible runs of an on/off dash pattern.
///
/// Odd-length patterns repeat once, as `setLineDash` does. An empty,
/// all-zero or invalid pattern yields the polyline unchanged.
pub fn dash_runs(points: &[Point], pattern: &[f64]) -> Vec<Vec<Point>> {
    let valid = pattern.iter().all(|d| d.is_finite() && *d >= 0.0);
    if points.len() < 2 || !valid || pattern.iter().sum::<f64>() <= 0.0 {
        return vec![points.to_vec()];
    }
    let pattern: Vec<f64> = if pattern.len() % 2 == 1 {
        pattern.repeat(2)
    } else {
        pattern.to_vec()
    };

    let mut runs = Vec::new();
    let mut idx = 0;
    let mut left = pattern[0];
    let mut on = true;
    let mut current = vec![points[0]];

    for seg in points.windows(2) {
        let (a, b) = (seg[0], seg[1]);
        let len = Point::distance(a, b);
        let mut t = 0.0;
        while len - t > left {
            t += left;
            let p = lerp(a, b, t / len);
            if on {
                current.push(p);
                runs.push(std::mem::take(&mut current));
            } else {
                current = vec![p];
            }
            on = !on;
            idx = (idx + 1) % pattern.len();
            left = pattern[idx];
        }
        left -= len - t;
        if on {
            current.push(b);
        }
    }
    if on && current.len() >= 2 {
        runs.push(current);
    }
    runs
}

impl<DB: DrawingBackend> CanvasContext for PlottersCanvas<DB> {
    fn state(&self) -> &CanvasState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut CanvasState {
        &mut self.state
    }

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> Result<()> {
        if x <= 0.0 && y <= 0.0 && w >= self.state.width && h >= self.state.height {
            return self.area.fill(&WHITE).map_err(backend_err);
        }
        let rect = Rectangle::new(
            [
                to_backend(Point::new(x, y)),
                to_backend(Point::new(x + w, y + h)),
            ],
            WHITE.filled(),
        );
        self.area.draw(&rect).map_err(backend_err)
    }

    fn stroke(&mut self) -> Result<()> {
        let scale = self.state.length_scale();
        let cur = &self.state.current;
        let color = rgb_color(&cur.stroke_style);
        let width = (cur.line_width * scale).round().max(1.0) as u32;
        let dash: Vec<f64> = cur.line_dash.iter().map(|d| d * scale).collect();
        let style = color.stroke_width(width);

        for sub in self.state.subpaths() {
            for run in dash_runs(sub, &dash) {
                let pts: Vec<(i32, i32)> = run.into_iter().map(to_backend).collect();
                self.area
                    .draw(&PathElement::new(pts, style))
                    .map_err(backend_err)?;
            }
        }
        Ok(())
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<()> {
        let at = self.state.to_device(x, y);
        let cur = &self.state.current;
        let font = FontSpec::parse(&cur.font)?;
        let size = font.size_px * self.state.length_scale();
        let h = match cur.text_align {
            TextAlign::Right => HPos::Right,
            TextAlign::Left | TextAlign::Start => HPos::Left,
        };
        let v = match cur.text_baseline {
            TextBaseline::Top => VPos::Top,
            TextBaseline::Bottom | TextBaseline::Alphabetic => VPos::Bottom,
        };
        let color = rgb_color(&cur.fill_style);
        let style = (font.family.as_str(), size)
            .into_font()
            .color(&color)
            .pos(Pos::new(h, v));
        self.area
            .draw_text(text, &style, to_backend(at))
            .map_err(backend_err)
    }
}

/// Register a TrueType/OpenType font file for bitmap text under `family`.
///
/// `ab_glyph` does not discover OS fonts, so PNG output with labels needs this.
pub fn register_font_file<P: AsRef<Path>>(family: &str, path: P) -> anyhow::Result<()> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .with_context(|| format!("reading font file {}", path.display()))?;
    // plotters keeps a &'static reference for the lifetime of the process
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    plotters::style::register_font(family, plotters::style::FontStyle::Normal, bytes)
        .map_err(|_| anyhow!("invalid font file {}", path.display()))
}
