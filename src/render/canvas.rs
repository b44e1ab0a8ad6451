//! Canvas-style backend: an imperative, stateful 2D context.
//!
//! [`CanvasContext`] is the capability set the renderer needs from a host
//! context (`beginPath`/`moveTo`/`lineTo`/`stroke`/`fillText` plus the property
//! setters). Implementors only supply the three drawing primitives; property
//! and transform bookkeeping lives in the shared [`CanvasState`].
//!
//! Properties persist across calls exactly as on a browser canvas, so
//! [`CanvasRenderer`] sets every property it depends on before each draw.

use crate::config::RenderConfig;
use crate::error::{RenderError, Result};
use crate::models::{LineCap, Point, StrokeStyle};
use crate::render::{Renderer, TextAlign, TextBaseline};
use crate::transform::Transform;

/// Property set saved and restored by `save()`/`restore()`.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawState {
    /// Device position of the current user-space origin.
    pub origin: Point,
    pub scale: (f64, f64),
    pub stroke_style: String,
    pub line_width: f64,
    pub line_cap: LineCap,
    pub line_dash: Vec<f64>,
    pub font: String,
    pub fill_style: String,
    pub text_align: TextAlign,
    pub text_baseline: TextBaseline,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            origin: Point::ORIGIN,
            scale: (1.0, 1.0),
            stroke_style: "#000000".to_string(),
            line_width: 1.0,
            line_cap: LineCap::Butt,
            line_dash: Vec::new(),
            font: "10px sans-serif".to_string(),
            fill_style: "#000000".to_string(),
            text_align: TextAlign::Start,
            text_baseline: TextBaseline::Alphabetic,
        }
    }
}

/// Surface size, current properties, the save stack and the current path.
///
/// Path points are stored in device space, resolved against the transform
/// in effect when they were added.
#[derive(Debug, Clone)]
pub struct CanvasState {
    pub width: f64,
    pub height: f64,
    pub current: DrawState,
    stack: Vec<DrawState>,
    path: Vec<Vec<Point>>,
}

impl CanvasState {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            current: DrawState::default(),
            stack: Vec::new(),
            path: Vec::new(),
        }
    }

    /// Map user-space coordinates through the current transform.
    pub fn to_device(&self, x: f64, y: f64) -> Point {
        let s = &self.current;
        Point::new(s.origin.x + x * s.scale.0, s.origin.y + y * s.scale.1)
    }

    /// Multiplier applied to lengths (line widths, dash runs, font sizes).
    pub fn length_scale(&self) -> f64 {
        let (sx, sy) = self.current.scale;
        (sx.abs() * sy.abs()).sqrt()
    }

    pub fn save(&mut self) {
        self.stack.push(self.current.clone());
    }

    /// A `restore()` without a matching `save()` is ignored, as on a canvas.
    pub fn restore(&mut self) {
        if let Some(prev) = self.stack.pop() {
            self.current = prev;
        }
    }

    pub fn translate(&mut self, x: f64, y: f64) {
        self.current.origin = self.to_device(x, y);
    }

    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.current.scale.0 *= sx;
        self.current.scale.1 *= sy;
    }

    pub fn begin_path(&mut self) {
        self.path.clear();
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        let p = self.to_device(x, y);
        self.path.push(vec![p]);
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        let p = self.to_device(x, y);
        match self.path.last_mut() {
            Some(sub) => sub.push(p),
            // lineTo on an empty path behaves like moveTo
            None => self.path.push(vec![p]),
        }
    }

    pub fn subpaths(&self) -> &[Vec<Point>] {
        &self.path
    }

    pub fn save_depth(&self) -> usize {
        self.stack.len()
    }
}

/// Minimal 2D drawing context a host must provide.
pub trait CanvasContext {
    fn state(&self) -> &CanvasState;
    fn state_mut(&mut self) -> &mut CanvasState;

    /// Clear a device-space rectangle (transform is ignored).
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> Result<()>;

    /// Stroke the current path with the current stroke properties.
    fn stroke(&mut self) -> Result<()>;

    /// Fill `text` at user-space `(x, y)` with the current text properties.
    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<()>;

    fn size(&self) -> (f64, f64) {
        let s = self.state();
        (s.width, s.height)
    }

    fn save(&mut self) {
        self.state_mut().save();
    }

    fn restore(&mut self) {
        self.state_mut().restore();
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.state_mut().translate(x, y);
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.state_mut().scale(sx, sy);
    }

    fn begin_path(&mut self) {
        self.state_mut().begin_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.state_mut().move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.state_mut().line_to(x, y);
    }

    fn set_line_dash(&mut self, segments: &[f64]) {
        self.state_mut().current.line_dash = segments.to_vec();
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.state_mut().current.stroke_style = color.to_string();
    }

    fn set_line_width(&mut self, width: f64) {
        self.state_mut().current.line_width = width;
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.state_mut().current.line_cap = cap;
    }

    fn set_font(&mut self, font: &str) {
        self.state_mut().current.font = font.to_string();
    }

    fn set_fill_style(&mut self, color: &str) {
        self.state_mut().current.fill_style = color.to_string();
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.state_mut().current.text_align = align;
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.state_mut().current.text_baseline = baseline;
    }
}

/// Draws onto a [`CanvasContext`]. The transform is applied to the context
/// (translate + scale); y inversion negates `y` before each native call.
pub struct CanvasRenderer<'a, C: CanvasContext + ?Sized> {
    ctx: &'a mut C,
    invert_y: bool,
    font: String,
}

impl<'a, C: CanvasContext + ?Sized> CanvasRenderer<'a, C> {
    pub fn new(ctx: &'a mut C) -> Self {
        Self {
            ctx,
            invert_y: true,
            font: crate::config::DEFAULT_FONT.to_string(),
        }
    }

    pub fn context(&self) -> &C {
        &*self.ctx
    }

    #[inline]
    fn orient(&self, y: f64) -> f64 {
        if self.invert_y { -y } else { y }
    }
}

impl<C: CanvasContext + ?Sized> Renderer for CanvasRenderer<'_, C> {
    fn check_surface(&self) -> Result<()> {
        let (w, h) = self.ctx.size();
        if w > 0.0 && h > 0.0 {
            Ok(())
        } else {
            Err(RenderError::SurfaceUnavailable(format!(
                "canvas has no drawable area ({w}x{h})"
            )))
        }
    }

    fn begin_pass(&mut self, transform: &Transform, config: &RenderConfig) -> Result<()> {
        let (w, h) = self.ctx.size();
        self.ctx.clear_rect(0.0, 0.0, w, h)?;
        self.ctx.save();
        self.ctx.translate(transform.translate.x, transform.translate.y);
        self.ctx.scale(transform.scale, transform.scale);
        self.invert_y = transform.invert_y;
        self.font = config.font.clone();
        Ok(())
    }

    fn draw_line(&mut self, start: Point, end: Point, stroke: &StrokeStyle) -> Result<()> {
        self.ctx.begin_path();
        self.ctx.set_line_dash(stroke.dash.pattern());
        self.ctx.move_to(start.x, self.orient(start.y));
        self.ctx.line_to(end.x, self.orient(end.y));
        self.ctx.set_stroke_style(&stroke.color);
        self.ctx.set_line_width(stroke.width);
        self.ctx.set_line_cap(stroke.cap);
        self.ctx.stroke()
    }

    fn draw_text(&mut self, anchor: Point, text: &str, color: &str) -> Result<()> {
        self.ctx.set_text_align(TextAlign::for_anchor(anchor.x));
        self.ctx
            .set_text_baseline(TextBaseline::for_anchor(anchor.y, self.invert_y));
        self.ctx.set_font(&self.font);
        self.ctx.set_fill_style(color);
        self.ctx.fill_text(text, anchor.x, self.orient(anchor.y))
    }

    fn end_pass(&mut self) -> Result<()> {
        self.ctx.restore();
        Ok(())
    }
}
