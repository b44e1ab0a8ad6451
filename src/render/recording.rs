//! In-memory [`CanvasContext`] that logs every call.
//!
//! Coordinates in the log are device-space (the context transform is already
//! applied), which makes the log directly comparable with SVG output. The
//! log serializes to JSON for the CLI's `.json` output.

use crate::error::Result;
use crate::models::{LineCap, Point};
use crate::render::canvas::{CanvasContext, CanvasState};
use crate::render::{TextAlign, TextBaseline};
use serde::Serialize;

/// One recorded context call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum CanvasOp {
    ClearRect { x: f64, y: f64, w: f64, h: f64 },
    Save,
    Restore,
    Translate { x: f64, y: f64 },
    Scale { x: f64, y: f64 },
    BeginPath,
    SetLineDash { segments: Vec<f64> },
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    SetStrokeStyle { color: String },
    SetLineWidth { width: f64 },
    SetLineCap { cap: LineCap },
    Stroke(StrokeRecord),
    SetTextAlign { align: TextAlign },
    SetTextBaseline { baseline: TextBaseline },
    SetFont { font: String },
    SetFillStyle { color: String },
    FillText(TextRecord),
}

/// Resolved state at the time of a `stroke()`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrokeRecord {
    pub subpaths: Vec<Vec<Point>>,
    pub color: String,
    /// Line width in device pixels.
    pub width: f64,
    pub dash: Vec<f64>,
    pub cap: LineCap,
}

/// Resolved state at the time of a `fillText()`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRecord {
    pub text: String,
    pub at: Point,
    pub color: String,
    pub font: String,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

#[derive(Debug, Clone)]
pub struct RecordingContext {
    state: CanvasState,
    ops: Vec<CanvasOp>,
}

impl RecordingContext {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            state: CanvasState::new(width, height),
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[CanvasOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<CanvasOp> {
        self.ops
    }

    pub fn strokes(&self) -> impl Iterator<Item = &StrokeRecord> {
        self.ops.iter().filter_map(|op| match op {
            CanvasOp::Stroke(s) => Some(s),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextRecord> {
        self.ops.iter().filter_map(|op| match op {
            CanvasOp::FillText(t) => Some(t),
            _ => None,
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.ops)
    }
}

impl CanvasContext for RecordingContext {
    fn state(&self) -> &CanvasState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut CanvasState {
        &mut self.state
    }

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> Result<()> {
        // a full clear forgets everything drawn so far
        if x <= 0.0 && y <= 0.0 && w >= self.state.width && h >= self.state.height {
            self.ops.clear();
        }
        self.ops.push(CanvasOp::ClearRect { x, y, w, h });
        Ok(())
    }

    fn stroke(&mut self) -> Result<()> {
        let scale = self.state.length_scale();
        let cur = &self.state.current;
        let record = StrokeRecord {
            subpaths: self.state.subpaths().to_vec(),
            color: cur.stroke_style.clone(),
            width: cur.line_width * scale,
            dash: cur.line_dash.iter().map(|d| d * scale).collect(),
            cap: cur.line_cap,
        };
        self.ops.push(CanvasOp::Stroke(record));
        Ok(())
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<()> {
        let cur = &self.state.current;
        let record = TextRecord {
            text: text.to_string(),
            at: self.state.to_device(x, y),
            color: cur.fill_style.clone(),
            font: cur.font.clone(),
            align: cur.text_align,
            baseline: cur.text_baseline,
        };
        self.ops.push(CanvasOp::FillText(record));
        Ok(())
    }

    fn save(&mut self) {
        self.state.save();
        self.ops.push(CanvasOp::Save);
    }

    fn restore(&mut self) {
        self.state.restore();
        self.ops.push(CanvasOp::Restore);
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.state.translate(x, y);
        self.ops.push(CanvasOp::Translate { x, y });
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.state.scale(sx, sy);
        self.ops.push(CanvasOp::Scale { x: sx, y: sy });
    }

    fn begin_path(&mut self) {
        self.state.begin_path();
        self.ops.push(CanvasOp::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.state.move_to(x, y);
        let p = self.state.to_device(x, y);
        self.ops.push(CanvasOp::MoveTo { x: p.x, y: p.y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.state.line_to(x, y);
        let p = self.state.to_device(x, y);
        self.ops.push(CanvasOp::LineTo { x: p.x, y: p.y });
    }

    fn set_line_dash(&mut self, segments: &[f64]) {
        self.state.current.line_dash = segments.to_vec();
        self.ops.push(CanvasOp::SetLineDash {
            segments: segments.to_vec(),
        });
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.state.current.stroke_style = color.to_string();
        self.ops.push(CanvasOp::SetStrokeStyle {
            color: color.to_string(),
        });
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.current.line_width = width;
        self.ops.push(CanvasOp::SetLineWidth { width });
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.state.current.line_cap = cap;
        self.ops.push(CanvasOp::SetLineCap { cap });
    }

    fn set_font(&mut self, font: &str) {
        self.state.current.font = font.to_string();
        self.ops.push(CanvasOp::SetFont {
            font: font.to_string(),
        });
    }

    fn set_fill_style(&mut self, color: &str) {
        self.state.current.fill_style = color.to_string();
        self.ops.push(CanvasOp::SetFillStyle {
            color: color.to_string(),
        });
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.state.current.text_align = align;
        self.ops.push(CanvasOp::SetTextAlign { align });
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.state.current.text_baseline = baseline;
        self.ops.push(CanvasOp::SetTextBaseline { baseline });
    }
}
