//! Render pass orchestration shared by the canvas and SVG backends.
//!
//! A pass runs in a fixed order:
//! 1. check that the surface exists,
//! 2. validate the transform, config and every vector,
//! 3. clear the surface and apply the transform,
//! 4. draw axis lines and ticks,
//! 5. draw each vector's line and (unless excluded) its label, in collection order.
//!
//! Nothing is drawn before step 3, so invalid input leaves the previous frame untouched.

pub mod canvas;
pub mod recording;
pub mod svg;

use crate::config::RenderConfig;
use crate::error::{RenderError, Result};
use crate::models::{Point, StrokeStyle, Vector, VectorCollection};
use crate::ticks::{axis_lines, ticks};
use crate::transform::Transform;
use serde::{Deserialize, Serialize};

/// Horizontal text alignment relative to the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Start,
    Left,
    Right,
}

impl TextAlign {
    /// Labels right of the y axis grow rightward, all others leftward.
    pub fn for_anchor(x: f64) -> Self {
        if x > 0.0 { TextAlign::Left } else { TextAlign::Right }
    }
}

/// Vertical text alignment relative to the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextBaseline {
    #[default]
    Alphabetic,
    Top,
    Bottom,
}

impl TextBaseline {
    /// Labels sit on the side of their anchor away from the x axis.
    pub fn for_anchor(y: f64, invert_y: bool) -> Self {
        match (invert_y, y > 0.0) {
            (true, true) => TextBaseline::Bottom,
            (true, false) => TextBaseline::Top,
            (false, true) => TextBaseline::Top,
            (false, false) => TextBaseline::Bottom,
        }
    }
}

/// One drawing backend. Coordinates passed in are logical.
pub trait Renderer {
    /// Fail with [`RenderError::SurfaceUnavailable`](crate::error::RenderError::SurfaceUnavailable) when there is nothing to draw on.
    fn check_surface(&self) -> Result<()>;

    /// Clear the surface and set up `transform` for the following calls.
    fn begin_pass(&mut self, transform: &Transform, config: &RenderConfig) -> Result<()>;

    fn draw_line(&mut self, start: Point, end: Point, stroke: &StrokeStyle) -> Result<()>;

    /// Draw `text` at `anchor`, aligned by the anchor's quadrant.
    fn draw_text(&mut self, anchor: Point, text: &str, color: &str) -> Result<()>;

    fn end_pass(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Upper bound on ticks generated along one axis.
pub const MAX_TICKS_PER_AXIS: usize = 10_000;

/// Validate everything a pass needs before touching the surface.
pub fn validate(
    collection: &VectorCollection,
    transform: &Transform,
    config: &RenderConfig,
) -> Result<()> {
    transform.validate()?;
    config.validate()?;
    let half = transform.half_extent();
    let per_axis = 2.0 * half.x.abs().max(half.y.abs()) / config.tick_step;
    if per_axis > MAX_TICKS_PER_AXIS as f64 {
        return Err(RenderError::InvalidConfig(format!(
            "tick_step {} yields about {per_axis:.0} ticks per axis (limit {MAX_TICKS_PER_AXIS})",
            config.tick_step
        )));
    }
    for (key, vector) in collection {
        vector.validate(key)?;
    }
    Ok(())
}

/// Draw both reference axes and their ticks in the configured axis color.
pub fn draw_axis<R: Renderer + ?Sized>(
    renderer: &mut R,
    transform: &Transform,
    config: &RenderConfig,
) -> Result<()> {
    let stroke = StrokeStyle::axis(&config.axis_color);
    for (start, end) in axis_lines(transform, config.axis_extent) {
        renderer.draw_line(start, end, &stroke)?;
    }
    for tick in ticks(transform.half_extent(), config.tick_step) {
        renderer.draw_line(tick.mark.0, tick.mark.1, &stroke)?;
        renderer.draw_text(tick.label_anchor, &tick.label, &config.axis_color)?;
    }
    Ok(())
}

/// Draw one vector: its line, then its label unless `key` is excluded.
pub fn draw_vector<R: Renderer + ?Sized>(
    renderer: &mut R,
    key: &str,
    vector: &Vector,
    config: &RenderConfig,
) -> Result<()> {
    renderer.draw_line(vector.start, vector.end, &vector.stroke())?;
    if !config.suppresses_label(key) {
        renderer.draw_text(vector.end, &vector.label, &vector.color)?;
    }
    Ok(())
}

/// Run a full render pass of `collection` onto `renderer`.
pub fn render<R: Renderer + ?Sized>(
    renderer: &mut R,
    collection: &VectorCollection,
    transform: &Transform,
    config: &RenderConfig,
) -> Result<()> {
    renderer.check_surface()?;
    validate(collection, transform, config)?;

    log::debug!(
        "render pass: {} vectors, translate=({}, {}), scale={}, invert_y={}",
        collection.len(),
        transform.translate.x,
        transform.translate.y,
        transform.scale,
        transform.invert_y
    );

    renderer.begin_pass(transform, config)?;
    // end_pass must run even when drawing fails, or the context keeps the pass transform
    let drawn = draw_axis(renderer, transform, config).and_then(|_| {
        collection
            .iter()
            .try_for_each(|(key, vector)| draw_vector(renderer, key, vector, config))
    });
    let ended = renderer.end_pass();
    drawn.and(ended)
}

