//! Axis lines and evenly spaced tick marks.

use crate::config::AxisExtent;
use crate::models::Point;
use crate::transform::Transform;
use serde::{Deserialize, Serialize};

/// Tick marks run from `-TICK_LENGTH` to 0 across the axis.
pub const TICK_LENGTH: f64 = 1.0;
/// Tick labels sit this far outside the axis line.
pub const LABEL_OFFSET: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

/// One tick: a short perpendicular mark and its numeric label, in logical space.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub axis: Axis,
    pub value: f64,
    pub mark: (Point, Point),
    pub label_anchor: Point,
    pub label: String,
}

impl Tick {
    fn new(axis: Axis, value: f64) -> Self {
        let (mark, label_anchor) = match axis {
            Axis::X => (
                (Point::new(value, -TICK_LENGTH), Point::new(value, 0.0)),
                Point::new(value, -LABEL_OFFSET),
            ),
            Axis::Y => (
                (Point::new(-TICK_LENGTH, value), Point::new(0.0, value)),
                Point::new(-LABEL_OFFSET, value),
            ),
        };
        Self {
            axis,
            value,
            mark,
            label_anchor,
            label: format_tick_label(value),
        }
    }
}

/// Multiples of `step` in `[-half_extent, half_extent)`, zero excluded.
pub fn tick_values(half_extent: f64, step: f64) -> Vec<f64> {
    if !(half_extent > 0.0 && step > 0.0) || !half_extent.is_finite() || !step.is_finite() {
        return Vec::new();
    }
    let first = (-half_extent / step).ceil() as i64;
    (first..)
        .map(|k| (k, k as f64 * step))
        .take_while(|(_, v)| *v < half_extent)
        .filter(|(k, _)| *k != 0)
        .map(|(_, v)| v)
        .collect()
}

/// All ticks for both axes: x ticks first, then y ticks.
pub fn ticks(half_extent: Point, step: f64) -> Vec<Tick> {
    let xs = tick_values(half_extent.x, step)
        .into_iter()
        .map(|v| Tick::new(Axis::X, v));
    let ys = tick_values(half_extent.y, step)
        .into_iter()
        .map(|v| Tick::new(Axis::Y, v));
    xs.chain(ys).collect()
}

/// Endpoints of the x and y reference lines, in logical space.
pub fn axis_lines(transform: &Transform, extent: AxisExtent) -> [(Point, Point); 2] {
    let h = transform.half_extent();
    match extent {
        AxisExtent::Viewport => [
            (Point::new(-h.x, 0.0), Point::new(h.x, 0.0)),
            (Point::new(0.0, -h.y), Point::new(0.0, h.y)),
        ],
        AxisExtent::Overscan => {
            let t = transform.translate;
            let at = |x, y| transform.to_logical(Point::new(x, y));
            [
                (at(-t.x, t.y), at(2.0 * t.x, t.y)),
                (at(t.x, -t.y), at(t.x, 2.0 * t.y)),
            ]
        }
    }
}

/// Whole numbers print without a fractional part.
pub fn format_tick_label(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
