//! Pointer input from the host UI. Observed and logged only.

use crate::models::Point;
use crate::transform::Transform;
use serde::{Deserialize, Serialize};

/// A pointer-down event in device coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub button: u16,
}

/// Log a pointer-down event with its logical position and return that position.
pub fn on_pointer_down(event: &PointerEvent, transform: &Transform) -> Point {
    let logical = transform.to_logical(Point::new(event.x, event.y));
    log::info!(
        "pointer down: button={} device=({}, {}) logical=({:.2}, {:.2})",
        event.button,
        event.x,
        event.y,
        logical.x,
        logical.y
    );
    logical
}
