//! Logical → device coordinate mapping.

use crate::error::{RenderError, Result};
use crate::models::Point;
use serde::{Deserialize, Serialize};

fn default_scale() -> f64 {
    1.0
}

fn default_invert_y() -> bool {
    true
}

/// Translate + uniform scale + optional y inversion.
///
/// `translate` is the device position of the logical origin. It doubles as
/// the visible half-extent used for axes and ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub translate: Point,
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default = "default_invert_y")]
    pub invert_y: bool,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translate: Point::ORIGIN,
            scale: 1.0,
            invert_y: true,
        }
    }
}

impl Transform {
    pub fn new(translate: Point, scale: f64) -> Self {
        Self {
            translate,
            scale,
            invert_y: true,
        }
    }

    /// Origin at the center of a `width` x `height` surface, unit scale.
    pub fn centered(width: f64, height: f64) -> Self {
        Self::new(Point::new(width / 2.0, height / 2.0), 1.0)
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_invert_y(mut self, invert_y: bool) -> Self {
        self.invert_y = invert_y;
        self
    }

    /// Flip `y` into the surface's downward-growing convention when inverted.
    #[inline]
    pub fn orient_y(&self, y: f64) -> f64 {
        if self.invert_y { -y } else { y }
    }

    /// Map a logical point to device coordinates.
    pub fn apply(&self, p: Point) -> Point {
        Point {
            x: self.translate.x + p.x * self.scale,
            y: self.translate.y + self.orient_y(p.y) * self.scale,
        }
    }

    /// Inverse of [`Transform::apply`].
    pub fn to_logical(&self, device: Point) -> Point {
        Point {
            x: (device.x - self.translate.x) / self.scale,
            y: self.orient_y((device.y - self.translate.y) / self.scale),
        }
    }

    pub fn half_extent(&self) -> Point {
        self.translate
    }

    pub fn validate(&self) -> Result<()> {
        if !self.translate.is_finite() {
            return Err(RenderError::InvalidTransform(
                "translation is not finite".into(),
            ));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(RenderError::InvalidTransform(format!(
                "scale must be a finite positive number, got {}",
                self.scale
            )));
        }
        Ok(())
    }
}
