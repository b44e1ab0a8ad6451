//! Render options shared by all backends.

use crate::error::{RenderError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Tick spacing in logical units.
pub const DEFAULT_TICK_STEP: f64 = 25.0;
pub const DEFAULT_AXIS_COLOR: &str = "gray";
pub const DEFAULT_FONT: &str = "13px sans-serif";

/// How far the two reference axis lines reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisExtent {
    /// From `-half` to `+half` logical units on each axis: exactly the visible area
    /// when scale is 1.
    #[default]
    Viewport,
    /// From `-translate` to `2 * translate` in device space on each axis.
    Overscan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub tick_step: f64,
    pub axis_color: String,
    /// CSS-style font shorthand, `"<size>px <family>"`.
    pub font: String,
    pub axis_extent: AxisExtent,
    /// Keys whose line is drawn but whose label is not.
    pub label_exclusions: BTreeSet<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            tick_step: DEFAULT_TICK_STEP,
            axis_color: DEFAULT_AXIS_COLOR.to_string(),
            font: DEFAULT_FONT.to_string(),
            axis_extent: AxisExtent::default(),
            label_exclusions: BTreeSet::new(),
        }
    }
}

impl RenderConfig {
    pub fn with_tick_step(mut self, step: f64) -> Self {
        self.tick_step = step;
        self
    }

    pub fn with_axis_extent(mut self, extent: AxisExtent) -> Self {
        self.axis_extent = extent;
        self
    }

    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = font.into();
        self
    }

    pub fn exclude_labels<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.label_exclusions
            .extend(keys.into_iter().map(Into::into));
        self
    }

    pub fn suppresses_label(&self, key: &str) -> bool {
        self.label_exclusions.contains(key)
    }

    pub fn font_spec(&self) -> Result<FontSpec> {
        FontSpec::parse(&self.font)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.tick_step.is_finite() || self.tick_step <= 0.0 {
            return Err(RenderError::InvalidConfig(format!(
                "tick_step must be a finite positive number, got {}",
                self.tick_step
            )));
        }
        if self.axis_color.trim().is_empty() {
            return Err(RenderError::InvalidConfig("axis_color is empty".into()));
        }
        self.font_spec()?;
        Ok(())
    }
}

/// Parsed `"<size>px <family>"` font shorthand.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub size_px: f64,
    pub family: String,
}

impl FontSpec {
    pub fn parse(font: &str) -> Result<Self> {
        let bad = || RenderError::InvalidConfig(format!("unsupported font `{font}`"));
        let (size, family) = font.trim().split_once(char::is_whitespace).ok_or_else(bad)?;
        let size_px = size
            .strip_suffix("px")
            .and_then(|n| n.parse::<f64>().ok())
            .filter(|n| n.is_finite() && *n > 0.0)
            .ok_or_else(bad)?;
        let family = family.trim();
        if family.is_empty() {
            return Err(bad());
        }
        Ok(Self {
            size_px,
            family: family.to_string(),
        })
    }
}
