use crate::error::{RenderError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A 2D coordinate in logical (pre-transform) space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance between two points.
    pub fn distance(a: Point, b: Point) -> f64 {
        (a.x - b.x).hypot(a.y - b.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Named on/off stroke patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DashStyle {
    #[default]
    Solid,
    Dotted,
    Dashed,
    DashDot,
}

impl DashStyle {
    pub const ALL: [DashStyle; 4] = [
        DashStyle::Solid,
        DashStyle::Dotted,
        DashStyle::Dashed,
        DashStyle::DashDot,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DashStyle::Solid => "solid",
            DashStyle::Dotted => "dotted",
            DashStyle::Dashed => "dashed",
            DashStyle::DashDot => "dashdot",
        }
    }

    /// On/off lengths in logical units. Empty means a continuous stroke.
    pub fn pattern(self) -> &'static [f64] {
        match self {
            DashStyle::Solid => &[],
            DashStyle::Dotted => &[1.0, 3.0],
            DashStyle::Dashed => &[4.0, 4.0],
            DashStyle::DashDot => &[4.0, 2.0, 1.0, 2.0],
        }
    }
}

impl FromStr for DashStyle {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self> {
        DashStyle::ALL
            .into_iter()
            .find(|d| d.name() == s)
            .ok_or_else(|| RenderError::UnknownDashStyle(s.to_string()))
    }
}

impl TryFrom<String> for DashStyle {
    type Error = RenderError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<DashStyle> for String {
    fn from(d: DashStyle) -> Self {
        d.name().to_string()
    }
}

impl fmt::Display for DashStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Look up the dash pattern for a style name.
pub fn dash_pattern(name: &str) -> Result<&'static [f64]> {
    Ok(name.parse::<DashStyle>()?.pattern())
}

/// Stroke end cap, named as in the canvas and SVG APIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LineCap {
    Butt,
    #[default]
    Round,
    Square,
}

impl LineCap {
    pub fn name(self) -> &'static str {
        match self {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
            LineCap::Square => "square",
        }
    }
}

impl FromStr for LineCap {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "butt" => Ok(LineCap::Butt),
            "round" => Ok(LineCap::Round),
            "square" => Ok(LineCap::Square),
            other => Err(RenderError::UnknownLineCap(other.to_string())),
        }
    }
}

impl TryFrom<String> for LineCap {
    type Error = RenderError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<LineCap> for String {
    fn from(c: LineCap) -> Self {
        c.name().to_string()
    }
}

impl fmt::Display for LineCap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything a backend needs to stroke one segment.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeStyle {
    pub color: String,
    pub width: f64,
    pub dash: DashStyle,
    pub cap: LineCap,
}

impl StrokeStyle {
    /// Thin solid stroke used for axes and tick marks.
    pub fn axis(color: &str) -> Self {
        Self {
            color: color.to_string(),
            width: 1.0,
            dash: DashStyle::Solid,
            cap: LineCap::Round,
        }
    }
}

fn default_color() -> String {
    "black".to_string()
}

fn default_width() -> f64 {
    1.0
}

/// One labelled segment. The label is anchored at `end`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    pub label: String,
    pub start: Point,
    pub end: Point,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default)]
    pub dash: DashStyle,
    #[serde(default)]
    pub cap: LineCap,
}

impl Vector {
    pub fn new(label: impl Into<String>, start: Point, end: Point) -> Self {
        Self {
            label: label.into(),
            start,
            end,
            color: default_color(),
            width: default_width(),
            dash: DashStyle::default(),
            cap: LineCap::default(),
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn with_dash(mut self, dash: DashStyle) -> Self {
        self.dash = dash;
        self
    }

    pub fn with_cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }

    pub fn stroke(&self) -> StrokeStyle {
        StrokeStyle {
            color: self.color.clone(),
            width: self.width,
            dash: self.dash,
            cap: self.cap,
        }
    }

    /// Check that this entry can be drawn. `key` is only used in the error.
    pub fn validate(&self, key: &str) -> Result<()> {
        if self.label.trim().is_empty() {
            return Err(RenderError::malformed(key, "missing label"));
        }
        if !self.start.is_finite() {
            return Err(RenderError::malformed(key, "start point is not finite"));
        }
        if !self.end.is_finite() {
            return Err(RenderError::malformed(key, "end point is not finite"));
        }
        if !self.width.is_finite() || self.width < 0.0 {
            return Err(RenderError::malformed(
                key,
                format!("stroke width {} is not a finite non-negative number", self.width),
            ));
        }
        if self.color.trim().is_empty() {
            return Err(RenderError::malformed(key, "missing color"));
        }
        Ok(())
    }
}

/// Vectors keyed by name; iteration (and draw) order is insertion order.
pub type VectorCollection = IndexMap<String, Vector>;
