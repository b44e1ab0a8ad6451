//! vecplot
//!
//! Render a small collection of labelled 2D segments ("vectors", e.g. phasor
//! diagrams) with axis lines and ticks, onto either a canvas-style 2D context
//! or an SVG element container.
//!
//! ### Features
//! - One [`render::Renderer`] trait, two backends: [`render::canvas`] and [`render::svg`]
//! - Translate / uniform scale / y-axis inversion via [`Transform`]
//! - Configurable tick spacing, axis extent and label suppression via [`RenderConfig`]
//! - Full validation before any drawing call: a failed pass never half-draws
//! - Real output through plotters (PNG / SVG) or an in-memory SVG document
//!
//! ### Example
//! ```
//! use vecplot::{Point, RenderConfig, Transform, Vector, VectorCollection};
//! use vecplot::render::{render, svg::{SvgDocument, SvgRenderer}};
//!
//! let mut vectors = VectorCollection::new();
//! vectors.insert(
//!     "V1".into(),
//!     Vector::new("V1", Point::ORIGIN, Point::new(10.0, 20.0)).with_color("red"),
//! );
//!
//! let mut doc = SvgDocument::new(200, 200);
//! doc.add_group("plot");
//! let transform = Transform::centered(200.0, 200.0);
//! render(&mut SvgRenderer::new(&mut doc, "plot"), &vectors, &transform, &RenderConfig::default())?;
//! assert!(doc.to_markup().contains(">V1</text>"));
//! # Ok::<(), vecplot::RenderError>(())
//! ```

pub mod color;
pub mod config;
pub mod error;
pub mod events;
pub mod models;
pub mod plotters_canvas;
pub mod render;
pub mod storage;
pub mod ticks;
pub mod transform;

pub use config::{AxisExtent, RenderConfig};
pub use error::RenderError;
pub use models::{DashStyle, LineCap, Point, StrokeStyle, Vector, VectorCollection};
pub use transform::Transform;
