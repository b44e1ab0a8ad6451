//! SVG backend: builds `line`/`text` element nodes inside a container.
//!
//! Unlike the canvas backend nothing carries over between elements: the
//! transform is baked into rounded integer coordinates and every style is an
//! attribute on the element itself.

use crate::config::{FontSpec, RenderConfig};
use crate::error::{RenderError, Result};
use crate::models::{DashStyle, Point, StrokeStyle};
use crate::render::{Renderer, TextAlign, TextBaseline};
use crate::transform::Transform;
use anyhow::Context;
use std::fs;
use std::path::Path;

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Handle to a node owned by an [`SvgHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// DOM operations the SVG renderer needs from its host document.
pub trait SvgHost {
    fn element_by_id(&self, id: &str) -> Option<NodeId>;
    fn create_element_ns(&mut self, ns: &str, tag: &str) -> NodeId;
    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);
    fn set_text_content(&mut self, node: NodeId, text: &str);
    fn append_child(&mut self, parent: NodeId, child: NodeId);
    /// Returns `false` when `child` is not a child of `parent`.
    fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool;
    fn first_child(&self, parent: NodeId) -> Option<NodeId>;
}

#[derive(Debug, Clone, Default)]
struct Node {
    ns: String,
    tag: String,
    attrs: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

/// Small arena-backed SVG document.
///
/// `remove_child` drops the removed subtree: its slots go on a free list and
/// are reused by later `create_element_ns` calls, so ids of removed nodes must
/// not be used afterwards. `append_child` moves a node without dropping it.
#[derive(Debug, Clone)]
pub struct SvgDocument {
    nodes: Vec<Node>,
    free: Vec<usize>,
    root: NodeId,
}

impl SvgDocument {
    /// A root `<svg>` element of the given pixel size.
    pub fn new(width: u32, height: u32) -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            free: Vec::new(),
            root: NodeId(0),
        };
        let root = doc.create_element_ns(SVG_NS, "svg");
        doc.root = root;
        doc.set_attribute(root, "width", &width.to_string());
        doc.set_attribute(root, "height", &height.to_string());
        doc.set_attribute(root, "viewBox", &format!("0 0 {width} {height}"));
        doc
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Append an empty `<g id=..>` to the root, to be used as a render container.
    pub fn add_group(&mut self, id: &str) -> NodeId {
        let g = self.create_element_ns(SVG_NS, "g");
        self.set_attribute(g, "id", id);
        self.append_child(self.root, g);
        g
    }

    pub fn tag(&self, node: NodeId) -> &str {
        &self.nodes[node.0].tag
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.nodes[node.0]
            .attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.nodes[node.0].text.as_deref()
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    /// Number of live nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    /// Serialize the tree reachable from the root.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        self.write_node(self.root, 0, &mut out);
        out
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_markup())
            .with_context(|| format!("writing SVG to {}", path.display()))
    }

    fn write_node(&self, id: NodeId, depth: usize, out: &mut String) {
        let node = &self.nodes[id.0];
        let indent = "  ".repeat(depth);
        out.push_str(&indent);
        out.push('<');
        out.push_str(&node.tag);
        let parent_ns = node.parent.map(|p| self.nodes[p.0].ns.as_str());
        if parent_ns != Some(node.ns.as_str()) {
            out.push_str(&format!(" xmlns=\"{}\"", escape(&node.ns)));
        }
        for (k, v) in &node.attrs {
            out.push_str(&format!(" {}=\"{}\"", k, escape(v)));
        }
        match (&node.text, node.children.is_empty()) {
            (None, true) => out.push_str("/>\n"),
            (Some(text), true) => {
                out.push_str(&format!(">{}</{}>\n", escape(text), node.tag));
            }
            (text, false) => {
                out.push_str(">\n");
                if let Some(text) = text {
                    out.push_str(&format!("{indent}  {}\n", escape(text)));
                }
                for child in &node.children {
                    self.write_node(*child, depth + 1, out);
                }
                out.push_str(&format!("{indent}</{}>\n", node.tag));
            }
        }
    }

    fn detach(&mut self, parent: NodeId, child: NodeId) -> bool {
        let children = &mut self.nodes[parent.0].children;
        match children.iter().position(|c| *c == child) {
            Some(i) => {
                children.remove(i);
                self.nodes[child.0].parent = None;
                true
            }
            None => false,
        }
    }

    fn release(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(n) = stack.pop() {
            let node = std::mem::take(&mut self.nodes[n.0]);
            stack.extend(node.children);
            self.free.push(n.0);
        }
    }
}

impl SvgHost for SvgDocument {
    /// Depth-first from the root, so detached nodes are never found.
    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let mut stack = vec![self.root];
        while let Some(n) = stack.pop() {
            if self.attribute(n, "id") == Some(id) {
                return Some(n);
            }
            stack.extend(self.nodes[n.0].children.iter().rev());
        }
        None
    }

    fn create_element_ns(&mut self, ns: &str, tag: &str) -> NodeId {
        let node = Node {
            ns: ns.to_string(),
            tag: tag.to_string(),
            ..Node::default()
        };
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                NodeId(slot)
            }
            None => {
                self.nodes.push(node);
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        let attrs = &mut self.nodes[node.0].attrs;
        match attrs.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => attrs.push((name.to_string(), value.to_string())),
        }
    }

    fn set_text_content(&mut self, node: NodeId, text: &str) {
        self.nodes[node.0].text = Some(text.to_string());
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(old) = self.nodes[child.0].parent {
            self.detach(old, child);
        }
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if !self.detach(parent, child) {
            return false;
        }
        self.release(child);
        true
    }

    fn first_child(&self, parent: NodeId) -> Option<NodeId> {
        self.nodes[parent.0].children.first().copied()
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// Integer pixel, formatted without a fractional part.
fn px(v: f64) -> String {
    format!("{}", v.round() as i64)
}

fn num(v: f64) -> String {
    crate::ticks::format_tick_label(v)
}

/// Renders into the container whose `id` attribute matches `container_id`.
pub struct SvgRenderer<'a, H: SvgHost + ?Sized> {
    host: &'a mut H,
    container_id: String,
    container: Option<NodeId>,
    transform: Transform,
    font: FontSpec,
}

impl<'a, H: SvgHost + ?Sized> SvgRenderer<'a, H> {
    pub fn new(host: &'a mut H, container_id: impl Into<String>) -> Self {
        Self {
            host,
            container_id: container_id.into(),
            container: None,
            transform: Transform::default(),
            font: FontSpec {
                size_px: 13.0,
                family: "sans-serif".to_string(),
            },
        }
    }

    fn container(&mut self) -> Result<NodeId> {
        if let Some(c) = self.container {
            return Ok(c);
        }
        let c = self.host.element_by_id(&self.container_id).ok_or_else(|| {
            RenderError::SurfaceUnavailable(format!(
                "no SVG container with id `{}`",
                self.container_id
            ))
        })?;
        self.container = Some(c);
        Ok(c)
    }

    /// Remove every child of the container.
    pub fn clear_container(&mut self) -> Result<()> {
        let c = self.container()?;
        while let Some(child) = self.host.first_child(c) {
            self.host.remove_child(c, child);
        }
        Ok(())
    }

    /// Append a fully styled `<line>` for a logical segment.
    pub fn create_line_element(
        &mut self,
        start: Point,
        end: Point,
        stroke: &StrokeStyle,
    ) -> Result<NodeId> {
        let c = self.container()?;
        let a = self.transform.apply(start);
        let b = self.transform.apply(end);
        let scale = self.transform.scale;

        let line = self.host.create_element_ns(SVG_NS, "line");
        self.host.set_attribute(line, "x1", &px(a.x));
        self.host.set_attribute(line, "y1", &px(a.y));
        self.host.set_attribute(line, "x2", &px(b.x));
        self.host.set_attribute(line, "y2", &px(b.y));
        self.host.set_attribute(line, "stroke", &stroke.color);
        self.host
            .set_attribute(line, "stroke-width", &num(stroke.width * scale));
        self.host
            .set_attribute(line, "stroke-linecap", stroke.cap.name());
        if stroke.dash != DashStyle::Solid {
            let dash: Vec<String> = stroke
                .dash
                .pattern()
                .iter()
                .map(|d| num(d * scale))
                .collect();
            self.host
                .set_attribute(line, "stroke-dasharray", &dash.join(","));
        }
        self.host.append_child(c, line);
        Ok(line)
    }

    /// Append a fully styled `<text>` anchored at a logical point.
    pub fn create_text_element(&mut self, anchor: Point, text: &str, color: &str) -> Result<NodeId> {
        let c = self.container()?;
        let at = self.transform.apply(anchor);
        let anchor_attr = match TextAlign::for_anchor(anchor.x) {
            TextAlign::Left | TextAlign::Start => "start",
            TextAlign::Right => "end",
        };
        let baseline_attr = match TextBaseline::for_anchor(anchor.y, self.transform.invert_y) {
            TextBaseline::Top => "hanging",
            TextBaseline::Bottom => "text-after-edge",
            TextBaseline::Alphabetic => "alphabetic",
        };

        let node = self.host.create_element_ns(SVG_NS, "text");
        self.host.set_attribute(node, "x", &px(at.x));
        self.host.set_attribute(node, "y", &px(at.y));
        self.host.set_attribute(node, "fill", color);
        self.host
            .set_attribute(node, "font-family", &self.font.family);
        self.host.set_attribute(
            node,
            "font-size",
            &num(self.font.size_px * self.transform.scale),
        );
        self.host.set_attribute(node, "text-anchor", anchor_attr);
        self.host
            .set_attribute(node, "dominant-baseline", baseline_attr);
        self.host.set_text_content(node, text);
        self.host.append_child(c, node);
        Ok(node)
    }

    /// Axis lines and ticks for `transform`.
    pub fn draw_axis(&mut self, transform: &Transform, config: &RenderConfig) -> Result<()> {
        self.font = config.font_spec()?;
        self.transform = *transform;
        crate::render::draw_axis(self, transform, config)
    }
}

impl<H: SvgHost + ?Sized> Renderer for SvgRenderer<'_, H> {
    fn check_surface(&self) -> Result<()> {
        match self.container.or_else(|| self.host.element_by_id(&self.container_id)) {
            Some(_) => Ok(()),
            None => Err(RenderError::SurfaceUnavailable(format!(
                "no SVG container with id `{}`",
                self.container_id
            ))),
        }
    }

    fn begin_pass(&mut self, transform: &Transform, config: &RenderConfig) -> Result<()> {
        self.font = config.font_spec()?;
        self.transform = *transform;
        self.clear_container()
    }

    fn draw_line(&mut self, start: Point, end: Point, stroke: &StrokeStyle) -> Result<()> {
        self.create_line_element(start, end, stroke).map(|_| ())
    }

    fn draw_text(&mut self, anchor: Point, text: &str, color: &str) -> Result<()> {
        self.create_text_element(anchor, text, color).map(|_| ())
    }
}
