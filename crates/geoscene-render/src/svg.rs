//! SVG serialization of a [`Scene`].
//!
//! Each feature group is followed by an `<animate>` element that reveals the
//! group's label while the pointer is over it. Labels are written after all
//! nodes so they paint on top.

use std::collections::HashMap;
use std::fmt::Write;

use geoscene_core::BoundingBox;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::scene::{
    DrawablePrimitive, ElementId, FeatureGroup, LabelPrimitive, Scene, SceneNode, Shape, Style,
};

/// Id of the filter drawing a white box behind label text.
pub const LABEL_BACKGROUND_FILTER: &str = "textbg";

/// Formatting switches for SVG output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvgOptions {
    /// One element per line, indented by nesting depth.
    pub pretty: bool,
    /// Emit the `textbg` filter definition referenced by labels.
    pub label_background: bool,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            label_background: true,
        }
    }
}

struct SvgWriter<'a> {
    out: String,
    options: &'a SvgOptions,
}

impl<'a> SvgWriter<'a> {
    fn new(options: &'a SvgOptions) -> Self {
        Self {
            out: String::new(),
            options,
        }
    }

    fn line(&mut self, depth: usize, element: &str) {
        if self.options.pretty {
            for _ in 0..depth {
                self.out.push_str("  ");
            }
            self.out.push_str(element);
            self.out.push('\n');
        } else {
            self.out.push_str(element);
        }
    }

    fn node(&mut self, depth: usize, node: &SceneNode) {
        match node {
            SceneNode::Primitive(p) => self.primitive(depth, p),
            SceneNode::Group(g) => self.group(depth, g),
        }
    }

    fn group(&mut self, depth: usize, group: &FeatureGroup) {
        self.line(
            depth,
            &format!(r#"<g id="{}" fill="{}">"#, group.id, group.fill),
        );
        for p in &group.primitives {
            self.primitive(depth + 1, p);
        }
        self.line(depth, "</g>");
    }

    fn primitive(&mut self, depth: usize, primitive: &DrawablePrimitive) {
        let mut el = String::new();
        match &primitive.shape {
            Shape::Circle { center, radius } => {
                let _ = write!(
                    el,
                    r#"<circle id="{}" cx="{}" cy="{}" r="{}""#,
                    primitive.id, center.x, center.y, radius
                );
            }
            Shape::Polyline { .. } => {
                let points = primitive.polyline_points().unwrap_or_default();
                let _ = write!(el, r#"<polyline id="{}" points="{}""#, primitive.id, points);
            }
            Shape::Path { fill_rule, .. } => {
                let d = primitive.path_data().unwrap_or_default();
                let _ = write!(
                    el,
                    r#"<path id="{}" d="{}" fill-rule="{}""#,
                    primitive.id,
                    d.trim_end(),
                    fill_rule.as_svg()
                );
            }
        }
        push_style(&mut el, &primitive.style);
        el.push_str("/>");
        self.line(depth, &el);
    }

    fn reveal(&mut self, depth: usize, label: &LabelPrimitive) {
        let target = label.reveal_on;
        self.line(
            depth,
            &format!(
                r##"<animate href="#{}" attributeName="visibility" values="visible;hidden" begin="{}.mouseenter;{}.mousedown" end="{}.mouseleave" dur="2s" fill="remove"/>"##,
                label.id, target, target, target
            ),
        );
    }

    fn label(&mut self, depth: usize, label: &LabelPrimitive) {
        let mut el = format!(
            r#"<text id="{}" x="{}" y="{}" dominant-baseline="middle" text-anchor="middle" font-size="{}px""#,
            label.id, label.anchor.x, label.anchor.y, label.font_size
        );
        if label.hidden {
            el.push_str(r#" visibility="hidden""#);
        }
        el.push_str(r#" pointer-events="none""#);
        if self.options.label_background {
            let _ = write!(el, r#" filter="url(#{})""#, LABEL_BACKGROUND_FILTER);
        }
        let _ = write!(el, ">{}</text>", escape_text(&label.text));
        self.line(depth, &el);
    }

    fn elements(&mut self, depth: usize, scene: &Scene) {
        let mut by_group: HashMap<ElementId, Vec<&LabelPrimitive>> = HashMap::new();
        for label in &scene.labels {
            by_group.entry(label.reveal_on).or_default().push(label);
        }
        for node in &scene.nodes {
            self.node(depth, node);
            if let SceneNode::Group(g) = node {
                for label in by_group.get(&g.id).into_iter().flatten() {
                    self.reveal(depth, label);
                }
            }
        }
        for label in &scene.labels {
            self.label(depth, label);
        }
    }
}

fn push_style(el: &mut String, style: &Style) {
    if let Some(fill) = &style.fill {
        let _ = write!(el, r#" fill="{}""#, fill);
    }
    if let Some(stroke) = &style.stroke {
        let _ = write!(el, r#" stroke="{}""#, stroke);
    }
    if let Some(width) = &style.stroke_width {
        let _ = write!(el, r#" stroke-width="{}""#, width);
    }
}

/// Escapes text content and attribute values.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Serializes the scene's nodes, reveal animations and labels without an
/// enclosing `<svg>` element.
pub fn render_elements(scene: &Scene, options: &SvgOptions) -> String {
    let mut w = SvgWriter::new(options);
    w.elements(0, scene);
    w.out
}

/// Serializes a complete SVG document.
///
/// `view_box` is the visible window in scene space; `width` and `height` are
/// the output size in pixels.
pub fn render_document(
    scene: &Scene,
    view_box: &BoundingBox,
    width: f64,
    height: f64,
    options: &SvgOptions,
) -> String {
    debug!(
        "Writing SVG document {}x{} viewBox {} ({} nodes, {} labels)",
        width,
        height,
        view_box,
        scene.nodes.len(),
        scene.labels.len()
    );

    let mut w = SvgWriter::new(options);
    w.line(
        0,
        &format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{}">"#,
            width, height, view_box
        ),
    );
    if options.label_background {
        w.line(1, "<defs>");
        w.line(
            2,
            &format!(
                r#"<filter id="{}" x="0" y="0" width="1" height="1">"#,
                LABEL_BACKGROUND_FILTER
            ),
        );
        w.line(3, r#"<feFlood flood-color="white"/>"#);
        w.line(3, r#"<feComposite in="SourceGraphic" operator="over"/>"#);
        w.line(2, "</filter>");
        w.line(1, "</defs>");
    }
    w.elements(1, scene);
    w.line(0, "</svg>");
    w.out
}
