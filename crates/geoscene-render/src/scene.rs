//! Scene model: drawable primitives, feature groups and labels.
//!
//! A [`Scene`] is the output of one conversion. Node order is paint order
//! (later entries draw on top) and labels are always painted after every
//! node so they are never occluded.

use std::fmt;

use geoscene_core::BoundingBox;

use crate::precision::Precision;

/// A point in drawing space (Y already flipped to screen orientation).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenePoint {
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
}

impl ScenePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }
}

impl fmt::Display for ScenePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Identifier of a generated element, rendered as `eno<N>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "eno{}", self.0)
    }
}

/// RGB color as a `#rrggbb` string, or a named color.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Color(String);

impl Color {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn black() -> Self {
        Self::new("black")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A length either in drawing units or relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Units(f64),
    Percent(f64),
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Units(v) => write!(f, "{}", v),
            Length::Percent(v) => write!(f, "{}%", v),
        }
    }
}

/// Stroke and fill of a primitive. `None` inherits from the enclosing group.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub stroke: Option<Color>,
    pub fill: Option<Color>,
    pub stroke_width: Option<Length>,
}

/// Fill rule of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillRule {
    EvenOdd,
    NonZero,
}

impl FillRule {
    pub fn as_svg(&self) -> &'static str {
        match self {
            FillRule::EvenOdd => "evenodd",
            FillRule::NonZero => "nonzero",
        }
    }
}

/// One closed loop of a path.
#[derive(Debug, Clone, PartialEq)]
pub struct SubPath {
    pub points: Vec<ScenePoint>,
}

impl SubPath {
    /// Path data for this ring: `M x y L x y ... z`.
    pub fn to_path_data(&self) -> String {
        let mut d = String::new();
        for (i, p) in self.points.iter().enumerate() {
            let cmd = if i == 0 { 'M' } else { 'L' };
            d.push_str(&format!("{}{} {} ", cmd, p.x, p.y));
        }
        if !self.points.is_empty() {
            d.push_str("z ");
        }
        d
    }
}

/// Geometry of a drawable primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle {
        center: ScenePoint,
        radius: Length,
    },
    Polyline {
        points: Vec<ScenePoint>,
    },
    /// Sub-path 0 is the exterior ring; the rest are holes.
    Path {
        sub_paths: Vec<SubPath>,
        fill_rule: FillRule,
    },
}

/// A styled shape with its local bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawablePrimitive {
    pub id: ElementId,
    pub shape: Shape,
    pub style: Style,
    pub bbox: BoundingBox,
}

impl DrawablePrimitive {
    /// `points` attribute of a polyline (`"x,y x,y ..."`).
    pub fn polyline_points(&self) -> Option<String> {
        match &self.shape {
            Shape::Polyline { points } => Some(
                points
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" "),
            ),
            _ => None,
        }
    }

    /// `d` attribute of a path.
    pub fn path_data(&self) -> Option<String> {
        match &self.shape {
            Shape::Path { sub_paths, .. } => Some(
                sub_paths
                    .iter()
                    .map(SubPath::to_path_data)
                    .collect::<String>(),
            ),
            _ => None,
        }
    }
}

/// Primitives of one feature, drawn under a shared name and fill color.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureGroup {
    pub id: ElementId,
    pub name: String,
    pub fill: Color,
    pub primitives: Vec<DrawablePrimitive>,
    /// `None` when the feature had no drawable geometry.
    pub bbox: Option<BoundingBox>,
}

/// Text anchored at a feature's bounding-box center.
///
/// Labels start hidden and are revealed while the pointer hovers or presses
/// the group named by `reveal_on`.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPrimitive {
    pub id: ElementId,
    pub text: String,
    pub anchor: ScenePoint,
    pub font_size: f64,
    pub hidden: bool,
    pub reveal_on: ElementId,
}

/// Top-level paint entry of a scene.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneNode {
    Primitive(DrawablePrimitive),
    Group(FeatureGroup),
}

impl SceneNode {
    /// Every primitive in this node, in paint order.
    pub fn primitives(&self) -> &[DrawablePrimitive] {
        match self {
            SceneNode::Primitive(p) => std::slice::from_ref(p),
            SceneNode::Group(g) => &g.primitives,
        }
    }
}

/// Result of one conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub nodes: Vec<SceneNode>,
    pub labels: Vec<LabelPrimitive>,
    /// Aggregate bounding box; `(0, 0, 0, 0)` when nothing was drawn.
    pub bbox: BoundingBox,
    pub precision: Precision,
}

impl Scene {
    /// All primitives in paint order, flattening groups.
    pub fn primitives(&self) -> impl Iterator<Item = &DrawablePrimitive> {
        self.nodes.iter().flat_map(|n| n.primitives().iter())
    }

    pub fn primitive_count(&self) -> usize {
        self.primitives().count()
    }

    pub fn groups(&self) -> impl Iterator<Item = &FeatureGroup> {
        self.nodes.iter().filter_map(|n| match n {
            SceneNode::Group(g) => Some(g),
            SceneNode::Primitive(_) => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.labels.is_empty()
    }
}
