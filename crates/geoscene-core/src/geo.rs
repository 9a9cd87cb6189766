//! Geographic tree model following the RFC 7946 object model.
//!
//! The tree is a closed tagged union; consumers match on it exhaustively.
//! Structural validation (coordinate counts, ring presence) is left to the
//! scene walker so that malformed input fails with a typed error at the point
//! of use rather than at deserialization time.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{SceneError, SceneResult};

/// Ordered property mapping of a feature. Key order is the document order.
pub type Properties = Map<String, Value>;

/// A coordinate tuple `(x, y)` or `(x, y, z)`.
///
/// The length is not checked on construction; see [`Position::validate`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Position(pub Vec<f64>);

impl Position {
    /// Creates a 2D position.
    pub fn xy(x: f64, y: f64) -> Self {
        Self(vec![x, y])
    }

    /// Creates a 3D position.
    pub fn xyz(x: f64, y: f64, z: f64) -> Self {
        Self(vec![x, y, z])
    }

    /// Raw coordinate values.
    pub fn values(&self) -> &[f64] {
        &self.0
    }

    /// Checks the structural shape of the position and returns `(x, y, z)`.
    pub fn validate(&self) -> SceneResult<(f64, f64, Option<f64>)> {
        let v = &self.0;
        if v.len() != 2 && v.len() != 3 {
            return Err(SceneError::malformed_position(
                v,
                format!("expected 2 or 3 components, found {}", v.len()),
            ));
        }
        if v.iter().any(|c| !c.is_finite()) {
            return Err(SceneError::malformed_position(v, "components must be finite"));
        }
        Ok((v[0], v[1], v.get(2).copied()))
    }
}

impl From<[f64; 2]> for Position {
    fn from(p: [f64; 2]) -> Self {
        Self(p.to_vec())
    }
}

impl From<[f64; 3]> for Position {
    fn from(p: [f64; 3]) -> Self {
        Self(p.to_vec())
    }
}

/// A GeoJSON feature: an optional geometry plus properties.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Feature {
    /// The feature geometry; `null` in the source document maps to `None`.
    #[serde(default)]
    pub geometry: Option<Box<GeoNode>>,
    #[serde(default)]
    pub properties: Option<Properties>,
    #[serde(default)]
    pub id: Option<Value>,
}

impl Feature {
    /// Creates a feature around a geometry with no properties.
    pub fn new(geometry: GeoNode) -> Self {
        Self {
            geometry: Some(Box::new(geometry)),
            properties: None,
            id: None,
        }
    }

    /// Adds a property, keeping insertion order.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }
}

/// Node of a GeoJSON tree.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum GeoNode {
    Point {
        coordinates: Position,
    },
    MultiPoint {
        coordinates: Vec<Position>,
    },
    LineString {
        coordinates: Vec<Position>,
    },
    MultiLineString {
        coordinates: Vec<Vec<Position>>,
    },
    /// Ring 0 is the exterior boundary, later rings are holes.
    Polygon {
        coordinates: Vec<Vec<Position>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Position>>>,
    },
    GeometryCollection {
        geometries: Vec<GeoNode>,
    },
    Feature(Feature),
    FeatureCollection {
        features: Vec<Feature>,
    },
}

impl GeoNode {
    /// Deserializes a tree from GeoJSON text.
    pub fn from_json_str(text: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Deserializes a tree from an already-parsed JSON value.
    pub fn from_json_value(value: Value) -> SceneResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// The GeoJSON `type` tag of this node.
    pub fn tag(&self) -> &'static str {
        match self {
            GeoNode::Point { .. } => "Point",
            GeoNode::MultiPoint { .. } => "MultiPoint",
            GeoNode::LineString { .. } => "LineString",
            GeoNode::MultiLineString { .. } => "MultiLineString",
            GeoNode::Polygon { .. } => "Polygon",
            GeoNode::MultiPolygon { .. } => "MultiPolygon",
            GeoNode::GeometryCollection { .. } => "GeometryCollection",
            GeoNode::Feature(_) => "Feature",
            GeoNode::FeatureCollection { .. } => "FeatureCollection",
        }
    }

    /// Whether this node is a geometry (as opposed to a feature wrapper).
    pub fn is_geometry(&self) -> bool {
        !matches!(self, GeoNode::Feature(_) | GeoNode::FeatureCollection { .. })
    }

    pub fn point(x: f64, y: f64) -> Self {
        GeoNode::Point {
            coordinates: Position::xy(x, y),
        }
    }

    pub fn line_string<P: Into<Position>>(points: impl IntoIterator<Item = P>) -> Self {
        GeoNode::LineString {
            coordinates: points.into_iter().map(Into::into).collect(),
        }
    }

    pub fn polygon<P: Into<Position>>(rings: impl IntoIterator<Item = Vec<P>>) -> Self {
        GeoNode::Polygon {
            coordinates: rings
                .into_iter()
                .map(|ring| ring.into_iter().map(Into::into).collect())
                .collect(),
        }
    }
}
