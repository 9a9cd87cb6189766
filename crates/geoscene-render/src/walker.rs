//! Geometry walker: converts a GeoJSON tree into a [`Scene`].
//!
//! The walk is read-only over the tree and fails fast: the first structural
//! error aborts the conversion and no partial scene is returned.

use geoscene_core::{merge_optional, BoundingBox, Feature, GeoNode, Position, SceneError, SceneResult};
use tracing::{debug, trace};

use crate::labels::resolve_label_or;
use crate::options::RenderOptions;
use crate::precision::Precision;
use crate::scene::{
    DrawablePrimitive, ElementId, FeatureGroup, FillRule, LabelPrimitive, Scene, SceneNode,
    ScenePoint, Shape, Style, SubPath,
};
use crate::style::{SeedSource, StyleAssigner};

/// Converts `tree` into a scene at the given precision.
///
/// Element ids restart at `eno1` on every call.
pub fn convert<S: SeedSource>(
    tree: &GeoNode,
    precision: Precision,
    styles: &mut StyleAssigner<S>,
    options: &RenderOptions,
) -> SceneResult<Scene> {
    debug!("Converting {} at precision {}", tree.tag(), precision);

    let mut walker = Walker {
        precision,
        styles,
        options,
        next_id: 0,
    };

    let mut nodes = Vec::new();
    let mut labels = Vec::new();
    let bbox = match tree {
        GeoNode::Feature(feature) => {
            let (group, label) = walker.feature(feature)?;
            let bbox = group.bbox;
            nodes.push(SceneNode::Group(group));
            labels.extend(label);
            bbox
        }
        GeoNode::FeatureCollection { features } => {
            let mut bbox = None;
            for feature in features {
                let (group, label) = walker.feature(feature)?;
                bbox = merge_optional(bbox, group.bbox);
                nodes.push(SceneNode::Group(group));
                labels.extend(label);
            }
            bbox
        }
        geometry => {
            let (primitives, bbox) = walker.geometry(geometry)?;
            nodes.extend(primitives.into_iter().map(SceneNode::Primitive));
            bbox
        }
    };

    let scene = Scene {
        nodes,
        labels,
        bbox: bbox.unwrap_or_default(),
        precision,
    };
    debug!(
        "Converted {} primitives, {} labels, bbox {}",
        scene.primitive_count(),
        scene.labels.len(),
        scene.bbox
    );
    Ok(scene)
}

struct Walker<'a, S> {
    precision: Precision,
    styles: &'a mut StyleAssigner<S>,
    options: &'a RenderOptions,
    next_id: u64,
}

type Primitives = (Vec<DrawablePrimitive>, Option<BoundingBox>);

impl<S: SeedSource> Walker<'_, S> {
    fn next_id(&mut self) -> ElementId {
        self.next_id += 1;
        ElementId(self.next_id)
    }

    fn feature(&mut self, feature: &Feature) -> SceneResult<(FeatureGroup, Option<LabelPrimitive>)> {
        let (primitives, bbox) = match &feature.geometry {
            Some(geometry) => self.geometry(geometry)?,
            None => (Vec::new(), None),
        };

        let name = resolve_label_or(feature.properties.as_ref(), &self.options.fallback_label);
        let fill = self.styles.next_color(&name);
        let group_id = self.next_id();
        trace!("Feature {} '{}' fill {}", group_id, name, fill);

        let label = match bbox {
            Some(b) => {
                let (cx, cy) = b.center();
                Some(LabelPrimitive {
                    id: self.next_id(),
                    text: name.clone(),
                    anchor: ScenePoint::new(cx, cy),
                    font_size: self.options.label_font_size,
                    hidden: true,
                    reveal_on: group_id,
                })
            }
            None => None,
        };

        let group = FeatureGroup {
            id: group_id,
            name,
            fill,
            primitives,
            bbox,
        };
        Ok((group, label))
    }

    fn geometry(&mut self, node: &GeoNode) -> SceneResult<Primitives> {
        match node {
            GeoNode::Point { coordinates } => {
                let p = self.point(coordinates)?;
                let bbox = p.bbox;
                Ok((vec![p], Some(bbox)))
            }
            GeoNode::MultiPoint { coordinates } => {
                self.collect(coordinates.iter(), |w, c| w.point(c))
            }
            GeoNode::LineString { coordinates } => {
                let line = self.line(coordinates)?;
                let bbox = line.bbox;
                Ok((vec![line], Some(bbox)))
            }
            GeoNode::MultiLineString { coordinates } => {
                self.collect(coordinates.iter(), |w, c| w.line(c))
            }
            GeoNode::Polygon { coordinates } => {
                let poly = self.polygon(coordinates)?;
                let bbox = poly.bbox;
                Ok((vec![poly], Some(bbox)))
            }
            GeoNode::MultiPolygon { coordinates } => {
                self.collect(coordinates.iter(), |w, c| w.polygon(c))
            }
            GeoNode::GeometryCollection { geometries } => {
                let mut primitives = Vec::new();
                let mut bbox = None;
                for member in geometries {
                    let (children, child_bbox) = self.geometry(member)?;
                    primitives.extend(children);
                    bbox = merge_optional(bbox, child_bbox);
                }
                Ok((primitives, bbox))
            }
            GeoNode::Feature(_) | GeoNode::FeatureCollection { .. } => {
                Err(SceneError::UnrecognizedGeometryType {
                    found: node.tag().to_string(),
                })
            }
        }
    }

    fn collect<'n, T: 'n>(
        &mut self,
        members: impl Iterator<Item = &'n T>,
        mut build: impl FnMut(&mut Self, &'n T) -> SceneResult<DrawablePrimitive>,
    ) -> SceneResult<Primitives> {
        let mut primitives = Vec::new();
        let mut bbox = None;
        for member in members {
            let primitive = build(self, member)?;
            bbox = merge_optional(bbox, Some(primitive.bbox));
            primitives.push(primitive);
        }
        Ok((primitives, bbox))
    }

    fn point(&mut self, position: &Position) -> SceneResult<DrawablePrimitive> {
        let center = self.precision.transform(position)?;
        Ok(DrawablePrimitive {
            id: self.next_id(),
            shape: Shape::Circle {
                center,
                radius: self.options.point_radius(),
            },
            style: Style {
                stroke: None,
                fill: Some(self.options.stroke()),
                stroke_width: None,
            },
            bbox: BoundingBox::from_point(center.x, center.y),
        })
    }

    fn line(&mut self, positions: &[Position]) -> SceneResult<DrawablePrimitive> {
        if positions.len() < 2 {
            return Err(SceneError::MalformedLineString {
                points: positions.len(),
            });
        }
        let points = self.precision.process_sequence(positions)?;
        let bbox = bbox_of(&points).unwrap_or_default();
        Ok(DrawablePrimitive {
            id: self.next_id(),
            shape: Shape::Polyline { points },
            style: self.stroked(),
            bbox,
        })
    }

    fn polygon(&mut self, rings: &[Vec<Position>]) -> SceneResult<DrawablePrimitive> {
        match rings.first() {
            None => {
                return Err(SceneError::MalformedPolygon {
                    reason: "no exterior ring".to_string(),
                })
            }
            Some(exterior) if exterior.is_empty() => {
                return Err(SceneError::MalformedPolygon {
                    reason: "exterior ring is empty".to_string(),
                })
            }
            Some(_) => {}
        }

        let mut sub_paths = Vec::with_capacity(rings.len());
        for ring in rings {
            let points = self.precision.process_sequence(ring)?;
            if !points.is_empty() {
                sub_paths.push(SubPath { points });
            }
        }
        // Holes lie inside the exterior ring, so it alone bounds the path.
        let bbox = sub_paths
            .first()
            .and_then(|exterior| bbox_of(&exterior.points))
            .unwrap_or_default();

        Ok(DrawablePrimitive {
            id: self.next_id(),
            shape: Shape::Path {
                sub_paths,
                fill_rule: FillRule::EvenOdd,
            },
            style: self.stroked(),
            bbox,
        })
    }

    fn stroked(&self) -> Style {
        Style {
            stroke: Some(self.options.stroke()),
            fill: None,
            stroke_width: Some(self.options.stroke_width()),
        }
    }
}

fn bbox_of(points: &[ScenePoint]) -> Option<BoundingBox> {
    let (first, rest) = points.split_first()?;
    let mut bbox = BoundingBox::from_point(first.x, first.y);
    for p in rest {
        bbox.add_point(p.x, p.y);
    }
    Some(bbox)
}
