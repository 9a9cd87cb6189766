use geoscene_core::{BoundingBox, Feature, GeoNode, Position, SceneError};
use geoscene_render::{
    convert, ElementId, FillRule, Precision, RenderOptions, Scene, SceneNode, SeededSeeds, Shape,
    StyleAssigner,
};

fn convert_at(tree: &GeoNode, precision: f64) -> Result<Scene, SceneError> {
    let mut styles = StyleAssigner::with_source(SeededSeeds::new(11));
    convert(
        tree,
        Precision::new(precision).unwrap(),
        &mut styles,
        &RenderOptions::default(),
    )
}

fn square_with_holes(holes: usize) -> GeoNode {
    let mut rings = vec![vec![
        [0.0, 0.0],
        [10.0, 0.0],
        [10.0, 10.0],
        [0.0, 10.0],
        [0.0, 0.0],
    ]];
    for i in 0..holes {
        let o = 1.0 + 4.0 * i as f64;
        rings.push(vec![[o, 1.0], [o + 2.0, 1.0], [o + 2.0, 3.0], [o, 1.0]]);
    }
    GeoNode::polygon(rings)
}

#[test]
fn test_polygon_with_two_holes() {
    let scene = convert_at(&square_with_holes(2), 0.0).unwrap();
    assert_eq!(scene.primitive_count(), 1);
    match &scene.primitives().next().unwrap().shape {
        Shape::Path {
            sub_paths,
            fill_rule,
        } => {
            assert_eq!(sub_paths.len(), 3);
            assert_eq!(*fill_rule, FillRule::EvenOdd);
            for sp in sub_paths {
                assert!(sp.to_path_data().ends_with("z "));
                assert!(sp.to_path_data().starts_with('M'));
            }
        }
        other => panic!("expected a path, got {:?}", other),
    }
    assert_eq!(scene.bbox.to_tuple(), (0.0, -10.0, 10.0, 10.0));
}

#[test]
fn test_multi_polygon_one_path_each() {
    let tree = GeoNode::MultiPolygon {
        coordinates: vec![
            vec![vec![
                Position::xy(0.0, 0.0),
                Position::xy(1.0, 0.0),
                Position::xy(1.0, 1.0),
                Position::xy(0.0, 0.0),
            ]],
            vec![vec![
                Position::xy(5.0, 5.0),
                Position::xy(6.0, 5.0),
                Position::xy(6.0, 6.0),
                Position::xy(5.0, 5.0),
            ]],
        ],
    };
    let scene = convert_at(&tree, 0.0).unwrap();
    assert_eq!(scene.primitive_count(), 2);
    assert_eq!(scene.bbox.to_tuple(), (0.0, -6.0, 6.0, 6.0));
}

#[test]
fn test_multi_point_and_multi_line() {
    let tree = GeoNode::MultiPoint {
        coordinates: vec![Position::xy(1.0, 1.0), Position::xy(3.0, 2.0)],
    };
    let scene = convert_at(&tree, 1.0).unwrap();
    // Points are never decimated.
    assert_eq!(scene.primitive_count(), 2);

    let tree = GeoNode::MultiLineString {
        coordinates: vec![
            vec![Position::xy(0.0, 0.0), Position::xy(1.0, 0.0)],
            vec![Position::xy(2.0, 0.0)],
        ],
    };
    assert_eq!(
        convert_at(&tree, 0.0),
        Err(SceneError::MalformedLineString { points: 1 })
    );
}

#[test]
fn test_geometry_collection_appends_members() {
    let tree = GeoNode::GeometryCollection {
        geometries: vec![
            GeoNode::point(0.0, 0.0),
            GeoNode::line_string([[1.0, 1.0], [2.0, 3.0]]),
            GeoNode::GeometryCollection { geometries: vec![] },
            square_with_holes(0),
        ],
    };
    let scene = convert_at(&tree, 0.0).unwrap();
    assert_eq!(scene.nodes.len(), 3);
    assert!(scene
        .nodes
        .iter()
        .all(|n| matches!(n, SceneNode::Primitive(_))));
    let ids: Vec<ElementId> = scene.primitives().map(|p| p.id).collect();
    assert_eq!(ids, vec![ElementId(1), ElementId(2), ElementId(3)]);
    assert_eq!(scene.bbox.to_tuple(), (0.0, -10.0, 10.0, 10.0));
}

#[test]
fn test_empty_collections_yield_empty_scene() {
    let scene = convert_at(&GeoNode::FeatureCollection { features: vec![] }, 0.0).unwrap();
    assert!(scene.is_empty());
    assert_eq!(scene.bbox, BoundingBox::default());

    let scene = convert_at(&GeoNode::GeometryCollection { geometries: vec![] }, 0.0).unwrap();
    assert!(scene.is_empty());
}

#[test]
fn test_feature_collection_paints_labels_last() {
    let tree = GeoNode::FeatureCollection {
        features: vec![
            Feature::new(GeoNode::point(0.0, 0.0)).with_property("name", "West Point"),
            Feature::new(GeoNode::point(8.0, 0.0)).with_property("name", "East Point"),
        ],
    };
    let scene = convert_at(&tree, 0.0).unwrap();
    let groups: Vec<_> = scene.groups().collect();
    assert_eq!(groups.len(), 2);
    assert_eq!(scene.labels.len(), 2);
    assert_eq!(scene.labels[0].text, "West Point");
    assert_eq!(scene.labels[1].reveal_on, groups[1].id);
    assert_eq!(scene.bbox.to_tuple(), (0.0, 0.0, 8.0, 0.0));
}

#[test]
fn test_feature_from_json_with_fallback_label() {
    let tree = GeoNode::from_json_str(
        r#"{"type":"Feature","properties":{"pop":3},"geometry":{"type":"LineString","coordinates":[[0,0],[2,2]]}}"#,
    )
    .unwrap();
    let scene = convert_at(&tree, 0.0).unwrap();
    assert_eq!(scene.labels[0].text, "Unclaimed Territory");
}

#[test]
fn test_bad_position_length() {
    let tree = GeoNode::Point {
        coordinates: Position(vec![1.0]),
    };
    assert!(matches!(
        convert_at(&tree, 0.0),
        Err(SceneError::MalformedPosition { .. })
    ));
}

#[test]
fn test_feature_collection_nested_in_geometry_slot() {
    let tree = GeoNode::Feature(Feature::new(GeoNode::FeatureCollection { features: vec![] }));
    assert_eq!(
        convert_at(&tree, 0.0),
        Err(SceneError::UnrecognizedGeometryType {
            found: "FeatureCollection".to_string()
        })
    );
}
