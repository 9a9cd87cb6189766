use std::sync::Arc;

use geoscene_core::{Feature, GeoNode};
use geoscene_render::{Precision, RenderOptions, SceneCache, SeededSeeds};

fn tree() -> GeoNode {
    GeoNode::FeatureCollection {
        features: vec![
            Feature::new(GeoNode::line_string([[0.0, 0.0], [3.0, 4.0]]))
                .with_property("name", "Long Trail"),
        ],
    }
}

#[test]
fn test_cache_identity_until_refresh() {
    let mut cache = SceneCache::with_seed_source(SeededSeeds::new(5));
    let t = tree();

    let first = cache.get_or_build(&t, Precision::FULL, false).unwrap();
    let again = cache.get_or_build(&t, Precision::FULL, false).unwrap();
    assert!(Arc::ptr_eq(&first, &again));

    let refreshed = cache.get_or_build(&t, Precision::FULL, true).unwrap();
    assert!(!Arc::ptr_eq(&first, &refreshed));
    assert!(Arc::ptr_eq(cache.current().unwrap(), &refreshed));
}

#[test]
fn test_precision_change_rebuilds_and_is_recorded() {
    let mut cache = SceneCache::with_seed_source(SeededSeeds::new(5));
    let t = tree();
    let fine = cache.get_or_build(&t, Precision::FULL, false).unwrap();
    let coarse = Precision::new(0.9).unwrap();
    let rough = cache.get_or_build(&t, coarse, false).unwrap();
    assert!(!Arc::ptr_eq(&fine, &rough));
    assert_eq!(rough.precision, coarse);
    assert_eq!(cache.precision(), coarse);

    let again = cache.get_or_build(&t, coarse, false).unwrap();
    assert!(Arc::ptr_eq(&rough, &again));
}

#[test]
fn test_failed_rebuild_leaves_cache_untouched() {
    let mut cache = SceneCache::with_seed_source(SeededSeeds::new(5));
    let held = cache.get_or_build(&tree(), Precision::FULL, false).unwrap();

    let broken = GeoNode::Polygon {
        coordinates: vec![],
    };
    let half = Precision::new(0.5).unwrap();
    assert!(cache.get_or_build(&broken, half, false).is_err());

    assert_eq!(cache.precision(), Precision::FULL);
    assert!(Arc::ptr_eq(cache.current().unwrap(), &held));
    assert_eq!(cache.bbox().to_tuple(), (0.0, -4.0, 3.0, 4.0));
}

#[test]
fn test_custom_options_flow_into_scene() {
    let options = RenderOptions {
        label_font_size: 2.5,
        fallback_label: "Unnamed".to_string(),
        ..Default::default()
    };
    let mut cache = SceneCache::with_seed_source(SeededSeeds::new(5)).with_options(options);
    let t = GeoNode::Feature(Feature::new(GeoNode::point(1.0, 1.0)));
    let scene = cache.get_or_build(&t, Precision::FULL, false).unwrap();
    assert_eq!(scene.labels[0].text, "Unnamed");
    assert_eq!(scene.labels[0].font_size, 2.5);
}
