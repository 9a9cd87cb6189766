use std::sync::Arc;

use geoscene_core::{BoundingBox, GeoNode};
use geoscene_render::{Precision, Scene, SceneCache, SeededSeeds};
use geoscene_viewport::{PointerButton, ViewportController};

fn scene_with_bbox(bbox: BoundingBox) -> Arc<Scene> {
    Arc::new(Scene {
        nodes: Vec::new(),
        labels: Vec::new(),
        bbox,
        precision: Precision::FULL,
    })
}

#[test]
fn test_new_scene_resets_to_square() {
    let mut vp = ViewportController::default();
    let scene = scene_with_bbox(BoundingBox::new(2.0, -8.0, 10.0, 4.0));
    assert!(vp.sync_scene(&scene));
    assert_eq!(vp.view_box(), (2.0, -8.0, 10.0, 10.0));
}

#[test]
fn test_same_scene_keeps_pan_and_zoom() {
    let mut vp = ViewportController::new(100.0, 100.0, BoundingBox::default());
    let scene = scene_with_bbox(BoundingBox::new(0.0, 0.0, 50.0, 50.0));
    vp.sync_scene(&scene);
    vp.wheel(10.0, 10.0, -100.0);
    let zoomed = vp.view_box();

    assert!(!vp.sync_scene(&scene));
    assert_eq!(vp.view_box(), zoomed);
}

#[test]
fn test_equal_but_distinct_scene_resets() {
    let mut vp = ViewportController::new(100.0, 100.0, BoundingBox::default());
    let bbox = BoundingBox::new(0.0, 0.0, 50.0, 50.0);
    let first = scene_with_bbox(bbox);
    vp.sync_scene(&first);
    vp.press(0.0, 0.0, PointerButton::Primary);
    vp.pointer_move(10.0, 0.0, true);
    assert!(vp.is_dragging());

    let second = scene_with_bbox(bbox);
    assert!(vp.sync_scene(&second));
    assert!(!vp.is_dragging());
    assert_eq!(vp.view_box(), (0.0, 0.0, 50.0, 50.0));
}

#[test]
fn test_controllers_track_scenes_independently() {
    let scene = scene_with_bbox(BoundingBox::new(0.0, 0.0, 4.0, 4.0));
    let mut a = ViewportController::default();
    let mut b = ViewportController::default();
    assert!(a.sync_scene(&scene));
    assert!(!a.sync_scene(&scene));
    assert!(b.sync_scene(&scene));
}

#[test]
fn test_cache_hit_does_not_reset_view() {
    let tree = GeoNode::line_string([[0.0, 0.0], [10.0, 10.0]]);
    let mut cache = SceneCache::with_seed_source(SeededSeeds::new(0));
    let mut vp = ViewportController::new(100.0, 100.0, BoundingBox::default());

    let scene = cache.get_or_build(&tree, Precision::FULL, false).unwrap();
    assert!(vp.sync_scene(&scene));
    assert_eq!(vp.view_box(), (0.0, -10.0, 10.0, 10.0));
    vp.wheel(50.0, 50.0, -100.0);

    let scene = cache.get_or_build(&tree, Precision::FULL, false).unwrap();
    assert!(!vp.sync_scene(&scene));

    let scene = cache.get_or_build(&tree, Precision::FULL, true).unwrap();
    assert!(vp.sync_scene(&scene));
    assert_eq!(vp.view_box(), (0.0, -10.0, 10.0, 10.0));
}
