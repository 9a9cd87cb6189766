use geoscene_core::BoundingBox;
use geoscene_viewport::{PointerButton, PointerEvent, ViewportController, ZoomOptions};
use proptest::prelude::*;

fn hundred() -> ViewportController {
    ViewportController::new(100.0, 100.0, BoundingBox::new(0.0, 0.0, 100.0, 100.0))
}

#[test]
fn test_wheel_up_zooms_in_about_cursor() {
    let mut vp = hundred();
    let before = vp.pixel_to_scene(50.0, 50.0);

    vp.handle_event(PointerEvent::Wheel {
        x: 50.0,
        y: 50.0,
        delta_y: -100.0,
    });

    let (_, _, w, h) = vp.view_box();
    assert!(w < 100.0);
    assert!(h < 100.0);
    assert!((w - 100.0 / 1.05).abs() < 1e-9);
    let after = vp.pixel_to_scene(50.0, 50.0);
    assert!((before.0 - after.0).abs() < 1e-9);
    assert!((before.1 - after.1).abs() < 1e-9);
    assert_eq!(vp.zoom(), 1.0);
}

#[test]
fn test_wheel_down_zooms_out() {
    let mut vp = hundred();
    vp.wheel(10.0, 90.0, 100.0);
    let (_, _, w, _) = vp.view_box();
    assert!(w > 100.0);
}

#[test]
fn test_zoom_is_clamped_per_event() {
    let mut vp = hundred();
    vp.wheel(0.0, 0.0, -1_000_000.0);
    let (x, y, w, h) = vp.view_box();
    assert!((w - 100.0 / 3.0).abs() < 1e-9);
    assert!((h - 100.0 / 3.0).abs() < 1e-9);
    assert!(x.abs() < 1e-9 && y.abs() < 1e-9);

    let mut vp = hundred();
    vp.wheel(0.0, 0.0, 1_000_000.0);
    let (_, _, w, _) = vp.view_box();
    assert!((w - 1000.0).abs() < 1e-6);
}

#[test]
fn test_widget_origin_offsets_wheel_position() {
    let mut vp = hundred();
    vp.set_widget_origin(200.0, 300.0);
    let before = vp.pixel_to_scene(25.0, 75.0);
    vp.wheel(225.0, 375.0, -250.0);
    let after = vp.pixel_to_scene(25.0, 75.0);
    assert!((before.0 - after.0).abs() < 1e-9);
    assert!((before.1 - after.1).abs() < 1e-9);
}

#[test]
fn test_custom_zoom_base() {
    let options = ZoomOptions {
        base: 1.1,
        ..Default::default()
    };
    let mut vp = hundred().with_zoom_options(options);
    vp.wheel(0.0, 0.0, -100.0);
    let (_, _, w, _) = vp.view_box();
    assert!((w - 100.0 / 1.1).abs() < 1e-9);
}

#[test]
fn test_drag_pans_incrementally() {
    let mut vp = ViewportController::new(200.0, 200.0, BoundingBox::new(0.0, 0.0, 100.0, 100.0));
    vp.handle_event(PointerEvent::Press {
        x: 100.0,
        y: 100.0,
        button: PointerButton::Primary,
    });
    vp.handle_event(PointerEvent::Move {
        x: 110.0,
        y: 100.0,
        primary_held: true,
    });
    vp.handle_event(PointerEvent::Move {
        x: 120.0,
        y: 90.0,
        primary_held: true,
    });
    // 20px right and 10px up at 0.5 units per pixel.
    let (x, y, w, h) = vp.view_box();
    assert!((x + 10.0).abs() < 1e-9);
    assert!((y - 5.0).abs() < 1e-9);
    assert_eq!((w, h), (100.0, 100.0));

    vp.handle_event(PointerEvent::Release);
    assert!(!vp.is_dragging());
    vp.handle_event(PointerEvent::Move {
        x: 0.0,
        y: 0.0,
        primary_held: true,
    });
    assert!((vp.view_box().0 + 10.0).abs() < 1e-9);
}

#[test]
fn test_leave_ends_drag() {
    let mut vp = hundred();
    vp.handle_event(PointerEvent::Press {
        x: 0.0,
        y: 0.0,
        button: PointerButton::Primary,
    });
    vp.handle_event(PointerEvent::Leave);
    assert!(!vp.is_dragging());
}

proptest! {
    #[test]
    fn cursor_point_is_invariant_under_zoom(
        px in 0.0f64..640.0,
        py in 0.0f64..480.0,
        delta in -500.0f64..500.0,
        vx in -1000.0f64..1000.0,
        vy in -1000.0f64..1000.0,
        side in 0.5f64..2000.0,
    ) {
        let mut vp = ViewportController::new(640.0, 480.0, BoundingBox::new(vx, vy, side, side));
        let before = vp.pixel_to_scene(px, py);
        vp.wheel(px, py, delta);
        let after = vp.pixel_to_scene(px, py);
        let eps = 1e-9 * side.max(1.0) * 1000.0;
        prop_assert!((before.0 - after.0).abs() < eps);
        prop_assert!((before.1 - after.1).abs() < eps);
    }
}
