use geoscene_core::Position;
use geoscene_render::{Precision, ScenePoint};
use proptest::prelude::*;

fn diagonal(n: usize) -> Vec<Position> {
    (0..n).map(|i| Position::xy(i as f64, i as f64)).collect()
}

#[test]
fn test_y_negated_x_kept() {
    let p = Precision::FULL
        .transform(&Position::xy(12.5, 3.25))
        .unwrap();
    assert_eq!(p, ScenePoint::new(12.5, -3.25));
}

#[test]
fn test_z_passthrough_unrounded() {
    let p = Precision::new(1.0)
        .unwrap()
        .transform(&Position::xyz(1.4, 2.6, 0.123456))
        .unwrap();
    assert_eq!((p.x, p.y, p.z), (1.0, -2.0, Some(0.123456)));
}

#[test]
fn test_each_ring_decimates_independently() {
    let ring = diagonal(4);
    let p = Precision::new(0.5).unwrap();
    let a = p.process_sequence(&ring).unwrap();
    let b = p.process_sequence(&ring).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.len(), 2);
}

proptest! {
    #[test]
    fn zero_precision_keeps_every_distinct_point(n in 2usize..200) {
        let out = Precision::FULL.process_sequence(&diagonal(n)).unwrap();
        prop_assert_eq!(out.len(), n);
    }

    #[test]
    fn full_precision_keeps_only_first(n in 1usize..200) {
        let out = Precision::new(1.0).unwrap().process_sequence(&diagonal(n)).unwrap();
        prop_assert_eq!(out, vec![ScenePoint::new(0.0, 0.0)]);
    }

    #[test]
    fn kept_fraction_tracks_precision(p in 0.05f64..0.95) {
        let n = 2000;
        let precision = Precision::new(p).unwrap();
        let mut d = precision.decimator();
        let kept = (0..n).filter(|_| d.keep()).count();
        let expected = (1.0 - p) * n as f64;
        prop_assert!((kept as f64 - expected).abs() <= 2.0);
    }

    #[test]
    fn no_consecutive_duplicates(coords in prop::collection::vec((-50i32..50, -50i32..50), 2..60), p in 0.0f64..1.0) {
        let seq: Vec<Position> = coords
            .iter()
            .map(|&(x, y)| Position::xy(x as f64 / 3.0, y as f64 / 3.0))
            .collect();
        let out = Precision::new(p).unwrap().process_sequence(&seq).unwrap();
        prop_assert!(!out.is_empty());
        for w in out.windows(2) {
            prop_assert!(w[0] != w[1]);
        }
    }
}
