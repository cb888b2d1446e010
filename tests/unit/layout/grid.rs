use super::*;

#[test]
fn corners_of_square_grid() {
    let g = FeatureGrid::new(Vec2i::new(2, 2), Vec2i::new(100, 200), 10).unwrap();
    assert_eq!(g.get_pos(Vec2i::new(0, 0)).unwrap(), Vec2i::new(10, 10));
    assert_eq!(g.get_pos(Vec2i::new(1, 1)).unwrap(), Vec2i::new(50, 100));
    assert_eq!(g.get_pos(Vec2i::new(2, 2)).unwrap(), Vec2i::new(90, 190));
}

#[test]
fn out_of_range_coordinate_is_a_grid_error() {
    let g = FeatureGrid::new(Vec2i::new(2, 2), Vec2i::new(100, 200), 10).unwrap();
    for c in [Vec2i::new(3, 3), Vec2i::new(0, 3), Vec2i::new(3, 0), Vec2i::new(-1, 0)] {
        let err = g.get_pos(c).unwrap_err();
        assert!(matches!(err, TuckboxError::Grid(_)), "{c:?}: {err}");
    }
}

#[test]
fn uneven_lines_per_axis() {
    let g = FeatureGrid::new(Vec2i::new(1, 3), Vec2i::new(100, 200), 10).unwrap();
    assert_eq!(g.get_pos(Vec2i::new(1, 0)).unwrap(), Vec2i::new(90, 10));
    // floor(180 / 3) = 60
    assert_eq!(g.get_pos(Vec2i::new(0, 3)).unwrap(), Vec2i::new(10, 190));
}

#[test]
fn spacing_rounds_down_and_leaves_a_gap() {
    let g = FeatureGrid::new(Vec2i::new(3, 1), Vec2i::new(100, 100), 0).unwrap();
    assert_eq!(g.get_pos(Vec2i::new(3, 0)).unwrap(), Vec2i::new(99, 0));
}

#[test]
fn zero_lines_are_rejected() {
    for lines in [Vec2i::new(0, 2), Vec2i::new(2, 0), Vec2i::new(-1, 1)] {
        let err = FeatureGrid::new(lines, Vec2i::new(100, 100), 0).unwrap_err();
        assert!(matches!(err, TuckboxError::Grid(_)));
    }
}
