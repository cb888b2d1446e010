use super::*;

fn at(mask: &GrayImage, x: u32, y: u32) -> u8 {
    mask.get_pixel(x, y).0[0]
}

fn inside(mask: &GrayImage, x: u32, y: u32) -> bool {
    at(mask, x, y) > 250
}

fn outside(mask: &GrayImage, x: u32, y: u32) -> bool {
    at(mask, x, y) < 5
}

#[test]
fn pane_covers_everything() {
    let m = shape_mask(ShapeKind::Pane, Vec2i::new(10, 6), 0).unwrap();
    assert_eq!(m.dimensions(), (10, 6));
    assert!(m.pixels().all(|p| p.0[0] > 250));
}

#[test]
fn side_tab_cuts_top_left_corner() {
    let m = shape_mask(ShapeKind::SideTab, Vec2i::new(40, 40), 0).unwrap();
    assert!(outside(&m, 1, 1));
    assert!(inside(&m, 35, 35));
    assert!(inside(&m, 1, 38));
    assert!(inside(&m, 38, 1));
}

#[test]
fn tuck_tab_rounds_bottom_corners() {
    let m = shape_mask(ShapeKind::TuckTab, Vec2i::new(40, 20), 0).unwrap();
    assert!(inside(&m, 1, 1));
    assert!(inside(&m, 38, 8));
    assert!(inside(&m, 20, 15));
    assert!(outside(&m, 0, 19));
    assert!(outside(&m, 39, 19));
}

#[test]
fn back_has_thumb_cutout_on_top_edge() {
    let m = shape_mask(ShapeKind::Back, Vec2i::new(100, 100), 40).unwrap();
    assert!(outside(&m, 50, 2));
    assert!(inside(&m, 50, 20));
    assert!(inside(&m, 5, 5));
    assert!(inside(&m, 95, 2));
}

#[test]
fn outline_lists_cut_only_for_back() {
    assert!(outline(ShapeKind::Pane, Vec2i::new(5, 5), 0).cut.is_empty());
    assert_eq!(outline(ShapeKind::TuckTab, Vec2i::new(5, 5), 0).fill.len(), 2);
    assert_eq!(outline(ShapeKind::Back, Vec2i::new(5, 5), 2).cut.len(), 1);
}

#[test]
fn empty_size_yields_empty_mask() {
    let m = shape_mask(ShapeKind::Pane, Vec2i::new(0, 7), 0).unwrap();
    assert_eq!(m.dimensions(), (0, 7));
}
