use super::*;

#[test]
fn dim3_index_matches_named_components() {
    let d = Dim3::new(2.5, 3.5, 1.0);
    assert_eq!(d[0], d.width);
    assert_eq!(d[1], d.height);
    assert_eq!(d[2], d.depth);
}

#[test]
fn dim3_scale_and_floor() {
    let d = Dim3::new(2.5, 3.5, 1.0).scaled(300.0).floor_i32();
    assert_eq!(d, Dim3::new(750, 1050, 300));
    assert_eq!(d.to_vec2(), Vec2i::new(750, 1050));
}

#[test]
fn vec2i_arithmetic() {
    let a = Vec2i::new(10, 20);
    let b = Vec2i::new(3, 4);
    assert_eq!(a + b, Vec2i::new(13, 24));
    assert_eq!(a - b, Vec2i::new(7, 16));
    assert_eq!(b * 2, Vec2i::new(6, 8));
    assert_eq!(a.transposed(), Vec2i::new(20, 10));
    assert_eq!(Vec2i::new(-5, 7).extent(), (0, 7));
}

#[test]
fn premul_from_straight_rounds() {
    let c = Rgba8Premul::from_straight_rgba(255, 128, 0, 128);
    assert_eq!(c, Rgba8Premul { r: 128, g: 64, b: 0, a: 128 });
    assert_eq!(Rgba8Premul::transparent().to_array(), [0, 0, 0, 0]);
}

#[test]
fn integer_dims_are_eq() {
    fn total_eq<T: Eq>(a: T, b: T) -> bool {
        a == b
    }
    assert!(total_eq(Dim3::new(1, 2, 3), Dim3::new(1, 2, 3)));
    assert!(!total_eq(Dim3::new(1, 2, 3), Dim3::new(1, 2, 4)));
}
