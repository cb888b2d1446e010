use super::*;
use crate::assets::text::TextAlign;
use crate::config::{FontConfig, ImageOptions};
use crate::foundation::core::Rgba8Premul;
use crate::test_support::{BlockText, temp_png};

fn render(cfg: &FeatureConfig, bounds: Vec2i) -> (RgbaImage, Diagnostics) {
    let mut diagnostics = Diagnostics::new();
    let mut env = RenderEnv {
        text: &BlockText,
        diagnostics: &mut diagnostics,
    };
    let img = feature_renderer(cfg).render(bounds, &mut env).unwrap();
    (img, diagnostics)
}

fn text_feature(text: &str, size: u32) -> FeatureConfig {
    FeatureConfig::new(FeatureKind::Text(TextOptions {
        text: text.to_owned(),
        align: TextAlign::Center,
        font: FontConfig {
            path: "unused.ttf".into(),
            size,
            color: Rgba8Premul::opaque(0, 0, 0),
            stroke: Rgba8Premul::opaque(255, 255, 255),
            stroke_width: 0,
        },
    }))
}

#[test]
fn panel_draws_border_inside_edge() {
    let cfg = FeatureConfig::new(FeatureKind::Panel(PanelOptions {
        color: Rgba8Premul::opaque(255, 255, 255),
        border: Rgba8Premul::opaque(255, 0, 0),
        border_width: 2,
    }));
    let (img, _) = render(&cfg, Vec2i::new(10, 6));
    assert_eq!(img.dimensions(), (10, 6));
    assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 255]);
    assert_eq!(img.get_pixel(1, 5).0, [255, 0, 0, 255]);
    assert_eq!(img.get_pixel(9, 3).0, [255, 0, 0, 255]);
    assert_eq!(img.get_pixel(2, 2).0, [255, 255, 255, 255]);
    assert_eq!(img.get_pixel(7, 3).0, [255, 255, 255, 255]);
}

#[test]
fn panel_without_border_is_solid() {
    let cfg = FeatureConfig::new(FeatureKind::Panel(PanelOptions {
        color: Rgba8Premul::opaque(1, 2, 3),
        border: Rgba8Premul::opaque(255, 0, 0),
        border_width: 0,
    }));
    let (img, _) = render(&cfg, Vec2i::new(4, 4));
    assert!(img.pixels().all(|p| p.0 == [1, 2, 3, 255]));
}

#[test]
fn fit_within_keeps_aspect() {
    assert_eq!(fit_within((200, 100), Vec2i::new(50, 50)), Vec2i::new(50, 25));
    assert_eq!(fit_within((100, 200), Vec2i::new(50, 50)), Vec2i::new(25, 50));
    assert_eq!(fit_within((100, 100), Vec2i::new(80, 40)), Vec2i::new(40, 40));
}

#[test]
fn image_fits_unless_both_axes_requested() {
    let path = temp_png("feature-wide.png", 40, 20, [0, 0, 255, 255]);
    let mut cfg = FeatureConfig::new(FeatureKind::Image(ImageOptions { path }));

    let (img, _) = render(&cfg, Vec2i::new(30, 30));
    assert_eq!(img.dimensions(), (30, 15));

    cfg.width = Some(1.0);
    cfg.height = Some(1.0);
    let (img, _) = render(&cfg, Vec2i::new(30, 30));
    assert_eq!(img.dimensions(), (30, 30));
}

#[test]
fn text_shrinks_to_fit_and_centers() {
    let (img, diag) = render(&text_feature("abcd", 90), Vec2i::new(100, 60));
    assert!(diag.is_empty());
    assert_eq!(img.dimensions(), (100, 60));
    // Size 49 is the largest with 2*size < 100: block 98x49, centered on (50, 30).
    assert_eq!(img.get_pixel(1, 6).0, [0, 0, 0, 255]);
    assert_eq!(img.get_pixel(98, 54).0, [0, 0, 0, 255]);
    assert_eq!(img.get_pixel(0, 6).0[3], 0);
    assert_eq!(img.get_pixel(1, 5).0[3], 0);
    assert_eq!(img.get_pixel(99, 30).0[3], 0);
}

#[test]
fn text_anchored_at_start_sits_top_left() {
    let mut cfg = text_feature("ab", 10);
    cfg.anchor = Vec2i::new(0, 0);
    let (img, _) = render(&cfg, Vec2i::new(50, 50));
    assert_eq!(img.get_pixel(0, 0).0[3], 255);
    assert_eq!(img.get_pixel(9, 9).0[3], 255);
    assert_eq!(img.get_pixel(10, 0).0[3], 0);
}

#[test]
fn text_that_never_fits_warns_at_minimum_size() {
    let (img, diag) = render(&text_feature("abcdefgh", 90), Vec2i::new(10, 10));
    assert_eq!(diag.count(WarningKind::TextOverflow), 1);
    assert_eq!(img.dimensions(), (10, 10));
}
