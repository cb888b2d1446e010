use super::*;

fn load(json: &str) -> TuckboxResult<BoxConfig> {
    BoxConfig::from_json_str(json, "/cfg")
}

const MINIMAL: &str = r#"{ "dimensions": { "width": 2.5, "height": 3.5, "depth": 1 } }"#;

#[test]
fn minimal_document_gets_defaults() {
    let cfg = load(MINIMAL).unwrap();
    assert_eq!(cfg.resolution, 300);
    assert_eq!(cfg.page.width, 11.0);
    assert_eq!(cfg.page.height, 8.5);
    assert_eq!(cfg.page.thickness, 4);
    assert_eq!(cfg.border.color, Rgba8Premul::opaque(0, 0, 0));
    assert_eq!(cfg.border.width, 4);
    assert!(!cfg.background.is_set());
    assert!(cfg.warnings().is_empty());

    let front = cfg.section(PanelName::Front);
    assert_eq!(front.grid, Vec2i::new(2, 2));
    assert_eq!(front.margin, 0.1);
    assert!(front.features.is_empty());
    assert!(front.rotated.is_none());
}

#[test]
fn missing_dimensions_fail_validation() {
    let err = load(r#"{ "page": {} }"#).unwrap_err();
    assert!(matches!(err, TuckboxError::Validation(_)));

    let err = load(r#"{ "dimensions": { "width": 0, "height": 1, "depth": 1 } }"#).unwrap_err();
    assert!(err.to_string().contains("dimensions.width"));
}

#[test]
fn portrait_page_is_swapped_with_warning() {
    let cfg = load(
        r#"{ "dimensions": { "width": 1, "height": 1, "depth": 1 },
             "page": { "width": 8.5, "height": 11 } }"#,
    )
    .unwrap();
    assert_eq!(cfg.page.width, 11.0);
    assert_eq!(cfg.page.height, 8.5);
    assert_eq!(cfg.diagnostics().count(WarningKind::PageOrientation), 1);
}

#[test]
fn group_config_is_shared_and_specific_wins() {
    let cfg = load(
        r##"{ "dimensions": { "width": 1, "height": 1, "depth": 1 },
              "detail": {
                "sides": { "grid": [3, 3] },
                "right": { "grid": [4, 4] },
                "faces": { "background": { "color": "#ff0000" } }
              } }"##,
    )
    .unwrap();
    assert_eq!(cfg.section(PanelName::Left).grid, Vec2i::new(3, 3));
    assert_eq!(cfg.section(PanelName::Right).grid, Vec2i::new(4, 4));
    assert!(Arc::ptr_eq(
        cfg.section(PanelName::Front),
        cfg.section(PanelName::Back)
    ));
    assert_eq!(
        cfg.section(PanelName::Back).background.color,
        Some(Rgba8Premul::opaque(255, 0, 0))
    );
    assert_eq!(cfg.section(PanelName::Top).grid, Vec2i::new(2, 2));
}

#[test]
fn section_overrides_do_not_leak_into_siblings() {
    let cfg = load(
        r#"{ "dimensions": { "width": 1, "height": 1, "depth": 1 },
             "detail": { "front": { "margin": 0.5, "orientation": "LANDSCAPE", "rotated": true } } }"#,
    )
    .unwrap();
    let front = cfg.section(PanelName::Front);
    assert_eq!(front.margin, 0.5);
    assert_eq!(front.orientation, Some(Orientation::Landscape));
    assert_eq!(front.rotated, Some(true));
    assert_eq!(cfg.section(PanelName::Back).margin, 0.1);
}

#[test]
fn features_resolve_options_and_paths() {
    let cfg = load(
        r#"{ "dimensions": { "width": 1, "height": 1, "depth": 1 },
             "common": { "image_source": "img", "font_source": "fonts", "font": { "name": "Body.otf", "size": 40 } },
             "detail": { "front": { "features": [
               { "type": "Panel", "options": { "color": "white", "border_width": 3 } },
               { "type": "text", "options": { "text": ["a", "b"], "align": "RIGHT", "font": { "color": "red" } },
                 "place": [0, 2], "anchor": [0, 2] },
               { "type": "image", "options": { "image": "logo.png", "image_source": "extra" }, "width": 0.5 }
             ] } } }"#,
    )
    .unwrap();
    let features = &cfg.section(PanelName::Front).features;
    assert_eq!(features.len(), 3);

    let FeatureKind::Panel(p) = &features[0].kind else {
        panic!("expected panel");
    };
    assert_eq!(p.color, Rgba8Premul::opaque(255, 255, 255));
    assert_eq!(p.border, Rgba8Premul::opaque(128, 128, 128));
    assert_eq!(p.border_width, 3);

    let FeatureKind::Text(t) = &features[1].kind else {
        panic!("expected text");
    };
    assert_eq!(t.text, "a\nb");
    assert_eq!(t.align, TextAlign::Right);
    assert_eq!(t.font.path, Path::new("/cfg/fonts/Body.otf"));
    assert_eq!(t.font.size, 40);
    assert_eq!(t.font.color, Rgba8Premul::opaque(255, 0, 0));
    assert_eq!(features[1].place, Vec2i::new(0, 2));
    assert_eq!(features[1].anchor, Vec2i::new(0, 2));

    let FeatureKind::Image(i) = &features[2].kind else {
        panic!("expected image");
    };
    assert_eq!(i.path, Path::new("/cfg/extra/logo.png"));
    assert_eq!(features[2].width, Some(0.5));
    assert_eq!(features[2].height, None);
}

#[test]
fn image_source_override_replaces_common_directory() {
    let cfg = load(
        r#"{ "dimensions": { "width": 1, "height": 1, "depth": 1 },
             "common": { "image_source": "imgs" },
             "background": { "image": "page.png" },
             "detail": {
               "back": { "background": { "image": "bg.png", "image_source": "textures" } },
               "front": { "features": [
                 { "type": "image", "options": { "image": "x.png", "image_source": "art" } },
                 { "type": "image", "options": { "image": "y.png" } }
               ] } } }"#,
    )
    .unwrap();

    assert_eq!(cfg.background.image.as_deref(), Some(Path::new("/cfg/imgs/page.png")));
    assert_eq!(
        cfg.section(PanelName::Back).background.image.as_deref(),
        Some(Path::new("/cfg/textures/bg.png"))
    );

    let paths: Vec<_> = cfg
        .section(PanelName::Front)
        .features
        .iter()
        .map(|f| match &f.kind {
            FeatureKind::Image(i) => i.path.clone(),
            other => panic!("expected image, got {}", other.name()),
        })
        .collect();
    assert_eq!(
        paths,
        [PathBuf::from("/cfg/art/x.png"), PathBuf::from("/cfg/imgs/y.png")]
    );
}

#[test]
fn invalid_feature_settings_are_rejected() {
    let cases = [
        r#"{ "type": "circle" }"#,
        r#"{ "type": "text" }"#,
        r#"{ "type": "text", "options": { "txt": "x" } }"#,
        r#"{ "type": "image", "options": {} }"#,
        r#"{ "type": "panel", "anchor": [3, 0] }"#,
        r#"{ "type": "panel", "width": -1 }"#,
        r#"{ "type": "text", "options": { "text": "x", "align": "middle" } }"#,
        r#"{ "type": "text", "options": { "text": "x", "font": { "name": "font.woff" } } }"#,
    ];
    for feature in cases {
        let doc = format!(
            r#"{{ "dimensions": {{ "width": 1, "height": 1, "depth": 1 }},
                 "detail": {{ "front": {{ "features": [ {feature} ] }} }} }}"#
        );
        let err = load(&doc).unwrap_err();
        assert!(
            matches!(err, TuckboxError::Validation(_)),
            "{feature} should fail validation, got {err}"
        );
    }
}

#[test]
fn zero_grid_and_bad_orientation_are_rejected() {
    for section in [r#"{ "grid": [0, 2] }"#, r#"{ "orientation": "sideways" }"#] {
        let doc = format!(
            r#"{{ "dimensions": {{ "width": 1, "height": 1, "depth": 1 }},
                 "detail": {{ "top": {section} }} }}"#
        );
        assert!(load(&doc).is_err(), "{section} should be rejected");
    }
}

#[test]
fn basic_block_populates_front_and_sides() {
    let cfg = load(
        r#"{ "dimensions": { "width": 1, "height": 1, "depth": 1 },
             "basic": { "title": "Game", "subtitle": "Cards", "extra": "v1" } }"#,
    )
    .unwrap();

    let front = cfg.section(PanelName::Front);
    assert_eq!(front.grid, Vec2i::new(2, 7));
    let texts: Vec<_> = front
        .features
        .iter()
        .map(|f| match &f.kind {
            FeatureKind::Text(t) => (t.text.as_str(), t.font.size, f.place, f.anchor),
            _ => panic!("expected text"),
        })
        .collect();
    assert_eq!(
        texts,
        [
            ("Game", 90, Vec2i::new(1, 1), Vec2i::new(1, 1)),
            ("Cards", 70, Vec2i::new(1, 2), Vec2i::new(1, 1)),
            ("v1", 50, Vec2i::new(1, 7), Vec2i::new(1, 2)),
        ]
    );

    for side in [PanelName::Left, PanelName::Right, PanelName::Top, PanelName::Bottom] {
        let section = cfg.section(side);
        assert_eq!(section.features.len(), 1);
        let FeatureKind::Text(t) = &section.features[0].kind else {
            panic!("expected text");
        };
        assert_eq!(t.text, "Game: Cards");
        assert_eq!(t.align, TextAlign::Left);
        assert_eq!(t.font.size, 50);
    }
    assert!(cfg.section(PanelName::Back).features.is_empty());
}

#[test]
fn basic_block_keeps_explicit_features() {
    let cfg = load(
        r#"{ "dimensions": { "width": 1, "height": 1, "depth": 1 },
             "basic": { "title": "Game" },
             "detail": { "front": { "features": [ { "type": "panel" } ] } } }"#,
    )
    .unwrap();
    let front = cfg.section(PanelName::Front);
    assert_eq!(front.grid, Vec2i::new(2, 2));
    assert_eq!(front.features.len(), 1);
    assert_eq!(front.features[0].kind.name(), "panel");

    let left = cfg.section(PanelName::Left);
    let FeatureKind::Text(t) = &left.features[0].kind else {
        panic!("expected text");
    };
    assert_eq!(t.text, "Game");
}

#[test]
fn basic_without_title_leaves_sides_empty() {
    let cfg = load(
        r#"{ "dimensions": { "width": 1, "height": 1, "depth": 1 },
             "basic": { "extra": "footer" } }"#,
    )
    .unwrap();
    assert_eq!(cfg.section(PanelName::Front).grid, Vec2i::new(2, 4));
    assert_eq!(cfg.section(PanelName::Front).features.len(), 1);
    assert!(cfg.section(PanelName::Left).features.is_empty());
}
