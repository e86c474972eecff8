//! Integration tests for the TowerBuilder API
//!
//! These tests drive a tower from document to SVG and bundle through the
//! public API only.

use std::io::Cursor;

use float_cmp::assert_approx_eq;

use mudmap::{
    MudmapError, TowerBuilder,
    config::AppConfig,
    layer::{LayerField, LayerId, LayerType},
    palette::GoldenAngleHue,
};

const PRIMARY_WITH_EXCESS: &str = r#"
    total_limit = "3,000,000"

    [[layers]]
    id = 1
    type = "primary"
    insurer = "Acme Re"
    limit = 1000000
    attachment = 0
    premium = 100
    share = 50

    [[layers]]
    id = 2
    type = "xol"
    insurer = "Harbor Mutual"
    limit = 2000000
    attachment = 1000000
    premium = 50
    share = 50
"#;

#[test]
fn test_parse_and_layout_primary_with_excess() {
    let builder = TowerBuilder::default();
    let tower = builder.parse(PRIMARY_WITH_EXCESS).unwrap();

    let elements = builder.layout(&tower);
    assert_eq!(elements.len(), 2);

    let primary = elements[0].rect();
    assert_eq!(elements[0].key(), "p-1");
    assert_approx_eq!(f64, primary.left(), 0.0);
    assert_approx_eq!(f64, primary.bottom(), 0.0);
    assert_approx_eq!(f64, primary.width(), 50.0);
    assert_approx_eq!(f64, primary.height(), 100.0 / 3.0, epsilon = 1e-9);

    let xol = elements[1].rect();
    assert_eq!(elements[1].key(), "x-2");
    assert_eq!(elements[1].z_index(), Some(2));
    assert_approx_eq!(f64, xol.left(), 0.0);
    assert_approx_eq!(f64, xol.bottom(), 100.0 / 3.0, epsilon = 1e-9);
    assert_approx_eq!(f64, xol.width(), 50.0);
    assert_approx_eq!(f64, xol.height(), 200.0 / 3.0, epsilon = 1e-9);
}

#[test]
fn test_render_svg() {
    let builder = TowerBuilder::new(AppConfig::default());
    let tower = builder.parse(PRIMARY_WITH_EXCESS).unwrap();

    let svg = builder.render_svg(&tower).unwrap();
    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");
    assert!(svg.contains("Harbor Mutual"));
}

#[test]
fn test_edits_change_layout() {
    let builder = TowerBuilder::default();
    let mut tower = builder.parse(PRIMARY_WITH_EXCESS).unwrap();
    assert_eq!(builder.layout(&tower).len(), 2);

    // Moving the attachment off the primary's limit unpairs the excess layer
    tower.update_field(LayerId(2), LayerField::Attachment, "1,500,000");
    assert_eq!(builder.layout(&tower).len(), 1);

    let id = tower.add_layer(&mut GoldenAngleHue::default());
    tower.change_type(id, LayerType::QuotaShare);
    tower.update_field(id, LayerField::Limit, "3,000,000");
    tower.update_field(id, LayerField::Share, "25");

    let elements = builder.layout(&tower);
    assert_eq!(elements.len(), 2);
    assert_eq!(elements[0].key(), format!("qs-{id}"));
    assert_approx_eq!(f64, elements[1].rect().left(), 25.0);
}

#[test]
fn test_export_bundle() {
    let builder = TowerBuilder::default();
    let tower = builder.parse(PRIMARY_WITH_EXCESS).unwrap();

    let cursor = builder
        .export_bundle(&tower, Cursor::new(Vec::new()))
        .unwrap();
    assert!(!cursor.into_inner().is_empty());
}

#[test]
fn test_builder_with_config() {
    let config: AppConfig = toml::from_str(
        r#"
        [layout]
        width = 400
        height = 400

        [style]
        background_color = "ivory"
        "#,
    )
    .unwrap();

    let builder = TowerBuilder::new(config);
    let tower = builder.parse(PRIMARY_WITH_EXCESS).unwrap();
    assert!(builder.render_svg(&tower).is_ok());
}

#[test]
fn test_invalid_style_color_fails_render() {
    let config: AppConfig = toml::from_str("[style]\ntext_color = \"nope\"\n").unwrap();

    let builder = TowerBuilder::new(config);
    let tower = builder.parse(PRIMARY_WITH_EXCESS).unwrap();

    let result = builder.render_svg(&tower);
    assert!(matches!(result, Err(MudmapError::Export(_))));
}

#[test]
fn test_parse_invalid_syntax_returns_error() {
    let result = TowerBuilder::default().parse("this is not a tower!!!");
    assert!(matches!(result, Err(MudmapError::Parse { .. })));
}
