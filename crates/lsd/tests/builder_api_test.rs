//! Integration tests for the SchemeBuilder API

use float_cmp::assert_approx_eq;

use lsd::{LsdError, SchemeBuilder, config::AppConfig, layout::LayoutError};

const SOURCE: &str = "\
2505.7,4,1 > 1173.2,0.9985 > 1332.5,2,1
1332.5,2,1 > 1332.5 > 0,0,1
";

#[test]
fn test_parse_simple_scheme() {
    let result = SchemeBuilder::default().parse(SOURCE);
    assert!(result.is_ok(), "Should parse valid scheme: {:?}", result.err());
    assert_eq!(result.unwrap().transitions().len(), 2);
}

#[test]
fn test_render_simple_scheme() {
    let builder = SchemeBuilder::new(AppConfig::default());
    let scheme = builder.parse(SOURCE).unwrap();

    let svg = builder.render_svg(&scheme).unwrap();
    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");
}

#[test]
fn test_parse_error_keeps_source() {
    let source = "100 > 0";
    let err = SchemeBuilder::default().parse(source).unwrap_err();

    match err {
        LsdError::Parse { err, src } => {
            assert_eq!(src, source);
            assert_eq!(err.diagnostics().len(), 1);
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn test_config_from_toml() {
    let config: AppConfig = toml::from_str(
        r#"
        [layout]
        spacing = 20
        lanes = [0.2, 0.4, 0.6, 0.8]
        "#,
    )
    .unwrap();
    let builder = SchemeBuilder::new(config);
    let scheme = builder
        .parse("100 > > 12\n12 > > 10\n10 > > 0")
        .unwrap();

    let layout = builder.layout(&scheme).unwrap();
    let spaced: Vec<f32> = layout.levels().iter().map(|level| level.y()).collect();
    assert_approx_eq!(f32, spaced[0], 100.0);
    assert_approx_eq!(f32, spaced[1], 29.5);
    assert_approx_eq!(f32, spaced[2], 9.0);
    assert_approx_eq!(f32, spaced[3], 0.0);
}

#[test]
fn test_invalid_layout_config_is_reported() {
    let config: AppConfig = toml::from_str("[layout]\nspacing = -1").unwrap();
    let builder = SchemeBuilder::new(config);
    let scheme = builder.parse("100 > > 0").unwrap();

    assert!(matches!(builder.layout(&scheme), Err(LsdError::Config(_))));
}

#[test]
fn test_empty_lanes_are_reported() {
    let config: AppConfig = toml::from_str("[layout]\nlane_count = 0").unwrap();
    let builder = SchemeBuilder::new(config);
    let scheme = builder.parse("100 > > 0").unwrap();

    assert!(matches!(
        builder.render_svg(&scheme),
        Err(LsdError::Layout(LayoutError::NoLanes))
    ));
}
