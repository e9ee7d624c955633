//! Output formats through the registry

use shortcodes::parse;
use shortcodes::shortcodes::config::Loader;
use shortcodes::shortcodes::formats::{
    snapshot_forest, FormatError, FormatRegistry, NodeSnapshot, TreevizFormatter,
};

const SAMPLE: &str = r#"Intro [box size="l" open]Some text that is long enough to be cut[row/][/box]"#;

#[test]
fn test_treeviz_output() {
    let forest = parse(SAMPLE).unwrap();
    let output = FormatRegistry::default().serialize(&forest, "treeviz").unwrap();
    insta::assert_snapshot!(output, @r###"
├─ ◦ Intro
└─ ▣ box open=yes size="l"
  ├─ ◦ Some text that is long enough ...
  └─ ▪ row
"###);
}

#[test]
fn test_treeviz_label_width() {
    let forest = parse(SAMPLE).unwrap();
    let mut registry = FormatRegistry::default();
    registry.register(TreevizFormatter::with_label_width(5));
    let output = registry.serialize(&forest, "treeviz").unwrap();
    insta::assert_snapshot!(output, @r###"
├─ ◦ Intro
└─ ▣ box o...
  ├─ ◦ Some ...
  └─ ▪ row
"###);
}

#[test]
fn test_shortcode_format() {
    let forest = parse(SAMPLE).unwrap();
    let output = FormatRegistry::default()
        .serialize(&forest, "shortcode")
        .unwrap();
    insta::assert_snapshot!(output, @r###"
Intro
[box open=yes size="l"]
  Some text that is long enough to be cut
  [row]
[/box]
"###);
}

#[test]
fn test_json_format_matches_snapshot_model() {
    let forest = parse(SAMPLE).unwrap();
    let output = FormatRegistry::default().serialize(&forest, "json").unwrap();
    let decoded: Vec<NodeSnapshot> = serde_json::from_str(&output).unwrap();

    assert_eq!(decoded, snapshot_forest(&forest));
    assert_eq!(decoded[1].label, "box");
    assert_eq!(decoded[1].attributes["open"], "yes");
    assert_eq!(decoded[1].attributes["position"], "6");
}

#[test]
fn test_yaml_format() {
    let forest = parse("[a/]").unwrap();
    let output = FormatRegistry::default().serialize(&forest, "yaml").unwrap();
    let decoded: Vec<NodeSnapshot> = serde_yaml::from_str(&output).unwrap();
    assert_eq!(decoded, snapshot_forest(&forest));
}

#[test]
fn test_registry_follows_loaded_config() {
    let config = Loader::new()
        .with_toml_str("[output]\nformat = \"shortcode\"\nlabel_width = 5\n")
        .build()
        .unwrap();
    let registry = FormatRegistry::with_config(&config.output);
    let forest = parse(SAMPLE).unwrap();

    assert_eq!(
        registry.serialize_or_fallback(&forest, None).unwrap(),
        registry.serialize(&forest, "shortcode").unwrap()
    );
    let treeviz = registry.serialize_or_fallback(&forest, Some("treeviz")).unwrap();
    assert!(treeviz.contains("└─ ▣ box o...\n"));
}

#[test]
fn test_unknown_format() {
    let err = FormatRegistry::default()
        .serialize(&[], "html")
        .unwrap_err();
    assert_eq!(err, FormatError::FormatNotFound("html".to_string()));
}
