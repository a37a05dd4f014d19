use std::collections::HashMap;
use wikidot_babel::{ComponentKind, FormatError, FormatRegistry, RenderingState, Tag};

const MARKUP: &str = "+ Title\n\n[[collapsible show=\"Open\" hide=\"Close\"]]\n**inside**\n[[/collapsible]]\n";

#[test]
fn wikidot_html_wikidot() {
    let registry = FormatRegistry::default();
    let state = RenderingState::default();

    let doc = registry.parse(MARKUP, "wikidot", &state).unwrap();
    let html = registry.serialize(&doc, "html", &state).unwrap();
    assert!(html.contains(r#"data-type="collapsible""#));

    let back = registry.parse(&html, "html", &state).unwrap();
    assert_eq!(back, doc);
    assert_eq!(registry.serialize(&back, "wikidot", &state).unwrap(), MARKUP);
}

#[test]
fn json_preserves_the_tree() {
    let registry = FormatRegistry::default();
    let state = RenderingState::default();

    let doc = registry.parse(MARKUP, "wikidot", &state).unwrap();
    let json = registry.serialize(&doc, "json", &state).unwrap();
    let back = registry.parse(&json, "json", &state).unwrap();
    assert_eq!(back, doc);

    let collapsible = back
        .find(&|n| n.component_kind() == Some(ComponentKind::Collapsible))
        .unwrap();
    assert_eq!(collapsible.attr("show"), "Open");
    assert!(collapsible.find(&|n| n.tag() == Some(&Tag::Bold)).is_some());
}

#[test]
fn treeviz_lists_components() {
    let registry = FormatRegistry::default();
    let state = RenderingState::default();
    let doc = registry.parse(MARKUP, "wikidot", &state).unwrap();

    let mut options = HashMap::new();
    options.insert("attributes".to_string(), "true".to_string());
    let tree = registry
        .serialize_with_options(&doc, "treeviz", &state, &options)
        .unwrap();
    assert!(tree.starts_with("⧉ Document"));
    assert!(tree.contains("collapsible"));
    assert!(tree.contains("= show=Open"));
}

#[test]
fn detection_and_errors() {
    let registry = FormatRegistry::default();
    assert_eq!(
        registry.detect_format_from_filename("scp-cn-001.WIKIDOT"),
        Some("wikidot".to_string())
    );
    assert_eq!(registry.detect_format_from_filename("page.htm"), Some("html".to_string()));
    assert_eq!(registry.detect_format_from_filename("notes.txt"), None);

    let state = RenderingState::default();
    assert!(matches!(
        registry.parse("x", "markdown", &state),
        Err(FormatError::FormatNotFound(_))
    ));
    assert!(matches!(
        registry.parse("x", "treeviz", &state),
        Err(FormatError::NotSupported(_))
    ));
    assert!(matches!(
        registry.parse("{not json", "json", &state),
        Err(FormatError::ParseError(_))
    ));
}
