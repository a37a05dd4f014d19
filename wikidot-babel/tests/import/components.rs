use wikidot_babel::{import, import_document, ComponentKind, Tag, ThemeKind};

#[test]
fn tab_bodies_are_imported_recursively() {
    let markup = "[[tabview]]\n[[tab One]]\nfirst\n[[/tab]]\n[[tab Two]]\n**second**\n[[/tab]]\n[[/tabview]]";
    let root = import_document(markup, ThemeKind::None).unwrap();

    let tabview = root
        .find(&|n| n.component_kind() == Some(ComponentKind::Tabview))
        .unwrap();
    let tabs: Vec<_> = tabview
        .children
        .iter()
        .filter(|n| n.component_kind() == Some(ComponentKind::Tab))
        .collect();
    assert_eq!(tabs.len(), 2);
    assert_eq!(tabs[0].attr("title"), "One");
    assert_eq!(tabs[1].attr("title"), "Two");
    assert!(tabs[1].find(&|n| n.tag() == Some(&Tag::Bold)).is_some());
}

#[test]
fn both_footnote_forms_import_to_one_kind() {
    let classic = import_document("Text[[footnote]] note [[/footnote]]", ThemeKind::None).unwrap();
    let better = import_document(
        "Text[[span class=\"fnnum\"]].[[/span]][[span class=\"fncon\"]]note[[/span]]",
        ThemeKind::None,
    )
    .unwrap();

    for root in [&classic, &better] {
        let footnote = root
            .find(&|n| n.component_kind() == Some(ComponentKind::Footnote))
            .unwrap();
        assert_eq!(footnote.attr("content"), "note");
    }
}

#[test]
fn redacted_link_text_stays_literal() {
    let html = import("[[[scp-001 | 数据删除]]]", ThemeKind::None);
    assert!(!html.contains("<a "));
    assert!(html.contains("数据删除"));
}

#[test]
fn license_is_moved_to_the_end() {
    let markup = "[[include :scp-wiki-cn:component:license-box\n|author=Kim\n]]\n=====\n> **文件名：**a.png\n=====\n[[include :scp-wiki-cn:component:license-box-end]]\nBody";
    let root = import_document(markup, ThemeKind::None).unwrap();
    let last = root.children.last().unwrap();
    assert_eq!(last.component_kind(), Some(ComponentKind::LicenseBox));
    assert_eq!(last.attr("author"), "Kim");
    assert!(root.children[0].text_content().contains("Body"));
}

#[test]
fn basalt_classes_only_under_basalt() {
    let markup = "[[div class=\"notation\"]]\nnote\n[[/div]]";
    let plain = import_document(markup, ThemeKind::None).unwrap();
    let basalt = import_document(markup, ThemeKind::Basalt).unwrap();

    let variant = |root: &wikidot_babel::AnnotatedNode| {
        root.find(&|n| n.component_kind() == Some(ComponentKind::DivBlock))
            .map(|n| n.attr("variant").to_string())
    };
    assert_eq!(variant(&plain), Some(String::new()));
    assert_eq!(variant(&basalt), Some("basalt-notation".to_string()));
}
