use wikidot_babel::{import, import_document, AnnotatedNode, ComponentKind, Tag, ThemeKind};

/// Children that carry content, skipping whitespace-only text.
fn content_children(node: &AnnotatedNode) -> Vec<&AnnotatedNode> {
    node.children
        .iter()
        .filter(|child| !(child.is_text() && child.text_content().trim().is_empty()))
        .collect()
}

fn is_div_block(node: &AnnotatedNode) -> bool {
    node.component_kind() == Some(ComponentKind::DivBlock)
}

#[test]
fn nested_divs_nest_once() {
    let root = import_document(
        r#"[[div class="a"]] [[div class="b"]] X [[/div]] [[/div]]"#,
        ThemeKind::None,
    )
    .unwrap();

    let top = content_children(&root);
    assert_eq!(top.len(), 1);
    let outer = top[0];
    assert!(is_div_block(outer));
    assert_eq!(outer.attr("params"), r#"class="a""#);

    let inside_outer = content_children(outer);
    assert_eq!(inside_outer.len(), 1);
    let inner = inside_outer[0];
    assert!(is_div_block(inner));
    assert_eq!(inner.attr("params"), r#"class="b""#);
    assert_eq!(inner.text_content().trim(), "X");
}

#[test]
fn deeply_nested_divs_on_separate_lines() {
    let markup = "[[div class=\"a\"]]\n[[div class=\"b\"]]\n[[div class=\"c\"]]\ndeep\n[[/div]]\n[[/div]]\nafter\n[[/div]]";
    let root = import_document(markup, ThemeKind::None).unwrap();

    let mut divs = Vec::new();
    root.find_all(&is_div_block, &mut divs);
    assert_eq!(divs.len(), 3);
    assert!(divs[0].text_content().contains("after"));
    assert!(!divs[1].text_content().contains("after"));
    assert_eq!(divs[2].text_content().trim(), "deep");
}

#[test]
fn unbalanced_div_stays_literal() {
    let html = import("[[div class=\"a\"]]\nnever closed", ThemeKind::None);
    assert!(!html.contains("div-block"));
    assert!(html.contains("[[div"));
    assert!(html.contains("never closed"));
}

#[test]
fn blank_line_inside_list_is_a_break() {
    let root = import_document("* a\n\n* b\n\nafter", ThemeKind::None).unwrap();
    let top = content_children(&root);
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].tag(), Some(&Tag::UnorderedList));
    assert_eq!(top[0].children.len(), 2);
    assert_eq!(top[1].tag(), Some(&Tag::Paragraph));
}

#[test]
fn nested_list_depth_follows_markers() {
    let root = import_document("* a\n** b\n* c", ThemeKind::None).unwrap();
    let mut lists = Vec::new();
    root.find_all(&|n| n.tag() == Some(&Tag::UnorderedList), &mut lists);
    assert_eq!(lists.len(), 2);
    assert_eq!(lists[1].text_content(), "b");
    assert!(lists[0].text_content().contains('c'));
}

#[test]
fn empty_markup_gives_empty_root() {
    let root = import_document("", ThemeKind::None).unwrap();
    assert_eq!(root.tag(), Some(&Tag::Root));
    assert!(root.children.is_empty());
}
