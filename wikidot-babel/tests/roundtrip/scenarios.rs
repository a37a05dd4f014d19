use insta::assert_snapshot;
use wikidot_babel::{export, import_document, AnnotatedNode, ComponentKind, RenderingState, Tag, ThemeKind};

const SCENARIO: &str = "+ Title\n\n**bold** and //italic//\n\n* item1\n* item2\n";

fn blocks(root: &AnnotatedNode) -> Vec<&AnnotatedNode> {
    root.children
        .iter()
        .filter(|child| !(child.is_text() && child.text_content().trim().is_empty()))
        .collect()
}

#[test]
fn heading_paragraph_and_list_import() {
    let root = import_document(SCENARIO, ThemeKind::None).unwrap();
    let blocks = blocks(&root);
    assert_eq!(blocks.len(), 3);

    assert_eq!(blocks[0].tag(), Some(&Tag::Heading(1)));
    assert_eq!(blocks[0].text_content(), "Title");

    let paragraph = blocks[1];
    assert_eq!(paragraph.tag(), Some(&Tag::Paragraph));
    let bold = paragraph.find(&|n| n.tag() == Some(&Tag::Bold)).unwrap();
    assert_eq!(bold.text_content(), "bold");
    let italic = paragraph.find(&|n| n.tag() == Some(&Tag::Italic)).unwrap();
    assert_eq!(italic.text_content(), "italic");

    let list = blocks[2];
    assert_eq!(list.tag(), Some(&Tag::UnorderedList));
    let items: Vec<String> = list.children.iter().map(AnnotatedNode::text_content).collect();
    assert_eq!(items, vec!["item1", "item2"]);
}

#[test]
fn heading_paragraph_and_list_export_back() {
    let root = import_document(SCENARIO, ThemeKind::None).unwrap();
    assert_snapshot!(export(&root, &RenderingState::default()), @r"
    + Title

    **bold** and //italic//

    * item1
    * item2
    ");
}

#[test]
fn forced_break_survives_round_trip() {
    let root = AnnotatedNode::root(vec![
        AnnotatedNode::element(Tag::Paragraph).with_child(AnnotatedNode::text("a")),
        AnnotatedNode::element(Tag::Paragraph).with_child(AnnotatedNode::text("  ")),
        AnnotatedNode::element(Tag::Paragraph).with_child(AnnotatedNode::text("b")),
    ]);
    let markup = export(&root, &RenderingState::default());
    assert_eq!(markup, "a\n@@@@\nb\n");

    let reimported = import_document(&markup, ThemeKind::None).unwrap();
    let breaks = {
        let mut found = Vec::new();
        reimported.find_all(
            &|n| n.component_kind() == Some(ComponentKind::ForcedBreak),
            &mut found,
        );
        found.len()
    };
    assert_eq!(breaks, 1);
    assert_eq!(export(&reimported, &RenderingState::default()), markup);
}

#[test]
fn table_cell_continuation_round_trip() {
    let cell = AnnotatedNode::element(Tag::TableCell).with_children(vec![
        AnnotatedNode::text("one"),
        AnnotatedNode::element(Tag::LineBreak),
        AnnotatedNode::text("two"),
    ]);
    let table = AnnotatedNode::element(Tag::Table).with_child(
        AnnotatedNode::element(Tag::TableRow).with_children(vec![
            cell,
            AnnotatedNode::element(Tag::TableCell).with_child(AnnotatedNode::text("x")),
        ]),
    );
    let markup = export(&AnnotatedNode::root(vec![table]), &RenderingState::default());
    assert_eq!(markup, "|| one _\ntwo || x ||\n");

    let reimported = import_document(&markup, ThemeKind::None).unwrap();
    let first_cell = reimported
        .find(&|n| n.tag() == Some(&Tag::TableCell))
        .unwrap();
    assert_eq!(first_cell.text_content(), "one\ntwo");
}

#[test]
fn list_item_break_round_trip() {
    let markup = "* a\n\n* b\n";
    let root = import_document(markup, ThemeKind::None).unwrap();
    let list = root.find(&|n| n.tag() == Some(&Tag::UnorderedList)).unwrap();
    let items: Vec<String> = list.children.iter().map(AnnotatedNode::text_content).collect();
    assert_eq!(items, vec!["a\n", "b"]);
    assert_eq!(export(&root, &RenderingState::default()), markup);
}

#[test]
fn nested_quote_round_trip() {
    let markup = "> a\n> > b\n> c\n";
    let root = import_document(markup, ThemeKind::None).unwrap();
    let outer = root.find(&|n| n.tag() == Some(&Tag::Blockquote)).unwrap();
    let inner = outer
        .children
        .iter()
        .find(|n| n.tag() == Some(&Tag::Blockquote))
        .unwrap();
    assert_eq!(inner.text_content(), "b");
    assert_eq!(export(&root, &RenderingState::default()), markup);
}

#[test]
fn acs_escalation_survives_round_trip() {
    let acs = AnnotatedNode::component(ComponentKind::AcsBanner)
        .with_attr("item-number", "SCP-CN-001")
        .with_attr("container-class", "Safe")
        .with_attr("secondary-class", "Apollyon");
    let markup = export(&AnnotatedNode::root(vec![acs]), &RenderingState::default());

    let reimported = import_document(&markup, ThemeKind::None).unwrap();
    let banner = reimported
        .find(&|n| n.component_kind() == Some(ComponentKind::AcsBanner))
        .unwrap();
    assert_eq!(banner.attr("item-number"), "SCP-CN-001");
    assert_eq!(banner.attr("secondary-class"), "apollyon");
    assert_ne!(banner.attr("container-class"), "safe");
}
