//! Property-based round trip over plain-text documents.

use proptest::prelude::*;
use wikidot_babel::{export, import_document, AnnotatedNode, NodeKind, RenderingState, Tag, ThemeKind};

#[derive(Debug, Clone)]
enum Block {
    Heading(u8, String),
    Paragraph(Vec<(u8, String)>),
    List(bool, Vec<String>),
}

/// Words mix ASCII with accented letters, CJK ideographs and em dashes.
fn words_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z\u{e9}\u{fc}\u{2014}\u{4e00}-\u{9fa5}]{1,8}", 1..5)
        .prop_map(|words| words.join(" "))
}

/// 0 = plain, 1 = bold, 2 = italic
fn run_strategy() -> impl Strategy<Value = (u8, String)> {
    (0u8..3, words_strategy())
}

fn block_strategy() -> impl Strategy<Value = Block> {
    prop_oneof![
        (1u8..4, words_strategy()).prop_map(|(level, text)| Block::Heading(level, text)),
        prop::collection::vec(run_strategy(), 1..4).prop_map(Block::Paragraph),
        (any::<bool>(), prop::collection::vec(words_strategy(), 1..4))
            .prop_map(|(ordered, items)| Block::List(ordered, items)),
    ]
}

/// Adjacent lists would merge into one on import, so a paragraph separates them.
fn document_strategy() -> impl Strategy<Value = Vec<Block>> {
    prop::collection::vec(block_strategy(), 1..6).prop_map(|blocks| {
        let mut out: Vec<Block> = Vec::new();
        for block in blocks {
            let after_list = matches!(out.last(), Some(Block::List(..)));
            if after_list && matches!(block, Block::List(..)) {
                out.push(Block::Paragraph(vec![(0, "between".to_string())]));
            }
            out.push(block);
        }
        out
    })
}

fn build(blocks: &[Block]) -> AnnotatedNode {
    let children = blocks
        .iter()
        .map(|block| match block {
            Block::Heading(level, text) => {
                AnnotatedNode::element(Tag::Heading(*level)).with_child(AnnotatedNode::text(text.clone()))
            }
            Block::Paragraph(runs) => {
                let mut paragraph = AnnotatedNode::element(Tag::Paragraph);
                for (i, (style, text)) in runs.iter().enumerate() {
                    if i > 0 {
                        paragraph.children.push(AnnotatedNode::text(" "));
                    }
                    let text = AnnotatedNode::text(text.clone());
                    paragraph.children.push(match style {
                        1 => AnnotatedNode::element(Tag::Bold).with_child(text),
                        2 => AnnotatedNode::element(Tag::Italic).with_child(text),
                        _ => text,
                    });
                }
                paragraph
            }
            Block::List(ordered, items) => {
                let tag = if *ordered { Tag::OrderedList } else { Tag::UnorderedList };
                AnnotatedNode::element(tag).with_children(
                    items
                        .iter()
                        .map(|item| {
                            AnnotatedNode::element(Tag::ListItem).with_child(AnnotatedNode::text(item.clone()))
                        })
                        .collect(),
                )
            }
        })
        .collect();
    AnnotatedNode::root(children)
}

/// Whitespace-insensitive rendering of a node's content with style markers.
fn signature(node: &AnnotatedNode) -> String {
    let mut out = String::new();
    collect(node, &mut out);
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect(node: &AnnotatedNode, out: &mut String) {
    match &node.kind {
        NodeKind::Text(text) => out.push_str(text),
        NodeKind::Element(Tag::Bold) => wrap(node, "[b]", "[/b]", out),
        NodeKind::Element(Tag::Italic) => wrap(node, "[i]", "[/i]", out),
        NodeKind::Element(Tag::LineBreak) => out.push(' '),
        NodeKind::Element(tag) => {
            let name = format!(" <{}> ", tag.name());
            out.push_str(&name);
            for child in &node.children {
                collect(child, out);
            }
        }
        NodeKind::Component(kind) => out.push_str(&format!(" <{}> ", kind.name())),
    }
}

fn wrap(node: &AnnotatedNode, open: &str, close: &str, out: &mut String) {
    out.push_str(open);
    for child in &node.children {
        collect(child, out);
    }
    out.push_str(close);
}

proptest! {
    #[test]
    fn plain_documents_survive_export_and_import(blocks in document_strategy()) {
        let tree = build(&blocks);
        let markup = export(&tree, &RenderingState::default());
        let reimported = import_document(&markup, ThemeKind::None).unwrap();
        prop_assert_eq!(signature(&reimported), signature(&tree), "markup was:\n{}", markup);
    }

    #[test]
    fn markup_is_stable_after_one_round_trip(blocks in document_strategy()) {
        let state = RenderingState::default();
        let first = export(&build(&blocks), &state);
        let second = export(&import_document(&first, ThemeKind::None).unwrap(), &state);
        prop_assert_eq!(first, second);
    }
}
