use wikidot_babel::{export, AnnotatedNode, ComponentKind, RenderingState, Tag, Theme};

fn page_with_footnote() -> AnnotatedNode {
    AnnotatedNode::root(vec![AnnotatedNode::element(Tag::Paragraph).with_children(vec![
        AnnotatedNode::text("Claim"),
        AnnotatedNode::component(ComponentKind::Footnote).with_attr("content", "source"),
    ])])
}

#[test]
fn footnote_form_depends_only_on_state() {
    let tree = page_with_footnote();

    let classic = export(&tree, &RenderingState::default());
    assert_eq!(classic, "Claim[[footnote]] source [[/footnote]]\n");

    let better = export(&tree, &RenderingState::default().with_better_footnotes(true));
    assert_eq!(
        better,
        "[[include :scp-wiki-cn:component:betterfootnotes]]\n\
         Claim[[span class=\"fnnum\"]].[[/span]][[span class=\"fncon\"]]source[[/span]]\n"
    );
}

#[test]
fn export_does_not_touch_the_tree() {
    let tree = page_with_footnote();
    let before = tree.clone();
    let state = RenderingState::new(Theme::basalt(), true);
    let first = export(&tree, &state);
    let second = export(&tree, &state);
    assert_eq!(tree, before);
    assert_eq!(first, second);
}

#[test]
fn black_highlighter_includes_follow_options() {
    let state = RenderingState::new(
        Theme::BlackHighlighter {
            dark_sidebar: true,
            collapsible_sidebar: false,
            toggle_sidebar: false,
            centered_header: true,
            offices: false,
        },
        false,
    );
    let root = AnnotatedNode::root(vec![
        AnnotatedNode::element(Tag::Paragraph).with_child(AnnotatedNode::text("x")),
    ]);
    assert_eq!(
        export(&root, &state),
        "[[include :scp-wiki-cn:theme:black-highlighter-theme]]\n\
         [[include :scp-wiki:component:bhl-dark-sidebar]]\n\
         [[include :scp-wiki:component:centered-header-bhl]]\n\
         x\n"
    );
}
