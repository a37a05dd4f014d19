use wikidot_babel::{export, AnnotatedNode, ComponentKind, RenderingState, Tag};

fn export_one(node: AnnotatedNode) -> String {
    export(&AnnotatedNode::root(vec![node]), &RenderingState::default())
}

#[test]
fn secondary_class_forces_classified_container() {
    let markup = export_one(
        AnnotatedNode::component(ComponentKind::AcsBanner)
            .with_attr("container-class", "Safe")
            .with_attr("secondary-class", "Apollyon"),
    );
    assert!(markup.contains("|container-class=机密\n"));
    assert!(markup.contains("|secondary-class=apollyon\n"));
    assert!(!markup.contains("safe"));
}

#[test]
fn container_class_kept_without_secondary() {
    let markup = export_one(
        AnnotatedNode::component(ComponentKind::AcsBanner).with_attr("container-class", "Safe"),
    );
    assert!(markup.contains("|container-class=safe\n"));
    assert!(!markup.contains("secondary-class"));
}

#[test]
fn nested_bold_is_wrapped_once() {
    let inner = AnnotatedNode::element(Tag::Bold).with_child(AnnotatedNode::text("x"));
    let outer = AnnotatedNode::element(Tag::Bold).with_child(inner);
    let markup = export_one(AnnotatedNode::element(Tag::Paragraph).with_child(outer));
    assert_eq!(markup, "**x**\n");
    assert_eq!(markup.matches("**").count(), 2);
}

#[test]
fn empty_collapsible_has_no_blank_body() {
    let markup = export_one(
        AnnotatedNode::component(ComponentKind::Collapsible)
            .with_attr("show", "Open")
            .with_attr("hide", "Close"),
    );
    assert_eq!(markup, "[[collapsible show=\"Open\" hide=\"Close\"]]\n[[/collapsible]]\n");
}

#[test]
fn advanced_image_dimensions_get_units() {
    let markup = export_one(
        AnnotatedNode::component(ComponentKind::ImageBlockAdv)
            .with_attr("name", "a.png")
            .with_attr("width", "300")
            .with_attr("height", "50%"),
    );
    assert!(markup.starts_with("[[include component:image-block"));
    assert!(markup.contains("width=300px"));
    assert!(markup.contains("height=50%"));
    assert!(!markup.contains("50%px"));
}

#[test]
fn license_blocks_are_hoisted_to_the_end() {
    let license = AnnotatedNode::component(ComponentKind::LicenseBox)
        .with_attr("author", "Kim")
        .with_child(
            AnnotatedNode::component(ComponentKind::FileEntry)
                .with_attr("file-name", "a.png")
                .with_attr("img-license", "CC BY-SA 3.0"),
        );
    let root = AnnotatedNode::root(vec![
        license,
        AnnotatedNode::element(Tag::Paragraph).with_child(AnnotatedNode::text("Body")),
    ]);
    let markup = export(&root, &RenderingState::default());

    assert!(markup.starts_with("Body\n\n"));
    let license_at = markup.find("[[include :scp-wiki-cn:component:license-box").unwrap();
    assert!(markup[license_at..].contains("> **文件名：**a.png"));
    assert!(markup[license_at..].contains("> **授权协议：**CC BY-SA 3.0"));
    assert!(markup.ends_with("[[include :scp-wiki-cn:component:license-box-end]]\n"));
}
