//! Bridge between editor fragments and [`AnnotatedNode`] trees.
//!
//! Fragments are parsed with `html5ever` into an `RcDom` and then walked
//! into a tree. Elements with `class="scp-component"` and a known
//! `data-type` become component nodes whose attributes are read from their
//! `data-<field>` attributes. Rendering goes the other way by building an
//! `RcDom` subtree and serializing it.

use crate::error::FormatError;
use crate::import::import;
use crate::tree::{AnnotatedNode, ComponentKind, NodeKind, Tag, ThemeKind};
use html5ever::serialize::{serialize, SerializeOpts, TraversalScope};
use html5ever::tendril::TendrilSink;
use html5ever::{ns, parse_document, Attribute, LocalName, QualName};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::debug;

const COMPONENT_CLASS: &str = "scp-component";

/// Imports markup straight into a tree.
pub fn import_document(markup: &str, theme: ThemeKind) -> Result<AnnotatedNode, FormatError> {
    parse_fragment(&import(markup, theme))
}

/// Parses an editor fragment into a tree rooted at a [`Tag::Root`] node.
pub fn parse_fragment(html: &str) -> Result<AnnotatedNode, FormatError> {
    let wrapped = format!("<!DOCTYPE html><html><head></head><body>{html}</body></html>");
    let dom = parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .one(wrapped.as_bytes());

    let body = find_body(&dom.document)
        .ok_or_else(|| FormatError::ParseError("fragment has no body".to_string()))?;
    let mut root = AnnotatedNode::element(Tag::Root);
    convert_children(&body, &mut root);
    debug!(nodes = root.node_count(), "parsed fragment");
    Ok(root)
}

fn find_body(handle: &Handle) -> Option<Handle> {
    if let NodeData::Element { ref name, .. } = handle.data {
        if name.local.as_ref() == "body" {
            return Some(handle.clone());
        }
    }
    handle.children.borrow().iter().find_map(find_body)
}

fn convert_children(handle: &Handle, parent: &mut AnnotatedNode) {
    for child in handle.children.borrow().iter() {
        match &child.data {
            NodeData::Text { contents } => {
                let text = contents.borrow().to_string();
                if text.trim().is_empty() && drops_whitespace(parent) {
                    continue;
                }
                push_text(parent, text);
            }
            NodeData::Element { name, attrs, .. } => {
                let local = name.local.as_ref();
                if matches!(local, "tbody" | "thead" | "tfoot") {
                    convert_children(child, parent);
                    continue;
                }
                let attrs: Vec<(String, String)> = attrs
                    .borrow()
                    .iter()
                    .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                    .collect();
                let mut node = element_node(local, &attrs);
                convert_children(child, &mut node);
                parent.children.push(node);
            }
            _ => {}
        }
    }
}

/// Containers whose whitespace-only text is formatting, not content.
fn drops_whitespace(parent: &AnnotatedNode) -> bool {
    match &parent.kind {
        NodeKind::Element(tag) => matches!(
            tag,
            Tag::Root | Tag::UnorderedList | Tag::OrderedList | Tag::Table | Tag::TableRow
        ),
        NodeKind::Component(kind) => matches!(
            kind,
            ComponentKind::Tabview | ComponentKind::LicenseBox | ComponentKind::WikidotTable
        ),
        NodeKind::Text(_) => false,
    }
}

/// Appends text, merging with a preceding text node.
fn push_text(parent: &mut AnnotatedNode, text: String) {
    if let Some(AnnotatedNode {
        kind: NodeKind::Text(previous),
        ..
    }) = parent.children.last_mut()
    {
        previous.push_str(&text);
        return;
    }
    parent.children.push(AnnotatedNode::text(text));
}

fn element_node(tag: &str, attrs: &[(String, String)]) -> AnnotatedNode {
    let get = |key: &str| {
        attrs
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    };
    let is_component = get("class")
        .map(|class| class.split_whitespace().any(|c| c == COMPONENT_CLASS))
        .unwrap_or(false);
    let kind = get("data-type").and_then(ComponentKind::from_name);

    match kind {
        Some(kind) if is_component => {
            let mut node = AnnotatedNode::component(kind);
            for (field, _) in kind.fields() {
                if let Some(value) = get(&format!("data-{field}")) {
                    node.attributes.insert(field.to_string(), value.to_string());
                }
            }
            node
        }
        _ => {
            let mut node = AnnotatedNode::element(Tag::from_name(tag));
            for (name, value) in attrs {
                node.attributes.insert(name.clone(), value.clone());
            }
            node
        }
    }
}

/// Serializes a tree back into an editor fragment.
///
/// A [`Tag::Root`] node renders only its children.
pub fn render_fragment(root: &AnnotatedNode) -> Result<String, FormatError> {
    let container = create_element("div", vec![]);
    if root.tag() == Some(&Tag::Root) {
        for child in &root.children {
            container.children.borrow_mut().push(build_node(child));
        }
    } else {
        container.children.borrow_mut().push(build_node(root));
    }
    serialize_children(&container)
}

fn build_node(node: &AnnotatedNode) -> Handle {
    let handle = match &node.kind {
        NodeKind::Text(text) => return create_text(text),
        NodeKind::Element(tag) => {
            let attrs = node
                .attributes
                .iter()
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect();
            create_element(tag.name(), attrs)
        }
        NodeKind::Component(kind) => {
            let mut attrs = vec![
                ("class".to_string(), COMPONENT_CLASS.to_string()),
                ("data-type".to_string(), kind.name().to_string()),
            ];
            for (field, default) in kind.fields() {
                let value = node.attributes.get(*field).map_or(*default, String::as_str);
                attrs.push((format!("data-{field}"), value.to_string()));
            }
            create_element(kind.html_tag(), attrs)
        }
    };
    for child in &node.children {
        handle.children.borrow_mut().push(build_node(child));
    }
    handle
}

fn create_element(tag: &str, attrs: Vec<(String, String)>) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name.as_str())),
            value: value.into(),
        })
        .collect();

    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

fn create_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}

fn serialize_children(container: &Handle) -> Result<String, FormatError> {
    let mut output = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };
    for child in container.children.borrow().iter() {
        let serializable = SerializableHandle::from(child.clone());
        serialize(&mut output, &serializable, opts.clone()).map_err(|e| {
            FormatError::SerializationError(format!("HTML serialization failed: {e}"))
        })?;
    }
    String::from_utf8(output)
        .map_err(|e| FormatError::SerializationError(format!("UTF-8 conversion failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn components_are_rebuilt_from_data_attributes() {
        let html = r#"<div class="scp-component" data-type="collapsible" data-show="Open"><p>Body</p></div>"#;
        let root = parse_fragment(html).unwrap();
        let node = &root.children[0];
        assert_eq!(node.component_kind(), Some(ComponentKind::Collapsible));
        assert_eq!(node.attr("show"), "Open");
        assert_eq!(node.attr("hide"), "- 折叠");
        assert_eq!(node.children[0].tag(), Some(&Tag::Paragraph));
    }

    #[test]
    fn unknown_data_type_stays_an_element() {
        let root = parse_fragment(r#"<div class="scp-component" data-type="mystery">x</div>"#).unwrap();
        assert_eq!(root.children[0].tag(), Some(&Tag::Div));
    }

    #[test]
    fn table_sections_are_flattened() {
        let root = parse_fragment("<table><tr><td>a</td></tr></table>").unwrap();
        let table = &root.children[0];
        assert_eq!(table.tag(), Some(&Tag::Table));
        assert_eq!(table.children[0].tag(), Some(&Tag::TableRow));
    }

    #[test]
    fn render_then_parse_keeps_structure() {
        let root = AnnotatedNode::root(vec![
            AnnotatedNode::element(Tag::Paragraph)
                .with_child(AnnotatedNode::text("a < b"))
                .with_child(AnnotatedNode::component(ComponentKind::Footnote).with_attr("content", "n")),
        ]);
        let html = render_fragment(&root).unwrap();
        assert!(html.starts_with("<p>a &lt; b<span"));
        assert_eq!(parse_fragment(&html).unwrap(), root);
    }

    #[test]
    fn imported_markup_becomes_a_tree() {
        let root = import_document("+ Title\n\n* one\n* two", ThemeKind::None).unwrap();
        assert_eq!(root.children[0].tag(), Some(&Tag::Heading(1)));
        assert_eq!(root.children[1].tag(), Some(&Tag::UnorderedList));
        assert_eq!(root.children[1].children.len(), 2);
    }
}
