//! Treeviz formatter for annotated trees
//!
//! One line per node, with box-drawing connectors for nesting:
//!
//!     ⧉ Document (3 nodes)
//!     ├─ § h1 Title
//!     └─ ◆ acs-banner
//!
//! Labels are truncated to 30 characters. With the `attributes` option set
//! to `true`, every attribute is listed as a child line `name=value`.

use super::icons::get_icon;
use crate::error::FormatError;
use crate::format::Format;
use crate::tree::{AnnotatedNode, NodeKind, RenderingState};
use std::collections::HashMap;

const LABEL_WIDTH: usize = 30;

fn truncate(text: &str) -> String {
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.chars().count() > LABEL_WIDTH {
        let head: String = text.chars().take(LABEL_WIDTH - 1).collect();
        format!("{head}…")
    } else {
        text
    }
}

fn label(node: &AnnotatedNode) -> String {
    match &node.kind {
        NodeKind::Text(text) => truncate(text),
        NodeKind::Element(tag) if tag.is_list() => {
            format!("{} ({} items)", tag.name(), node.children.len())
        }
        NodeKind::Element(tag) => {
            let text = node.text_content();
            if text.trim().is_empty() || node.children.iter().any(|c| !c.is_text()) {
                tag.name().to_string()
            } else {
                format!("{} {}", tag.name(), truncate(&text))
            }
        }
        NodeKind::Component(kind) => kind.name().to_string(),
    }
}

fn format_node(
    node: &AnnotatedNode,
    prefix: &str,
    is_last: bool,
    show_attributes: bool,
    output: &mut String,
) {
    let connector = if is_last { "└─" } else { "├─" };
    output.push_str(&format!(
        "{prefix}{connector} {} {}\n",
        get_icon(&node.kind),
        label(node)
    ));

    let child_prefix = format!("{prefix}{}", if is_last { "  " } else { "│ " });
    if show_attributes {
        let last_line = node.children.is_empty();
        let count = node.attributes.len();
        for (i, (name, value)) in node.attributes.iter().enumerate() {
            let connector = if last_line && i == count - 1 { "└─" } else { "├─" };
            output.push_str(&format!("{child_prefix}{connector} = {name}={}\n", truncate(value)));
        }
    }
    format_children(&node.children, &child_prefix, show_attributes, output);
}

fn format_children(
    children: &[AnnotatedNode],
    prefix: &str,
    show_attributes: bool,
    output: &mut String,
) {
    for (i, child) in children.iter().enumerate() {
        format_node(child, prefix, i == children.len() - 1, show_attributes, output);
    }
}

pub fn to_treeviz_str(doc: &AnnotatedNode) -> String {
    to_treeviz_str_with_params(doc, &HashMap::new())
}

/// Renders the tree; `attributes=true` adds attribute lines.
pub fn to_treeviz_str_with_params(doc: &AnnotatedNode, params: &HashMap<String, String>) -> String {
    let show_attributes = params
        .get("attributes")
        .map(|v| v.to_lowercase() == "true")
        .unwrap_or(false);

    let mut output = format!(
        "{} Document ({} nodes)\n",
        get_icon(&doc.kind),
        doc.node_count()
    );
    if doc.is_text() || doc.component_kind().is_some() {
        format_node(doc, "", true, show_attributes, &mut output);
    } else {
        format_children(&doc.children, "", show_attributes, &mut output);
    }
    output
}

pub struct TreevizFormat;

impl Format for TreevizFormat {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn description(&self) -> &str {
        "Visual tree representation with indentation and Unicode icons"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tree", "treeviz"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &AnnotatedNode, _state: &RenderingState) -> Result<String, FormatError> {
        Ok(to_treeviz_str(doc))
    }

    fn serialize_with_options(
        &self,
        doc: &AnnotatedNode,
        _state: &RenderingState,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        Ok(to_treeviz_str_with_params(doc, options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{ComponentKind, Tag};
    use insta::assert_snapshot;

    fn sample() -> AnnotatedNode {
        AnnotatedNode::root(vec![
            AnnotatedNode::element(Tag::Heading(1)).with_child(AnnotatedNode::text("Title")),
            AnnotatedNode::element(Tag::UnorderedList)
                .with_child(AnnotatedNode::element(Tag::ListItem).with_child(AnnotatedNode::text("a"))),
            AnnotatedNode::component(ComponentKind::UserTag).with_attr("name", "kim"),
        ])
    }

    #[test]
    fn renders_nested_connectors() {
        assert_snapshot!(to_treeviz_str(&sample()), @r"
        ⧉ Document (7 nodes)
        ├─ § h1 Title
        ├─ ☰ ul (1 items)
        │ └─ • li a
        └─ @ user-tag
        ");
    }

    #[test]
    fn attributes_option_lists_fields() {
        let mut params = HashMap::new();
        params.insert("attributes".to_string(), "true".to_string());
        let output = to_treeviz_str_with_params(&sample(), &params);
        assert!(output.contains("  ├─ = avatar=true\n"));
        assert!(output.contains("  └─ = name=kim\n"));
    }

    #[test]
    fn long_text_is_truncated() {
        let label = truncate(&"x".repeat(40));
        assert_eq!(label.chars().count(), LABEL_WIDTH);
        assert!(label.ends_with('…'));
    }
}
