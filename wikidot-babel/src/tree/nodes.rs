//! Core data structures for the annotated document tree.

use super::component::ComponentKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The unit of the document tree.
///
/// Children are owned exclusively by their parent, so a tree is always a
/// strict hierarchy with no shared nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedNode {
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<AnnotatedNode>,
}

/// What a node stands for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum NodeKind {
    Text(String),
    Element(Tag),
    Component(ComponentKind),
}

/// Generic structural and inline markup tags.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tag {
    /// Document root; never rendered as an element of its own.
    Root,
    Paragraph,
    Heading(u8),
    Bold,
    Italic,
    Underline,
    Strike,
    Superscript,
    Subscript,
    Span,
    Font,
    Link,
    UnorderedList,
    OrderedList,
    ListItem,
    Blockquote,
    LineBreak,
    Table,
    TableRow,
    TableHeaderCell,
    TableCell,
    Div,
    /// Any tag without a dedicated variant, kept by name.
    Other(String),
}

impl Tag {
    /// Maps an HTML tag name (case-insensitive) onto a tag.
    pub fn from_name(name: &str) -> Tag {
        let lower = name.to_ascii_lowercase();
        match lower.as_str() {
            "p" => Tag::Paragraph,
            "h1" => Tag::Heading(1),
            "h2" => Tag::Heading(2),
            "h3" => Tag::Heading(3),
            "h4" => Tag::Heading(4),
            "h5" => Tag::Heading(5),
            "h6" => Tag::Heading(6),
            "b" | "strong" => Tag::Bold,
            "i" | "em" => Tag::Italic,
            "u" | "ins" => Tag::Underline,
            "s" | "del" | "strike" => Tag::Strike,
            "sup" => Tag::Superscript,
            "sub" => Tag::Subscript,
            "span" => Tag::Span,
            "font" => Tag::Font,
            "a" => Tag::Link,
            "ul" => Tag::UnorderedList,
            "ol" => Tag::OrderedList,
            "li" => Tag::ListItem,
            "blockquote" => Tag::Blockquote,
            "br" => Tag::LineBreak,
            "table" => Tag::Table,
            "tr" => Tag::TableRow,
            "th" => Tag::TableHeaderCell,
            "td" => Tag::TableCell,
            "div" => Tag::Div,
            _ => Tag::Other(lower),
        }
    }

    /// The canonical HTML tag name used when rendering a fragment.
    pub fn name(&self) -> &str {
        match self {
            Tag::Root => "body",
            Tag::Paragraph => "p",
            Tag::Heading(level) => match level {
                1 => "h1",
                2 => "h2",
                3 => "h3",
                4 => "h4",
                5 => "h5",
                _ => "h6",
            },
            Tag::Bold => "b",
            Tag::Italic => "i",
            Tag::Underline => "u",
            Tag::Strike => "s",
            Tag::Superscript => "sup",
            Tag::Subscript => "sub",
            Tag::Span => "span",
            Tag::Font => "font",
            Tag::Link => "a",
            Tag::UnorderedList => "ul",
            Tag::OrderedList => "ol",
            Tag::ListItem => "li",
            Tag::Blockquote => "blockquote",
            Tag::LineBreak => "br",
            Tag::Table => "table",
            Tag::TableRow => "tr",
            Tag::TableHeaderCell => "th",
            Tag::TableCell => "td",
            Tag::Div => "div",
            Tag::Other(name) => name,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Tag::UnorderedList | Tag::OrderedList)
    }
}

impl AnnotatedNode {
    pub fn text(content: impl Into<String>) -> Self {
        AnnotatedNode {
            kind: NodeKind::Text(content.into()),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn element(tag: Tag) -> Self {
        AnnotatedNode {
            kind: NodeKind::Element(tag),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Creates a component node carrying exactly the default field set of `kind`.
    pub fn component(kind: ComponentKind) -> Self {
        let attributes = kind
            .fields()
            .iter()
            .map(|(name, default)| (name.to_string(), default.to_string()))
            .collect();
        AnnotatedNode {
            kind: NodeKind::Component(kind),
            attributes,
            children: Vec::new(),
        }
    }

    pub fn root(children: Vec<AnnotatedNode>) -> Self {
        AnnotatedNode::element(Tag::Root).with_children(children)
    }

    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }

    pub fn with_child(mut self, child: AnnotatedNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: Vec<AnnotatedNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Returns the attribute value, or the empty string when it is absent.
    pub fn attr(&self, name: &str) -> &str {
        self.attributes.get(name).map(String::as_str).unwrap_or("")
    }

    /// Returns a boolean attribute stored as `"true"`/`"false"`.
    pub fn flag(&self, name: &str) -> bool {
        self.attr(name).eq_ignore_ascii_case("true")
    }

    pub fn tag(&self) -> Option<&Tag> {
        match &self.kind {
            NodeKind::Element(tag) => Some(tag),
            _ => None,
        }
    }

    pub fn component_kind(&self) -> Option<ComponentKind> {
        match &self.kind {
            NodeKind::Component(kind) => Some(*kind),
            _ => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, NodeKind::Text(_))
    }

    /// Restricts a component's attributes to its declared field set, filling
    /// defaults for missing fields. Element and text nodes are left alone.
    pub fn normalize(&mut self) {
        if let NodeKind::Component(kind) = &self.kind {
            let mut fields = BTreeMap::new();
            for (name, default) in kind.fields() {
                let value = self
                    .attributes
                    .remove(*name)
                    .unwrap_or_else(|| default.to_string());
                fields.insert(name.to_string(), value);
            }
            self.attributes = fields;
        }
    }

    /// Concatenated text of this node and all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match &self.kind {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Element(Tag::LineBreak) => out.push('\n'),
            _ => {
                for child in &self.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Depth-first search for the first node matching `predicate`.
    pub fn find(&self, predicate: &dyn Fn(&AnnotatedNode) -> bool) -> Option<&AnnotatedNode> {
        if predicate(self) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(predicate))
    }

    /// Collects every node matching `predicate`, in document order.
    pub fn find_all<'a>(
        &'a self,
        predicate: &dyn Fn(&AnnotatedNode) -> bool,
        out: &mut Vec<&'a AnnotatedNode>,
    ) {
        if predicate(self) {
            out.push(self);
        }
        for child in &self.children {
            child.find_all(predicate, out);
        }
    }

    /// Number of nodes in the subtree, this node included.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(AnnotatedNode::node_count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_aliases_collapse() {
        assert_eq!(Tag::from_name("STRONG"), Tag::Bold);
        assert_eq!(Tag::from_name("em"), Tag::Italic);
        assert_eq!(Tag::from_name("del"), Tag::Strike);
        assert_eq!(Tag::from_name("section"), Tag::Other("section".into()));
    }

    #[test]
    fn component_starts_with_defaults() {
        let node = AnnotatedNode::component(ComponentKind::ImageBlock);
        assert_eq!(node.attr("align"), "right");
        assert_eq!(node.attributes.len(), 3);
    }

    #[test]
    fn normalize_drops_unknown_and_fills_missing() {
        let mut node = AnnotatedNode::component(ComponentKind::Collapsible);
        node.attributes.clear();
        node.attributes.insert("show".into(), "Open".into());
        node.attributes.insert("bogus".into(), "x".into());
        node.normalize();
        assert_eq!(node.attr("show"), "Open");
        assert!(node.attributes.contains_key("hide"));
        assert!(!node.attributes.contains_key("bogus"));
    }

    #[test]
    fn text_content_follows_line_breaks() {
        let p = AnnotatedNode::element(Tag::Paragraph)
            .with_child(AnnotatedNode::text("a"))
            .with_child(AnnotatedNode::element(Tag::LineBreak))
            .with_child(AnnotatedNode::text("b"));
        assert_eq!(p.text_content(), "a\nb");
    }
}
