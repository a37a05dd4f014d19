//! Icons for tree visualization
//!
//! One Unicode character per node category, so a glance at a treeviz dump
//! tells text from structure from components.

use crate::tree::{ComponentKind, NodeKind, Tag};

/// Icon for a node kind.
pub fn get_icon(kind: &NodeKind) -> &'static str {
    match kind {
        NodeKind::Text(_) => "◦",
        NodeKind::Element(tag) => tag_icon(tag),
        NodeKind::Component(kind) => component_icon(*kind),
    }
}

fn tag_icon(tag: &Tag) -> &'static str {
    match tag {
        Tag::Root => "⧉",
        Tag::Paragraph => "¶",
        Tag::Heading(_) => "§",
        Tag::Bold => "𝐁",
        Tag::Italic => "𝐼",
        Tag::Underline | Tag::Strike | Tag::Superscript | Tag::Subscript => "ƒ",
        Tag::Span | Tag::Font => "✎",
        Tag::Link => "⊕",
        Tag::UnorderedList | Tag::OrderedList => "☰",
        Tag::ListItem => "•",
        Tag::Blockquote => "\"",
        Tag::LineBreak => "↵",
        Tag::Table | Tag::TableRow | Tag::TableHeaderCell | Tag::TableCell => "▦",
        Tag::Div => "▢",
        Tag::Other(_) => "○",
    }
}

fn component_icon(kind: ComponentKind) -> &'static str {
    match kind {
        ComponentKind::ForcedBreak => "⎯",
        ComponentKind::Footnote => "³",
        ComponentKind::UserTag => "@",
        ComponentKind::LicenseBox | ComponentKind::FileEntry => "©",
        ComponentKind::Tabview | ComponentKind::Tab => "⊟",
        ComponentKind::Collapsible => "▸",
        ComponentKind::ImageBlock | ComponentKind::ImageBlockAdv => "▣",
        _ => "◆",
    }
}
