//! Annotated tree → Wikidot markup.
//!
//! The exporter is a recursive pretty-printer. Every node renders to a
//! [`Piece`]: either a block, which stands on lines of its own, or an inline
//! run, which is concatenated with its neighbours. Containers join block
//! pieces with one blank line, the paragraph separator of the markup.
//!
//! Components dispatch through [`components::handler`], an exhaustive match
//! from kind to render function. Document-level pieces (theme includes,
//! the rate module, license blocks) are hoisted by [`page`].
//!
//! Exporting never fails. Missing attributes read as empty strings and
//! unknown elements render their children only.

mod blocks;
mod components;
mod inline;
mod page;
mod templates;

use crate::tree::{AnnotatedNode, NodeKind, RenderingState, Tag};

pub use page::{export, normalize_body};

/// Style scope of the current position in the tree. Nested equivalent
/// styles do not wrap twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scope {
    pub in_bold: bool,
    pub in_italic: bool,
}

/// Rendered output of one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece {
    Block(String),
    Inline(String),
}

/// One export pass over a tree.
pub struct Exporter<'s> {
    state: &'s RenderingState,
}

impl<'s> Exporter<'s> {
    pub fn new(state: &'s RenderingState) -> Self {
        Exporter { state }
    }

    pub fn state(&self) -> &RenderingState {
        self.state
    }

    /// Renders one node.
    pub fn render(&self, node: &AnnotatedNode, scope: Scope) -> Vec<Piece> {
        match &node.kind {
            NodeKind::Text(text) => vec![Piece::Inline(text.replace('\u{200b}', ""))],
            NodeKind::Component(kind) => {
                let markup = components::handler(*kind)(self, node, scope);
                if kind.is_inline() {
                    vec![Piece::Inline(markup)]
                } else {
                    vec![Piece::Block(markup)]
                }
            }
            NodeKind::Element(tag) => self.render_element(tag, node, scope),
        }
    }

    fn render_element(&self, tag: &Tag, node: &AnnotatedNode, scope: Scope) -> Vec<Piece> {
        let block = |markup: String| vec![Piece::Block(markup)];
        let inline = |markup: String| vec![Piece::Inline(markup)];
        match tag {
            Tag::Root => block(self.blocks(&node.children, scope)),
            Tag::Paragraph => block(self.paragraph(node, scope)),
            Tag::Heading(level) => block(self.heading(*level, node, scope)),
            Tag::UnorderedList | Tag::OrderedList => block(self.list(node, 1, scope)),
            Tag::ListItem => block(self.list_item(node, "*", 1, scope)),
            Tag::Blockquote => block(self.blockquote(node, scope)),
            Tag::Table => block(self.table(node, scope)),
            Tag::TableRow | Tag::TableHeaderCell | Tag::TableCell => {
                block(self.blocks(&node.children, scope))
            }
            Tag::Div => block(self.div(node, scope)),
            Tag::LineBreak => inline("\n".to_string()),
            Tag::Bold => inline(self.bold(node, scope)),
            Tag::Italic => inline(self.italic(node, scope)),
            Tag::Underline => inline(self.wrapped(node, "__", scope)),
            Tag::Strike => inline(self.wrapped(node, "--", scope)),
            Tag::Superscript => inline(self.wrapped(node, "^^", scope)),
            Tag::Subscript => inline(self.wrapped(node, ",,", scope)),
            Tag::Span => inline(self.span(node, scope)),
            Tag::Font => inline(self.font(node, scope)),
            Tag::Link => inline(self.link(node, scope)),
            Tag::Other(_) => node
                .children
                .iter()
                .flat_map(|child| self.render(child, scope))
                .collect(),
        }
    }

    /// Renders children as a sequence of blocks separated by blank lines.
    /// Runs of inline pieces between blocks form paragraphs of their own.
    pub fn blocks(&self, children: &[AnnotatedNode], scope: Scope) -> String {
        let mut parts: Vec<String> = Vec::new();
        let mut run = String::new();
        for child in children {
            for piece in self.render(child, scope) {
                match piece {
                    Piece::Inline(text) => run.push_str(&text),
                    Piece::Block(text) => {
                        flush_run(&mut parts, &mut run);
                        push_block(&mut parts, &text);
                    }
                }
            }
        }
        flush_run(&mut parts, &mut run);
        parts.join("\n\n")
    }

    /// Renders children as one run of inline text. Blocks found inline are
    /// put on lines of their own.
    pub fn inline<'n>(
        &self,
        children: impl IntoIterator<Item = &'n AnnotatedNode>,
        scope: Scope,
    ) -> String {
        let mut out = String::new();
        for child in children {
            for piece in self.render(child, scope) {
                match piece {
                    Piece::Inline(text) => out.push_str(&text),
                    Piece::Block(text) => {
                        let text = text.trim_matches('\n');
                        if text.is_empty() {
                            continue;
                        }
                        if !out.is_empty() && !out.ends_with('\n') {
                            out.push('\n');
                        }
                        out.push_str(text);
                        out.push('\n');
                    }
                }
            }
        }
        out
    }
}

fn push_block(parts: &mut Vec<String>, text: &str) {
    let text = text.trim_matches('\n');
    if !text.trim().is_empty() {
        parts.push(text.to_string());
    }
}

fn flush_run(parts: &mut Vec<String>, run: &mut String) {
    if !run.trim().is_empty() {
        let text = blocks::expand_soft_breaks(run.trim_matches('\n'));
        parts.push(text);
    }
    run.clear();
}
