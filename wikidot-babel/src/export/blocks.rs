//! Block elements: paragraphs, headings, lists, quotes, tables and divs.

use super::{Exporter, Scope};
use crate::tree::{AnnotatedNode, NodeKind, Tag};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static SOFT_BREAKS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{2,}").unwrap());

/// Div classes that belong to the editor surface rather than the page.
const EDITOR_CLASSES: [&str; 6] = [
    "scp-component",
    "div-content",
    "div-header",
    "basalt-theme",
    "bhl-theme",
    "shivering-theme",
];

/// Runs of blank lines inside one block would merge into a single paragraph
/// break, so every extra newline becomes a forced break.
pub fn expand_soft_breaks(text: &str) -> String {
    SOFT_BREAKS_RE
        .replace_all(text, |caps: &Captures| {
            format!("\n{}", "@@@@\n".repeat(caps[0].len() - 1))
        })
        .into_owned()
}

/// True when nothing but style delimiters and whitespace is left.
fn is_blank(content: &str) -> bool {
    ["**", "//", "__", "^^", ",,"]
        .iter()
        .fold(content.to_string(), |text, delimiter| text.replace(delimiter, ""))
        .trim()
        .is_empty()
}

/// Alignment block marker for a `text-align` style, if any.
pub(super) fn align_mark(style: &str) -> Option<&'static str> {
    let style: String = style.chars().filter(|c| !c.is_whitespace()).collect();
    let style = style.to_ascii_lowercase();
    if style.contains("text-align:justify") {
        Some("==")
    } else if style.contains("text-align:right") {
        Some(">")
    } else if style.contains("text-align:left") {
        Some("<")
    } else if style.contains("text-align:center") {
        Some("=")
    } else {
        None
    }
}

fn aligned(mark: &str, content: &str) -> String {
    format!("[[{mark}]]\n{}\n[[/{mark}]]", content.trim())
}

/// True when the last visible child of a list item is a `<br>`.
fn ends_with_break(item: &AnnotatedNode) -> bool {
    item.children
        .iter()
        .rev()
        .find(|child| !(child.is_text() && child.text_content().trim().is_empty()))
        .is_some_and(|child| child.tag() == Some(&Tag::LineBreak))
}

fn style_part(node: &AnnotatedNode) -> String {
    let style = node.attr("style").trim();
    if style.is_empty() {
        String::new()
    } else {
        format!(r#" style="{style}""#)
    }
}

impl Exporter<'_> {
    pub(super) fn paragraph(&self, node: &AnnotatedNode, scope: Scope) -> String {
        let content = self.inline(&node.children, scope);
        if is_blank(&content) {
            return "@@@@".to_string();
        }
        let content = expand_soft_breaks(content.trim_matches('\n'));
        match align_mark(node.attr("style")) {
            Some(mark) => aligned(mark, &content),
            None => content,
        }
    }

    pub(super) fn heading(&self, level: u8, node: &AnnotatedNode, scope: Scope) -> String {
        let text = self.inline(&node.children, scope);
        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
        format!("{} {text}", "+".repeat(usize::from(level.clamp(1, 6))))
    }

    /// `depth` starts at 1; nested levels indent one space each.
    pub(super) fn list(&self, node: &AnnotatedNode, depth: usize, scope: Scope) -> String {
        let marker = if node.tag() == Some(&Tag::OrderedList) {
            "#"
        } else {
            "*"
        };
        let mut out = String::new();
        let mut open_break = false;
        for child in &node.children {
            let (line, is_item) = match child.tag() {
                Some(Tag::ListItem) => (self.list_item(child, marker, depth, scope), true),
                Some(tag) if tag.is_list() => (self.list(child, depth + 1, scope), false),
                _ if child.text_content().trim().is_empty() => continue,
                _ => {
                    let item = AnnotatedNode::element(Tag::ListItem).with_child(child.clone());
                    (self.list_item(&item, marker, depth, scope), true)
                }
            };
            if line.is_empty() {
                continue;
            }
            if !out.is_empty() {
                // A blank line between two items of one list reads back as a
                // break closing the first item.
                out.push_str(if open_break && is_item { "\n\n" } else { "\n" });
            }
            out.push_str(&line);
            open_break = is_item && ends_with_break(child);
        }
        out
    }

    pub(super) fn list_item(
        &self,
        node: &AnnotatedNode,
        marker: &str,
        depth: usize,
        scope: Scope,
    ) -> String {
        let (nested, content): (Vec<&AnnotatedNode>, Vec<&AnnotatedNode>) = node
            .children
            .iter()
            .partition(|child| child.tag().is_some_and(Tag::is_list));
        let text = self.inline(content, scope);
        let text = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" _\n");

        let mut out = format!("{}{marker} {text}", " ".repeat(depth.saturating_sub(1)));
        for list in nested {
            let inner = self.list(list, depth + 1, scope);
            if !inner.is_empty() {
                out.push('\n');
                out.push_str(&inner);
            }
        }
        out
    }

    /// Nested quotes sit on the lines right after their surrounding text so
    /// that one deeper `>` marker is all that separates them.
    pub(super) fn blockquote(&self, node: &AnnotatedNode, scope: Scope) -> String {
        let mut parts = Vec::new();
        let mut run = Vec::new();
        for child in &node.children {
            if child.tag() == Some(&Tag::Blockquote) {
                if !run.is_empty() {
                    parts.push(self.blocks(&run, scope));
                    run.clear();
                }
                parts.push(self.blockquote(child, scope));
            } else {
                run.push(child.clone());
            }
        }
        if !run.is_empty() {
            parts.push(self.blocks(&run, scope));
        }
        parts.retain(|part| !part.trim().is_empty());
        parts
            .join("\n")
            .lines()
            .map(|line| {
                if line.trim().is_empty() {
                    ">".to_string()
                } else {
                    format!("> {line}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub(super) fn table(&self, node: &AnnotatedNode, scope: Scope) -> String {
        let rows = table_rows(node);
        let styled = !node.attr("style").is_empty()
            || rows.iter().any(|row| {
                !row.attr("style").is_empty()
                    || table_cells(row).iter().any(|cell| !cell.attr("style").is_empty())
            });
        if styled {
            return self.advanced_table(node.attr("style"), &rows, scope);
        }

        rows.iter()
            .map(|row| {
                let cells: Vec<String> = table_cells(row)
                    .iter()
                    .map(|cell| {
                        let span = cell.attr("colspan").trim().parse::<usize>().unwrap_or(1).max(1);
                        let header = cell.tag() == Some(&Tag::TableHeaderCell);
                        let content = self.cell_content(cell, scope).replace('\n', " _\n");
                        format!("{}{}{content}", "||".repeat(span), if header { "~ " } else { " " })
                    })
                    .collect();
                format!("{} ||", cells.join(" "))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// `[[table]]`/`[[row]]`/`[[cell]]` form, used when styles must survive.
    pub(super) fn advanced_table(
        &self,
        style: &str,
        rows: &[&AnnotatedNode],
        scope: Scope,
    ) -> String {
        let mut lines = Vec::new();
        if style.trim().is_empty() {
            lines.push("[[table]]".to_string());
        } else {
            lines.push(format!(r#"[[table style="{}"]]"#, style.trim()));
        }
        for row in rows {
            lines.push(format!("[[row{}]]", style_part(row)));
            for cell in table_cells(row) {
                let name = if cell.tag() == Some(&Tag::TableHeaderCell) {
                    "hcell"
                } else {
                    "cell"
                };
                lines.push(format!("[[{name}{}]]", style_part(cell)));
                let inner = self.blocks(&cell.children, scope);
                let inner = inner.trim();
                if !inner.is_empty() {
                    lines.push(inner.to_string());
                }
                lines.push(format!("[[/{name}]]"));
            }
            lines.push("[[/row]]".to_string());
        }
        lines.push("[[/table]]".to_string());
        lines.join("\n")
    }

    fn cell_content(&self, cell: &AnnotatedNode, scope: Scope) -> String {
        self.blocks(&cell.children, scope)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub(super) fn div(&self, node: &AnnotatedNode, scope: Scope) -> String {
        let content = self.blocks(&node.children, scope);
        if let Some(mark) = align_mark(node.attr("style")) {
            return aligned(mark, &content);
        }
        let class = node.attr("class").trim();
        if !class.is_empty() {
            if EDITOR_CLASSES.iter().any(|editor| class.contains(editor)) {
                return content;
            }
            return format!("[[div class=\"{class}\"]]\n{content}\n[[/div]]");
        }
        if is_blank(&content) {
            return "@@@@".to_string();
        }
        content
    }
}

pub(super) fn table_rows(table: &AnnotatedNode) -> Vec<&AnnotatedNode> {
    table
        .children
        .iter()
        .filter(|child| child.tag() == Some(&Tag::TableRow))
        .collect()
}

fn table_cells(row: &AnnotatedNode) -> Vec<&AnnotatedNode> {
    row.children
        .iter()
        .filter(|child| {
            matches!(
                child.kind,
                NodeKind::Element(Tag::TableCell) | NodeKind::Element(Tag::TableHeaderCell)
            )
        })
        .collect()
}
