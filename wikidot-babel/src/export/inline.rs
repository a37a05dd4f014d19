//! Inline elements: text styles, colored and sized spans, links.

use super::{Exporter, Scope};
use crate::tree::AnnotatedNode;
use once_cell::sync::Lazy;
use regex::Regex;

static RGB_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"rgba?\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)").unwrap());

static COLOR_STYLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:^|;)\s*color:\s*([^;]+)").unwrap());

static SIZE_STYLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)font-size:\s*([\w.\-%]+)").unwrap());

/// `rgb(r, g, b)` → `#rrggbb`. Anything else is returned trimmed.
pub fn rgb_to_hex(color: &str) -> String {
    let color = color.trim();
    if color.starts_with('#') {
        return color.to_string();
    }
    match RGB_RE.captures(color) {
        Some(caps) => {
            let channel = |i: usize| caps[i].parse::<u8>().unwrap_or(u8::MAX);
            format!("#{:02x}{:02x}{:02x}", channel(1), channel(2), channel(3))
        }
        None => color.to_string(),
    }
}

/// Splits `content` into leading whitespace, core and trailing whitespace.
fn split_padding(content: &str) -> (&str, &str, &str) {
    let core = content.trim();
    if core.is_empty() {
        return (content, "", "");
    }
    let start = content.len() - content.trim_start().len();
    let end = start + core.len();
    (&content[..start], core, &content[end..])
}

/// Wraps the non-blank core of `content` in `open`/`close`, keeping padding
/// outside: `"  x "` → `"  **x** "`.
pub fn wrap_trimmed(content: &str, open: &str, close: &str) -> String {
    match split_padding(content) {
        (_, "", _) => content.to_string(),
        (lead, core, trail) => format!("{lead}{open}{core}{close}{trail}"),
    }
}

impl Exporter<'_> {
    pub(super) fn bold(&self, node: &AnnotatedNode, scope: Scope) -> String {
        if scope.in_bold {
            return self.inline(&node.children, scope);
        }
        let inner = Scope {
            in_bold: true,
            ..scope
        };
        wrap_trimmed(&self.inline(&node.children, inner), "**", "**")
    }

    pub(super) fn italic(&self, node: &AnnotatedNode, scope: Scope) -> String {
        if scope.in_italic {
            return self.inline(&node.children, scope);
        }
        let inner = Scope {
            in_italic: true,
            ..scope
        };
        wrap_trimmed(&self.inline(&node.children, inner), "//", "//")
    }

    pub(super) fn wrapped(&self, node: &AnnotatedNode, delimiter: &str, scope: Scope) -> String {
        wrap_trimmed(&self.inline(&node.children, scope), delimiter, delimiter)
    }

    pub(super) fn span(&self, node: &AnnotatedNode, scope: Scope) -> String {
        let content = self.inline(&node.children, scope);
        let style = node.attr("style");
        if content.trim().is_empty() || style.is_empty() {
            return content;
        }
        let lower = style.to_ascii_lowercase();
        if lower.contains("monospace") || lower.contains("courier") {
            return wrap_trimmed(&content, "{{", "}}");
        }

        let mut out = content;
        if let Some(caps) = COLOR_STYLE_RE.captures(style) {
            let color = rgb_to_hex(&caps[1]);
            out = wrap_trimmed(&out, &format!("##{color}|"), "##");
        }
        if let Some(caps) = SIZE_STYLE_RE.captures(style) {
            out = format!("[[size {}]]{out}[[/size]]", &caps[1]);
        }
        if lower.contains("underline") {
            out = wrap_trimmed(&out, "__", "__");
        }
        if lower.contains("line-through") {
            out = wrap_trimmed(&out, "--", "--");
        }
        out
    }

    pub(super) fn font(&self, node: &AnnotatedNode, scope: Scope) -> String {
        let content = self.inline(&node.children, scope);
        let color = node.attr("color").trim();
        if content.trim().is_empty() || color.is_empty() {
            return content;
        }
        wrap_trimmed(&content, &format!("##{}|", rgb_to_hex(color)), "##")
    }

    /// Absolute URLs use the single-bracket form, page names the
    /// triple-bracket form.
    pub(super) fn link(&self, node: &AnnotatedNode, scope: Scope) -> String {
        let text = self.inline(&node.children, scope);
        let text = text.trim();
        let href = node.attr("href").trim();
        if href.is_empty() {
            return text.to_string();
        }
        let absolute = href.starts_with("http://") || href.starts_with("https://");
        if absolute {
            let star = if node.attr("target") == "_blank" { "*" } else { "" };
            let text = if text.is_empty() { href } else { text };
            format!("[{star}{href} {text}]")
        } else if text.is_empty() || text == href {
            format!("[[[{href}]]]")
        } else {
            format!("[[[{href} | {text}]]]")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{RenderingState, Tag};

    fn render(node: AnnotatedNode) -> String {
        let state = RenderingState::default();
        Exporter::new(&state).inline([&node], Scope::default())
    }

    fn styled(tag: Tag, children: Vec<AnnotatedNode>) -> AnnotatedNode {
        AnnotatedNode::element(tag).with_children(children)
    }

    #[test]
    fn padding_moves_outside_delimiters() {
        let u = styled(Tag::Underline, vec![AnnotatedNode::text("  x  ")]);
        assert_eq!(render(u), "  __x__  ");
    }

    #[test]
    fn nested_bold_wraps_once() {
        let b = styled(
            Tag::Bold,
            vec![styled(Tag::Bold, vec![AnnotatedNode::text("x")])],
        );
        assert_eq!(render(b), "**x**");
    }

    #[test]
    fn rgb_colors_become_hex() {
        assert_eq!(rgb_to_hex("rgb(255, 0, 16)"), "#ff0010");
        assert_eq!(rgb_to_hex(" red "), "red");
        let span = styled(Tag::Span, vec![AnnotatedNode::text("hot")])
            .with_attr("style", "color: rgb(255, 0, 0);");
        assert_eq!(render(span), "###ff0000|hot##");
    }

    #[test]
    fn background_color_is_not_text_color() {
        let span = styled(Tag::Span, vec![AnnotatedNode::text("x")])
            .with_attr("style", "background-color: red;");
        assert_eq!(render(span), "x");
    }

    #[test]
    fn sized_and_monospace_spans() {
        let size = styled(Tag::Span, vec![AnnotatedNode::text("big")])
            .with_attr("style", "font-size: 150%;");
        assert_eq!(render(size), "[[size 150%]]big[[/size]]");
        let mono = styled(Tag::Span, vec![AnnotatedNode::text("code")])
            .with_attr("style", "font-family: monospace;");
        assert_eq!(render(mono), "{{code}}");
    }

    #[test]
    fn link_forms() {
        let external = styled(Tag::Link, vec![AnnotatedNode::text("Site")])
            .with_attr("href", "https://a.org")
            .with_attr("target", "_blank");
        assert_eq!(render(external), "[*https://a.org Site]");
        let internal = styled(Tag::Link, vec![AnnotatedNode::text("Page")]).with_attr("href", "scp-001");
        assert_eq!(render(internal), "[[[scp-001 | Page]]]");
    }
}
