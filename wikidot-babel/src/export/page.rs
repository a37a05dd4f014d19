//! Document-level assembly: preamble, body, hoisted license blocks.

use super::components::license_box;
use super::templates::EMAIL_CSS;
use super::{Exporter, Scope};
use crate::tree::{AnnotatedNode, ComponentKind, RenderingState, Theme};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static BLANK_BEFORE_BREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n[ \t]*\n[ \t]*(@@@@|@@ @@)").unwrap());
static BLANK_AFTER_BREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(@@@@|@@ @@)\n\s*\n+").unwrap());
static IMAGE_AFTER_TEXT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([^\n\s])[ \t]*(\[\[include component:image-block)").unwrap());
static INDENTED_IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]+(\[\[include component:image-block)").unwrap());
static BLANK_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Exports a whole document.
///
/// Theme includes, the rate module, the footnote-mode include and the email
/// stylesheet come first, in that order. License blocks are collected from
/// anywhere in the tree and appended after the body.
pub fn export(root: &AnnotatedNode, state: &RenderingState) -> String {
    let mut out = theme_preamble(&state.theme);

    if let Some(rate) = root.find(&|node| node.component_kind() == Some(ComponentKind::RateModule)) {
        out.push_str(&rate_module(rate));
    }
    if state.better_footnotes {
        out.push_str("[[include :scp-wiki-cn:component:betterfootnotes]]\n");
    }
    if root
        .find(&|node| node.component_kind() == Some(ComponentKind::EmailExample))
        .is_some()
    {
        out.push_str(EMAIL_CSS);
        out.push('\n');
    }

    let exporter = Exporter::new(state);
    let body = exporter.blocks(std::slice::from_ref(root), Scope::default());
    out.push_str(&normalize_body(&body));

    let mut licenses = Vec::new();
    root.find_all(
        &|node| node.component_kind() == Some(ComponentKind::LicenseBox),
        &mut licenses,
    );
    debug!(
        nodes = root.node_count(),
        licenses = licenses.len(),
        better_footnotes = state.better_footnotes,
        theme = ?state.theme.kind(),
        "exporting document"
    );
    for license in licenses {
        if !out.is_empty() && !out.ends_with("\n\n") {
            out.push_str(if out.ends_with('\n') { "\n" } else { "\n\n" });
        }
        out.push_str(&license_box(license, state));
    }

    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

/// Final whitespace pass over the exported body.
///
/// Blank lines around forced breaks are dropped, image-block includes are
/// moved onto lines of their own and any run of three or more newlines
/// becomes one blank line followed by a forced break.
pub fn normalize_body(body: &str) -> String {
    let text = body.replace("\r\n", "\n").replace('\u{a0}', " ");
    let text = BLANK_BEFORE_BREAK_RE.replace_all(&text, "\n$1");
    let text = BLANK_AFTER_BREAK_RE.replace_all(&text, "$1\n");
    let text = IMAGE_AFTER_TEXT_RE.replace_all(&text, "$1\n$2");
    let text = INDENTED_IMAGE_RE.replace_all(&text, "$1");
    BLANK_RUN_RE.replace_all(&text, "\n\n@@@@\n\n").into_owned()
}

fn theme_preamble(theme: &Theme) -> String {
    match theme {
        Theme::None => String::new(),
        Theme::Basalt {
            dark_mode,
            wide,
            hide_title,
        } => {
            let options: String = [
                (*dark_mode, "|darkmode=a"),
                (*wide, "|wide=a"),
                (*hide_title, "|hidetitle=a"),
            ]
            .iter()
            .filter(|(enabled, _)| *enabled)
            .map(|(_, option)| *option)
            .collect();
            if options.is_empty() {
                "[[include :scp-wiki-cn:theme:basalt]]\n".to_string()
            } else {
                format!("[[include :scp-wiki-cn:theme:basalt 版式设置{options}]]\n")
            }
        }
        Theme::ShiveringNight { city } => {
            let suffix = city.map(|city| format!(" {}=*", city.token())).unwrap_or_default();
            format!("[[include :scp-wiki-cn:theme:shivering-night{suffix}]]\n")
        }
        Theme::BlackHighlighter {
            dark_sidebar,
            collapsible_sidebar,
            toggle_sidebar,
            centered_header,
            offices,
        } => {
            let mut out = String::from("[[include :scp-wiki-cn:theme:black-highlighter-theme]]\n");
            let includes = [
                (*dark_sidebar, ":scp-wiki:component:bhl-dark-sidebar"),
                (*collapsible_sidebar, ":scp-wiki:component:collapsible-sidebar"),
                (*toggle_sidebar, ":scp-wiki:component:toggle-sidebar-bhl"),
                (*centered_header, ":scp-wiki:component:centered-header-bhl"),
                (*offices, ":scp-wiki-cn:theme:scp-offices-theme"),
            ];
            for (enabled, page) in includes {
                if enabled {
                    out.push_str(&format!("[[include {page}]]\n"));
                }
            }
            out
        }
    }
}

fn rate_module(node: &AnnotatedNode) -> String {
    if node.flag("hidden") {
        return String::new();
    }
    match node.attr("align").trim() {
        "left" => "[[<]]\n[[module Rate]]\n[[/<]]\n".to_string(),
        "right" => "[[>]]\n[[module Rate]]\n[[/>]]\n".to_string(),
        _ => "[[module Rate]]\n".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{City, Tag};

    fn paragraph(text: &str) -> AnnotatedNode {
        AnnotatedNode::element(Tag::Paragraph).with_child(AnnotatedNode::text(text))
    }

    #[test]
    fn blank_runs_collapse_to_one_forced_break() {
        assert_eq!(normalize_body("a\n\n\n\nb"), "a\n\n@@@@\n\nb");
    }

    #[test]
    fn blank_lines_around_forced_breaks_are_dropped() {
        assert_eq!(normalize_body("a\n\n@@@@\n\nb"), "a\n@@@@\nb");
    }

    #[test]
    fn image_blocks_get_their_own_line() {
        assert_eq!(
            normalize_body("text [[include component:image-block name=a]]"),
            "text\n[[include component:image-block name=a]]"
        );
    }

    #[test]
    fn preamble_follows_theme_options() {
        let root = AnnotatedNode::root(vec![paragraph("x")]);
        let basalt = RenderingState::new(
            Theme::Basalt {
                dark_mode: true,
                wide: false,
                hide_title: true,
            },
            false,
        );
        assert_eq!(
            export(&root, &basalt),
            "[[include :scp-wiki-cn:theme:basalt 版式设置|darkmode=a|hidetitle=a]]\nx\n"
        );
        let shivering = RenderingState::new(Theme::ShiveringNight { city: Some(City::Dublin) }, false);
        assert!(export(&root, &shivering).starts_with("[[include :scp-wiki-cn:theme:shivering-night dub=*]]\n"));
    }

    #[test]
    fn rate_is_hoisted_and_license_appended() {
        let root = AnnotatedNode::root(vec![
            paragraph("body"),
            AnnotatedNode::component(ComponentKind::LicenseBox).with_attr("author", "A"),
            AnnotatedNode::component(ComponentKind::RateModule).with_attr("align", "right"),
        ]);
        let markup = export(&root, &RenderingState::default());
        assert!(markup.starts_with("[[>]]\n[[module Rate]]\n[[/>]]\nbody\n\n[[footnoteblock]]\n"));
        assert!(markup.ends_with("[[include :scp-wiki-cn:component:license-box-end]]\n"));
    }

    #[test]
    fn hidden_rate_module_emits_nothing() {
        let root = AnnotatedNode::root(vec![
            AnnotatedNode::component(ComponentKind::RateModule).with_attr("hidden", "true"),
            paragraph("x"),
        ]);
        assert_eq!(export(&root, &RenderingState::default()), "x\n");
    }

    #[test]
    fn empty_document_exports_to_empty_markup() {
        assert_eq!(export(&AnnotatedNode::root(Vec::new()), &RenderingState::default()), "");
    }
}
