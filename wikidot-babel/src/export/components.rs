//! One render function per component kind.

use super::blocks::table_rows;
use super::templates::{self, Email};
use super::{Exporter, Scope};
use crate::tree::{AnnotatedNode, ComponentKind, RenderingState};
use once_cell::sync::Lazy;
use regex::Regex;

static DIGITS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// Container class forced onto a banner that carries a secondary class.
pub const CLASSIFIED: &str = "机密";

pub type Handler = fn(&Exporter<'_>, &AnnotatedNode, Scope) -> String;

/// The render function for `kind`.
pub fn handler(kind: ComponentKind) -> Handler {
    match kind {
        ComponentKind::AcsBanner => acs_banner,
        ComponentKind::AimHeader => aim_header,
        ComponentKind::ImageBlock => image_block,
        ComponentKind::ImageBlockAdv => image_block_adv,
        ComponentKind::Tabview => tabview,
        ComponentKind::Tab => tab,
        ComponentKind::Collapsible => collapsible,
        ComponentKind::LicenseBox | ComponentKind::FileEntry | ComponentKind::RateModule => hoisted,
        ComponentKind::Footnote => footnote,
        ComponentKind::HorizontalRule => horizontal_rule,
        ComponentKind::CssModule => css_module,
        ComponentKind::DivBlock => div_block,
        ComponentKind::UserTag => user_tag,
        ComponentKind::Toc => toc,
        ComponentKind::RaisaNotice => raisa_notice,
        ComponentKind::ClassWarning => class_warning,
        ComponentKind::O5Command => o5_command,
        ComponentKind::PageNote => page_note,
        ComponentKind::EmailExample => email_example,
        ComponentKind::LoginLogout => login_logout,
        ComponentKind::FoundationBackground => foundation_background,
        ComponentKind::WikidotTable => wikidot_table,
        ComponentKind::AudioPlayer => audio_player,
        ComponentKind::ForcedBreak => forced_break,
        ComponentKind::DashEscape => dash_escape,
    }
}

/// Rendered at page level, not in place.
fn hoisted(_: &Exporter<'_>, _: &AnnotatedNode, _: Scope) -> String {
    String::new()
}

fn horizontal_rule(_: &Exporter<'_>, _: &AnnotatedNode, _: Scope) -> String {
    "------".to_string()
}

fn toc(_: &Exporter<'_>, _: &AnnotatedNode, _: Scope) -> String {
    "[[toc]]".to_string()
}

fn enclose(open: &str, body: &str, close: &str) -> String {
    let body = body.trim_matches('\n');
    if body.trim().is_empty() {
        format!("{open}\n{close}")
    } else {
        format!("{open}\n{body}\n{close}")
    }
}

/// Single-line field: line breaks and forced breaks removed.
fn one_line(value: &str) -> String {
    value
        .replace("@@@@", "")
        .replace("@@ @@", "")
        .replace(['\r', '\n'], "")
        .trim()
        .to_string()
}

fn without_forced_breaks(text: &str) -> String {
    text.lines()
        .filter(|line| !matches!(line.trim(), "@@@@" | "@@ @@"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Banner include. A secondary class forces the container class to
/// [`CLASSIFIED`] whatever the stored value.
fn acs_banner(_: &Exporter<'_>, node: &AnnotatedNode, _: Scope) -> String {
    let clearance = DIGITS_RE
        .find(node.attr("clearance"))
        .map_or("1", |m| m.as_str());
    let secondary = node.attr("secondary-class").trim().to_lowercase();
    let secondary = if secondary == "none" { String::new() } else { secondary };
    let container = if secondary.is_empty() {
        node.attr("container-class").trim().to_lowercase()
    } else {
        CLASSIFIED.to_string()
    };

    let mut secondary_lines = String::new();
    if !secondary.is_empty() {
        secondary_lines.push_str(&format!("|secondary-class={secondary}\n"));
        let icon = node.attr("secondary-icon").trim();
        if !icon.is_empty() {
            secondary_lines.push_str(&format!("|secondary-icon={icon}\n"));
        }
    }

    let mut include = format!(
        "[[include :scp-wiki-cn:component:anomaly-class-bar-source\n|lang=cn\n|item-number={}\n|clearance={clearance}\n|container-class={container}\n{secondary_lines}|disruption-class={}\n|risk-class={}\n]]",
        node.attr("item-number").trim(),
        node.attr("disruption-class").trim().to_lowercase(),
        node.attr("risk-class").trim().to_lowercase(),
    );
    if node.flag("shivering") {
        include = format!("[[div class=\"Shivering-ACS\"]]\n{include}\n[[/div]]");
    }
    if node.flag("animation") {
        include = format!("[[include :scp-wiki-cn:component:acs-animation]]\n{include}");
    }
    include
}

/// Methodology header. `top-only` drops the site block and `bottom-only`
/// drops the project block.
fn aim_header(_: &Exporter<'_>, node: &AnnotatedNode, _: Scope) -> String {
    let blocks = match node.attr("blocks") {
        "top-only" => "-",
        "bottom-only" => "!",
        _ => "",
    };
    let mut out = String::from("[[include :scp-wiki-cn:component:advanced-information-methodology\n");
    if !blocks.is_empty() {
        out.push_str(&format!("|blocks={blocks}\n"));
    }
    out.push_str("|lang=CN\n");
    if blocks != "!" {
        out.push_str(&format!(
            "|XXXX={}\n|lv={}\n|cc={}\n|dc={}\n",
            node.attr("project-id"),
            node.attr("level"),
            node.attr("containment"),
            node.attr("disruption"),
        ));
    }
    if blocks != "-" {
        out.push_str(&format!(
            "|site={}\n|dir={}\n|head={}\n|mtf={}\n",
            node.attr("site"),
            node.attr("director"),
            node.attr("researcher"),
            node.attr("task-force"),
        ));
    }
    out.push_str("]]");
    out
}

fn align_or_default(node: &AnnotatedNode) -> &str {
    match node.attr("align").trim() {
        "" => "right",
        align => align,
    }
}

fn image_block(_: &Exporter<'_>, node: &AnnotatedNode, _: Scope) -> String {
    format!(
        "[[include component:image-block name={}\n|caption={}\n|align={}]]",
        node.attr("name").trim(),
        node.attr("caption").trim(),
        align_or_default(node),
    )
}

/// Bare numbers get a `px` unit.
fn dimension(value: &str) -> String {
    let value = value.trim().to_lowercase();
    if value.is_empty() || value.ends_with("px") || value.ends_with('%') {
        value
    } else {
        format!("{value}px")
    }
}

fn image_block_adv(_: &Exporter<'_>, node: &AnnotatedNode, _: Scope) -> String {
    let mut out = format!(
        "[[include component:image-block\n|name={}\n|caption={}",
        node.attr("name").trim(),
        node.attr("caption").trim(),
    );
    let width = dimension(node.attr("width"));
    if !width.is_empty() {
        out.push_str(&format!("\n|width={width}"));
    }
    let height = dimension(node.attr("height"));
    if !height.is_empty() {
        out.push_str(&format!("\n|height={height}"));
    }
    out.push_str(&format!("\n|align={}]]", align_or_default(node)));
    out
}

fn tabview(exporter: &Exporter<'_>, node: &AnnotatedNode, scope: Scope) -> String {
    let tabs: Vec<String> = node
        .children
        .iter()
        .filter(|child| child.component_kind() == Some(ComponentKind::Tab))
        .map(|child| tab(exporter, child, scope))
        .collect();
    let mut out = String::from("[[tabview]]\n");
    for tab in tabs {
        out.push_str(&tab);
        out.push('\n');
    }
    out.push_str("[[/tabview]]");
    out
}

fn tab(exporter: &Exporter<'_>, node: &AnnotatedNode, scope: Scope) -> String {
    let body = exporter.blocks(&node.children, scope);
    enclose(&format!("[[tab {}]]", node.attr("title").trim()), &body, "[[/tab]]")
}

fn collapsible(exporter: &Exporter<'_>, node: &AnnotatedNode, scope: Scope) -> String {
    let open = format!(
        "[[collapsible show=\"{}\" hide=\"{}\"]]",
        node.attr("show").trim(),
        node.attr("hide").trim()
    );
    enclose(&open, &exporter.blocks(&node.children, scope), "[[/collapsible]]")
}

/// The same node renders in either syntax depending only on the state.
fn footnote(exporter: &Exporter<'_>, node: &AnnotatedNode, _: Scope) -> String {
    let content = node.attr("content").trim();
    if exporter.state().better_footnotes {
        format!("[[span class=\"fnnum\"]].[[/span]][[span class=\"fncon\"]]{content}[[/span]]")
    } else {
        format!("[[footnote]] {content} [[/footnote]]")
    }
}

fn css_module(_: &Exporter<'_>, node: &AnnotatedNode, _: Scope) -> String {
    format!("[[module CSS]]\n{}\n[[/module]]", node.attr("css").trim())
}

fn div_block(exporter: &Exporter<'_>, node: &AnnotatedNode, scope: Scope) -> String {
    let mut params = node.attr("params").trim();
    if let Some(inner) = params
        .strip_prefix("[[div")
        .and_then(|rest| rest.strip_suffix("]]"))
    {
        params = inner.trim();
    }
    let open = if params.is_empty() {
        "[[div]]".to_string()
    } else {
        format!("[[div {params}]]")
    };
    enclose(&open, &exporter.blocks(&node.children, scope), "[[/div]]")
}

fn user_tag(_: &Exporter<'_>, node: &AnnotatedNode, _: Scope) -> String {
    let star = if node.flag("avatar") { "*" } else { "" };
    format!("[[{star}user {}]]", node.attr("name").trim())
}

fn raisa_notice(exporter: &Exporter<'_>, node: &AnnotatedNode, scope: Scope) -> String {
    let open = format!("[[div style=\"{}\"]]", templates::RAISA_STYLE);
    enclose(&open, &exporter.blocks(&node.children, scope), "[[/div]]")
}

fn class_warning(exporter: &Exporter<'_>, node: &AnnotatedNode, scope: Scope) -> String {
    let inner = without_forced_breaks(&exporter.blocks(&node.children, scope));
    let div = enclose(
        &format!("[[div style=\"{}\"]]", templates::CLASS_WARNING_STYLE),
        &inner,
        "[[/div]]",
    );
    format!("[[=]]\n{div}\n[[/=]]")
}

fn o5_command(_: &Exporter<'_>, node: &AnnotatedNode, _: Scope) -> String {
    templates::o5_command(
        &one_line(node.attr("heading")),
        &without_forced_breaks(node.attr("body").trim()),
        &one_line(node.attr("footer")),
    )
}

fn page_note(exporter: &Exporter<'_>, node: &AnnotatedNode, scope: Scope) -> String {
    let div = enclose(
        "[[div class=\"page\"]]",
        &exporter.blocks(&node.children, scope),
        "[[/div]]",
    );
    format!("{}\n{div}", templates::PAGE_CSS)
}

fn email_example(_: &Exporter<'_>, node: &AnnotatedNode, _: Scope) -> String {
    let first = Email {
        to: node.attr("to-1").trim(),
        from: node.attr("from-1").trim(),
        subject: node.attr("subject-1").trim(),
        body: node.attr("body-1").trim(),
    };
    let second = Email {
        to: node.attr("to-2").trim(),
        from: node.attr("from-2").trim(),
        subject: node.attr("subject-2").trim(),
        body: node.attr("body-2").trim(),
    };
    templates::email_example(
        node.attr("show-title").trim(),
        node.attr("hide-title").trim(),
        &first,
        &second,
    )
}

fn login_logout(exporter: &Exporter<'_>, node: &AnnotatedNode, scope: Scope) -> String {
    let body = exporter.blocks(&node.children, scope);
    let body = if body.trim().is_empty() { "文字" } else { body.trim() };
    let user_id = match node.attr("user-id").trim() {
        "" => "你的ID",
        id => id,
    };
    templates::login_logout(user_id, body)
}

fn foundation_background(_: &Exporter<'_>, node: &AnnotatedNode, _: Scope) -> String {
    templates::foundation_background(
        &one_line(node.attr("title")),
        &one_line(node.attr("subtitle")),
        &one_line(node.attr("description")),
        &one_line(node.attr("item-number")),
    )
}

fn wikidot_table(exporter: &Exporter<'_>, node: &AnnotatedNode, scope: Scope) -> String {
    exporter.advanced_table(node.attr("style"), &table_rows(node), scope)
}

fn audio_player(_: &Exporter<'_>, node: &AnnotatedNode, _: Scope) -> String {
    format!(
        "[[include :snippets:html5player\n|type=audio\n|url={}]]",
        node.attr("url").trim()
    )
}

fn forced_break(_: &Exporter<'_>, node: &AnnotatedNode, _: Scope) -> String {
    match node.attr("source") {
        "@@ @@" => "@@ @@".to_string(),
        _ => "@@@@".to_string(),
    }
}

fn dash_escape(_: &Exporter<'_>, node: &AnnotatedNode, _: Scope) -> String {
    let count = node.attr("count").trim().parse::<usize>().unwrap_or(3).max(1);
    format!("@{}@", "-".repeat(count))
}

/// License block with its file entries, rendered at the end of the page.
pub fn license_box(node: &AnnotatedNode, state: &RenderingState) -> String {
    let original = node.flag("original");
    let mut out = String::new();
    if !state.better_footnotes {
        out.push_str("[[footnoteblock]]\n");
    }
    out.push_str("[[include :scp-wiki-cn:component:license-box\n");
    if original {
        out.push_str("|lang=CN\n");
    }
    let author = node.attr("author").trim();
    if !author.is_empty() {
        out.push_str(&format!("|author={author}\n"));
    }
    let translator = node.attr("translator").trim();
    if !original && !translator.is_empty() {
        out.push_str(&format!("|translator={translator}\n"));
    }
    out.push_str("]]\n=====\n");

    let entries: Vec<String> = node
        .children
        .iter()
        .filter(|child| child.component_kind() == Some(ComponentKind::FileEntry))
        .map(file_entry)
        .filter(|entry| !entry.is_empty())
        .collect();
    out.push_str(&entries.join("\n"));
    out.push_str("=====\n[[include :scp-wiki-cn:component:license-box-end]]\n");
    out
}

/// Quoted lines for the non-empty fields of one file entry.
fn file_entry(entry: &AnnotatedNode) -> String {
    let has_image_name = !entry.attr("img-name").trim().is_empty();
    let fields = [
        ("file-name", "文件名"),
        ("img-name", "图像名"),
        ("img-author", if has_image_name { "图像作者" } else { "作者" }),
        ("img-license", "授权协议"),
        ("source-link", "来源链接"),
        ("derived-from", "衍生自"),
        ("note", "备注"),
    ];
    let mut out = String::new();
    for (field, label) in fields {
        let value = entry.attr(field).trim();
        if value.is_empty() {
            continue;
        }
        if field == "source-link" {
            out.push_str(&format!("> {label}：{value}\n"));
        } else {
            out.push_str(&format!("> **{label}：**{value}\n"));
        }
    }
    out
}
