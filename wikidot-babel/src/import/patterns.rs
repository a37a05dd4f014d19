//! Cached regex patterns for the import pipeline.
//!
//! Patterns are compiled once on first use. Markup has already been through
//! entity normalization when these run, so a literal `<` in markup shows up
//! as `&lt;` (see the alignment patterns).

use once_cell::sync::Lazy;
use regex::Regex;

// === Normalization ===

pub static ENTITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z][a-zA-Z0-9]{1,31});").unwrap());

pub static EMPTY_PARAGRAPH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<p>\s*<br\s*/?>\s*</p>").unwrap());

pub static BR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());

// === Balanced blocks ===

pub static DIV_OPEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\[\[div(\s[^\]]*)?\]\]").unwrap());

pub static DIV_CLOSE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\[\[/div\]\]").unwrap());

pub static TABLE_OPEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\[\[table(\s[^\]]*)?\]\]").unwrap());

pub static TABLE_CLOSE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\[\[/table\]\]").unwrap());

pub static ROW_OPEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\[\[row(\s[^\]]*)?\]\]").unwrap());

pub static ROW_CLOSE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\[\[/row\]\]").unwrap());

pub static CELL_OPEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\[\[h?cell(\s[^\]]*)?\]\]").unwrap());

pub static CELL_CLOSE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\[\[/h?cell\]\]").unwrap());

pub static COLLAPSIBLE_OPEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\[\[collapsible(\s[^\]]*)?\]\]").unwrap());

pub static COLLAPSIBLE_CLOSE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\[\[/collapsible\]\]").unwrap());

pub static FAKEPROT_OPEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)\[\[div(\s+class="fakeprot")\]\]"#).unwrap());

// === Parameters ===

pub static STYLE_PARAM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"style="([^"]*)""#).unwrap());

pub static CLASS_PARAM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"class=["']([^"']+)["']"#).unwrap());

pub static SHOW_PARAM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"show="([^"]*)""#).unwrap());

pub static HIDE_PARAM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"hide="([^"]*)""#).unwrap());

// === Page settings ===

pub static RATE_ALIGNED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)\[\[(&lt;|>)\]\]\s*\[\[module\s+rate\]\]\s*\[\[/(?:&lt;|>)\]\]\n?").unwrap()
});

pub static RATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\[\[module\s+rate\]\]\n?").unwrap());

pub static THEME_INCLUDE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\[\[include\s+:scp-wiki-cn:theme:[^\]]*\]\]\n?").unwrap()
});

pub static SIDEBAR_INCLUDE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\[\[include\s+:scp-wiki:component:(?:bhl-dark-sidebar|collapsible-sidebar|toggle-sidebar-bhl|centered-header-bhl)[^\]]*\]\]\n?",
    )
    .unwrap()
});

pub static BETTER_FOOTNOTES_INCLUDE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\[\[include\s+:scp-wiki-cn:component:betterfootnotes[^\]]*\]\]\n?").unwrap()
});

pub static FOOTNOTEBLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\[\[footnoteblock[^\]]*\]\]\n?").unwrap());

// === Include components ===

pub static LICENSE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?is)\[\[include\s+:scp-wiki-cn:component:license-box([\s|][^\]]*)?\]\](.*?)\[\[include\s+:scp-wiki-cn:component:license-box-end\]\]\n?",
    )
    .unwrap()
});

pub static LICENSE_FILES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)=====(.*?)=====").unwrap());

pub static LICENSE_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^>\s*(?:\*\*)?\s*([^：:*]+?)\s*[：:]\s*(?:\*\*)?\s*(.*)$").unwrap()
});

pub static STRAY_LICENSE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\[\[include\s+:scp-wiki-cn:component:license-box(?:-end)?[^\]]*\]\]\n?").unwrap()
});

pub static SHIVERING_ACS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?is)(\[\[include\s+:scp-wiki-cn:component:acs-animation\s*\]\]\s*)?\[\[div\s+class="Shivering-ACS"\]\]\s*(\[\[include\s+:scp-wiki-cn:component:anomaly-class-bar-source.*?\]\])\s*\[\[/div\]\]"#,
    )
    .unwrap()
});

pub static ACS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?is)(\[\[include\s+:scp-wiki-cn:component:acs-animation\s*\]\]\s*)?\[\[include\s+:scp-wiki-cn:component:anomaly-class-bar-source.*?\]\]",
    )
    .unwrap()
});

pub static ACS_ANIMATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\[\[include\s+:scp-wiki-cn:component:acs-animation\s*\]\]\n?").unwrap()
});

pub static AIM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)\[\[include\s+:scp-wiki-cn:component:advanced-information-methodology.*?\]\]")
        .unwrap()
});

pub static CENTERED_IMAGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)\[\[=\]\]\s*(\[\[include\s+component:image-block.*?\]\])\s*\[\[/=\]\]").unwrap()
});

pub static IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)\[\[include\s+component:image-block.*?\]\]").unwrap());

pub static AUDIO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)\[\[include\s+:snippets:html5player.*?\]\]").unwrap());

pub static INCLUDE_HEAD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^\[\[include\s+").unwrap());

pub static TABVIEW_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)\[\[tabview\]\](.*?)\[\[/tabview\]\]").unwrap());

pub static TAB_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)\[\[tab\s+([^\]]*)\]\](.*?)\[\[/tab\]\]").unwrap());

pub static FAKEPROT_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\s*default:\s*&lt;([^>\n]*)>").unwrap());

pub static CSS_MODULE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)\[\[module\s+css\]\](.*?)\[\[/module\]\]").unwrap());

pub static USER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\[\[(\*?)user\s+([^\]]+)\]\]").unwrap());

pub static TOC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\[\[(?:f?&lt;|f?>)?toc\]\]").unwrap());

pub static FOOTNOTE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)\[\[footnote\]\](.*?)\[\[/footnote\]\]").unwrap());

pub static BETTER_FOOTNOTE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?is)\[\[span\s+class=["']fnnum["']\]\].*?\[\[/span\]\]\s*\[\[span\s+class=["']fncon["']\]\](.*?)\[\[/span\]\]"#,
    )
    .unwrap()
});

pub static SIZE_OPEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\[\[size\s+([^\]]+)\]\]").unwrap());

pub static SIZE_CLOSE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\[\[/size\]\]").unwrap());

pub static ALIGN_OPEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[(==|=|&lt;|>)\]\]").unwrap());

pub static ALIGN_CLOSE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[/(==|=|&lt;|>)\]\]").unwrap());

// === Decorative divs ===

pub static O5_HEADING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+\+\*?\s*(.*)$").unwrap());

pub static O5_FOOTER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]*=[ \t]+(.*)$").unwrap());

pub static EMAIL_COLLAPSIBLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\[\[collapsible\s+show="([^"]*)"\s+hide="([^"]*)"\]\]"#).unwrap()
});

pub static EMAIL_TO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*\s*至\s*[：:]\s*(?:\*\*)?\s*([^\n]*)").unwrap());

pub static EMAIL_FROM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*\s*自\s*[：:]\s*(?:\*\*)?\s*([^\n]*)").unwrap());

pub static EMAIL_SUBJECT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*\s*主题\s*[：:]\s*(?:\*\*)?\s*([^\n]*)").unwrap());

pub static EMAIL_BODY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)\*\*\s*主题\s*[：:].*?\[\[/div\]\]\s*-{3,}[ \t]*\n(.*?)\[\[/div\]\]").unwrap()
});

pub static ORDER_TITLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)\[\[div class="ordertitle"\]\]\s*\+\*?\s*(.*?)\s*\[\[/div\]\]"#).unwrap()
});

pub static ORDER_DESCRIPTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)\[\[div class="orderdescription"\]\]\s*_?\s*\+\*?\s*([^\n]*)\n(.*?)\[\[/div\]\]"#)
        .unwrap()
});

pub static ORDER_ITEM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)\[\[div class="itemno"\]\]\s*\+\*?\s*(.*?)\s*\[\[/div\]\]"#).unwrap()
});

// === Lines ===

pub static LIST_ITEM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^( *)([*#]+)\s+(.*)$").unwrap());

pub static BLOCK_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^</?(?:h[1-6]|ul|ol|li|table|tbody|tr|blockquote|div|p)[\s>]").unwrap()
});

// === Inline ===

pub static DASH_ESCAPE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"@(-{3,})@").unwrap());

pub static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^(\+{1,6})\*?[ \t]+(.*?)[ \t]*$").unwrap());

pub static HR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^-{4,}[ \t]*$").unwrap());

pub static TRIPLE_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[\[([^|\]\n]+)(?:\|([^\]\n]*))?\]\]\]").unwrap());

pub static SINGLE_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[(\*?)(https?://[^\s\]]+)[ \t]+([^\]\n]+)\]").unwrap());

pub static COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"##(#?[0-9A-Za-z]+)\|(.+?)##").unwrap());

pub static MONOSPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{(.+?)\}\}").unwrap());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_item_requires_space_after_markers() {
        assert!(LIST_ITEM_RE.is_match("* item"));
        assert!(LIST_ITEM_RE.is_match(" # nested"));
        assert!(!LIST_ITEM_RE.is_match("**bold** start"));
    }

    #[test]
    fn block_line_detection() {
        assert!(BLOCK_LINE_RE.is_match("<h1>Title</h1>"));
        assert!(BLOCK_LINE_RE.is_match("</ul></li>"));
        assert!(!BLOCK_LINE_RE.is_match("<b>bold</b> text"));
        assert!(!BLOCK_LINE_RE.is_match("<span>x</span>"));
    }

    #[test]
    fn div_open_captures_params() {
        let caps = DIV_OPEN_RE.captures(r#"[[div class="a"]]"#).unwrap();
        assert_eq!(caps.get(1).unwrap().as_str().trim(), r#"class="a""#);
        assert!(DIV_OPEN_RE.is_match("[[DIV]]"));
        assert!(!DIV_OPEN_RE.is_match("[[divider]]"));
    }
}
