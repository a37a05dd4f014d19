//! Stage 3, second half: block containers whose bodies are imported
//! recursively, plus size and alignment blocks.

use super::fragment::{component, escape_attr, styled_open};
use super::patterns::{
    ALIGN_CLOSE_RE, ALIGN_OPEN_RE, CELL_CLOSE_RE, CELL_OPEN_RE, CLASS_PARAM_RE,
    COLLAPSIBLE_CLOSE_RE, COLLAPSIBLE_OPEN_RE, DIV_CLOSE_RE, DIV_OPEN_RE, FAKEPROT_ID_RE,
    FAKEPROT_OPEN_RE, HIDE_PARAM_RE, ROW_CLOSE_RE, ROW_OPEN_RE, SHOW_PARAM_RE, SIZE_CLOSE_RE, SIZE_OPEN_RE,
    STYLE_PARAM_RE, TABLE_CLOSE_RE, TABLE_OPEN_RE, TABVIEW_RE, TAB_RE,
};
use super::scan::{find_block, scan_balanced, Block};
use super::Importer;
use crate::tree::{ComponentKind, ThemeKind};
use regex::Regex;

/// Basalt classes that map onto a named div variant.
const BASALT_CLASSES: [&str; 16] = [
    "floatbox",
    "blockquote",
    "notation",
    "jotting",
    "modal",
    "smallmodal",
    "papernote",
    "document",
    "darkdocument",
    "raisa_memo",
    "classification_memo",
    "ettra_memo",
    "ethics_memo",
    "temporal_memo",
    "overwatch_memo",
    "miscomm_memo",
];

/// Variant name for a basalt div, e.g. `basalt-notation`.
pub fn basalt_variant(params: &str) -> Option<String> {
    let classes = CLASS_PARAM_RE.captures(params)?;
    let classes: Vec<&str> = classes[1].split_whitespace().collect();
    let class = BASALT_CLASSES
        .iter()
        .find(|known| classes.iter().any(|c| c.eq_ignore_ascii_case(known)))?;
    if *class == "floatbox" && classes.iter().any(|c| c.eq_ignore_ascii_case("right")) {
        return Some("basalt-floatbox-right".to_string());
    }
    Some(format!("basalt-{class}"))
}

impl Importer {
    /// Replaces every balanced `open … close` region, outermost first.
    fn rewrite_blocks(
        &mut self,
        text: &str,
        open: &Regex,
        close: &Regex,
        mut build: impl FnMut(&mut Self, &str, &Block) -> String,
    ) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        while let Some(block) = find_block(text, last, open, close) {
            out.push_str(&text[last..block.start]);
            let payload = build(self, text, &block);
            let token = self.block(block.source(text), payload);
            out.push_str(&token);
            last = block.end;
        }
        out.push_str(&text[last..]);
        out
    }

    pub(super) fn tabviews(&mut self, text: &str) -> String {
        self.rewrite(text, &TABVIEW_RE, |this, caps| {
            let tabs: String = TAB_RE
                .captures_iter(&caps[1])
                .map(|tab| {
                    let title = this.field_text(&tab[1]);
                    let body = this.nested(&tab[2]);
                    component(ComponentKind::Tab, &[("title", title.as_str())], &body)
                })
                .collect();
            let payload = component(ComponentKind::Tabview, &[], &tabs);
            Some(this.block(&caps[0], payload))
        })
    }

    /// The fake login form: a `fakeprot` div followed by the collapsible
    /// holding the revealed content. Only recognized when the page carries
    /// the widget's stylesheet.
    pub(super) fn login_logout(&mut self, text: &str) -> String {
        if !self.signatures.fakeprot_css {
            return text.to_string();
        }
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        let mut pos = 0;
        while let Some(open) = FAKEPROT_OPEN_RE.find_at(text, pos) {
            let Some(form) = scan_balanced(text, &DIV_OPEN_RE, &DIV_CLOSE_RE, open.end()) else {
                pos = open.end();
                continue;
            };
            let user_id = FAKEPROT_ID_RE
                .captures(&text[form.inner.clone()])
                .map(|caps| self.field_text(&caps[1]))
                .unwrap_or_default();

            let mut end = form.end;
            let mut body = String::new();
            let rest = &text[form.end..];
            let gap = rest.len() - rest.trim_start().len();
            if let Some(collapsible) = COLLAPSIBLE_OPEN_RE.find_at(text, form.end + gap) {
                if collapsible.start() == form.end + gap {
                    if let Some(balanced) = scan_balanced(
                        text,
                        &COLLAPSIBLE_OPEN_RE,
                        &COLLAPSIBLE_CLOSE_RE,
                        collapsible.end(),
                    ) {
                        body = self.nested(&text[balanced.inner.clone()]);
                        end = balanced.end;
                    }
                }
            }

            let mut fields = Vec::new();
            if !user_id.is_empty() {
                fields.push(("user-id", user_id.as_str()));
            }
            let payload = component(ComponentKind::LoginLogout, &fields, &body);
            out.push_str(&text[last..open.start()]);
            let token = self.block(&text[open.start()..end], payload);
            out.push_str(&token);
            last = end;
            pos = end;
        }
        out.push_str(&text[last..]);
        out
    }

    /// `[[table]]`/`[[row]]`/`[[cell]]` blocks with their style strings.
    pub(super) fn advanced_tables(&mut self, text: &str) -> String {
        self.rewrite_blocks(text, &TABLE_OPEN_RE, &TABLE_CLOSE_RE, |this, text, table| {
            let style = style_param(table.params(text));
            let inner = table.inner(text);
            let mut rows = String::new();
            let mut pos = 0;
            while let Some(row) = find_block(inner, pos, &ROW_OPEN_RE, &ROW_CLOSE_RE) {
                rows.push_str(&styled_open("tr", &style_param(row.params(inner))));
                let cells = row.inner(inner);
                let mut cell_pos = 0;
                while let Some(cell) = find_block(cells, cell_pos, &CELL_OPEN_RE, &CELL_CLOSE_RE) {
                    let tag = if cells[cell.start..].to_ascii_lowercase().starts_with("[[hcell") {
                        "th"
                    } else {
                        "td"
                    };
                    rows.push_str(&styled_open(tag, &style_param(cell.params(cells))));
                    rows.push_str(&this.nested_inline(cell.inner(cells).trim()));
                    rows.push_str(&format!("</{tag}>"));
                    cell_pos = cell.end;
                }
                rows.push_str("</tr>");
                pos = row.end;
            }
            component(ComponentKind::WikidotTable, &[("style", style.as_str())], &rows)
        })
    }

    pub(super) fn collapsibles(&mut self, text: &str) -> String {
        self.rewrite_blocks(
            text,
            &COLLAPSIBLE_OPEN_RE,
            &COLLAPSIBLE_CLOSE_RE,
            |this, text, block| {
                let params = block.params(text);
                let show = SHOW_PARAM_RE.captures(params).map(|c| this.field_text(&c[1]));
                let hide = HIDE_PARAM_RE.captures(params).map(|c| this.field_text(&c[1]));
                let mut fields = Vec::new();
                if let Some(show) = &show {
                    fields.push(("show", show.as_str()));
                }
                if let Some(hide) = &hide {
                    fields.push(("hide", hide.as_str()));
                }
                let body = this.nested(block.inner(text));
                component(ComponentKind::Collapsible, &fields, &body)
            },
        )
    }

    /// Every remaining `[[div]]`. Under the basalt theme, known classes are
    /// tagged with their variant.
    pub(super) fn generic_divs(&mut self, text: &str) -> String {
        self.rewrite_blocks(text, &DIV_OPEN_RE, &DIV_CLOSE_RE, |this, text, block| {
            let params = this.field_text(block.params(text));
            let variant = if this.theme == ThemeKind::Basalt {
                basalt_variant(&params).unwrap_or_default()
            } else {
                String::new()
            };
            let body = this.nested(block.inner(text));
            component(
                ComponentKind::DivBlock,
                &[("params", params.as_str()), ("variant", variant.as_str())],
                &body,
            )
        })
    }

    pub(super) fn alignment(&mut self, text: &str) -> String {
        let text = ALIGN_OPEN_RE.replace_all(text, |caps: &regex::Captures| {
            format!(r#"<div style="text-align: {};">"#, align_name(&caps[1]))
        });
        ALIGN_CLOSE_RE.replace_all(&text, "</div>").into_owned()
    }
}

/// `[[size v]] … [[/size]]` becomes a sized span. The body stays in place
/// so later stages still format it.
pub(super) fn sizes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    while let Some(block) = find_block(text, last, &SIZE_OPEN_RE, &SIZE_CLOSE_RE) {
        out.push_str(&text[last..block.start]);
        out.push_str(&format!(
            r#"<span style="font-size: {};">"#,
            escape_attr(block.params(text))
        ));
        out.push_str(&sizes(block.inner(text)));
        out.push_str("</span>");
        last = block.end;
    }
    out.push_str(&text[last..]);
    out
}

fn align_name(marker: &str) -> &'static str {
    match marker {
        "==" => "justify",
        "&lt;" => "left",
        ">" => "right",
        _ => "center",
    }
}

fn style_param(params: &str) -> String {
    STYLE_PARAM_RE
        .captures(params)
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::import;

    #[test]
    fn basalt_classes_map_to_variants() {
        assert_eq!(basalt_variant(r#"class="notation""#).as_deref(), Some("basalt-notation"));
        assert_eq!(
            basalt_variant(r#"class="floatbox right""#).as_deref(),
            Some("basalt-floatbox-right")
        );
        assert_eq!(basalt_variant(r#"class="unknown""#), None);
    }

    #[test]
    fn nested_divs_stay_nested() {
        let html = import(r#"[[div class="a"]] [[div class="b"]] X [[/div]] [[/div]]"#, ThemeKind::None);
        assert_eq!(html.matches(r#"data-type="div-block""#).count(), 2);
        let outer = html.find(r#"data-params="class=&quot;a&quot;""#).unwrap();
        let inner = html.find(r#"data-params="class=&quot;b&quot;""#).unwrap();
        assert!(outer < inner);
        assert!(html.ends_with("<p>X</p></div></div>"));
    }

    #[test]
    fn collapsible_reads_titles_and_body() {
        let html = import("[[collapsible show=\"Open\" hide=\"Close\"]]\nInside\n[[/collapsible]]", ThemeKind::None);
        assert_eq!(
            html,
            r#"<div class="scp-component" data-type="collapsible" data-show="Open" data-hide="Close"><p>Inside</p></div>"#
        );
    }

    #[test]
    fn advanced_table_keeps_styles() {
        let markup = "[[table style=\"width: 100%\"]]\n[[row]]\n[[hcell style=\"color: red\"]]\nHead\n[[/hcell]]\n[[/row]]\n[[/table]]";
        let html = import(markup, ThemeKind::None);
        assert!(html.contains(r#"<table class="scp-component" data-type="wikidot-table" data-style="width: 100%">"#));
        assert!(html.contains(r#"<tr><th style="color: red">Head</th></tr>"#));
    }

    #[test]
    fn nested_sizes_nest_spans() {
        assert_eq!(
            sizes("[[size 120%]]a[[size 80%]]b[[/size]]c[[/size]]"),
            r#"<span style="font-size: 120%;">a<span style="font-size: 80%;">b</span>c</span>"#
        );
    }

    #[test]
    fn alignment_becomes_styled_div() {
        let html = import("[[=]]\nMiddle\n[[/=]]", ThemeKind::None);
        assert_eq!(html, r#"<div style="text-align: center;"><p>Middle</p></div>"#);
    }
}
