//! Stage 2: decorative divs recognized by signature.
//!
//! Wikidot has no way to tag a div as "this is an O5 command banner"; the
//! community templates are recognized by fragments of their style string
//! or class name instead. A div that only partially matches a signature is
//! left for the generic `div-block` path in stage 3.

use super::fragment::{component, decode_entities};
use super::patterns::{
    DIV_CLOSE_RE, DIV_OPEN_RE, EMAIL_BODY_RE, EMAIL_COLLAPSIBLE_RE, EMAIL_FROM_RE,
    EMAIL_SUBJECT_RE, EMAIL_TO_RE, O5_FOOTER_RE, O5_HEADING_RE, ORDER_DESCRIPTION_RE,
    ORDER_ITEM_RE, ORDER_TITLE_RE,
};
use super::scan::find_block;
use super::Importer;
use crate::tree::ComponentKind;
use regex::Regex;
use tracing::debug;

/// Which decorative template a div parameter string belongs to.
fn classify(params: &str, page_css: bool) -> Option<ComponentKind> {
    let lower = params.to_ascii_lowercase();
    if lower.contains("ffc107") || lower.contains("rgb(255, 193, 7)") {
        Some(ComponentKind::RaisaNotice)
    } else if lower.contains("kaktuskontainer") && lower.contains("600px") {
        Some(ComponentKind::O5Command)
    } else if lower.contains("the-great-hippo") && lower.contains("solid 2px black") {
        Some(ComponentKind::ClassWarning)
    } else if lower.contains("email-example") {
        Some(ComponentKind::EmailExample)
    } else if lower.contains("orderwrapper") {
        Some(ComponentKind::FoundationBackground)
    } else if page_css && (lower.contains(r#"class="page""#) || lower.contains("class='page'")) {
        Some(ComponentKind::PageNote)
    } else {
        None
    }
}

impl Importer {
    pub(super) fn prescan_divs(&mut self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        let mut pos = 0;

        while let Some(block) = find_block(text, pos, &DIV_OPEN_RE, &DIV_CLOSE_RE) {
            let Some(kind) = classify(block.params(text), self.signatures.page_css) else {
                pos = block.open_end;
                continue;
            };
            debug!(kind = %kind, depth = self.depth, "recognized decorative div");

            let inner = block.inner(text);
            let payload = match kind {
                ComponentKind::O5Command => self.o5_command(inner),
                ComponentKind::EmailExample => self.email_example(inner),
                ComponentKind::FoundationBackground => self.foundation_background(inner),
                _ => component(kind, &[], &self.nested(inner)),
            };

            let (start, end) = if kind == ComponentKind::ClassWarning {
                widen_centering(text, block.start, block.end, last)
            } else {
                (block.start, block.end)
            };
            out.push_str(&text[last..start]);
            let token = self.block(&text[start..end], payload);
            out.push_str(&token);
            last = end;
            pos = end;
        }
        out.push_str(&text[last..]);
        out
    }

    fn o5_command(&self, inner: &str) -> String {
        let source = self.table.unwind(inner);
        let (center, after) = match source.find("[[=]]") {
            Some(open) => {
                let rest = &source[open + "[[=]]".len()..];
                match rest.find("[[/=]]") {
                    Some(close) => (&rest[..close], &rest[close + "[[/=]]".len()..]),
                    None => (rest, ""),
                }
            }
            None => ("", source.as_str()),
        };

        let mut heading = String::new();
        let mut body = Vec::new();
        for line in center.lines().map(str::trim) {
            if line.is_empty() || line == "@@@@" || line == "@@ @@" {
                continue;
            }
            match O5_HEADING_RE.captures(line) {
                Some(caps) if heading.is_empty() => heading = caps[1].trim().to_string(),
                _ => body.push(line),
            }
        }
        let footer = O5_FOOTER_RE
            .captures(after)
            .map(|caps| caps[1].trim().to_string())
            .unwrap_or_default();

        let heading = decode_entities(&heading);
        let body = decode_entities(&body.join("\n"));
        let footer = decode_entities(&footer);
        component(
            ComponentKind::O5Command,
            &[("heading", heading.as_str()), ("body", body.as_str()), ("footer", footer.as_str())],
            "",
        )
    }

    fn email_example(&self, inner: &str) -> String {
        let source = decode_entities(&self.table.unwind(inner));
        let mut fields: Vec<(&str, String)> = Vec::new();

        if let Some(caps) = EMAIL_COLLAPSIBLE_RE.captures(&source) {
            fields.push(("show-title", caps[1].trim().to_string()));
            fields.push(("hide-title", caps[2].trim().to_string()));
        }
        collect_numbered(&mut fields, &EMAIL_TO_RE, &source, ["to-1", "to-2"]);
        collect_numbered(&mut fields, &EMAIL_FROM_RE, &source, ["from-1", "from-2"]);
        collect_numbered(&mut fields, &EMAIL_SUBJECT_RE, &source, ["subject-1", "subject-2"]);
        for (caps, name) in EMAIL_BODY_RE.captures_iter(&source).zip(["body-1", "body-2"]) {
            fields.push((name, caps[1].trim().to_string()));
        }

        let borrowed: Vec<(&str, &str)> = fields
            .iter()
            .map(|(name, value)| (*name, value.as_str()))
            .collect();
        component(ComponentKind::EmailExample, &borrowed, "")
    }

    fn foundation_background(&self, inner: &str) -> String {
        let source = decode_entities(&self.table.unwind(inner));
        let mut fields: Vec<(&str, String)> = Vec::new();

        if let Some(caps) = ORDER_TITLE_RE.captures(&source) {
            fields.push(("title", caps[1].trim().to_string()));
        }
        if let Some(caps) = ORDER_DESCRIPTION_RE.captures(&source) {
            fields.push(("subtitle", caps[1].trim().to_string()));
            fields.push(("description", caps[2].trim().to_string()));
        }
        if let Some(caps) = ORDER_ITEM_RE.captures(&source) {
            fields.push(("item-number", caps[1].trim().to_string()));
        }

        let borrowed: Vec<(&str, &str)> = fields
            .iter()
            .map(|(name, value)| (*name, value.as_str()))
            .collect();
        component(ComponentKind::FoundationBackground, &borrowed, "")
    }
}

/// First and second matches of `re` fill the two numbered fields.
fn collect_numbered<'n>(
    fields: &mut Vec<(&'n str, String)>,
    re: &Regex,
    source: &str,
    names: [&'n str; 2],
) {
    for (caps, name) in re.captures_iter(source).zip(names) {
        let value = caps[1].trim().trim_matches('*').trim().to_string();
        fields.push((name, value));
    }
}

/// Extends a span over a directly surrounding `[[=]] … [[/=]]` pair.
fn widen_centering(text: &str, start: usize, end: usize, floor: usize) -> (usize, usize) {
    let before = text[floor..start].trim_end();
    let after = text[end..].trim_start();
    match (before.strip_suffix("[[=]]"), after.strip_prefix("[[/=]]")) {
        (Some(head), Some(tail)) => (floor + head.len(), text.len() - tail.len()),
        _ => (start, end),
    }
}
