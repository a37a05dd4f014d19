//! Stage 5: headings, rules, links and inline delimiter pairs.

use super::fragment::{component, decode_entities, escape_attr};
use super::patterns::{
    COLOR_RE, DASH_ESCAPE_RE, HEADING_RE, HR_RE, MONOSPACE_RE, SINGLE_LINK_RE, TRIPLE_LINK_RE,
};
use super::Importer;
use crate::tree::ComponentKind;
use std::collections::HashMap;

/// Link texts that stand for redacted content rather than a real link.
const REDACTION_MARKERS: [&str; 10] = [
    "已编辑",
    "数据删除",
    "无法辨认",
    "数据已删除",
    "咒骂声",
    "尖叫声",
    "DATA EXPUNGED",
    "REDACTED",
    "DATA LOST",
    "数据丢失",
];

/// Delimiter pairs in the order they are resolved.
const DELIMITERS: [(&str, &str); 6] = [
    ("**", "b"),
    ("//", "i"),
    ("^^", "sup"),
    (",,", "sub"),
    ("__", "u"),
    ("--", "s"),
];

fn is_redacted(text: &str) -> bool {
    let upper = text.to_uppercase();
    REDACTION_MARKERS.iter().any(|marker| upper.contains(marker))
}

fn link(href: &str, text: &str, new_window: bool) -> String {
    let href = escape_attr(&decode_entities(href));
    if new_window {
        format!(r#"<a href="{href}" target="_blank">{text}</a>"#)
    } else {
        format!(r#"<a href="{href}">{text}</a>"#)
    }
}

impl Importer {
    pub(super) fn format_inline(&mut self, text: &str) -> String {
        let text = self.rewrite(text, &DASH_ESCAPE_RE, |this, caps| {
            let count = caps[1].len().to_string();
            let payload = component(ComponentKind::DashEscape, &[("count", count.as_str())], "");
            Some(this.inline(&caps[0], payload))
        });
        let text = HEADING_RE
            .replace_all(&text, |caps: &regex::Captures| {
                let level = caps[1].len();
                format!("<h{level}>{}</h{level}>", &caps[2])
            })
            .into_owned();
        let text = self.rewrite(&text, &HR_RE, |this, caps| {
            let payload = component(ComponentKind::HorizontalRule, &[], "");
            Some(this.block(&caps[0], payload))
        });
        let text = self.links(&text);
        let text = MONOSPACE_RE
            .replace_all(&text, r#"<span style="font-family: monospace;">$1</span>"#)
            .into_owned();
        let text = COLOR_RE
            .replace_all(&text, |caps: &regex::Captures| {
                format!(
                    r#"<span style="color: {};">{}</span>"#,
                    escape_attr(&caps[1]),
                    &caps[2]
                )
            })
            .into_owned();

        text.split('\n')
            .map(|line| {
                DELIMITERS
                    .iter()
                    .fold(line.to_string(), |line, (delimiter, tag)| {
                        pair_delimiters(&line, delimiter, tag)
                    })
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn links(&mut self, text: &str) -> String {
        let text = TRIPLE_LINK_RE
            .replace_all(text, |caps: &regex::Captures| {
                let target = caps[1].trim();
                let label = caps.get(2).map(|m| m.as_str().trim()).unwrap_or("");
                let label = if label.is_empty() { target } else { label };
                if is_redacted(label) {
                    return caps[0].to_string();
                }
                link(target, label, false)
            })
            .into_owned();

        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for caps in SINGLE_LINK_RE.captures_iter(&text) {
            let Some(whole) = caps.get(0) else { continue };
            if text[..whole.start()].ends_with('[') || is_redacted(&caps[3]) {
                continue;
            }
            out.push_str(&text[last..whole.start()]);
            out.push_str(&link(&caps[2], caps[3].trim(), !caps[1].is_empty()));
            last = whole.end();
        }
        out.push_str(&text[last..]);
        out
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    pos: usize,
    /// Element depth and frame id; only candidates with equal keys pair.
    key: (usize, usize),
    can_open: bool,
    can_close: bool,
}

fn is_void(tag: &str) -> bool {
    matches!(tag, "br" | "hr" | "img" | "wbr")
}

/// Replaces matching `delimiter` pairs on one line with `<tag>`/`</tag>`.
///
/// Delimiters inside HTML tags are ignored, and a pair only matches when
/// both halves sit in the same element. An opener must be followed by a
/// non-space character and a closer preceded by one. `//` right after `:`
/// is a URL scheme separator, not italics.
pub(crate) fn pair_delimiters(line: &str, delimiter: &str, tag: &str) -> String {
    if !line.contains(delimiter) {
        return line.to_string();
    }
    let bytes = line.as_bytes();
    let mut candidates = Vec::new();
    let mut depth = 0usize;
    let mut frames = vec![0usize];
    let mut next_frame = 1usize;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'<' {
            let Some(close) = line[i..].find('>') else {
                break;
            };
            let inner = &line[i + 1..i + close];
            if let Some(name) = inner.strip_prefix('/') {
                if !is_void(name.trim()) {
                    depth = depth.saturating_sub(1);
                }
            } else {
                let name = inner
                    .split(|c: char| c.is_whitespace() || c == '/')
                    .next()
                    .unwrap_or("");
                if !is_void(name) && !inner.ends_with('/') {
                    depth += 1;
                    if frames.len() <= depth {
                        frames.resize(depth + 1, 0);
                    }
                    frames[depth] = next_frame;
                    next_frame += 1;
                }
            }
            i += close + 1;
            continue;
        }
        if line[i..].starts_with(delimiter) {
            let before = line[..i].chars().next_back();
            let after = line[i + delimiter.len()..].chars().next();
            let scheme = delimiter == "//" && before == Some(':');
            candidates.push(Candidate {
                pos: i,
                key: (depth, frames[depth]),
                can_open: !scheme && after.is_some_and(|c| !c.is_whitespace()),
                can_close: !scheme && before.is_some_and(|c| !c.is_whitespace()),
            });
            i += delimiter.len();
            continue;
        }
        i += line[i..].chars().next().map_or(1, char::len_utf8);
    }

    let mut pending: HashMap<(usize, usize), usize> = HashMap::new();
    let mut replacements: Vec<(usize, bool)> = Vec::new();
    for candidate in &candidates {
        let open = pending.get(&candidate.key).copied();
        match open {
            Some(start) if candidate.can_close && candidate.pos > start + delimiter.len() => {
                pending.remove(&candidate.key);
                replacements.push((start, true));
                replacements.push((candidate.pos, false));
            }
            _ if candidate.can_open => {
                pending.insert(candidate.key, candidate.pos);
            }
            _ => {}
        }
    }
    if replacements.is_empty() {
        return line.to_string();
    }
    replacements.sort_unstable();

    let mut out = String::with_capacity(line.len() + replacements.len() * 4);
    let mut last = 0;
    for (pos, opening) in replacements {
        out.push_str(&line[last..pos]);
        if opening {
            out.push_str(&format!("<{tag}>"));
        } else {
            out.push_str(&format!("</{tag}>"));
        }
        last = pos + delimiter.len();
    }
    out.push_str(&line[last..]);
    out
}
