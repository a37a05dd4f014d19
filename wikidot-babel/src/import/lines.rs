//! Stage 4 (lists, `||` tables, quotes) and stage 6 (paragraphs).
//!
//! Both run after every block construct is a placeholder token. Tokens
//! contain no `*`, `#`, `|` or `>`, so they cannot be mistaken for line
//! markup here.

use super::patterns::{BLOCK_LINE_RE, LIST_ITEM_RE};
use super::placeholder::{TOKEN_CLOSE, TOKEN_OPEN};
use super::Importer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Bulleted,
    Numbered,
}

impl ListKind {
    fn open(self) -> &'static str {
        match self {
            ListKind::Bulleted => "<ul><li>",
            ListKind::Numbered => "<ol><li>",
        }
    }

    fn close(self) -> &'static str {
        match self {
            ListKind::Bulleted => "</li></ul>",
            ListKind::Numbered => "</li></ol>",
        }
    }
}

#[derive(Debug)]
struct ListItem<'a> {
    kind: ListKind,
    depth: usize,
    content: &'a str,
}

impl<'a> ListItem<'a> {
    fn parse(line: &'a str) -> Option<ListItem<'a>> {
        let caps = LIST_ITEM_RE.captures(line)?;
        let markers = caps.get(2)?.as_str();
        let kind = if markers.ends_with('#') {
            ListKind::Numbered
        } else {
            ListKind::Bulleted
        };
        Some(ListItem {
            kind,
            depth: caps.get(1)?.as_str().len() + markers.len(),
            content: caps.get(3)?.as_str().trim(),
        })
    }
}

fn is_table_row(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 4 && trimmed.starts_with("||") && trimmed.ends_with("||")
}

fn is_quote(line: &str) -> bool {
    line.starts_with('>')
}

/// One quote level. Lines still starting with `>` after the first marker
/// is stripped open a nested quote.
fn quote_html(lines: &[&str]) -> String {
    let stripped: Vec<&str> = lines
        .iter()
        .map(|l| {
            let rest = &l[1..];
            rest.strip_prefix(' ').unwrap_or(rest).trim_end()
        })
        .collect();
    let mut html = String::from("<blockquote>");
    let mut after_text = false;
    let mut i = 0;
    while i < stripped.len() {
        if is_quote(stripped[i]) {
            let end = stripped[i..]
                .iter()
                .position(|l| !is_quote(l))
                .map_or(stripped.len(), |offset| i + offset);
            html.push_str(&quote_html(&stripped[i..end]));
            after_text = false;
            i = end;
        } else {
            if after_text {
                html.push_str("<br>");
            }
            html.push_str(stripped[i]);
            after_text = true;
            i += 1;
        }
    }
    html.push_str("</blockquote>");
    html
}

/// Joins list items and table rows continued with a trailing ` _`.
fn join_continuations(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut source = text.split('\n');
    while let Some(line) = source.next() {
        let mut current = line.to_string();
        let is_row = current.trim_start().starts_with("||");
        let is_item = LIST_ITEM_RE.is_match(&current);
        if is_row || is_item {
            while current.trim_end().ends_with(" _") {
                let Some(next) = source.next() else { break };
                let kept = current.trim_end();
                let kept = &kept[..kept.len() - 2];
                current = if is_row {
                    format!("{kept}\n{next}")
                } else {
                    format!("{kept}<br>{}", next.trim())
                };
            }
        }
        lines.push(current);
    }
    lines
}

impl Importer {
    pub(super) fn process_lines(&mut self, text: &str) -> String {
        let lines = join_continuations(text);
        let mut out: Vec<String> = Vec::with_capacity(lines.len());
        let mut i = 0;
        while i < lines.len() {
            let line = &lines[i];
            if ListItem::parse(line).is_some() {
                let (html, next) = list_html(&lines, i);
                out.push(html);
                i = next;
            } else if is_table_row(line) {
                let end = lines[i..]
                    .iter()
                    .position(|l| !is_table_row(l))
                    .map_or(lines.len(), |offset| i + offset);
                out.push(self.plain_table(&lines[i..end]));
                i = end;
            } else if is_quote(line) {
                let end = lines[i..]
                    .iter()
                    .position(|l| !is_quote(l))
                    .map_or(lines.len(), |offset| i + offset);
                let quoted: Vec<&str> = lines[i..end].iter().map(String::as_str).collect();
                out.push(quote_html(&quoted));
                i = end;
            } else {
                out.push(line.clone());
                i += 1;
            }
        }
        out.join("\n")
    }

    fn plain_table(&mut self, rows: &[String]) -> String {
        let mut html = String::from("<table>");
        for row in rows {
            html.push_str(&self.table_row(row));
        }
        html.push_str("</table>");
        self.block(&rows.join("\n"), html)
    }

    /// `||~ head |||| wide ||` → `<tr><th>head</th><td colspan="2">wide</td></tr>`
    fn table_row(&self, line: &str) -> String {
        let body = line.trim();
        let mut rest = body.strip_suffix("||").unwrap_or(body);
        let mut html = String::from("<tr>");
        while rest.starts_with("||") {
            let mut span = 0;
            while rest.starts_with("||") {
                rest = &rest[2..];
                span += 1;
            }
            let end = rest.find("||").unwrap_or(rest.len());
            let raw = rest[..end].replace(" _\n", "\n");
            rest = &rest[end..];

            let raw = raw.trim();
            let (tag, content) = match raw.strip_prefix('~') {
                Some(content) => ("th", content.trim()),
                None => ("td", raw),
            };
            if span > 1 {
                html.push_str(&format!(r#"<{tag} colspan="{span}">"#));
            } else {
                html.push_str(&format!("<{tag}>"));
            }
            html.push_str(&self.nested_inline(content));
            html.push_str(&format!("</{tag}>"));
        }
        html.push_str("</tr>");
        html
    }

    /// Stage 6: groups text lines into paragraphs. Block lines and block
    /// tokens stand on their own.
    pub(super) fn group_paragraphs(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut paragraph: Vec<&str> = Vec::new();

        for line in text.split('\n') {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                flush_paragraph(&mut out, &mut paragraph);
                continue;
            }
            if BLOCK_LINE_RE.is_match(trimmed) {
                flush_paragraph(&mut out, &mut paragraph);
                out.push_str(trimmed);
                continue;
            }
            for (segment, is_token) in self.split_block_tokens(trimmed) {
                if is_token {
                    flush_paragraph(&mut out, &mut paragraph);
                    out.push_str(segment);
                } else if !segment.trim().is_empty() {
                    paragraph.push(segment.trim());
                }
            }
        }
        flush_paragraph(&mut out, &mut paragraph);
        out
    }

    /// Splits a line around block tokens. Inline tokens stay in the text.
    fn split_block_tokens<'t>(&self, line: &'t str) -> Vec<(&'t str, bool)> {
        let mut parts = Vec::new();
        let mut text_start = 0;
        let mut pos = 0;
        while let Some(offset) = line[pos..].find(TOKEN_OPEN) {
            let open = pos + offset;
            let Some(close_offset) = line[open..].find(TOKEN_CLOSE) else {
                break;
            };
            let close = open + close_offset + TOKEN_CLOSE.len_utf8();
            pos = close;
            if !self.table.is_block_token(&line[open..close]) {
                continue;
            }
            if open > text_start {
                parts.push((&line[text_start..open], false));
            }
            parts.push((&line[open..close], true));
            text_start = close;
        }
        if text_start < line.len() {
            parts.push((&line[text_start..], false));
        }
        parts
    }
}

fn flush_paragraph(out: &mut String, paragraph: &mut Vec<&str>) {
    if paragraph.is_empty() {
        return;
    }
    out.push_str("<p>");
    out.push_str(&paragraph.join("<br>"));
    out.push_str("</p>");
    paragraph.clear();
}

/// Builds one list, possibly nested, starting at `lines[start]`. Returns the
/// HTML and the index of the first line after the list.
fn list_html(lines: &[String], start: usize) -> (String, usize) {
    let mut html = String::new();
    let mut stack: Vec<(ListKind, usize)> = Vec::new();
    let mut i = start;

    while i < lines.len() {
        if lines[i].trim().is_empty() {
            // A blank line only continues the list when the next item sits at
            // the same depth with the same marker.
            let next = lines[i..]
                .iter()
                .position(|l| !l.trim().is_empty())
                .map(|offset| i + offset);
            let resumes = next.and_then(|n| {
                let item = ListItem::parse(&lines[n])?;
                (stack.last() == Some(&(item.kind, item.depth))).then_some(n)
            });
            match resumes {
                Some(n) => {
                    html.push_str("<br>");
                    i = n;
                    continue;
                }
                None => break,
            }
        }

        let Some(item) = ListItem::parse(&lines[i]) else {
            break;
        };
        while let Some(&(kind, depth)) = stack.last() {
            if depth <= item.depth {
                break;
            }
            html.push_str(kind.close());
            stack.pop();
        }
        match stack.last() {
            Some(&(kind, depth)) if depth == item.depth && kind == item.kind => {
                html.push_str("</li><li>");
            }
            Some(&(kind, depth)) if depth == item.depth => {
                html.push_str(kind.close());
                stack.pop();
                html.push_str(item.kind.open());
                stack.push((item.kind, item.depth));
            }
            _ => {
                html.push_str(item.kind.open());
                stack.push((item.kind, item.depth));
            }
        }
        html.push_str(item.content);
        i += 1;
    }

    while let Some((kind, _)) = stack.pop() {
        html.push_str(kind.close());
    }
    (html, i)
}
