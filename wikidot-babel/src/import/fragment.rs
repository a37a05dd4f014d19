//! Helpers for writing the editor fragment.
//!
//! The importer builds HTML as text. Components are elements carrying
//! `class="scp-component"`, a `data-type` marker and one `data-<field>`
//! attribute per declared field, so the DOM bridge can rebuild the node.

use super::patterns::ENTITY_RE;
use crate::tree::ComponentKind;
use regex::Captures;

/// Escapes a value for use inside a double-quoted attribute.
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escapes the characters that would otherwise start markup in text content.
pub fn escape_text(value: &str) -> String {
    value.replace('&', "&amp;").replace('<', "&lt;")
}

/// Decodes named and numeric character references. Unknown names stay literal.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    ENTITY_RE
        .replace_all(text, |caps: &Captures| match decode_entity(&caps[1]) {
            Some(c) => c.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

fn decode_entity(body: &str) -> Option<char> {
    if let Some(number) = body.strip_prefix('#') {
        let code = match number.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => number.parse().ok()?,
        };
        return char::from_u32(code);
    }
    let c = match body {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "ensp" => '\u{2002}',
        "emsp" => '\u{2003}',
        "thinsp" => '\u{2009}',
        "zwsp" => '\u{200b}',
        "ndash" => '–',
        "mdash" => '—',
        "hellip" => '…',
        "lsquo" => '‘',
        "rsquo" => '’',
        "ldquo" => '“',
        "rdquo" => '”',
        "laquo" => '«',
        "raquo" => '»',
        "middot" => '·',
        "bull" => '•',
        "times" => '×',
        "divide" => '÷',
        "deg" => '°',
        "copy" => '©',
        "reg" => '®',
        "trade" => '™',
        "sect" => '§',
        _ => return None,
    };
    Some(c)
}

/// Renders a component element. Fields not listed in `fields` take their
/// declared default; names outside the kind's field set are ignored.
pub fn component(kind: ComponentKind, fields: &[(&str, &str)], body: &str) -> String {
    let tag = kind.html_tag();
    let mut html = format!(r#"<{tag} class="scp-component" data-type="{}""#, kind.name());
    for (name, default) in kind.fields() {
        let value = fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| *value)
            .unwrap_or(default);
        html.push_str(&format!(r#" data-{name}="{}""#, escape_attr(value)));
    }
    html.push('>');
    html.push_str(body);
    html.push_str(&format!("</{tag}>"));
    html
}

/// Opens a plain element with an optional style attribute.
pub fn styled_open(tag: &str, style: &str) -> String {
    if style.is_empty() {
        format!("<{tag}>")
    } else {
        format!(r#"<{tag} style="{}">"#, escape_attr(style))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_named_and_numeric_references() {
        assert_eq!(decode_entities("a &amp; b &#65;&#x42; &nbsp;"), "a & b AB \u{a0}");
        assert_eq!(decode_entities("&bogus; stays"), "&bogus; stays");
    }

    #[test]
    fn component_fills_defaults_and_escapes() {
        let html = component(ComponentKind::UserTag, &[("name", "a\"b")], "");
        assert_eq!(
            html,
            r#"<span class="scp-component" data-type="user-tag" data-name="a&quot;b" data-avatar="true"></span>"#
        );
    }

    #[test]
    fn block_components_use_div() {
        let html = component(ComponentKind::Toc, &[], "");
        assert_eq!(html, r#"<div class="scp-component" data-type="toc"></div>"#);
    }
}
