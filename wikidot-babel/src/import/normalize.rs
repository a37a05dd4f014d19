//! Stage 1: entity and line normalization.

use super::fragment::{component, decode_entities, escape_text};
use super::patterns::{BR_RE, EMPTY_PARAGRAPH_RE};
use super::placeholder::strip_sentinels;
use super::Importer;
use crate::tree::ComponentKind;

impl Importer {
    /// Decodes entities, folds `<br>` forms into newlines, escapes what is
    /// left of user text and registers forced-break lines.
    pub(super) fn normalize(&mut self, markup: &str) -> String {
        let text = decode_entities(markup);
        let text = EMPTY_PARAGRAPH_RE.replace_all(&text, "\n");
        let text = BR_RE.replace_all(&text, "\n");
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        let text = escape_text(&strip_sentinels(&text));

        let mut lines = Vec::new();
        for line in text.split('\n') {
            let trimmed = line.trim();
            if trimmed == "@@@@" || trimmed == "@@ @@" {
                let payload = component(ComponentKind::ForcedBreak, &[("source", trimmed)], "");
                lines.push(self.block(trimmed, payload));
            } else {
                lines.push(line.to_string());
            }
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use crate::import::import;
    use crate::tree::ThemeKind;

    #[test]
    fn forced_breaks_become_components() {
        let html = import("a\n@@ @@\nb", ThemeKind::None);
        assert!(html.contains(r#"data-type="forced-break" data-source="@@ @@""#));
    }

    #[test]
    fn user_angle_brackets_are_escaped() {
        let html = import("1 < 2 &amp; 3", ThemeKind::None);
        assert_eq!(html, "<p>1 &lt; 2 &amp; 3</p>");
    }

    #[test]
    fn br_tags_become_line_breaks() {
        let html = import("a<br/>b", ThemeKind::None);
        assert_eq!(html, "<p>a<br>b</p>");
    }
}
