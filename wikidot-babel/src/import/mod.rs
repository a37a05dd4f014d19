//! Wikidot markup → editor fragment.
//!
//! The importer is a layered text rewriter. Every stage recognizes one class
//! of construct, swaps the matched span for a placeholder token and records
//! the finished fragment for that span. The stages run in a fixed order:
//!
//!     1. normalize     entities, `<br>` forms, forced breaks
//!     2. prescan       decorative divs recognized by style signature
//!     3. blocks        includes, tab views, tables, collapsibles, divs, modules
//!     4. lines         lists, `||` tables, `>` quotes
//!     5. inline        headings, rules, links, delimiter pairs, colors
//!     6. paragraphs    remaining text lines grouped into `<p>`
//!     7. restore       tokens replaced by their fragments, newest first
//!
//! Bodies that may hold arbitrary markup (tabs, collapsibles, cells, divs)
//! are imported by a fresh [`Importer`] with its own placeholder table. Any
//! token of the enclosing scope inside such a body is unwound to its source
//! first, so tokens never cross a scope boundary and every nested call
//! returns fully resolved HTML.
//!
//! Malformed regions are never an error: whatever a stage cannot recognize
//! is passed on and ends up as literal text.

mod containers;
mod divs;
pub mod fragment;
mod includes;
mod inline;
mod lines;
mod normalize;
pub(crate) mod patterns;
pub mod placeholder;
pub mod scan;

use crate::tree::ThemeKind;
use placeholder::PlaceholderTable;
use regex::{Captures, Regex};
use tracing::debug;

pub use scan::{find_block, scan_balanced, Balanced, Block};

const PAGE_CSS_SIGNATURE: &str =
    "linear-gradient(to top ,rgb(202, 219, 228) 0%, rgb(231, 233, 220) 8%)";
const FAKEPROT_CSS_SIGNATURE: &str = ".fakeprot .mailform-box .buttons";

/// Imports markup and returns the editor fragment.
///
/// Empty or whitespace-only input yields an empty fragment.
pub fn import(markup: &str, theme: ThemeKind) -> String {
    if markup.trim().is_empty() {
        return String::new();
    }
    let theme = effective_theme(markup, theme);
    let signatures = Signatures::detect(markup);
    debug!(?theme, bytes = markup.len(), "importing markup");
    Importer::new(theme, 0, signatures).run(markup)
}

/// Pages that include the basalt theme get basalt div mapping even when the
/// caller did not select a theme.
fn effective_theme(markup: &str, theme: ThemeKind) -> ThemeKind {
    if theme != ThemeKind::None {
        return theme;
    }
    let lower = markup.to_lowercase();
    if lower.contains(":theme:basalt")
        || lower.contains("theme='basalt'")
        || lower.contains("theme=\"basalt\"")
    {
        ThemeKind::Basalt
    } else {
        ThemeKind::None
    }
}

/// Page-wide facts that gate recognizers in every scope.
#[derive(Debug, Clone, Copy, Default)]
struct Signatures {
    page_css: bool,
    fakeprot_css: bool,
}

impl Signatures {
    fn detect(markup: &str) -> Self {
        Signatures {
            page_css: markup.contains(PAGE_CSS_SIGNATURE),
            fakeprot_css: markup.contains(FAKEPROT_CSS_SIGNATURE),
        }
    }
}

/// One import scope.
pub struct Importer {
    theme: ThemeKind,
    depth: usize,
    table: PlaceholderTable,
    /// Finished license blocks, appended after the body.
    licenses: Vec<String>,
    /// Rate module fragment, placed before the body.
    rate: Option<String>,
    signatures: Signatures,
}

impl Importer {
    fn new(theme: ThemeKind, depth: usize, signatures: Signatures) -> Self {
        Importer {
            theme,
            depth,
            table: PlaceholderTable::new(),
            licenses: Vec::new(),
            rate: None,
            signatures,
        }
    }

    fn run(mut self, markup: &str) -> String {
        debug!(depth = self.depth, "import scope start");
        let text = self.normalize(markup);
        let text = self.prescan_divs(&text);
        let text = self.replace_blocks(&text);
        let text = self.process_lines(&text);
        let text = self.format_inline(&text);
        let text = self.group_paragraphs(&text);

        let mut html = String::new();
        if let Some(rate) = self.rate.take() {
            html.push_str(&rate);
        }
        html.push_str(&self.table.restore(&text));
        for license in &self.licenses {
            html.push_str(license);
        }
        debug!(
            depth = self.depth,
            placeholders = self.table.len(),
            "import scope done"
        );
        html
    }

    /// Imports a body in a fresh scope.
    fn nested(&self, body: &str) -> String {
        let source = self.table.unwind(body);
        if source.trim().is_empty() {
            return String::new();
        }
        Importer::new(self.theme, self.depth + 1, self.signatures).run(&source)
    }

    /// Like [`Importer::nested`], without a single wrapping paragraph.
    fn nested_inline(&self, body: &str) -> String {
        let html = self.nested(body);
        strip_lone_paragraph(&html).to_string()
    }

    /// Plain field value: tokens unwound, entities decoded, trimmed.
    fn field_text(&self, raw: &str) -> String {
        fragment::decode_entities(&self.table.unwind(raw))
            .trim()
            .to_string()
    }

    fn block(&mut self, source: &str, payload: String) -> String {
        self.table.register_block(source, payload)
    }

    fn inline(&mut self, source: &str, payload: String) -> String {
        self.table.register_inline(source, payload)
    }

    /// Rewrites every match of `re`. The callback returns `None` to leave a
    /// match untouched.
    fn rewrite(
        &mut self,
        text: &str,
        re: &Regex,
        mut replace: impl FnMut(&mut Self, &Captures) -> Option<String>,
    ) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for caps in re.captures_iter(text) {
            let Some(whole) = caps.get(0) else { continue };
            if let Some(replacement) = replace(self, &caps) {
                out.push_str(&text[last..whole.start()]);
                out.push_str(&replacement);
                last = whole.end();
            }
        }
        out.push_str(&text[last..]);
        out
    }
}

fn strip_lone_paragraph(html: &str) -> &str {
    let trimmed = html.trim();
    match trimmed
        .strip_prefix("<p>")
        .and_then(|rest| rest.strip_suffix("</p>"))
    {
        Some(inner) if !inner.contains("<p") && !inner.contains("</p>") => inner,
        _ => trimmed,
    }
}
