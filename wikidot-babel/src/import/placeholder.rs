//! Placeholder tokens standing in for finished fragments.
//!
//! Each import scope owns one table. Tokens are built from private-use
//! sentinels that are stripped from incoming markup, so they can never
//! collide with user text. Restoration walks the table newest-first: an
//! entry's payload or source may embed tokens registered before it, and
//! those are resolved by the later iterations.

use tracing::trace;

pub const TOKEN_OPEN: char = '\u{E000}';
pub const TOKEN_CLOSE: char = '\u{E001}';

#[derive(Debug, Clone)]
struct Entry {
    token: String,
    /// Markup the token replaced.
    source: String,
    /// Fragment HTML substituted on restore.
    payload: String,
    block: bool,
}

#[derive(Debug, Default)]
pub struct PlaceholderTable {
    entries: Vec<Entry>,
}

impl PlaceholderTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a block-level fragment and returns its token.
    pub fn register_block(&mut self, source: &str, payload: String) -> String {
        self.register(source, payload, true)
    }

    /// Registers an inline fragment and returns its token.
    pub fn register_inline(&mut self, source: &str, payload: String) -> String {
        self.register(source, payload, false)
    }

    fn register(&mut self, source: &str, payload: String, block: bool) -> String {
        let index = self.entries.len();
        let token = format!("{TOKEN_OPEN}WD{index}{TOKEN_CLOSE}");
        trace!(index, block, "registered placeholder");
        self.entries.push(Entry {
            token: token.clone(),
            source: source.to_string(),
            payload,
            block,
        });
        token
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn index_of(&self, token: &str) -> Option<usize> {
        let inner = token
            .strip_prefix(TOKEN_OPEN)?
            .strip_suffix(TOKEN_CLOSE)?
            .strip_prefix("WD")?;
        let index: usize = inner.parse().ok()?;
        (index < self.entries.len()).then_some(index)
    }

    /// True when `text` is exactly one token of a block entry.
    pub fn is_block_token(&self, text: &str) -> bool {
        self.index_of(text)
            .map(|index| self.entries[index].block)
            .unwrap_or(false)
    }

    /// Puts the original markup back in place of every token.
    pub fn unwind(&self, text: &str) -> String {
        if !text.contains(TOKEN_OPEN) {
            return text.to_string();
        }
        let mut out = text.to_string();
        for entry in self.entries.iter().rev() {
            if out.contains(&entry.token) {
                out = out.replace(&entry.token, &entry.source);
            }
        }
        out
    }

    /// Substitutes every token with its fragment payload.
    pub fn restore(&self, text: &str) -> String {
        let mut out = text.to_string();
        for entry in self.entries.iter().rev() {
            if out.contains(&entry.token) {
                out = out.replace(&entry.token, &entry.payload);
            }
        }
        out
    }
}

/// Removes sentinel characters so user input cannot forge a token.
pub fn strip_sentinels(text: &str) -> String {
    text.chars()
        .filter(|c| *c != TOKEN_OPEN && *c != TOKEN_CLOSE)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_unique_and_recognized() {
        let mut table = PlaceholderTable::new();
        let a = table.register_block("[[toc]]", "<div>toc</div>".into());
        let b = table.register_inline("[[user x]]", "<span>x</span>".into());
        assert_ne!(a, b);
        assert!(table.is_block_token(&a));
        assert!(!table.is_block_token(&b));
        assert!(!table.is_block_token("WD0"));
    }

    #[test]
    fn restore_resolves_nested_tokens() {
        let mut table = PlaceholderTable::new();
        let inner = table.register_inline("@@", "<i>in</i>".into());
        let outer = table.register_block("[[x]]", format!("<b>{inner}</b>"));
        assert_eq!(table.restore(&format!("a{outer}z")), "a<b><i>in</i></b>z");
    }

    #[test]
    fn unwind_returns_source_markup() {
        let mut table = PlaceholderTable::new();
        let inner = table.register_block("@@@@", "<p></p>".into());
        let outer = table.register_block(&format!("[[div]]\n{inner}\n[[/div]]"), "<div></div>".into());
        assert_eq!(table.unwind(&outer), "[[div]]\n@@@@\n[[/div]]");
    }

    #[test]
    fn sentinels_are_stripped() {
        assert_eq!(strip_sentinels("a\u{E000}WD0\u{E001}b"), "aWD0b");
    }
}
