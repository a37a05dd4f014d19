//! Balanced delimiter scanning.
//!
//! Wikidot block tags such as `[[div]]`, `[[table]]` and `[[collapsible]]`
//! nest arbitrarily, which a single regex cannot express. [`scan_balanced`]
//! counts opening and closing tags while walking forward; it never revisits
//! text behind the current position, so one scan is linear in the length of
//! the region it covers.

use regex::Regex;
use std::ops::Range;

/// Result of a successful balanced scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Balanced {
    /// Span between the opening tag and its matching close.
    pub inner: Range<usize>,
    /// Offset just past the matching closing tag.
    pub end: usize,
}

/// Finds the close matching an opening tag that ends at `start`.
///
/// Returns `None` when the text runs out before the depth returns to zero.
pub fn scan_balanced(text: &str, open: &Regex, close: &Regex, start: usize) -> Option<Balanced> {
    let mut depth = 1usize;
    let mut pos = start;
    let mut next_open = open.find_at(text, pos);
    let mut next_close = close.find_at(text, pos);

    loop {
        let close_match = next_close?;
        match next_open {
            Some(open_match) if open_match.start() < close_match.start() => {
                depth += 1;
                pos = open_match.end();
                next_open = open.find_at(text, pos);
            }
            _ => {
                depth -= 1;
                pos = close_match.end();
                if depth == 0 {
                    return Some(Balanced {
                        inner: start..close_match.start(),
                        end: pos,
                    });
                }
                next_close = close.find_at(text, pos);
                if matches!(next_open, Some(m) if m.start() < pos) {
                    next_open = open.find_at(text, pos);
                }
            }
        }
    }
}

/// A complete `open … close` region located by [`find_block`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub start: usize,
    pub open_end: usize,
    /// Capture group 1 of the opening pattern, usually the tag parameters.
    pub params: Range<usize>,
    pub inner: Range<usize>,
    pub end: usize,
}

impl Block {
    pub fn params<'t>(&self, text: &'t str) -> &'t str {
        text[self.params.clone()].trim()
    }

    pub fn inner<'t>(&self, text: &'t str) -> &'t str {
        &text[self.inner.clone()]
    }

    pub fn source<'t>(&self, text: &'t str) -> &'t str {
        &text[self.start..self.end]
    }
}

/// Finds the first balanced region whose opening tag starts at or after
/// `from`. Unbalanced openings are skipped and stay literal.
pub fn find_block(text: &str, from: usize, open: &Regex, close: &Regex) -> Option<Block> {
    let mut pos = from;
    while let Some(caps) = open.captures_at(text, pos) {
        let whole = caps.get(0)?;
        let params = caps
            .get(1)
            .map(|m| m.range())
            .unwrap_or(whole.end()..whole.end());
        if let Some(balanced) = scan_balanced(text, open, close, whole.end()) {
            return Some(Block {
                start: whole.start(),
                open_end: whole.end(),
                params,
                inner: balanced.inner,
                end: balanced.end,
            });
        }
        pos = whole.end();
    }
    None
}
