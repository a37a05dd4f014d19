//! Markup → tree → markup tests
//!
//! Trees built from plain text, headings, lists and bold/italic runs must
//! survive an export followed by an import.

mod plain_text;
mod scenarios;
