//! Format registry tests
//!
//! Moving one tree between the registered formats.

mod registry;
