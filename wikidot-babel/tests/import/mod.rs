//! Markup import tests
//!
//! These check the shape of the tree built from markup: nesting of
//! balanced blocks, recursive bodies and graceful handling of broken input.

mod blocks;
mod components;
mod inline;
