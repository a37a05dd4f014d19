//! Markup export tests
//!
//! Rendering state switches, component business rules and document
//! assembly, exercised through the public `export` entry point.

mod components;
mod state;
