//! Format implementations
//!
//! Each format converts between a text representation and an annotated tree.

pub mod html;
pub mod icons;
pub mod json;
pub mod treeviz;
pub mod wikidot;

pub use html::HtmlFormat;
pub use json::JsonFormat;
pub use treeviz::TreevizFormat;
pub use wikidot::WikidotFormat;
