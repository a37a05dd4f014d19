//! Annotated document tree shared by the exporter and the importer.
//!
//! A tree is made of [`AnnotatedNode`]s: text, generic elements (paragraphs,
//! headings, lists, tables, ...) and components (banners, tab views, license
//! blocks, ...). The importer produces an editor fragment that the
//! [`crate::dom`] module turns into such a tree; the exporter walks it back
//! into markup. [`RenderingState`] carries the global toggles both sides need.

pub mod component;
pub mod nodes;
pub mod state;

pub use component::ComponentKind;
pub use nodes::{AnnotatedNode, NodeKind, Tag};
pub use state::{City, RenderingState, Theme, ThemeKind};
