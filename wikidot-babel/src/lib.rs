//! Conversion between Wikidot markup and an annotated document tree
//!
//!     This crate turns SCP-wiki style Wikidot markup into a tree an editor can work on, and
//!     turns such a tree back into markup. Components (classification banners, tab views,
//!     collapsibles, license blocks, footnotes, themed containers, ...) are first class nodes
//!     with a fixed field set, so an edit in the visual surface survives the way back.
//!
//!     This is a pure lib: it powers the wikidot cli but is shell agnostic. No printing, no env
//!     vars, no filesystem access. Every operation gets its [`RenderingState`] as an argument.
//!
//! Architecture
//!
//!     .
//!     ├── tree            # AnnotatedNode, component kinds and their fields, RenderingState
//!     ├── export          # tree → markup (recursive pretty-printer)
//!     ├── import          # markup → editor fragment (layered text rewriter)
//!     ├── dom.rs          # editor fragment ⇄ tree, via html5ever
//!     ├── metadata.rs     # page-level settings scanned from raw markup
//!     ├── error.rs
//!     ├── format.rs       # Format trait
//!     ├── registry.rs     # FormatRegistry for discovery and selection
//!     └── formats         # wikidot, html, json, treeviz
//!
//!     The importer does not build the tree directly. It rewrites markup into an HTML fragment
//!     where each component is an element with `class="scp-component"`, a `data-type` and one
//!     `data-<field>` attribute per field. That fragment is what an editor consumes; `dom` parses
//!     it into a tree when a tree is wanted.
//!
//! Core Algorithms
//!
//!     The importer is the hard part. It runs seven ordered stages; each stage recognizes one
//!     class of construct and swaps every match for a placeholder token that is restored at the
//!     end. Constructs that nest arbitrarily (divs, advanced tables, the login widget) are found
//!     with one balanced-delimiter scanner ([`import::scan_balanced`]). Bodies that hold
//!     arbitrary markup are imported by a fresh importer with its own placeholder table, so no
//!     token ever leaks across scopes. See ./import/mod.rs.
//!
//!     The exporter dispatches by node kind. Component kinds map to render functions through
//!     an exhaustive match, so adding a kind without a renderer does not compile.
//!
//! Failure
//!
//!     [`export`], [`import`] and [`scan`] are total: malformed markup degrades to literal text
//!     and missing attributes read as empty strings. Only the format layer returns
//!     [`FormatError`].
//!
//! Testing
//!
//!     tests
//!     └── <area>
//!         └── <testname>.rs
//!
//!     Note that rust does not by default discover tests in subdirectories, so they are
//!     included from tests/lib.rs.

pub mod dom;
pub mod error;
pub mod export;
pub mod format;
pub mod formats;
pub mod import;
pub mod metadata;
pub mod registry;
pub mod tree;

pub use dom::{import_document, parse_fragment, render_fragment};
pub use error::FormatError;
pub use export::export;
pub use format::Format;
pub use import::import;
pub use metadata::{scan, PageMetadata, RateAlign, RateSettings};
pub use registry::FormatRegistry;
pub use tree::{AnnotatedNode, City, ComponentKind, NodeKind, RenderingState, Tag, Theme, ThemeKind};
