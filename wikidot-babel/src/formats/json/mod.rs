//! JSON dump of the annotated tree
//!
//! The tree is written with `serde_json` exactly as it is held in memory, so
//! a dump can be edited by tools and read back without loss. Component nodes
//! are normalized on the way in so hand-edited files still carry exactly
//! their field set.

use crate::error::FormatError;
use crate::format::Format;
use crate::tree::{AnnotatedNode, RenderingState};

pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Annotated tree as JSON"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str, _state: &RenderingState) -> Result<AnnotatedNode, FormatError> {
        let mut root: AnnotatedNode = serde_json::from_str(source)?;
        normalize_tree(&mut root);
        Ok(root)
    }

    fn serialize(&self, doc: &AnnotatedNode, _state: &RenderingState) -> Result<String, FormatError> {
        serde_json::to_string_pretty(doc).map_err(|e| FormatError::SerializationError(e.to_string()))
    }
}

fn normalize_tree(node: &mut AnnotatedNode) {
    node.normalize();
    for child in &mut node.children {
        normalize_tree(child);
    }
}
