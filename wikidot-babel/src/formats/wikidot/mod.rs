//! Wikidot markup format
//!
//! Parsing runs the importer and reads the resulting fragment into a tree;
//! serialization runs the exporter. The theme of the rendering state selects
//! the importer's div mapping, the whole state drives the exporter.

use crate::dom::import_document;
use crate::error::FormatError;
use crate::export::export;
use crate::format::Format;
use crate::tree::{AnnotatedNode, RenderingState};

pub struct WikidotFormat;

impl Format for WikidotFormat {
    fn name(&self) -> &str {
        "wikidot"
    }

    fn description(&self) -> &str {
        "Wikidot wiki markup"
    }

    fn file_extensions(&self) -> &[&str] {
        &["wikidot", "wd", "ftml"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str, state: &RenderingState) -> Result<AnnotatedNode, FormatError> {
        import_document(source, state.theme.kind())
    }

    fn serialize(&self, doc: &AnnotatedNode, state: &RenderingState) -> Result<String, FormatError> {
        Ok(export(doc, state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Tag;

    #[test]
    fn markup_survives_parse_and_serialize() {
        let state = RenderingState::default();
        let tree = WikidotFormat.parse("++ Title\n\ntext", &state).unwrap();
        assert_eq!(tree.children[0].tag(), Some(&Tag::Heading(2)));
        assert_eq!(WikidotFormat.serialize(&tree, &state).unwrap(), "++ Title\n\ntext\n");
    }
}
