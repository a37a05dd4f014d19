//! Format trait definition
//!
//! Every format converts between its text representation and an
//! [`AnnotatedNode`] tree. The [`RenderingState`] is passed explicitly to both
//! directions; formats must not keep settings of their own between calls.

use crate::error::FormatError;
use crate::tree::{AnnotatedNode, RenderingState};
use std::collections::HashMap;

/// A document format.
///
/// ```ignore
/// struct Upper;
///
/// impl Format for Upper {
///     fn name(&self) -> &str {
///         "upper"
///     }
///
///     fn supports_serialization(&self) -> bool {
///         true
///     }
///
///     fn serialize(&self, doc: &AnnotatedNode, _: &RenderingState) -> Result<String, FormatError> {
///         Ok(doc.text_content().to_uppercase())
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "wikidot", "html")
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    /// File extensions without the leading dot, used to detect the format
    /// from a filename.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    fn supports_parsing(&self) -> bool {
        false
    }

    fn supports_serialization(&self) -> bool {
        false
    }

    /// Parses source text into a tree rooted at a `Root` element.
    fn parse(&self, _source: &str, _state: &RenderingState) -> Result<AnnotatedNode, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    fn serialize(&self, _doc: &AnnotatedNode, _state: &RenderingState) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }

    /// Serializes with format-specific options. Formats without options
    /// accept only an empty map.
    fn serialize_with_options(
        &self,
        doc: &AnnotatedNode,
        state: &RenderingState,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        if options.is_empty() {
            self.serialize(doc, state)
        } else {
            Err(FormatError::NotSupported(format!(
                "Format '{}' does not support extra parameters",
                self.name()
            )))
        }
    }
}
