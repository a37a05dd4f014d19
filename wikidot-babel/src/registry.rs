//! Format registry for format discovery and selection
//!
//! Formats are registered under their name and looked up by name or by the
//! extension of a filename.

use crate::error::FormatError;
use crate::format::Format;
use crate::tree::{AnnotatedNode, RenderingState};
use std::collections::HashMap;

/// Registry of document formats
///
/// ```ignore
/// let registry = FormatRegistry::default();
/// let state = RenderingState::default();
/// let tree = registry.parse("+ Title", "wikidot", &state)?;
/// let html = registry.serialize(&tree, "html", &state)?;
/// ```
pub struct FormatRegistry {
    formats: HashMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formats: HashMap::new(),
        }
    }

    /// Register a format, replacing any format of the same name.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    pub fn get(&self, name: &str) -> Result<&dyn Format, FormatError> {
        self.formats
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| FormatError::FormatNotFound(name.to_string()))
    }

    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// All format names, sorted
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formats.keys().cloned().collect();
        names.sort();
        names
    }

    /// Format name for the extension of `filename`, if any format claims it.
    pub fn detect_format_from_filename(&self, filename: &str) -> Option<String> {
        let extension = std::path::Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())?
            .to_ascii_lowercase();

        self.formats
            .values()
            .find(|format| format.file_extensions().contains(&extension.as_str()))
            .map(|format| format.name().to_string())
    }

    pub fn parse(
        &self,
        source: &str,
        format: &str,
        state: &RenderingState,
    ) -> Result<AnnotatedNode, FormatError> {
        let fmt = self.get(format)?;
        if !fmt.supports_parsing() {
            return Err(FormatError::NotSupported(format!(
                "Format '{format}' does not support parsing"
            )));
        }
        fmt.parse(source, state)
    }

    pub fn serialize(
        &self,
        doc: &AnnotatedNode,
        format: &str,
        state: &RenderingState,
    ) -> Result<String, FormatError> {
        self.serialize_with_options(doc, format, state, &HashMap::new())
    }

    pub fn serialize_with_options(
        &self,
        doc: &AnnotatedNode,
        format: &str,
        state: &RenderingState,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let fmt = self.get(format)?;
        if !fmt.supports_serialization() {
            return Err(FormatError::NotSupported(format!(
                "Format '{format}' does not support serialization"
            )));
        }
        fmt.serialize_with_options(doc, state, options)
    }

    /// Registry with the built-in formats
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(crate::formats::wikidot::WikidotFormat);
        registry.register(crate::formats::html::HtmlFormat::default());
        registry.register(crate::formats::json::JsonFormat);
        registry.register(crate::formats::treeviz::TreevizFormat);
        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Tag;

    struct TestFormat;
    impl Format for TestFormat {
        fn name(&self) -> &str {
            "test"
        }
        fn file_extensions(&self) -> &[&str] {
            &["tst"]
        }
        fn supports_parsing(&self) -> bool {
            true
        }
        fn supports_serialization(&self) -> bool {
            true
        }
        fn parse(&self, source: &str, _: &RenderingState) -> Result<AnnotatedNode, FormatError> {
            Ok(AnnotatedNode::root(vec![
                AnnotatedNode::element(Tag::Paragraph).with_child(AnnotatedNode::text(source))
            ]))
        }
        fn serialize(&self, doc: &AnnotatedNode, _: &RenderingState) -> Result<String, FormatError> {
            Ok(doc.text_content())
        }
    }

    #[test]
    fn test_registry_register() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormat);

        assert!(registry.has("test"));
        assert_eq!(registry.list_formats(), vec!["test"]);
    }

    #[test]
    fn test_registry_get_nonexistent() {
        let registry = FormatRegistry::new();
        match registry.get("nonexistent") {
            Err(FormatError::FormatNotFound(name)) => assert_eq!(name, "nonexistent"),
            _ => panic!("Expected FormatNotFound error"),
        }
    }

    #[test]
    fn test_registry_parse_then_serialize() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormat);
        let state = RenderingState::default();

        let doc = registry.parse("hello", "test", &state).unwrap();
        assert_eq!(registry.serialize(&doc, "test", &state).unwrap(), "hello");
    }

    #[test]
    fn test_options_rejected_by_default() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormat);
        let mut options = HashMap::new();
        options.insert("x".to_string(), "1".to_string());

        let doc = AnnotatedNode::root(Vec::new());
        let result =
            registry.serialize_with_options(&doc, "test", &RenderingState::default(), &options);
        assert!(matches!(result, Err(FormatError::NotSupported(_))));
    }

    #[test]
    fn test_detect_format_from_filename() {
        let registry = FormatRegistry::default();
        assert_eq!(
            registry.detect_format_from_filename("page.wikidot"),
            Some("wikidot".to_string())
        );
        assert_eq!(
            registry.detect_format_from_filename("page.HTML"),
            Some("html".to_string())
        );
        assert_eq!(registry.detect_format_from_filename("page.tree"), Some("treeviz".to_string()));
        assert_eq!(registry.detect_format_from_filename("page.unknown"), None);
    }

    #[test]
    fn test_default_formats() {
        let registry = FormatRegistry::default();
        assert_eq!(
            registry.list_formats(),
            vec!["html", "json", "treeviz", "wikidot"]
        );
        assert!(!registry.get("treeviz").unwrap().supports_parsing());
    }
}
