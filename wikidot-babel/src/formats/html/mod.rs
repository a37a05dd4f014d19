//! Editor fragment format
//!
//! The fragment is the HTML the importer produces and a rich-text editor
//! consumes: plain elements for structure and text styles, and one element
//! per component carrying `class="scp-component"`, `data-type` and a
//! `data-<field>` attribute for every field.
//!
//! | Tree                      | HTML                                              |
//! |---------------------------|---------------------------------------------------|
//! | `Root`                    | fragment children, no wrapper                     |
//! | elements                  | the element with its raw attributes               |
//! | block component           | `<div class="scp-component" data-type=…>`         |
//! | `forced-break`            | `<p class="scp-component" data-type="forced-break">` |
//! | `wikidot-table`           | `<table class="scp-component" …>` with rows       |
//! | inline component          | `<span class="scp-component" …>`                  |
//!
//! Parsing uses `html5ever`, so any HTML a browser accepts is read; tags
//! without a dedicated [`crate::tree::Tag`] are kept as `Other`.
//!
//! The `standalone` option wraps the fragment in a complete HTML5 document.

use crate::dom::{parse_fragment, render_fragment};
use crate::error::FormatError;
use crate::format::Format;
use crate::tree::{AnnotatedNode, RenderingState};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlFormat {
    standalone: bool,
}

impl HtmlFormat {
    pub fn standalone() -> Self {
        HtmlFormat { standalone: true }
    }
}

fn document(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n</head>\n<body>\n{body}\n</body>\n</html>\n"
    )
}

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "Editor fragment with component markers"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str, _state: &RenderingState) -> Result<AnnotatedNode, FormatError> {
        parse_fragment(source)
    }

    fn serialize(&self, doc: &AnnotatedNode, _state: &RenderingState) -> Result<String, FormatError> {
        let fragment = render_fragment(doc)?;
        Ok(if self.standalone {
            document(&fragment)
        } else {
            fragment
        })
    }

    fn serialize_with_options(
        &self,
        doc: &AnnotatedNode,
        state: &RenderingState,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let mut format = *self;
        for (key, value) in options {
            match key.as_str() {
                "standalone" => format.standalone = value != "false",
                other => {
                    return Err(FormatError::NotSupported(format!(
                        "Format 'html' has no option '{other}'"
                    )))
                }
            }
        }
        format.serialize(doc, state)
    }
}
