//! DocsConverter - the entry point for document to JSON/Markdown conversion.

use gdocs2md_core::{render, render_hybrid, Block, Cover, Hybrid, Metadata, Options};
use serde::Serialize;

use crate::convert::flatten;
use crate::document::Document;
use crate::Result;

/// The JSON form: metadata, cover image and content blocks
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonDocument {
    pub metadata: Metadata,
    pub cover: Option<Cover>,
    pub content: Vec<Block>,
}

/// Converts an already-fetched document to JSON, Markdown or the hybrid form
#[derive(Debug, Clone)]
pub struct DocsConverter {
    document: Document,
    metadata: Option<Metadata>,
    options: Options,
}

impl DocsConverter {
    /// Create a converter for a document with default options
    pub fn new(document: Document) -> Self {
        Self {
            document,
            metadata: None,
            options: Options::default(),
        }
    }

    /// Create a converter from the raw `documents.get` JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(Document::from_json(json)?))
    }

    /// Use explicit metadata instead of the document title
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Use custom rendering options
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Metadata used for output: the explicit record, or the document title
    pub fn metadata(&self) -> Metadata {
        self.metadata.clone().unwrap_or_else(|| Metadata {
            title: self.document.title.clone(),
            last_modified: None,
        })
    }

    /// Get the current options
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    pub fn to_json(&self) -> Result<JsonDocument> {
        let flattened = flatten(&self.document)?;
        Ok(JsonDocument {
            metadata: self.metadata(),
            cover: flattened.cover,
            content: flattened.content,
        })
    }

    pub fn to_markdown(&self) -> Result<String> {
        let flattened = flatten(&self.document)?;
        Ok(render(
            &flattened.content,
            Some(&self.metadata()),
            &self.options,
        ))
    }

    pub fn to_json_markdown_hybrid(&self) -> Result<Hybrid> {
        let flattened = flatten(&self.document)?;
        Ok(render_hybrid(
            &flattened.content,
            Some(&self.metadata()),
            &self.options,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const DOC: &str = r#"{
        "title": "Notes",
        "body": {"content": [
            {"paragraph": {
                "paragraphStyle": {"namedStyleType": "HEADING_1"},
                "elements": [{"textRun": {"content": "Notes\n", "textStyle": {}}}]
            }},
            {"paragraph": {
                "paragraphStyle": {"namedStyleType": "NORMAL_TEXT"},
                "elements": [{"textRun": {"content": "Hello\n", "textStyle": {}}}]
            }}
        ]}
    }"#;

    #[test]
    fn test_markdown_uses_document_title() {
        let converter = DocsConverter::from_json(DOC).unwrap();
        assert_eq!(converter.to_markdown().unwrap(), "Notes\n---\n\n# Notes\n\nHello");
    }

    #[test]
    fn test_markdown_with_metadata() {
        let converter = DocsConverter::from_json(DOC)
            .unwrap()
            .with_metadata(Metadata::new("Doc").with_last_modified("01/02/2024"));
        assert_eq!(
            converter.to_markdown().unwrap(),
            "Doc\nLast Edited: 01/02/2024\n---\n\n# Notes\n\nHello"
        );
    }

    #[test]
    fn test_hybrid() {
        let converter = DocsConverter::from_json(DOC)
            .unwrap()
            .with_metadata(Metadata::from_modified_time("Doc", Some("2024-01-02T09:00:00Z")));
        let hybrid = converter.to_json_markdown_hybrid().unwrap();

        assert_eq!(hybrid.markdown_content, "# Notes\n\nHello");
        assert_eq!(
            serde_json::to_value(&hybrid).unwrap(),
            json!({
                "metadata": {"title": "Doc", "lastModified": "01/02/2024"},
                "markdownContent": "# Notes\n\nHello"
            })
        );
    }

    #[test]
    fn test_json_shape() {
        let converter = DocsConverter::from_json(DOC).unwrap();
        let value = serde_json::to_value(converter.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "metadata": {"title": "Notes", "lastModified": null},
                "cover": null,
                "content": [{"h1": "Notes"}, {"p": "Hello"}]
            })
        );
    }

    #[test]
    fn test_hybrid_without_date_keeps_null_field() {
        let converter = DocsConverter::from_json(r#"{"title": "Doc", "body": {"content": []}}"#).unwrap();
        let hybrid = converter.to_json_markdown_hybrid().unwrap();
        assert_eq!(
            serde_json::to_value(&hybrid).unwrap(),
            json!({
                "metadata": {"title": "Doc", "lastModified": null},
                "markdownContent": ""
            })
        );
    }

    #[test]
    fn test_options_disable_title_header() {
        let mut converter = DocsConverter::from_json(DOC).unwrap();
        converter.options_mut().title_header = false;
        assert_eq!(converter.to_markdown().unwrap(), "# Notes\n\nHello");
    }

    #[test]
    fn test_invalid_json() {
        assert!(DocsConverter::from_json("not json").is_err());
    }
}
