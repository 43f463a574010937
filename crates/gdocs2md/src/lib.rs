//! # gdocs2md
//!
//! Convert Google Docs documents to JSON content blocks or Markdown.
//!
//! ## Design
//!
//! The converter accepts an already-fetched `documents.get` response. It does
//! no network access or authentication of its own, which keeps it:
//!
//! - **Pure**: the same document always yields the same output
//! - **Transport agnostic**: any API client can hand over the JSON
//! - **Re-entrant**: independent documents convert concurrently without coordination
//!
//! Conversion happens in two steps. The document tree is flattened into
//! content blocks ([`flatten`]), which are then either returned as JSON or
//! rendered to Markdown by `gdocs2md-core`.
//!
//! ## Example
//!
//! ```rust
//! use gdocs2md::{DocsConverter, Metadata};
//!
//! let json = r#"{
//!     "body": {"content": [{"paragraph": {
//!         "paragraphStyle": {"namedStyleType": "HEADING_1"},
//!         "elements": [{"textRun": {"content": "Hello World\n", "textStyle": {}}}]
//!     }}]}
//! }"#;
//!
//! let converter = DocsConverter::from_json(json)
//!     .unwrap()
//!     .with_metadata(Metadata::new("Greeting").with_last_modified("01/02/2024"));
//!
//! let markdown = converter.to_markdown().unwrap();
//! assert_eq!(markdown, "Greeting\nLast Edited: 01/02/2024\n---\n\n# Hello World");
//! ```

use std::fmt;

mod convert;
pub mod document;
mod service;
mod text;

pub use convert::{flatten, Flattened};
pub use document::Document;
pub use gdocs2md_core::{
    render, render_hybrid, Block, Cover, Footnote, Hybrid, Image, ListItem, ListKind, Metadata,
    Options, Table,
};
pub use service::{DocsConverter, JsonDocument};
pub use text::{render_text_run, TextContext};

/// Side table a document reference points into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// An entry of `lists`, referenced by a bullet
    List,
    /// An entry of `inlineObjects`, referenced by an inline object element
    InlineObject,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReferenceKind::List => "list",
            ReferenceKind::InlineObject => "inline object",
        })
    }
}

/// Error type for conversion operations
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Malformed document: {kind} `{id}` is not defined")]
    MalformedDocument { kind: ReferenceKind, id: String },

    #[error("Invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConvertError {
    pub(crate) fn missing(kind: ReferenceKind, id: &str) -> Self {
        ConvertError::MalformedDocument {
            kind,
            id: id.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
