//! gdocs2md-core - content blocks and Markdown rendering
//!
//! This crate provides the flat content-block model produced from a Google
//! Docs structural tree, and the renderer turning those blocks into Markdown.
//! The `gdocs2md` crate builds the blocks; JSON consumers can use them as-is.
//!
//! # Architecture
//!
//! ```text
//!                       ┌────────────────┐ ──▶ JSON
//! Document tree ──────▶ │ Content blocks │
//!                       └────────────────┘ ──▶ Markdown String
//! ```
//!
//! # Example
//!
//! ```rust
//! use gdocs2md_core::{render, Block, ListKind, Options};
//!
//! let blocks = vec![
//!     Block::heading(1, "Hello World"),
//!     Block::paragraph("Shopping list:"),
//!     Block::list(ListKind::Unordered, ["eggs", "milk"]),
//! ];
//!
//! let markdown = render(&blocks, None, &Options::default());
//! assert_eq!(markdown, "# Hello World\n\nShopping list:\n - eggs\n - milk");
//! ```

mod ast;
mod metadata;
mod options;
mod rules;
mod serialize;

pub use ast::{Block, BlockKind, Cover, Footnote, Image, ListItem, ListKind, Table};
pub use metadata::Metadata;
pub use options::Options;
pub use rules::{rule_for, RenderFn, Rule, RULES};
pub use serialize::{render, render_hybrid, Hybrid};
