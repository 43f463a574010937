//! Content block model
//!
//! This module defines the flat, ordered content blocks produced from a
//! structural document tree. Blocks are the shared currency of the JSON
//! output and the Markdown renderer.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

const HEADING_TAGS: [&str; 5] = ["h1", "h2", "h3", "h4", "h5"];

/// Whether a list renders with bullets or numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    /// Bulleted list (`ul`)
    Unordered,
    /// Numbered list (`ol`)
    Ordered,
}

impl ListKind {
    /// The JSON tag of a list block of this kind
    pub fn tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "ul",
            ListKind::Ordered => "ol",
        }
    }

    /// Marker written in front of nested sub-lines
    pub fn nested_marker(self) -> &'static str {
        match self {
            ListKind::Unordered => "-",
            ListKind::Ordered => "1.",
        }
    }
}

/// A flat, typed unit of output content
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Heading with level (1-5) and text
    Heading { level: u8, text: String },

    /// Plain paragraph
    Paragraph(String),

    /// Block quote (subtitles)
    BlockQuote(String),

    /// Ordered or unordered list
    List { kind: ListKind, items: Vec<ListItem> },

    /// Embedded image
    Image(Image),

    /// Table with a header row and body rows
    Table(Table),

    /// Footnote definition
    Footnote(Footnote),
}

/// Discriminant of [`Block`], used to look up render rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Heading,
    Paragraph,
    BlockQuote,
    UnorderedList,
    OrderedList,
    Image,
    Table,
    Footnote,
}

/// A list item with its nested sub-items
///
/// Top-level items carry no nesting level. Nested items keep the level the
/// source paragraph declared so they can be indented when flattened back to
/// text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub text: String,
    pub nesting_level: Option<u32>,
    pub children: Vec<ListItem>,
}

impl ListItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            nesting_level: None,
            children: Vec::new(),
        }
    }

    pub fn nested(text: impl Into<String>, level: u32) -> Self {
        Self {
            text: text.into(),
            nesting_level: Some(level),
            children: Vec::new(),
        }
    }

    /// Attach a nested item along the rightmost path of this item.
    ///
    /// The item descends into the last child while that child sits at a
    /// shallower level, so deeper levels end up under the most recent
    /// shallower item.
    pub fn push_nested(&mut self, child: ListItem) {
        if let Some(last) = self.children.last_mut() {
            if last.nesting_level < child.nesting_level {
                last.push_nested(child);
                return;
            }
        }
        self.children.push(child);
    }

    /// Flatten this item and its descendants into one string.
    ///
    /// Each descendant becomes a sub-line indented two spaces per nesting
    /// level and prefixed with the list's nested marker.
    pub fn to_markdown(&self, kind: ListKind) -> String {
        let mut out = self.text.clone();
        self.write_children(kind, &mut out);
        out
    }

    fn write_children(&self, kind: ListKind, out: &mut String) {
        for child in &self.children {
            out.push('\n');
            let level = child.nesting_level.unwrap_or(0) as usize;
            out.push_str(&"  ".repeat(level));
            out.push_str(kind.nested_marker());
            out.push(' ');
            out.push_str(&child.text);
            child.write_children(kind, out);
        }
    }
}

/// Embedded image reference
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Image {
    pub source: String,
    pub title: String,
    pub alt: String,
}

impl Image {
    /// Markdown image syntax, `![alt](source "title")`
    pub fn to_markdown(&self) -> String {
        format!("![{}]({} \"{}\")", self.alt, self.source, self.title)
    }
}

/// Cover image taken from the first-page header
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cover {
    pub image: String,
    pub title: String,
    pub alt: String,
}

impl From<Image> for Cover {
    fn from(image: Image) -> Self {
        Self {
            image: image.source,
            title: image.title,
            alt: image.alt,
        }
    }
}

/// Flattened table: header cells plus body rows of cell strings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Footnote definition, numbered from its reference in the body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Footnote {
    pub number: String,
    pub text: String,
}

impl Footnote {
    /// Numeric value of the footnote number, if it is one
    pub fn numeric(&self) -> Option<u64> {
        self.number.trim().parse().ok()
    }
}

impl Block {
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Block::Heading {
            level: level.clamp(1, 5),
            text: text.into(),
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph(text.into())
    }

    /// Build a list block of top-level items without nesting
    pub fn list<I, S>(kind: ListKind, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Block::List {
            kind,
            items: items.into_iter().map(ListItem::new).collect(),
        }
    }

    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Heading { .. } => BlockKind::Heading,
            Block::Paragraph(_) => BlockKind::Paragraph,
            Block::BlockQuote(_) => BlockKind::BlockQuote,
            Block::List {
                kind: ListKind::Unordered,
                ..
            } => BlockKind::UnorderedList,
            Block::List {
                kind: ListKind::Ordered,
                ..
            } => BlockKind::OrderedList,
            Block::Image(_) => BlockKind::Image,
            Block::Table(_) => BlockKind::Table,
            Block::Footnote(_) => BlockKind::Footnote,
        }
    }

    /// The single key this block is serialized under
    pub fn tag(&self) -> &'static str {
        match self {
            Block::Heading { level, .. } => HEADING_TAGS[usize::from((*level).clamp(1, 5) - 1)],
            Block::Paragraph(_) => "p",
            Block::BlockQuote(_) => "blockquote",
            Block::List { kind, .. } => kind.tag(),
            Block::Image(_) => "img",
            Block::Table(_) => "table",
            Block::Footnote(_) => "footnote",
        }
    }

    /// Text of text-bearing blocks (headings, paragraphs, block quotes)
    pub fn text(&self) -> Option<&str> {
        match self {
            Block::Heading { text, .. } | Block::Paragraph(text) | Block::BlockQuote(text) => {
                Some(text.as_str())
            }
            _ => None,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Block::List { .. })
    }

    /// Check if this block has nothing to render
    pub fn is_blank(&self) -> bool {
        self.text().is_some_and(str::is_empty)
    }
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Block::Heading { text, .. } | Block::Paragraph(text) | Block::BlockQuote(text) => {
                map.serialize_entry(self.tag(), text)?;
            }
            Block::List { kind, items } => {
                let items: Vec<String> = items.iter().map(|item| item.to_markdown(*kind)).collect();
                map.serialize_entry(self.tag(), &items)?;
            }
            Block::Image(image) => map.serialize_entry(self.tag(), image)?,
            Block::Table(table) => map.serialize_entry(self.tag(), table)?,
            Block::Footnote(footnote) => map.serialize_entry(self.tag(), footnote)?,
        }
        map.end()
    }
}
