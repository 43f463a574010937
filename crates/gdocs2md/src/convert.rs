//! Flatten a structural document tree into content blocks
//!
//! This module walks the document body in order and re-emits it as the flat
//! block sequence defined in gdocs2md-core. Lists are rebuilt from sibling
//! paragraphs, footnotes are numbered from their references and appended
//! last.

use gdocs2md_core::{Block, Cover, Footnote, Image, ListItem, ListKind, Table};
use indexmap::IndexMap;
use serde::Serialize;

use crate::document::{
    self, Bullet, Document, InlineElement, InlineObjectElement, NamedStyleType, Paragraph,
    TableCell,
};
use crate::text::{clean_text, join_inline, render_text_run, TextContext};
use crate::{ConvertError, ReferenceKind, Result};

/// Result of flattening a document
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Flattened {
    pub cover: Option<Cover>,
    pub content: Vec<Block>,
}

/// Flatten a document into its cover image and ordered content blocks
pub fn flatten(document: &Document) -> Result<Flattened> {
    let mut ctx = Context::new(document);
    let cover = ctx.cover()?;

    let mut previous_list: Option<&str> = None;
    for element in &document.body.content {
        if let Some(paragraph) = &element.paragraph {
            match &paragraph.bullet {
                Some(bullet) => {
                    let continues = previous_list == Some(bullet.list_id.as_str());
                    ctx.push_list_item(paragraph, bullet, continues)?;
                }
                None => ctx.push_paragraph(paragraph)?,
            }
            previous_list = paragraph.bullet.as_ref().map(|b| b.list_id.as_str());
        } else {
            if let Some(table) = &element.table {
                ctx.push_table(table);
            }
            previous_list = None;
        }
    }

    let footnotes = ctx.footnotes();
    tracing::debug!(
        blocks = ctx.blocks.len(),
        footnotes = footnotes.len(),
        has_cover = cover.is_some(),
        "Flattened document"
    );

    let mut content = ctx.blocks;
    content.extend(footnotes.into_iter().map(Block::Footnote));
    Ok(Flattened { cover, content })
}

/// Block type a named paragraph style maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextTag {
    Heading(u8),
    Paragraph,
    BlockQuote,
}

impl TextTag {
    fn from_style(style: NamedStyleType) -> Option<Self> {
        match style {
            NamedStyleType::NormalText => Some(TextTag::Paragraph),
            NamedStyleType::Subtitle => Some(TextTag::BlockQuote),
            NamedStyleType::Heading1 => Some(TextTag::Heading(1)),
            NamedStyleType::Heading2 => Some(TextTag::Heading(2)),
            NamedStyleType::Heading3 => Some(TextTag::Heading(3)),
            NamedStyleType::Heading4 => Some(TextTag::Heading(4)),
            NamedStyleType::Heading5 => Some(TextTag::Heading(5)),
            _ => None,
        }
    }

    fn context(self) -> TextContext {
        match self {
            TextTag::Heading(_) => TextContext::Heading,
            TextTag::Paragraph | TextTag::BlockQuote => TextContext::Body,
        }
    }

    fn block(self, text: String) -> Block {
        match self {
            TextTag::Heading(level) => Block::Heading { level, text },
            TextTag::Paragraph => Block::Paragraph(text),
            TextTag::BlockQuote => Block::BlockQuote(text),
        }
    }
}

/// One rendered inline element of a styled paragraph
enum Entry {
    Text(String),
    Image(Image),
}

/// Conversion state for a single document
struct Context<'a> {
    document: &'a Document,
    blocks: Vec<Block>,
    /// Footnote id to the number shown at its reference, in reference order
    footnote_numbers: IndexMap<&'a str, &'a str>,
}

impl<'a> Context<'a> {
    fn new(document: &'a Document) -> Self {
        Self {
            document,
            blocks: Vec::new(),
            footnote_numbers: IndexMap::new(),
        }
    }

    /// Cover image from the first element of the first-page header
    fn cover(&self) -> Result<Option<Cover>> {
        let document = self.document;
        let Some(header) = document
            .document_style
            .first_page_header_id
            .as_deref()
            .and_then(|id| document.headers.get(id))
        else {
            return Ok(None);
        };

        let first = header
            .content
            .first()
            .and_then(|element| element.paragraph.as_ref())
            .and_then(|paragraph| paragraph.elements.first());

        match first.map(|element| element.kind()) {
            Some(InlineElement::InlineObject(object)) => Ok(self.image(object)?.map(Cover::from)),
            _ => Ok(None),
        }
    }

    /// Resolve an inline object to an image.
    ///
    /// An id missing from `inlineObjects` is an error; an object that is not
    /// an image resolves to `None`.
    fn image(&self, element: &InlineObjectElement) -> Result<Option<Image>> {
        let id = element.inline_object_id.as_str();
        let object = self
            .document
            .inline_objects
            .get(id)
            .ok_or_else(|| ConvertError::missing(ReferenceKind::InlineObject, id))?;

        let Some(embedded) = &object.inline_object_properties.embedded_object else {
            tracing::debug!(inline_object_id = id, "Inline object has no embedded object");
            return Ok(None);
        };
        let Some(source) = embedded
            .image_properties
            .as_ref()
            .and_then(|properties| properties.content_uri.clone())
        else {
            tracing::debug!(inline_object_id = id, "Embedded object is not an image");
            return Ok(None);
        };

        Ok(Some(Image {
            source,
            title: embedded.title.clone().unwrap_or_default(),
            alt: embedded.description.clone().unwrap_or_default(),
        }))
    }

    /// Record the number of a footnote reference and return its marker
    fn footnote_marker(&mut self, reference: &'a document::FootnoteReference) -> String {
        self.footnote_numbers
            .insert(reference.footnote_id.as_str(), reference.footnote_number.as_str());
        format!("[^{}]", reference.footnote_number)
    }

    fn list_kind(&self, list_id: &str) -> Result<ListKind> {
        let list = self
            .document
            .lists
            .get(list_id)
            .ok_or_else(|| ConvertError::missing(ReferenceKind::List, list_id))?;

        Ok(if list.is_ordered() {
            ListKind::Ordered
        } else {
            ListKind::Unordered
        })
    }

    fn list_item_text(&mut self, paragraph: &'a Paragraph) -> Result<String> {
        let mut parts = Vec::with_capacity(paragraph.elements.len());

        for element in &paragraph.elements {
            let part = match element.kind() {
                InlineElement::TextRun(run) => render_text_run(run, TextContext::Body),
                InlineElement::InlineObject(object) => match self.image(object)? {
                    Some(image) => image.to_markdown(),
                    None => continue,
                },
                InlineElement::FootnoteReference(reference) => self.footnote_marker(reference),
                InlineElement::Other => continue,
            };
            if !part.is_empty() {
                parts.push(part);
            }
        }

        Ok(join_inline(parts))
    }

    /// Add a list paragraph, either continuing the current list block or
    /// starting a new one.
    fn push_list_item(
        &mut self,
        paragraph: &'a Paragraph,
        bullet: &Bullet,
        continues: bool,
    ) -> Result<()> {
        let kind = self.list_kind(&bullet.list_id)?;
        let text = self.list_item_text(paragraph)?;

        if continues {
            if let Some(Block::List { items, .. }) = self.blocks.last_mut() {
                match bullet.nesting_level {
                    Some(level) => {
                        if let Some(previous) = items.last_mut() {
                            previous.push_nested(ListItem::nested(text, level));
                            return Ok(());
                        }
                    }
                    None => {
                        items.push(ListItem::new(text));
                        return Ok(());
                    }
                }
            }
        }

        self.blocks.push(Block::List {
            kind,
            items: vec![ListItem::new(text)],
        });
        Ok(())
    }

    /// Add a styled paragraph: heading, normal text or subtitle
    fn push_paragraph(&mut self, paragraph: &'a Paragraph) -> Result<()> {
        let style = paragraph.paragraph_style.named_style_type;
        let Some(tag) = TextTag::from_style(style) else {
            tracing::debug!(?style, "Skipping paragraph with unsupported style");
            return Ok(());
        };

        let mut entries = Vec::with_capacity(paragraph.elements.len());
        for element in &paragraph.elements {
            match element.kind() {
                InlineElement::InlineObject(object) => {
                    if let Some(image) = self.image(object)? {
                        entries.push(Entry::Image(image));
                    }
                }
                InlineElement::TextRun(run) => {
                    let text = render_text_run(run, tag.context());
                    if !text.is_empty() {
                        entries.push(Entry::Text(text));
                    }
                }
                InlineElement::FootnoteReference(reference) => {
                    entries.push(Entry::Text(self.footnote_marker(reference)));
                }
                InlineElement::Other => {}
            }
        }

        if entries.iter().all(|entry| matches!(entry, Entry::Text(_))) {
            let text = join_inline(entries.into_iter().filter_map(|entry| match entry {
                Entry::Text(text) => Some(text),
                Entry::Image(_) => None,
            }));
            self.blocks.push(tag.block(text));
        } else {
            // An image inside the paragraph: every part stands alone
            for entry in entries {
                self.blocks.push(match entry {
                    Entry::Text(text) => tag.block(text),
                    Entry::Image(image) => Block::Image(image),
                });
            }
        }

        Ok(())
    }

    fn push_table(&mut self, table: &document::Table) {
        let mut rows = table
            .table_rows
            .iter()
            .map(|row| row.table_cells.iter().map(cell_text).collect::<Vec<_>>());

        let Some(headers) = rows.next() else {
            tracing::debug!("Skipping table without rows");
            return;
        };

        self.blocks.push(Block::Table(Table {
            headers,
            rows: rows.collect(),
        }));
    }

    /// Footnote blocks for every referenced footnote, sorted by number.
    ///
    /// Numbers that are not numeric sort last; ties keep reference order.
    fn footnotes(&self) -> Vec<Footnote> {
        let table = &self.document.footnotes;

        for (key, footnote) in table {
            let id = footnote.footnote_id.as_deref().unwrap_or(key);
            if !self.footnote_numbers.contains_key(id) {
                tracing::debug!(footnote_id = id, "Dropping footnote never referenced in the body");
            }
        }

        let mut footnotes = Vec::with_capacity(self.footnote_numbers.len());
        for (&id, &number) in &self.footnote_numbers {
            let found = table.get(id).or_else(|| {
                table
                    .values()
                    .find(|footnote| footnote.footnote_id.as_deref() == Some(id))
            });
            let Some(footnote) = found else {
                tracing::debug!(footnote_id = id, "Footnote reference has no footnote body");
                continue;
            };

            let parts = footnote
                .content
                .iter()
                .filter_map(|element| element.paragraph.as_ref())
                .flat_map(|paragraph| &paragraph.elements)
                .filter_map(|element| element.text_run.as_ref())
                .map(|run| render_text_run(run, TextContext::Body))
                .filter(|part| !part.is_empty());

            footnotes.push(Footnote {
                number: number.to_string(),
                text: join_inline(parts),
            });
        }

        footnotes.sort_by_key(|footnote| {
            let number = footnote.numeric();
            (number.is_none(), number)
        });
        footnotes
    }
}

/// Plain concatenation of a cell's paragraphs
fn cell_text(cell: &TableCell) -> String {
    cell.content
        .iter()
        .filter_map(|element| element.paragraph.as_ref())
        .map(|paragraph| {
            let text: String = paragraph
                .elements
                .iter()
                .filter_map(|element| element.text_run.as_ref())
                .filter(|run| !run.is_line_break())
                .map(|run| render_text_run(run, TextContext::Body))
                .collect();
            clean_text(&text)
        })
        .collect()
}
