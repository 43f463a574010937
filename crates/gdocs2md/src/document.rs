//! Structural document tree as returned by the Google Docs API.
//!
//! Only the fields the converter reads are modeled. Serde ignores unknown
//! fields, and every field defaults when absent, so partial responses still
//! deserialize.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

use crate::Result;

/// A Google Docs document (`documents.get` response)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Document {
    pub document_id: Option<String>,
    pub title: Option<String>,
    pub body: Body,
    pub document_style: DocumentStyle,
    /// List id to list formatting
    pub lists: IndexMap<String, List>,
    /// Inline object id to embedded object
    pub inline_objects: IndexMap<String, InlineObject>,
    /// Header id to header content
    pub headers: IndexMap<String, Header>,
    /// Footnote id to footnote content
    pub footnotes: IndexMap<String, Footnote>,
}

impl Document {
    /// Parse a document from the raw API JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Body {
    pub content: Vec<StructuralElement>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentStyle {
    pub first_page_header_id: Option<String>,
}

/// A block node: a paragraph, a table, or something the converter ignores
/// (section breaks, tables of contents)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StructuralElement {
    pub paragraph: Option<Paragraph>,
    pub table: Option<Table>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Paragraph {
    pub elements: Vec<ParagraphElement>,
    pub paragraph_style: ParagraphStyle,
    /// Present when the paragraph is a list item
    pub bullet: Option<Bullet>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParagraphStyle {
    pub named_style_type: NamedStyleType,
}

/// Named paragraph styles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum NamedStyleType {
    #[serde(rename = "NORMAL_TEXT")]
    NormalText,
    #[serde(rename = "TITLE")]
    Title,
    #[serde(rename = "SUBTITLE")]
    Subtitle,
    #[serde(rename = "HEADING_1")]
    Heading1,
    #[serde(rename = "HEADING_2")]
    Heading2,
    #[serde(rename = "HEADING_3")]
    Heading3,
    #[serde(rename = "HEADING_4")]
    Heading4,
    #[serde(rename = "HEADING_5")]
    Heading5,
    #[serde(rename = "HEADING_6")]
    Heading6,
    /// Missing or unknown style
    #[default]
    #[serde(other)]
    Unspecified,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Bullet {
    pub list_id: String,
    /// Zero-based depth; the API omits it for top-level items
    pub nesting_level: Option<u32>,
}

/// One inline element of a paragraph.
///
/// The API marks the element kind by which field is present; use
/// [`ParagraphElement::kind`] to match on it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParagraphElement {
    pub text_run: Option<TextRun>,
    pub inline_object_element: Option<InlineObjectElement>,
    pub footnote_reference: Option<FootnoteReference>,
}

/// Borrowed view of a [`ParagraphElement`] by kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InlineElement<'a> {
    TextRun(&'a TextRun),
    InlineObject(&'a InlineObjectElement),
    FootnoteReference(&'a FootnoteReference),
    /// Page breaks, equations, auto text and the like
    Other,
}

impl ParagraphElement {
    pub fn kind(&self) -> InlineElement<'_> {
        if let Some(run) = &self.text_run {
            InlineElement::TextRun(run)
        } else if let Some(object) = &self.inline_object_element {
            InlineElement::InlineObject(object)
        } else if let Some(reference) = &self.footnote_reference {
            InlineElement::FootnoteReference(reference)
        } else {
            InlineElement::Other
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextRun {
    pub content: String,
    pub text_style: TextStyle,
}

impl TextRun {
    /// A run holding only the paragraph terminator
    pub fn is_line_break(&self) -> bool {
        self.content == "\n"
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub link: Option<Link>,
}

impl TextStyle {
    /// Target URL of the link, if the run is linked to one
    pub fn link_url(&self) -> Option<&str> {
        self.link
            .as_ref()
            .and_then(|link| link.url.as_deref())
            .filter(|url| !url.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Link {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InlineObjectElement {
    pub inline_object_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FootnoteReference {
    pub footnote_id: String,
    /// Rendered number, as a string (`"1"`, `"2"`, ...)
    #[serde(deserialize_with = "string_or_number")]
    pub footnote_number: String,
}

/// Footnote numbers are strings in API responses; hand-written fixtures
/// often use plain numbers.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Table {
    pub table_rows: Vec<TableRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableRow {
    pub table_cells: Vec<TableCell>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableCell {
    pub content: Vec<StructuralElement>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct List {
    pub list_properties: ListProperties,
}

impl List {
    /// Numbered lists carry a glyph type on their first nesting level
    pub fn is_ordered(&self) -> bool {
        self.list_properties
            .nesting_levels
            .first()
            .is_some_and(|level| level.glyph_type.is_some())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListProperties {
    pub nesting_levels: Vec<NestingLevel>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NestingLevel {
    pub glyph_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InlineObject {
    pub inline_object_properties: InlineObjectProperties,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InlineObjectProperties {
    pub embedded_object: Option<EmbeddedObject>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmbeddedObject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_properties: Option<ImageProperties>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageProperties {
    pub content_uri: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Header {
    pub header_id: Option<String>,
    pub content: Vec<StructuralElement>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Footnote {
    pub footnote_id: Option<String>,
    pub content: Vec<StructuralElement>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_paragraph() {
        let json = json!({
            "title": "Doc",
            "body": {"content": [
                {"sectionBreak": {}},
                {"paragraph": {
                    "paragraphStyle": {"namedStyleType": "HEADING_2"},
                    "elements": [
                        {"startIndex": 1, "textRun": {"content": "Hi\n", "textStyle": {"bold": true}}}
                    ]
                }}
            ]}
        });

        let document: Document = serde_json::from_value(json).unwrap();
        assert_eq!(document.title.as_deref(), Some("Doc"));
        assert_eq!(document.body.content.len(), 2);
        assert!(document.body.content[0].paragraph.is_none());

        let paragraph = document.body.content[1].paragraph.as_ref().unwrap();
        assert_eq!(
            paragraph.paragraph_style.named_style_type,
            NamedStyleType::Heading2
        );
        match paragraph.elements[0].kind() {
            InlineElement::TextRun(run) => {
                assert_eq!(run.content, "Hi\n");
                assert!(run.text_style.bold);
            }
            other => panic!("unexpected element {other:?}"),
        }
    }

    #[test]
    fn test_unknown_style_is_unspecified() {
        let style: ParagraphStyle =
            serde_json::from_value(json!({"namedStyleType": "SOMETHING_NEW"})).unwrap();
        assert_eq!(style.named_style_type, NamedStyleType::Unspecified);
    }

    #[test]
    fn test_list_ordering_from_glyph_type() {
        let ordered: List = serde_json::from_value(json!({
            "listProperties": {"nestingLevels": [{"glyphType": "DECIMAL"}]}
        }))
        .unwrap();
        let unordered: List = serde_json::from_value(json!({
            "listProperties": {"nestingLevels": [{"glyphSymbol": "●"}]}
        }))
        .unwrap();

        assert!(ordered.is_ordered());
        assert!(!unordered.is_ordered());
        assert!(!List::default().is_ordered());
    }

    #[test]
    fn test_element_kinds() {
        let object: ParagraphElement =
            serde_json::from_value(json!({"inlineObjectElement": {"inlineObjectId": "kix.1"}}))
                .unwrap();
        let reference: ParagraphElement = serde_json::from_value(
            json!({"footnoteReference": {"footnoteId": "f1", "footnoteNumber": "1"}}),
        )
        .unwrap();
        let other: ParagraphElement =
            serde_json::from_value(json!({"pageBreak": {}})).unwrap();

        assert!(matches!(object.kind(), InlineElement::InlineObject(o) if o.inline_object_id == "kix.1"));
        assert!(matches!(reference.kind(), InlineElement::FootnoteReference(r) if r.footnote_number == "1"));
        assert_eq!(other.kind(), InlineElement::Other);
    }

    #[test]
    fn test_numeric_footnote_number() {
        let reference: FootnoteReference =
            serde_json::from_value(json!({"footnoteId": "f", "footnoteNumber": 7})).unwrap();
        assert_eq!(reference.footnote_number, "7");
    }

    #[test]
    fn test_link_url() {
        let style: TextStyle =
            serde_json::from_value(json!({"link": {"url": "https://example.com"}})).unwrap();
        assert_eq!(style.link_url(), Some("https://example.com"));

        let heading_link: TextStyle =
            serde_json::from_value(json!({"link": {"headingId": "h.1"}})).unwrap();
        assert_eq!(heading_link.link_url(), None);
    }

    #[test]
    fn test_from_json_reports_errors() {
        assert!(Document::from_json("{\"body\": 3}").is_err());
        assert_eq!(Document::from_json("{}").unwrap(), Document::default());
    }
}
