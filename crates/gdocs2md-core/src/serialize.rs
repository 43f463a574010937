//! Markdown rendering
//!
//! Converts content blocks into Markdown text.

use serde::Serialize;

use crate::ast::Block;
use crate::metadata::Metadata;
use crate::options::Options;
use crate::rules::rule_for;

/// Metadata plus the Markdown body rendered without the title header
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hybrid {
    pub metadata: Metadata,
    pub markdown_content: String,
}

/// Render blocks to a Markdown string.
///
/// When the metadata carries a title (and `options.title_header` is set), the
/// output starts with the title, the last-edited date if known, and a
/// horizontal rule.
pub fn render(blocks: &[Block], metadata: Option<&Metadata>, options: &Options) -> String {
    let mut output = String::with_capacity(4096);

    if options.title_header {
        if let Some(metadata) = metadata {
            render_title_header(metadata, options, &mut output);
        }
    }

    render_blocks(blocks, options, &mut output);
    output.trim().to_string()
}

/// Render blocks to Markdown without the title header, returning the
/// metadata alongside untouched.
pub fn render_hybrid(blocks: &[Block], metadata: Option<&Metadata>, options: &Options) -> Hybrid {
    let mut output = String::with_capacity(4096);
    render_blocks(blocks, options, &mut output);

    Hybrid {
        metadata: metadata.cloned().unwrap_or_default(),
        markdown_content: output.trim().to_string(),
    }
}

fn render_title_header(metadata: &Metadata, options: &Options, out: &mut String) {
    let Some(title) = metadata.title() else {
        return;
    };

    out.push_str(title);
    out.push('\n');
    if let Some(date) = metadata.last_modified() {
        out.push_str(&options.last_edited_label);
        out.push_str(": ");
        out.push_str(date);
        out.push('\n');
    }
    out.push_str(&options.hr);
    out.push_str("\n\n");
}

fn render_blocks(blocks: &[Block], options: &Options, out: &mut String) {
    for (i, block) in blocks.iter().enumerate() {
        if block.is_blank() {
            continue;
        }
        let Some(rule) = rule_for(block.kind()) else {
            continue;
        };

        rule.render(block, options, out);

        // A list attaches directly to the paragraph introducing it
        let next_is_list = blocks.get(i + 1).is_some_and(Block::is_list);
        if matches!(block, Block::Paragraph(_)) && next_is_list {
            out.push('\n');
        } else {
            out.push_str("\n\n");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Footnote, ListKind, Table};

    fn render_default(blocks: &[Block]) -> String {
        render(blocks, None, &Options::default())
    }

    #[test]
    fn test_empty_content() {
        assert_eq!(render_default(&[]), "");
    }

    #[test]
    fn test_paragraph_then_list_gets_single_newline() {
        let blocks = vec![
            Block::paragraph("Intro"),
            Block::list(ListKind::Unordered, ["a", "b"]),
        ];
        assert_eq!(render_default(&blocks), "Intro\n - a\n - b");
    }

    #[test]
    fn test_blocks_separated_by_blank_line() {
        let blocks = vec![
            Block::heading(1, "Title"),
            Block::paragraph("First"),
            Block::paragraph("Second"),
        ];
        assert_eq!(render_default(&blocks), "# Title\n\nFirst\n\nSecond");
    }

    #[test]
    fn test_list_then_paragraph_gets_blank_line() {
        let blocks = vec![
            Block::list(ListKind::Ordered, ["a"]),
            Block::paragraph("After"),
        ];
        assert_eq!(render_default(&blocks), "1. a\n\nAfter");
    }

    #[test]
    fn test_blank_paragraphs_are_skipped() {
        let blocks = vec![
            Block::paragraph("One"),
            Block::paragraph(""),
            Block::paragraph("Two"),
        ];
        assert_eq!(render_default(&blocks), "One\n\nTwo");
    }

    #[test]
    fn test_blank_paragraph_before_list_breaks_attachment() {
        let blocks = vec![
            Block::paragraph("Intro"),
            Block::paragraph(""),
            Block::list(ListKind::Unordered, ["a"]),
        ];
        assert_eq!(render_default(&blocks), "Intro\n\n - a");
    }

    #[test]
    fn test_title_header() {
        let metadata = Metadata::new("Doc").with_last_modified("01/02/2024");
        let result = render(&[], Some(&metadata), &Options::default());
        assert_eq!(result, "Doc\nLast Edited: 01/02/2024\n---");
    }

    #[test]
    fn test_title_header_without_date() {
        let metadata = Metadata::new("Doc");
        let blocks = vec![Block::paragraph("Body")];
        let result = render(&blocks, Some(&metadata), &Options::default());
        assert_eq!(result, "Doc\n---\n\nBody");
    }

    #[test]
    fn test_title_header_disabled() {
        let options = Options {
            title_header: false,
            ..Default::default()
        };
        let metadata = Metadata::new("Doc");
        let blocks = vec![Block::paragraph("Body")];
        assert_eq!(render(&blocks, Some(&metadata), &options), "Body");
    }

    #[test]
    fn test_hybrid_omits_header() {
        let metadata = Metadata::new("Doc").with_last_modified("01/02/2024");
        let hybrid = render_hybrid(&[], Some(&metadata), &Options::default());
        assert_eq!(hybrid.markdown_content, "");
        assert_eq!(hybrid.metadata, metadata);
    }

    #[test]
    fn test_hybrid_serializes_camel_case() {
        let hybrid = render_hybrid(&[Block::paragraph("x")], None, &Options::default());
        assert_eq!(
            serde_json::to_value(&hybrid).unwrap(),
            serde_json::json!({"metadata": {}, "markdownContent": "x"})
        );
    }

    #[test]
    fn test_table_and_footnotes() {
        let blocks = vec![
            Block::Table(Table {
                headers: vec!["A".to_string(), "B".to_string()],
                rows: vec![vec!["1".to_string(), "2".to_string()]],
            }),
            Block::Footnote(Footnote {
                number: "1".to_string(),
                text: "First".to_string(),
            }),
            Block::Footnote(Footnote {
                number: "2".to_string(),
                text: "Second".to_string(),
            }),
        ];
        assert_eq!(
            render_default(&blocks),
            "| A | B |\n| --- | --- |\n| 1 | 2 |\n\n[^1]: First\n\n[^2]: Second"
        );
    }
}
