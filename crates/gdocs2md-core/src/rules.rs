//! Render rules: one pure function per block kind.

use crate::ast::{Block, BlockKind, ListKind};
use crate::options::Options;

/// Writes the body of a block, without trailing spacing
pub type RenderFn = fn(&Block, &Options, &mut String);

/// A rule maps a block kind to the function that renders it
#[derive(Clone, Copy)]
pub struct Rule {
    /// Kind of block this rule applies to
    pub kind: BlockKind,
    /// Replacement function that generates Markdown
    pub replacement: RenderFn,
}

impl Rule {
    const fn new(kind: BlockKind, replacement: RenderFn) -> Self {
        Self { kind, replacement }
    }

    /// Apply this rule's replacement
    pub fn render(&self, block: &Block, options: &Options, out: &mut String) {
        (self.replacement)(block, options, out)
    }
}

/// Built-in rules, one per block kind
pub static RULES: [Rule; 8] = [
    Rule::new(BlockKind::Heading, heading),
    Rule::new(BlockKind::Paragraph, paragraph),
    Rule::new(BlockKind::BlockQuote, blockquote),
    Rule::new(BlockKind::UnorderedList, list),
    Rule::new(BlockKind::OrderedList, list),
    Rule::new(BlockKind::Image, image),
    Rule::new(BlockKind::Table, table),
    Rule::new(BlockKind::Footnote, footnote),
];

/// Find the rule for a block kind
pub fn rule_for(kind: BlockKind) -> Option<&'static Rule> {
    RULES.iter().find(|rule| rule.kind == kind)
}

fn heading(block: &Block, _: &Options, out: &mut String) {
    if let Block::Heading { level, text } = block {
        for _ in 0..*level {
            out.push('#');
        }
        out.push(' ');
        out.push_str(text);
    }
}

fn paragraph(block: &Block, _: &Options, out: &mut String) {
    if let Block::Paragraph(text) = block {
        out.push_str(text);
    }
}

fn blockquote(block: &Block, _: &Options, out: &mut String) {
    if let Block::BlockQuote(text) = block {
        out.push_str("> ");
        out.push_str(text);
    }
}

fn list(block: &Block, _: &Options, out: &mut String) {
    let Block::List { kind, items } = block else {
        return;
    };

    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        match kind {
            ListKind::Unordered => out.push_str(" - "),
            ListKind::Ordered => {
                out.push_str(&(i + 1).to_string());
                out.push_str(". ");
            }
        }
        out.push_str(&item.to_markdown(*kind));
    }
}

fn image(block: &Block, _: &Options, out: &mut String) {
    if let Block::Image(image) = block {
        out.push_str(&image.to_markdown());
    }
}

fn table(block: &Block, _: &Options, out: &mut String) {
    let Block::Table(table) = block else {
        return;
    };

    out.push_str("| ");
    out.push_str(&table.headers.join(" | "));
    out.push_str(" |\n| ");
    out.push_str(&vec!["---"; table.headers.len()].join(" | "));
    out.push_str(" |");

    for row in &table.rows {
        out.push_str("\n| ");
        out.push_str(&row.join(" | "));
        out.push_str(" |");
    }
}

fn footnote(block: &Block, _: &Options, out: &mut String) {
    if let Block::Footnote(footnote) = block {
        out.push_str("[^");
        out.push_str(&footnote.number);
        out.push_str("]: ");
        out.push_str(&footnote.text);
    }
}
