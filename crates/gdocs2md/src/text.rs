//! Text-run rendering and inline joining helpers.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::document::TextRun;

static EMPHASIS_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[*_]").unwrap());

/// Where a text run is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextContext {
    #[default]
    Body,
    /// Headings carry their own weight, so bold is dropped
    Heading,
}

/// Strip newlines and surrounding whitespace
pub fn clean_text(text: &str) -> String {
    text.replace('\n', "").trim().to_string()
}

/// Backslash-escape `*` and `_` so emphasis markers stay unambiguous
pub fn escape_emphasis(text: &str) -> Cow<'_, str> {
    EMPHASIS_CHARS.replace_all(text, r"\${0}")
}

/// Render a text run as Markdown.
///
/// Escaping comes first, then emphasis (italic and underline share `_`),
/// bold, strikethrough, and finally the link, which always wraps outermost.
/// A run with no visible text renders as an empty string.
pub fn render_text_run(run: &TextRun, context: TextContext) -> String {
    let cleaned = clean_text(&run.content);
    if cleaned.is_empty() {
        return String::new();
    }

    let style = &run.text_style;
    let mut text = escape_emphasis(&cleaned).into_owned();

    // Markdown has no underline
    if style.italic || style.underline {
        text = format!("_{text}_");
    }

    if style.bold && context != TextContext::Heading {
        text = format!("**{text}**");
    }

    if style.strikethrough {
        text = format!("~~{text}~~");
    }

    if let Some(url) = style.link_url() {
        return format!("[{text}]({url})");
    }

    text
}

/// Drop the first space before `.` and the first space before `,`
pub fn collapse_punctuation_space(text: &str) -> String {
    text.replacen(" .", ".", 1).replacen(" ,", ",", 1)
}

/// Join rendered inline parts with single spaces, collapse the space in
/// front of punctuation, and trim.
pub fn join_inline<I>(parts: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let joined = parts.into_iter().collect::<Vec<_>>().join(" ");
    collapse_punctuation_space(&joined).trim().to_string()
}
