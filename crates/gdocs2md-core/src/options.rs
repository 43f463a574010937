//! Configuration options for Markdown rendering

/// Options for Markdown rendering
#[derive(Debug, Clone)]
pub struct Options {
    /// Write the title / last-edited header when metadata carries a title.
    /// The hybrid renderer ignores this and never writes the header.
    pub title_header: bool,

    /// Horizontal rule line closing the title header
    pub hr: String,

    /// Label in front of the last-modified date
    pub last_edited_label: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            title_header: true,
            hr: "---".to_string(),
            last_edited_label: "Last Edited".to_string(),
        }
    }
}
