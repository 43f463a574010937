//! Document metadata passed alongside the content blocks

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Title and last-modified date of a document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default)]
    pub title: Option<String>,

    /// Date formatted as `MM/DD/YYYY`
    #[serde(default)]
    pub last_modified: Option<String>,
}

impl Metadata {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            last_modified: None,
        }
    }

    pub fn with_last_modified(mut self, date: impl Into<String>) -> Self {
        self.last_modified = Some(date.into());
        self
    }

    /// Build metadata from a title and an RFC 3339 modification timestamp,
    /// such as the Drive `modifiedTime` field.
    ///
    /// The date is taken in UTC. A timestamp that does not parse leaves
    /// `last_modified` unset.
    pub fn from_modified_time(title: impl Into<String>, modified_time: Option<&str>) -> Self {
        let last_modified = modified_time.and_then(|raw| match DateTime::parse_from_rfc3339(raw) {
            Ok(time) => Some(time.with_timezone(&Utc).format("%m/%d/%Y").to_string()),
            Err(error) => {
                tracing::warn!(%error, modified_time = raw, "Ignoring unparsable modification time");
                None
            }
        });

        Self {
            title: Some(title.into()),
            last_modified,
        }
    }

    /// Title, when present and non-empty
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }

    /// Last-modified date, when present and non-empty
    pub fn last_modified(&self) -> Option<&str> {
        self.last_modified.as_deref().filter(|d| !d.is_empty())
    }
}
