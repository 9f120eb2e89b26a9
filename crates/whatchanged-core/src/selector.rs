//! Picking and fetching the change description of a single version.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::Version;
use crate::catalog::{FileMap, project_url};
use crate::fetch::TextSource;

/// Role of hand-written release notes.
pub const NEWS_ROLE: &str = "news";

/// Role of notes generated from the commit log.
pub const CHANGES_ROLE: &str = "changes";

/// What was found for a version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeContent {
    /// The document text.
    Document(String),
    /// A document exists but could not be retrieved.
    FetchFailed,
    /// The version has neither news nor changes.
    NoDocument,
}

/// The change description of one version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    /// The version described.
    pub version: Version,
    /// Where the document lives, if one was selected.
    pub source_url: Option<String>,
    /// The document or a placeholder.
    pub content: ChangeContent,
}

impl ChangeRecord {
    /// Returns the document text or a human-readable placeholder.
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        match &self.content {
            ChangeContent::Document(text) => Cow::Borrowed(text),
            ChangeContent::FetchFailed => Cow::Borrowed("Unable to fetch"),
            ChangeContent::NoDocument => Cow::Owned(format!(
                "No file describing changes found for version “{}”",
                self.version
            )),
        }
    }

    /// Transforms the document text, leaving placeholders alone.
    #[must_use]
    pub fn map_document(mut self, f: impl FnOnce(String) -> String) -> Self {
        if let ChangeContent::Document(text) = self.content {
            self.content = ChangeContent::Document(f(text));
        }
        self
    }
}

impl fmt::Display for ChangeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source_url {
            Some(url) => write!(f, "({url})\n{}", self.text()),
            None => f.write_str(&self.text()),
        }
    }
}

/// Picks the best change description among a version's files and fetches it.
///
/// Hand-written news wins over generated changes. Failures only affect the
/// returned record.
pub struct ChangeSelector {
    source: Arc<dyn TextSource>,
    sources_url: String,
}

impl ChangeSelector {
    /// Creates a selector fetching from the release server rooted at `sources_url`.
    pub fn new(source: Arc<dyn TextSource>, sources_url: impl Into<String>) -> Self {
        Self {
            source,
            sources_url: sources_url.into(),
        }
    }

    /// Selects and fetches the change description of `version`.
    pub fn select(&self, project: &str, version: &Version, files: &FileMap) -> ChangeRecord {
        let document = [NEWS_ROLE, CHANGES_ROLE]
            .into_iter()
            .filter_map(|role| files.get(role))
            .find(|file| !file.is_empty());

        let Some(file) = document else {
            debug!(project, %version, "no news or changes published");
            return ChangeRecord {
                version: version.clone(),
                source_url: None,
                content: ChangeContent::NoDocument,
            };
        };

        let url = format!("{}/{file}", project_url(&self.sources_url, project));
        let content = match self.source.fetch(&url) {
            Ok(text) if text.is_empty() => {
                warn!(project, %version, %url, "change description is empty");
                ChangeContent::FetchFailed
            }
            Ok(text) => ChangeContent::Document(text),
            Err(err) => {
                warn!(project, %version, error = %err, "unable to fetch change description");
                ChangeContent::FetchFailed
            }
        };

        ChangeRecord {
            version: version.clone(),
            source_url: Some(url),
            content,
        }
    }
}
