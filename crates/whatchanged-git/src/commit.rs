//! Commits as seen by whatchanged.

use chrono::{DateTime, TimeZone, Utc};

/// A commit in the walked range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCommit {
    /// Full hex object id.
    pub hash: String,
    /// Full message, heading first.
    pub message: String,
    pub date: DateTime<Utc>,
}

impl RawCommit {
    #[must_use]
    pub fn new(
        hash: impl Into<String>,
        message: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            hash: hash.into(),
            message: message.into(),
            date,
        }
    }

    /// The heading: first line of the message.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.message.split('\n').next().unwrap_or_default().trim_end_matches('\r')
    }

    /// Abbreviated hash used in logs.
    #[must_use]
    pub fn short_hash(&self) -> &str {
        self.hash.get(..7).unwrap_or(&self.hash)
    }
}

impl From<&git2::Commit<'_>> for RawCommit {
    fn from(commit: &git2::Commit<'_>) -> Self {
        let date = Utc
            .timestamp_opt(commit.time().seconds(), 0)
            .single()
            .unwrap_or_default();

        Self {
            hash: commit.id().to_string(),
            message: String::from_utf8_lossy(commit.message_bytes()).into_owned(),
            date,
        }
    }
}
