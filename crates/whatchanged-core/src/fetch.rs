//! Retrieval of remote text documents.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use thiserror::Error;
use tracing::debug;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Why a document could not be fetched.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with a non-success status.
    #[error("{url} returned {status}")]
    Status { url: String, status: StatusCode },

    /// The request never completed.
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Fetches text documents by URL.
pub trait TextSource: Send + Sync {
    /// Fetches the body at `url` as text.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is not a success.
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Blocking HTTP source.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    /// Creates a source whose requests give up after `timeout`.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .user_agent(concat!("whatchanged/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .expect("failed to build HTTP client");

        Self { client }
    }
}

impl Default for HttpSource {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl TextSource for HttpSource {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        debug!(url, "fetching");

        let transport = |source| FetchError::Transport {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        // Release notes are UTF-8 unless the server says otherwise.
        response.text_with_charset("utf-8").map_err(transport)
    }
}

/// In-memory source keyed by URL.
///
/// Unknown URLs answer `404 Not Found`.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: HashMap<String, String>,
}

impl MemorySource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a document.
    #[must_use]
    pub fn with(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.insert(url, body);
        self
    }

    /// Adds or replaces a document.
    pub fn insert(&mut self, url: impl Into<String>, body: impl Into<String>) {
        self.documents.insert(url.into(), body.into());
    }
}

impl TextSource for MemorySource {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.documents
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: StatusCode::NOT_FOUND,
            })
    }
}
