//! Core error types.

use thiserror::Error;

use crate::fetch::FetchError;

/// Errors that invalidate a whole changelog request.
///
/// Failures scoped to a single version never show up here; they degrade into
/// placeholders inside the affected [`ChangeRecord`](crate::ChangeRecord).
#[derive(Debug, Error)]
pub enum CoreError {
    /// The manifest could not be retrieved.
    #[error("unable to fetch the release manifest for {project}")]
    ManifestFetch {
        project: String,
        #[source]
        source: FetchError,
    },

    /// The manifest is not JSON.
    #[error("release manifest for {project} is not valid JSON")]
    ManifestParse {
        project: String,
        #[source]
        source: serde_json::Error,
    },

    /// The manifest is not a format this tool understands.
    #[error("unknown format of the release manifest for {project}: {found}")]
    UnsupportedManifest { project: String, found: String },

    /// One of the positional structures has the wrong shape.
    #[error("malformed {part} in the release manifest for {project}")]
    ManifestShape {
        project: String,
        part: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The manifest does not mention the project.
    #[error("project {project} is not listed in its release manifest")]
    ProjectNotInManifest { project: String },

    /// A directory listing could not be retrieved.
    #[error("unable to fetch the directory listing {url}")]
    ListingFetch {
        url: String,
        #[source]
        source: FetchError,
    },

    /// A version string could not be parsed.
    #[error("version error: {0}")]
    Version(#[from] VersionError),
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Version parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    /// Nothing to compare in the string.
    #[error("malformed version: {0:?}")]
    Malformed(String),
}

/// Result type for version parsing.
pub type VersionResult<T> = Result<T, VersionError>;
