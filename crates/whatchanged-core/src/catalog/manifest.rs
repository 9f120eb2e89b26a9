//! Catalogs read from the consolidated `cache.json` manifest.
//!
//! The manifest is a JSON array with exactly four elements:
//! `[format, version_files, versions, branch_files]`, where the last three are
//! objects keyed by project name.

use std::collections::HashMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::{Catalog, CatalogResolver, FileMap, project_url};
use crate::fetch::TextSource;
use crate::{CoreError, CoreResult};

/// The only manifest format understood.
pub const MANIFEST_FORMAT: u64 = 4;

/// Reads catalogs from `<sources_url>/<project>/cache.json`.
pub struct ManifestResolver {
    source: Arc<dyn TextSource>,
    sources_url: String,
}

impl ManifestResolver {
    /// Creates a resolver for the release server rooted at `sources_url`.
    pub fn new(source: Arc<dyn TextSource>, sources_url: impl Into<String>) -> Self {
        Self {
            source,
            sources_url: sources_url.into(),
        }
    }

    /// Returns the manifest URL for `project`.
    #[must_use]
    pub fn manifest_url(&self, project: &str) -> String {
        format!("{}/cache.json", project_url(&self.sources_url, project))
    }
}

impl CatalogResolver for ManifestResolver {
    fn fetch(&self, project: &str) -> CoreResult<Catalog> {
        let url = self.manifest_url(project);
        let body = self
            .source
            .fetch(&url)
            .map_err(|source| CoreError::ManifestFetch {
                project: project.to_string(),
                source,
            })?;

        if body.trim().is_empty() {
            warn!(%url, "release manifest is empty, assuming no releases");
            return Ok(Catalog::default());
        }

        let catalog = parse_manifest(project, &body)?;
        debug!(project, versions = catalog.versions().len(), "loaded manifest");
        Ok(catalog)
    }
}

/// Parses a manifest document and extracts the catalog of `project`.
///
/// # Errors
///
/// Returns an error unless the document is a four-element array starting with
/// [`MANIFEST_FORMAT`] whose remaining elements have the expected shape and
/// mention `project`.
pub fn parse_manifest(project: &str, body: &str) -> CoreResult<Catalog> {
    let document: Value =
        serde_json::from_str(body).map_err(|source| CoreError::ManifestParse {
            project: project.to_string(),
            source,
        })?;

    let unsupported = |found: String| CoreError::UnsupportedManifest {
        project: project.to_string(),
        found,
    };

    let Value::Array(parts) = document else {
        return Err(unsupported(describe(&document)));
    };
    let [format, version_files, versions, branch_files]: [Value; 4] = parts
        .try_into()
        .map_err(|parts: Vec<Value>| unsupported(format!("array of {} elements", parts.len())))?;

    if format.as_u64() != Some(MANIFEST_FORMAT) {
        return Err(unsupported(format!("format tag {format}")));
    }

    let mut version_files: HashMap<String, HashMap<String, FileMap>> =
        positional(project, "version file map", version_files)?;
    let mut versions: HashMap<String, Vec<String>> =
        positional(project, "version list", versions)?;
    let mut branch_files: HashMap<String, Value> =
        positional(project, "branch file map", branch_files)?;

    let not_listed = || CoreError::ProjectNotInManifest {
        project: project.to_string(),
    };
    let version_files = version_files.remove(project).ok_or_else(not_listed)?;
    let versions = versions.remove(project).ok_or_else(not_listed)?;
    let branch_files = branch_files.remove(project).unwrap_or(Value::Null);

    Ok(Catalog::new(version_files, versions, branch_files))
}

fn positional<T: DeserializeOwned>(project: &str, part: &'static str, value: Value) -> CoreResult<T> {
    serde_json::from_value(value).map_err(|source| CoreError::ManifestShape {
        project: project.to_string(),
        part,
        source,
    })
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
    .to_string()
}
