//! Catalogs crawled from the release server's directory listings.
//!
//! Older servers have no manifest. The project directory lists one
//! subdirectory per branch (`3.38/`), and each branch lists the release files
//! (`gtk-3.38.1.news`, `gtk-3.38.1.changes`, `gtk-3.38.1.tar.xz`). Directories
//! are recognized by their `[DIR]` icon or a trailing slash.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::debug;

use super::{Catalog, CatalogResolver, FileMap, project_url};
use crate::fetch::TextSource;
use crate::{CoreError, CoreResult};

/// Release file suffixes and the role each one plays.
const ROLE_SUFFIXES: &[(&str, &str)] = &[
    (".news", "news"),
    (".changes", "changes"),
    (".tar.xz", "tar.xz"),
    (".tar.bz2", "tar.bz2"),
    (".tar.gz", "tar.gz"),
];

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    /// Entry name without a trailing slash.
    pub name: String,
    /// Whether the entry is a subdirectory.
    pub is_dir: bool,
}

/// Extracts the entries of an HTML directory listing.
///
/// Sorting links, absolute links and the parent directory are skipped.
pub fn parse_listing(html: &str) -> Vec<ListingEntry> {
    static ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r#"<a\s+href="(?P<href>[^"]+)""#).expect("anchor pattern must be valid")
    });

    let mut entries = Vec::new();
    for line in html.lines() {
        let dir_icon = line.contains("alt=\"[DIR]\"");
        for captures in ANCHOR.captures_iter(line) {
            let href = &captures["href"];
            if href.starts_with(['?', '/', '#']) || href.contains("://") {
                continue;
            }
            let href = href.trim_start_matches("./");
            let name = href.trim_end_matches('/');
            if name.is_empty() || name == ".." {
                continue;
            }
            entries.push(ListingEntry {
                name: name.to_string(),
                is_dir: dir_icon || href.ends_with('/'),
            });
        }
    }

    entries
}

/// Splits `<project>-<version><suffix>` into version and role.
fn classify<'f>(project: &str, file: &'f str) -> Option<(&'f str, &'static str)> {
    let rest = file.strip_prefix(project)?.strip_prefix('-')?;
    ROLE_SUFFIXES.iter().find_map(|(suffix, role)| {
        rest.strip_suffix(*suffix)
            .filter(|version| !version.is_empty())
            .map(|version| (version, *role))
    })
}

/// Crawls directory listings under `<sources_url>/<project>/`.
pub struct ListingResolver {
    source: Arc<dyn TextSource>,
    sources_url: String,
}

impl ListingResolver {
    /// Creates a resolver for the release server rooted at `sources_url`.
    pub fn new(source: Arc<dyn TextSource>, sources_url: impl Into<String>) -> Self {
        Self {
            source,
            sources_url: sources_url.into(),
        }
    }

    fn list(&self, url: &str) -> CoreResult<Vec<ListingEntry>> {
        let html = self
            .source
            .fetch(url)
            .map_err(|source| CoreError::ListingFetch {
                url: url.to_string(),
                source,
            })?;
        Ok(parse_listing(&html))
    }
}

impl CatalogResolver for ListingResolver {
    fn fetch(&self, project: &str) -> CoreResult<Catalog> {
        let root = project_url(&self.sources_url, project);
        let branches = self.list(&format!("{root}/"))?;

        let mut version_files: HashMap<String, FileMap> = HashMap::new();
        let mut branch_files: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for branch in branches.into_iter().filter(|entry| entry.is_dir) {
            let entries = self.list(&format!("{root}/{}/", branch.name))?;
            let files = branch_files.entry(branch.name.clone()).or_default();

            for entry in entries.into_iter().filter(|entry| !entry.is_dir) {
                if let Some((version, role)) = classify(project, &entry.name) {
                    version_files
                        .entry(version.to_string())
                        .or_default()
                        .insert(role.to_string(), format!("{}/{}", branch.name, entry.name));
                }
                files.push(entry.name);
            }
        }

        let versions = version_files.keys().cloned().collect();
        debug!(
            project,
            branches = branch_files.len(),
            versions = version_files.len(),
            "crawled directory listings"
        );

        let mut by_branch = serde_json::Map::new();
        for (branch, files) in branch_files {
            by_branch.insert(branch, files.into());
        }

        Ok(Catalog::new(
            version_files,
            versions,
            serde_json::Value::Object(by_branch),
        ))
    }
}
