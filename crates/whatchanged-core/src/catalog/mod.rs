//! Release catalogs: which versions a project published and which files belong to each.

mod listing;
mod manifest;

use std::collections::{BTreeMap, HashMap};

use tracing::warn;

use crate::CoreResult;

pub use listing::{ListingEntry, ListingResolver, parse_listing};
pub use manifest::{MANIFEST_FORMAT, ManifestResolver, parse_manifest};

/// Files published for one version, keyed by role (`news`, `changes`, `tar.xz`, ...).
///
/// File names are relative to the project directory on the release server.
pub type FileMap = BTreeMap<String, String>;

/// Everything the release server knows about one project.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    version_files: HashMap<String, FileMap>,
    versions: Vec<String>,
    branch_files: serde_json::Value,
}

impl Catalog {
    /// Creates a catalog.
    ///
    /// `versions` is taken in whatever order the server listed it.
    #[must_use]
    pub fn new(
        version_files: HashMap<String, FileMap>,
        versions: Vec<String>,
        branch_files: serde_json::Value,
    ) -> Self {
        let catalog = Self {
            version_files,
            versions,
            branch_files,
        };

        let orphans = catalog.orphaned_versions();
        if !orphans.is_empty() {
            warn!(?orphans, "catalog lists files for unknown versions");
        }

        catalog
    }

    /// All known versions, unsorted.
    #[must_use]
    pub fn versions(&self) -> &[String] {
        &self.versions
    }

    /// Files published for `version`, if any.
    #[must_use]
    pub fn files(&self, version: &str) -> Option<&FileMap> {
        self.version_files.get(version)
    }

    /// Per-branch file lists, in whatever shape the server provided.
    #[must_use]
    pub fn branch_files(&self) -> &serde_json::Value {
        &self.branch_files
    }

    /// Whether the catalog knows no versions at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Versions that have files but are missing from the version list.
    fn orphaned_versions(&self) -> Vec<&str> {
        let mut orphans: Vec<&str> = self
            .version_files
            .keys()
            .filter(|version| !self.versions.contains(version))
            .map(String::as_str)
            .collect();
        orphans.sort_unstable();
        orphans
    }
}

/// Obtains the catalog of a project.
pub trait CatalogResolver: Send + Sync {
    /// Fetches the catalog for `project`.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be retrieved or is not understood.
    fn fetch(&self, project: &str) -> CoreResult<Catalog>;
}

/// Joins the server root and a project directory.
pub(crate) fn project_url(sources_url: &str, project: &str) -> String {
    format!("{}/{project}", sources_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(pairs: &[(&str, &str)]) -> FileMap {
        pairs
            .iter()
            .map(|(role, file)| ((*role).to_string(), (*file).to_string()))
            .collect()
    }

    #[test]
    fn test_accessors() {
        let mut version_files = HashMap::new();
        version_files.insert(
            "1.0".to_string(),
            files(&[("news", "1.0/foo-1.0.news")]),
        );
        let catalog = Catalog::new(
            version_files,
            vec!["1.0".to_string()],
            serde_json::Value::Null,
        );

        assert!(!catalog.is_empty());
        assert_eq!(catalog.versions(), ["1.0"]);
        assert_eq!(
            catalog.files("1.0").and_then(|f| f.get("news")).map(String::as_str),
            Some("1.0/foo-1.0.news")
        );
        assert!(catalog.files("2.0").is_none());
    }

    #[test]
    fn test_orphaned_versions() {
        let mut version_files = HashMap::new();
        version_files.insert("1.0".to_string(), FileMap::new());
        version_files.insert("0.9".to_string(), FileMap::new());
        let catalog = Catalog::new(
            version_files,
            vec!["1.0".to_string()],
            serde_json::Value::Null,
        );
        assert_eq!(catalog.orphaned_versions(), ["0.9"]);
    }

    #[test]
    fn test_project_url_trims_slash() {
        assert_eq!(
            project_url("https://download.gnome.org/sources/", "gtk"),
            "https://download.gnome.org/sources/gtk"
        );
    }

    #[test]
    fn test_default_is_empty() {
        assert!(Catalog::default().is_empty());
    }
}
