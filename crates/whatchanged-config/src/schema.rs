//! Configuration schema.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, ConfigResult};

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Release server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Hyperlink targets.
    #[serde(default)]
    pub links: LinksConfig,

    /// Output configuration.
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Checks values that parse but make no sense.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending key.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "server.timeout_secs must be positive".to_string(),
            ));
        }

        let required = [
            ("server.sources_url", &self.server.sources_url),
            ("links.gitlab_url", &self.links.gitlab_url),
            ("links.namespace", &self.links.namespace),
            ("links.launchpad_url", &self.links.launchpad_url),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{key} must not be empty")));
            }
        }

        Ok(())
    }
}

/// How the list of published versions is obtained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKind {
    /// The consolidated `cache.json` manifest.
    #[default]
    Manifest,
    /// Crawling the server's directory listings.
    Listing,
}

/// Release server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Root of the release server.
    #[serde(default = "default_sources_url")]
    pub sources_url: String,

    /// Catalog source.
    #[serde(default)]
    pub catalog: CatalogKind,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ServerConfig {
    /// Per-request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            sources_url: default_sources_url(),
            catalog: CatalogKind::default(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_sources_url() -> String {
    "https://download.gnome.org/sources".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Where references in release notes point to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinksConfig {
    /// GitLab instance hosting the projects.
    #[serde(default = "default_gitlab_url")]
    pub gitlab_url: String,

    /// Group that projects live under.
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Launchpad bug tracker.
    #[serde(default = "default_launchpad_url")]
    pub launchpad_url: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            gitlab_url: default_gitlab_url(),
            namespace: default_namespace(),
            launchpad_url: default_launchpad_url(),
        }
    }
}

fn default_gitlab_url() -> String {
    "https://gitlab.gnome.org".to_string()
}

fn default_namespace() -> String {
    "GNOME".to_string()
}

fn default_launchpad_url() -> String {
    "https://bugs.launchpad.net/launchpad/+bug".to_string()
}

/// How hyperlinks are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Labels only.
    Plain,
    /// OSC 8 terminal hyperlinks.
    #[default]
    Terminal,
    /// HTML anchors.
    Html,
}

/// Output configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Hyperlink rendering.
    #[serde(default)]
    pub format: OutputFormat,
}
