//! Effective settings of a run: configuration file plus command-line overrides.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;
use whatchanged_config::{CatalogKind, Config, OutputFormat, load_or_default};
use whatchanged_core::{
    CatalogResolver, ChangeSelector, HttpSource, ListingResolver, ManifestResolver,
    RangeAggregator, TextSource,
};
use whatchanged_links::{LinkFormatter, LinkTargets, Linkifier};

use crate::output::formatter_for;

/// Configuration with command-line overrides applied.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub config: Config,
    pub format: OutputFormat,
}

impl Settings {
    /// Loads the configuration and applies the `--format` override.
    pub fn load(explicit: Option<&Path>, format: Option<OutputFormat>) -> Result<Self> {
        let current_dir = std::env::current_dir().context("failed to read current directory")?;
        let config =
            load_or_default(explicit, &current_dir).context("failed to load configuration")?;

        Ok(Self::new(config, format))
    }

    /// Applies the `--format` override to an already loaded configuration.
    pub fn new(config: Config, format: Option<OutputFormat>) -> Self {
        let format = format.unwrap_or(config.output.format);
        debug!(?format, sources_url = %config.server.sources_url, "effective settings");
        Self { config, format }
    }

    pub fn formatter(&self) -> &'static dyn LinkFormatter {
        formatter_for(self.format)
    }

    /// HTTP source honouring the configured timeout.
    pub fn source(&self) -> Arc<dyn TextSource> {
        Arc::new(HttpSource::new(self.config.server.timeout()))
    }

    /// Builds the aggregator described by the configuration on top of `source`.
    pub fn aggregator(&self, source: Arc<dyn TextSource>) -> RangeAggregator {
        let server = &self.config.server;
        let resolver: Box<dyn CatalogResolver> = match server.catalog {
            CatalogKind::Manifest => Box::new(ManifestResolver::new(
                Arc::clone(&source),
                server.sources_url.clone(),
            )),
            CatalogKind::Listing => Box::new(ListingResolver::new(
                Arc::clone(&source),
                server.sources_url.clone(),
            )),
        };

        let links = &self.config.links;
        let linkifier = Linkifier::new(LinkTargets {
            gitlab_url: links.gitlab_url.clone(),
            namespace: links.namespace.clone(),
            launchpad_url: links.launchpad_url.clone(),
        });

        RangeAggregator::new(
            resolver,
            ChangeSelector::new(source, server.sources_url.clone()),
            linkifier,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use whatchanged_core::{MemorySource, Version};

    #[test]
    fn test_format_override_wins() {
        let settings = Settings::new(Config::default(), Some(OutputFormat::Html));
        assert_eq!(settings.format, OutputFormat::Html);

        let settings = Settings::new(Config::default(), None);
        assert_eq!(settings.format, OutputFormat::Terminal);
    }

    #[test]
    fn test_aggregator_uses_listing_catalog() {
        let mut config = Config::default();
        config.server.sources_url = "https://example.org/sources".to_string();
        config.server.catalog = CatalogKind::Listing;
        config.links.namespace = "World".to_string();
        let settings = Settings::new(config, Some(OutputFormat::Html));

        let source = MemorySource::new()
            .with(
                "https://example.org/sources/foo/",
                r#"<a href="1.0/">1.0/</a>"#,
            )
            .with(
                "https://example.org/sources/foo/1.0/",
                r#"<a href="foo-1.0.news">foo-1.0.news</a>"#,
            )
            .with("https://example.org/sources/foo/1.0/foo-1.0.news", "See !3");

        let aggregator = settings.aggregator(Arc::new(source));
        let start = Version::parse("0.9").unwrap();
        let end = Version::parse("1.0").unwrap();
        let records: Vec<_> = aggregator
            .changes_in_range("foo", &start, &end, settings.formatter())
            .unwrap()
            .collect();

        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].text(),
            r#"See <a href="https://gitlab.gnome.org/World/foo/merge_requests/3">!3</a>"#
        );
    }
}
