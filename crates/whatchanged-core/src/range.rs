//! Changes across a range of versions.

use tracing::debug;
use whatchanged_links::{LinkFormatter, Linkifier};

use crate::catalog::{CatalogResolver, FileMap};
use crate::selector::{ChangeRecord, ChangeSelector};
use crate::{CoreResult, Version};

/// Collects the change descriptions of every version in a range.
pub struct RangeAggregator {
    resolver: Box<dyn CatalogResolver>,
    selector: ChangeSelector,
    linkifier: Linkifier,
}

impl RangeAggregator {
    /// Creates an aggregator.
    #[must_use]
    pub fn new(
        resolver: Box<dyn CatalogResolver>,
        selector: ChangeSelector,
        linkifier: Linkifier,
    ) -> Self {
        Self {
            resolver,
            selector,
            linkifier,
        }
    }

    /// Returns the changes of every version `v` with `start < v <= end`, oldest first.
    ///
    /// The catalog is fetched up front; documents are fetched one at a time as
    /// the returned iterator advances.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be obtained or lists a malformed version.
    pub fn changes_in_range<'a>(
        &'a self,
        project: &str,
        start: &Version,
        end: &Version,
        formatter: &'a dyn LinkFormatter,
    ) -> CoreResult<ChangesInRange<'a>> {
        let catalog = self.resolver.fetch(project)?;

        let mut versions = catalog
            .versions()
            .iter()
            .map(|raw| Version::parse(raw))
            .collect::<Result<Vec<_>, _>>()?;
        versions.retain(|version| version.in_range(start, end));
        versions.sort();

        debug!(
            project,
            %start,
            %end,
            known = catalog.versions().len(),
            selected = versions.len(),
            "resolved version range"
        );

        let pending: Vec<(Version, FileMap)> = versions
            .into_iter()
            .map(|version| {
                let files = catalog.files(version.as_str()).cloned().unwrap_or_default();
                (version, files)
            })
            .collect();

        Ok(ChangesInRange {
            aggregator: self,
            project: project.to_string(),
            formatter,
            pending: pending.into_iter(),
        })
    }
}

/// Iterator returned by [`RangeAggregator::changes_in_range`].
pub struct ChangesInRange<'a> {
    aggregator: &'a RangeAggregator,
    project: String,
    formatter: &'a dyn LinkFormatter,
    pending: std::vec::IntoIter<(Version, FileMap)>,
}

impl ChangesInRange<'_> {
    /// Versions not yet yielded.
    pub fn remaining_versions(&self) -> impl Iterator<Item = &Version> {
        self.pending.as_slice().iter().map(|(version, _)| version)
    }
}

impl Iterator for ChangesInRange<'_> {
    type Item = ChangeRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let (version, files) = self.pending.next()?;
        let project = self.project.as_str();
        let record = self.aggregator.selector.select(project, &version, &files);

        Some(record.map_document(|text| {
            self.aggregator
                .linkifier
                .rewrite(project, &text, self.formatter)
        }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.pending.size_hint()
    }
}

impl ExactSizeIterator for ChangesInRange<'_> {}
