//! Core library for whatchanged.
//!
//! This crate provides release catalog resolution, version ordering and the
//! aggregation of change descriptions across a version range.

mod catalog;
mod error;
mod fetch;
mod range;
mod selector;
mod version;

pub use catalog::{
    Catalog, CatalogResolver, FileMap, ListingEntry, ListingResolver, MANIFEST_FORMAT,
    ManifestResolver, parse_listing, parse_manifest,
};
pub use error::{CoreError, CoreResult, VersionError, VersionResult};
pub use fetch::{DEFAULT_TIMEOUT, FetchError, HttpSource, MemorySource, TextSource};
pub use range::{ChangesInRange, RangeAggregator};
pub use selector::{CHANGES_ROLE, ChangeContent, ChangeRecord, ChangeSelector, NEWS_ROLE};
pub use version::Version;
