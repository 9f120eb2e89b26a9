//! Git history access for whatchanged.
//!
//! This crate provides:
//! - Repository discovery and revision resolution
//! - Commit walking between two revisions
//! - Parsing of package update headings such as `gtk3: 3.24.28 -> 3.24.29`

mod commit;
mod error;
mod repository;
mod update;

pub use commit::RawCommit;
pub use error::{GitError, GitResult};
pub use repository::Repository;
pub use update::PackageUpdate;
