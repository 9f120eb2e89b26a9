//! Git error types.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitError {
    /// Neither the path nor any of its parents is a repository.
    #[error("not a git repository: {}", .0.display())]
    NotARepo(PathBuf),

    /// The revision does not name a commit.
    #[error("revision not found: {0}")]
    RevisionNotFound(String),

    #[error("git error: {0}")]
    Git2(#[from] git2::Error),
}

pub type GitResult<T> = Result<T, GitError>;
