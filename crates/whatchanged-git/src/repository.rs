//! Git repository wrapper.

use std::path::Path;

use git2::{Commit, Repository as Git2Repo, Sort};
use tracing::debug;

use crate::{GitError, GitResult, RawCommit};

/// A Git repository wrapper.
pub struct Repository {
    inner: Git2Repo,
}

impl Repository {
    /// Opens a repository at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not a valid Git repository.
    pub fn open(path: impl AsRef<Path>) -> GitResult<Self> {
        let path = path.as_ref();
        let inner = Git2Repo::open(path).map_err(|_| GitError::NotARepo(path.to_path_buf()))?;
        Ok(Self { inner })
    }

    /// Discovers the repository containing the given directory.
    ///
    /// # Errors
    ///
    /// Returns an error if no repository is found.
    pub fn discover(path: impl AsRef<Path>) -> GitResult<Self> {
        let path = path.as_ref();
        let inner =
            Git2Repo::discover(path).map_err(|_| GitError::NotARepo(path.to_path_buf()))?;
        Ok(Self { inner })
    }

    /// Returns the repository root path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.inner.workdir().unwrap_or_else(|| self.inner.path())
    }

    fn resolve(&self, revision: &str) -> GitResult<Commit<'_>> {
        self.inner
            .revparse_single(revision)
            .and_then(|object| object.peel_to_commit())
            .map_err(|_| GitError::RevisionNotFound(revision.to_string()))
    }

    /// Returns the commits from `end` back to and including `start`, newest first.
    ///
    /// Commits reachable from a parent of `start` are excluded. The walk is
    /// topological, so a commit never precedes one of its descendants.
    ///
    /// # Errors
    ///
    /// Returns an error if a revision cannot be resolved or the history cannot be read.
    pub fn commits_between(&self, start: &str, end: &str) -> GitResult<Vec<RawCommit>> {
        let start = self.resolve(start)?;
        let end = self.resolve(end)?;

        let mut revwalk = self.inner.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL)?;
        revwalk.push(end.id())?;
        for parent in start.parent_ids() {
            revwalk.hide(parent)?;
        }

        let commits = revwalk
            .map(|oid| -> GitResult<RawCommit> {
                let commit = self.inner.find_commit(oid?)?;
                Ok(RawCommit::from(&commit))
            })
            .collect::<GitResult<Vec<_>>>()?;

        debug!(
            start = %start.id(),
            end = %end.id(),
            count = commits.len(),
            "walked commit range"
        );

        Ok(commits)
    }
}
