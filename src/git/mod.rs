//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the handful of Git
//! operations deploy-push performs, so the workflow can run against a real
//! repository or a mock.
//!
//! # Overview
//!
//! The primary abstraction is the [Workspace] trait. The implementations are:
//!
//! - [repository::Git2Workspace]: in-process implementation using the `git2` crate
//! - [cli::GitCliWorkspace]: shells out to the `git` executable
//! - [mock::MockWorkspace]: records calls, for testing
//!
//! [open_workspace] performs the repository precondition check and picks the
//! implementation configured in [crate::config::Backend].
//!
//! ```rust,no_run
//! # use deploy_push::config::Backend;
//! # use deploy_push::git::{open_workspace, Workspace};
//! # fn example() -> deploy_push::Result<()> {
//! let workspace = open_workspace(std::path::Path::new("."), Backend::Libgit2)?;
//! for entry in workspace.status()? {
//!     println!("{}", entry);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod mock;
pub mod repository;

pub use cli::GitCliWorkspace;
pub use mock::{MockCall, MockWorkspace};
pub use repository::Git2Workspace;

use std::fmt;
use std::path::Path;

use crate::config::Backend;
use crate::error::Result;

/// One line of the short-form status listing
///
/// `index` and `worktree` are the two status columns of `git status --short`
/// (`' '` when unchanged, `'?'` twice for untracked files).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub index: char,
    pub worktree: char,
    pub path: String,
}

impl StatusEntry {
    pub fn new(index: char, worktree: char, path: impl Into<String>) -> Self {
        StatusEntry {
            index,
            worktree,
            path: path.into(),
        }
    }

    /// Short status code, e.g. `"M "`, `" D"`, `"??"`
    pub fn code(&self) -> String {
        format!("{}{}", self.index, self.worktree)
    }
}

impl fmt::Display for StatusEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{} {}", self.index, self.worktree, self.path)
    }
}

/// What the commit step did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// A new commit was written; `id` is its full hash
    Created { id: String },
    /// The index matched HEAD, no commit was written
    NothingToCommit,
}

impl CommitOutcome {
    /// Abbreviated hash of the created commit, if any
    pub fn short_id(&self) -> Option<&str> {
        match self {
            CommitOutcome::Created { id } => Some(&id[..id.len().min(7)]),
            CommitOutcome::NothingToCommit => None,
        }
    }
}

/// Git operations used by the deploy workflow
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations map their
/// underlying failures (`git2::Error`, non-zero `git` exits) onto
/// [crate::error::DeployError] variants. The workflow treats every error
/// from this trait as non-fatal.
pub trait Workspace {
    /// List working tree changes relative to the last commit
    ///
    /// Ignored files are excluded, untracked files are included.
    fn status(&self) -> Result<Vec<StatusEntry>>;

    /// Stage every new, modified and deleted file
    fn stage_all(&self) -> Result<()>;

    /// Commit the index with `message`
    ///
    /// # Returns
    /// * `Ok(CommitOutcome::Created)` - A commit was written on top of HEAD
    /// * `Ok(CommitOutcome::NothingToCommit)` - The index matches HEAD
    /// * `Err` - If the commit could not be written
    fn commit(&self, message: &str) -> Result<CommitOutcome>;

    /// Push local `branch` to `branch` on `remote`
    ///
    /// # Returns
    /// * `Ok(())` - The remote accepted the update (or was already up to date)
    /// * `Err` - Authentication, remote lookup, network or rejection failure
    fn push(&self, remote: &str, branch: &str) -> Result<()>;
}

/// Open the working tree rooted at `path` with the configured backend
///
/// # Returns
/// * `Ok(workspace)` - `path` is the root of a Git working tree
/// * `Err(DeployError::NotARepository)` - It is not; nothing has been touched
pub fn open_workspace(path: &Path, backend: Backend) -> Result<Box<dyn Workspace>> {
    tracing::debug!(path = %path.display(), ?backend, "opening workspace");
    let workspace: Box<dyn Workspace> = match backend {
        Backend::Libgit2 => Box::new(Git2Workspace::open(path)?),
        Backend::GitCli => Box::new(GitCliWorkspace::open(path)?),
    };
    Ok(workspace)
}
