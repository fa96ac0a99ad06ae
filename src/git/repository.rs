use crate::error::{DeployError, Result};
use crate::git::{CommitOutcome, StatusEntry, Workspace};
use git2::{Commit, ErrorCode, IndexAddOption, Repository as Git2Repo, Status, StatusOptions};
use std::path::Path;

/// Key files tried, in order, for SSH authentication.
const SSH_KEY_FILES: [&str; 3] = ["id_ed25519", "id_rsa", "id_ecdsa"];

/// Credential callback invocations allowed before giving up on a push.
const MAX_CREDENTIAL_ATTEMPTS: usize = 4;

/// Wrapper around git2::Repository implementing [Workspace]
pub struct Git2Workspace {
    repo: Git2Repo,
}

impl Git2Workspace {
    /// Open the working tree rooted exactly at `path`
    ///
    /// Parent directories are not searched. Bare repositories and the `.git`
    /// directory itself are refused: the working tree must start at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = match Git2Repo::open(path) {
            Ok(repo) => repo,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "not a repository");
                return Err(DeployError::not_a_repository(path));
            }
        };

        let rooted_here = match (repo.workdir(), path.canonicalize()) {
            (Some(workdir), Ok(requested)) => workdir
                .canonicalize()
                .map(|workdir| workdir == requested)
                .unwrap_or(false),
            _ => false,
        };
        if !rooted_here {
            tracing::debug!(path = %path.display(), "not the root of a working tree");
            return Err(DeployError::not_a_repository(path));
        }

        Ok(Git2Workspace { repo })
    }

    fn head_commit(&self) -> Result<Option<Commit<'_>>> {
        match self.repo.head() {
            Ok(head) => Ok(Some(head.peel_to_commit()?)),
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Map a libgit2 status to the two `git status --short` columns.
///
/// Returns `None` for entries the short listing leaves out.
pub fn status_columns(status: Status) -> Option<(char, char)> {
    if status.is_ignored() {
        return None;
    }
    if status.is_conflicted() {
        return Some(('U', 'U'));
    }

    let index = if status.is_index_new() {
        'A'
    } else if status.is_index_modified() {
        'M'
    } else if status.is_index_deleted() {
        'D'
    } else if status.is_index_renamed() {
        'R'
    } else if status.is_index_typechange() {
        'T'
    } else {
        ' '
    };

    if status.is_wt_new() && index == ' ' {
        return Some(('?', '?'));
    }

    let worktree = if status.is_wt_modified() {
        'M'
    } else if status.is_wt_deleted() {
        'D'
    } else if status.is_wt_renamed() {
        'R'
    } else if status.is_wt_typechange() {
        'T'
    } else {
        ' '
    };

    if index == ' ' && worktree == ' ' {
        None
    } else {
        Some((index, worktree))
    }
}

impl Workspace for Git2Workspace {
    fn status(&self) -> Result<Vec<StatusEntry>> {
        let mut options = StatusOptions::new();
        options
            .include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);

        let statuses = self.repo.statuses(Some(&mut options))?;

        let entries = statuses
            .iter()
            .filter_map(|entry| {
                let (index, worktree) = status_columns(entry.status())?;
                let path = String::from_utf8_lossy(entry.path_bytes()).into_owned();
                Some(StatusEntry::new(index, worktree, path))
            })
            .collect();

        Ok(entries)
    }

    fn stage_all(&self) -> Result<()> {
        let mut index = self.repo.index()?;

        // add_all picks up new and modified files, update_all drops deleted ones
        index.add_all(["*"].iter(), IndexAddOption::DEFAULT, None)?;
        index.update_all(["*"].iter(), None)?;
        index.write()?;

        tracing::debug!(entries = index.len(), "staged working tree");
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<CommitOutcome> {
        let mut index = self.repo.index()?;
        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;

        let parent = self.head_commit()?;
        let unchanged = match &parent {
            Some(commit) => commit.tree_id() == tree_id,
            None => tree.is_empty(),
        };
        if unchanged {
            tracing::debug!("index matches HEAD, skipping commit");
            return Ok(CommitOutcome::NothingToCommit);
        }

        let signature = self.repo.signature()?;
        let parents: Vec<&Commit<'_>> = parent.iter().collect();
        let oid = self
            .repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)?;

        tracing::debug!(%oid, "created commit");
        Ok(CommitOutcome::Created {
            id: oid.to_string(),
        })
    }

    fn push(&self, remote_name: &str, branch: &str) -> Result<()> {
        let mut remote = match self.repo.find_remote(remote_name) {
            Ok(remote) => remote,
            Err(_) => {
                return Err(DeployError::remote(format!(
                    "No remote named '{}' found",
                    remote_name
                )))
            }
        };
        let git_config = self.repo.config()?;

        let mut callbacks = git2::RemoteCallbacks::new();
        let mut attempts = 0;
        callbacks.credentials(move |url, username_from_url, allowed_types| {
            attempts += 1;
            if attempts > MAX_CREDENTIAL_ATTEMPTS {
                return Err(git2::Error::from_str("no usable credentials found"));
            }
            let username = username_from_url.unwrap_or("git");

            if allowed_types.contains(git2::CredentialType::SSH_KEY) {
                if let Some(home) = dirs::home_dir() {
                    for key_file in SSH_KEY_FILES {
                        let key_path = home.join(".ssh").join(key_file);
                        if key_path.exists() {
                            if let Ok(cred) = git2::Cred::ssh_key(username, None, &key_path, None)
                            {
                                return Ok(cred);
                            }
                        }
                    }
                }

                if let Ok(cred) = git2::Cred::ssh_key_from_agent(username) {
                    return Ok(cred);
                }
            }

            if allowed_types.contains(git2::CredentialType::USER_PASS_PLAINTEXT) {
                if let Ok(cred) = git2::Cred::credential_helper(&git_config, url, username_from_url)
                {
                    return Ok(cred);
                }
            }

            git2::Cred::default()
        });

        callbacks.push_update_reference(|refname, status| {
            if let Some(status) = status {
                tracing::warn!(refname, status, "remote rejected reference update");
                Err(git2::Error::from_str(&format!(
                    "Remote rejected {}: {}",
                    refname, status
                )))
            } else {
                Ok(())
            }
        });

        let mut push_options = git2::PushOptions::new();
        push_options.remote_callbacks(callbacks);

        let refspec = format!("refs/heads/{0}:refs/heads/{0}", branch);
        tracing::debug!(remote = remote_name, %refspec, "pushing");

        match remote.push(&[refspec.as_str()], Some(&mut push_options)) {
            Ok(()) => Ok(()),
            Err(e) => {
                if e.code() == ErrorCode::Auth {
                    Err(DeployError::remote(format!("Authentication failed: {}", e)))
                } else if e.class() == git2::ErrorClass::Net {
                    Err(DeployError::remote(format!("Network error during push: {}", e)))
                } else if e.class() == git2::ErrorClass::Reference {
                    Err(DeployError::remote(format!("Reference error during push: {}", e)))
                } else {
                    Err(DeployError::remote(format!(
                        "Failed to push '{}' to '{}': {}",
                        branch, remote_name, e
                    )))
                }
            }
        }
    }
}
