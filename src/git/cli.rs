use crate::error::{DeployError, Result};
use crate::git::{CommitOutcome, StatusEntry, Workspace};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Runs the `git` executable inside a working tree
///
/// Remote operations then go through the user's own git setup: credential
/// helpers, SSH config and proxies apply exactly as on the command line.
pub struct GitCliWorkspace {
    root: PathBuf,
}

impl GitCliWorkspace {
    /// Use the working tree rooted at `path`, which must contain `.git`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.join(".git").exists() {
            return Err(DeployError::not_a_repository(path));
        }

        Ok(GitCliWorkspace {
            root: path.to_path_buf(),
        })
    }

    fn run(&self, args: &[&str]) -> Result<Output> {
        tracing::debug!(?args, root = %self.root.display(), "running git");
        // output is matched against English text
        Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .env("LC_ALL", "C")
            .output()
            .map_err(|e| {
                DeployError::command(format!("Failed to run `git {}`: {}", args.join(" "), e))
            })
    }

    fn run_checked(&self, args: &[&str]) -> Result<Output> {
        let output = self.run(args)?;
        if !output.status.success() {
            return Err(failure(args, &output));
        }
        Ok(output)
    }
}

fn failure(args: &[&str], output: &Output) -> DeployError {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let detail = if stderr.trim().is_empty() {
        stdout.trim().to_string()
    } else {
        stderr.trim().to_string()
    };
    DeployError::command(format!(
        "`git {}` exited with code {}: {}",
        args.join(" "),
        output.status.code().unwrap_or(-1),
        detail
    ))
}

/// Parse `git status --porcelain` output into status entries.
///
/// Lines shorter than the `XY path` layout are skipped.
pub fn parse_short_status(stdout: &str) -> Vec<StatusEntry> {
    stdout
        .lines()
        .filter_map(|line| {
            let mut chars = line.chars();
            let index = chars.next()?;
            let worktree = chars.next()?;
            let path = line.get(3..)?;
            if path.is_empty() {
                return None;
            }
            Some(StatusEntry::new(index, worktree, path))
        })
        .collect()
}

/// Whether `git commit` output says the index had no changes.
fn reports_nothing_to_commit(output: &Output) -> bool {
    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout.contains("nothing to commit") || stdout.contains("no changes added to commit")
}

impl Workspace for GitCliWorkspace {
    fn status(&self) -> Result<Vec<StatusEntry>> {
        let output = self.run_checked(&["status", "--porcelain"])?;
        Ok(parse_short_status(&String::from_utf8_lossy(&output.stdout)))
    }

    fn stage_all(&self) -> Result<()> {
        self.run_checked(&["add", "-A"])?;
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<CommitOutcome> {
        let args = ["commit", "-m", message];
        let output = self.run(&args)?;

        if !output.status.success() {
            if reports_nothing_to_commit(&output) {
                return Ok(CommitOutcome::NothingToCommit);
            }
            return Err(failure(&args, &output));
        }

        let head = self.run_checked(&["rev-parse", "HEAD"])?;
        Ok(CommitOutcome::Created {
            id: String::from_utf8_lossy(&head.stdout).trim().to_string(),
        })
    }

    fn push(&self, remote: &str, branch: &str) -> Result<()> {
        let args = ["push", remote, branch];
        let output = self.run(&args)?;
        if !output.status.success() {
            return Err(DeployError::remote(failure(&args, &output).to_string()));
        }
        Ok(())
    }
}
