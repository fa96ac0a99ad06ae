//! Pure formatting functions for UI output.
//!
//! Every block the workflow prints is built here as a `String`, so the text
//! can be checked in tests without a terminal. Colors come from `console` and
//! are dropped automatically when stdout is not a terminal.

use std::path::Path;

use console::style;

use crate::boundary::{BoundaryWarning, LikelyCause};
use crate::config::PlatformConfig;
use crate::git::StatusEntry;

/// First line of the output after a successful push.
pub const SUCCESS_BANNER: &str = "Push succeeded";

/// First line of the output after a failed push.
pub const FAILURE_BANNER: &str = "Push failed";

/// Format an error message in red.
pub fn format_error(message: &str) -> String {
    format!("{} {}", style("ERROR:").red(), message)
}

/// Format a success message with green checkmark.
pub fn format_success(message: &str) -> String {
    format!("{} {}", style("✓").green(), message)
}

/// Format a status message with yellow arrow.
pub fn format_status(message: &str) -> String {
    format!("{} {}", style("→").yellow(), message)
}

/// Format a non-fatal warning.
pub fn format_boundary_warning(warning: &BoundaryWarning) -> String {
    format!("{} {}", style("⚠ WARNING:").yellow(), warning)
}

/// Setup guidance shown when the directory is not a working tree root.
pub fn format_not_a_repository(path: &Path, remote: &str, branch: &str) -> String {
    let mut text = String::new();
    text.push_str(&format!(
        "{} is not the root of a git repository.\n",
        path.display()
    ));
    text.push_str("\nSet one up first:\n");
    text.push_str(&format!("  {}\n", style("git init").cyan()));
    text.push_str(&format!(
        "  {}\n",
        style(format!("git remote add {} <repository-url>", remote)).cyan()
    ));
    text.push_str(&format!(
        "  {}\n",
        style(format!("git branch -M {}", branch)).cyan()
    ));
    text.push_str("\nThen run deploy-push again from that directory.\n");
    text
}

/// Short-form listing of pending changes.
///
/// # Arguments
/// * `entries` - Changes reported by the workspace, in listing order
pub fn format_pending_changes(entries: &[StatusEntry]) -> String {
    let mut text = format!("\n{}\n", style("Pending changes:").bold());
    if entries.is_empty() {
        text.push_str("  (working tree clean)\n");
        return text;
    }

    for entry in entries {
        let code = entry.code();
        let styled = if entry.index == '?' {
            style(code).red()
        } else if entry.index != ' ' {
            style(code).green()
        } else {
            style(code).red()
        };
        text.push_str(&format!("  {} {}\n", styled, entry.path));
    }
    text
}

/// The prompt asking for the commit message.
pub fn format_message_prompt(default_message: &str) -> String {
    format!(
        "\n{} [default: {}]: ",
        style("Commit message").bold(),
        default_message
    )
}

/// Confirmation and deployment guidance after a successful push.
///
/// # Arguments
/// * `remote` / `branch` - Push target
/// * `commit` - Abbreviated hash of the commit created in this run, if any
/// * `platform` - Deployment platform the guidance refers to
pub fn format_push_success(
    remote: &str,
    branch: &str,
    commit: Option<&str>,
    platform: &PlatformConfig,
) -> String {
    let mut text = String::new();
    text.push_str(&format!(
        "\n{} {}\n",
        style("✓").green(),
        style(SUCCESS_BANNER).green().bold()
    ));
    match commit {
        Some(id) => text.push_str(&format!(
            "  Commit {} is now on {}/{}\n",
            style(id).cyan(),
            remote,
            branch
        )),
        None => text.push_str(&format!("  {}/{} is up to date\n", remote, branch)),
    }
    text.push_str(&format!(
        "\n{} {} detects the push and deploys automatically.\n",
        style("→").yellow(),
        platform.name
    ));
    text.push_str("\nTo check the deployment status:\n");
    text.push_str(&format!(
        "  1. Open {}\n",
        style(&platform.dashboard_url).cyan()
    ));
    text.push_str("  2. Select your project\n");
    text.push_str("  3. Open the Deployments tab and follow the build logs\n");
    text.push_str(&format!(
        "\nEstimated completion: {}\n",
        style(&platform.estimated_time).bold()
    ));
    text
}

/// Diagnostics after a failed push.
///
/// # Arguments
/// * `remote` / `branch` - Push target
/// * `reason` - Error reported by the push
pub fn format_push_failure(remote: &str, branch: &str, reason: &str) -> String {
    let mut text = String::new();
    text.push_str(&format!(
        "\n{} {}\n",
        style("✗").red(),
        style(FAILURE_BANNER).red().bold()
    ));
    text.push_str(&format!(
        "  Could not push {} to {}: {}\n",
        branch, remote, reason
    ));
    text.push_str("\nLikely causes:\n");
    for (i, cause) in LikelyCause::ALL.iter().enumerate() {
        text.push_str(&format!("  {}. {}\n", i + 1, cause.describe(remote)));
    }
    text.push_str(&format!(
        "\n{} Fix the problem and run deploy-push again.\n",
        style("→").yellow()
    ));
    text
}
