//! Main workflow orchestration logic
//!
//! Runs the deploy steps in order against any [Workspace]: show pending
//! changes, acquire the commit message, stage, commit, push, report. The
//! repository precondition is checked before this module is reached, when
//! the workspace is opened.

use std::io::{BufRead, Write};

use anyhow::Result;
use chrono::{Local, NaiveDateTime};

use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::git::{CommitOutcome, Workspace};
use crate::message::{default_commit_message, resolve_commit_message};
use crate::ui;

/// Arguments for the deploy workflow
///
/// Mirrors the CLI Args but in a format suitable for orchestration logic,
/// so the workflow can be called programmatically without clap.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeployWorkflowArgs {
    /// Commit message response given up front; the prompt is skipped
    pub message: Option<String>,
}

/// What one run of the workflow did
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// The commit message that was used
    pub message: String,

    /// Outcome of the commit step, `None` if it errored
    pub commit: Option<CommitOutcome>,

    /// Whether the push succeeded
    pub pushed: bool,
}

/// Main deploy workflow, stamped with the current local time
///
/// See [run_deploy_workflow_at].
pub fn run_deploy_workflow<W, R, O>(
    workspace: &W,
    config: &Config,
    args: &DeployWorkflowArgs,
    input: &mut R,
    out: &mut O,
) -> Result<WorkflowResult>
where
    W: Workspace + ?Sized,
    R: BufRead,
    O: Write,
{
    let now = Local::now().naive_local();
    run_deploy_workflow_at(workspace, config, args, input, out, now)
}

/// Main deploy workflow
///
/// Orchestrates the whole commit-and-push run:
/// 1. Display pending changes
/// 2. Acquire the commit message (prompt, or `args.message`)
/// 3. Stage all changes
/// 4. Commit
/// 5. Push to the configured remote branch
/// 6. Report success guidance or failure diagnostics
///
/// Git failures never abort the run; they are reported on `out` and the
/// next step runs regardless. Only I/O errors on `input`/`out` are returned.
///
/// # Arguments
///
/// * `workspace` - Opened working tree
/// * `config` - Push target, message label and platform guidance
/// * `args` - Workflow arguments
/// * `input` / `out` - Operator console
/// * `now` - Local time used for the default commit message
pub fn run_deploy_workflow_at<W, R, O>(
    workspace: &W,
    config: &Config,
    args: &DeployWorkflowArgs,
    input: &mut R,
    out: &mut O,
    now: NaiveDateTime,
) -> Result<WorkflowResult>
where
    W: Workspace + ?Sized,
    R: BufRead,
    O: Write,
{
    let remote = config.remote.name.as_str();
    let branch = config.remote.branch.as_str();
    let label = config.commit.default_label.as_str();

    match workspace.status() {
        Ok(entries) => write!(out, "{}", ui::format_pending_changes(&entries))?,
        Err(e) => report_warning(
            out,
            BoundaryWarning::StatusUnavailable {
                reason: e.to_string(),
            },
        )?,
    }

    let response = match &args.message {
        Some(message) => message.clone(),
        None => {
            let prompt = ui::format_message_prompt(&default_commit_message(label, now));
            ui::prompt_line(input, out, &prompt)?
        }
    };
    let message = resolve_commit_message(&response, label, now);
    writeln!(
        out,
        "\n{}",
        ui::format_status(&format!("Commit message: {}", message))
    )?;

    writeln!(out, "{}", ui::format_status("Staging all changes..."))?;
    if let Err(e) = workspace.stage_all() {
        report_warning(
            out,
            BoundaryWarning::StageFailed {
                reason: e.to_string(),
            },
        )?;
    }

    let commit = match workspace.commit(&message) {
        Ok(outcome) => {
            match outcome.short_id() {
                Some(id) => writeln!(
                    out,
                    "{}",
                    ui::format_success(&format!("Created commit {}", id))
                )?,
                None => report_warning(out, BoundaryWarning::NothingToCommit)?,
            }
            Some(outcome)
        }
        Err(e) => {
            report_warning(
                out,
                BoundaryWarning::CommitFailed {
                    reason: e.to_string(),
                },
            )?;
            None
        }
    };

    writeln!(
        out,
        "{}",
        ui::format_status(&format!("Pushing {} to {}...", branch, remote))
    )?;
    let pushed = match workspace.push(remote, branch) {
        Ok(()) => {
            tracing::info!(remote, branch, "push succeeded");
            let short_id = commit.as_ref().and_then(|outcome| outcome.short_id());
            write!(
                out,
                "{}",
                ui::format_push_success(remote, branch, short_id, &config.platform)
            )?;
            true
        }
        Err(e) => {
            tracing::warn!(remote, branch, error = %e, "push failed");
            write!(
                out,
                "{}",
                ui::format_push_failure(remote, branch, &e.to_string())
            )?;
            false
        }
    };
    out.flush()?;

    Ok(WorkflowResult {
        message,
        commit,
        pushed,
    })
}

fn report_warning<O: Write>(out: &mut O, warning: BoundaryWarning) -> std::io::Result<()> {
    tracing::warn!(%warning, "continuing after non-fatal problem");
    writeln!(out, "{}", ui::format_boundary_warning(&warning))
}
