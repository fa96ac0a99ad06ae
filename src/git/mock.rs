use crate::error::{DeployError, Result};
use crate::git::{CommitOutcome, StatusEntry, Workspace};
use std::cell::RefCell;

/// A call made against a [MockWorkspace]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    Status,
    StageAll,
    Commit { message: String },
    Push { remote: String, branch: String },
}

/// Mock workspace for testing without actual git operations
///
/// Every call is recorded; failures are scripted with the `fail_*` builders.
pub struct MockWorkspace {
    entries: Vec<StatusEntry>,
    status_error: Option<String>,
    stage_error: Option<String>,
    commit_error: Option<String>,
    push_error: Option<String>,
    calls: RefCell<Vec<MockCall>>,
}

impl MockWorkspace {
    /// Create a workspace with a clean tree where every operation succeeds
    pub fn new() -> Self {
        MockWorkspace {
            entries: Vec::new(),
            status_error: None,
            stage_error: None,
            commit_error: None,
            push_error: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Add a pending change reported by `status`
    pub fn with_change(mut self, entry: StatusEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn fail_status(mut self, reason: impl Into<String>) -> Self {
        self.status_error = Some(reason.into());
        self
    }

    pub fn fail_stage(mut self, reason: impl Into<String>) -> Self {
        self.stage_error = Some(reason.into());
        self
    }

    pub fn fail_commit(mut self, reason: impl Into<String>) -> Self {
        self.commit_error = Some(reason.into());
        self
    }

    pub fn fail_push(mut self, reason: impl Into<String>) -> Self {
        self.push_error = Some(reason.into());
        self
    }

    /// Calls recorded so far, in order
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.borrow().clone()
    }

    /// Message of the last commit call, if any
    pub fn committed_message(&self) -> Option<String> {
        self.calls.borrow().iter().rev().find_map(|call| match call {
            MockCall::Commit { message } => Some(message.clone()),
            _ => None,
        })
    }

    fn record(&self, call: MockCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl Default for MockWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace for MockWorkspace {
    fn status(&self) -> Result<Vec<StatusEntry>> {
        self.record(MockCall::Status);
        match &self.status_error {
            Some(reason) => Err(DeployError::command(reason.clone())),
            None => Ok(self.entries.clone()),
        }
    }

    fn stage_all(&self) -> Result<()> {
        self.record(MockCall::StageAll);
        match &self.stage_error {
            Some(reason) => Err(DeployError::command(reason.clone())),
            None => Ok(()),
        }
    }

    fn commit(&self, message: &str) -> Result<CommitOutcome> {
        self.record(MockCall::Commit {
            message: message.to_string(),
        });
        if let Some(reason) = &self.commit_error {
            return Err(DeployError::command(reason.clone()));
        }
        if self.entries.is_empty() {
            Ok(CommitOutcome::NothingToCommit)
        } else {
            Ok(CommitOutcome::Created {
                id: "1234567890abcdef1234567890abcdef12345678".to_string(),
            })
        }
    }

    fn push(&self, remote: &str, branch: &str) -> Result<()> {
        self.record(MockCall::Push {
            remote: remote.to_string(),
            branch: branch.to_string(),
        });
        match &self.push_error {
            Some(reason) => Err(DeployError::remote(reason.clone())),
            None => Ok(()),
        }
    }
}
