use std::fmt;

/// Non-fatal problems met after the repository precondition passed.
/// These are reported to the user and the workflow carries on.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// Reading the working tree status failed
    StatusUnavailable { reason: String },
    /// Staging the working tree failed
    StageFailed { reason: String },
    /// The index matches HEAD, so no commit was created
    NothingToCommit,
    /// Creating the commit failed
    CommitFailed { reason: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::StatusUnavailable { reason } => {
                write!(f, "Could not read working tree status: {}", reason)
            }
            BoundaryWarning::StageFailed { reason } => {
                write!(f, "Could not stage changes: {}", reason)
            }
            BoundaryWarning::NothingToCommit => {
                write!(f, "Nothing to commit, working tree matches the last commit")
            }
            BoundaryWarning::CommitFailed { reason } => {
                write!(f, "Could not create commit: {}", reason)
            }
        }
    }
}

/// Usual reasons a push is refused, listed to the operator after any failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikelyCause {
    MissingAuthentication,
    RemoteMisconfigured,
    NetworkFailure,
}

impl LikelyCause {
    /// All causes in display order
    pub const ALL: [LikelyCause; 3] = [
        LikelyCause::MissingAuthentication,
        LikelyCause::RemoteMisconfigured,
        LikelyCause::NetworkFailure,
    ];

    /// One-line description shown under the failure banner
    pub fn describe(&self, remote: &str) -> String {
        match self {
            LikelyCause::MissingAuthentication => {
                "Git credentials are missing or invalid (SSH key, token or credential helper)"
                    .to_string()
            }
            LikelyCause::RemoteMisconfigured => format!(
                "The URL of remote '{}' is wrong (check `git remote -v`)",
                remote
            ),
            LikelyCause::NetworkFailure => "The network connection failed".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_to_commit_display() {
        assert!(BoundaryWarning::NothingToCommit
            .to_string()
            .contains("Nothing to commit"));
    }

    #[test]
    fn test_reason_is_included() {
        let warnings = vec![
            BoundaryWarning::StatusUnavailable {
                reason: "index locked".to_string(),
            },
            BoundaryWarning::StageFailed {
                reason: "index locked".to_string(),
            },
            BoundaryWarning::CommitFailed {
                reason: "index locked".to_string(),
            },
        ];

        for warning in warnings {
            assert!(warning.to_string().contains("index locked"));
        }
    }

    #[test]
    fn test_likely_causes_are_distinct() {
        let descriptions: Vec<String> = LikelyCause::ALL
            .iter()
            .map(|cause| cause.describe("origin"))
            .collect();
        assert_eq!(descriptions.len(), 3);
        assert!(descriptions[0].contains("credentials"));
        assert!(descriptions[1].contains("'origin'"));
        assert!(descriptions[2].contains("network"));
    }
}
