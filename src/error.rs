use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for deploy-push operations
#[derive(Error, Debug)]
pub enum DeployError {
    #[error("Not a git repository: {}", path.display())]
    NotARepository { path: PathBuf },

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("Git command failed: {0}")]
    Command(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in deploy-push
pub type Result<T> = std::result::Result<T, DeployError>;

impl DeployError {
    /// Create a not-a-repository error for the given directory
    pub fn not_a_repository(path: impl Into<PathBuf>) -> Self {
        DeployError::NotARepository { path: path.into() }
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        DeployError::Config(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        DeployError::Remote(msg.into())
    }

    /// Create a command error with context
    pub fn command(msg: impl Into<String>) -> Self {
        DeployError::Command(msg.into())
    }

    /// Whether this error is the fatal missing-repository precondition
    pub fn is_not_a_repository(&self) -> bool {
        matches!(self, DeployError::NotARepository { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DeployError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_not_a_repository_display() {
        let err = DeployError::not_a_repository("/tmp/project");
        assert_eq!(err.to_string(), "Not a git repository: /tmp/project");
        assert!(err.is_not_a_repository());
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: DeployError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
        assert!(!err.is_not_a_repository());
    }

    #[test]
    fn test_error_from_git2() {
        let err: DeployError = git2::Error::from_str("bad object").into();
        assert!(err.to_string().starts_with("Git operation failed"));
        assert!(err.to_string().contains("bad object"));
    }

    #[test]
    fn test_error_from_toml() {
        let parse_err = toml::from_str::<toml::Value>("= nope").unwrap_err();
        let err: DeployError = parse_err.into();
        assert!(err.to_string().starts_with("Configuration parse error"));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (DeployError::config("x"), "Configuration error"),
            (DeployError::remote("x"), "Remote operation failed"),
            (DeployError::command("x"), "Git command failed"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }

    #[test]
    fn test_error_special_characters_in_messages() {
        let special_chars = vec![
            "message with\nnewline",
            "message with 'quotes'",
            "message with unicode: ñ",
        ];

        for msg in special_chars {
            let err = DeployError::remote(msg);
            assert!(err.to_string().contains(msg));
        }
    }
}
