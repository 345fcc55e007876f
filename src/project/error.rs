//! Git probe error types.

use std::path::PathBuf;
use std::time::Duration;

/// Errors that can occur while asking git for the common directory.
#[derive(thiserror::Error, Debug)]
pub enum GitRepoError {
    /// The directory is not inside a git repository.
    #[error("Not a git repository: {0}")]
    NotGitRepo(PathBuf),

    /// git did not answer within the allotted time.
    #[error("git command timed out after {0:?}")]
    Timeout(Duration),

    /// The git executable could not be found.
    #[error("git command not found. Ensure git is installed and in PATH")]
    CommandNotFound,

    /// The working directory does not exist or is not a directory.
    #[error("Working directory does not exist: {0}")]
    InvalidWorkingDir(PathBuf),

    /// git ran but reported an unexpected failure.
    #[error("git rev-parse failed: {0}")]
    GitError(String),

    /// Spawning git failed for another reason.
    #[error("Failed to execute git: {0}")]
    Io(#[from] std::io::Error),
}

impl GitRepoError {
    /// Machine-readable failure class.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            Self::NotGitRepo(_) => "not_git_repo",
            Self::Timeout(_) => "timeout",
            Self::CommandNotFound => "command_not_found",
            Self::InvalidWorkingDir(_) | Self::GitError(_) | Self::Io(_) => "unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_classification() {
        assert_eq!(
            GitRepoError::NotGitRepo(PathBuf::from("/tmp")).reason(),
            "not_git_repo"
        );
        assert_eq!(
            GitRepoError::Timeout(Duration::from_secs(5)).reason(),
            "timeout"
        );
        assert_eq!(GitRepoError::CommandNotFound.reason(), "command_not_found");
        assert_eq!(
            GitRepoError::GitError("fatal".to_string()).reason(),
            "unknown"
        );
    }

    #[test]
    fn test_timeout_display() {
        assert_eq!(
            GitRepoError::Timeout(Duration::from_secs(5)).to_string(),
            "git command timed out after 5s"
        );
        assert_eq!(
            GitRepoError::Timeout(Duration::from_millis(200)).to_string(),
            "git command timed out after 200ms"
        );
    }
}
