//! Git common-directory probe.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use super::error::GitRepoError;

/// Upper bound on how long git may take to answer.
pub const GIT_TIMEOUT: Duration = Duration::from_secs(5);

/// Source of the git common directory for a working directory.
#[async_trait]
pub trait GitProbe: Send + Sync {
    /// Absolute path of the common git directory shared by all worktrees of
    /// the repository containing `cwd`.
    async fn common_dir(&self, cwd: &Path) -> Result<PathBuf, GitRepoError>;
}

/// Probe backed by the `git` executable.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: OsString,
    timeout: Duration,
}

impl GitCli {
    /// Create a probe that runs `git` from `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            program: OsString::from("git"),
            timeout: GIT_TIMEOUT,
        }
    }

    /// Use a different executable.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }

    /// Use a different timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The configured timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GitProbe for GitCli {
    async fn common_dir(&self, cwd: &Path) -> Result<PathBuf, GitRepoError> {
        if !cwd.is_dir() {
            return Err(GitRepoError::InvalidWorkingDir(cwd.to_path_buf()));
        }

        let mut command = Command::new(&self.program);
        command
            .args(["rev-parse", "--path-format=absolute", "--git-common-dir"])
            .current_dir(cwd)
            .kill_on_drop(true);

        let output = match tokio::time::timeout(self.timeout, command.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(GitRepoError::CommandNotFound);
            }
            Ok(Err(e)) => return Err(GitRepoError::Io(e)),
            Err(_) => return Err(GitRepoError::Timeout(self.timeout)),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            if stderr.to_lowercase().contains("not a git repository") {
                return Err(GitRepoError::NotGitRepo(cwd.to_path_buf()));
            }
            return Err(GitRepoError::GitError(stderr.to_string()));
        }

        parse_common_dir(&String::from_utf8_lossy(&output.stdout), cwd)
    }
}

/// Interpret `git rev-parse --git-common-dir` output.
///
/// Older git versions ignore `--path-format` and may print a path relative
/// to `cwd`.
fn parse_common_dir(stdout: &str, cwd: &Path) -> Result<PathBuf, GitRepoError> {
    let line = stdout.lines().next().unwrap_or("").trim();
    if line.is_empty() {
        return Err(GitRepoError::GitError(
            "empty output from git rev-parse".to_string(),
        ));
    }

    let path = PathBuf::from(line);
    if path.is_absolute() {
        Ok(path)
    } else {
        Ok(cwd.join(path))
    }
}
