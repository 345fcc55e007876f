//! Project name derivation.

use std::path::{Path, PathBuf};

use crate::diagnostics::DiagnosticSink;

use super::error::GitRepoError;
use super::git::{GitCli, GitProbe};

/// Derives the project name used to locate per-project storage.
#[derive(Debug, Clone)]
pub struct ProjectIdentity<P = GitCli> {
    probe: P,
}

impl ProjectIdentity<GitCli> {
    /// Create a resolver that asks the `git` executable.
    #[must_use]
    pub fn new() -> Self {
        Self {
            probe: GitCli::new(),
        }
    }
}

impl Default for ProjectIdentity<GitCli> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: GitProbe> ProjectIdentity<P> {
    /// Create a resolver backed by a custom probe.
    #[must_use]
    pub fn with_probe(probe: P) -> Self {
        Self { probe }
    }

    /// Root of the main repository, shared by every worktree.
    ///
    /// # Errors
    ///
    /// Returns the probe's error, or [`GitRepoError::GitError`] when the
    /// common directory has no parent.
    pub async fn main_repo_path(&self, cwd: &Path) -> Result<PathBuf, GitRepoError> {
        let common_dir = self.probe.common_dir(cwd).await?;
        common_dir.parent().map(Path::to_path_buf).ok_or_else(|| {
            GitRepoError::GitError(format!(
                "git common directory has no parent: {}",
                common_dir.display()
            ))
        })
    }

    /// Project name for `cwd`. Never fails.
    ///
    /// Inside a repository this is the main repository's directory name.
    /// Otherwise a warning goes to `sink` and the name of `cwd` is used.
    pub async fn project_name(&self, cwd: &Path, sink: &dyn DiagnosticSink) -> String {
        match self.main_repo_path(cwd).await {
            Ok(root) => {
                if let Some(name) = root.file_name() {
                    let name = name.to_string_lossy().into_owned();
                    tracing::debug!(root = %root.display(), name = %name, "Resolved project from git");
                    return name;
                }
                sink.warn(&format!(
                    "Repository root has no name: {}. Using directory name as project name.",
                    root.display()
                ));
            }
            Err(e) => {
                tracing::debug!(reason = e.reason(), "git project lookup failed");
                sink.warn(&format!("{e}. Using directory name as project name."));
            }
        }
        fallback_name(cwd)
    }
}

fn fallback_name(cwd: &Path) -> String {
    cwd.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .or_else(|| {
            cwd.canonicalize()
                .ok()
                .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingSink;
    use async_trait::async_trait;

    enum MockProbe {
        Found(PathBuf),
        Fails(fn() -> GitRepoError),
    }

    #[async_trait]
    impl GitProbe for MockProbe {
        async fn common_dir(&self, _cwd: &Path) -> Result<PathBuf, GitRepoError> {
            match self {
                Self::Found(path) => Ok(path.clone()),
                Self::Fails(make) => Err(make()),
            }
        }
    }

    #[tokio::test]
    async fn test_name_from_common_dir() {
        let identity =
            ProjectIdentity::with_probe(MockProbe::Found(PathBuf::from("/src/proj/.git")));
        let sink = CollectingSink::new();

        let name = identity
            .project_name(Path::new("/src/proj-feature"), &sink)
            .await;

        assert_eq!(name, "proj");
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_fallback_on_each_failure_class() {
        let failures: [fn() -> GitRepoError; 4] = [
            || GitRepoError::NotGitRepo(PathBuf::from("/tmp/scratch")),
            || GitRepoError::Timeout(crate::project::GIT_TIMEOUT),
            || GitRepoError::CommandNotFound,
            || GitRepoError::GitError("fatal: bad".to_string()),
        ];

        for make in failures {
            let identity = ProjectIdentity::with_probe(MockProbe::Fails(make));
            let sink = CollectingSink::new();

            let name = identity
                .project_name(Path::new("/home/me/scratch"), &sink)
                .await;

            assert_eq!(name, "scratch");
            let messages = sink.messages();
            assert_eq!(messages.len(), 1);
            assert!(messages[0].contains("Using directory name as project name"));
        }
    }

    #[tokio::test]
    async fn test_common_dir_without_parent_falls_back() {
        let identity = ProjectIdentity::with_probe(MockProbe::Found(PathBuf::from("/")));
        let sink = CollectingSink::new();

        let name = identity.project_name(Path::new("/work/app"), &sink).await;

        assert_eq!(name, "app");
        assert_eq!(sink.messages().len(), 1);
    }

    #[test]
    fn test_fallback_name_trailing_slash() {
        assert_eq!(fallback_name(Path::new("/a/b/")), "b");
    }
}
