//! `project-name` command.

use std::path::Path;

use crate::diagnostics::DiagnosticSink;
use crate::project::ProjectIdentity;

use super::CommandError;

/// Print the project name for an existing directory.
///
/// # Errors
///
/// Fails when `cwd` is missing or not a directory, or the name is blank.
pub async fn project_name(cwd: &Path, sink: &dyn DiagnosticSink) -> Result<String, CommandError> {
    if !cwd.exists() {
        return Err(CommandError::PathNotFound(cwd.to_path_buf()));
    }
    if !cwd.is_dir() {
        return Err(CommandError::NotADirectory(cwd.to_path_buf()));
    }

    let name = ProjectIdentity::new().project_name(cwd, sink).await;
    let name = name.trim();
    if name.is_empty() {
        return Err(CommandError::BlankProjectName);
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingSink;

    #[tokio::test]
    async fn test_missing_path() {
        let temp = tempfile::TempDir::new().unwrap();
        let err = project_name(&temp.path().join("nope"), &CollectingSink::new())
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::PathNotFound(_)));
    }

    #[tokio::test]
    async fn test_file_is_not_a_directory() {
        let temp = tempfile::TempDir::new().unwrap();
        let file = temp.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();

        let err = project_name(&file, &CollectingSink::new()).await.unwrap_err();
        assert!(matches!(err, CommandError::NotADirectory(_)));
    }
}
