//! Per-reference path resolution and file loading.

use std::path::Path;

use crate::paths::{self, PathError};

use super::outcome::KnowledgeEntry;
use super::refs::{KnowledgeReference, ResolvedKnowledgeReference};

/// Why a single reference could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum KnowledgeError {
    #[error(transparent)]
    Path(#[from] PathError),

    #[error("Knowledge file not found: {0}")]
    NotFound(String),

    #[error("Failed to read {path}: {source}")]
    ReadError {
        path: String,
        source: std::io::Error,
    },
}

/// Make a reference absolute, enforcing containment for relative paths.
///
/// # Errors
///
/// Returns [`KnowledgeError::Path`] if the reference escapes `base_path`.
pub fn resolve_reference(
    reference: &KnowledgeReference,
    base_path: &Path,
) -> Result<ResolvedKnowledgeReference, KnowledgeError> {
    let path = paths::resolve(base_path, &reference.path)?;
    Ok(ResolvedKnowledgeReference { path })
}

/// Read one resolved reference.
///
/// # Errors
///
/// Returns [`KnowledgeError::NotFound`] for a missing file and
/// [`KnowledgeError::ReadError`] for anything else that stops the read.
pub async fn read_knowledge_file(
    reference: &ResolvedKnowledgeReference,
) -> Result<KnowledgeEntry, KnowledgeError> {
    let path = paths::normalize(&reference.path);
    match tokio::fs::read_to_string(&reference.path).await {
        Ok(content) => Ok(KnowledgeEntry { path, content }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(KnowledgeError::NotFound(path)),
        Err(e) => Err(KnowledgeError::ReadError { path, source: e }),
    }
}

/// Resolve and read one reference.
///
/// # Errors
///
/// Any [`KnowledgeError`]; callers turn it into a warning.
pub async fn load_reference(
    reference: &KnowledgeReference,
    base_path: &Path,
) -> Result<KnowledgeEntry, KnowledgeError> {
    let resolved = resolve_reference(reference, base_path)?;
    read_knowledge_file(&resolved).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn reference(path: &str) -> KnowledgeReference {
        KnowledgeReference {
            path: path.to_string(),
        }
    }

    #[tokio::test]
    async fn test_load_existing_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("a.md"), "alpha").unwrap();

        let entry = load_reference(&reference("a.md"), temp.path()).await.unwrap();

        assert_eq!(entry.content, "alpha");
        assert!(entry.path.ends_with("/a.md"));
        assert!(!entry.path.contains('\\'));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = load_reference(&reference("gone.md"), temp.path())
            .await
            .unwrap_err();
        assert!(matches!(err, KnowledgeError::NotFound(_)));
        assert!(err.to_string().starts_with("Knowledge file not found: "));
        assert!(err.to_string().ends_with("/gone.md"));
    }

    #[tokio::test]
    async fn test_directory_is_read_error() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("dir.md")).unwrap();

        let err = load_reference(&reference("dir.md"), temp.path())
            .await
            .unwrap_err();
        assert!(matches!(err, KnowledgeError::ReadError { .. }));
        assert!(err.to_string().starts_with("Failed to read "));
    }

    #[tokio::test]
    async fn test_non_utf8_is_read_error() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("bin.md"), [0xff, 0xfe, 0x00]).unwrap();

        let err = load_reference(&reference("bin.md"), temp.path())
            .await
            .unwrap_err();
        assert!(matches!(err, KnowledgeError::ReadError { .. }));
    }

    #[tokio::test]
    async fn test_traversal_is_path_error() {
        let temp = TempDir::new().unwrap();
        let err = load_reference(&reference("../../etc/passwd"), temp.path())
            .await
            .unwrap_err();
        assert!(matches!(err, KnowledgeError::Path(ref e) if e.is_traversal()));
        assert_eq!(err.to_string(), "Path traversal detected: ../../etc/passwd");
    }
}
