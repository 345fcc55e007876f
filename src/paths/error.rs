//! Path resolution error types.

/// Errors that can occur while resolving a path against a base directory.
#[derive(thiserror::Error, Debug)]
pub enum PathError {
    /// The candidate escapes the base directory after canonicalization.
    #[error("Path traversal detected: {candidate}")]
    Traversal { candidate: String },

    /// A relative base path could not be anchored to the current directory.
    #[error("Failed to determine current directory: {0}")]
    CurrentDir(#[source] std::io::Error),
}

impl PathError {
    /// Returns true if this is a containment violation.
    #[must_use]
    pub fn is_traversal(&self) -> bool {
        matches!(self, Self::Traversal { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_traversal_display() {
        let err = PathError::Traversal {
            candidate: "../../etc/passwd".to_string(),
        };
        assert_eq!(err.to_string(), "Path traversal detected: ../../etc/passwd");
        assert!(err.is_traversal());
    }

    #[test]
    fn test_current_dir_is_not_traversal() {
        let err = PathError::CurrentDir(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "gone",
        ));
        assert!(!err.is_traversal());
        assert!(err.to_string().contains("current directory"));
    }
}
