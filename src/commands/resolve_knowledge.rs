//! `resolve-knowledge` command.

use std::path::Path;

use crate::diagnostics::DiagnosticSink;
use crate::knowledge::KnowledgeResolver;

use super::{render, CommandError};

/// Resolve a workflow's knowledge and render the outcome as JSON.
///
/// Reference-level and document-level problems are reported inside the
/// JSON body, not as errors.
///
/// # Errors
///
/// Only fails if the outcome cannot be serialized.
pub async fn resolve_knowledge(
    refs: &Path,
    workflow: &str,
    base: &Path,
    sink: &dyn DiagnosticSink,
) -> Result<String, CommandError> {
    let outcome = KnowledgeResolver::new(base)
        .resolve_file(refs, workflow, sink)
        .await;
    render(&outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingSink;

    #[tokio::test]
    async fn test_missing_document_is_reported_in_body() {
        let temp = tempfile::TempDir::new().unwrap();
        let output = resolve_knowledge(
            &temp.path().join("knowledge-refs.md"),
            "/design",
            temp.path(),
            &CollectingSink::new(),
        )
        .await
        .unwrap();

        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["error"], "knowledge-refs.md not found");
    }
}
