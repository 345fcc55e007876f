//! Workflow-scoped knowledge resolution.

use std::path::{Path, PathBuf};

use crate::diagnostics::DiagnosticSink;

use super::loader::load_reference;
use super::outcome::ResolutionOutcome;
use super::refs::parse_knowledge_refs;
use super::workflow::normalize_workflow_name;

/// Conventional name of the reference document.
pub const KNOWLEDGE_REFS_FILE: &str = "knowledge-refs.md";

/// Loads the knowledge registered for a workflow.
///
/// References are read one at a time in document order. A reference that
/// fails becomes a warning and the rest still load.
#[derive(Debug, Clone)]
pub struct KnowledgeResolver {
    base_path: PathBuf,
}

impl KnowledgeResolver {
    /// Create a resolver that resolves relative references against `base_path`.
    #[must_use]
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// The directory relative references are resolved against.
    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Read the reference document at `refs_path` and resolve `workflow`.
    pub async fn resolve_file(
        &self,
        refs_path: &Path,
        workflow: &str,
        sink: &dyn DiagnosticSink,
    ) -> ResolutionOutcome {
        let workflow = normalize_workflow_name(workflow);

        match tokio::fs::read_to_string(refs_path).await {
            Ok(document) => self.resolve_normalized(&document, workflow, sink).await,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %refs_path.display(), "Reference document not found");
                ResolutionOutcome::document_error(workflow, "knowledge-refs.md not found")
            }
            Err(e) => ResolutionOutcome::document_error(
                workflow,
                format!("Failed to read knowledge-refs.md: {e}"),
            ),
        }
    }

    /// Resolve `workflow` against an already-loaded reference document.
    pub async fn resolve(
        &self,
        document: &str,
        workflow: &str,
        sink: &dyn DiagnosticSink,
    ) -> ResolutionOutcome {
        self.resolve_normalized(document, normalize_workflow_name(workflow), sink)
            .await
    }

    async fn resolve_normalized(
        &self,
        document: &str,
        workflow: String,
        sink: &dyn DiagnosticSink,
    ) -> ResolutionOutcome {
        let refs = parse_knowledge_refs(document, &workflow);
        if refs.is_empty() {
            return ResolutionOutcome::empty(workflow);
        }

        let mut knowledge = Vec::with_capacity(refs.len());
        let mut warnings = Vec::new();

        for reference in &refs {
            match load_reference(reference, &self.base_path).await {
                Ok(entry) => knowledge.push(entry),
                Err(e) => {
                    let message = e.to_string();
                    sink.warn(&message);
                    warnings.push(message);
                }
            }
        }

        tracing::debug!(
            workflow = %workflow,
            loaded = knowledge.len(),
            warnings = warnings.len(),
            "Resolved knowledge"
        );
        ResolutionOutcome::from_parts(workflow, knowledge, warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingSink;
    use crate::knowledge::ResolutionStatus;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_all_references_fail() {
        let temp = TempDir::new().unwrap();
        let doc = "## /design\n- path: a.md\n- path: ../escape.md\n";
        let sink = CollectingSink::new();

        let outcome = KnowledgeResolver::new(temp.path())
            .resolve(doc, "/design", &sink)
            .await;

        assert_eq!(outcome.status, ResolutionStatus::Error);
        assert!(outcome.knowledge.is_empty());
        assert_eq!(outcome.warnings.len(), 2);
        assert!(outcome.warnings[1].contains("Path traversal detected"));
        assert_eq!(sink.messages(), outcome.warnings);
    }

    #[tokio::test]
    async fn test_section_without_items_is_empty() {
        let temp = TempDir::new().unwrap();
        let sink = CollectingSink::new();

        let outcome = KnowledgeResolver::new(temp.path())
            .resolve("## /design\n\nnothing yet\n", "/design", &sink)
            .await;

        assert_eq!(outcome.status, ResolutionStatus::Empty);
        assert_eq!(outcome.workflow, "/design");
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_workflow_is_normalized_before_lookup() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("a.md"), "A").unwrap();
        let sink = CollectingSink::new();

        let outcome = KnowledgeResolver::new(temp.path())
            .resolve(
                "## /design\n- path: a.md\n",
                "C:/Program Files/Git/design",
                &sink,
            )
            .await;

        assert_eq!(outcome.workflow, "/design");
        assert_eq!(outcome.status, ResolutionStatus::Success);
    }

    #[tokio::test]
    async fn test_missing_document() {
        let temp = TempDir::new().unwrap();
        let sink = CollectingSink::new();

        let outcome = KnowledgeResolver::new(temp.path())
            .resolve_file(&temp.path().join(KNOWLEDGE_REFS_FILE), "//design", &sink)
            .await;

        assert_eq!(outcome.status, ResolutionStatus::Error);
        assert_eq!(outcome.error.as_deref(), Some("knowledge-refs.md not found"));
        assert_eq!(outcome.workflow, "/design");
    }
}
