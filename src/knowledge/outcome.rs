//! Knowledge resolution results.

use serde::{Deserialize, Serialize};

/// Aggregate status of a knowledge resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStatus {
    /// Every reference loaded.
    Success,
    /// Some references loaded, some failed.
    Partial,
    /// Nothing loaded and at least one failure.
    Error,
    /// Nothing registered for the workflow.
    Empty,
}

impl ResolutionStatus {
    /// Derive the status from the loaded and warning tallies.
    #[must_use]
    pub fn from_tallies(loaded: usize, warnings: usize) -> Self {
        match (loaded > 0, warnings > 0) {
            (true, false) => Self::Success,
            (true, true) => Self::Partial,
            (false, true) => Self::Error,
            (false, false) => Self::Empty,
        }
    }
}

/// A knowledge file that was read successfully.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    /// Absolute path with forward slashes.
    pub path: String,
    /// File content.
    pub content: String,
}

/// Result of resolving one workflow's knowledge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionOutcome {
    pub status: ResolutionStatus,
    /// Set when the reference document itself could not be used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub workflow: String,
    pub knowledge: Vec<KnowledgeEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl ResolutionOutcome {
    /// Outcome for a workflow with nothing registered.
    #[must_use]
    pub fn empty(workflow: impl Into<String>) -> Self {
        Self {
            status: ResolutionStatus::Empty,
            error: None,
            workflow: workflow.into(),
            knowledge: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Outcome when the reference document is missing or unreadable.
    #[must_use]
    pub fn document_error(workflow: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            status: ResolutionStatus::Error,
            error: Some(error.into()),
            workflow: workflow.into(),
            knowledge: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Outcome built from loaded entries and per-reference warnings.
    #[must_use]
    pub fn from_parts(
        workflow: impl Into<String>,
        knowledge: Vec<KnowledgeEntry>,
        warnings: Vec<String>,
    ) -> Self {
        Self {
            status: ResolutionStatus::from_tallies(knowledge.len(), warnings.len()),
            error: None,
            workflow: workflow.into(),
            knowledge,
            warnings,
        }
    }
}
