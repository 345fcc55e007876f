//! Knowledge reference document scanner.
//!
//! A reference document is markdown split into workflow sections:
//!
//! ```text
//! ## /design
//! - path: docs/architecture.md
//! - path: docs/api.md
//!
//! ## /implement
//! - path: docs/conventions.md
//! ```
//!
//! A section runs from its heading to the next `## /` heading or the end of
//! the document.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Prefix shared by every workflow section heading.
const SECTION_PREFIX: &str = "## ";

static ITEM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^- path:\s*(.+?)\s*$").expect("item pattern is valid"));

/// A path listed under a workflow section, as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeReference {
    pub path: String,
}

/// A reference whose path has been made absolute and checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedKnowledgeReference {
    pub path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    OutsideTarget,
    InsideTarget,
}

/// Extract the references listed under `workflow`, in document order.
///
/// Returns an empty list when no heading matches exactly. Duplicates are
/// kept. Only the first section with a matching heading is read.
#[must_use]
pub fn parse_knowledge_refs(content: &str, workflow: &str) -> Vec<KnowledgeReference> {
    let mut state = ScanState::OutsideTarget;
    let mut refs = Vec::new();

    for line in content.lines() {
        match state {
            ScanState::OutsideTarget => {
                if is_heading_for(line, workflow) {
                    state = ScanState::InsideTarget;
                }
            }
            ScanState::InsideTarget => {
                if is_workflow_heading(line) {
                    break;
                }
                if let Some(path) = parse_item(line) {
                    refs.push(KnowledgeReference { path });
                }
            }
        }
    }

    if state == ScanState::OutsideTarget {
        tracing::debug!(workflow, "No section for workflow");
    }
    refs
}

fn is_heading_for(line: &str, workflow: &str) -> bool {
    line.strip_prefix(SECTION_PREFIX)
        .is_some_and(|title| title.trim_end() == workflow)
}

fn is_workflow_heading(line: &str) -> bool {
    line.strip_prefix(SECTION_PREFIX)
        .is_some_and(|title| title.starts_with('/'))
}

fn parse_item(line: &str) -> Option<String> {
    let path = ITEM_PATTERN.captures(line)?.get(1)?.as_str().trim();
    if path.is_empty() {
        None
    } else {
        Some(path.to_string())
    }
}
