//! Workflow name normalization.

use std::sync::LazyLock;

use regex::Regex;

/// Git Bash rewrites `/design` into something like `C:/Program Files/Git/design`.
static MANGLED_WORKFLOW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z]:[/\\].*/([^/]+)$").expect("workflow pattern is valid")
});

/// Recover the logical workflow name from shell-mangled input.
///
/// - `C:/Program Files/Git/design` becomes `/design`
/// - `//design` becomes `/design`
/// - anything else is returned unchanged
#[must_use]
pub fn normalize_workflow_name(workflow: &str) -> String {
    if let Some(captures) = MANGLED_WORKFLOW.captures(workflow) {
        if let Some(segment) = captures.get(1) {
            return format!("/{}", segment.as_str());
        }
    }

    if let Some(rest) = workflow.strip_prefix("//") {
        return format!("/{rest}");
    }

    workflow.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_bash_conversion() {
        assert_eq!(normalize_workflow_name("C:/Program Files/Git/design"), "/design");
        assert_eq!(normalize_workflow_name("d:\\msys64/usr/design"), "/design");
    }

    #[test]
    fn test_double_slash() {
        assert_eq!(normalize_workflow_name("//design"), "/design");
    }

    #[test]
    fn test_passthrough() {
        assert_eq!(normalize_workflow_name("/design"), "/design");
        assert_eq!(normalize_workflow_name("design"), "design");
        assert_eq!(normalize_workflow_name(""), "");
    }

    #[test]
    fn test_drive_root_without_segment_is_unchanged() {
        assert_eq!(normalize_workflow_name("C:/design"), "C:/design");
    }

    #[test]
    fn test_idempotent() {
        for input in ["C:/Program Files/Git/design", "//design", "/design"] {
            let once = normalize_workflow_name(input);
            assert_eq!(normalize_workflow_name(&once), once);
        }
    }
}
