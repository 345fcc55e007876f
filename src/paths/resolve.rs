//! Separator normalization and containment-checked resolution.

use std::path::{Component, Path, PathBuf};

use super::error::PathError;

/// Replace every backslash with a forward slash.
///
/// Forward slashes work on every platform the tool runs on and keep JSON
/// output stable for consumers.
#[must_use]
pub fn normalize(path: &str) -> String {
    path.replace('\\', "/")
}

/// Resolve `candidate` against `base_path`.
///
/// Absolute candidates are normalized and returned without any containment
/// check. Relative candidates are joined to the base, canonicalized, and must
/// land on or under the canonicalized base.
///
/// # Errors
///
/// Returns [`PathError::Traversal`] when a relative candidate escapes the
/// base, or [`PathError::CurrentDir`] when a relative base cannot be anchored.
pub fn resolve(base_path: impl AsRef<Path>, candidate: &str) -> Result<String, PathError> {
    if Path::new(candidate).is_absolute() {
        return Ok(normalize(candidate));
    }

    let base = canonicalize_lenient(&absolutize(base_path.as_ref())?);
    let resolved = canonicalize_lenient(&base.join(candidate));

    if !resolved.starts_with(&base) {
        tracing::debug!(
            base = %base.display(),
            candidate,
            "Rejected path outside base directory"
        );
        return Err(PathError::Traversal {
            candidate: candidate.to_string(),
        });
    }

    Ok(display_path(&resolved))
}

/// Render a path as a normalized string, dropping Windows verbatim prefixes.
#[must_use]
pub fn display_path(path: &Path) -> String {
    let normalized = normalize(&path.to_string_lossy());
    if let Some(rest) = normalized.strip_prefix("//?/UNC/") {
        format!("//{rest}")
    } else if let Some(rest) = normalized.strip_prefix("//?/") {
        rest.to_string()
    } else {
        normalized
    }
}

fn absolutize(path: &Path) -> Result<PathBuf, PathError> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        let cwd = std::env::current_dir().map_err(PathError::CurrentDir)?;
        Ok(cwd.join(path))
    }
}

/// Canonicalize a path that may not exist yet.
///
/// Components are applied in order. Each prefix that exists on disk is
/// canonicalized before the next component, so `..` after a symlink climbs
/// out of the link's target. Components past the last existing one are
/// appended lexically.
fn canonicalize_lenient(path: &Path) -> PathBuf {
    let mut resolved = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => resolved.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            Component::Normal(name) => {
                resolved.push(name);
                if let Ok(canonical) = resolved.canonicalize() {
                    resolved = canonical;
                }
            }
        }
    }
    resolved
}
