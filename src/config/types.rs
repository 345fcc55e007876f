//! Configuration types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Global configuration from `~/.claude/global-config.yaml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Filesystem locations.
    pub paths: Option<PathsConfig>,
}

/// The `paths` section of the global configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Root directory under which every project gets its own folder.
    pub storage_path: Option<String>,
}

impl GlobalConfig {
    /// The configured storage root, if present and non-empty.
    #[must_use]
    pub fn storage_path(&self) -> Option<&str> {
        self.paths
            .as_ref()
            .and_then(|p| p.storage_path.as_deref())
            .filter(|s| !s.is_empty())
    }
}

/// Per-project overrides from `<BASE_PATH>/project-config.yaml`.
///
/// Blocks stay as YAML values so keys of any scalar type survive until
/// they are rendered as JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Settings blocks keyed by skill name.
    pub skills: Option<serde_yaml::Mapping>,
    /// Ticket configuration, passed through untouched.
    pub tickets: Option<serde_yaml::Value>,
}

/// Output of configuration resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedConfiguration {
    /// Absolute per-project storage directory.
    #[serde(rename = "BASE_PATH")]
    pub base_path: String,
    /// Requested skill settings with `_path` keys made absolute.
    #[serde(rename = "SETTINGS")]
    pub settings: Map<String, Value>,
    /// Ticket configuration, `null` when unconfigured.
    #[serde(rename = "TICKETS")]
    pub tickets: Option<Value>,
}
