//! Configuration file loaders.
//!
//! The global file is the root of trust for where project data lives, so
//! every problem with it is a [`ConfigError`]. The project file is optional
//! and loading it yields a [`ProjectConfigOutcome`] that cannot fail.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::paths::PathError;

use super::types::{GlobalConfig, ProjectConfig};

/// File name of the global configuration inside `~/.claude`.
pub const GLOBAL_CONFIG_FILE: &str = "global-config.yaml";

/// File name of the per-project configuration inside `BASE_PATH`.
pub const PROJECT_CONFIG_FILE: &str = "project-config.yaml";

/// Fatal configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid cwd argument: {0:?}")]
    InvalidCwd(String),

    #[error("Invalid setting name: {0}")]
    InvalidSettingName(String),

    #[error("Could not determine home directory")]
    NoHomeDir,

    #[error("Global config not found: {0}")]
    GlobalNotFound(PathBuf),

    #[error("Failed to read global config {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse global config {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("storage_path not set in {0}")]
    MissingStoragePath(PathBuf),

    #[error("Invalid path in setting {key}: {source}")]
    SettingPath {
        key: String,
        #[source]
        source: PathError,
    },
}

/// Non-fatal problems with the project configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ProjectConfigWarning {
    #[error("Failed to read project config {path}, using defaults: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse project config {path}, using defaults: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

/// Result of the best-effort project configuration load.
#[derive(Debug)]
pub enum ProjectConfigOutcome {
    /// The file exists and parsed.
    Loaded(ProjectConfig),
    /// No file; the project has no overrides.
    Absent,
    /// The file exists but could not be used.
    Degraded(ProjectConfigWarning),
}

impl ProjectConfigOutcome {
    /// The configuration to use, falling back to empty defaults.
    #[must_use]
    pub fn into_config(self) -> ProjectConfig {
        match self {
            Self::Loaded(config) => config,
            Self::Absent | Self::Degraded(_) => ProjectConfig::default(),
        }
    }

    /// The warning, if the file was present but unusable.
    #[must_use]
    pub fn warning(&self) -> Option<&ProjectConfigWarning> {
        match self {
            Self::Degraded(warning) => Some(warning),
            Self::Loaded(_) | Self::Absent => None,
        }
    }
}

/// Default location of the global configuration file.
///
/// `USERPROFILE` takes precedence over the platform home directory.
#[must_use]
pub fn default_global_config_path() -> Option<PathBuf> {
    std::env::var_os("USERPROFILE")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .map(|home| home.join(".claude").join(GLOBAL_CONFIG_FILE))
}

/// Loads the global configuration file.
#[derive(Debug, Clone)]
pub struct GlobalConfigLoader {
    path: PathBuf,
}

impl GlobalConfigLoader {
    /// Create a loader for the default location.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoHomeDir`] if no home directory is known.
    pub fn new() -> Result<Self, ConfigError> {
        default_global_config_path()
            .map(Self::with_path)
            .ok_or(ConfigError::NoHomeDir)
    }

    /// Create a loader for a specific file.
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// The file this loader reads.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load and parse the global configuration.
    ///
    /// # Errors
    ///
    /// Fails if the file is missing, unreadable, or not valid YAML.
    pub fn load(&self) -> Result<GlobalConfig, ConfigError> {
        tracing::debug!(path = %self.path.display(), "Loading global config");

        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConfigError::GlobalNotFound(self.path.clone()));
            }
            Err(e) => {
                return Err(ConfigError::ReadError {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };

        parse_yaml(&content).map_err(|e| ConfigError::ParseError {
            path: self.path.clone(),
            source: e,
        })
    }

    /// Load the configuration and return its storage root.
    ///
    /// # Errors
    ///
    /// Fails like [`Self::load`], or with [`ConfigError::MissingStoragePath`].
    pub fn storage_path(&self) -> Result<String, ConfigError> {
        let config = self.load()?;
        config
            .storage_path()
            .map(str::to_string)
            .ok_or_else(|| ConfigError::MissingStoragePath(self.path.clone()))
    }
}

/// Load `<base_path>/project-config.yaml` without ever failing.
#[must_use]
pub fn load_project_config(base_path: &Path) -> ProjectConfigOutcome {
    let path = base_path.join(PROJECT_CONFIG_FILE);

    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No project config found");
            return ProjectConfigOutcome::Absent;
        }
        Err(e) => {
            return ProjectConfigOutcome::Degraded(ProjectConfigWarning::ReadError {
                path,
                source: e,
            });
        }
    };

    match parse_yaml(&content) {
        Ok(config) => {
            tracing::debug!(path = %path.display(), "Loaded project config");
            ProjectConfigOutcome::Loaded(config)
        }
        Err(e) => ProjectConfigOutcome::Degraded(ProjectConfigWarning::ParseError {
            path,
            source: e,
        }),
    }
}

/// Parse YAML, treating an empty or comment-only document as an empty mapping.
fn parse_yaml<T: DeserializeOwned + Default>(content: &str) -> Result<T, serde_yaml::Error> {
    let has_content = content
        .lines()
        .map(str::trim)
        .any(|line| !line.is_empty() && !line.starts_with('#') && line != "---");
    if !has_content {
        return Ok(T::default());
    }
    let value: serde_yaml::Value = serde_yaml::from_str(content)?;
    if value.is_null() {
        return Ok(T::default());
    }
    serde_yaml::from_value(value)
}
