//! Cascading configuration resolution.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::diagnostics::DiagnosticSink;
use crate::paths;
use crate::project::{GitCli, GitProbe, ProjectIdentity};

use super::loader::{load_project_config, ConfigError, GlobalConfigLoader, ProjectConfigOutcome};
use super::types::{ProjectConfig, ResolvedConfiguration};
use super::yaml::yaml_to_json;

/// Setting keys ending in this suffix hold paths relative to `BASE_PATH`.
pub const PATH_SETTING_SUFFIX: &str = "_path";

static SETTING_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9_-]*$").expect("setting name pattern is valid"));

/// Resolves the effective configuration for a working directory.
#[derive(Debug, Clone)]
pub struct ConfigResolver<P = GitCli> {
    global: GlobalConfigLoader,
    identity: ProjectIdentity<P>,
}

impl ConfigResolver<GitCli> {
    /// Create a resolver using the default global config and `git`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoHomeDir`] if no home directory is known.
    pub fn new() -> Result<Self, ConfigError> {
        Ok(Self::with_parts(GlobalConfigLoader::new()?, ProjectIdentity::new()))
    }
}

impl<P: GitProbe> ConfigResolver<P> {
    /// Create a resolver from explicit parts.
    #[must_use]
    pub fn with_parts(global: GlobalConfigLoader, identity: ProjectIdentity<P>) -> Self {
        Self { global, identity }
    }

    /// Resolve `BASE_PATH`, the requested settings and the tickets block.
    ///
    /// Arguments are validated before any file is touched.
    ///
    /// # Errors
    ///
    /// Fails on invalid arguments, any global config problem, or a `_path`
    /// setting that escapes `BASE_PATH`. Project config problems are reported
    /// to `sink` and resolution continues with empty settings.
    pub async fn resolve(
        &self,
        cwd: &str,
        requested: &[String],
        sink: &dyn DiagnosticSink,
    ) -> Result<ResolvedConfiguration, ConfigError> {
        validate_cwd(cwd)?;
        for name in requested {
            validate_setting_name(name)?;
        }

        let storage_path = self.global.storage_path()?;
        let project_name = self.identity.project_name(Path::new(cwd), sink).await;
        let base_path = base_path_for(&storage_path, &project_name);
        tracing::debug!(base_path = %base_path, project = %project_name, "Computed base path");

        let project = match load_project_config(Path::new(&base_path)) {
            ProjectConfigOutcome::Degraded(warning) => {
                sink.warn(&warning.to_string());
                ProjectConfig::default()
            }
            outcome => outcome.into_config(),
        };

        let settings = extract_settings(&project, requested, &base_path, sink)?;

        Ok(ResolvedConfiguration {
            base_path,
            settings,
            tickets: project.tickets.map(yaml_to_json),
        })
    }
}

/// Reject empty, blank, or NUL-containing working directories.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidCwd`].
pub fn validate_cwd(cwd: &str) -> Result<(), ConfigError> {
    if cwd.trim().is_empty() || cwd.contains('\0') {
        return Err(ConfigError::InvalidCwd(cwd.to_string()));
    }
    Ok(())
}

/// Setting names are lowercase, start with a letter, and may contain digits,
/// hyphens and underscores.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidSettingName`].
pub fn validate_setting_name(name: &str) -> Result<(), ConfigError> {
    if SETTING_NAME.is_match(name) {
        Ok(())
    } else {
        Err(ConfigError::InvalidSettingName(name.to_string()))
    }
}

/// `storage_path/project_name` with forward slashes.
#[must_use]
pub fn base_path_for(storage_path: &str, project_name: &str) -> String {
    paths::normalize(&Path::new(storage_path).join(project_name).to_string_lossy())
}

/// Pick the requested skill blocks out of the project config.
///
/// Unknown names are skipped. A block that is not a mapping is skipped with
/// a warning, and an empty (`null`) block becomes an empty mapping.
///
/// # Errors
///
/// Returns [`ConfigError::SettingPath`] if a `_path` value escapes
/// `base_path`.
pub fn extract_settings(
    project: &ProjectConfig,
    requested: &[String],
    base_path: &str,
    sink: &dyn DiagnosticSink,
) -> Result<Map<String, Value>, ConfigError> {
    let mut settings = Map::new();
    let Some(skills) = project.skills.as_ref() else {
        return Ok(settings);
    };

    for name in requested {
        match skills.get(name.as_str()).cloned().map(yaml_to_json) {
            Some(Value::Object(block)) => {
                let resolved = resolve_setting_paths(&block, base_path)?;
                settings.insert(name.clone(), Value::Object(resolved));
            }
            Some(Value::Null) => {
                settings.insert(name.clone(), Value::Object(Map::new()));
            }
            Some(_) => {
                sink.warn(&format!("Settings for {name} are not a mapping, ignoring"));
            }
            None => {}
        }
    }

    Ok(settings)
}

/// Copy a settings block, rewriting string `_path` values to absolute paths.
///
/// # Errors
///
/// Returns [`ConfigError::SettingPath`] if a value escapes `base_path`.
pub fn resolve_setting_paths(
    block: &Map<String, Value>,
    base_path: &str,
) -> Result<Map<String, Value>, ConfigError> {
    let mut resolved = block.clone();
    for (key, value) in &mut resolved {
        if !key.ends_with(PATH_SETTING_SUFFIX) {
            continue;
        }
        if let Value::String(relative) = value {
            let absolute = paths::resolve(base_path, relative).map_err(|source| {
                ConfigError::SettingPath {
                    key: key.clone(),
                    source,
                }
            })?;
            *value = Value::String(absolute);
        }
    }
    Ok(resolved)
}
