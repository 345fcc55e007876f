//! `resolve-config` command.

use std::path::PathBuf;

use crate::config::{validate_cwd, validate_setting_name, ConfigResolver, GlobalConfigLoader};
use crate::diagnostics::DiagnosticSink;
use crate::project::ProjectIdentity;

use super::{render, CommandError};

/// Arguments for `resolve-config`.
#[derive(Debug, Clone, Default)]
pub struct ResolveConfigArgs {
    /// Working directory used to derive the project.
    pub cwd: String,
    /// Skill setting names to extract.
    pub settings: Vec<String>,
    /// Global config file to use instead of `~/.claude/global-config.yaml`.
    pub global_config: Option<PathBuf>,
}

/// Resolve configuration and render it as JSON.
///
/// Arguments are validated before the home directory is looked up.
///
/// # Errors
///
/// Returns [`CommandError::Config`] for invalid arguments and fatal
/// configuration problems.
pub async fn resolve_config(
    args: &ResolveConfigArgs,
    sink: &dyn DiagnosticSink,
) -> Result<String, CommandError> {
    validate_cwd(&args.cwd)?;
    for name in &args.settings {
        validate_setting_name(name)?;
    }

    let resolver = match &args.global_config {
        Some(path) => ConfigResolver::with_parts(
            GlobalConfigLoader::with_path(path.clone()),
            ProjectIdentity::new(),
        ),
        None => ConfigResolver::new()?,
    };

    let resolved = resolver.resolve(&args.cwd, &args.settings, sink).await?;
    render(&resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::diagnostics::CollectingSink;

    #[tokio::test]
    async fn test_invalid_setting_rejected_before_io() {
        let args = ResolveConfigArgs {
            cwd: "/work/repo".to_string(),
            settings: vec!["Bad Name".to_string()],
            global_config: Some(PathBuf::from("/nonexistent/global.yaml")),
        };

        let err = resolve_config(&args, &CollectingSink::new()).await.unwrap_err();
        assert!(matches!(
            err,
            CommandError::Config(ConfigError::InvalidSettingName(_))
        ));
    }

    #[tokio::test]
    async fn test_arguments_validated_before_default_config_lookup() {
        let args = ResolveConfigArgs {
            cwd: "   ".to_string(),
            settings: vec!["managing-tickets".to_string()],
            global_config: None,
        };
        let err = resolve_config(&args, &CollectingSink::new()).await.unwrap_err();
        assert!(matches!(err, CommandError::Config(ConfigError::InvalidCwd(_))));

        let args = ResolveConfigArgs {
            cwd: "/work/repo".to_string(),
            settings: vec!["Bad Name".to_string()],
            global_config: None,
        };
        let err = resolve_config(&args, &CollectingSink::new()).await.unwrap_err();
        assert!(matches!(
            err,
            CommandError::Config(ConfigError::InvalidSettingName(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_global_config_is_fatal() {
        let temp = tempfile::TempDir::new().unwrap();
        let args = ResolveConfigArgs {
            cwd: temp.path().to_string_lossy().into_owned(),
            settings: Vec::new(),
            global_config: Some(temp.path().join("missing.yaml")),
        };

        let err = resolve_config(&args, &CollectingSink::new()).await.unwrap_err();
        assert!(err.to_string().starts_with("Global config not found"));
    }
}
