//! Command implementations behind the CLI.
//!
//! Each command returns the text destined for stdout. The binary prints it,
//! or prints the error on stderr and exits non-zero.

mod project_name;
mod resolve_config;
mod resolve_knowledge;

use std::path::PathBuf;

use serde::Serialize;

use crate::config::ConfigError;

pub use project_name::*;
pub use resolve_config::*;
pub use resolve_knowledge::*;

/// Errors that abort a command.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Path does not exist: {0}")]
    PathNotFound(PathBuf),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Failed to determine project name")]
    BlankProjectName,

    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Pretty-print a result with two-space indentation.
fn render<T: Serialize>(value: &T) -> Result<String, CommandError> {
    Ok(serde_json::to_string_pretty(value)?)
}
