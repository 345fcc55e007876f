//! Configuration module.
//!
//! Resolves the global config, the per-project overrides and the requested
//! skill settings for one working directory.

mod loader;
mod resolver;
mod types;
mod yaml;

pub use loader::*;
pub use resolver::*;
pub use types::*;
pub use yaml::yaml_to_json;
