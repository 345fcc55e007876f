//! Knowledge layer for skill workflows.
//!
//! Reads a reference document, picks the section for one workflow, and
//! loads every file it lists:
//! - workflow name normalization (shell path mangling, doubled slashes)
//! - section scanning in document order
//! - per-reference loading with fault isolation

mod loader;
mod outcome;
mod refs;
mod resolver;
mod workflow;

pub use loader::*;
pub use outcome::*;
pub use refs::*;
pub use resolver::*;
pub use workflow::*;
