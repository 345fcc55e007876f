//! Worktree-aware project identity.
//!
//! All worktrees of one repository share a single git common directory, so
//! naming a project after the parent of that directory gives every checkout
//! the same configuration store.

mod error;
mod git;
mod identity;

pub use error::GitRepoError;
pub use git::{GitCli, GitProbe, GIT_TIMEOUT};
pub use identity::ProjectIdentity;
