//! Skill Resolver - deterministic config and knowledge resolution for Claude Code skills.

pub mod commands;
pub mod config;
pub mod diagnostics;
pub mod knowledge;
pub mod paths;
pub mod project;
