//! Diagnostic side-channel for resolver warnings.
//!
//! Resolvers never print. They report non-fatal problems to a
//! [`DiagnosticSink`] handed in by the caller, which keeps stdout free for the
//! JSON result and lets tests capture warnings without touching the process.

use std::sync::{Mutex, PoisonError};

/// Destination for human-readable warnings.
pub trait DiagnosticSink: Send + Sync {
    /// Record a warning.
    fn warn(&self, message: &str);
}

/// Sink that forwards warnings to `tracing`.
///
/// The binary installs a subscriber writing to stderr, so these end up on
/// the error channel.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }
}

/// Sink that keeps warnings in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    messages: Mutex<Vec<String>>,
}

impl CollectingSink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the warnings recorded so far.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}

impl DiagnosticSink for CollectingSink {
    fn warn(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}
