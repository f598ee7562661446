//! Error types for bashlog.

use std::io;
use thiserror::Error;

/// Result type alias for bashlog operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in bashlog operations.
///
/// Every variant is terminal for the command that produced it.
#[derive(Debug, Error)]
pub enum Error {
    /// Workspace name outside `[A-Za-z0-9_-]{1,255}`.
    #[error("invalid workspace name '{0}' (use 1-255 letters, digits, hyphens or underscores)")]
    InvalidName(String),

    /// Workspace already exists.
    #[error("workspace '{0}' already exists")]
    AlreadyExists(String),

    /// Workspace not found.
    #[error("workspace '{0}' not found")]
    NotFound(String),

    /// Nothing to aggregate.
    #[error("no workspaces found")]
    Empty,

    /// Timezone name could not be resolved.
    #[error("invalid timezone: {0}")]
    InvalidTimezone(String),

    /// Caller-supplied session date or time in the wrong format.
    #[error("invalid session {field} '{value}' (expected {expected})")]
    InvalidSessionTime {
        /// Which override was rejected ("date" or "time").
        field: &'static str,
        /// The rejected value.
        value: String,
        /// Human-readable expected format.
        expected: &'static str,
    },

    /// Filesystem error while creating, reading, writing or removing state.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// The child shell could not be started or did not exit normally.
    #[error("failed to run shell: {0}")]
    LaunchFailure(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}
