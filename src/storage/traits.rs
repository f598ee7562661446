//! Storage trait definitions.

use crate::error::Result;
use crate::storage::codec::Record;
use chrono::{DateTime, SecondsFormat, Utc};
use std::path::PathBuf;

/// Config record key holding the workspace name.
pub const KEY_NAME: &str = "name";

/// Config record key holding the creation timestamp (RFC 3339).
pub const KEY_CREATED: &str = "created";

/// Config record key holding the advisory command counter.
pub const KEY_COMMANDS: &str = "commands";

/// Storage backend for workspaces.
///
/// A workspace is a directory-like unit holding one config record and one
/// append-only history log. Implementations do not validate names; that is
/// the registry's job.
pub trait WorkspaceStore {
    /// Location that owns the workspace's files. Pure, no I/O.
    fn workspace_dir(&self, name: &str) -> PathBuf;

    /// Whether the workspace exists.
    fn exists(&self, name: &str) -> bool;

    /// Create a workspace with an initial config record and empty history.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyExists` if the workspace exists, or an I/O error if
    /// the directory or either file cannot be created.
    fn create(&self, name: &str, created_at: DateTime<Utc>) -> Result<()>;

    /// Remove a workspace and everything in it. Irreversible.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the workspace is absent, or an I/O error.
    fn delete(&self, name: &str) -> Result<()>;

    /// Names of all workspaces. An uninitialized store has none.
    ///
    /// # Errors
    ///
    /// Returns an error if the store exists but cannot be enumerated.
    fn list_names(&self) -> Result<Vec<String>>;

    /// Decoded config record. A missing config file decodes to an empty record.
    ///
    /// # Errors
    ///
    /// Returns an error if the config exists but cannot be read.
    fn read_config(&self, name: &str) -> Result<Record>;

    /// Append one opaque line to the history log.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the workspace is absent, or an I/O error.
    fn append_history(&self, name: &str, line: &str) -> Result<()>;

    /// History log split into lines, without the trailing-newline artifact.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the workspace is absent, or an I/O error.
    fn read_history(&self, name: &str) -> Result<Vec<String>>;
}

/// Render a creation timestamp in the config wire format.
#[must_use]
pub fn format_created(created_at: DateTime<Utc>) -> String {
    created_at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Config entries written for a freshly created workspace.
#[must_use]
pub fn initial_config(name: &str, created_at: DateTime<Utc>) -> [(&'static str, String); 3] {
    [
        (KEY_NAME, name.to_string()),
        (KEY_CREATED, format_created(created_at)),
        (KEY_COMMANDS, "0".to_string()),
    ]
}
