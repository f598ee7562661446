//! Registry-level workspace queries.
//!
//! Everything here works against a [`WorkspaceStore`], so the state root is
//! whatever the caller built the store with.

use crate::core::workspace::{Workspace, WorkspaceDetail, is_valid_name};
use crate::error::{Error, Result};
use crate::storage::{Record, WorkspaceStore};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

/// History lines shown by `view`.
pub const RECENT_HISTORY_LINES: usize = 5;

/// History lines shown by `history` when no count is given.
pub const DEFAULT_HISTORY_LINES: usize = 20;

/// Aggregate figures across all workspaces.
#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    /// Number of workspaces.
    pub total_workspaces: usize,

    /// Sum of every workspace's command count.
    pub total_commands: u64,

    /// `total_commands / total_workspaces`.
    pub average_commands: f64,

    /// Earliest-created workspace.
    pub oldest: Workspace,

    /// Latest-created workspace.
    pub newest: Workspace,
}

impl Stats {
    /// Aggregate a set of workspaces, or `None` if there are none.
    ///
    /// Oldest and newest come from a linear scan; on equal timestamps the
    /// first one seen wins.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Counts are far below 2^52
    pub fn from_workspaces(workspaces: &[Workspace]) -> Option<Self> {
        let first = workspaces.first()?;
        let mut oldest = first;
        let mut newest = first;
        let mut total_commands = 0u64;

        for ws in workspaces {
            total_commands = total_commands.saturating_add(ws.command_count);
            if ws.created_at < oldest.created_at {
                oldest = ws;
            }
            if ws.created_at > newest.created_at {
                newest = ws;
            }
        }

        Some(Self {
            total_workspaces: workspaces.len(),
            total_commands,
            average_commands: total_commands as f64 / workspaces.len() as f64,
            oldest: oldest.clone(),
            newest: newest.clone(),
        })
    }
}

/// Create a workspace stamped with the current time.
///
/// # Errors
///
/// Returns `InvalidName` before touching storage, `AlreadyExists`, or an I/O
/// error from the store.
pub fn create(store: &dyn WorkspaceStore, name: &str) -> Result<Workspace> {
    create_at(store, name, Utc::now())
}

/// Create a workspace with an explicit creation time.
///
/// # Errors
///
/// Same as [`create`].
pub fn create_at(
    store: &dyn WorkspaceStore,
    name: &str,
    created_at: DateTime<Utc>,
) -> Result<Workspace> {
    if !is_valid_name(name) {
        return Err(Error::InvalidName(name.to_string()));
    }
    store.create(name, created_at)?;
    load(store, name)
}

/// Fail with `NotFound` unless `name` is a valid name of an existing workspace.
///
/// Invalid names never reach the store, so `""`, `.` and `..` cannot resolve
/// to the root or anything above it.
///
/// # Errors
///
/// Returns `NotFound` for an invalid or absent name.
pub fn require_workspace(store: &dyn WorkspaceStore, name: &str) -> Result<()> {
    if is_valid_name(name) && store.exists(name) {
        Ok(())
    } else {
        Err(Error::NotFound(name.to_string()))
    }
}

/// Delete a workspace. Callers are responsible for confirmation.
///
/// # Errors
///
/// Returns `NotFound` if the workspace does not exist, or an I/O error.
pub fn delete(store: &dyn WorkspaceStore, name: &str) -> Result<()> {
    require_workspace(store, name)?;
    store.delete(name)
}

/// Load one workspace record.
///
/// # Errors
///
/// Returns `NotFound` if the workspace does not exist, or an I/O error if
/// its config cannot be read.
pub fn load(store: &dyn WorkspaceStore, name: &str) -> Result<Workspace> {
    require_workspace(store, name)?;
    let record = store.read_config(name)?;
    Ok(Workspace::from_record(name, store.workspace_dir(name), &record))
}

/// All workspaces, newest first.
///
/// A workspace whose config cannot be read is still listed, with defaults.
///
/// # Errors
///
/// Returns an error if the store itself cannot be enumerated.
pub fn list(store: &dyn WorkspaceStore) -> Result<Vec<Workspace>> {
    let mut workspaces: Vec<Workspace> = store
        .list_names()?
        .into_iter()
        .map(|name| {
            let record = store.read_config(&name).unwrap_or_else(|e| {
                warn!(workspace = %name, error = %e, "cannot read config");
                Record::new()
            });
            Workspace::from_record(&name, store.workspace_dir(&name), &record)
        })
        .collect();

    // Stable sort keeps store order for equal timestamps
    workspaces.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(workspaces)
}

/// A workspace with its last few history lines.
///
/// # Errors
///
/// Returns `NotFound` if the workspace does not exist, or an I/O error.
pub fn view(store: &dyn WorkspaceStore, name: &str) -> Result<WorkspaceDetail> {
    let workspace = load(store, name)?;
    let recent_history = tail(store.read_history(name)?, RECENT_HISTORY_LINES);
    Ok(WorkspaceDetail {
        workspace,
        recent_history,
    })
}

/// Aggregate statistics.
///
/// # Errors
///
/// Returns `Empty` when there are no workspaces, or an enumeration error.
pub fn stats(store: &dyn WorkspaceStore) -> Result<Stats> {
    Stats::from_workspaces(&list(store)?).ok_or(Error::Empty)
}

/// The last `n` non-empty history lines, oldest first.
///
/// Returns `None` when the history has no entries at all, so callers can say
/// so instead of printing nothing.
///
/// # Errors
///
/// Returns `NotFound` if the workspace does not exist, or an I/O error.
pub fn history(store: &dyn WorkspaceStore, name: &str, n: usize) -> Result<Option<Vec<String>>> {
    require_workspace(store, name)?;
    let lines = store.read_history(name)?;
    if lines.iter().all(|line| line.trim().is_empty()) {
        return Ok(None);
    }
    Ok(Some(tail(lines, n)))
}

/// Keep the last `n` lines that are not blank.
fn tail(lines: Vec<String>, n: usize) -> Vec<String> {
    let mut kept: Vec<String> = lines
        .into_iter()
        .filter(|line| !line.trim().is_empty())
        .collect();
    let start = kept.len().saturating_sub(n);
    kept.split_off(start)
}
