//! `bashlog-mgr view` command implementation.

use crate::cli::format_created;
use crate::core::registry::{self, RECENT_HISTORY_LINES};
use crate::error::Result;
use crate::storage::WorkspaceStore;
use std::io::Write;

/// Run the view command.
///
/// Prints the workspace details and its most recent history, or the same
/// detail as JSON.
///
/// # Errors
///
/// Returns `NotFound` if the workspace does not exist, or an I/O error.
pub fn run(store: &dyn WorkspaceStore, name: &str, json: bool, out: &mut dyn Write) -> Result<()> {
    let detail = registry::view(store, name)?;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&detail)?)?;
        return Ok(());
    }

    let ws = &detail.workspace;
    writeln!(out, "\n=== Workspace: {} ===", ws.name)?;
    writeln!(out, "Path: {}", ws.path.display())?;
    writeln!(out, "Created: {}", format_created(ws, "%Y-%m-%d %H:%M:%S %:z"))?;
    writeln!(out, "Commands Logged: {}", ws.command_count)?;

    if !detail.recent_history.is_empty() {
        writeln!(out, "\nRecent Commands (last {RECENT_HISTORY_LINES}):")?;
        for line in &detail.recent_history {
            writeln!(out, "  {line}")?;
        }
    }
    writeln!(out)?;

    Ok(())
}
