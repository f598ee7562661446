//! `bashlog-mgr list` command implementation.

use crate::cli::format_created;
use crate::core::registry;
use crate::error::Result;
use crate::storage::WorkspaceStore;
use std::io::Write;

/// Run the list command.
///
/// Shows every workspace, newest first.
///
/// # Errors
///
/// Returns an error if the store cannot be enumerated or output fails.
pub fn run(store: &dyn WorkspaceStore, out: &mut dyn Write) -> Result<()> {
    let workspaces = registry::list(store)?;

    if workspaces.is_empty() {
        writeln!(
            out,
            "No workspaces found. Create one with: bashlog-mgr create <name>"
        )?;
        return Ok(());
    }

    writeln!(out, "{:<20} {:<19} {:<10} PATH", "NAME", "CREATED", "COMMANDS")?;
    writeln!(out, "{}", "-".repeat(70))?;

    for ws in &workspaces {
        writeln!(
            out,
            "{:<20} {:<19} {:<10} {}",
            ws.name,
            format_created(ws, "%Y-%m-%d %H:%M:%S"),
            ws.command_count,
            ws.path.display()
        )?;
    }

    Ok(())
}
