//! `bashlog-mgr stats` command implementation.

use crate::cli::format_created;
use crate::core::registry::{self, Stats};
use crate::error::{Error, Result};
use crate::storage::WorkspaceStore;
use std::io::Write;

/// Run the stats command.
///
/// An empty store prints a short notice and succeeds.
///
/// # Errors
///
/// Returns an error if the store cannot be enumerated or output fails.
pub fn run(store: &dyn WorkspaceStore, out: &mut dyn Write) -> Result<()> {
    match registry::stats(store) {
        Ok(stats) => render(&stats, out),
        Err(Error::Empty) => {
            writeln!(out, "No workspaces found")?;
            Ok(())
        }
        Err(e) => Err(e),
    }
}

fn render(stats: &Stats, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "\n=== Workspace Statistics ===")?;
    writeln!(out, "Total Workspaces: {}", stats.total_workspaces)?;
    writeln!(out, "Total Commands Logged: {}", stats.total_commands)?;
    writeln!(
        out,
        "Average Commands per Workspace: {:.2}",
        stats.average_commands
    )?;
    writeln!(
        out,
        "Oldest Workspace: {} (created {})",
        stats.oldest.name,
        format_created(&stats.oldest, "%Y-%m-%d")
    )?;
    writeln!(
        out,
        "Newest Workspace: {} (created {})",
        stats.newest.name,
        format_created(&stats.newest, "%Y-%m-%d")
    )?;
    writeln!(out)?;
    Ok(())
}
