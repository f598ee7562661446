//! `bashlog-mgr history` command implementation.

use crate::core::registry;
use crate::error::Result;
use crate::storage::WorkspaceStore;
use std::io::Write;

/// Run the history command.
///
/// Prints the last `lines` entries, numbered from 1.
///
/// # Errors
///
/// Returns `NotFound` if the workspace does not exist, or an I/O error.
pub fn run(
    store: &dyn WorkspaceStore,
    name: &str,
    lines: usize,
    out: &mut dyn Write,
) -> Result<()> {
    let Some(entries) = registry::history(store, name, lines)? else {
        writeln!(out, "No command history for workspace '{name}'")?;
        return Ok(());
    };

    writeln!(
        out,
        "\n=== Command History for '{name}' (last {lines} commands) ==="
    )?;
    writeln!(out, "{}", "-".repeat(80))?;
    for (i, entry) in entries.iter().enumerate() {
        writeln!(out, "{:3}. {entry}", i + 1)?;
    }
    writeln!(out)?;

    Ok(())
}
