//! `bashlog-mgr delete` command implementation.

use crate::core::registry;
use crate::error::Result;
use crate::storage::WorkspaceStore;
use std::io::{BufRead, Write};

/// Run the delete command.
///
/// Asks for confirmation on `input` unless `assume_yes` is set. Anything but
/// `yes` or `y` cancels, which is not an error.
///
/// # Errors
///
/// Returns `NotFound` if the workspace does not exist, or an I/O error.
pub fn run(
    store: &dyn WorkspaceStore,
    name: &str,
    assume_yes: bool,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<()> {
    registry::require_workspace(store, name)?;

    if !assume_yes && !confirm(name, input, out)? {
        writeln!(out, "Deletion cancelled")?;
        return Ok(());
    }

    registry::delete(store, name)?;
    writeln!(out, "✓ Workspace '{name}' deleted successfully")?;
    Ok(())
}

/// Prompt for a yes/no answer. EOF counts as no.
fn confirm(name: &str, input: &mut dyn BufRead, out: &mut dyn Write) -> Result<bool> {
    write!(
        out,
        "Are you sure you want to delete workspace '{name}'? (yes/no): "
    )?;
    out.flush()?;

    let mut response = String::new();
    input.read_line(&mut response)?;
    let response = response.trim().to_lowercase();
    Ok(response == "yes" || response == "y")
}
