//! `bashlog-mgr create` command implementation.

use crate::core::registry;
use crate::error::Result;
use crate::storage::WorkspaceStore;
use std::io::Write;

/// Run the create command.
///
/// # Errors
///
/// Returns `InvalidName`, `AlreadyExists`, or an I/O error.
pub fn run(store: &dyn WorkspaceStore, name: &str, out: &mut dyn Write) -> Result<()> {
    let workspace = registry::create(store, name)?;
    writeln!(
        out,
        "✓ Workspace '{}' created successfully at {}",
        workspace.name,
        workspace.path.display()
    )?;
    Ok(())
}
