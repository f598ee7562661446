//! CLI command implementations.
//!
//! Each command writes to the output it is handed.

pub mod create;
pub mod delete;
pub mod history;
pub mod list;
pub mod session;
pub mod stats;
pub mod view;

use crate::core::Workspace;
use chrono::{DateTime, Local};

/// Format a workspace's creation time in local time, or `unknown`.
fn format_created(workspace: &Workspace, format: &str) -> String {
    if workspace.created_unknown() {
        return "unknown".to_string();
    }
    let local: DateTime<Local> = workspace.created_at.into();
    local.format(format).to_string()
}
