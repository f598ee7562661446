//! Workspace registry and session management.

pub mod launcher;
pub mod registry;
pub mod session;
pub mod workspace;

pub use launcher::Launcher;
pub use registry::Stats;
pub use session::{SessionConfig, SessionOverrides};
pub use workspace::{Workspace, WorkspaceDetail, is_valid_name};
