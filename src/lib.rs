//! bashlog - Bash command logging workspaces and instrumented shell sessions.
//!
//! Two tools share this library: `bashlog-mgr` manages named workspaces
//! (a config record plus an append-only history log per directory), and
//! `bashlog` starts an interactive shell with session variables exported.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod storage;

pub use config::Config;
pub use error::{Error, Result};

/// Get the version string.
///
/// - Release builds (on a git tag): "0.1.0"
/// - Development builds: "0.1.0-dev (abc1234)"
/// - Dirty working directory: "0.1.0-dev (abc1234-dirty)"
#[must_use]
pub fn version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("BASHLOG_GIT_HASH");
    const IS_RELEASE: &str = env!("BASHLOG_IS_RELEASE");

    static VERSION_STRING: std::sync::OnceLock<String> = std::sync::OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" {
            VERSION.to_string()
        } else {
            format!("{VERSION}-dev ({GIT_HASH})")
        }
    })
}
