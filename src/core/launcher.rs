//! RC file generation and the supervised child shell.

use crate::core::session::SessionConfig;
use crate::error::{Error, Result};
use crate::storage::file::write_atomic;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use tracing::info;

/// Shell used when neither config nor `$SHELL` names one.
pub const DEFAULT_SHELL: &str = "/bin/bash";

/// Default `HISTSIZE` / `HISTFILESIZE`.
pub const DEFAULT_HISTORY_SIZE: u32 = 10_000;

/// Child environment: the parent's variables with session overrides applied.
pub type Environment = BTreeMap<OsString, OsString>;

/// Launches logged shell sessions.
#[derive(Debug, Clone)]
pub struct Launcher {
    shell: PathBuf,
    args: Vec<String>,
    history_size: u32,
}

impl Launcher {
    /// Launcher for an interactive `shell`.
    #[must_use]
    pub fn new(shell: PathBuf, history_size: u32) -> Self {
        Self {
            shell,
            args: vec!["-i".to_string()],
            history_size,
        }
    }

    /// Launcher whose shell comes from config, then `$SHELL`, then the default.
    #[must_use]
    pub fn from_env(configured_shell: Option<&str>, history_size: u32) -> Self {
        Self::new(
            resolve_shell(configured_shell, env::var_os("SHELL")),
            history_size,
        )
    }

    /// Replace the arguments passed to the shell.
    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// The shell program that will be started.
    #[must_use]
    pub fn shell(&self) -> &Path {
        &self.shell
    }

    /// Overwrite the shared RC file with this session's settings.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file or its directory cannot be written.
    pub fn write_rc(&self, config: &SessionConfig) -> Result<()> {
        if let Some(dir) = config.rc_file.parent() {
            fs::create_dir_all(dir)?;
        }
        let contents = render_rc(config, self.history_size, Utc::now());
        write_atomic(&config.rc_file, &contents)?;
        info!(path = %config.rc_file.display(), "RC file written");
        Ok(())
    }

    /// Run the shell attached to this terminal and wait for it to exit.
    ///
    /// Exactly one child is spawned; there is no retry.
    ///
    /// # Errors
    ///
    /// Returns `LaunchFailure` if the shell cannot be started or is killed
    /// by a signal.
    pub fn launch(&self, config: &SessionConfig) -> Result<ExitStatus> {
        let environment = session_environment(env::vars_os(), config);

        info!(shell = %self.shell().display(), "starting shell");
        info!(log_file = %config.log_file().display(), "logging session");

        let status = Command::new(&self.shell)
            .args(&self.args)
            .env_clear()
            .envs(&environment)
            .status()
            .map_err(|e| Error::LaunchFailure(format!("{}: {e}", self.shell.display())))?;

        if status.code().is_none() {
            return Err(Error::LaunchFailure(format!(
                "{} terminated abnormally ({status})",
                self.shell.display()
            )));
        }
        Ok(status)
    }
}

/// Pick the shell program: configured, then `$SHELL`, then [`DEFAULT_SHELL`].
#[must_use]
pub fn resolve_shell(configured: Option<&str>, env_shell: Option<OsString>) -> PathBuf {
    configured
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .or_else(|| env_shell.filter(|s| !s.is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SHELL))
}

/// Build the child environment as `base` plus the session variables.
///
/// Session variables replace any inherited value of the same name.
pub fn session_environment<I>(base: I, config: &SessionConfig) -> Environment
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    let mut environment: Environment = base.into_iter().collect();
    environment.extend(
        [
            ("BASHLOG_SESSION_ID", OsString::from(&config.session_id)),
            ("BASHLOG_LOG_FILE", config.log_file().into_os_string()),
            ("BASHLOG_TIMEZONE", OsString::from(&config.timezone)),
        ]
        .map(|(key, value)| (OsString::from(key), value)),
    );
    environment
}

/// Render the shell-sourceable RC script.
#[must_use]
pub fn render_rc(config: &SessionConfig, history_size: u32, generated_at: DateTime<Utc>) -> String {
    format!(
        r#"# Bashlog RC Configuration
# Generated at {generated}

# Timezone setting
export BASHLOG_TIMEZONE="{timezone}"

# Logging directory
export BASHLOG_LOG_DIR="{log_dir}"

# Session ID
export BASHLOG_SESSION_ID="{session_id}"

# Enable logging
export BASHLOG_ENABLED=1

# Log history
export HISTFILE="{histfile}"
export HISTSIZE={history_size}
export HISTFILESIZE={history_size}

# Log command execution
PROMPT_COMMAND="history -a; $PROMPT_COMMAND"
"#,
        generated = generated_at.format("%Y-%m-%d %H:%M:%S"),
        timezone = config.timezone,
        log_dir = config.log_dir.display(),
        session_id = config.session_id,
        histfile = config.history_file().display(),
    )
}
