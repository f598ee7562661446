//! Configuration loading and management.
//!
//! Configuration is loaded with the following precedence:
//! 1. Environment variables (`BASHLOG_*`)
//! 2. Config file (`~/.bashlog/config.toml`)
//! 3. Defaults

use crate::core::launcher::DEFAULT_HISTORY_SIZE;
use crate::core::registry::DEFAULT_HISTORY_LINES;
use crate::core::session::DEFAULT_TIMEZONE;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Registry state root directory name under `$HOME`.
const WORKSPACES_DIR: &str = ".bashlog-workspaces";

/// Launcher state root directory name under `$HOME`.
const STATE_DIR: &str = ".bashlog";

/// Main configuration struct.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,

    /// Session launcher configuration.
    pub session: SessionSettings,

    /// History display configuration.
    pub history: HistoryConfig,
}

/// Storage configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Root directory holding one subdirectory per workspace.
    pub workspaces_path: PathBuf,

    /// Root directory for session logs and the RC file.
    pub state_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            workspaces_path: home_path(WORKSPACES_DIR),
            state_path: home_path(STATE_DIR),
        }
    }
}

/// Session launcher configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Timezone used when `--tz` is not given.
    pub default_timezone: String,

    /// Shell program; falls back to `$SHELL`.
    pub shell: Option<String>,

    /// `HISTSIZE` and `HISTFILESIZE` written to the RC file.
    pub history_size: u32,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            default_timezone: DEFAULT_TIMEZONE.to_string(),
            shell: None,
            history_size: DEFAULT_HISTORY_SIZE,
        }
    }
}

/// History display configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Lines shown by `history` when no count is given.
    pub default_lines: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            default_lines: DEFAULT_HISTORY_LINES,
        }
    }
}

fn home_path(dir: &str) -> PathBuf {
    dirs::home_dir().map_or_else(|| PathBuf::from(dir), |h| h.join(dir))
}

/// Load configuration with precedence: env vars → file → defaults.
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be read or parsed.
pub fn load_config() -> Result<Config> {
    let mut config = Config::default();

    let config_path = get_config_path();
    if config_path.exists() {
        let contents = fs::read_to_string(&config_path)?;
        config = parse_config(&contents)?;
    }

    apply_env_overrides(&mut config, |key| env::var(key).ok());

    Ok(config)
}

/// Parse a TOML config document.
///
/// # Errors
///
/// Returns `Config` if the document is not valid TOML for [`Config`].
pub fn parse_config(contents: &str) -> Result<Config> {
    toml::from_str(contents).map_err(|e| Error::Config(e.to_string()))
}

/// Get the path to the config file.
fn get_config_path() -> PathBuf {
    if let Ok(path) = env::var("BASHLOG_CONFIG") {
        return PathBuf::from(path);
    }

    if let Ok(home) = env::var("BASHLOG_HOME") {
        return PathBuf::from(home).join("config.toml");
    }

    home_path(STATE_DIR).join("config.toml")
}

/// Apply environment variable overrides to config.
fn apply_env_overrides(config: &mut Config, var: impl Fn(&str) -> Option<String>) {
    if let Some(home) = var("BASHLOG_HOME") {
        config.storage.state_path = PathBuf::from(home);
    }

    if let Some(path) = var("BASHLOG_WORKSPACES") {
        config.storage.workspaces_path = PathBuf::from(path);
    }

    if let Some(shell) = var("BASHLOG_SHELL") {
        config.session.shell = Some(shell);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.session.default_timezone, "UTC");
        assert_eq!(config.session.history_size, 10_000);
        assert!(config.session.shell.is_none());
        assert_eq!(config.history.default_lines, 20);
        assert!(config.storage.workspaces_path.ends_with(".bashlog-workspaces"));
        assert!(config.storage.state_path.ends_with(".bashlog"));
    }

    #[test]
    fn parse_config_toml() {
        let toml = r#"
            [storage]
            workspaces_path = "/data/ws"
            state_path = "/data/state"

            [session]
            default_timezone = "Europe/Berlin"
            shell = "/bin/zsh"
            history_size = 500

            [history]
            default_lines = 50
        "#;

        let config = parse_config(toml).unwrap();
        assert_eq!(config.storage.workspaces_path, PathBuf::from("/data/ws"));
        assert_eq!(config.storage.state_path, PathBuf::from("/data/state"));
        assert_eq!(config.session.default_timezone, "Europe/Berlin");
        assert_eq!(config.session.shell.as_deref(), Some("/bin/zsh"));
        assert_eq!(config.session.history_size, 500);
        assert_eq!(config.history.default_lines, 50);
    }

    #[test]
    fn partial_config_uses_defaults() {
        let toml = r"
            [history]
            default_lines = 5
        ";

        let config = parse_config(toml).unwrap();
        assert_eq!(config.history.default_lines, 5);
        assert_eq!(config.session.default_timezone, "UTC"); // Default
        assert_eq!(config.session.history_size, 10_000); // Default
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let err = parse_config("[history\ndefault_lines = ").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn env_overrides_take_precedence() {
        let vars: HashMap<&str, &str> = [
            ("BASHLOG_HOME", "/tmp/state"),
            ("BASHLOG_WORKSPACES", "/tmp/ws"),
            ("BASHLOG_SHELL", "/bin/dash"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        apply_env_overrides(&mut config, |key| vars.get(key).map(ToString::to_string));

        assert_eq!(config.storage.state_path, PathBuf::from("/tmp/state"));
        assert_eq!(config.storage.workspaces_path, PathBuf::from("/tmp/ws"));
        assert_eq!(config.session.shell.as_deref(), Some("/bin/dash"));
    }
}
