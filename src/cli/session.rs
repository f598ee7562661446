//! `bashlog` session setup and launch.

use crate::config::Config;
use crate::core::launcher::Launcher;
use crate::core::session::{SessionConfig, SessionOverrides};
use crate::error::Result;
use std::io::Write;
use std::process::ExitStatus;

/// Build the session, write the RC file and run the shell until it exits.
///
/// `--tz` wins over the configured default timezone.
///
/// # Errors
///
/// Returns any error from building the session, writing the RC file, or
/// launching the shell.
pub fn run(config: &Config, mut overrides: SessionOverrides, out: &mut dyn Write) -> Result<ExitStatus> {
    if overrides.timezone.as_deref().is_none_or(str::is_empty) {
        overrides.timezone = Some(config.session.default_timezone.clone());
    }

    let session = SessionConfig::build(&config.storage.state_path, &overrides)?;
    render_banner(&session, out)?;
    out.flush()?;

    let launcher = Launcher::from_env(config.session.shell.as_deref(), config.session.history_size);
    launcher.write_rc(&session)?;
    launcher.launch(&session)
}

/// Print the session info banner.
fn render_banner(session: &SessionConfig, out: &mut dyn Write) -> Result<()> {
    let rule = "=".repeat(36);
    writeln!(out, "{rule}")?;
    writeln!(out, "         Bashlog Session Info")?;
    writeln!(out, "{rule}")?;
    writeln!(out, "Timezone:    {}", session.timezone)?;
    writeln!(out, "Date:        {}", session.date)?;
    writeln!(out, "Time:        {}", session.time)?;
    writeln!(out, "Session ID:  {}", session.session_id)?;
    writeln!(out, "Log Dir:     {}", session.log_dir.display())?;
    writeln!(out, "RC File:     {}", session.rc_file.display())?;
    writeln!(out, "{rule}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::TempDir;

    fn test_config(temp: &TempDir) -> Config {
        let mut config = Config::default();
        config.storage.state_path = temp.path().to_path_buf();
        config.session.shell = Some("/bin/true".to_string());
        config
    }

    #[test]
    fn banner_lists_session_fields() {
        let temp = TempDir::new().unwrap();
        let session = SessionConfig::build(
            temp.path(),
            &SessionOverrides {
                timezone: None,
                date: Some("2024-01-01".to_string()),
                time: Some("12:00:00".to_string()),
            },
        )
        .unwrap();

        let mut out = Vec::new();
        render_banner(&session, &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();

        assert!(output.contains("Bashlog Session Info"));
        assert!(output.contains("Session ID:  session_2024-01-01_12:00:00"));
        assert!(output.contains("Timezone:    UTC"));
    }

    #[test]
    fn invalid_configured_timezone_stops_before_launch() {
        let temp = TempDir::new().unwrap();
        let mut config = test_config(&temp);
        config.session.default_timezone = "Nowhere/Special".to_string();

        let mut out = Vec::new();
        let err = run(&config, SessionOverrides::default(), &mut out).unwrap_err();

        assert!(matches!(err, Error::InvalidTimezone(_)));
        assert!(out.is_empty());
        assert!(!temp.path().join("bashlog.rc").exists());
    }

    #[cfg(unix)]
    #[test]
    fn full_run_writes_rc_and_returns_status() {
        let temp = TempDir::new().unwrap();
        let config = test_config(&temp);
        let overrides = SessionOverrides {
            timezone: Some("Europe/Paris".to_string()),
            date: Some("2024-07-14".to_string()),
            time: Some("09:00:00".to_string()),
        };

        let mut out = Vec::new();
        let status = run(&config, overrides, &mut out).unwrap();

        assert!(status.success());
        let rc = std::fs::read_to_string(temp.path().join("bashlog.rc")).unwrap();
        assert!(rc.contains("BASHLOG_TIMEZONE=\"Europe/Paris\""));
        assert!(temp.path().join("logs/2024-07-14").is_dir());
    }
}
