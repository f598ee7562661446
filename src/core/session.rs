//! Session identity and paths.

use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use std::fs;
use std::path::{Path, PathBuf};

/// Timezone used when none is given.
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Calendar format for session dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Clock format for session times.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// RC file name under the state root. Shared by every session.
pub const RC_FILE: &str = "bashlog.rc";

/// Caller-supplied values for a session. Empty strings count as unset.
#[derive(Debug, Clone, Default)]
pub struct SessionOverrides {
    /// IANA timezone name.
    pub timezone: Option<String>,

    /// Date in `YYYY-MM-DD`.
    pub date: Option<String>,

    /// Time in `HH:MM:SS`.
    pub time: Option<String>,
}

/// Everything needed to launch one logged shell session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Resolved timezone name.
    pub timezone: String,

    /// Session date.
    pub date: String,

    /// Session start time.
    pub time: String,

    /// Identifier derived from date and time.
    pub session_id: String,

    /// Per-date log directory.
    pub log_dir: PathBuf,

    /// Shared RC file path.
    pub rc_file: PathBuf,
}

impl SessionConfig {
    /// Build a session config for the current moment.
    ///
    /// Creates the log directory as a side effect.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTimezone`, `InvalidSessionTime` for a malformed date or
    /// time override, or an I/O error if the log directory cannot be created.
    pub fn build(state_root: &Path, overrides: &SessionOverrides) -> Result<Self> {
        Self::build_at(state_root, overrides, Utc::now())
    }

    /// Build a session config as if the current moment were `now`.
    ///
    /// # Errors
    ///
    /// Same as [`SessionConfig::build`].
    pub fn build_at(
        state_root: &Path,
        overrides: &SessionOverrides,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let timezone = non_empty(overrides.timezone.as_deref()).unwrap_or(DEFAULT_TIMEZONE);
        let tz: Tz = timezone
            .parse()
            .map_err(|_| Error::InvalidTimezone(timezone.to_string()))?;
        let local = now.with_timezone(&tz);

        let date = match non_empty(overrides.date.as_deref()) {
            Some(date) => validated(date, "date", "YYYY-MM-DD", |s| {
                NaiveDate::parse_from_str(s, DATE_FORMAT).is_ok()
            })?,
            None => local.format(DATE_FORMAT).to_string(),
        };
        let time = match non_empty(overrides.time.as_deref()) {
            Some(time) => validated(time, "time", "HH:MM:SS", |s| {
                NaiveTime::parse_from_str(s, TIME_FORMAT).is_ok()
            })?,
            None => local.format(TIME_FORMAT).to_string(),
        };

        let log_dir = state_root.join("logs").join(&date);
        fs::create_dir_all(&log_dir)?;

        Ok(Self {
            timezone: timezone.to_string(),
            session_id: session_id(&date, &time),
            date,
            time,
            log_dir,
            rc_file: state_root.join(RC_FILE),
        })
    }

    /// Log file for this session inside the log directory.
    #[must_use]
    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join(format!("session_{}.log", self.time))
    }

    /// Shell history file inside the log directory.
    #[must_use]
    pub fn history_file(&self) -> PathBuf {
        self.log_dir.join(".bash_history")
    }
}

/// Deterministic session identifier.
#[must_use]
pub fn session_id(date: &str, time: &str) -> String {
    format!("session_{date}_{time}")
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn validated(
    value: &str,
    field: &'static str,
    expected: &'static str,
    check: impl Fn(&str) -> bool,
) -> Result<String> {
    if check(value) {
        Ok(value.to_string())
    } else {
        Err(Error::InvalidSessionTime {
            field,
            value: value.to_string(),
            expected,
        })
    }
}
