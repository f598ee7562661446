//! Workspace records.

use crate::storage::Record;
use crate::storage::traits::{KEY_COMMANDS, KEY_CREATED};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use tracing::warn;

/// Maximum workspace name length in characters.
pub const MAX_NAME_LEN: usize = 255;

/// A named, directory-backed unit of logging state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Workspace {
    /// Workspace name, unique within the store.
    pub name: String,

    /// When the workspace was created. Unix epoch when the record is unreadable.
    pub created_at: DateTime<Utc>,

    /// Directory owning the workspace's files.
    pub path: PathBuf,

    /// Commands logged, as maintained by the shell hook. Zero when unreadable.
    pub command_count: u64,
}

impl Workspace {
    /// Build a workspace from its decoded config record.
    ///
    /// Corrupt fields never fail the load: a bad `created` becomes the epoch
    /// and a bad `commands` becomes zero.
    #[must_use]
    pub fn from_record(name: &str, path: PathBuf, record: &Record) -> Self {
        Self {
            name: name.to_string(),
            created_at: parse_or_default(name, KEY_CREATED, record, parse_created),
            path,
            command_count: parse_or_default(name, KEY_COMMANDS, record, |raw| raw.parse().ok()),
        }
    }

    /// Whether the creation timestamp could not be read.
    #[must_use]
    pub fn created_unknown(&self) -> bool {
        self.created_at == DateTime::<Utc>::UNIX_EPOCH
    }
}

/// Workspace plus the tail of its history, for `view`.
#[derive(Debug, Clone, Serialize)]
pub struct WorkspaceDetail {
    /// The workspace itself.
    #[serde(flatten)]
    pub workspace: Workspace,

    /// Most recent non-empty history lines, oldest first.
    pub recent_history: Vec<String>,
}

/// Check a workspace name against `[A-Za-z0-9_-]{1,255}`.
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    (1..=MAX_NAME_LEN).contains(&name.len())
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// Parse a record field, falling back to the type's default.
///
/// Missing fields fall back silently; present but malformed ones are logged.
fn parse_or_default<T, F>(workspace: &str, key: &str, record: &Record, parse: F) -> T
where
    T: Default,
    F: FnOnce(&str) -> Option<T>,
{
    let Some(raw) = record.get(key) else {
        return T::default();
    };
    parse(raw).unwrap_or_else(|| {
        warn!(workspace, key, value = %raw, "unreadable config field, using default");
        T::default()
    })
}

fn parse_created(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::codec::decode;
    use proptest::prelude::*;

    fn load(text: &str) -> Workspace {
        Workspace::from_record("demo", PathBuf::from("/ws/demo"), &decode(text))
    }

    #[test]
    fn accepts_typical_name() {
        assert!(is_valid_name("my-project_01"));
    }

    #[test]
    fn rejects_empty_and_too_long() {
        assert!(!is_valid_name(""));
        assert!(is_valid_name(&"a".repeat(255)));
        assert!(!is_valid_name(&"a".repeat(256)));
    }

    #[test]
    fn rejects_separators_and_unicode() {
        for bad in ["a/b", "..", "with space", "dot.name", "é", "tab\t"] {
            assert!(!is_valid_name(bad), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn loads_well_formed_record() {
        let ws = load("name=demo\ncreated=2024-05-06T07:08:09+02:00\ncommands=42\n");
        assert_eq!(ws.command_count, 42);
        assert_eq!(
            ws.created_at,
            "2024-05-06T05:08:09Z".parse::<DateTime<Utc>>().unwrap()
        );
        assert!(!ws.created_unknown());
    }

    #[test]
    fn malformed_fields_default() {
        let ws = load("created=yesterday\ncommands=-3\n");
        assert_eq!(ws.command_count, 0);
        assert!(ws.created_unknown());
    }

    #[test]
    fn missing_fields_default() {
        let ws = load("");
        assert_eq!(ws.name, "demo");
        assert_eq!(ws.command_count, 0);
        assert!(ws.created_unknown());
    }

    proptest! {
        #[test]
        fn names_from_allowed_alphabet_are_valid(name in "[A-Za-z0-9_-]{1,255}") {
            prop_assert!(is_valid_name(&name));
        }

        #[test]
        fn any_disallowed_char_is_rejected(
            prefix in "[A-Za-z0-9_-]{0,20}",
            bad in "[^A-Za-z0-9_-]",
            suffix in "[A-Za-z0-9_-]{0,20}",
        ) {
            let name = format!("{prefix}{bad}{suffix}");
            prop_assert!(!is_valid_name(&name));
        }
    }
}
