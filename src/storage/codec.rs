//! Flat `key=value` record codec.
//!
//! Values may not contain `=` or newlines; nothing is escaped.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

/// A decoded config record.
pub type Record = HashMap<String, String>;

/// Encode entries as one `key=value` line each, in iteration order.
pub fn encode<I, K, V>(entries: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    entries
        .into_iter()
        .map(|(k, v)| format!("{}={}\n", k.as_ref(), v.as_ref()))
        .collect()
}

/// Decode `key=value` lines, splitting on the first `=`.
///
/// Lines without `=` are skipped. Keys and values are trimmed.
#[must_use]
pub fn decode(text: &str) -> Record {
    text.lines()
        .filter_map(|line| line.split_once('='))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect()
}

/// Read and decode a record file.
///
/// A missing file decodes to an empty record so callers fall back to defaults.
///
/// # Errors
///
/// Returns an error for any read failure other than the file not existing.
pub fn read_record(path: &Path) -> io::Result<Record> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(decode(&text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Record::new()),
        Err(e) => Err(e),
    }
}
