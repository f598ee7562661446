//! In-memory storage backend for testing.

use crate::error::{Error, Result};
use crate::storage::codec::{self, Record};
use crate::storage::traits::{WorkspaceStore, initial_config};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

#[derive(Debug, Clone, Default)]
struct Entry {
    config: String,
    history: String,
}

/// In-memory storage backend for testing.
///
/// Config and history are kept as raw text so they go through the same codec
/// and line splitting as the file backend.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    workspaces: RwLock<BTreeMap<String, Entry>>,
}

impl MemoryBackend {
    /// Create a new in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a workspace's raw config text, creating the workspace if needed.
    ///
    /// Lets tests plant hand-written or corrupt records.
    pub fn put_config(&self, name: &str, text: &str) {
        let mut workspaces = self.workspaces.write().unwrap();
        workspaces.entry(name.to_string()).or_default().config = text.to_string();
    }
}

impl WorkspaceStore for MemoryBackend {
    fn workspace_dir(&self, name: &str) -> PathBuf {
        PathBuf::from("memory").join(name)
    }

    fn exists(&self, name: &str) -> bool {
        self.workspaces.read().unwrap().contains_key(name)
    }

    fn create(&self, name: &str, created_at: DateTime<Utc>) -> Result<()> {
        let mut workspaces = self.workspaces.write().unwrap();
        if workspaces.contains_key(name) {
            return Err(Error::AlreadyExists(name.to_string()));
        }
        workspaces.insert(
            name.to_string(),
            Entry {
                config: codec::encode(initial_config(name, created_at)),
                history: String::new(),
            },
        );
        Ok(())
    }

    fn delete(&self, name: &str) -> Result<()> {
        self.workspaces
            .write()
            .unwrap()
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }

    fn list_names(&self) -> Result<Vec<String>> {
        Ok(self.workspaces.read().unwrap().keys().cloned().collect())
    }

    fn read_config(&self, name: &str) -> Result<Record> {
        let workspaces = self.workspaces.read().unwrap();
        Ok(workspaces
            .get(name)
            .map(|entry| codec::decode(&entry.config))
            .unwrap_or_default())
    }

    fn append_history(&self, name: &str, line: &str) -> Result<()> {
        let mut workspaces = self.workspaces.write().unwrap();
        let entry = workspaces
            .get_mut(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))?;
        entry.history.push_str(line);
        entry.history.push('\n');
        Ok(())
    }

    fn read_history(&self, name: &str) -> Result<Vec<String>> {
        let workspaces = self.workspaces.read().unwrap();
        let entry = workspaces
            .get(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))?;
        Ok(entry.history.lines().map(str::to_string).collect())
    }
}
