//! File-based storage backend.
//!
//! Layout under the root:
//!
//! ```text
//! <root>/<name>/config.txt
//! <root>/<name>/history.log
//! ```

use crate::error::{Error, Result};
use crate::storage::codec::{self, Record};
use crate::storage::traits::{WorkspaceStore, initial_config};
use chrono::{DateTime, Utc};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Config record file name inside a workspace directory.
pub const CONFIG_FILE: &str = "config.txt";

/// History log file name inside a workspace directory.
pub const HISTORY_FILE: &str = "history.log";

/// Directory-per-workspace storage backend.
#[derive(Debug, Clone)]
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    /// Create a backend rooted at `root`.
    ///
    /// Nothing is created until the first workspace is.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// The state root this backend manages.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn config_path(&self, name: &str) -> PathBuf {
        self.workspace_dir(name).join(CONFIG_FILE)
    }

    fn history_path(&self, name: &str) -> PathBuf {
        self.workspace_dir(name).join(HISTORY_FILE)
    }

    fn require(&self, name: &str) -> Result<()> {
        if self.exists(name) {
            Ok(())
        } else {
            Err(Error::NotFound(name.to_string()))
        }
    }

    fn write_initial_files(&self, name: &str, created_at: DateTime<Utc>) -> Result<()> {
        write_atomic(
            &self.config_path(name),
            &codec::encode(initial_config(name, created_at)),
        )?;
        fs::write(self.history_path(name), "")?;
        Ok(())
    }
}

impl WorkspaceStore for FileBackend {
    fn workspace_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    fn exists(&self, name: &str) -> bool {
        self.workspace_dir(name).is_dir()
    }

    fn create(&self, name: &str, created_at: DateTime<Utc>) -> Result<()> {
        fs::create_dir_all(&self.root)?;

        // Non-recursive so that only one of two racing creators gets the directory
        let dir = self.workspace_dir(name);
        match fs::create_dir(&dir) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists && dir.is_dir() => {
                return Err(Error::AlreadyExists(name.to_string()));
            }
            Err(e) => return Err(e.into()),
        }

        if let Err(e) = self.write_initial_files(name, created_at) {
            // Roll back so the name can be created again
            if let Err(cleanup) = fs::remove_dir_all(&dir) {
                warn!(
                    workspace = name,
                    error = %cleanup,
                    "failed to remove half-created workspace"
                );
            }
            return Err(e);
        }

        debug!(workspace = name, path = %dir.display(), "created workspace");
        Ok(())
    }

    fn delete(&self, name: &str) -> Result<()> {
        self.require(name)?;
        fs::remove_dir_all(self.workspace_dir(name))?;
        debug!(workspace = name, "deleted workspace");
        Ok(())
    }

    fn list_names(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => debug!(name = ?raw, "skipping non UTF-8 directory"),
            }
        }

        names.sort();
        Ok(names)
    }

    fn read_config(&self, name: &str) -> Result<Record> {
        Ok(codec::read_record(&self.config_path(name))?)
    }

    fn append_history(&self, name: &str, line: &str) -> Result<()> {
        self.require(name)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.history_path(name))?;
        writeln!(file, "{line}")?;
        Ok(())
    }

    fn read_history(&self, name: &str) -> Result<Vec<String>> {
        self.require(name)?;
        let text = match fs::read_to_string(self.history_path(name)) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(text.lines().map(str::to_string).collect())
    }
}

/// Write `contents` to `path` through a temp file and rename.
///
/// Readers see either the old file or the new one, never a partial write.
/// The parent directory must exist.
///
/// # Errors
///
/// Returns an error if the temp file cannot be written or renamed.
pub fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    let temp = path.with_extension("tmp");
    fs::write(&temp, contents)?;
    fs::rename(&temp, path)
}
