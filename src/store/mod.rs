//! Persisted default directory.
//!
//! The directory scanned for environments is a single line of text kept in
//! a file. The store has two observable states: never configured (empty
//! text) and configured (the last path written).
//!
//! [`DirectoryStore`] lets callers substitute the backing storage;
//! [`FileDirectoryStore`] is the real one and [`MemoryDirectoryStore`]
//! keeps the value in memory.
//!
//! # Example
//!
//! ```
//! use venvscope::store::{DirectoryStore, FileDirectoryStore};
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! let store = FileDirectoryStore::new(temp.path().join("default"));
//!
//! assert_eq!(store.get().unwrap(), "");
//! store.set("/home/u/envs").unwrap();
//! assert_eq!(store.get().unwrap(), "/home/u/envs");
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::Result;

/// File name of the default-directory file.
pub const DEFAULT_FILE_NAME: &str = "default";

/// Read/write access to the persisted default directory.
pub trait DirectoryStore {
    /// Get the stored directory, or empty text if none was ever set.
    fn get(&self) -> Result<String>;

    /// Replace the stored directory. The value is not validated.
    fn set(&self, path: &str) -> Result<()>;
}

/// Default directory kept in a plain-text file.
#[derive(Debug, Clone)]
pub struct FileDirectoryStore {
    path: PathBuf,
}

impl FileDirectoryStore {
    /// Create a store backed by the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a store at the application's fixed location.
    pub fn at_default_location() -> Self {
        Self::new(default_file_path())
    }

    /// Get the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DirectoryStore for FileDirectoryStore {
    fn get(&self) -> Result<String> {
        if self.path.is_file() {
            let content = fs::read_to_string(&self.path)?;
            return Ok(strip_line_terminator(&content).to_string());
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, "")?;
        tracing::debug!("Created empty default-directory file {}", self.path.display());

        Ok(String::new())
    }

    fn set(&self, path: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, path)?;
        tracing::info!("Setting default venv directory to '{}'", path);
        Ok(())
    }
}

/// Default directory kept in memory.
#[derive(Debug, Default)]
pub struct MemoryDirectoryStore {
    value: Mutex<String>,
}

impl MemoryDirectoryStore {
    /// Create a store holding `value`.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(value.into()),
        }
    }
}

impl DirectoryStore for MemoryDirectoryStore {
    fn get(&self) -> Result<String> {
        let value = self
            .value
            .lock()
            .map_err(|_| anyhow::anyhow!("default-directory store lock poisoned"))?;
        Ok(value.clone())
    }

    fn set(&self, path: &str) -> Result<()> {
        let mut value = self
            .value
            .lock()
            .map_err(|_| anyhow::anyhow!("default-directory store lock poisoned"))?;
        *value = path.to_string();
        Ok(())
    }
}

/// Fixed location of the default-directory file.
///
/// `VENVSCOPE_DEFAULT_FILE` overrides it; otherwise it lives in the
/// platform data directory (`~/.local/share/venvscope/default` on Linux).
pub fn default_file_path() -> PathBuf {
    if let Some(path) = std::env::var_os(crate::config::DEFAULT_FILE_ENV) {
        return PathBuf::from(path);
    }

    dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("venvscope")
        .join(DEFAULT_FILE_NAME)
}

/// Read the default directory from its fixed location.
pub fn get_active_directory_string() -> Result<String> {
    FileDirectoryStore::at_default_location().get()
}

/// Write the default directory to its fixed location.
pub fn set_active_directory_string(path: &str) -> Result<()> {
    FileDirectoryStore::at_default_location().set(path)
}

/// Remove one trailing `\n` or `\r\n`, if present.
fn strip_line_terminator(content: &str) -> &str {
    content
        .strip_suffix("\r\n")
        .or_else(|| content.strip_suffix('\n'))
        .unwrap_or(content)
}
