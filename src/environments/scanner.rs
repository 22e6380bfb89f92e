//! Virtual environment discovery under a root directory.

use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::report::BatchReport;
use crate::store::DirectoryStore;

use super::descriptor::{read_python_version_with, VersionLookup, DESCRIPTOR_FILE};

/// A virtual environment found under the root directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentRecord {
    /// Base name of the environment directory.
    pub name: String,
    /// Human-readable interpreter version, e.g. `"Python 3.9.1"`.
    pub python_version: String,
}

/// Scans the immediate children of a root directory for environments.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvironmentScanner {
    lookup: VersionLookup,
}

impl EnvironmentScanner {
    /// Create a scanner that reads the version from the third descriptor line.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scanner with an explicit descriptor lookup strategy.
    pub fn with_lookup(lookup: VersionLookup) -> Self {
        Self { lookup }
    }

    /// Get the descriptor lookup strategy.
    pub fn lookup(&self) -> VersionLookup {
        self.lookup
    }

    /// Scan `root` and report every environment found.
    ///
    /// A missing, empty, or non-directory root yields an empty report.
    /// Results follow directory-listing order, which is platform
    /// dependent; callers that need a stable order must sort.
    pub fn scan(&self, root: &Path) -> BatchReport<EnvironmentRecord> {
        let mut report = BatchReport::new();

        if root.as_os_str().is_empty() || !root.is_dir() {
            tracing::debug!("Root {} is not a directory", root.display());
            return report;
        }

        let entries = match fs::read_dir(root) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!("Cannot list {}: {}", root.display(), e);
                return report;
            }
        };

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!("Skipping unreadable entry in {}: {}", root.display(), e);
                    continue;
                }
            };

            let path = entry.path();
            if !path.is_dir() {
                continue;
            }

            let cfg_file = path.join(DESCRIPTOR_FILE);
            if !cfg_file.is_file() {
                continue;
            }

            match read_python_version_with(&cfg_file, self.lookup) {
                Ok(python_version) => report.push(EnvironmentRecord {
                    name: entry.file_name().to_string_lossy().into_owned(),
                    python_version,
                }),
                Err(e) => report.fail(e),
            }
        }

        report
    }
}

/// List the environments under `root_directory`, skipping any whose
/// descriptor cannot be read.
pub fn scan_environments(root_directory: impl AsRef<Path>) -> Vec<EnvironmentRecord> {
    EnvironmentScanner::new()
        .scan(root_directory.as_ref())
        .into_items()
}

/// Scan the root directory currently recorded in `store`.
pub fn scan_active_directory(
    store: &dyn DirectoryStore,
    scanner: &EnvironmentScanner,
) -> Result<BatchReport<EnvironmentRecord>> {
    let root = store.get()?;
    Ok(scanner.scan(Path::new(&root)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VenvscopeError;
    use crate::store::MemoryDirectoryStore;
    use tempfile::TempDir;

    fn make_env(root: &Path, name: &str, cfg: Option<&str>) {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        if let Some(cfg) = cfg {
            fs::write(dir.join(DESCRIPTOR_FILE), cfg).unwrap();
        }
    }

    fn cfg(version: &str) -> String {
        format!(
            "home = /usr/bin\ninclude-system-site-packages = false\nversion = {}\n",
            version
        )
    }

    fn sorted_names(records: &[EnvironmentRecord]) -> Vec<String> {
        let mut names: Vec<_> = records.iter().map(|r| r.name.clone()).collect();
        names.sort();
        names
    }

    #[test]
    fn missing_root_is_empty() {
        let temp = TempDir::new().unwrap();
        assert!(scan_environments(temp.path().join("nope")).is_empty());
    }

    #[test]
    fn empty_root_string_is_empty() {
        assert!(scan_environments("").is_empty());
    }

    #[test]
    fn root_without_subdirectories_is_empty() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("notes.txt"), "hi").unwrap();
        assert!(scan_environments(temp.path()).is_empty());
    }

    #[test]
    fn root_that_is_a_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("file");
        fs::write(&file, "").unwrap();
        assert!(scan_environments(&file).is_empty());
    }

    #[test]
    fn only_directories_with_descriptor_are_reported() {
        let temp = TempDir::new().unwrap();
        make_env(temp.path(), "web", Some(&cfg("3.9.1")));
        make_env(temp.path(), "data", Some(&cfg("3.8.5")));
        make_env(temp.path(), "plain", None);
        fs::write(temp.path().join("stray.cfg"), cfg("3.7.0")).unwrap();

        let records = scan_environments(temp.path());

        assert_eq!(records.len(), 2);
        assert_eq!(sorted_names(&records), vec!["data", "web"]);
        let web = records.iter().find(|r| r.name == "web").unwrap();
        assert_eq!(web.python_version, "Python 3.9.1");
    }

    #[test]
    fn descriptor_directory_is_not_a_descriptor() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("odd").join(DESCRIPTOR_FILE)).unwrap();
        assert!(scan_environments(temp.path()).is_empty());
    }

    #[test]
    fn malformed_descriptor_is_reported_and_scan_continues() {
        let temp = TempDir::new().unwrap();
        make_env(temp.path(), "good", Some(&cfg("3.9.1")));
        make_env(temp.path(), "bad", Some("home = /usr/bin\n"));

        let report = EnvironmentScanner::new().scan(temp.path());

        assert_eq!(report.items.len(), 1);
        assert_eq!(report.items[0].name, "good");
        assert_eq!(report.failures.len(), 1);
        assert!(matches!(
            report.failures[0],
            VenvscopeError::MalformedConfig { .. }
        ));
    }

    #[test]
    fn default_scanner_rejects_reordered_descriptor() {
        let temp = TempDir::new().unwrap();
        make_env(temp.path(), "reordered", Some("version = 3.9.1\nhome = /usr/bin\n"));

        let positional = EnvironmentScanner::new().scan(temp.path());
        let keyed = EnvironmentScanner::with_lookup(VersionLookup::Keyed).scan(temp.path());

        assert_eq!(keyed.items.len(), 1);
        assert!(positional.items.is_empty());
        assert_eq!(positional.failures.len(), 1);
    }

    #[test]
    fn scan_active_directory_uses_store_value() {
        let temp = TempDir::new().unwrap();
        make_env(temp.path(), "api", Some(&cfg("3.10.2")));
        let store = MemoryDirectoryStore::new(temp.path().to_string_lossy());

        let report = scan_active_directory(&store, &EnvironmentScanner::new()).unwrap();

        assert_eq!(report.items.len(), 1);
        assert_eq!(report.items[0].python_version, "Python 3.10.2");
    }

    #[test]
    fn scan_active_directory_unconfigured_is_empty() {
        let store = MemoryDirectoryStore::default();
        let report = scan_active_directory(&store, &EnvironmentScanner::new()).unwrap();
        assert!(report.items.is_empty());
        assert!(!report.has_failures());
    }
}
