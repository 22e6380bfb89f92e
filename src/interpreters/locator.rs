//! Python interpreter discovery.
//!
//! Interpreters are found by name on the executable search path and asked
//! for their version with `-V`. Two strategies pick the names to look for:
//!
//! - [`LocatorStrategy::PathScan`] lists every search path directory and
//!   keeps executables named `python3.<minor>`, newest first.
//! - [`LocatorStrategy::Known`] resolves `python<suffix>` for each entry
//!   of [`KNOWN_VERSIONS`], in that order.
//!
//! # Example
//!
//! ```no_run
//! use venvscope::interpreters::InterpreterLocator;
//!
//! let report = InterpreterLocator::from_env().locate();
//! for python in &report.items {
//!     println!("{} {}", python.version_string, python.executable_path.display());
//! }
//! for failure in &report.failures {
//!     eprintln!("{}", failure);
//! }
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::LazyLock;

use crate::error::{Result, VenvscopeError};
use crate::report::BatchReport;

use super::search_path::{is_executable, parse_system_path, resolve_tool_path};

/// Version suffixes probed by [`LocatorStrategy::Known`], newest first.
pub const KNOWN_VERSIONS: &[&str] = &["3.9", "3.8", "3.7", "3.6", "3.5", "3.4", "3.3"];

/// Flag that makes an interpreter print its version.
const VERSION_FLAG: &str = "-V";

/// `python3.<minor>`, optionally with a Windows `.exe` extension.
static INTERPRETER_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^python3\.(\d+)(?:\.exe)?$").unwrap());

/// A Python interpreter found on the search path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterpreterRecord {
    /// Version reported by the interpreter, e.g. `"Python 3.8.10"`.
    pub version_string: String,
    /// Resolved path of the interpreter binary.
    pub executable_path: PathBuf,
}

/// How candidate interpreter names are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocatorStrategy {
    /// Scan the search path for `python3.<minor>` executables.
    #[default]
    PathScan,
    /// Probe the fixed [`KNOWN_VERSIONS`] list.
    Known,
}

/// Finds interpreters on a search path.
#[derive(Debug, Clone)]
pub struct InterpreterLocator {
    search_path: Vec<PathBuf>,
    strategy: LocatorStrategy,
}

impl InterpreterLocator {
    /// Create a locator over the process `PATH`.
    pub fn from_env() -> Self {
        Self::with_search_path(parse_system_path())
    }

    /// Create a locator over an explicit list of directories.
    pub fn with_search_path(search_path: Vec<PathBuf>) -> Self {
        Self {
            search_path,
            strategy: LocatorStrategy::default(),
        }
    }

    /// Use the given candidate strategy.
    pub fn strategy(mut self, strategy: LocatorStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Get the directories searched.
    pub fn search_path(&self) -> &[PathBuf] {
        &self.search_path
    }

    /// Resolve candidate binaries without running them.
    pub fn candidates(&self) -> Vec<PathBuf> {
        match self.strategy {
            LocatorStrategy::PathScan => self.scan_candidates(),
            LocatorStrategy::Known => KNOWN_VERSIONS
                .iter()
                .filter_map(|suffix| {
                    resolve_tool_path(&format!("python{}", suffix), &self.search_path)
                })
                .collect(),
        }
    }

    /// Find interpreters and query each one's version.
    ///
    /// A candidate that cannot be run is recorded as a failure; the
    /// remaining candidates are still queried.
    pub fn locate(&self) -> BatchReport<InterpreterRecord> {
        let mut report = BatchReport::new();

        for path in self.candidates() {
            match query_version(&path) {
                Ok(version_string) => report.push(InterpreterRecord {
                    version_string,
                    executable_path: path,
                }),
                Err(e) => report.fail(e),
            }
        }

        report
    }

    fn scan_candidates(&self) -> Vec<PathBuf> {
        let mut seen = HashSet::new();
        let mut found: Vec<(u32, PathBuf)> = Vec::new();

        for dir in &self.search_path {
            let entries = match fs::read_dir(dir) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::debug!("Skipping search path entry {}: {}", dir.display(), e);
                    continue;
                }
            };

            for entry in entries.flatten() {
                let file_name = entry.file_name();
                let Some(name) = file_name.to_str() else {
                    continue;
                };
                let Some(minor) = interpreter_minor(name) else {
                    continue;
                };

                let path = entry.path();
                if !path.is_file() || !is_executable(&path) {
                    continue;
                }

                // First directory on the search path wins, as with `which`.
                if seen.insert(minor) {
                    found.push((minor, path));
                }
            }
        }

        found.sort_by(|a, b| b.0.cmp(&a.0));
        found.into_iter().map(|(_, path)| path).collect()
    }
}

/// Minor version encoded in an interpreter file name like `python3.8`.
pub fn interpreter_minor(file_name: &str) -> Option<u32> {
    INTERPRETER_NAME_REGEX
        .captures(file_name)
        .and_then(|caps| caps[1].parse().ok())
}

/// Run `interpreter -V` and return the trimmed version it reports.
///
/// Interpreters older than 3.4 print the version on stderr, so stderr is
/// used when stdout is empty.
pub fn query_version(interpreter: &Path) -> Result<String> {
    let invocation_error = |message: String| VenvscopeError::ProcessInvocation {
        interpreter: interpreter.to_path_buf(),
        message,
    };

    let output = Command::new(interpreter)
        .arg(VERSION_FLAG)
        .output()
        .map_err(|e| invocation_error(e.to_string()))?;

    if !output.status.success() {
        return Err(invocation_error(match output.status.code() {
            Some(code) => format!("exited with code {}", code),
            None => "terminated by signal".to_string(),
        }));
    }

    let stdout = String::from_utf8(output.stdout)
        .map_err(|_| invocation_error("version output is not valid UTF-8".to_string()))?;
    let version = if stdout.trim().is_empty() {
        String::from_utf8(output.stderr)
            .map_err(|_| invocation_error("version output is not valid UTF-8".to_string()))?
    } else {
        stdout
    };

    let version = version.trim();
    if version.is_empty() {
        return Err(invocation_error("reported no version".to_string()));
    }

    Ok(version.to_string())
}

/// Find interpreters on the process `PATH`, skipping any that fail to run.
pub fn locate_interpreters() -> Vec<InterpreterRecord> {
    InterpreterLocator::from_env().locate().into_items()
}
