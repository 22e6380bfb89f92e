//! `pyvenv.cfg` descriptor reading.
//!
//! The descriptor is a small `key = value` file written by `venv` and
//! `virtualenv` when an environment is created. Only the interpreter
//! version is extracted; the rest of the file is not interpreted.
//!
//! Two lookup strategies are supported:
//!
//! - [`VersionLookup::Positional`] reads the third line and strips its
//!   10-character `version = ` prefix. This is the default, and a file
//!   with fewer than three lines or another third line is malformed.
//! - [`VersionLookup::Keyed`] finds the `version` key by name, falling
//!   back to `version_info`. Opt in with `descriptor: keyed` or
//!   [`read_python_version_keyed`].

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use crate::error::{Result, VenvscopeError};

/// File name of the descriptor inside an environment directory.
pub const DESCRIPTOR_FILE: &str = "pyvenv.cfg";

/// Key token plus separator expected at the start of the third line.
const POSITIONAL_PREFIX: &str = "version = ";

/// Zero-based line index holding the version in positional mode.
const POSITIONAL_LINE: usize = 2;

/// Leading `major.minor.micro` of a `version_info` value like `3.9.1.final.0`.
static VERSION_INFO_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(?:\.\d+){0,2}").unwrap());

/// How the interpreter version is located inside a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionLookup {
    /// Read the third line at a fixed offset.
    #[default]
    Positional,
    /// Look the version up by key name.
    Keyed,
}

/// Parsed `key = value` entries of a descriptor, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Descriptor {
    entries: Vec<(String, String)>,
}

impl Descriptor {
    /// Parse descriptor text.
    ///
    /// Blank lines, `#`/`;` comments and lines without `=` are ignored.
    /// Keys are trimmed and lowercased; values are trimmed.
    pub fn parse(content: &str) -> Self {
        let entries = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with(';'))
            .filter_map(|line| line.split_once('='))
            .map(|(key, value)| (key.trim().to_ascii_lowercase(), value.trim().to_string()))
            .collect();

        Self { entries }
    }

    /// Get the first value recorded for `key` (case-insensitive).
    pub fn get(&self, key: &str) -> Option<&str> {
        let key = key.to_ascii_lowercase();
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Number of entries parsed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries were parsed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The interpreter version as written by `venv` or `virtualenv`.
    pub fn python_version(&self) -> Option<String> {
        if let Some(version) = self.get("version").filter(|v| !v.is_empty()) {
            return Some(version.to_string());
        }

        let info = self.get("version_info")?;
        VERSION_INFO_REGEX
            .find(info)
            .map(|m| m.as_str().to_string())
    }
}

/// Read the human-readable interpreter version (e.g. `"Python 3.9.1"`)
/// from the third line of a descriptor file.
pub fn read_python_version(cfg_file_path: &Path) -> Result<String> {
    read_python_version_with(cfg_file_path, VersionLookup::Positional)
}

/// Read the interpreter version by key, tolerating reordered descriptors.
pub fn read_python_version_keyed(cfg_file_path: &Path) -> Result<String> {
    read_python_version_with(cfg_file_path, VersionLookup::Keyed)
}

/// Read the interpreter version using the given lookup strategy.
pub fn read_python_version_with(cfg_file_path: &Path, lookup: VersionLookup) -> Result<String> {
    let content = fs::read_to_string(cfg_file_path)?;

    let parsed = match lookup {
        VersionLookup::Keyed => parse_keyed(&content),
        VersionLookup::Positional => parse_positional(&content),
    };

    parsed.map_err(|message| VenvscopeError::MalformedConfig {
        path: cfg_file_path.to_path_buf(),
        message,
    })
}

fn parse_keyed(content: &str) -> std::result::Result<String, String> {
    Descriptor::parse(content)
        .python_version()
        .map(|version| format!("Python {}", version).trim().to_string())
        .ok_or_else(|| "no 'version' or 'version_info' key".to_string())
}

fn parse_positional(content: &str) -> std::result::Result<String, String> {
    let line_count = content.lines().count();
    let line = content.lines().nth(POSITIONAL_LINE).ok_or_else(|| {
        format!(
            "expected at least {} lines, found {}",
            POSITIONAL_LINE + 1,
            line_count
        )
    })?;

    let value = line.strip_prefix(POSITIONAL_PREFIX).ok_or_else(|| {
        format!(
            "line {} does not start with '{}'",
            POSITIONAL_LINE + 1,
            POSITIONAL_PREFIX
        )
    })?;

    Ok(format!("Python {}", value).trim().to_string())
}
