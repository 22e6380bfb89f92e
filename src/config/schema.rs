//! Settings schema.
//!
//! ```yaml
//! # ~/.venvscope/config.yml
//! default_file: /home/u/.venvscope/default
//! descriptor: positional   # or: keyed
//! locator: path_scan       # or: known
//! default_output: normal   # verbose, normal, quiet, silent
//! index:
//!   url: https://pypi.org/pypi
//!   timeout_secs: 30
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::environments::{EnvironmentScanner, VersionLookup};
use crate::error::Result;
use crate::index::{PackageIndexClient, DEFAULT_INDEX_URL};
use crate::interpreters::{InterpreterLocator, LocatorStrategy};
use crate::store::FileDirectoryStore;

/// User settings. Every field is optional in the file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where the default directory is persisted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_file: Option<PathBuf>,

    /// Package index connection.
    pub index: IndexSettings,

    /// How `pyvenv.cfg` versions are located.
    pub descriptor: VersionLookup,

    /// How interpreter candidates are found.
    pub locator: LocatorStrategy,

    /// Output mode used when no flag is given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_output: Option<OutputMode>,
}

/// Package index connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexSettings {
    /// XML-RPC endpoint.
    pub url: String,

    /// Request timeout; none waits indefinitely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_INDEX_URL.to_string(),
            timeout_secs: None,
        }
    }
}

/// Output verbosity as written in the settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    Verbose,
    Normal,
    Quiet,
    Silent,
}

impl Settings {
    /// Store for the persisted default directory.
    pub fn directory_store(&self) -> FileDirectoryStore {
        match &self.default_file {
            Some(path) => FileDirectoryStore::new(path),
            None => FileDirectoryStore::at_default_location(),
        }
    }

    /// Scanner configured with the descriptor lookup strategy.
    pub fn environment_scanner(&self) -> EnvironmentScanner {
        EnvironmentScanner::with_lookup(self.descriptor)
    }

    /// Interpreter locator over the process `PATH`.
    pub fn interpreter_locator(&self) -> InterpreterLocator {
        InterpreterLocator::from_env().strategy(self.locator)
    }

    /// Package index client for the configured endpoint.
    pub fn index_client(&self) -> Result<PackageIndexClient> {
        PackageIndexClient::new(
            self.index.url.clone(),
            self.index.timeout_secs.map(Duration::from_secs),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_public_index() {
        let settings = Settings::default();
        assert_eq!(settings.index.url, DEFAULT_INDEX_URL);
        assert_eq!(settings.index.timeout_secs, None);
        assert_eq!(settings.descriptor, VersionLookup::Positional);
        assert_eq!(settings.locator, LocatorStrategy::PathScan);
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let settings: Settings = serde_yaml::from_str("descriptor: keyed\n").unwrap();
        assert_eq!(settings.descriptor, VersionLookup::Keyed);
        assert_eq!(settings.index.url, DEFAULT_INDEX_URL);
    }

    #[test]
    fn full_yaml_parses() {
        let yaml = r#"
default_file: /tmp/venvscope-default
descriptor: keyed
locator: known
default_output: quiet
index:
  url: http://localhost:8080/pypi
  timeout_secs: 5
"#;
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(
            settings.default_file,
            Some(PathBuf::from("/tmp/venvscope-default"))
        );
        assert_eq!(settings.locator, LocatorStrategy::Known);
        assert_eq!(settings.default_output, Some(OutputMode::Quiet));
        assert_eq!(settings.index.url, "http://localhost:8080/pypi");
        assert_eq!(settings.index.timeout_secs, Some(5));
    }

    #[test]
    fn unknown_strategy_is_rejected() {
        assert!(serde_yaml::from_str::<Settings>("locator: magic\n").is_err());
    }

    #[test]
    fn directory_store_uses_configured_file() {
        let settings = Settings {
            default_file: Some(PathBuf::from("/tmp/somewhere/default")),
            ..Default::default()
        };
        assert_eq!(
            settings.directory_store().path(),
            std::path::Path::new("/tmp/somewhere/default")
        );
    }

    #[test]
    fn index_client_uses_configured_url() {
        let settings = Settings {
            index: IndexSettings {
                url: "http://localhost:9/pypi".into(),
                timeout_secs: Some(1),
            },
            ..Default::default()
        };
        assert_eq!(settings.index_client().unwrap().endpoint(), "http://localhost:9/pypi");
    }

    #[test]
    fn scanner_uses_descriptor_setting() {
        let settings = Settings {
            descriptor: VersionLookup::Keyed,
            ..Default::default()
        };
        assert_eq!(settings.environment_scanner().lookup(), VersionLookup::Keyed);
    }
}
