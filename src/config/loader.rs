//! Settings file discovery and loading.
//!
//! Precedence, lowest first:
//! 1. Built-in defaults
//! 2. User settings (`~/.venvscope/config.yml`, or the file given with `--config`)
//! 3. Environment variables (`VENVSCOPE_INDEX_URL`, `VENVSCOPE_DEFAULT_FILE`)

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::Settings;
use crate::error::{Result, VenvscopeError};

/// Overrides the package index endpoint.
pub const INDEX_URL_ENV: &str = "VENVSCOPE_INDEX_URL";

/// Overrides the default-directory file location.
pub const DEFAULT_FILE_ENV: &str = "VENVSCOPE_DEFAULT_FILE";

/// User settings location: `~/.venvscope/config.yml`.
pub fn user_settings_path() -> Option<PathBuf> {
    Some(dirs::home_dir()?.join(".venvscope").join("config.yml"))
}

/// Load and parse a single settings file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_settings_file(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Err(VenvscopeError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    parse_settings(&content, path)
}

/// Parse settings YAML. An empty document yields the defaults.
pub fn parse_settings(content: &str, path: &Path) -> Result<Settings> {
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }

    serde_yaml::from_str(content).map_err(|e| VenvscopeError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load settings from `explicit`, or from the user settings file when it
/// exists, then apply environment overrides.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings> {
    let mut settings = match explicit {
        Some(path) => load_settings_file(path)?,
        None => match user_settings_path().filter(|p| p.exists()) {
            Some(path) => load_settings_file(&path)?,
            None => Settings::default(),
        },
    };

    apply_env_overrides(&mut settings, |key| std::env::var(key));
    Ok(settings)
}

/// Apply environment overrides using a custom lookup function.
pub fn apply_env_overrides<F>(settings: &mut Settings, env_fn: F)
where
    F: Fn(&str) -> std::result::Result<String, std::env::VarError>,
{
    if let Ok(url) = env_fn(INDEX_URL_ENV) {
        if !url.is_empty() {
            settings.index.url = url;
        }
    }

    if let Ok(file) = env_fn(DEFAULT_FILE_ENV) {
        if !file.is_empty() {
            settings.default_file = Some(PathBuf::from(file));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environments::VersionLookup;
    use std::collections::HashMap;
    use std::env::VarError;
    use tempfile::TempDir;

    fn env_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> std::result::Result<String, VarError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned().ok_or(VarError::NotPresent)
    }

    #[test]
    fn load_missing_explicit_file_fails() {
        let temp = TempDir::new().unwrap();
        let err = load_settings_file(&temp.path().join("config.yml")).unwrap_err();
        assert!(matches!(err, VenvscopeError::ConfigNotFound { .. }));
    }

    #[test]
    fn load_empty_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        fs::write(&path, "\n").unwrap();

        assert_eq!(load_settings_file(&path).unwrap(), Settings::default());
    }

    #[test]
    fn load_file_parses_values() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        fs::write(&path, "descriptor: keyed\n").unwrap();

        let settings = load_settings_file(&path).unwrap();
        assert_eq!(settings.descriptor, VersionLookup::Keyed);
    }

    #[test]
    fn invalid_yaml_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        fs::write(&path, "index: [not, a, map\n").unwrap();

        let err = load_settings_file(&path).unwrap_err();
        assert!(matches!(err, VenvscopeError::ConfigParseError { .. }));
    }

    #[test]
    fn env_overrides_file_values() {
        let mut settings = Settings::default();
        settings.index.url = "http://from-file/pypi".into();

        apply_env_overrides(
            &mut settings,
            env_from(&[
                (INDEX_URL_ENV, "http://from-env/pypi"),
                (DEFAULT_FILE_ENV, "/tmp/env-default"),
            ]),
        );

        assert_eq!(settings.index.url, "http://from-env/pypi");
        assert_eq!(settings.default_file, Some(PathBuf::from("/tmp/env-default")));
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let mut settings = Settings::default();
        apply_env_overrides(&mut settings, env_from(&[(INDEX_URL_ENV, "")]));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn user_settings_path_is_under_home() {
        if let Some(path) = user_settings_path() {
            assert!(path.ends_with(".venvscope/config.yml"));
        }
    }
}
