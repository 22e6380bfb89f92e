//! Settings loading for venvscope.
//!
//! - Schema definitions in [`schema`]
//! - File discovery, loading and environment overrides in [`loader`]
//!
//! # Example
//!
//! ```
//! use venvscope::config::load_settings_file;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let path = temp.path().join("config.yml");
//! fs::write(&path, "index:\n  url: http://localhost:8080/pypi\n").unwrap();
//!
//! let settings = load_settings_file(&path).unwrap();
//! assert_eq!(settings.index.url, "http://localhost:8080/pypi");
//! ```

pub mod loader;
pub mod schema;

pub use loader::{
    apply_env_overrides, load_settings, load_settings_file, parse_settings, user_settings_path,
    DEFAULT_FILE_ENV, INDEX_URL_ENV,
};
pub use schema::{IndexSettings, OutputMode, Settings};
