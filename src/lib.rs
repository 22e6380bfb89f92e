//! venvscope - discover Python interpreters, virtual environments and packages.
//!
//! venvscope finds the Python 3 interpreters installed on the search path,
//! lists the virtual environments kept under a default directory, and
//! searches the package index by name.
//!
//! # Modules
//!
//! - [`interpreters`] - Interpreter discovery and version queries
//! - [`environments`] - `pyvenv.cfg` parsing and environment scanning
//! - [`store`] - The persisted default directory
//! - [`index`] - Package index search over XML-RPC
//! - [`config`] - Settings loading
//! - [`cli`] - Command-line interface and argument parsing
//! - [`ui`] - Terminal output, spinners and prompts
//! - [`error`] - Error types and result aliases
//!
//! # Example
//!
//! ```
//! use venvscope::environments::scan_environments;
//! use std::fs;
//! use tempfile::TempDir;
//!
//! let root = TempDir::new().unwrap();
//! let env = root.path().join("api");
//! fs::create_dir(&env).unwrap();
//! fs::write(
//!     env.join("pyvenv.cfg"),
//!     "home = /usr/bin\ninclude-system-site-packages = false\nversion = 3.9.1\n",
//! )
//! .unwrap();
//!
//! let found = scan_environments(root.path());
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].python_version, "Python 3.9.1");
//! ```

pub mod cli;
pub mod config;
pub mod environments;
pub mod error;
pub mod index;
pub mod interpreters;
pub mod report;
pub mod store;
pub mod ui;

pub use error::{Result, VenvscopeError};
