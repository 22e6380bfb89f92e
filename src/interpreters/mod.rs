//! Installed Python interpreter discovery.
//!
//! - [`locator`] - Finds interpreters and queries their versions
//! - [`search_path`] - `PATH` parsing and executable lookup

pub mod locator;
pub mod search_path;

pub use locator::{
    interpreter_minor, locate_interpreters, query_version, InterpreterLocator, InterpreterRecord,
    LocatorStrategy, KNOWN_VERSIONS,
};
pub use search_path::{is_executable, parse_system_path, resolve_tool_path};

// Writing a script while another test thread forks can make the exec fail
// with ETXTBSY; tests that write and then run fake interpreters hold this.
#[cfg(test)]
pub(crate) static SPAWN_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
