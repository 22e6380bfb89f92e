//! Virtual environment discovery.
//!
//! - [`scanner`] - Enumerates environment directories under a root
//! - [`descriptor`] - Reads the interpreter version from `pyvenv.cfg`

pub mod descriptor;
pub mod scanner;

pub use descriptor::{
    read_python_version, read_python_version_keyed, read_python_version_with, Descriptor,
    VersionLookup, DESCRIPTOR_FILE,
};
pub use scanner::{scan_active_directory, scan_environments, EnvironmentRecord, EnvironmentScanner};
