//! Error types for venvscope operations.
//!
//! This module defines [`VenvscopeError`], the error type shared by the
//! discovery core and the CLI, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Absence (missing root directory, missing interpreter, no search
//!   results) is never an error; it is an empty collection.
//! - Batch operations collect per-item errors in a
//!   [`BatchReport`](crate::report::BatchReport) and keep going.
//! - Single-item operations return the specific variant to the caller.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for venvscope operations.
#[derive(Debug, Error)]
pub enum VenvscopeError {
    /// A `pyvenv.cfg` descriptor exists but does not have the expected shape.
    #[error("Malformed descriptor {path}: {message}")]
    MalformedConfig { path: PathBuf, message: String },

    /// An interpreter binary could not be run or reported no version.
    #[error("Failed to query interpreter {interpreter}: {message}")]
    ProcessInvocation {
        interpreter: PathBuf,
        message: String,
    },

    /// The package index call failed (transport, protocol, or remote fault).
    #[error("Package index query failed: {message}")]
    RemoteQuery { message: String },

    /// Settings file given explicitly but not found.
    #[error("Settings not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse the settings file.
    #[error("Failed to parse settings at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VenvscopeError {
    /// Build a [`VenvscopeError::RemoteQuery`] from anything displayable.
    pub fn remote(message: impl std::fmt::Display) -> Self {
        Self::RemoteQuery {
            message: message.to_string(),
        }
    }
}

/// Result type alias for venvscope operations.
pub type Result<T> = std::result::Result<T, VenvscopeError>;
