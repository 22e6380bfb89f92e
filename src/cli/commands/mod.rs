//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait and is routed by
//! [`CommandDispatcher`]. Commands receive their collaborators (store,
//! scanner, locator, index) already built, so tests can substitute them.

pub mod completions;
pub mod default_dir;
pub mod dispatcher;
pub mod display;
pub mod envs;
pub mod interpreters;
pub mod search;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
