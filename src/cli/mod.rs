//! Command-line interface for venvscope.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{
    Cli, Commands, CompletionsArgs, DefaultAction, DefaultArgs, EnvsArgs, InterpretersArgs,
    SearchArgs, SetDefaultArgs,
};
pub use commands::{Command, CommandDispatcher, CommandResult};
