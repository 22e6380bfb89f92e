//! CLI argument definitions.
//!
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// venvscope - find Python interpreters, virtual environments and packages.
#[derive(Debug, Parser)]
#[command(name = "venvscope")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to settings file (overrides ~/.venvscope/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List Python 3 interpreters on the search path
    Interpreters(InterpretersArgs),

    /// List virtual environments under a directory
    Envs(EnvsArgs),

    /// Search the package index by name
    Search(SearchArgs),

    /// Show or change the default environments directory
    Default(DefaultArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `interpreters` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InterpretersArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `envs` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct EnvsArgs {
    /// Directory to scan (defaults to the stored default directory)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Sort environments by name
    #[arg(long)]
    pub sort: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `search` command.
#[derive(Debug, Clone, clap::Args)]
pub struct SearchArgs {
    /// Package name to search for
    pub name: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `default` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct DefaultArgs {
    #[command(subcommand)]
    pub action: Option<DefaultAction>,
}

/// `default` subcommands. Without one, the current value is shown.
#[derive(Debug, Clone, Subcommand)]
pub enum DefaultAction {
    /// Store a new default directory
    Set(SetDefaultArgs),
}

/// Arguments for `default set`.
#[derive(Debug, Clone, clap::Args)]
pub struct SetDefaultArgs {
    /// Directory holding virtual environments
    pub path: PathBuf,

    /// Save even if the path is not an existing directory
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
