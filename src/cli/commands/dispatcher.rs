//! Command dispatching.
//!
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use crate::cli::args::{Cli, Commands};
use crate::config::Settings;
use crate::error::Result;
use crate::ui::UserInterface;

use super::completions::CompletionsCommand;
use super::default_dir::DefaultCommand;
use super::envs::EnvsCommand;
use super::interpreters::InterpretersCommand;
use super::search::SearchCommand;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command, reporting through `ui`.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: u8,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: u8) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    settings: Settings,
}

impl CommandDispatcher {
    /// Create a dispatcher that builds commands from `settings`.
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// The settings commands are built from.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Route the CLI subcommand to its implementation and execute it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        tracing::debug!("Dispatching {:?}", cli.command);

        match &cli.command {
            Commands::Interpreters(args) => {
                let cmd = InterpretersCommand::new(self.settings.interpreter_locator(), args.clone());
                cmd.execute(ui)
            }
            Commands::Envs(args) => {
                let cmd = EnvsCommand::new(
                    Box::new(self.settings.directory_store()),
                    self.settings.environment_scanner(),
                    args.clone(),
                );
                cmd.execute(ui)
            }
            Commands::Search(args) => {
                let cmd = SearchCommand::new(Box::new(self.settings.index_client()?), args.clone());
                cmd.execute(ui)
            }
            Commands::Default(args) => {
                let cmd = DefaultCommand::new(Box::new(self.settings.directory_store()), args.clone());
                cmd.execute(ui)
            }
            Commands::Completions(args) => CompletionsCommand::new(args.clone()).execute(ui),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(2);
        assert!(!result.success);
        assert_eq!(result.exit_code, 2);
    }

    #[test]
    fn dispatches_default_to_configured_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("default");
        fs::write(&file, "/srv/envs\n").unwrap();

        let settings = Settings {
            default_file: Some(file),
            ..Settings::default()
        };
        let dispatcher = CommandDispatcher::new(settings);
        let cli = Cli::try_parse_from(["venvscope", "default"]).unwrap();
        let mut ui = MockUI::new();

        let result = dispatcher.dispatch(&cli, &mut ui).unwrap();
        assert!(result.success);
        assert_eq!(ui.outputs(), ["/srv/envs"]);
    }

    #[test]
    fn dispatches_envs_with_explicit_dir() {
        let temp = TempDir::new().unwrap();
        let env = temp.path().join("proj");
        fs::create_dir_all(&env).unwrap();
        fs::write(
            env.join("pyvenv.cfg"),
            "home = /usr/bin\ninclude-system-site-packages = false\nversion = 3.10.4\n",
        )
        .unwrap();

        let settings = Settings {
            default_file: Some(temp.path().join("unused")),
            ..Settings::default()
        };
        let dispatcher = CommandDispatcher::new(settings);
        let dir = temp.path().to_string_lossy().to_string();
        let cli = Cli::try_parse_from(["venvscope", "envs", "--dir", &dir, "--json"]).unwrap();
        let mut ui = MockUI::new();

        let result = dispatcher.dispatch(&cli, &mut ui).unwrap();
        assert!(result.success);
        assert!(ui.output_text().contains("\"python_version\": \"Python 3.10.4\""));
    }
}
