//! The `venvscope default` command.
//!
//! `venvscope default` prints the stored directory; `venvscope default set
//! <PATH>` replaces it.

use std::path::{Path, PathBuf};

use crate::cli::args::{DefaultAction, DefaultArgs, SetDefaultArgs};
use crate::error::{Result, VenvscopeError};
use crate::store::DirectoryStore;
use crate::ui::{Prompt, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// Prompt key for saving a path that is not an existing directory.
pub const SAVE_MISSING_PROMPT: &str = "save_missing_directory";

/// Shows or changes the default environments directory.
pub struct DefaultCommand {
    store: Box<dyn DirectoryStore>,
    args: DefaultArgs,
}

impl DefaultCommand {
    /// Create a new default command.
    pub fn new(store: Box<dyn DirectoryStore>, args: DefaultArgs) -> Self {
        Self { store, args }
    }

    fn show(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let current = self.store.get()?;
        if current.is_empty() {
            ui.message("No default directory set");
        } else {
            ui.output(&current);
        }
        Ok(CommandResult::success())
    }

    fn set(&self, args: &SetDefaultArgs, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let path = absolute(&args.path)?;

        if !path.is_dir() && !args.force {
            let prompt = Prompt::confirm(
                SAVE_MISSING_PROMPT,
                &format!("{} is not a directory. Save it anyway?", path.display()),
                false,
            );
            let confirmed = ui.prompt(&prompt)?.as_bool();
            if !confirmed {
                ui.warning("Default directory unchanged");
                return Ok(CommandResult::failure(1));
            }
        }

        let text = path.to_str().ok_or_else(|| {
            VenvscopeError::Other(anyhow::anyhow!(
                "path is not valid UTF-8: {}",
                path.display()
            ))
        })?;

        self.store.set(text)?;
        ui.success(&format!("Default directory set to {}", text));
        Ok(CommandResult::success())
    }
}

impl Command for DefaultCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &self.args.action {
            None => self.show(ui),
            Some(DefaultAction::Set(args)) => self.set(args, ui),
        }
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    Ok(std::path::absolute(path)?)
}
