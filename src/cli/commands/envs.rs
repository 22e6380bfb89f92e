//! The `venvscope envs` command.

use std::path::PathBuf;

use crate::cli::args::EnvsArgs;
use crate::environments::EnvironmentScanner;
use crate::error::Result;
use crate::store::DirectoryStore;
use crate::ui::{Table, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::display::{plural, show_failures, to_json};

/// Lists the virtual environments under a directory.
pub struct EnvsCommand {
    store: Box<dyn DirectoryStore>,
    scanner: EnvironmentScanner,
    args: EnvsArgs,
}

impl EnvsCommand {
    /// Create a new envs command.
    pub fn new(store: Box<dyn DirectoryStore>, scanner: EnvironmentScanner, args: EnvsArgs) -> Self {
        Self {
            store,
            scanner,
            args,
        }
    }

    fn root(&self) -> Result<Option<PathBuf>> {
        if let Some(dir) = &self.args.dir {
            return Ok(Some(dir.clone()));
        }

        let stored = self.store.get()?;
        Ok((!stored.is_empty()).then(|| PathBuf::from(stored)))
    }
}

impl Command for EnvsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(root) = self.root()? else {
            ui.error("No default directory set. Run 'venvscope default set <PATH>' or pass --dir.");
            return Ok(CommandResult::failure(2));
        };

        tracing::debug!("Scanning {} for environments", root.display());
        let mut report = self.scanner.scan(&root);
        if self.args.sort {
            report.items.sort_by(|a, b| a.name.cmp(&b.name));
        }

        if self.args.json {
            ui.output(&to_json(&report.items)?);
            show_failures(ui, &report.failures, "environment");
            return Ok(CommandResult::success());
        }

        if report.items.is_empty() {
            ui.message(&format!("No environments found in {}", root.display()));
        } else {
            let mut table = Table::new(&["Name", "Python"]);
            for record in &report.items {
                table.add_row([record.name.as_str(), record.python_version.as_str()]);
            }
            ui.output(&table.render());
            ui.success(&format!(
                "Found {} {} in {}",
                report.items.len(),
                plural(report.items.len(), "environment"),
                root.display()
            ));
        }

        show_failures(ui, &report.failures, "environment");
        Ok(CommandResult::success())
    }
}
