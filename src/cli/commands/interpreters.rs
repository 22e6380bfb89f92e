//! The `venvscope interpreters` command.

use crate::cli::args::InterpretersArgs;
use crate::error::Result;
use crate::interpreters::InterpreterLocator;
use crate::ui::{Table, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::display::{plural, show_failures, to_json};

/// Lists the Python 3 interpreters found on the search path.
pub struct InterpretersCommand {
    locator: InterpreterLocator,
    args: InterpretersArgs,
}

impl InterpretersCommand {
    /// Create a new interpreters command.
    pub fn new(locator: InterpreterLocator, args: InterpretersArgs) -> Self {
        Self { locator, args }
    }
}

impl Command for InterpretersCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let report = self.locator.locate();

        if self.args.json {
            ui.output(&to_json(&report.items)?);
            show_failures(ui, &report.failures, "interpreter");
            return Ok(CommandResult::success());
        }

        if report.items.is_empty() {
            ui.message("No Python 3 interpreters found on PATH");
        } else {
            let mut table = Table::new(&["Version", "Path"]);
            for record in &report.items {
                table.add_row([
                    record.version_string.clone(),
                    record.executable_path.display().to_string(),
                ]);
            }
            ui.output(&table.render());
            ui.success(&format!(
                "Found {} {}",
                report.items.len(),
                plural(report.items.len(), "interpreter")
            ));
        }

        show_failures(ui, &report.failures, "interpreter");
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    #[test]
    fn empty_search_path_reports_none_found() {
        let temp = TempDir::new().unwrap();
        let locator = InterpreterLocator::with_search_path(vec![temp.path().to_path_buf()]);
        let cmd = InterpretersCommand::new(locator, InterpretersArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();
        assert!(result.success);
        assert!(ui.has_message("No Python 3 interpreters found"));
        assert!(ui.outputs().is_empty());
    }

    #[test]
    fn json_output_for_empty_search_path() {
        let locator = InterpreterLocator::with_search_path(Vec::new());
        let cmd = InterpretersCommand::new(locator, InterpretersArgs { json: true });
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();
        assert_eq!(ui.outputs(), ["[]"]);
    }

    #[cfg(unix)]
    #[test]
    fn lists_fake_interpreter() {
        use std::fs;
        use std::os::unix::fs::PermissionsExt;

        let _guard = crate::interpreters::SPAWN_LOCK
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("python3.8");
        fs::write(&path, "#!/bin/sh\necho 'Python 3.8.10'\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();

        let locator = InterpreterLocator::with_search_path(vec![temp.path().to_path_buf()]);
        let cmd = InterpretersCommand::new(locator, InterpretersArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();
        assert!(result.success);
        assert!(ui.output_text().contains("Python 3.8.10"));
        assert!(ui.successes().contains(&"Found 1 interpreter".to_string()));
    }
}
