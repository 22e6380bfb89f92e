//! The `venvscope search` command.

use crate::cli::args::SearchArgs;
use crate::error::Result;
use crate::index::PackageIndex;
use crate::ui::{Table, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::display::{plural, to_json};

/// Searches the package index by name.
pub struct SearchCommand {
    index: Box<dyn PackageIndex>,
    args: SearchArgs,
}

impl SearchCommand {
    /// Create a new search command.
    pub fn new(index: Box<dyn PackageIndex>, args: SearchArgs) -> Self {
        Self { index, args }
    }
}

impl Command for SearchCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut spinner = ui.start_spinner(&format!("Searching for '{}'", self.args.name));

        let records = match self.index.search(&self.args.name) {
            Ok(records) => {
                spinner.finish_success(&format!(
                    "Found {} {}",
                    records.len(),
                    plural(records.len(), "package")
                ));
                records
            }
            Err(e) => {
                spinner.finish_error("Search failed");
                return Err(e);
            }
        };

        if self.args.json {
            ui.output(&to_json(&records)?);
            return Ok(CommandResult::success());
        }

        if records.is_empty() {
            ui.message(&format!("No packages match '{}'", self.args.name));
            return Ok(CommandResult::success());
        }

        let mut table = Table::new(&["Name", "Version", "Summary"]);
        for record in &records {
            table.add_row([
                record.name.as_str(),
                record.version.as_str(),
                record.summary.as_str(),
            ]);
        }
        ui.output(&table.render());

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VenvscopeError;
    use crate::index::ModuleRecord;
    use crate::ui::MockUI;

    struct StubIndex(Vec<ModuleRecord>);

    impl PackageIndex for StubIndex {
        fn search(&self, _query_name: &str) -> Result<Vec<ModuleRecord>> {
            Ok(self.0.clone())
        }
    }

    struct FailingIndex;

    impl PackageIndex for FailingIndex {
        fn search(&self, _query_name: &str) -> Result<Vec<ModuleRecord>> {
            Err(VenvscopeError::remote("connection refused"))
        }
    }

    fn record(name: &str, version: &str, summary: &str) -> ModuleRecord {
        ModuleRecord {
            name: name.to_string(),
            version: version.to_string(),
            summary: summary.to_string(),
        }
    }

    fn args(json: bool) -> SearchArgs {
        SearchArgs {
            name: "flask".to_string(),
            json,
        }
    }

    #[test]
    fn renders_results_in_index_order() {
        let index = StubIndex(vec![
            record("Flask", "3.0.0", "A micro framework"),
            record("Flask-Login", "0.6.3", "User sessions"),
        ]);
        let cmd = SearchCommand::new(Box::new(index), args(false));
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();
        assert!(result.success);
        assert_eq!(ui.spinners(), ["Searching for 'flask'"]);

        let text = ui.output_text();
        let first = text.find("Flask ").unwrap();
        let second = text.find("Flask-Login").unwrap();
        assert!(first < second);
    }

    #[test]
    fn json_output_keeps_fields() {
        let index = StubIndex(vec![record("flask", "3.0.0", "")]);
        let cmd = SearchCommand::new(Box::new(index), args(true));
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&ui.output_text()).unwrap();
        assert_eq!(parsed[0]["name"], "flask");
        assert_eq!(parsed[0]["summary"], "");
    }

    #[test]
    fn no_results_is_success() {
        let cmd = SearchCommand::new(Box::new(StubIndex(Vec::new())), args(false));
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();
        assert!(result.success);
        assert!(ui.has_message("No packages match 'flask'"));
    }

    #[test]
    fn index_failure_propagates() {
        let cmd = SearchCommand::new(Box::new(FailingIndex), args(false));
        let mut ui = MockUI::new();

        let err = cmd.execute(&mut ui).unwrap_err();
        assert!(matches!(err, VenvscopeError::RemoteQuery { .. }));
        assert!(ui.outputs().is_empty());
    }
}
