//! Terminal user interface.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for pipes, CI and scripts
//! - [`MockUI`] for tests
//! - Prompts, spinners, and tables
//!
//! # Example
//!
//! ```
//! use venvscope::ui::{create_ui, OutputMode};
//!
//! // Use non-interactive mode for testability
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! ui.success("Found 2 environments");
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod prompts;
pub mod spinner;
pub mod table;
pub mod terminal;
pub mod theme;

pub use mock::{MockSpinner, MockUI};
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use prompts::prompt_user;
pub use spinner::ProgressSpinner;
pub use table::Table;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, VenvscopeTheme};

use crate::error::Result;

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Change the output mode.
    fn set_output_mode(&mut self, mode: OutputMode);

    /// Print command results (tables, JSON). Shown unless silent.
    fn output(&mut self, text: &str);

    /// Display a status message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Show a prompt and get user input.
    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult>;

    /// Start a spinner for an operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Update the spinner message.
    fn set_message(&mut self, msg: &str);

    /// Mark the operation as successful.
    fn finish_success(&mut self, msg: &str);

    /// Mark the operation as failed.
    fn finish_error(&mut self, msg: &str);
}

/// A yes/no confirmation to show to the user.
#[derive(Debug, Clone)]
pub struct Prompt {
    /// Unique key for the prompt (used for lookup in tests).
    pub key: String,
    /// The question to display.
    pub question: String,
    /// Default answer if user just presses enter.
    pub default: Option<String>,
}

impl Prompt {
    /// Build a yes/no confirmation.
    pub fn confirm(key: &str, question: &str, default: bool) -> Self {
        Self {
            key: key.to_string(),
            question: question.to_string(),
            default: Some(default.to_string()),
        }
    }
}

/// Result of a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptResult {
    /// Answer to a confirmation.
    Bool(bool),
}

impl PromptResult {
    /// The yes/no answer.
    pub fn as_bool(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
        }
    }
}

/// Parse a textual yes/no answer.
pub(crate) fn parse_bool(value: &str) -> bool {
    matches!(
        value.to_lowercase().as_str(),
        "true" | "yes" | "y" | "1"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_result_as_bool() {
        assert!(PromptResult::Bool(true).as_bool());
        assert!(!PromptResult::Bool(false).as_bool());
    }

    #[test]
    fn confirm_prompt_carries_default() {
        let prompt = Prompt::confirm("save", "Save anyway?", false);
        assert_eq!(prompt.key, "save");
        assert_eq!(prompt.default.as_deref(), Some("false"));
    }

    #[test]
    fn parse_bool_accepts_common_forms() {
        assert!(parse_bool("yes"));
        assert!(parse_bool("Y"));
        assert!(parse_bool("true"));
        assert!(!parse_bool("no"));
        assert!(!parse_bool(""));
    }
}
