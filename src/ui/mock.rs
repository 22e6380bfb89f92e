//! Mock UI implementation for testing.
//!
//! `MockUI` implements [`UserInterface`] and captures every interaction for
//! later assertion. Prompt answers can be configured up front.
//!
//! # Example
//!
//! ```
//! use venvscope::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.set_prompt_response("save_default", "true");
//!
//! ui.message("Scanning");
//! ui.success("Found 2 environments");
//!
//! assert!(ui.has_message("Scanning"));
//! assert!(ui.successes().contains(&"Found 2 environments".to_string()));
//! ```

use std::collections::HashMap;

use crate::error::{Result, VenvscopeError};

use super::{parse_bool, OutputMode, Prompt, PromptResult, SpinnerHandle, UserInterface};

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    interactive: bool,
    outputs: Vec<String>,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    spinners: Vec<String>,
    prompt_responses: HashMap<String, String>,
    prompts_shown: Vec<String>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Set the answer returned when `key` is prompted.
    pub fn set_prompt_response(&mut self, key: &str, response: &str) {
        self.prompt_responses
            .insert(key.to_string(), response.to_string());
    }

    /// Set whether this mock behaves as interactive.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    /// Results printed with `output`.
    pub fn outputs(&self) -> &[String] {
        &self.outputs
    }

    /// Get all captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get all captured warning messages.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get all captured error messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get all spinner messages that were started.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// Keys of all prompts that were shown.
    pub fn prompts_shown(&self) -> &[String] {
        &self.prompts_shown
    }

    /// All printed results joined by newlines.
    pub fn output_text(&self) -> String {
        self.outputs.join("\n")
    }

    /// Check if any message contains the given text.
    pub fn has_message(&self, text: &str) -> bool {
        self.messages.iter().any(|m| m.contains(text))
    }

    /// Check if any warning contains the given text.
    pub fn has_warning(&self, text: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(text))
    }

    /// Check if any error contains the given text.
    pub fn has_error(&self, text: &str) -> bool {
        self.errors.iter().any(|m| m.contains(text))
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn output(&mut self, text: &str) {
        self.outputs.push(text.to_string());
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        self.prompts_shown.push(prompt.key.clone());

        let answer = self
            .prompt_responses
            .get(&prompt.key)
            .cloned()
            .or_else(|| prompt.default.clone())
            .ok_or_else(|| {
                VenvscopeError::Other(anyhow::anyhow!(
                    "no mock response for prompt '{}'",
                    prompt.key
                ))
            })?;

        Ok(PromptResult::Bool(parse_bool(&answer)))
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner::default())
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// Spinner that records its final state.
#[derive(Debug, Default)]
pub struct MockSpinner {
    /// Last message set on the spinner.
    pub message: String,
    /// Final message and whether it succeeded.
    pub finished: Option<(String, bool)>,
}

impl SpinnerHandle for MockSpinner {
    fn set_message(&mut self, msg: &str) {
        self.message = msg.to_string();
    }

    fn finish_success(&mut self, msg: &str) {
        self.finished = Some((msg.to_string(), true));
    }

    fn finish_error(&mut self, msg: &str) {
        self.finished = Some((msg.to_string(), false));
    }
}
