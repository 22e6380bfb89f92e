//! Non-interactive UI for pipes, CI and scripts.

use std::collections::HashMap;

use crate::error::{Result, VenvscopeError};

use super::{
    parse_bool, OutputMode, ProgressSpinner, Prompt, PromptResult, SpinnerHandle, UserInterface,
};

/// Prefix for environment variables that answer prompts without a terminal.
pub const PROMPT_ENV_PREFIX: &str = "VENVSCOPE_PROMPT_";

/// UI implementation for non-interactive mode.
///
/// Prompts are answered from `VENVSCOPE_PROMPT_<KEY>` variables, then from
/// the prompt's default.
pub struct NonInteractiveUI {
    mode: OutputMode,
    env_overrides: HashMap<String, String>,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
            .collect();

        Self::with_overrides(mode, env_overrides)
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            env_overrides: overrides,
        }
    }

    fn answer_for(&self, prompt: &Prompt) -> Option<String> {
        let env_key = format!("{}{}", PROMPT_ENV_PREFIX, prompt.key.to_uppercase());
        self.env_overrides
            .get(&env_key)
            .cloned()
            .or_else(|| prompt.default.clone())
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn output(&mut self, text: &str) {
        if self.mode.shows_results() {
            println!("{}", text);
        }
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        let answer = self.answer_for(prompt).ok_or_else(|| {
            VenvscopeError::Other(anyhow::anyhow!(
                "Cannot prompt for '{}' in non-interactive mode (no default value)",
                prompt.key
            ))
        })?;

        Ok(PromptResult::Bool(parse_bool(&answer)))
    }

    fn start_spinner(&mut self, _message: &str) -> Box<dyn SpinnerHandle> {
        Box::new(ProgressSpinner::hidden())
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirm_uses_default() {
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, HashMap::new());
        let prompt = Prompt::confirm("save_default", "Save anyway?", false);

        let result = ui.prompt(&prompt).unwrap();
        assert!(!result.as_bool());
    }

    #[test]
    fn env_override_wins_over_default() {
        let mut overrides = HashMap::new();
        overrides.insert("VENVSCOPE_PROMPT_SAVE_DEFAULT".to_string(), "yes".to_string());
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, overrides);
        let prompt = Prompt::confirm("save_default", "Save anyway?", false);

        let result = ui.prompt(&prompt).unwrap();
        assert!(result.as_bool());
    }

    #[test]
    fn confirm_without_default_fails() {
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, HashMap::new());
        let prompt = Prompt {
            default: None,
            ..Prompt::confirm("overwrite", "Overwrite?", false)
        };

        assert!(ui.prompt(&prompt).is_err());
    }

    #[test]
    fn is_never_interactive() {
        let ui = NonInteractiveUI::with_overrides(OutputMode::Normal, HashMap::new());
        assert!(!ui.is_interactive());
    }
}
