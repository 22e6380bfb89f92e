//! Interactive prompts.

use console::Term;
use dialoguer::Confirm;

use crate::error::{Result, VenvscopeError};

use super::{parse_bool, Prompt, PromptResult};

fn map_dialoguer_err(e: dialoguer::Error) -> VenvscopeError {
    VenvscopeError::Io(e.into())
}

/// Ask the user to confirm on `term`.
pub fn prompt_user(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    let default = prompt.default.as_deref().map(parse_bool).unwrap_or(false);

    let answer = Confirm::new()
        .with_prompt(&prompt.question)
        .default(default)
        .interact_on(term)
        .map_err(map_dialoguer_err)?;

    Ok(PromptResult::Bool(answer))
}
