//! Shared display helpers for listing commands.

use serde::Serialize;

use crate::error::{Result, VenvscopeError};
use crate::ui::UserInterface;

/// Pretty-print `value` as JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| VenvscopeError::Other(e.into()))
}

/// Report the per-item failures of a batch.
///
/// Verbose mode lists each failure; otherwise a single summary line
/// points at `--verbose`.
pub fn show_failures(ui: &mut dyn UserInterface, failures: &[VenvscopeError], noun: &str) {
    if failures.is_empty() {
        return;
    }

    if ui.output_mode().shows_details() {
        for failure in failures {
            ui.warning(&failure.to_string());
        }
    } else {
        ui.warning(&format!(
            "Skipped {} {} (use --verbose for details)",
            failures.len(),
            plural(failures.len(), noun)
        ));
    }
}

/// `noun` with an `s` appended unless `count` is one.
pub fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        noun.to_string()
    } else {
        format!("{}s", noun)
    }
}
