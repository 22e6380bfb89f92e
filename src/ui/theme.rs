//! Visual theme and styling.

use console::Style;

/// venvscope's visual theme.
#[derive(Debug, Clone)]
pub struct VenvscopeTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (orange).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
}

impl Default for VenvscopeTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl VenvscopeTheme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().for_stderr().green(),
            warning: Style::new().for_stderr().color256(208),
            error: Style::new().for_stderr().red().bold(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
        }
    }

    /// Format a success message (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning message (icon + text in orange).
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }
}

/// Check if colors should be enabled for status output on stderr.
pub fn should_use_colors() -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stderr().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_formats_success() {
        let theme = VenvscopeTheme::plain();
        let msg = theme.format_success("Complete");
        assert_eq!(msg, "✓ Complete");
    }

    #[test]
    fn theme_formats_warning() {
        let theme = VenvscopeTheme::plain();
        assert_eq!(theme.format_warning("Caution"), "⚠ Caution");
    }

    #[test]
    fn theme_formats_error() {
        let theme = VenvscopeTheme::plain();
        assert_eq!(theme.format_error("Failed"), "✗ Failed");
    }

    #[test]
    fn default_impl_matches_new() {
        let default = VenvscopeTheme::default();
        let new = VenvscopeTheme::new();
        assert_eq!(default.format_success("test"), new.format_success("test"));
    }
}
