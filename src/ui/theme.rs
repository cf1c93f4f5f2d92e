//! Visual theme and styling.

use console::Style;

/// Width of the `=` rules framing section headers.
pub const RULE_WIDTH: usize = 70;

/// Devcheck's visual theme.
#[derive(Debug, Clone)]
pub struct DevcheckTheme {
    /// Style for passing checks (green).
    pub success: Style,
    /// Style for warnings (yellow).
    pub warning: Style,
    /// Style for failures (red).
    pub error: Style,
    /// Style for banner titles (bold blue).
    pub header: Style,
    /// Style for detail lines (dim).
    pub dim: Style,
    /// Style for key labels in key-value displays (bold).
    pub key: Style,
}

impl Default for DevcheckTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl DevcheckTheme {
    /// Create the default colored theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red(),
            header: Style::new().bold().blue(),
            dim: Style::new().dim(),
            key: Style::new().bold(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            header: Style::new(),
            dim: Style::new(),
            key: Style::new(),
        }
    }

    /// Format a banner: title framed by `=` rules.
    pub fn format_header(&self, title: &str) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        format!(
            "{}\n{}\n{}",
            self.header.apply_to(&rule),
            self.header.apply_to(title),
            self.header.apply_to(&rule)
        )
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}
