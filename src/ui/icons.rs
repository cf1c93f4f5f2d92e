//! Status vocabulary shared by every line of check output.

use super::theme::DevcheckTheme;
use crate::checks::Severity;

/// Canonical status kinds used across devcheck output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    /// Check passed.
    Success,
    /// Non-fatal problem.
    Warning,
    /// Problem that fails the run.
    Failed,
}

impl StatusKind {
    /// Unicode icon for TTY output.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Warning => "⚠",
            Self::Failed => "✗",
        }
    }

    /// Bracketed text for non-TTY output.
    pub fn bracketed(self) -> &'static str {
        match self {
            Self::Success => "[ok]",
            Self::Warning => "[warn]",
            Self::Failed => "[FAIL]",
        }
    }

    /// Style for this kind within `theme`.
    pub fn style(self, theme: &DevcheckTheme) -> &console::Style {
        match self {
            Self::Success => &theme.success,
            Self::Warning => &theme.warning,
            Self::Failed => &theme.error,
        }
    }

    /// Format a status line: icon + message, both styled.
    pub fn format(self, theme: &DevcheckTheme, msg: &str) -> String {
        self.style(theme)
            .apply_to(format!("{} {}", self.icon(), msg))
            .to_string()
    }

    /// Format a status line for non-TTY: bracketed + message.
    pub fn format_plain(self, msg: &str) -> String {
        format!("{} {}", self.bracketed(), msg)
    }
}

impl From<Severity> for StatusKind {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Pass => Self::Success,
            Severity::Warning => Self::Warning,
            Severity::Failure => Self::Failed,
        }
    }
}
