//! Terminal output components.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] writing styled lines to stdout
//! - [`MockUI`] capturing output for tests
//!
//! # Example
//!
//! ```
//! use devcheck::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.show_header("Checking Packages");
//! ui.success("git");
//! assert!(ui.has_success("git"));
//! ```

pub mod icons;
pub mod mock;
pub mod output;
pub mod terminal;
pub mod theme;

pub use icons::StatusKind;
pub use mock::MockUI;
pub use output::OutputMode;
pub use terminal::TerminalUI;
pub use theme::{should_use_colors, DevcheckTheme, RULE_WIDTH};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Show a banner framed by rules.
    fn show_header(&mut self, title: &str);

    /// Display a plain message.
    fn message(&mut self, msg: &str);

    /// Display an indented secondary line.
    fn detail(&mut self, msg: &str);

    /// Display a passing check.
    fn success(&mut self, msg: &str);

    /// Display a warning.
    fn warning(&mut self, msg: &str);

    /// Display a failure.
    fn error(&mut self, msg: &str);

    /// Display the final verdict of a run.
    fn outcome(&mut self, passed: bool, msg: &str);

    /// Display a line for the given status kind.
    fn status(&mut self, kind: StatusKind, msg: &str) {
        match kind {
            StatusKind::Success => self.success(msg),
            StatusKind::Warning => self.warning(msg),
            StatusKind::Failed => self.error(msg),
        }
    }
}
