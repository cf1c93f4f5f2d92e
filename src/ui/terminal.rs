//! Terminal UI writing to stdout.

use console::Term;
use std::io::Write;

use super::{DevcheckTheme, OutputMode, StatusKind, UserInterface};

/// Terminal UI implementation.
///
/// Status lines use unicode icons on a TTY and bracketed labels otherwise.
pub struct TerminalUI {
    term: Term,
    theme: DevcheckTheme,
    mode: OutputMode,
    unicode: bool,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode, colors: bool) -> Self {
        let term = Term::stdout();
        let theme = if colors {
            DevcheckTheme::new()
        } else {
            DevcheckTheme::plain()
        };

        Self {
            unicode: term.is_term(),
            term,
            theme,
            mode,
        }
    }

    fn status_line(&self, kind: StatusKind, msg: &str) -> String {
        if self.unicode {
            kind.format(&self.theme, msg)
        } else {
            kind.format_plain(msg)
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_progress() {
            writeln!(self.term, "\n{}", self.theme.format_header(title)).ok();
        }
    }

    fn message(&mut self, msg: &str) {
        writeln!(self.term, "{}", msg).ok();
    }

    fn detail(&mut self, msg: &str) {
        if self.mode.shows_progress() {
            if msg.is_empty() {
                writeln!(self.term).ok();
            } else {
                writeln!(self.term, "  {}", self.theme.dim.apply_to(msg)).ok();
            }
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_progress() {
            let line = self.status_line(StatusKind::Success, msg);
            writeln!(self.term, "{}", line).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        let line = self.status_line(StatusKind::Warning, msg);
        writeln!(self.term, "{}", line).ok();
    }

    fn error(&mut self, msg: &str) {
        let line = self.status_line(StatusKind::Failed, msg);
        writeln!(self.term, "{}", line).ok();
    }

    fn outcome(&mut self, passed: bool, msg: &str) {
        let kind = if passed {
            StatusKind::Success
        } else {
            StatusKind::Failed
        };
        let line = self.status_line(kind, msg);
        writeln!(self.term, "\n{}", self.theme.key.apply_to(line)).ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_ui_output_mode() {
        let ui = TerminalUI::new(OutputMode::Quiet, false);
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
    }

    #[test]
    fn plain_status_line_without_tty() {
        let mut ui = TerminalUI::new(OutputMode::Normal, false);
        ui.unicode = false;
        assert_eq!(ui.status_line(StatusKind::Failed, "bat"), "[FAIL] bat");
        ui.unicode = true;
        assert_eq!(ui.status_line(StatusKind::Success, "git"), "✓ git");
    }
}
