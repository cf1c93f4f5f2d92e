//! Version-managed tool checks.
//!
//! Asks the version manager for the tool's current version
//! (`asdf current <tool>`) and compares it to the expected string exactly.

use super::status::{CheckResult, CheckStatus};
use crate::shell::CommandRunner;

/// Current version of one version-managed tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolResult {
    /// Tool name as known to the version manager.
    pub tool: String,
    /// Version the manifest expects.
    pub expected_version: String,
    /// Version the version manager reports, if any.
    pub current_version: Option<String>,
}

impl ToolResult {
    /// Whether the version manager reported a version at all.
    pub fn installed(&self) -> bool {
        self.current_version.is_some()
    }

    /// Whether the reported version equals the expected one.
    pub fn version_correct(&self) -> bool {
        self.current_version.as_deref() == Some(self.expected_version.as_str())
    }

    /// Status derived from the observed version.
    pub fn status(&self) -> CheckStatus {
        match &self.current_version {
            None => CheckStatus::Missing,
            Some(_) if self.version_correct() => CheckStatus::Ok,
            Some(_) => CheckStatus::WrongVersion,
        }
    }

    /// Convert into a report result.
    pub fn to_check_result(&self) -> CheckResult {
        let status = self.status();
        let message = match (&self.current_version, status) {
            (Some(current), CheckStatus::Ok) => format!("{} @ {}", self.tool, current),
            (Some(current), _) => format!(
                "{} @ {} (expected: {})",
                self.tool, current, self.expected_version
            ),
            (None, _) => format!(
                "{} - NOT INSTALLED (expected: {})",
                self.tool, self.expected_version
            ),
        };

        CheckResult::new(&self.tool, status, message)
            .expected(&self.expected_version)
            .observed(self.current_version.as_deref())
    }
}

/// Parse `current` output such as `golang  1.20.5  /home/u/.tool-versions`.
///
/// The version is the second whitespace-separated token.
pub fn parse_current_version(stdout: &str) -> Option<String> {
    stdout.split_whitespace().nth(1).map(String::from)
}

/// Query the version manager for `tool` and compare to `expected_version`.
pub fn check_tool(
    runner: &dyn CommandRunner,
    version_manager: &str,
    tool: &str,
    expected_version: &str,
) -> ToolResult {
    let output = runner.run(&[version_manager, "current", tool]);
    let current_version = if output.success {
        parse_current_version(&output.stdout)
    } else {
        tracing::debug!("{} current {} failed: {}", version_manager, tool, output.stderr.trim());
        None
    };

    ToolResult {
        tool: tool.to_string(),
        expected_version: expected_version.to_string(),
        current_version,
    }
}
