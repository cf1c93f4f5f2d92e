//! Check status types.
//!
//! Every inspection produces one or more [`CheckResult`]s. A result carries
//! a [`CheckStatus`] describing what was observed and a [`Severity`]
//! deciding whether it affects the exit code.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// What an inspection observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckStatus {
    /// Present and matching expectations.
    Ok,
    /// Present, but the version differs from what was expected.
    WrongVersion,
    /// Not present at all.
    Missing,
    /// Present but not quite right (location, ordering, value).
    Warn,
}

impl CheckStatus {
    /// Severity this status carries unless a check overrides it.
    pub fn default_severity(self) -> Severity {
        match self {
            Self::Ok => Severity::Pass,
            Self::WrongVersion | Self::Warn => Severity::Warning,
            Self::Missing => Severity::Failure,
        }
    }
}

/// How a result affects the overall outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Nothing to report.
    Pass,
    /// Printed, but does not change the exit code.
    Warning,
    /// Makes the run exit with status 1.
    Failure,
}

/// Groups of checks, in the order a run performs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Environment variables, live and persisted.
    Env,
    /// PATH precedence of user directories.
    Path,
    /// Package-manager packages.
    Packages,
    /// Individually tracked applications.
    Applications,
    /// Version-managed tools.
    Tools,
}

impl Category {
    /// All categories in run order.
    pub const ALL: [Category; 5] = [
        Category::Env,
        Category::Path,
        Category::Packages,
        Category::Applications,
        Category::Tools,
    ];

    /// Short name used on the command line and in JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Env => "env",
            Self::Path => "path",
            Self::Packages => "packages",
            Self::Applications => "applications",
            Self::Tools => "tools",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "env" => Ok(Self::Env),
            "path" => Ok(Self::Path),
            "packages" => Ok(Self::Packages),
            "applications" | "apps" => Ok(Self::Applications),
            "tools" => Ok(Self::Tools),
            _ => Err(format!(
                "unknown category: {} (expected one of env, path, packages, applications, tools)",
                s
            )),
        }
    }
}

/// The outcome of one inspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    /// Package, tool, application, variable or directory name.
    pub subject: String,

    /// Which aspect of the subject was inspected (`None` for presence).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facet: Option<String>,

    /// Expected value, if the check has one.
    pub expected: Option<String>,

    /// Observed value, if anything was observed.
    pub observed: Option<String>,

    /// What was observed.
    pub status: CheckStatus,

    /// Effect on the exit code.
    pub severity: Severity,

    /// One-line human description.
    pub message: String,

    /// Supplementary lines shown indented under the message.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

impl CheckResult {
    /// Create a result whose severity follows from its status.
    pub fn new(subject: impl Into<String>, status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            facet: None,
            expected: None,
            observed: None,
            status,
            severity: status.default_severity(),
            message: message.into(),
            details: Vec::new(),
        }
    }

    /// Mark the aspect of the subject this result covers.
    pub fn facet(mut self, facet: &str) -> Self {
        self.facet = Some(facet.to_string());
        self
    }

    /// Record the expected value.
    pub fn expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    /// Record the observed value.
    pub fn observed(mut self, observed: Option<impl Into<String>>) -> Self {
        self.observed = observed.map(Into::into);
        self
    }

    /// Append an indented detail line.
    pub fn detail(mut self, line: impl Into<String>) -> Self {
        self.details.push(line.into());
        self
    }

    /// Override the severity.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Whether this result covers the subject's presence rather than a facet.
    pub fn is_presence(&self) -> bool {
        self.facet.is_none()
    }

    /// Whether this result makes the run fail.
    pub fn is_failure(&self) -> bool {
        self.severity == Severity::Failure
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_severities() {
        assert_eq!(CheckStatus::Ok.default_severity(), Severity::Pass);
        assert_eq!(CheckStatus::WrongVersion.default_severity(), Severity::Warning);
        assert_eq!(CheckStatus::Warn.default_severity(), Severity::Warning);
        assert_eq!(CheckStatus::Missing.default_severity(), Severity::Failure);
    }

    #[test]
    fn builder_sets_fields() {
        let result = CheckResult::new("golang", CheckStatus::WrongVersion, "golang @ 1.21.0")
            .facet("version")
            .expected("1.20.5")
            .observed(Some("1.21.0"))
            .detail("managed by asdf");
        assert_eq!(result.facet.as_deref(), Some("version"));
        assert_eq!(result.expected.as_deref(), Some("1.20.5"));
        assert_eq!(result.observed.as_deref(), Some("1.21.0"));
        assert_eq!(result.details, vec!["managed by asdf"]);
        assert_eq!(result.severity, Severity::Warning);
        assert!(!result.is_presence());
        assert!(!result.is_failure());
    }

    #[test]
    fn severity_can_be_escalated() {
        let result = CheckResult::new("~/.bin", CheckStatus::Warn, "after system dirs")
            .with_severity(Severity::Failure);
        assert!(result.is_failure());
    }

    #[test]
    fn observed_none_clears_value() {
        let result = CheckResult::new("x", CheckStatus::Missing, "x").observed(None::<String>);
        assert!(result.observed.is_none());
    }

    #[test]
    fn category_parses_from_str() {
        assert_eq!("env".parse::<Category>(), Ok(Category::Env));
        assert_eq!("APPS".parse::<Category>(), Ok(Category::Applications));
        assert!("fonts".parse::<Category>().is_err());
    }

    #[test]
    fn category_display_round_trips() {
        for category in Category::ALL {
            assert_eq!(category.to_string().parse::<Category>(), Ok(category));
        }
    }

    #[test]
    fn status_serializes_screaming_case() {
        let json = serde_json::to_string(&CheckStatus::WrongVersion).unwrap();
        assert_eq!(json, "\"WRONG_VERSION\"");
    }

    #[test]
    fn severity_orders_by_impact() {
        assert!(Severity::Failure > Severity::Warning);
        assert!(Severity::Warning > Severity::Pass);
    }
}
