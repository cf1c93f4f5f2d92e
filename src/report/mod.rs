//! Aggregated results of one run.
//!
//! A [`Report`] is an ordered list of [`ReportGroup`]s, one per inspected
//! category (one per application for applications). It is built by the
//! runner and never mutated once the final summary is computed.

pub mod render;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::checks::{Category, CheckResult, CheckStatus, Severity};

pub use render::{render_final, render_group};

/// Results of one category, or of one application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportGroup {
    /// Category the results belong to.
    pub category: Category,
    /// Heading shown above the results.
    pub title: String,
    /// Results in check order.
    pub results: Vec<CheckResult>,
}

impl ReportGroup {
    /// Create a group.
    pub fn new(category: Category, title: impl Into<String>, results: Vec<CheckResult>) -> Self {
        Self {
            category,
            title: title.into(),
            results,
        }
    }

    /// Results covering subject presence (no facet).
    pub fn presence_results(&self) -> impl Iterator<Item = &CheckResult> {
        self.results.iter().filter(|r| r.is_presence())
    }
}

/// Installed counts for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tally {
    /// Subjects found.
    pub installed: usize,
    /// Subjects checked.
    pub total: usize,
}

/// Installed and correct-version counts for version-managed tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToolTally {
    /// Tools with any active version.
    pub installed: usize,
    /// Tools at exactly the expected version.
    pub correct: usize,
    /// Tools checked.
    pub total: usize,
}

/// Presence of one application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationSummary {
    /// Application name.
    pub name: String,
    /// Whether it was found.
    pub installed: bool,
}

/// Counts re-stated by the final report.
///
/// Categories that were not run are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Package presence.
    pub packages: Option<Tally>,
    /// Tool presence and versions.
    pub tools: Option<ToolTally>,
    /// Severity of the overall PATH precedence result.
    pub path_precedence: Option<Severity>,
    /// Application presence, in manifest order.
    pub applications: Vec<ApplicationSummary>,
    /// Results that fail the run.
    pub failures: usize,
    /// Results that only warn.
    pub warnings: usize,
}

impl Summary {
    /// Whether PATH precedence was checked and correct.
    pub fn path_precedence_ok(&self) -> Option<bool> {
        self.path_precedence.map(|s| s == Severity::Pass)
    }
}

/// Ordered results of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// When the run started.
    pub generated_at: DateTime<Utc>,
    /// Groups in run order.
    pub groups: Vec<ReportGroup>,
}

impl Default for Report {
    fn default() -> Self {
        Self::new()
    }
}

impl Report {
    /// Create an empty report stamped with the current time.
    pub fn new() -> Self {
        Self {
            generated_at: Utc::now(),
            groups: Vec::new(),
        }
    }

    /// Append a group.
    pub fn push(&mut self, group: ReportGroup) {
        self.groups.push(group);
    }

    /// Every result, in order.
    pub fn results(&self) -> impl Iterator<Item = &CheckResult> {
        self.groups.iter().flat_map(|g| g.results.iter())
    }

    /// Results that fail the run.
    pub fn failures(&self) -> Vec<&CheckResult> {
        self.results().filter(|r| r.is_failure()).collect()
    }

    /// 1 if any result is a failure, else 0.
    pub fn exit_code(&self) -> i32 {
        if self.results().any(CheckResult::is_failure) {
            1
        } else {
            0
        }
    }

    /// Compute the final counts.
    pub fn summary(&self) -> Summary {
        let in_category = |category: Category| {
            self.groups
                .iter()
                .filter(move |g| g.category == category)
                .flat_map(|g| g.presence_results())
        };
        let ran = |category: Category| self.groups.iter().any(|g| g.category == category);

        let packages = ran(Category::Packages).then(|| {
            let results: Vec<_> = in_category(Category::Packages).collect();
            Tally {
                installed: results.iter().filter(|r| r.status == CheckStatus::Ok).count(),
                total: results.len(),
            }
        });

        let tools = ran(Category::Tools).then(|| {
            let results: Vec<_> = in_category(Category::Tools).collect();
            ToolTally {
                installed: results
                    .iter()
                    .filter(|r| r.status != CheckStatus::Missing)
                    .count(),
                correct: results.iter().filter(|r| r.status == CheckStatus::Ok).count(),
                total: results.len(),
            }
        });

        let path_precedence = self
            .groups
            .iter()
            .filter(|g| g.category == Category::Path)
            .flat_map(|g| g.results.iter())
            .find(|r| r.facet.as_deref() == Some("precedence"))
            .map(|r| r.severity);

        let applications = in_category(Category::Applications)
            .map(|r| ApplicationSummary {
                name: r.subject.clone(),
                installed: r.status != CheckStatus::Missing,
            })
            .collect();

        Summary {
            packages,
            tools,
            path_precedence,
            applications,
            failures: self.results().filter(|r| r.severity == Severity::Failure).count(),
            warnings: self.results().filter(|r| r.severity == Severity::Warning).count(),
        }
    }

    /// Serialize the report, its summary and exit code as pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        #[derive(Serialize)]
        struct JsonReport<'a> {
            generated_at: &'a DateTime<Utc>,
            exit_code: i32,
            summary: Summary,
            groups: &'a [ReportGroup],
        }

        serde_json::to_string_pretty(&JsonReport {
            generated_at: &self.generated_at,
            exit_code: self.exit_code(),
            summary: self.summary(),
            groups: &self.groups,
        })
    }
}
