//! PATH precedence checks.
//!
//! User-priority directories must appear on PATH before the system
//! reference directory, which is the first canonical system directory found
//! when scanning PATH from the front.

use super::status::{CheckResult, CheckStatus, Severity};
use crate::config::{expand_home, PathSpec};
use crate::shell::HostEnv;

/// The system directory priority directories are measured against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemReference {
    /// Directory as it appears on PATH.
    pub dir: String,
    /// Position on PATH.
    pub index: usize,
}

/// Position of one priority directory on PATH.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathEntryResult {
    /// Expanded directory.
    pub dir: String,
    /// Directory with the home prefix abbreviated, for display.
    pub display: String,
    /// First position on PATH, if present.
    pub index: Option<usize>,
    /// Present and ahead of the system reference.
    pub before_system: bool,
}

/// Outcome of the PATH precedence inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathReport {
    /// Reference directory, if any system directory is on PATH.
    pub reference: Option<SystemReference>,
    /// One entry per priority directory, in manifest order.
    pub entries: Vec<PathEntryResult>,
}

impl PathReport {
    /// Whether every priority directory precedes the system reference.
    pub fn precedence_ok(&self) -> bool {
        self.entries.iter().all(|e| e.before_system)
    }

    /// Convert into per-directory results followed by an overall result.
    ///
    /// A directory missing from PATH always fails. A directory behind the
    /// system reference only warns unless `strict` is set.
    pub fn to_check_results(&self, strict: bool) -> Vec<CheckResult> {
        let escalate = |result: CheckResult| {
            if strict {
                result.with_severity(Severity::Failure)
            } else {
                result
            }
        };

        let mut results: Vec<CheckResult> = self
            .entries
            .iter()
            .map(|entry| {
                let result = match (entry.index, &self.reference) {
                    (None, _) => CheckResult::new(
                        &entry.display,
                        CheckStatus::Missing,
                        format!("{} is NOT on PATH", entry.display),
                    ),
                    (Some(index), None) => escalate(CheckResult::new(
                        &entry.display,
                        CheckStatus::Warn,
                        format!(
                            "{} is on PATH (index {}) but no system directory was found",
                            entry.display, index
                        ),
                    )),
                    (Some(index), Some(_)) if entry.before_system => CheckResult::new(
                        &entry.display,
                        CheckStatus::Ok,
                        format!("{} is on PATH (index {}, before system dirs)", entry.display, index),
                    ),
                    (Some(index), Some(_)) => escalate(CheckResult::new(
                        &entry.display,
                        CheckStatus::Warn,
                        format!(
                            "{} is on PATH (index {}) but AFTER system dirs",
                            entry.display, index
                        ),
                    )),
                };
                result
                    .expected("before system dirs")
                    .observed(entry.index.map(|i| format!("index {}", i)))
            })
            .collect();

        let overall = if self.precedence_ok() {
            CheckResult::new(
                "PATH",
                CheckStatus::Ok,
                "PATH precedence is correct (user dirs before system dirs)",
            )
        } else {
            escalate(CheckResult::new(
                "PATH",
                CheckStatus::Warn,
                "PATH precedence: some user dirs are missing or after system dirs",
            ))
        };
        let overall = match &self.reference {
            Some(reference) => overall.detail(format!(
                "System reference: {} (index {})",
                reference.dir, reference.index
            )),
            None => overall.detail("System reference: none of the system dirs is on PATH"),
        };
        results.push(overall.facet("precedence"));
        results
    }
}

/// Locate the system reference: the first PATH entry that is a system directory.
pub fn find_system_reference(path_entries: &[String], system_dirs: &[String]) -> Option<SystemReference> {
    path_entries
        .iter()
        .enumerate()
        .find(|(_, entry)| system_dirs.iter().any(|dir| dir == *entry))
        .map(|(index, dir)| SystemReference {
            dir: dir.clone(),
            index,
        })
}

/// Inspect the ordering of `spec`'s priority directories on `env`'s PATH.
pub fn check_path_order(env: &HostEnv, spec: &PathSpec) -> PathReport {
    let home = env.home_str();
    let entries = env.path_entries();
    let reference = find_system_reference(&entries, &spec.system);

    let results = spec
        .priority
        .iter()
        .map(|template| {
            let dir = expand_home(template, &home);
            let index = entries.iter().position(|entry| *entry == dir);
            let before_system = match (index, &reference) {
                (Some(i), Some(r)) => i < r.index,
                _ => false,
            };
            PathEntryResult {
                display: env.abbreviate(&dir),
                dir,
                index,
                before_system,
            }
        })
        .collect();

    PathReport {
        reference,
        entries: results,
    }
}
