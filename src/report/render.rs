//! Human-readable transcript of a run.

use crate::checks::{Category, CheckResult, CheckStatus, Severity};
use crate::ui::{StatusKind, UserInterface};

use super::{Report, ReportGroup};

/// Render one group: a header, one line per result, then the category summary.
pub fn render_group(ui: &mut dyn UserInterface, group: &ReportGroup) {
    ui.show_header(&group.title);
    for result in &group.results {
        render_result(ui, result);
    }

    if !ui.output_mode().shows_progress() {
        return;
    }
    match group.category {
        Category::Packages => {
            let total = group.results.len();
            let installed = group
                .results
                .iter()
                .filter(|r| r.status == CheckStatus::Ok)
                .count();
            ui.message(&format!(
                "\nSummary: {}/{} packages installed",
                installed, total
            ));
            if installed < total {
                ui.error(&format!("{} packages missing", total - installed));
            }
        }
        Category::Tools => {
            let total = group.results.len();
            let installed = group
                .results
                .iter()
                .filter(|r| r.status != CheckStatus::Missing)
                .count();
            let correct = group
                .results
                .iter()
                .filter(|r| r.status == CheckStatus::Ok)
                .count();
            ui.message(&format!("\nSummary: {}/{} tools installed", installed, total));
            ui.message(&format!("Correct versions: {}/{}", correct, total));
        }
        Category::Env | Category::Path | Category::Applications => {}
    }
}

/// Render one result and its detail lines.
pub fn render_result(ui: &mut dyn UserInterface, result: &CheckResult) {
    ui.status(StatusKind::from(result.severity), &result.message);
    for line in &result.details {
        ui.detail(line);
    }
}

/// Render the final report re-stating the counts and the verdict.
pub fn render_final(ui: &mut dyn UserInterface, report: &Report) {
    let summary = report.summary();
    ui.show_header("Final Report");

    if let Some(severity) = summary.path_precedence {
        let msg = if severity == Severity::Pass {
            "PATH Precedence: correct"
        } else {
            "PATH Precedence: issues found"
        };
        ui.status(StatusKind::from(severity), msg);
    }

    if let Some(packages) = summary.packages {
        let kind = if packages.installed == packages.total {
            StatusKind::Success
        } else {
            StatusKind::Failed
        };
        ui.status(
            kind,
            &format!("Packages: {}/{} installed", packages.installed, packages.total),
        );
    }

    if let Some(tools) = summary.tools {
        let kind = if tools.installed < tools.total {
            StatusKind::Failed
        } else if tools.correct < tools.total {
            StatusKind::Warning
        } else {
            StatusKind::Success
        };
        ui.status(
            kind,
            &format!(
                "Version-Managed Tools: {}/{} installed, {}/{} correct versions",
                tools.installed, tools.total, tools.correct, tools.total
            ),
        );
    }

    for app in &summary.applications {
        if app.installed {
            ui.success(&format!("{}: installed", app.name));
        } else {
            ui.error(&format!("{}: NOT installed", app.name));
        }
    }

    let failures = report.failures();
    if failures.is_empty() {
        ui.outcome(true, "All checks passed!");
    } else {
        ui.outcome(false, &format!("Issues Found: {}", failures.len()));
        for failure in failures {
            ui.message(&format!("  - {}", failure.message));
        }
    }
}
