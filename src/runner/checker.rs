//! Check orchestration.

use tracing::debug;

use crate::checks::{
    check_application, check_env_var, check_path_order, check_tool, config_file_paths, Category,
    PackageChecker,
};
use crate::config::Manifest;
use crate::report::{Report, ReportGroup};
use crate::shell::{CommandRunner, HostEnv};

/// Progress events emitted while checks run.
#[derive(Debug)]
pub enum CheckProgress<'a> {
    /// A category is about to be inspected.
    CategoryStarting { category: Category },
    /// A group of results is complete.
    GroupFinished { group: &'a ReportGroup },
}

/// Options for one run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Treat PATH ordering problems as failures.
    pub strict_path: bool,
    /// Only run these categories (all when `None`).
    pub only: Option<Vec<Category>>,
}

impl RunOptions {
    /// Whether `category` is part of this run.
    pub fn includes(&self, category: Category) -> bool {
        self.only
            .as_ref()
            .map_or(true, |only| only.contains(&category))
    }
}

/// Runs every enabled category against one manifest, in a fixed order.
pub struct Checker<'a> {
    manifest: &'a Manifest,
    runner: &'a dyn CommandRunner,
    env: &'a HostEnv,
    options: RunOptions,
}

impl<'a> Checker<'a> {
    /// Create a checker.
    pub fn new(
        manifest: &'a Manifest,
        runner: &'a dyn CommandRunner,
        env: &'a HostEnv,
        options: RunOptions,
    ) -> Self {
        Self {
            manifest,
            runner,
            env,
            options,
        }
    }

    /// Run all enabled categories.
    pub fn run(&self) -> Report {
        self.run_with_progress(|_| {})
    }

    /// Run all enabled categories, reporting each finished group.
    pub fn run_with_progress<F>(&self, mut on_progress: F) -> Report
    where
        F: FnMut(CheckProgress<'_>),
    {
        let mut report = Report::new();
        for category in Category::ALL {
            if !self.options.includes(category) {
                debug!("Skipping {} checks", category);
                continue;
            }
            on_progress(CheckProgress::CategoryStarting { category });
            for group in self.check_category(category) {
                on_progress(CheckProgress::GroupFinished { group: &group });
                report.push(group);
            }
        }
        debug!(
            "Checked {} groups, {} failures",
            report.groups.len(),
            report.failures().len()
        );
        report
    }

    /// Inspect one category.
    pub fn check_category(&self, category: Category) -> Vec<ReportGroup> {
        debug!("Checking {}", category);
        match category {
            Category::Env => vec![self.check_env()],
            Category::Path => vec![self.check_path()],
            Category::Packages => vec![self.check_packages()],
            Category::Applications => self.check_applications(),
            Category::Tools => vec![self.check_tools()],
        }
    }

    fn check_env(&self) -> ReportGroup {
        let config_files =
            config_file_paths(&self.manifest.shell_config_files, &self.env.home_str());
        let results = self
            .manifest
            .env
            .iter()
            .flat_map(|(name, spec)| {
                check_env_var(name, spec, self.env, &config_files).to_check_results(self.env)
            })
            .collect();
        ReportGroup::new(Category::Env, "Checking Environment Variables", results)
    }

    fn check_path(&self) -> ReportGroup {
        let report = check_path_order(self.env, &self.manifest.path);
        ReportGroup::new(
            Category::Path,
            "Checking PATH Precedence",
            report.to_check_results(self.options.strict_path),
        )
    }

    fn check_packages(&self) -> ReportGroup {
        let checker = PackageChecker::new(self.runner, self.manifest);
        let results = checker
            .check_all(&self.manifest.unique_packages())
            .iter()
            .map(|p| p.to_check_result())
            .collect();
        ReportGroup::new(Category::Packages, "Checking Packages", results)
    }

    fn check_applications(&self) -> Vec<ReportGroup> {
        self.manifest
            .applications
            .iter()
            .map(|spec| {
                let result = check_application(self.runner, self.env, spec);
                ReportGroup::new(
                    Category::Applications,
                    format!("Checking {}", spec.name),
                    result.to_check_results(),
                )
            })
            .collect()
    }

    fn check_tools(&self) -> ReportGroup {
        let version_manager = &self.manifest.settings.version_manager;
        let results = self
            .manifest
            .tools
            .iter()
            .map(|(tool, expected)| {
                check_tool(self.runner, version_manager, tool, expected).to_check_result()
            })
            .collect();
        ReportGroup::new(Category::Tools, "Checking Version-Managed Tools", results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::CheckStatus;
    use crate::config::{ApplicationSpec, EnvVarSpec, PathSpec};
    use crate::shell::{ProbeOutput, ScriptedRunner};
    use std::collections::BTreeMap;

    fn manifest() -> Manifest {
        let mut env = BTreeMap::new();
        env.insert("SHELDON_DATA_DIR".to_string(), EnvVarSpec::new("$HOME/.sheldon"));
        let mut tools = BTreeMap::new();
        tools.insert("golang".to_string(), "1.20.5".to_string());
        tools.insert("tmux".to_string(), "3.5a".to_string());

        Manifest {
            packages: vec!["git".into(), "bat".into(), "git".into()],
            tools,
            applications: vec![ApplicationSpec {
                name: "devcheck-test-absent-app".into(),
                ..Default::default()
            }],
            env,
            path: PathSpec {
                priority: vec!["$HOME/.local/bin".into()],
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn runner() -> ScriptedRunner {
        ScriptedRunner::new()
            .respond("brew list --formula", ProbeOutput::success("git\n"))
            .respond(
                "asdf current golang",
                ProbeOutput::success("golang 1.20.5 /home/u/.tool-versions"),
            )
            .respond(
                "asdf current tmux",
                ProbeOutput::success("tmux 3.4 /home/u/.tool-versions"),
            )
    }

    #[cfg(unix)]
    #[test]
    fn runs_categories_in_order() {
        let manifest = manifest();
        let runner = runner();
        let env = HostEnv::new("/home/u")
            .with_var("PATH", "/home/u/.local/bin:/usr/bin:/bin")
            .with_var("SHELDON_DATA_DIR", "/home/u/.sheldon");
        let checker = Checker::new(&manifest, &runner, &env, RunOptions::default());

        let report = checker.run();
        let categories: Vec<Category> = report.groups.iter().map(|g| g.category).collect();
        assert_eq!(
            categories,
            vec![
                Category::Env,
                Category::Path,
                Category::Packages,
                Category::Applications,
                Category::Tools
            ]
        );

        let packages = &report.groups[2];
        assert_eq!(packages.results.len(), 2);
        assert_eq!(packages.results[1].status, CheckStatus::Missing);

        let summary = report.summary();
        assert_eq!(summary.path_precedence_ok(), Some(true));
        assert_eq!(summary.tools.map(|t| t.correct), Some(1));
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn only_limits_categories() {
        let manifest = manifest();
        let runner = runner();
        let env = HostEnv::new("/home/u");
        let options = RunOptions {
            only: Some(vec![Category::Tools]),
            ..Default::default()
        };
        let report = Checker::new(&manifest, &runner, &env, options).run();
        assert_eq!(report.groups.len(), 1);
        assert_eq!(report.groups[0].category, Category::Tools);
        assert!(runner.calls().iter().all(|c| c.starts_with("asdf")));
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn progress_reports_each_group() {
        let manifest = manifest();
        let runner = runner();
        let env = HostEnv::new("/home/u");
        let checker = Checker::new(&manifest, &runner, &env, RunOptions::default());

        let mut started = Vec::new();
        let mut finished = Vec::new();
        checker.run_with_progress(|event| match event {
            CheckProgress::CategoryStarting { category } => started.push(category),
            CheckProgress::GroupFinished { group } => finished.push(group.title.clone()),
        });
        assert_eq!(started, Category::ALL.to_vec());
        assert_eq!(
            finished,
            vec![
                "Checking Environment Variables",
                "Checking PATH Precedence",
                "Checking Packages",
                "Checking devcheck-test-absent-app",
                "Checking Version-Managed Tools",
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn strict_path_turns_ordering_into_failure() {
        let manifest = Manifest {
            path: PathSpec {
                priority: vec!["$HOME/.local/bin".into()],
                ..Default::default()
            },
            ..Default::default()
        };
        let runner = ScriptedRunner::new();
        let env = HostEnv::new("/home/u").with_var("PATH", "/usr/bin:/home/u/.local/bin");
        let only = Some(vec![Category::Path]);

        let lenient = Checker::new(
            &manifest,
            &runner,
            &env,
            RunOptions {
                strict_path: false,
                only: only.clone(),
            },
        )
        .run();
        assert_eq!(lenient.exit_code(), 0);

        let strict = Checker::new(
            &manifest,
            &runner,
            &env,
            RunOptions {
                strict_path: true,
                only,
            },
        )
        .run();
        assert_eq!(strict.exit_code(), 1);
    }

    #[test]
    fn includes_defaults_to_everything() {
        let options = RunOptions::default();
        assert!(Category::ALL.iter().all(|c| options.includes(*c)));
    }
}
