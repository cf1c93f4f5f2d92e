//! Individually tracked application checks.
//!
//! An application is looked for at its expected installation path first,
//! then anywhere on PATH. When found it is asked for `--version` and the
//! first dotted triplet in the output is taken as its version. Location and
//! version are reported as separate facets.

use std::path::{Path, PathBuf};

use super::status::{CheckResult, CheckStatus};
use super::version::{extract_version, version_gte};
use crate::config::{expand_home, ApplicationSpec};
use crate::shell::{CommandRunner, HostEnv};

/// Version constraint declared for an application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionRequirement {
    /// Any version is fine.
    Any,
    /// Exactly this version.
    Exact(String),
    /// This version or newer.
    Minimum(String),
}

impl VersionRequirement {
    /// Derive the requirement from an application spec.
    pub fn from_spec(spec: &ApplicationSpec) -> Self {
        match (&spec.version, &spec.min_version) {
            (Some(exact), _) => Self::Exact(exact.clone()),
            (None, Some(min)) => Self::Minimum(min.clone()),
            (None, None) => Self::Any,
        }
    }

    /// Whether `version` satisfies the requirement. `None` if there is nothing to check.
    pub fn is_satisfied_by(&self, version: Option<&str>) -> Option<bool> {
        match self {
            Self::Any => None,
            Self::Exact(expected) => Some(version == Some(expected.as_str())),
            Self::Minimum(min) => Some(version.is_some_and(|v| version_gte(v, min))),
        }
    }
}

/// Where an application was found and what it reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationResult {
    /// Application name.
    pub name: String,
    /// Expanded expected installation path.
    pub expected_path: Option<PathBuf>,
    /// Expected path with the home prefix abbreviated, for display.
    pub expected_display: Option<String>,
    /// Where the executable was found.
    pub location: Option<PathBuf>,
    /// Whether it was found at the expected path (`None` when no path is expected).
    pub location_correct: Option<bool>,
    /// Version extracted from `--version` output.
    pub version: Option<String>,
    /// Declared version constraint.
    pub requirement: VersionRequirement,
    /// Whether the version satisfies the constraint (`None` when unconstrained).
    pub version_ok: Option<bool>,
    /// Installation instructions.
    pub install_hint: Option<String>,
}

impl ApplicationResult {
    /// Whether the executable was found at all.
    pub fn installed(&self) -> bool {
        self.location.is_some()
    }

    /// Convert into report results: presence, then location and version facets.
    ///
    /// A missing application yields only the presence result.
    pub fn to_check_results(&self) -> Vec<CheckResult> {
        let Some(location) = &self.location else {
            let mut missing = CheckResult::new(
                &self.name,
                CheckStatus::Missing,
                format!("{} is NOT installed", self.name),
            )
            .expected("installed");
            if let Some(hint) = &self.install_hint {
                missing = missing.detail("").detail("Install with:");
                for line in hint.lines() {
                    missing = missing.detail(line);
                }
            }
            return vec![missing];
        };

        let version_display = self.version.as_deref().unwrap_or("unknown");
        let mut results = vec![CheckResult::new(
            &self.name,
            CheckStatus::Ok,
            format!("{} is installed", self.name),
        )
        .expected("installed")
        .observed(Some(location.display().to_string()))
        .detail(format!("Location: {}", location.display()))
        .detail(format!("Version: {}", version_display))];

        if let (Some(correct), Some(expected)) = (self.location_correct, &self.expected_display) {
            let location_result = if correct {
                CheckResult::new(
                    &self.name,
                    CheckStatus::Ok,
                    format!("Location is correct ({})", expected),
                )
            } else {
                CheckResult::new(
                    &self.name,
                    CheckStatus::Warn,
                    format!("Location is not {}", expected),
                )
            };
            results.push(
                location_result
                    .facet("location")
                    .expected(expected)
                    .observed(Some(location.display().to_string())),
            );
        }

        if let Some(ok) = self.version_ok {
            let (expected, message) = match (&self.requirement, ok) {
                (VersionRequirement::Exact(v), true) => {
                    (v.clone(), format!("Version is correct ({})", v))
                }
                (VersionRequirement::Exact(v), false) => (
                    v.clone(),
                    format!("Version is not {} (found: {})", v, version_display),
                ),
                (VersionRequirement::Minimum(v), true) => {
                    (format!(">= {}", v), format!("Version is acceptable (>= {})", v))
                }
                (VersionRequirement::Minimum(v), false) => (
                    format!(">= {}", v),
                    format!("Version {} is below minimum {}", version_display, v),
                ),
                (VersionRequirement::Any, _) => (String::new(), String::new()),
            };
            let status = if ok {
                CheckStatus::Ok
            } else {
                CheckStatus::WrongVersion
            };
            results.push(
                CheckResult::new(&self.name, status, message)
                    .facet("version")
                    .expected(expected)
                    .observed(self.version.as_deref()),
            );
        }

        results
    }
}

/// Locate `spec`'s executable and query its version.
pub fn check_application(
    runner: &dyn CommandRunner,
    env: &HostEnv,
    spec: &ApplicationSpec,
) -> ApplicationResult {
    let home = env.home_str();
    let expected_path = spec
        .expected_path
        .as_deref()
        .map(|p| PathBuf::from(expand_home(p, &home)));
    let expected_display = expected_path
        .as_ref()
        .map(|p| env.abbreviate(&p.to_string_lossy()));

    let (location, location_correct) = match &expected_path {
        Some(path) if path.exists() => (Some(path.clone()), Some(true)),
        Some(_) => {
            let found = find_on_path(&spec.name, env);
            let correct = found.as_ref().map(|_| false);
            (found, correct)
        }
        None => (find_on_path(&spec.name, env), None),
    };

    let version = location
        .as_deref()
        .and_then(|path| query_version(runner, path));
    let requirement = VersionRequirement::from_spec(spec);
    let version_ok = if location.is_some() {
        requirement.is_satisfied_by(version.as_deref())
    } else {
        None
    };

    ApplicationResult {
        name: spec.name.clone(),
        expected_path,
        expected_display,
        location,
        location_correct,
        version,
        requirement,
        version_ok,
        install_hint: spec.install_hint.clone(),
    }
}

/// Search the environment's PATH for an executable named `name`.
pub fn find_on_path(name: &str, env: &HostEnv) -> Option<PathBuf> {
    which::which_in(name, env.path_var(), env.home()).ok()
}

fn query_version(runner: &dyn CommandRunner, path: &Path) -> Option<String> {
    let program = path.to_string_lossy();
    let output = runner.run(&[program.as_ref(), "--version"]);
    if !output.success {
        tracing::debug!("{} --version failed: {}", program, output.stderr.trim());
        return None;
    }
    extract_version(&output.stdout).or_else(|| extract_version(&output.stderr))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::{ProbeOutput, ScriptedRunner};
    use std::fs;
    use tempfile::TempDir;

    #[cfg(unix)]
    fn install(dir: &Path, name: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        fs::create_dir_all(dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn sheldon_spec() -> ApplicationSpec {
        ApplicationSpec {
            name: "sheldon".into(),
            expected_path: Some("$HOME/.local/bin/sheldon".into()),
            version: Some("0.6.6".into()),
            install_hint: Some("cargo install sheldon".into()),
            ..Default::default()
        }
    }

    #[cfg(unix)]
    #[test]
    fn found_at_expected_path() {
        let home = TempDir::new().unwrap();
        let path = install(&home.path().join(".local/bin"), "sheldon");
        let env = HostEnv::new(home.path()).with_var("PATH", "/nonexistent");
        let runner = ScriptedRunner::new().respond(
            &format!("{} --version", path.display()),
            ProbeOutput::success("sheldon 0.6.6\n"),
        );

        let result = check_application(&runner, &env, &sheldon_spec());
        assert!(result.installed());
        assert_eq!(result.location.as_deref(), Some(path.as_path()));
        assert_eq!(result.location_correct, Some(true));
        assert_eq!(result.version.as_deref(), Some("0.6.6"));
        assert_eq!(result.version_ok, Some(true));
        assert_eq!(
            result.expected_display.as_deref(),
            Some("~/.local/bin/sheldon")
        );

        let checks = result.to_check_results();
        assert_eq!(checks.len(), 3);
        assert!(checks.iter().all(|c| c.status == CheckStatus::Ok));
        assert_eq!(checks[1].message, "Location is correct (~/.local/bin/sheldon)");
        assert_eq!(checks[2].message, "Version is correct (0.6.6)");
    }

    #[cfg(unix)]
    #[test]
    fn found_elsewhere_on_path() {
        let home = TempDir::new().unwrap();
        let bin = home.path().join("other");
        let path = install(&bin, "sheldon");
        let env = HostEnv::new(home.path()).with_var("PATH", bin.to_string_lossy());
        let runner = ScriptedRunner::new().respond(
            &format!("{} --version", path.display()),
            ProbeOutput::success("sheldon 0.7.1\n"),
        );

        let result = check_application(&runner, &env, &sheldon_spec());
        assert_eq!(result.location_correct, Some(false));
        assert_eq!(result.version_ok, Some(false));

        let checks = result.to_check_results();
        assert_eq!(checks[1].status, CheckStatus::Warn);
        assert_eq!(checks[1].message, "Location is not ~/.local/bin/sheldon");
        assert_eq!(checks[2].status, CheckStatus::WrongVersion);
        assert_eq!(checks[2].message, "Version is not 0.6.6 (found: 0.7.1)");
        assert!(checks.iter().all(|c| !c.is_failure()));
    }

    #[test]
    fn missing_application_fails_with_hint() {
        let home = TempDir::new().unwrap();
        let env = HostEnv::new(home.path()).with_var("PATH", home.path().to_string_lossy());
        let runner = ScriptedRunner::new();

        let result = check_application(&runner, &env, &sheldon_spec());
        assert!(!result.installed());
        assert_eq!(result.location_correct, None);
        assert_eq!(result.version_ok, None);

        let checks = result.to_check_results();
        assert_eq!(checks.len(), 1);
        assert_eq!(checks[0].status, CheckStatus::Missing);
        assert!(checks[0].is_failure());
        assert_eq!(checks[0].message, "sheldon is NOT installed");
        assert!(checks[0].details.contains(&"cargo install sheldon".to_string()));
        assert!(runner.calls().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn minimum_version_check() {
        let home = TempDir::new().unwrap();
        let bin = home.path().join("bin");
        let path = install(&bin, "uv");
        let env = HostEnv::new(home.path()).with_var("PATH", bin.to_string_lossy());
        let spec = ApplicationSpec {
            name: "uv".into(),
            min_version: Some("0.9.21".into()),
            ..Default::default()
        };

        let newer = ScriptedRunner::new().respond(
            &format!("{} --version", path.display()),
            ProbeOutput::success("uv 0.10.2 (abc 2026-01-01)"),
        );
        let result = check_application(&newer, &env, &spec);
        assert_eq!(result.location_correct, None);
        assert_eq!(result.version_ok, Some(true));
        let checks = result.to_check_results();
        assert_eq!(checks.len(), 2);
        assert_eq!(checks[1].message, "Version is acceptable (>= 0.9.21)");

        let older = ScriptedRunner::new().respond(
            &format!("{} --version", path.display()),
            ProbeOutput::success("uv 0.9.2"),
        );
        let result = check_application(&older, &env, &spec);
        assert_eq!(result.version_ok, Some(false));
        assert_eq!(
            result.to_check_results()[1].message,
            "Version 0.9.2 is below minimum 0.9.21"
        );
    }

    #[cfg(unix)]
    #[test]
    fn presence_only_application() {
        let home = TempDir::new().unwrap();
        let bin = home.path().join("bin");
        let path = install(&bin, "chezmoi");
        let env = HostEnv::new(home.path()).with_var("PATH", bin.to_string_lossy());
        let spec = ApplicationSpec {
            name: "chezmoi".into(),
            ..Default::default()
        };
        let runner = ScriptedRunner::new().respond(
            &format!("{} --version", path.display()),
            ProbeOutput::success("chezmoi version v2.52.1, commit abc"),
        );

        let result = check_application(&runner, &env, &spec);
        assert_eq!(result.version.as_deref(), Some("2.52.1"));
        let checks = result.to_check_results();
        assert_eq!(checks.len(), 1);
        assert!(checks[0].details.contains(&"Version: 2.52.1".to_string()));
    }

    #[cfg(unix)]
    #[test]
    fn failing_version_probe_leaves_version_unknown() {
        let home = TempDir::new().unwrap();
        let bin = home.path().join("bin");
        install(&bin, "sheldon");
        let env = HostEnv::new(home.path()).with_var("PATH", bin.to_string_lossy());
        let runner = ScriptedRunner::new();

        let result = check_application(&runner, &env, &sheldon_spec());
        assert!(result.installed());
        assert_eq!(result.version, None);
        assert_eq!(result.version_ok, Some(false));
        let checks = result.to_check_results();
        assert_eq!(checks[2].message, "Version is not 0.6.6 (found: unknown)");
    }

    #[test]
    fn requirement_from_spec() {
        assert_eq!(
            VersionRequirement::from_spec(&sheldon_spec()),
            VersionRequirement::Exact("0.6.6".into())
        );
        assert_eq!(
            VersionRequirement::from_spec(&ApplicationSpec::default()),
            VersionRequirement::Any
        );
        assert_eq!(VersionRequirement::Any.is_satisfied_by(Some("1.0.0")), None);
        assert_eq!(
            VersionRequirement::Minimum("1.0.0".into()).is_satisfied_by(None),
            Some(false)
        );
    }
}
