//! Environment variable checks.
//!
//! Each variable is inspected in two places: the live process environment
//! and the shell configuration files that persist it across sessions. The
//! two facets are reported separately; the variable's `require` setting
//! decides which of them must hold for the run to pass.

use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::{debug, warn};

use super::status::{CheckResult, CheckStatus, Severity};
use crate::config::{expand_home, EnvRequirement, EnvVarSpec};
use crate::shell::HostEnv;

/// A definition of the variable found in one shell configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedDefinition {
    /// File the definition was found in.
    pub file: PathBuf,
    /// Assigned value with surrounding quotes removed.
    pub value: String,
}

/// Live and persisted state of one environment variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvVarResult {
    /// Variable name.
    pub name: String,
    /// Expected value with the home directory expanded.
    pub expected: String,
    /// Which facets must hold.
    pub require: EnvRequirement,
    /// Value in the live environment, if set.
    pub live_value: Option<String>,
    /// One entry per config file defining the variable, in scan order.
    pub persisted: Vec<PersistedDefinition>,
}

impl EnvVarResult {
    /// Whether the live value equals the expected value exactly.
    pub fn live_matches(&self) -> bool {
        self.live_value.as_deref() == Some(self.expected.as_str())
    }

    /// Whether any config file defines the variable.
    pub fn is_persisted(&self) -> bool {
        !self.persisted.is_empty()
    }

    /// Whether any persisted definition expands to the expected value.
    pub fn persisted_matches(&self, home: &str) -> bool {
        self.persisted
            .iter()
            .any(|def| expand_home(&def.value, home) == self.expected)
    }

    /// Convert into a live result and a persisted result.
    pub fn to_check_results(&self, env: &HostEnv) -> Vec<CheckResult> {
        vec![self.live_result(), self.persisted_result(env)]
    }

    fn live_result(&self) -> CheckResult {
        let required = matches!(self.require, EnvRequirement::Live | EnvRequirement::Both);
        let result = match &self.live_value {
            Some(value) if self.live_matches() => CheckResult::new(
                &self.name,
                CheckStatus::Ok,
                format!("${} = {}", self.name, value),
            ),
            Some(value) => CheckResult::new(
                &self.name,
                CheckStatus::Warn,
                format!("${} = {} (expected: {})", self.name, value, self.expected),
            ),
            None => CheckResult::new(
                &self.name,
                if required {
                    CheckStatus::Missing
                } else {
                    CheckStatus::Warn
                },
                format!("${} is not set (expected: {})", self.name, self.expected),
            ),
        };
        let result = result
            .facet("live")
            .expected(&self.expected)
            .observed(self.live_value.as_deref());

        if required && !self.live_matches() {
            result.with_severity(Severity::Failure)
        } else {
            result
        }
    }

    fn persisted_result(&self, env: &HostEnv) -> CheckResult {
        let required = matches!(
            self.require,
            EnvRequirement::Persisted | EnvRequirement::Both
        );
        let home = env.home_str();

        let Some(last) = self.persisted.last() else {
            let result = CheckResult::new(
                &self.name,
                if required {
                    CheckStatus::Missing
                } else {
                    CheckStatus::Warn
                },
                format!("{} is not defined in any shell config file", self.name),
            )
            .facet("persisted")
            .expected(&self.expected);
            return result;
        };

        let files: Vec<String> = self
            .persisted
            .iter()
            .map(|def| env.abbreviate(&def.file.to_string_lossy()))
            .collect();
        let mut result = if self.persisted_matches(&home) {
            CheckResult::new(
                &self.name,
                CheckStatus::Ok,
                format!("{} is defined in {}", self.name, files.join(", ")),
            )
        } else {
            CheckResult::new(
                &self.name,
                CheckStatus::Warn,
                format!(
                    "{} is defined in {} but not as {}",
                    self.name,
                    files.join(", "),
                    self.expected
                ),
            )
        }
        .facet("persisted")
        .expected(&self.expected)
        .observed(Some(last.value.as_str()));

        for def in &self.persisted {
            result = result.detail(format!(
                "{}: {}",
                env.abbreviate(&def.file.to_string_lossy()),
                def.value
            ));
        }
        result
    }
}

/// Inspect one variable in `env` and in `config_files`, scanned in order.
pub fn check_env_var(
    name: &str,
    spec: &EnvVarSpec,
    env: &HostEnv,
    config_files: &[PathBuf],
) -> EnvVarResult {
    let home = env.home_str();
    let persisted = config_files
        .iter()
        .filter_map(|file| {
            find_definition(file, name).map(|value| PersistedDefinition {
                file: file.clone(),
                value,
            })
        })
        .collect();

    EnvVarResult {
        name: name.to_string(),
        expected: expand_home(&spec.expected, &home),
        require: spec.require,
        live_value: env.var(name).map(String::from),
        persisted,
    }
}

/// Expand the manifest's shell config file templates against `home`.
pub fn config_file_paths(templates: &[String], home: &str) -> Vec<PathBuf> {
    templates
        .iter()
        .map(|t| PathBuf::from(expand_home(t, home)))
        .collect()
}

/// Read `file` and return the variable's value as defined there.
///
/// Missing files yield `None` quietly; unreadable ones are logged and skipped.
pub fn find_definition(file: &Path, name: &str) -> Option<String> {
    if !file.exists() {
        return None;
    }
    match std::fs::read_to_string(file) {
        Ok(content) => parse_definition(&content, name),
        Err(e) => {
            warn!("Skipping {}: {}", file.display(), e);
            None
        }
    }
}

/// Find the value assigned to `name` in shell source text.
///
/// `export NAME=value` lines are tried first and the last one wins. Bare
/// `NAME=value` lines are only consulted when no export line matched.
pub fn parse_definition(content: &str, name: &str) -> Option<String> {
    let escaped = regex::escape(name);
    let patterns = [
        format!(r"(?m)^\s*export\s+{}=(.*)$", escaped),
        format!(r"(?m)^\s*{}=(.*)$", escaped),
    ];

    for pattern in &patterns {
        let re = match Regex::new(pattern) {
            Ok(re) => re,
            Err(e) => {
                debug!("Invalid pattern for {}: {}", name, e);
                return None;
            }
        };
        if let Some(caps) = re.captures_iter(content).last() {
            return caps.get(1).map(|m| unquote(m.as_str()));
        }
    }
    None
}

fn unquote(raw: &str) -> String {
    let value = raw.trim();
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return value[1..value.len() - 1].to_string();
        }
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn export_form_wins_over_later_bare_form() {
        let content = "export FOO=1\nFOO=2\n";
        assert_eq!(parse_definition(content, "FOO").as_deref(), Some("1"));
    }

    #[test]
    fn last_export_in_file_wins() {
        let content = "export FOO=1\nexport FOO=3\n";
        assert_eq!(parse_definition(content, "FOO").as_deref(), Some("3"));
    }

    #[test]
    fn bare_form_used_without_export() {
        let content = "# comment\n  FOO=\"$HOME/.foo\"\n";
        assert_eq!(parse_definition(content, "FOO").as_deref(), Some("$HOME/.foo"));
    }

    #[test]
    fn name_must_match_exactly() {
        assert_eq!(parse_definition("export FOOBAR=1\n", "FOO"), None);
        assert_eq!(parse_definition("export MY_FOO=1\n", "FOO"), None);
        assert_eq!(parse_definition("# export FOO=1\n", "FOO"), None);
    }

    #[test]
    fn single_quotes_are_stripped() {
        assert_eq!(
            parse_definition("export EDITOR='nvim'\n", "EDITOR").as_deref(),
            Some("nvim")
        );
    }

    fn sheldon_spec(require: EnvRequirement) -> EnvVarSpec {
        EnvVarSpec {
            expected: "$HOME/.sheldon".into(),
            require,
        }
    }

    #[test]
    fn live_value_matching_expanded_home() {
        let env = HostEnv::new("/home/u").with_var("SHELDON_DATA_DIR", "/home/u/.sheldon");
        let result = check_env_var(
            "SHELDON_DATA_DIR",
            &sheldon_spec(EnvRequirement::None),
            &env,
            &[],
        );
        assert_eq!(result.expected, "/home/u/.sheldon");
        assert!(result.live_matches());
        let checks = result.to_check_results(&env);
        assert_eq!(checks[0].status, CheckStatus::Ok);
        assert_eq!(checks[0].message, "$SHELDON_DATA_DIR = /home/u/.sheldon");
    }

    #[test]
    fn trailing_slash_is_not_a_match() {
        let env = HostEnv::new("/home/u").with_var("SHELDON_DATA_DIR", "/home/u/.sheldon/");
        let result = check_env_var(
            "SHELDON_DATA_DIR",
            &sheldon_spec(EnvRequirement::None),
            &env,
            &[],
        );
        assert!(!result.live_matches());
        let live = &result.to_check_results(&env)[0];
        assert_eq!(live.status, CheckStatus::Warn);
        assert!(!live.is_failure());
    }

    #[test]
    fn unset_variable_warns_by_default() {
        let env = HostEnv::new("/home/u");
        let result = check_env_var("SHELDON_DATA_DIR", &sheldon_spec(EnvRequirement::None), &env, &[]);
        let checks = result.to_check_results(&env);
        assert_eq!(
            checks[0].message,
            "$SHELDON_DATA_DIR is not set (expected: /home/u/.sheldon)"
        );
        assert!(checks.iter().all(|c| !c.is_failure()));
    }

    #[test]
    fn required_live_variable_fails_when_wrong() {
        let env = HostEnv::new("/home/u").with_var("SHELDON_DATA_DIR", "/tmp");
        let result = check_env_var("SHELDON_DATA_DIR", &sheldon_spec(EnvRequirement::Live), &env, &[]);
        let checks = result.to_check_results(&env);
        assert!(checks[0].is_failure());
        assert!(!checks[1].is_failure());
    }

    #[test]
    fn persisted_definitions_are_collected_per_file() {
        let home = TempDir::new().unwrap();
        let zshenv = home.path().join(".zshenv");
        let zshrc = home.path().join(".zshrc");
        fs::write(&zshenv, "export SHELDON_DATA_DIR=\"$HOME/.sheldon\"\n").unwrap();
        fs::write(&zshrc, "SHELDON_DATA_DIR=/elsewhere\n").unwrap();
        let missing = home.path().join(".bashrc");

        let env = HostEnv::new(home.path());
        let result = check_env_var(
            "SHELDON_DATA_DIR",
            &sheldon_spec(EnvRequirement::Persisted),
            &env,
            &[zshenv.clone(), missing, zshrc.clone()],
        );

        assert_eq!(result.persisted.len(), 2);
        assert_eq!(result.persisted[0].file, zshenv);
        assert_eq!(result.persisted[0].value, "$HOME/.sheldon");
        assert_eq!(result.persisted[1].value, "/elsewhere");
        assert!(result.persisted_matches(&env.home_str()));

        let checks = result.to_check_results(&env);
        assert_eq!(checks[1].status, CheckStatus::Ok);
        assert_eq!(
            checks[1].message,
            "SHELDON_DATA_DIR is defined in ~/.zshenv, ~/.zshrc"
        );
        assert_eq!(checks[1].observed.as_deref(), Some("/elsewhere"));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_file_is_skipped_and_scan_continues() {
        use std::os::unix::fs::PermissionsExt;

        let home = TempDir::new().unwrap();
        let zshenv = home.path().join(".zshenv");
        let locked = home.path().join(".bashrc");
        let zshrc = home.path().join(".zshrc");
        fs::write(&zshenv, "export EDITOR=vim\n").unwrap();
        fs::write(&locked, "export EDITOR=emacs\n").unwrap();
        fs::write(&zshrc, "export EDITOR=nvim\n").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        // Root ignores file modes.
        let unreadable = fs::read(&locked).is_err();

        let env = HostEnv::new(home.path());
        let spec = EnvVarSpec {
            expected: "nvim".into(),
            require: EnvRequirement::None,
        };
        let result = check_env_var("EDITOR", &spec, &env, &[zshenv.clone(), locked, zshrc.clone()]);

        let files: Vec<_> = result.persisted.iter().map(|d| d.file.clone()).collect();
        assert_eq!(files.first(), Some(&zshenv));
        assert_eq!(files.last(), Some(&zshrc));
        if unreadable {
            assert_eq!(files.len(), 2);
        }
        assert!(result.persisted_matches(&env.home_str()));
    }

    #[test]
    fn directory_in_place_of_config_file_is_skipped() {
        let home = TempDir::new().unwrap();
        let not_a_file = home.path().join(".zshenv");
        let zshrc = home.path().join(".zshrc");
        fs::create_dir(&not_a_file).unwrap();
        fs::write(&zshrc, "export EDITOR=nvim\n").unwrap();

        assert_eq!(find_definition(&not_a_file, "EDITOR"), None);

        let env = HostEnv::new(home.path());
        let spec = EnvVarSpec {
            expected: "nvim".into(),
            require: EnvRequirement::Persisted,
        };
        let result = check_env_var("EDITOR", &spec, &env, &[not_a_file, zshrc.clone()]);
        assert_eq!(result.persisted.len(), 1);
        assert_eq!(result.persisted[0].file, zshrc);
        assert_eq!(result.persisted[0].value, "nvim");
    }

    #[test]
    fn persisted_but_not_live_is_a_warning() {
        let home = TempDir::new().unwrap();
        let zshrc = home.path().join(".zshrc");
        fs::write(&zshrc, "export SHELDON_DATA_DIR=$HOME/.sheldon\n").unwrap();

        let env = HostEnv::new(home.path());
        let result = check_env_var(
            "SHELDON_DATA_DIR",
            &sheldon_spec(EnvRequirement::None),
            &env,
            &[zshrc],
        );
        let checks = result.to_check_results(&env);
        assert_eq!(checks[0].status, CheckStatus::Warn);
        assert_eq!(checks[1].status, CheckStatus::Ok);
        assert!(checks.iter().all(|c| !c.is_failure()));
    }

    #[test]
    fn required_persisted_variable_fails_when_absent() {
        let home = TempDir::new().unwrap();
        let env = HostEnv::new(home.path()).with_var("SHELDON_DATA_DIR", "x");
        let result = check_env_var(
            "SHELDON_DATA_DIR",
            &sheldon_spec(EnvRequirement::Both),
            &env,
            &[home.path().join(".zshrc")],
        );
        let checks = result.to_check_results(&env);
        assert_eq!(checks[1].status, CheckStatus::Missing);
        assert!(checks[1].is_failure());
        assert_eq!(
            checks[1].message,
            "SHELDON_DATA_DIR is not defined in any shell config file"
        );
    }

    #[test]
    fn config_paths_expand_home() {
        let paths = config_file_paths(&["~/.zshrc".into(), "$HOME/.profile".into()], "/home/u");
        assert_eq!(
            paths,
            vec![PathBuf::from("/home/u/.zshrc"), PathBuf::from("/home/u/.profile")]
        );
    }
}
