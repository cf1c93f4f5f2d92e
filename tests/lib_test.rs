//! Library integration tests.

use std::fs;

use devcheck::checks::{Category, CheckStatus};
use devcheck::config::{builtin_manifest, parse_manifest, validate};
use devcheck::report::render_final;
use devcheck::runner::{Checker, RunOptions};
use devcheck::shell::{HostEnv, ProbeOutput, ScriptedRunner};
use devcheck::ui::MockUI;
use devcheck::DevcheckError;
use tempfile::TempDir;

#[test]
fn error_types_are_public() {
    let err = DevcheckError::ManifestValidation {
        message: "Application 'uv' is listed twice".into(),
    };
    assert!(err.to_string().contains("uv"));
    assert!(err.is_config_error());
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> devcheck::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use devcheck::cli::{Cli, Commands};

    let cli = Cli::parse_from(["devcheck", "check", "--json"]);
    if let Some(Commands::Check(args)) = cli.command {
        assert!(args.json);
    } else {
        panic!("Expected Check command");
    }
}

#[test]
fn builtin_manifest_is_valid() {
    let manifest = builtin_manifest().unwrap();
    validate(&manifest).unwrap();
    assert!(manifest.applications.iter().any(|a| a.name == "sheldon"));
}

#[cfg(unix)]
#[test]
fn healthy_environment_passes_every_category() {
    let home = TempDir::new().unwrap();
    fs::write(
        home.path().join(".zshenv"),
        "export SHELDON_DATA_DIR=$HOME/.sheldon\n",
    )
    .unwrap();
    let home_str = home.path().to_string_lossy().into_owned();

    let yaml = r#"
packages: [git, font-hack-nerd-font]
tools:
  golang: "1.20.5"
env:
  SHELDON_DATA_DIR:
    expected: $HOME/.sheldon
    require: both
shell_config_files: [~/.zshenv]
path:
  priority: [$HOME/.local/bin]
"#;
    let manifest = parse_manifest(yaml, std::path::Path::new("test.yml")).unwrap();
    validate(&manifest).unwrap();

    let runner = ScriptedRunner::new()
        .respond("brew list --formula", ProbeOutput::success("git\n"))
        .respond(
            "brew list --cask",
            ProbeOutput::success("font-hack-nerd-font\n"),
        )
        .respond(
            "asdf current golang",
            ProbeOutput::success("golang 1.20.5 ~/.tool-versions"),
        );
    let env = HostEnv::new(home.path())
        .with_var("PATH", format!("{}/.local/bin:/usr/bin:/bin", home_str))
        .with_var("SHELDON_DATA_DIR", format!("{}/.sheldon", home_str));

    let report = Checker::new(&manifest, &runner, &env, RunOptions::default()).run();
    assert_eq!(report.exit_code(), 0);
    assert!(report
        .results()
        .all(|r| r.status == CheckStatus::Ok));

    let mut ui = MockUI::new();
    render_final(&mut ui, &report);
    assert_eq!(ui.outcomes(), [(true, "All checks passed!".to_string())]);
}

#[test]
fn nothing_installed_fails_with_every_entry_reported() {
    let manifest = builtin_manifest().unwrap();
    let runner = ScriptedRunner::new();
    let env = HostEnv::new("/nonexistent-home");

    let report = Checker::new(&manifest, &runner, &env, RunOptions::default()).run();
    assert_eq!(report.exit_code(), 1);

    let summary = report.summary();
    let packages = summary.packages.unwrap();
    assert_eq!(packages.installed, 0);
    assert_eq!(packages.total, manifest.unique_packages().len());
    let tools = summary.tools.unwrap();
    assert_eq!(tools.installed, 0);
    assert_eq!(tools.total, manifest.tools.len());
    assert!(summary.applications.iter().all(|a| !a.installed));
    assert_eq!(summary.path_precedence_ok(), Some(false));

    let env_group = report
        .groups
        .iter()
        .find(|g| g.category == Category::Env)
        .unwrap();
    assert!(env_group
        .results
        .iter()
        .all(|r| r.status == CheckStatus::Warn));
}
