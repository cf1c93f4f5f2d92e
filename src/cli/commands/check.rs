//! Check command implementation.
//!
//! The `devcheck check` command runs every enabled check and prints either
//! the transcript or a JSON report.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::args::CheckArgs;
use crate::error::{DevcheckError, Result};
use crate::report::{render_final, render_group};
use crate::runner::{CheckProgress, Checker, RunOptions};
use crate::shell::{HostEnv, SystemRunner};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::resolve_manifest;

/// The check command implementation.
pub struct CheckCommand {
    manifest_path: Option<PathBuf>,
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(manifest_path: Option<&Path>, args: CheckArgs) -> Self {
        Self {
            manifest_path: manifest_path.map(Path::to_path_buf),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &CheckArgs {
        &self.args
    }

    fn run_options(&self) -> RunOptions {
        RunOptions {
            strict_path: self.args.strict_path,
            only: (!self.args.only.is_empty()).then(|| self.args.only.clone()),
        }
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let env = HostEnv::capture()?;
        let (source, manifest) = resolve_manifest(self.manifest_path.as_deref(), &env)?;
        let runner = SystemRunner::new(Duration::from_secs(manifest.settings.timeout_secs));
        let checker = Checker::new(&manifest, &runner, &env, self.run_options());

        let report = if self.args.json {
            let report = checker.run();
            let json = report.to_json().map_err(|e| DevcheckError::Other(e.into()))?;
            ui.message(&json);
            report
        } else {
            ui.show_header("Development Environment Check");
            ui.detail(&format!("Manifest: {}", source));
            let report = checker.run_with_progress(|event| {
                if let CheckProgress::GroupFinished { group } = event {
                    render_group(ui, group);
                }
            });
            render_final(ui, &report);
            report
        };

        match report.exit_code() {
            0 => Ok(CommandResult::success()),
            code => Ok(CommandResult::failure(code)),
        }
    }
}
