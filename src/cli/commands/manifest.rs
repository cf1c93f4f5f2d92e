//! Manifest command implementation.
//!
//! The `devcheck manifest` command shows the manifest a check would use.

use std::path::{Path, PathBuf};

use crate::cli::args::ManifestArgs;
use crate::error::{DevcheckError, Result};
use crate::shell::HostEnv;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::resolve_manifest;

/// The manifest command implementation.
pub struct ManifestCommand {
    manifest_path: Option<PathBuf>,
    args: ManifestArgs,
}

impl ManifestCommand {
    /// Create a new manifest command.
    pub fn new(manifest_path: Option<&Path>, args: ManifestArgs) -> Self {
        Self {
            manifest_path: manifest_path.map(Path::to_path_buf),
            args,
        }
    }
}

impl Command for ManifestCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let env = HostEnv::capture()?;
        let (source, manifest) = resolve_manifest(self.manifest_path.as_deref(), &env)?;

        if self.args.source {
            ui.message(&source.to_string());
            return Ok(CommandResult::success());
        }

        let yaml = serde_yaml::to_string(&manifest).map_err(|e| DevcheckError::Other(e.into()))?;
        ui.message(&format!("# {}", source));
        ui.message(&yaml);
        Ok(CommandResult::success())
    }
}
