//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Running `devcheck` without a
//! subcommand is the same as `devcheck check`.

pub mod check;
pub mod completions;
pub mod dispatcher;
pub mod manifest;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};

use std::path::Path;

use crate::config::{load_manifest, Manifest, ManifestSource};
use crate::error::Result;
use crate::shell::HostEnv;

/// Discover, load and validate the manifest for this run.
pub(crate) fn resolve_manifest(
    explicit: Option<&Path>,
    env: &HostEnv,
) -> Result<(ManifestSource, Manifest)> {
    let source = ManifestSource::discover(explicit, env.home());
    let manifest = load_manifest(&source)?;
    Ok((source, manifest))
}
