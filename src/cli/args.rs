//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::checks::Category;

/// Devcheck - Verify a workstation against its dotfiles manifest.
#[derive(Debug, Parser)]
#[command(name = "devcheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to manifest file (overrides ~/.config/devcheck/manifest.yml)
    #[arg(short, long, global = true, env = "DEVCHECK_MANIFEST")]
    pub manifest: Option<PathBuf>,

    /// Only show warnings, failures and the final result
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the environment checks (default if no command specified)
    Check(CheckArgs),

    /// Print the resolved manifest as YAML
    Manifest(ManifestArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Print the report as JSON instead of the transcript
    #[arg(long)]
    pub json: bool,

    /// Count PATH ordering problems as failures
    #[arg(long)]
    pub strict_path: bool,

    /// Run only these categories (comma-separated: env, path, packages, applications, tools)
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<Category>,
}

/// Arguments for the `manifest` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ManifestArgs {
    /// Print only where the manifest was loaded from
    #[arg(long)]
    pub source: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
