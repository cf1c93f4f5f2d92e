//! Devcheck - Verify a development workstation against a dotfiles manifest.
//!
//! Devcheck queries installed system state (package-manager packages,
//! version-managed tools, individually tracked applications, environment
//! variables and PATH ordering), compares it with a YAML manifest and
//! prints a pass/warn/fail transcript. The exit code is 1 when anything
//! required is missing.
//!
//! # Modules
//!
//! - [`checks`] - One inspection per category plus shared version helpers
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Manifest loading, parsing, and validation
//! - [`error`] - Error types and result aliases
//! - [`report`] - Report aggregation, rendering, and JSON export
//! - [`runner`] - Fixed-order check orchestration
//! - [`shell`] - Subprocess probes and host environment snapshot
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use devcheck::config::Manifest;
//! use devcheck::runner::{Checker, RunOptions};
//! use devcheck::shell::{HostEnv, ProbeOutput, ScriptedRunner};
//!
//! let manifest: Manifest = serde_yaml::from_str("packages: [git, bat]").unwrap();
//! let runner = ScriptedRunner::new()
//!     .respond("brew list --formula", ProbeOutput::success("git\n"));
//! let env = HostEnv::new("/home/u");
//! let options = RunOptions {
//!     only: Some(vec![devcheck::checks::Category::Packages]),
//!     ..Default::default()
//! };
//!
//! let report = Checker::new(&manifest, &runner, &env, options).run();
//! assert_eq!(report.exit_code(), 1);
//! ```

pub mod checks;
pub mod cli;
pub mod config;
pub mod error;
pub mod report;
pub mod runner;
pub mod shell;
pub mod ui;

pub use error::{DevcheckError, Result};
