//! Subprocess probes and host environment access.
//!
//! Every check reaches the outside world through this module: external
//! commands run via a [`CommandRunner`], and environment variables, `PATH`
//! and the home directory are read from a [`HostEnv`] snapshot.

pub mod command;
pub mod env;
pub mod mock;
pub mod platform;

pub use command::{CommandRunner, ProbeOutput, SystemRunner, DEFAULT_TIMEOUT, TIMEOUT_MESSAGE};
pub use env::HostEnv;
pub use mock::ScriptedRunner;
pub use platform::is_ci;
