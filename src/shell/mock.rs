//! Scripted command runner for testing.
//!
//! `ScriptedRunner` implements [`CommandRunner`] by looking up canned
//! responses keyed on the space-joined argument vector. Unscripted commands
//! behave like a missing executable.
//!
//! # Example
//!
//! ```
//! use devcheck::shell::{CommandRunner, ProbeOutput, ScriptedRunner};
//!
//! let runner = ScriptedRunner::new()
//!     .respond("brew list --formula", ProbeOutput::success("git\njq\n"));
//!
//! assert!(runner.run(&["brew", "list", "--formula"]).success);
//! assert!(!runner.run(&["asdf", "current", "golang"]).success);
//! assert_eq!(runner.calls().len(), 2);
//! ```

use std::cell::RefCell;
use std::collections::HashMap;

use super::command::{CommandRunner, ProbeOutput};

/// Command runner returning pre-configured outputs.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    responses: HashMap<String, ProbeOutput>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedRunner {
    /// Create a runner with no scripted commands.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the output for a command line such as `"asdf current golang"`.
    pub fn respond(mut self, command: &str, output: ProbeOutput) -> Self {
        self.responses.insert(command.to_string(), output);
        self
    }

    /// Every command line run so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// How many times a command line was run.
    pub fn call_count(&self, command: &str) -> usize {
        self.calls.borrow().iter().filter(|c| *c == command).count()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, argv: &[&str]) -> ProbeOutput {
        let key = argv.join(" ");
        self.calls.borrow_mut().push(key.clone());
        self.responses.get(&key).cloned().unwrap_or_else(|| {
            ProbeOutput::failure(None, format!("No such file or directory: {}", key))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_response_is_returned() {
        let runner = ScriptedRunner::new().respond("uv --version", ProbeOutput::success("uv 0.9.21"));
        let out = runner.run(&["uv", "--version"]);
        assert!(out.success);
        assert_eq!(out.stdout, "uv 0.9.21");
    }

    #[test]
    fn unscripted_command_fails() {
        let runner = ScriptedRunner::new();
        let out = runner.run(&["brew", "list"]);
        assert!(!out.success);
        assert_eq!(out.exit_code, None);
    }

    #[test]
    fn calls_are_recorded() {
        let runner = ScriptedRunner::new();
        runner.run(&["a", "b"]);
        runner.run(&["a", "b"]);
        assert_eq!(runner.call_count("a b"), 2);
        assert_eq!(runner.calls(), vec!["a b", "a b"]);
    }
}
