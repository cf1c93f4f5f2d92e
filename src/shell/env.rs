//! Snapshot of the host environment a run inspects.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{DevcheckError, Result};

/// Environment variables and home directory as seen by one run.
///
/// Checks read from this snapshot instead of `std::env` so they can be
/// exercised against a fabricated environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEnv {
    home: PathBuf,
    vars: HashMap<String, String>,
}

impl HostEnv {
    /// Capture the current process environment.
    ///
    /// Variables whose names or values are not valid UTF-8 are skipped.
    pub fn capture() -> Result<Self> {
        let home = dirs::home_dir().ok_or(DevcheckError::HomeNotFound)?;
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Ok(Self { home, vars })
    }

    /// Create an empty environment rooted at `home`.
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            vars: HashMap::new(),
        }
    }

    /// Builder-style variable assignment.
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// The home directory.
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// The home directory as a string, for template expansion.
    pub fn home_str(&self) -> String {
        self.home.to_string_lossy().into_owned()
    }

    /// Look up a variable.
    pub fn var(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// The raw `PATH` value, if set.
    pub fn path_var(&self) -> Option<&str> {
        self.var("PATH")
    }

    /// `PATH` split into its entries, in search order.
    pub fn path_entries(&self) -> Vec<String> {
        self.path_var()
            .map(|p| {
                std::env::split_paths(p)
                    .map(|e| e.to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Replace the home prefix of `path` with `~` for display.
    pub fn abbreviate(&self, path: &str) -> String {
        let home = self.home_str();
        if home.is_empty() || home == "/" {
            return path.to_string();
        }
        match path.strip_prefix(&home) {
            Some(rest) if rest.is_empty() || rest.starts_with('/') => format!("~{}", rest),
            _ => path.to_string(),
        }
    }
}
