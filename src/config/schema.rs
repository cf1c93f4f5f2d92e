//! Manifest schema definitions.
//!
//! This module contains the struct definitions that map to the YAML
//! manifest describing what a healthy machine looks like.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Root manifest structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Manifest {
    /// Package-manager packages that must be installed.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub packages: Vec<String>,

    /// Name prefixes identifying packages found in the cask listing.
    pub cask_prefixes: Vec<String>,

    /// Version-managed tools and the exact version expected to be current.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub tools: BTreeMap<String, String>,

    /// Individually tracked applications.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub applications: Vec<ApplicationSpec>,

    /// Environment variables and their expected values.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, EnvVarSpec>,

    /// Shell configuration files scanned for persisted variables, in order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub shell_config_files: Vec<String>,

    /// PATH ordering expectations.
    pub path: PathSpec,

    /// Run settings.
    pub settings: Settings,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            packages: Vec::new(),
            cask_prefixes: vec!["font-".to_string()],
            tools: BTreeMap::new(),
            applications: Vec::new(),
            env: BTreeMap::new(),
            shell_config_files: Vec::new(),
            path: PathSpec::default(),
            settings: Settings::default(),
        }
    }
}

impl Manifest {
    /// Packages with duplicates removed, keeping first occurrences in order.
    pub fn unique_packages(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.packages
            .iter()
            .filter(|p| seen.insert(p.as_str()))
            .cloned()
            .collect()
    }
}

/// An application located on disk and asked for its `--version`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApplicationSpec {
    /// Executable name.
    pub name: String,

    /// Installation path tried before searching PATH (templates allowed).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_path: Option<String>,

    /// Exact version expected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Minimum acceptable version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_version: Option<String>,

    /// Instructions shown when the application is missing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install_hint: Option<String>,
}

/// Which sources must define an environment variable for it to pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvRequirement {
    /// Never fails; problems are warnings.
    #[default]
    None,
    /// Must be set to the expected value in the live environment.
    Live,
    /// Must be defined in at least one shell config file.
    Persisted,
    /// Must be live and persisted.
    Both,
}

/// Expected state of one environment variable.
///
/// Accepts either a bare template string or a mapping with `expected` and
/// `require` keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "EnvVarSpecRepr")]
pub struct EnvVarSpec {
    /// Expected value template (may reference `$HOME`).
    pub expected: String,

    /// Sources that must define the variable.
    #[serde(default)]
    pub require: EnvRequirement,
}

impl EnvVarSpec {
    /// Create a warning-only spec for the given template.
    pub fn new(expected: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
            require: EnvRequirement::None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EnvVarSpecRepr {
    Template(String),
    Full {
        expected: String,
        #[serde(default)]
        require: EnvRequirement,
    },
}

impl From<EnvVarSpecRepr> for EnvVarSpec {
    fn from(repr: EnvVarSpecRepr) -> Self {
        match repr {
            EnvVarSpecRepr::Template(expected) => Self::new(expected),
            EnvVarSpecRepr::Full { expected, require } => Self { expected, require },
        }
    }
}

/// PATH ordering expectations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathSpec {
    /// Directories that must appear before the system reference directory.
    pub priority: Vec<String>,

    /// Canonical system directories; the first one found on PATH is the reference.
    pub system: Vec<String>,
}

impl Default for PathSpec {
    fn default() -> Self {
        Self {
            priority: Vec::new(),
            system: vec!["/usr/bin".to_string(), "/bin".to_string()],
        }
    }
}

/// Run settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Per-probe timeout in seconds.
    pub timeout_secs: u64,

    /// Package manager executable.
    pub package_manager: String,

    /// Version manager executable.
    pub version_manager: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            package_manager: "brew".to_string(),
            version_manager: "asdf".to_string(),
        }
    }
}
