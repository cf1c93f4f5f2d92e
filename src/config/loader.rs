//! Manifest discovery and loading.
//!
//! Resolution order:
//! 1. An explicit path (`--manifest` or `DEVCHECK_MANIFEST`)
//! 2. The user manifest at `~/.config/devcheck/manifest.yml`
//! 3. The built-in manifest compiled into the binary

use crate::config::schema::Manifest;
use crate::config::validator::validate;
use crate::error::{DevcheckError, Result};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// The manifest compiled into the binary.
pub const BUILTIN_MANIFEST: &str = include_str!("default_manifest.yml");

/// Where a manifest was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestSource {
    /// Path given on the command line or through the environment.
    Explicit(PathBuf),
    /// The per-user manifest file.
    User(PathBuf),
    /// The built-in manifest.
    Builtin,
}

impl fmt::Display for ManifestSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(path) | Self::User(path) => write!(f, "{}", path.display()),
            Self::Builtin => write!(f, "built-in manifest"),
        }
    }
}

impl ManifestSource {
    /// Pick the manifest source for this run.
    pub fn discover(explicit: Option<&Path>, home: &Path) -> Self {
        if let Some(path) = explicit {
            return Self::Explicit(path.to_path_buf());
        }

        let user = user_manifest_path(home);
        if user.is_file() {
            Self::User(user)
        } else {
            Self::Builtin
        }
    }
}

/// Location of the per-user manifest.
pub fn user_manifest_path(home: &Path) -> PathBuf {
    home.join(".config").join("devcheck").join("manifest.yml")
}

/// Parse YAML content into a manifest.
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_manifest(content: &str, source_path: &Path) -> Result<Manifest> {
    serde_yaml::from_str(content).map_err(|e| DevcheckError::ManifestParse {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load a single manifest file.
///
/// # Errors
///
/// Returns `ManifestNotFound` if the file doesn't exist.
/// Returns `ManifestParse` if the YAML is invalid.
pub fn load_manifest_file(path: &Path) -> Result<Manifest> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DevcheckError::ManifestNotFound {
                path: path.to_path_buf(),
            }
        } else {
            DevcheckError::Io(e)
        }
    })?;

    parse_manifest(&content, path)
}

/// Parse the built-in manifest.
pub fn builtin_manifest() -> Result<Manifest> {
    parse_manifest(BUILTIN_MANIFEST, Path::new("<built-in>"))
}

/// Load and validate the manifest from `source`.
pub fn load_manifest(source: &ManifestSource) -> Result<Manifest> {
    let manifest = match source {
        ManifestSource::Explicit(path) | ManifestSource::User(path) => load_manifest_file(path)?,
        ManifestSource::Builtin => builtin_manifest()?,
    };

    validate(&manifest)?;
    tracing::debug!("Loaded manifest from {}", source);
    Ok(manifest)
}
