//! Manifest loading, parsing, and validation.
//!
//! This module handles all aspects of configuration:
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Validation in [`validator`]
//! - Home-directory expansion in [`interpolation`]
//!
//! # Example
//!
//! ```
//! use devcheck::config::{parse_manifest, validate};
//! use std::path::Path;
//!
//! let manifest = parse_manifest("packages: [git, jq]", Path::new("inline.yml")).unwrap();
//! validate(&manifest).unwrap();
//! assert_eq!(manifest.packages, vec!["git", "jq"]);
//! ```

pub mod interpolation;
pub mod loader;
pub mod schema;
pub mod validator;

// Schema re-exports
pub use schema::{ApplicationSpec, EnvRequirement, EnvVarSpec, Manifest, PathSpec, Settings};

// Loader re-exports
pub use loader::{
    builtin_manifest, load_manifest, load_manifest_file, parse_manifest, user_manifest_path,
    ManifestSource, BUILTIN_MANIFEST,
};

// Validator re-exports
pub use validator::{validate, validate_manifest, ValidationError};

// Interpolation re-exports
pub use interpolation::{expand_home, parse_template, Segment};
