//! Manifest validation rules.
//!
//! This module validates a manifest for correctness:
//! - Package, tool, application and variable names must be non-empty
//! - Tools must declare a version
//! - Applications cannot declare both an exact and a minimum version
//! - Application names must be unique
//! - Variable names must be shell identifiers
//! - The probe timeout must be positive

use crate::config::schema::Manifest;
use crate::error::{DevcheckError, Result};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static VARIABLE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid variable name regex"));

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    fn new(rule: &str, message: String) -> Self {
        Self {
            rule: rule.to_string(),
            message,
        }
    }
}

/// Validate a manifest and return all errors.
///
/// Collects every problem rather than stopping at the first one.
pub fn validate_manifest(manifest: &Manifest) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    errors.extend(validate_packages(manifest));
    errors.extend(validate_tools(manifest));
    errors.extend(validate_applications(manifest));
    errors.extend(validate_env(manifest));

    if manifest.settings.timeout_secs == 0 {
        errors.push(ValidationError::new(
            "invalid-timeout",
            "settings.timeout_secs must be greater than zero".to_string(),
        ));
    }

    errors
}

fn validate_packages(manifest: &Manifest) -> Vec<ValidationError> {
    manifest
        .packages
        .iter()
        .enumerate()
        .filter(|(_, p)| p.trim().is_empty())
        .map(|(i, _)| ValidationError::new("empty-name", format!("packages[{}] is empty", i)))
        .collect()
}

fn validate_tools(manifest: &Manifest) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (tool, version) in &manifest.tools {
        if tool.trim().is_empty() {
            errors.push(ValidationError::new(
                "empty-name",
                "tools contains an empty tool name".to_string(),
            ));
        }
        if version.trim().is_empty() {
            errors.push(ValidationError::new(
                "missing-version",
                format!("Tool '{}' has no expected version", tool),
            ));
        }
    }

    errors
}

fn validate_applications(manifest: &Manifest) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (i, app) in manifest.applications.iter().enumerate() {
        if app.name.trim().is_empty() {
            errors.push(ValidationError::new(
                "empty-name",
                format!("applications[{}] has an empty name", i),
            ));
            continue;
        }

        if !seen.insert(app.name.as_str()) {
            errors.push(ValidationError::new(
                "duplicate-application",
                format!("Application '{}' is declared more than once", app.name),
            ));
        }

        if app.version.is_some() && app.min_version.is_some() {
            errors.push(ValidationError::new(
                "conflicting-version",
                format!(
                    "Application '{}' declares both 'version' and 'min_version'",
                    app.name
                ),
            ));
        }
    }

    errors
}

fn validate_env(manifest: &Manifest) -> Vec<ValidationError> {
    manifest
        .env
        .keys()
        .filter(|name| !VARIABLE_NAME.is_match(name))
        .map(|name| {
            ValidationError::new(
                "invalid-variable",
                format!("'{}' is not a valid environment variable name", name),
            )
        })
        .collect()
}

/// Validate and return Result (for convenience).
///
/// # Errors
///
/// Returns `ManifestValidation` if any validation rules fail.
pub fn validate(manifest: &Manifest) -> Result<()> {
    let errors = validate_manifest(manifest);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(DevcheckError::ManifestValidation {
            message: messages.join("; "),
        })
    }
}
