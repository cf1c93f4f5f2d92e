//! Package-manager presence checks.
//!
//! A package is installed iff its exact name appears as a line in the
//! package manager's listing. Names matching a cask prefix are looked up in
//! the cask listing instead of the formula listing, but the formula listing
//! must still succeed. Listings are fetched at most once per run.

use std::cell::OnceCell;
use std::collections::HashSet;

use tracing::debug;

use super::status::{CheckResult, CheckStatus};
use crate::config::Manifest;
use crate::shell::CommandRunner;

/// Which listing a package is looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageKind {
    /// Regular formula.
    Formula,
    /// Cask (fonts and applications).
    Cask,
}

/// Presence of one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageResult {
    /// Package name.
    pub name: String,
    /// Listing the package was looked up in.
    pub kind: PackageKind,
    /// Whether the package was listed.
    pub installed: bool,
}

impl PackageResult {
    /// Convert into a report result.
    pub fn to_check_result(&self) -> CheckResult {
        if self.installed {
            CheckResult::new(&self.name, CheckStatus::Ok, &self.name).observed(Some("installed"))
        } else {
            CheckResult::new(
                &self.name,
                CheckStatus::Missing,
                format!("{} - NOT INSTALLED", self.name),
            )
        }
        .expected("installed")
    }
}

/// Checks packages against cached package-manager listings.
///
/// A failed listing (package manager absent, non-zero exit, timeout) is
/// cached as `None`, which makes every package of that kind not installed.
pub struct PackageChecker<'a> {
    runner: &'a dyn CommandRunner,
    package_manager: String,
    cask_prefixes: Vec<String>,
    formulae: OnceCell<Option<HashSet<String>>>,
    casks: OnceCell<Option<HashSet<String>>>,
}

impl<'a> PackageChecker<'a> {
    /// Create a checker using the manifest's package manager and cask prefixes.
    pub fn new(runner: &'a dyn CommandRunner, manifest: &Manifest) -> Self {
        Self {
            runner,
            package_manager: manifest.settings.package_manager.clone(),
            cask_prefixes: manifest.cask_prefixes.clone(),
            formulae: OnceCell::new(),
            casks: OnceCell::new(),
        }
    }

    /// Which listing `package` belongs to.
    pub fn kind_of(&self, package: &str) -> PackageKind {
        if self
            .cask_prefixes
            .iter()
            .any(|prefix| package.starts_with(prefix.as_str()))
        {
            PackageKind::Cask
        } else {
            PackageKind::Formula
        }
    }

    /// Whether `package` is installed.
    ///
    /// A failed formula listing means the package manager is unusable, so
    /// casks are reported missing too.
    pub fn is_installed(&self, package: &str) -> bool {
        let formulae = self
            .formulae
            .get_or_init(|| self.fetch_listing("--formula"));
        let listing = match (self.kind_of(package), formulae) {
            (_, None) => return false,
            (PackageKind::Formula, listing) => listing,
            (PackageKind::Cask, _) => self.casks.get_or_init(|| self.fetch_listing("--cask")),
        };

        listing
            .as_ref()
            .is_some_and(|names| names.contains(package))
    }

    /// Check one package.
    pub fn check(&self, package: &str) -> PackageResult {
        PackageResult {
            name: package.to_string(),
            kind: self.kind_of(package),
            installed: self.is_installed(package),
        }
    }

    /// Check every package, in order.
    pub fn check_all(&self, packages: &[String]) -> Vec<PackageResult> {
        packages.iter().map(|p| self.check(p)).collect()
    }

    fn fetch_listing(&self, flag: &str) -> Option<HashSet<String>> {
        let output = self
            .runner
            .run(&[self.package_manager.as_str(), "list", flag]);
        if !output.success {
            debug!(
                "{} list {} failed: {}",
                self.package_manager,
                flag,
                output.stderr.trim()
            );
            return None;
        }
        Some(parse_listing(&output.stdout))
    }
}

/// Parse listing output into the set of exact line names.
///
/// Lines are compared verbatim; only empty lines are dropped.
pub fn parse_listing(stdout: &str) -> HashSet<String> {
    stdout
        .lines()
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}
