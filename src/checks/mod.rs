//! Inspections of installed system state.
//!
//! Each submodule inspects one category and returns typed results that
//! convert into [`CheckResult`]s for the report. Checks never fail: probe
//! and parse problems degrade into `MISSING` or unknown values.

pub mod applications;
pub mod env_vars;
pub mod packages;
pub mod path_order;
pub mod status;
pub mod tools;
pub mod version;

pub use applications::{check_application, find_on_path, ApplicationResult, VersionRequirement};
pub use env_vars::{
    check_env_var, config_file_paths, find_definition, parse_definition, EnvVarResult,
    PersistedDefinition,
};
pub use packages::{parse_listing, PackageChecker, PackageKind, PackageResult};
pub use path_order::{
    check_path_order, find_system_reference, PathEntryResult, PathReport, SystemReference,
};
pub use status::{Category, CheckResult, CheckStatus, Severity};
pub use tools::{check_tool, parse_current_version, ToolResult};
pub use version::{extract_version, version_gte, version_parts};
