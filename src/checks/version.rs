//! Version extraction and comparison shared by every version-reporting check.

use regex::Regex;
use std::sync::LazyLock;

static TRIPLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\.\d+\.\d+)").expect("valid version regex"));

static COMPONENT_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.\-]").expect("valid separator regex"));

/// Extract the first dotted numeric triplet from command output.
///
/// - `sheldon 0.6.6` -> `0.6.6`
/// - `uv 0.9.21 (0dc9556ad 2025-12-30)` -> `0.9.21`
/// - `chezmoi version v2.52.1, commit ...` -> `2.52.1`
///
/// Returns `None` when the output has no `N.N.N` sequence.
pub fn extract_version(output: &str) -> Option<String> {
    TRIPLET
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Split a version into its numeric components.
///
/// Components are separated by `.` or `-`; any component that is not made
/// purely of digits is discarded, so `3.5a` yields `[3]` and `1.2.3-rc1`
/// yields `[1, 2, 3]`.
pub fn version_parts(version: &str) -> Vec<u64> {
    COMPONENT_SEPARATOR
        .split(version)
        .filter(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()))
        .filter_map(|part| part.parse().ok())
        .collect()
}

/// Whether `actual` is at least `minimum`.
///
/// Components are compared pairwise from the left. When one list is a
/// prefix of the other, the shorter list is the smaller one: `1.2` is below
/// `1.2.0`.
pub fn version_gte(actual: &str, minimum: &str) -> bool {
    version_parts(actual) >= version_parts(minimum)
}
