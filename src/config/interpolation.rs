//! Home-directory expansion for manifest templates.
//!
//! Manifest values such as expected paths and environment variable values
//! may reference the home directory.
//!
//! # Syntax
//!
//! - `$HOME` or `${HOME}` - replaced with the home directory
//! - `~` at the start of the value, alone or before `/` - replaced with the home directory
//! - `$$` - produces a literal `$`
//!
//! Any other `$NAME` reference is left untouched.
//!
//! # Example
//!
//! ```
//! use devcheck::config::expand_home;
//!
//! assert_eq!(expand_home("$HOME/.sheldon", "/home/u"), "/home/u/.sheldon");
//! assert_eq!(expand_home("~/.local/bin", "/home/u"), "/home/u/.local/bin");
//! ```

/// A segment of a template string.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Literal text
    Literal(String),
    /// Home directory reference
    Home,
}

/// Split a template into literal text and home references.
pub fn parse_template(input: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut rest = input;

    if rest == "~" || rest.starts_with("~/") {
        segments.push(Segment::Home);
        rest = &rest[1..];
    }

    while let Some(pos) = rest.find('$') {
        current.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        if let Some(tail) = after.strip_prefix('$') {
            current.push('$');
            rest = tail;
        } else if let Some(tail) = after.strip_prefix("{HOME}") {
            flush(&mut segments, &mut current);
            segments.push(Segment::Home);
            rest = tail;
        } else if let Some(tail) = after
            .strip_prefix("HOME")
            .filter(|t| !t.starts_with(|c: char| c.is_ascii_alphanumeric() || c == '_'))
        {
            flush(&mut segments, &mut current);
            segments.push(Segment::Home);
            rest = tail;
        } else {
            current.push('$');
            rest = after;
        }
    }

    current.push_str(rest);
    flush(&mut segments, &mut current);
    segments
}

fn flush(segments: &mut Vec<Segment>, current: &mut String) {
    if !current.is_empty() {
        segments.push(Segment::Literal(std::mem::take(current)));
    }
}

/// Expand home references in `template`.
pub fn expand_home(template: &str, home: &str) -> String {
    parse_template(template)
        .into_iter()
        .map(|segment| match segment {
            Segment::Literal(text) => text,
            Segment::Home => home.to_string(),
        })
        .collect()
}
