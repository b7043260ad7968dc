//! Shell escaping for paths and rendered command lines
//!
//! Spawned commands receive their arguments as an argv vector, so quoting is
//! never needed for execution; it is needed when a command line is rendered
//! into a log line or an error message, where a path containing whitespace
//! would otherwise be ambiguous. Path arguments themselves are normalized to
//! `/` separators so the same invocation reads identically on every
//! operating system.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

/// Characters that never need quoting in a POSIX shell word.
static SAFE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\w@%+=:,./-]+$").unwrap());

/// Normalize a path's separators to `/`.
pub fn to_posix(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Escape an arbitrary shell word, single-quoting when necessary.
pub fn escape(word: &str) -> String {
    if word.is_empty() {
        return "''".to_string();
    }
    if SAFE.is_match(word) {
        return word.to_string();
    }
    format!("'{}'", word.replace('\'', r#"'"'"'"#))
}

/// Render an argv vector as a single loggable command line.
pub fn render_command<S: AsRef<str>>(program: &str, args: &[S]) -> String {
    let mut parts = vec![escape(program)];
    parts.extend(args.iter().map(|a| escape(a.as_ref())));
    parts.join(" ")
}
