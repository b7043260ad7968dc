//! Lock fragment text format
//!
//! A fragment is the resolved-dependency block for one platform/Python
//! version/resolution mode combination:
//!
//! ```text
//! # uv 0.4.18
//! # submodules/matlab-engine 0f3c9f02c5b1d2e8a97c6d41e9f0b7aa15c2d4e6
//! attrs==23.2.0
//! numpy==1.26.4
//! ```
//!
//! Header and submodule pin lines always come first, in that order, before
//! any dependency line, and every fragment ends with a single trailing
//! newline.

use once_cell::sync::Lazy;
use regex::Regex;

/// Stored resolver version comment, e.g. `# uv 0.4.18`
static RESOLVER_VERSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^# uv\s(?P<version>.+)$").unwrap());

/// Stored submodule pin comment, e.g. `# submodules/engine <sha>`
static SUBMODULE_PIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^# submodules/(?P<name>\S+)\s(?P<rev>\S+)$").unwrap());

/// Resolved dependency line, `name==version`.
///
/// Name format per
/// <https://packaging.python.org/en/latest/specifications/name-normalization/#name-format>
static DEPENDENCY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?mi)^(?P<name>[A-Z0-9]|[A-Z0-9][A-Z0-9._-]*[A-Z0-9])==.+$").unwrap()
});

/// A submodule's recorded commit pin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmodulePin {
    /// Logical submodule name, without the `submodules/` prefix
    pub name: String,
    /// Pinned commit SHA
    pub rev: String,
}

/// One resolved `name==version` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    /// Package name as the resolver emitted it
    pub name: String,
    /// The full `name==version` line
    pub line: String,
}

/// Extract the resolver version stamped in a fragment's header, if any
pub fn resolver_version(fragment: &str) -> Option<&str> {
    RESOLVER_VERSION
        .captures(fragment)
        .map(|caps| caps.name("version").unwrap().as_str())
}

/// Extract every submodule pin line, in order of appearance
pub fn submodule_pins(fragment: &str) -> Vec<SubmodulePin> {
    SUBMODULE_PIN
        .captures_iter(fragment)
        .map(|caps| SubmodulePin {
            name: caps["name"].to_string(),
            rev: caps["rev"].to_string(),
        })
        .collect()
}

/// Extract every resolved dependency line, in order of appearance
pub fn dependencies(fragment: &str) -> Vec<Dependency> {
    DEPENDENCY
        .captures_iter(fragment)
        .map(|caps| Dependency {
            name: caps["name"].to_string(),
            line: caps[0].to_string(),
        })
        .collect()
}

/// Find the `name==version` line for a package, matching the name
/// case-insensitively and accepting any version.
pub fn find_dependency(fragment: &str, name: &str) -> Option<String> {
    let pattern = format!(r"(?mi)^{}==.+$", regex::escape(name));
    let re = Regex::new(&pattern).expect("escaped name is a valid pattern");
    re.find(fragment).map(|m| m.as_str().to_string())
}

/// Assemble a fragment from its parts.
///
/// `resolved` is the resolver's raw stdout; `nodeps` is the verbatim text of
/// the no-compile dependency list. Lines from both are whitespace-trimmed.
pub fn render(
    resolver_version: &str,
    pins: &[SubmodulePin],
    resolved: &str,
    nodeps: &str,
) -> String {
    let mut lines = vec![format!("# uv {resolver_version}")];
    for pin in pins {
        lines.push(format!("# submodules/{} {}", pin.name, pin.rev));
    }
    lines.extend(resolved.lines().map(|line| line.trim().to_string()));
    lines.extend(nodeps.lines().map(|line| line.trim().to_string()));
    let mut fragment = lines.join("\n");
    fragment.push('\n');
    fragment
}
