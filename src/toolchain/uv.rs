//! uv-backed toolchain
//!
//! Runs `uv pip compile` for resolution and `git rev-parse` for submodule
//! pins. Each invocation is a blocking subprocess call; a non-zero exit is
//! a hard failure carrying the captured stderr.

use crate::config::Layout;
use crate::error::{RelockError, RelockResult};
use crate::escape::{render_command, to_posix};
use crate::lock::fragment::{self, SubmodulePin};
use crate::platform::Platform;
use crate::toolchain::Toolchain;
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use std::process::Stdio;
use tokio::fs;
use tokio::process::Command;
use tracing::{debug, warn};

/// Editable/local dependency declaration in the primary input file
static EDITABLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^(?:-e|--editable)\s(?P<path>.+)$").unwrap());

/// Submodule reference anywhere in the primary input file
static SUBMODULE: Lazy<Regex> = Lazy::new(|| Regex::new(r"submodules/(?P<name>\S+)").unwrap());

/// Toolchain backed by the real uv and git binaries
pub struct UvToolchain {
    layout: Layout,
}

impl UvToolchain {
    /// Create a toolchain over a project layout
    pub fn new(layout: Layout) -> Self {
        Self { layout }
    }

    /// Run a program from the project root and capture its output
    async fn exec(&self, program: &str, args: &[String]) -> RelockResult<std::process::Output> {
        debug!("Executing: {}", render_command(program, args));

        Command::new(program)
            .args(args)
            .current_dir(self.layout.root())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| RelockError::command_failed(render_command(program, args), e))
    }

    /// Build the `uv pip compile` argument vector for one resolution.
    ///
    /// Paths are root-relative and posix-normalized; the command runs with
    /// the project root as its working directory.
    fn compile_args(
        &self,
        platform: Platform,
        python_version: &str,
        high: bool,
        no_deps: bool,
        exclude_newer: &str,
        editables: &[String],
    ) -> Vec<String> {
        let mut args = vec![
            "pip".to_string(),
            "compile".to_string(),
            "--exclude-newer".to_string(),
            exclude_newer.to_string(),
            "--python-platform".to_string(),
            platform.to_string(),
            "--python-version".to_string(),
            python_version.to_string(),
            "--resolution".to_string(),
            if high { "highest" } else { "lowest-direct" }.to_string(),
            "--override".to_string(),
            to_posix(&self.layout.override_requirements_relative()),
            "--all-extras".to_string(),
        ];
        if no_deps {
            args.push("--no-deps".to_string());
        }
        args.push(to_posix(&self.layout.dev_requirements_relative()));
        for editable in editables {
            // Editable paths in dev.in are already root-relative
            args.push(to_posix(&Path::new(editable).join("pyproject.toml")));
        }
        args
    }

    /// Resolve the pinned commit for every submodule referenced in the
    /// primary input file, in order of first appearance.
    async fn submodule_pins(&self, dev_contents: &str) -> RelockResult<Vec<SubmodulePin>> {
        let mut pins: Vec<SubmodulePin> = Vec::new();
        for name in scan_submodules(dev_contents) {
            if pins.iter().any(|pin| pin.name == name) {
                continue;
            }
            let path = format!("submodules/{name}");
            let args = vec!["rev-parse".to_string(), format!("HEAD:{path}")];
            let output = self.exec(self.layout.git_bin(), &args).await?;
            if !output.status.success() {
                return Err(RelockError::SubmoduleLookup {
                    path,
                    stderr: String::from_utf8_lossy(&output.stderr).to_string(),
                });
            }
            let rev = String::from_utf8_lossy(&output.stdout).trim().to_string();
            pins.push(SubmodulePin { name, rev });
        }
        Ok(pins)
    }
}

#[async_trait]
impl Toolchain for UvToolchain {
    async fn resolver_version(&self) -> RelockResult<String> {
        let args = vec!["--version".to_string()];
        let output = self.exec(self.layout.uv_bin(), &args).await?;

        if !output.status.success() {
            return Err(RelockError::ResolverFailed {
                command: render_command(self.layout.uv_bin(), &args),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        // Output format is `uv <version> ...`; the second token is the version
        stdout
            .split_whitespace()
            .nth(1)
            .map(str::to_string)
            .ok_or_else(|| RelockError::ResolverVersionParse {
                output: stdout.trim().to_string(),
            })
    }

    async fn compile(
        &self,
        platform: Platform,
        python_version: &str,
        high: bool,
        no_deps: bool,
    ) -> RelockResult<String> {
        let dev_path = self.layout.dev_requirements();
        let dev_contents = fs::read_to_string(&dev_path)
            .await
            .map_err(|e| RelockError::io(format!("reading {}", dev_path.display()), e))?;

        // Pin the package index snapshot to the current instant so the
        // resolution is reproducible.
        let exclude_newer = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
        let editables = scan_editables(&dev_contents);
        let args = self.compile_args(
            platform,
            python_version,
            high,
            no_deps,
            &exclude_newer,
            &editables,
        );

        let output = self.exec(self.layout.uv_bin(), &args).await?;
        if !output.status.success() {
            return Err(RelockError::ResolverFailed {
                command: render_command(self.layout.uv_bin(), &args),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }
        let resolved = String::from_utf8_lossy(&output.stdout).to_string();

        let pins = self.submodule_pins(&dev_contents).await?;

        let nodeps_path = self.layout.nodeps_requirements();
        let nodeps = if nodeps_path.exists() {
            fs::read_to_string(&nodeps_path)
                .await
                .map_err(|e| RelockError::io(format!("reading {}", nodeps_path.display()), e))?
        } else {
            warn!(
                "No no-compile dependency list at {}; appending nothing",
                nodeps_path.display()
            );
            String::new()
        };

        let version = self.resolver_version().await?;
        Ok(fragment::render(&version, &pins, &resolved, &nodeps))
    }
}

/// Paths of editable/local dependencies declared in the primary input file
fn scan_editables(dev_contents: &str) -> Vec<String> {
    EDITABLE
        .captures_iter(dev_contents)
        .map(|caps| caps["path"].trim().to_string())
        .collect()
}

/// Submodule names referenced in the primary input file, duplicates included
fn scan_submodules(dev_contents: &str) -> Vec<String> {
    SUBMODULE
        .captures_iter(dev_contents)
        .map(|caps| caps["name"].to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::path::PathBuf;

    fn layout() -> Layout {
        Layout::with_config(PathBuf::from("/project"), Config::default())
    }

    #[test]
    fn scan_editables_both_spellings() {
        let dev = "-e submodules/engine\n--editable tools/local\nattrs\n";
        assert_eq!(scan_editables(dev), vec!["submodules/engine", "tools/local"]);
    }

    #[test]
    fn scan_editables_none() {
        assert!(scan_editables("attrs\nnumpy>=1.26\n").is_empty());
    }

    #[test]
    fn scan_submodules_independent_of_editables() {
        // A submodule reference need not be an editable declaration
        let dev = "-e submodules/engine\nsubmodules/toolbox\n";
        assert_eq!(scan_submodules(dev), vec!["engine", "toolbox"]);
    }

    #[test]
    fn compile_args_shape() {
        let toolchain = UvToolchain::new(layout());
        let args = toolchain.compile_args(
            Platform::Linux,
            "3.11",
            false,
            false,
            "2024-06-01T00:00:00.000000Z",
            &[],
        );

        assert_eq!(args[0], "pip");
        assert_eq!(args[1], "compile");
        assert!(args.contains(&"--python-platform".to_string()));
        assert!(args.contains(&"linux".to_string()));
        assert!(args.contains(&"3.11".to_string()));
        assert!(args.contains(&"lowest-direct".to_string()));
        assert!(args.contains(&"--all-extras".to_string()));
        assert!(args.contains(&"requirements/override.txt".to_string()));
        assert!(!args.contains(&"--no-deps".to_string()));
        assert_eq!(args.last().unwrap(), "requirements/dev.in");
    }

    #[test]
    fn compile_args_high_no_deps() {
        let toolchain = UvToolchain::new(layout());
        let args = toolchain.compile_args(
            Platform::Windows,
            "3.9",
            true,
            true,
            "2024-06-01T00:00:00.000000Z",
            &["submodules/engine".to_string()],
        );

        assert!(args.contains(&"highest".to_string()));
        assert!(args.contains(&"--no-deps".to_string()));
        assert!(args.contains(&"windows".to_string()));
        assert_eq!(args.last().unwrap(), "submodules/engine/pyproject.toml");
    }

    #[test]
    fn compile_args_are_root_relative() {
        // The command runs with the project root as its working directory,
        // so root-joined paths would resolve to <root>/<root>/... when the
        // root itself is relative.
        let toolchain = UvToolchain::new(layout());
        let args = toolchain.compile_args(
            Platform::Linux,
            "3.11",
            false,
            false,
            "2024-06-01T00:00:00.000000Z",
            &["submodules/engine".to_string()],
        );

        assert!(args.iter().all(|arg| !arg.contains("/project")));
        assert!(args.iter().all(|arg| !Path::new(arg).is_absolute()));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn compile_resolves_inputs_against_the_project_root() {
        use std::os::unix::fs::PermissionsExt;
        use tempfile::TempDir;

        let temp = TempDir::new().unwrap();
        let root = temp.path().join("proj");
        std::fs::create_dir_all(root.join("requirements")).unwrap();
        std::fs::write(root.join("requirements").join("dev.in"), "attrs\n").unwrap();

        // Stub resolver: rejects any argument carrying its own cwd (the
        // project root) and requires the input file to exist relative to it.
        let uv = temp.path().join("fake-uv");
        std::fs::write(
            &uv,
            concat!(
                "#!/bin/sh\n",
                "if [ \"$1\" = \"--version\" ]; then\n",
                "  echo 'uv 9.9.9'\n",
                "  exit 0\n",
                "fi\n",
                "case \"$*\" in\n",
                "  *\"$PWD\"*) echo 'root leaked into argv' >&2; exit 1 ;;\n",
                "esac\n",
                "if [ ! -f requirements/dev.in ]; then\n",
                "  echo 'input not found relative to cwd' >&2\n",
                "  exit 1\n",
                "fi\n",
                "echo 'attrs==23.2.0'\n",
            ),
        )
        .unwrap();
        std::fs::set_permissions(&uv, std::fs::Permissions::from_mode(0o755)).unwrap();

        let config = Config {
            uv: uv.display().to_string(),
            ..Config::default()
        };
        let toolchain = UvToolchain::new(Layout::with_config(&root, config));

        let fragment = toolchain
            .compile(Platform::Linux, "3.11", false, false)
            .await
            .unwrap();

        assert_eq!(fragment, "# uv 9.9.9\nattrs==23.2.0\n");
    }
}
