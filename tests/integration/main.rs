//! Integration tests for relock

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use tempfile::TempDir;

    fn relock() -> Command {
        cargo_bin_cmd!("relock")
    }

    /// Store key for the platform the tests run on
    fn host_key(python_version: &str) -> String {
        format!("{}_{}", std::env::consts::OS, python_version)
    }

    #[test]
    fn help_displays() {
        relock()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("lockfile maintenance"));
    }

    #[test]
    fn version_displays() {
        relock()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("relock"));
    }

    #[test]
    fn status_runs() {
        let temp = TempDir::new().unwrap();
        relock()
            .args(["--root"])
            .arg(temp.path())
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("relock Status"));
    }

    #[test]
    fn show_prints_stored_compilation() {
        let temp = TempDir::new().unwrap();
        let contents = format!(
            "{{\n  \"{}\": \"# uv 1.2.0\\nfoo==1.0\\n\"\n}}\n",
            host_key("3.11")
        );
        std::fs::write(temp.path().join("lock.json"), contents).unwrap();

        relock()
            .args(["--python-version", "3.11", "--root"])
            .arg(temp.path())
            .arg("show")
            .assert()
            .success()
            .stdout(predicate::str::contains("# uv 1.2.0"))
            .stdout(predicate::str::contains("foo==1.0"));
    }

    #[test]
    fn show_missing_compilation_fails() {
        let temp = TempDir::new().unwrap();

        relock()
            .args(["--python-version", "3.11", "--root"])
            .arg(temp.path())
            .arg("show")
            .assert()
            .failure()
            .stderr(predicate::str::contains("No stored compilation"));
    }

    #[test]
    fn show_explicit_platform() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("lock.json"),
            "{\n  \"windows_3.11\": \"# uv 1.2.0\\nbar==2.0\\n\"\n}\n",
        )
        .unwrap();

        relock()
            .args(["--python-version", "3.11", "--root"])
            .arg(temp.path())
            .args(["show", "--platform", "windows"])
            .assert()
            .success()
            .stdout(predicate::str::contains("bar==2.0"));
    }

    #[test]
    fn show_rejects_unknown_platform() {
        let temp = TempDir::new().unwrap();

        relock()
            .args(["--python-version", "3.11", "--root"])
            .arg(temp.path())
            .args(["show", "--platform", "freebsd"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unsupported platform"));
    }

    #[test]
    fn check_fails_when_resolver_missing() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("requirements")).unwrap();
        std::fs::write(temp.path().join("requirements").join("dev.in"), "attrs\n").unwrap();
        std::fs::write(
            temp.path().join("relock.toml"),
            "uv = \"relock-test-missing-uv\"\n",
        )
        .unwrap();

        relock()
            .args(["--python-version", "3.11", "--root"])
            .arg(temp.path())
            .arg("check")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Command failed to start"));
    }

    #[test]
    fn invalid_config_reported() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("relock.toml"), "uv = [").unwrap();

        relock()
            .args(["--root"])
            .arg(temp.path())
            .arg("status")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"));
    }
}
