//! Common test utilities and helpers
//!
//! Integration tests run the real binary against shell-script stand-ins
//! for csolution, cpackget and cbuildgen. Every fake appends its arguments
//! to `calls.log` in the tool directory.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Contexts reported by the fake csolution
pub const CONTEXTS: &[&str] = &["App.Debug+Board", "App.Release+Board", "Lib.Debug+Board"];

/// Index document matching [`CONTEXTS`]
pub const INDEX: &str = r"build-idx:
  generated-by: csolution version 2.0.0
  csolution: Sol.csolution.yml
  cprojects:
    - cproject: App/App.cproject.yml
    - cproject: Lib/Lib.cproject.yml
  cbuilds:
    - cbuild: App/App.Debug+Board.cbuild.yml
      project: App
      configuration: .Debug+Board
    - cbuild: App/App.Release+Board.cbuild.yml
      project: App
      configuration: .Release+Board
    - cbuild: Lib/Lib.Debug+Board.cbuild.yml
      project: Lib
      configuration: .Debug+Board
";

/// Solution file name used by [`TestProject::with_solution`]
pub const SOLUTION: &str = "Sol.csolution.yml";

const CSOLUTION: &str = r#"#!/bin/sh
echo "csolution $*" >> "@LOG@"
[ -n "$FAKE_CSOLUTION_FAIL" ] && case "$*" in *"$FAKE_CSOLUTION_FAIL"*) echo "csolution error" >&2; exit 2;; esac
case "$1 $2" in
  convert*) echo "csolution: converted" ;;
  "list contexts") printf 'App.Debug+Board\nApp.Release+Board\nLib.Debug+Board\n' ;;
  "list toolchains") printf 'AC6@6.19.0\nGCC@12.2.0\n' ;;
  "list packs") printf '%s' "$FAKE_MISSING_PACKS" ;;
esac
exit 0
"#;

const CPACKGET: &str = r#"#!/bin/sh
echo "cpackget $*" >> "@LOG@"
exit 0
"#;

const CBUILDGEN: &str = r#"#!/bin/sh
echo "cbuildgen $* root=$CMSIS_COMPILER_ROOT" >> "@LOG@"
[ -n "$FAKE_BUILD_FAIL" ] && case "$1" in *"$FAKE_BUILD_FAIL"*) echo "build failed" >&2; exit 1;; esac
echo "cbuildgen: built $(basename "$1")"
exit 0
"#;

/// Test project context
///
/// A temporary workspace with a solution, a fake tool directory and an
/// isolated configuration directory.
pub struct TestProject {
    /// Temporary directory for the test project
    pub dir: TempDir,
    /// Fake tool directory
    pub bin: TempDir,
    /// Configuration directory
    pub config: TempDir,
}

impl TestProject {
    /// Create an empty project with all fake tools installed
    pub fn new() -> Self {
        let project = Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
            bin: TempDir::new().expect("Failed to create bin directory"),
            config: TempDir::new().expect("Failed to create config directory"),
        };
        project.install_tool("csolution", CSOLUTION);
        project.install_tool("cpackget", CPACKGET);
        project.install_tool("cbuildgen", CBUILDGEN);
        project
    }

    /// Create a project with a solution file and its build index
    pub fn with_solution() -> Self {
        let project = Self::new();
        project.create_file(SOLUTION, "solution:\n  projects: []\n");
        project.create_file("Sol.cbuild-idx.yml", INDEX);
        project
    }

    /// Get the path to the test project directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Path of the solution file
    pub fn solution(&self) -> PathBuf {
        self.dir.path().join(SOLUTION)
    }

    /// Create a file in the test project
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Write the global configuration file
    pub fn write_config(&self, content: &str) {
        std::fs::write(self.config.path().join("config.toml"), content)
            .expect("Failed to write config");
    }

    /// Remove a fake tool
    pub fn remove_tool(&self, name: &str) {
        std::fs::remove_file(self.bin.path().join(name)).expect("Failed to remove tool");
    }

    /// Tool invocations recorded so far, one per line
    pub fn calls(&self) -> Vec<String> {
        std::fs::read_to_string(self.log_path())
            .unwrap_or_default()
            .lines()
            .map(String::from)
            .collect()
    }

    /// Invocations of one tool
    pub fn calls_of(&self, tool: &str) -> Vec<String> {
        let prefix = format!("{tool} ");
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with(&prefix))
            .collect()
    }

    /// A `solbuild` command isolated from the user's environment
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_solbuild"));
        cmd.current_dir(self.dir.path())
            .env("SOLBUILD_BIN_PATH", self.bin.path())
            .env("SOLBUILD_CONFIG_DIR", self.config.path())
            .env_remove("RUST_LOG")
            .env_remove("FAKE_BUILD_FAIL")
            .env_remove("FAKE_CSOLUTION_FAIL")
            .env_remove("FAKE_MISSING_PACKS");
        cmd
    }

    /// Run `solbuild` with `args`
    pub fn run(&self, args: &[&str]) -> Output {
        self.command()
            .args(args)
            .output()
            .expect("Failed to execute solbuild")
    }

    fn log_path(&self) -> PathBuf {
        self.bin.path().join("calls.log")
    }

    fn install_tool(&self, name: &str, script: &str) {
        let path = self.bin.path().join(name);
        let log = self.log_path();
        std::fs::write(&path, script.replace("@LOG@", &log.display().to_string()))
            .expect("Failed to write tool");
        make_executable(&path);
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .expect("Failed to set permissions");
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) {}

/// Stdout of a finished command
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Stderr of a finished command
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
