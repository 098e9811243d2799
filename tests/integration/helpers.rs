//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A scratch project directory the binary runs in
pub struct TestProject {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestProject {
  /// Create an empty project directory
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();
    Ok(Self { _root: root, path })
  }

  /// Write make.toml at the project root
  pub fn write_config(&self, contents: &str) -> Result<()> {
    std::fs::write(self.path.join("make.toml"), contents)?;
    Ok(())
  }

  /// Stand in for the toolchain: `sh` becomes the wrapper and a script named
  /// `go` in the project records each call to calls.log, echoes one line to
  /// stdout and one to stderr, and exits 1 when its first argument is `fail_stage`.
  pub fn install_fake_toolchain(&self, fail_stage: Option<&str>) -> Result<()> {
    self.write_config("[install]\nwrapper = \"sh\"\n")?;

    let script = format!(
      r#"echo "$*" >> calls.log
echo "out: $*"
echo "err: $*" >&2
if [ "$1" = "{}" ]; then
  exit 1
fi
"#,
      fail_stage.unwrap_or("")
    );
    std::fs::write(self.path.join("go"), script)?;
    Ok(())
  }

  /// Lines the fake toolchain recorded, in call order
  pub fn calls(&self) -> Result<Vec<String>> {
    let log = self.path.join("calls.log");
    if !log.exists() {
      return Ok(Vec::new());
    }
    Ok(self.read_file("calls.log")?.lines().map(String::from).collect())
  }

  /// Names of everything in the project directory, sorted
  pub fn entries(&self) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(&self.path)? {
      names.push(entry?.file_name().to_string_lossy().to_string());
    }
    names.sort();
    Ok(names)
  }

  /// Check if a file exists
  pub fn file_exists(&self, path: &str) -> bool {
    self.path.join(path).exists()
  }

  /// Read a file
  pub fn read_file(&self, path: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(path))?)
  }
}

/// Run the minio-make binary in `cwd`; the exit status is left to the caller
pub fn run_make(cwd: &Path, args: &[&str]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_minio-make");

  Command::new(bin)
    .current_dir(cwd)
    .args(args)
    .env_remove("RUST_LOG")
    .output()
    .context("Failed to run minio-make")
}

pub fn stdout(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
  String::from_utf8_lossy(&output.stderr).to_string()
}
