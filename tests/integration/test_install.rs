//! Tests for install mode, driven through a fake toolchain

#![cfg(unix)]

use crate::helpers::*;
use anyhow::Result;

const STAGE_CALLS: [&str; 4] = [
  "generate ./...",
  "build -a ./...",
  "test -race ./...",
  "install -a github.com/minio/minio",
];

#[test]
fn test_install_runs_all_stages_in_order() -> Result<()> {
  let project = TestProject::new()?;
  project.install_fake_toolchain(None)?;

  let output = run_make(&project.path, &["-install"])?;
  assert!(output.status.success(), "stderr: {}", stderr(&output));

  assert_eq!(project.calls()?, STAGE_CALLS);

  // Each stage prints its stderr, then its stdout, exactly once
  let printed = stdout(&output);
  let mut last = 0;
  for call in STAGE_CALLS {
    let block = format!("err: {}\nout: {}\n", call, call);
    assert_eq!(printed.matches(&block).count(), 1, "{}", printed);
    let at = printed.find(&block).unwrap_or(0);
    assert!(at >= last, "{} printed out of order", call);
    last = at;
  }

  Ok(())
}

#[test]
fn test_install_stops_at_first_failure() -> Result<()> {
  let project = TestProject::new()?;
  project.install_fake_toolchain(Some("generate"))?;

  let output = run_make(&project.path, &["-install"])?;

  assert_eq!(output.status.code(), Some(1));
  assert_eq!(project.calls()?, vec!["generate ./...".to_string()]);

  let printed = stdout(&output);
  assert_eq!(printed, "err: generate ./...\nout: generate ./...\n");
  assert!(stderr(&output).contains("generate stage failed"));

  Ok(())
}

#[test]
fn test_install_test_stage_failure_skips_install() -> Result<()> {
  let project = TestProject::new()?;
  project.install_fake_toolchain(Some("test"))?;

  let output = run_make(&project.path, &["-install"])?;

  assert_eq!(output.status.code(), Some(1));
  assert_eq!(project.calls()?, STAGE_CALLS[..3]);
  assert_eq!(stdout(&output).matches("out: test -race ./...").count(), 1);
  assert!(stdout(&output).ends_with("out: test -race ./...\n\n"), "{}", stdout(&output));
  assert!(!stdout(&output).contains("install -a"));

  Ok(())
}

#[test]
fn test_install_with_missing_wrapper() -> Result<()> {
  let project = TestProject::new()?;
  project.write_config("[install]\nwrapper = \"minio-make-missing-wrapper\"\n")?;

  let output = run_make(&project.path, &["-install"])?;

  assert_eq!(output.status.code(), Some(1));
  assert_eq!(stdout(&output), "");
  let err = stderr(&output);
  assert!(err.contains("Executable not found: minio-make-missing-wrapper"), "{}", err);
  assert!(err.contains("Help:"));

  Ok(())
}

#[test]
fn test_release_and_install_together() -> Result<()> {
  let project = TestProject::new()?;
  project.install_fake_toolchain(None)?;

  let output = run_make(&project.path, &["-release", "-install"])?;

  assert!(output.status.success(), "stderr: {}", stderr(&output));
  assert!(project.file_exists("version.go"));
  assert_eq!(project.calls()?.len(), 4);

  Ok(())
}
