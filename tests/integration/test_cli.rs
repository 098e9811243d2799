//! Tests for flag handling and the no-op invocation

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_no_flags_does_nothing() -> Result<()> {
  let project = TestProject::new()?;

  let output = run_make(&project.path, &[])?;

  assert!(output.status.success());
  assert_eq!(stdout(&output), "");
  assert!(project.entries()?.is_empty());

  Ok(())
}

#[test]
fn test_no_flags_ignores_broken_config() -> Result<()> {
  let project = TestProject::new()?;
  project.write_config("[install\n")?;

  let output = run_make(&project.path, &[])?;

  assert!(output.status.success());
  assert_eq!(project.entries()?, vec!["make.toml".to_string()]);

  Ok(())
}

#[test]
fn test_false_flags_do_nothing() -> Result<()> {
  let project = TestProject::new()?;

  let output = run_make(&project.path, &["-release=false", "-install=0"])?;

  assert!(output.status.success());
  assert!(project.entries()?.is_empty());

  Ok(())
}

#[test]
fn test_unknown_flag_is_a_usage_error() -> Result<()> {
  let project = TestProject::new()?;

  let output = run_make(&project.path, &["-publish"])?;

  assert_eq!(output.status.code(), Some(2));
  assert!(project.entries()?.is_empty());

  Ok(())
}

#[test]
fn test_positional_argument_is_a_usage_error() -> Result<()> {
  let project = TestProject::new()?;

  let output = run_make(&project.path, &["release"])?;

  assert_eq!(output.status.code(), Some(2));

  Ok(())
}

#[test]
fn test_help_lists_both_modes() -> Result<()> {
  let project = TestProject::new()?;

  let output = run_make(&project.path, &["-help"])?;

  assert!(output.status.success());
  let help = stdout(&output);
  assert!(help.contains("--release"));
  assert!(help.contains("--install"));

  Ok(())
}

#[test]
fn test_broken_config_fails_when_a_mode_is_set() -> Result<()> {
  let project = TestProject::new()?;
  project.write_config("[install\n")?;

  let output = run_make(&project.path, &["-release"])?;

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("Failed to parse config"));
  assert!(!project.file_exists("version.go"));

  Ok(())
}
