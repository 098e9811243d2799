//! `minio-make -install` - Generate, build, test and install through the pinned toolchain
//!
//! The four stages always run in the same order with fixed arguments:
//!
//! - **generate**: `godep go generate ./...`
//! - **build**: `godep go build -a ./...`
//! - **test**: `godep go test -race ./...`
//! - **install**: `godep go install -a github.com/minio/minio`
//!
//! Each stage's captured output (stderr, then stdout) is printed once after it
//! finishes. The first failing stage stops the pipeline; a failed test or
//! install stage ends its output with one extra newline.

use crate::core::command::{Runner, StepCommand};
use crate::core::config::InstallConfig;
use crate::core::error::{MakeResult, ResultExt};
use log::info;
use std::fmt;
use std::io::Write;

/// Install pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
  Generate,
  Build,
  Test,
  Install,
}

impl Stage {
  pub const ALL: [Stage; 4] = [Stage::Generate, Stage::Build, Stage::Test, Stage::Install];

  pub fn name(self) -> &'static str {
    match self {
      Stage::Generate => "generate",
      Stage::Build => "build",
      Stage::Test => "test",
      Stage::Install => "install",
    }
  }

  /// Arguments passed to the wrapper for this stage
  pub fn args(self, package: &str) -> Vec<String> {
    let args = match self {
      Stage::Generate => vec!["go", "generate", "./..."],
      Stage::Build => vec!["go", "build", "-a", "./..."],
      Stage::Test => vec!["go", "test", "-race", "./..."],
      Stage::Install => vec!["go", "install", "-a", package],
    };
    args.into_iter().map(String::from).collect()
  }

  /// Test and install report a failure with one extra trailing newline
  fn newline_on_failure(self) -> bool {
    matches!(self, Stage::Test | Stage::Install)
  }

  /// A fresh command for this stage; nothing is shared with other stages
  pub fn command(self, config: &InstallConfig) -> StepCommand {
    StepCommand::new(config.wrapper.clone(), self.args(&config.package))
  }
}

impl fmt::Display for Stage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// Run all install stages, printing each stage's output to `out`
pub fn run_install<R, W>(config: &InstallConfig, runner: &mut R, out: &mut W) -> MakeResult<()>
where
  R: Runner + ?Sized,
  W: Write + ?Sized,
{
  for stage in Stage::ALL {
    let mut command = stage.command(config);
    info!("{} stage: {}", stage, command.command_line());

    let result = runner.run(&mut command);

    write!(out, "{}", command)?;
    if result.is_err() && stage.newline_on_failure() {
      writeln!(out)?;
    }
    out.flush()?;

    result.with_context(|| format!("Install pipeline stopped: {} stage failed", stage))?;
  }

  Ok(())
}
