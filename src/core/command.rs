//! External command execution with captured output
//!
//! A [`StepCommand`] is one process invocation plus the stdout and stderr it
//! produced. Each pipeline step builds its own value and owns its buffers; they
//! are never shared between steps.
//!
//! Execution goes through the [`Runner`] trait so the install pipeline can be
//! driven without spawning anything. [`SystemRunner`] is the real thing.

use crate::core::error::{CommandError, MakeResult};
use log::debug;
use std::fmt;
use std::io;
use std::process::{Command, Stdio};

/// One external process invocation and the output it captured
#[derive(Debug, Clone)]
pub struct StepCommand {
  program: String,
  args: Vec<String>,
  stdout: Vec<u8>,
  stderr: Vec<u8>,
}

impl StepCommand {
  /// Create a command that has not run yet (both buffers empty)
  pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      program: program.into(),
      args: args.into_iter().map(Into::into).collect(),
      stdout: Vec::new(),
      stderr: Vec::new(),
    }
  }

  pub fn program(&self) -> &str {
    &self.program
  }

  pub fn args(&self) -> &[String] {
    &self.args
  }

  /// Captured standard output
  pub fn stdout(&self) -> &[u8] {
    &self.stdout
  }

  /// Captured standard error
  pub fn stderr(&self) -> &[u8] {
    &self.stderr
  }

  /// Append output to the capture buffers
  pub fn capture(&mut self, stdout: &[u8], stderr: &[u8]) {
    self.stdout.extend_from_slice(stdout);
    self.stderr.extend_from_slice(stderr);
  }

  /// The command line as a single string, for messages and logs
  pub fn command_line(&self) -> String {
    let mut line = self.program().to_string();
    for arg in self.args() {
      line.push(' ');
      line.push_str(arg);
    }
    line
  }
}

/// Captured stderr followed by captured stdout
impl fmt::Display for StepCommand {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{}{}",
      String::from_utf8_lossy(self.stderr()),
      String::from_utf8_lossy(self.stdout())
    )
  }
}

/// Runs a [`StepCommand`] to completion
///
/// Implementations must leave whatever output was produced in the command's
/// buffers even when they return an error.
pub trait Runner {
  fn run(&mut self, command: &mut StepCommand) -> MakeResult<()>;
}

/// Runner backed by real OS processes, resolved through PATH
#[derive(Debug, Default)]
pub struct SystemRunner;

impl Runner for SystemRunner {
  fn run(&mut self, command: &mut StepCommand) -> MakeResult<()> {
    let line = command.command_line();
    debug!("running `{}`", line);

    let output = Command::new(&command.program)
      .args(&command.args)
      .stdin(Stdio::null())
      .output()
      .map_err(|e| spawn_error(&command.program, &line, e))?;

    command.capture(&output.stdout, &output.stderr);

    if !output.status.success() {
      debug!("`{}` exited with {}", line, output.status);
      return Err(
        CommandError::Failed {
          command: line,
          code: output.status.code(),
        }
        .into(),
      );
    }

    debug!("`{}` finished", line);
    Ok(())
  }
}

fn spawn_error(program: &str, line: &str, err: io::Error) -> CommandError {
  if err.kind() == io::ErrorKind::NotFound {
    CommandError::NotFound {
      program: program.to_string(),
    }
  } else {
    CommandError::Spawn {
      command: line.to_string(),
      reason: err.to_string(),
    }
  }
}
