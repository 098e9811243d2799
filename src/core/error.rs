//! Error types for minio-make with contextual messages and exit codes
//!
//! Every failure the tool can hit ends up as a [`MakeError`]. Errors carry an
//! optional help line that is printed under the message, so a failed build
//! step or a bad config tells the user what to look at next.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for minio-make
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// Any failed pipeline: release write, install step, or configuration
  Failure = 1,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for minio-make
#[derive(Debug)]
pub enum MakeError {
  /// Configuration errors
  Config(ConfigError),

  /// External toolchain command errors
  Command(CommandError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl MakeError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    MakeError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    MakeError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  ///
  /// Structured errors (I/O, command, config) are wrapped into a message so the
  /// context line is never lost; the original help text is carried over.
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      MakeError::Message { message, context, help } => MakeError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      other => {
        let help = other.help_message();
        MakeError::Message {
          message: ctx_str,
          context: Some(other.to_string()),
          help,
        }
      }
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      MakeError::Config(_) | MakeError::Command(_) | MakeError::Io(_) | MakeError::Message { .. } => ExitCode::Failure,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      MakeError::Config(e) => e.help_message(),
      MakeError::Command(e) => e.help_message(),
      MakeError::Io(e) if e.kind() == io::ErrorKind::PermissionDenied => {
        Some("Check that the current user can write to the target directory.".to_string())
      }
      MakeError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for MakeError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      MakeError::Config(e) => write!(f, "{}", e),
      MakeError::Command(e) => write!(f, "{}", e),
      MakeError::Io(e) => write!(f, "I/O error: {}", e),
      MakeError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for MakeError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      MakeError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for MakeError {
  fn from(err: io::Error) -> Self {
    MakeError::Io(err)
  }
}

impl From<CommandError> for MakeError {
  fn from(err: CommandError) -> Self {
    MakeError::Command(err)
  }
}

impl From<ConfigError> for MakeError {
  fn from(err: ConfigError) -> Self {
    MakeError::Config(err)
  }
}

impl From<&str> for MakeError {
  fn from(msg: &str) -> Self {
    MakeError::message(msg)
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// A required field was present but empty
  EmptyField { field: String, path: PathBuf },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::EmptyField { field, .. } => Some(format!(
        "Remove `{}` from the file to use the default, or give it a value.",
        field
      )),
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::EmptyField { field, path } => {
        write!(f, "Config field `{}` in {} must not be empty", field, path.display())
      }
    }
  }
}

/// External command errors
#[derive(Debug)]
pub enum CommandError {
  /// Executable could not be found on PATH
  NotFound { program: String },

  /// Process could not be started for another reason
  Spawn { command: String, reason: String },

  /// Process ran and exited unsuccessfully (`code` is None when killed by a signal)
  Failed { command: String, code: Option<i32> },
}

impl CommandError {
  fn help_message(&self) -> Option<String> {
    match self {
      CommandError::NotFound { program } => Some(format!(
        "Install `{}` and make sure it is on your PATH, or set `install.wrapper` in make.toml.",
        program
      )),
      CommandError::Spawn { .. } => Some("Check that the executable is readable and marked executable.".to_string()),
      CommandError::Failed { .. } => None,
    }
  }
}

impl fmt::Display for CommandError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      CommandError::NotFound { program } => {
        write!(f, "Executable not found: {}", program)
      }
      CommandError::Spawn { command, reason } => {
        write!(f, "Failed to start `{}`: {}", command, reason)
      }
      CommandError::Failed { command, code: Some(code) } => {
        write!(f, "`{}` failed with exit code: {}", command, code)
      }
      CommandError::Failed { command, code: None } => {
        write!(f, "`{}` was terminated by a signal", command)
      }
    }
  }
}

/// Result type alias for minio-make
pub type MakeResult<T> = Result<T, MakeError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> MakeResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> MakeResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<MakeError>,
{
  fn context(self, ctx: impl Into<String>) -> MakeResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> MakeResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &MakeError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
