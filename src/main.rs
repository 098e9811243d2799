mod commands;
mod core;

use clap::Parser;
use crate::commands::Modes;
use crate::core::command::SystemRunner;
use crate::core::error::{MakeError, print_error};
use std::ffi::OsString;

/// Stamp minio releases and run the pinned install pipeline
#[derive(Parser, Debug)]
#[command(name = "minio-make")]
#[command(about, long_about = None)]
#[command(styles = get_styles())]
struct MakeCli {
  /// Write the current UTC time into the generated version file
  #[arg(long)]
  release: bool,

  /// Run generate, build, race-enabled tests and install through the toolchain wrapper
  #[arg(long)]
  install: bool,
}

impl MakeCli {
  fn modes(&self) -> Modes {
    Modes {
      release: self.release,
      install: self.install,
    }
  }
}

/// Flags that may be spelled the Go way (`-release`, `-release=false`)
const MODE_FLAGS: [&str; 2] = ["release", "install"];

/// How one command-line word relates to the mode flags
#[derive(Debug, PartialEq, Eq)]
enum FlagWord {
  /// Sets a mode flag to the given value
  Mode(&'static str, bool),
  /// Go-style help request
  Help,
  /// Anything else, left for clap to judge
  Other,
}

fn classify(arg: &str) -> FlagWord {
  let Some(body) = arg.strip_prefix("--").or_else(|| arg.strip_prefix('-')) else {
    return FlagWord::Other;
  };
  if body == "help" {
    return FlagWord::Help;
  }

  let (name, value) = match body.split_once('=') {
    Some((name, value)) => (name, Some(value)),
    None => (body, None),
  };
  let Some(&flag) = MODE_FLAGS.iter().find(|f| **f == name) else {
    return FlagWord::Other;
  };

  match value {
    None => FlagWord::Mode(flag, true),
    Some(value) => match parse_go_bool(value) {
      Some(on) => FlagWord::Mode(flag, on),
      None => FlagWord::Other,
    },
  }
}

/// Boolean spellings accepted by Go's flag package
fn parse_go_bool(value: &str) -> Option<bool> {
  match value {
    "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
    "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
    _ => None,
  }
}

/// Rewrite Go-style mode flags into the `--flag` form clap expects
///
/// The last occurrence of a flag wins. Words that are not mode flags are passed
/// through untouched so clap can reject them with its usual message.
fn normalize_args<I>(args: I) -> Vec<OsString>
where
  I: IntoIterator<Item = OsString>,
{
  let mut args = args.into_iter();
  let mut out: Vec<OsString> = args.next().into_iter().collect();
  let mut modes: Vec<(&'static str, bool)> = Vec::new();

  for arg in args {
    match arg.to_str().map(classify) {
      Some(FlagWord::Mode(flag, on)) => {
        modes.retain(|(f, _)| *f != flag);
        modes.push((flag, on));
      }
      Some(FlagWord::Help) => out.push(OsString::from("--help")),
      _ => out.push(arg),
    }
  }

  for (flag, on) in modes {
    if on {
      out.push(OsString::from(format!("--{}", flag)));
    }
  }
  out
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  env_logger::Builder::new()
    .filter_level(log::LevelFilter::Warn)
    .parse_default_env()
    .init();

  let cli = MakeCli::parse_from(normalize_args(std::env::args_os()));

  let project_root = match std::env::current_dir() {
    Ok(dir) => dir,
    Err(e) => {
      eprintln!("Error: Failed to get current directory: {}", e);
      std::process::exit(1);
    }
  };

  let mut stdout = std::io::stdout().lock();
  let result = commands::run_modes(&project_root, cli.modes(), &mut SystemRunner, &mut stdout);

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: MakeError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
