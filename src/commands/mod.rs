//! CLI commands for minio-make
//!
//! - **release**: stamp the current UTC time into the generated version file
//! - **install**: run generate, build, test and install through the pinned toolchain
//!
//! The two modes are independent. When both are requested, release runs first.

pub mod install;
pub mod release;

pub use install::run_install;
pub use release::run_release;

use crate::core::command::Runner;
use crate::core::config::MakeConfig;
use crate::core::error::MakeResult;
use log::debug;
use std::io::Write;
use std::path::Path;

/// Which pipelines an invocation asked for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modes {
  pub release: bool,
  pub install: bool,
}

impl Modes {
  pub fn is_empty(&self) -> bool {
    !self.release && !self.install
  }
}

/// Run the requested pipelines for the project rooted at `project_root`
///
/// With no mode set nothing is read, written or spawned.
pub fn run_modes<R, W>(project_root: &Path, modes: Modes, runner: &mut R, out: &mut W) -> MakeResult<()>
where
  R: Runner + ?Sized,
  W: Write + ?Sized,
{
  if modes.is_empty() {
    debug!("no mode requested, nothing to do");
    return Ok(());
  }

  let config = MakeConfig::load(project_root)?;

  if modes.release {
    run_release(&config.release)?;
  }
  if modes.install {
    run_install(&config.install, runner, out)?;
  }

  Ok(())
}
