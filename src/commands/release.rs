//! `minio-make -release` - Stamp the current UTC time into the version file
//!
//! Success is silent on stdout; the stamped date is only logged.

use crate::core::config::ReleaseConfig;
use crate::core::error::MakeResult;
use crate::core::version::{self, VersionRecord};
use chrono::{DateTime, Utc};

/// Run the release pipeline at the current instant
pub fn run_release(config: &ReleaseConfig) -> MakeResult<()> {
  run_release_at(config, Utc::now())
}

/// Run the release pipeline as if it were `now`
pub fn run_release_at(config: &ReleaseConfig, now: DateTime<Utc>) -> MakeResult<()> {
  let record = VersionRecord::at(now);
  version::write_version_file(&config.version_file, &record)
}
