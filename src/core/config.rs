use crate::core::error::{ConfigError, MakeError, MakeResult, ResultExt};
use crate::core::version::DEFAULT_VERSION_FILE;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for minio-make
/// Searched in order: make.toml, .make.toml, .config/make.toml
///
/// Every field has a default, so the file is optional and may be partial:
///
/// ```toml
/// [release]
/// version_file = "version.go"
///
/// [install]
/// wrapper = "godep"
/// package = "github.com/minio/minio"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MakeConfig {
  #[serde(default)]
  pub release: ReleaseConfig,
  #[serde(default)]
  pub install: InstallConfig,
}

/// Where release mode writes the generated version file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReleaseConfig {
  /// Path of the generated file, relative to the project root (default: version.go)
  #[serde(default = "default_version_file")]
  pub version_file: PathBuf,
}

fn default_version_file() -> PathBuf {
  PathBuf::from(DEFAULT_VERSION_FILE)
}

impl Default for ReleaseConfig {
  fn default() -> Self {
    Self {
      version_file: default_version_file(),
    }
  }
}

/// Toolchain used by install mode
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InstallConfig {
  /// Dependency-pinning wrapper every stage runs through (default: godep)
  #[serde(default = "default_wrapper")]
  pub wrapper: String,

  /// Package path handed to the install stage (default: github.com/minio/minio)
  #[serde(default = "default_package")]
  pub package: String,
}

fn default_wrapper() -> String {
  "godep".to_string()
}

fn default_package() -> String {
  "github.com/minio/minio".to_string()
}

impl Default for InstallConfig {
  fn default() -> Self {
    Self {
      wrapper: default_wrapper(),
      package: default_package(),
    }
  }
}

impl MakeConfig {
  /// Find config file in search order: make.toml, .make.toml, .config/make.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = [
      path.join("make.toml"),
      path.join(".make.toml"),
      path.join(".config").join("make.toml"),
    ];

    candidates.into_iter().find(|p| p.is_file())
  }

  /// Load config for the project at `path`, falling back to defaults when no file exists
  ///
  /// A relative `version_file` is always anchored at `path`, whether it came from
  /// the file or from the defaults.
  pub fn load(path: &Path) -> MakeResult<Self> {
    let mut config = match Self::find_config_path(path) {
      Some(config_path) => Self::read(&config_path)?,
      None => Self::default(),
    };

    if config.release.version_file.is_relative() {
      config.release.version_file = path.join(&config.release.version_file);
    }

    Ok(config)
  }

  fn read(config_path: &Path) -> MakeResult<Self> {
    let content = fs::read_to_string(config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config: MakeConfig = toml_edit::de::from_str(&content).map_err(|e| {
      MakeError::with_help(
        format!("Failed to parse config from {}", config_path.display()),
        "Check make.toml against the documented [release] and [install] tables.",
      )
      .context(e.to_string())
    })?;

    config.validate(config_path)?;
    Ok(config)
  }

  fn validate(&self, config_path: &Path) -> MakeResult<()> {
    let empty = |field: &str| {
      MakeError::Config(ConfigError::EmptyField {
        field: field.to_string(),
        path: config_path.to_path_buf(),
      })
    };

    if self.release.version_file.as_os_str().is_empty() {
      return Err(empty("release.version_file"));
    }
    if self.install.wrapper.trim().is_empty() {
      return Err(empty("install.wrapper"));
    }
    if self.install.package.trim().is_empty() {
      return Err(empty("install.package"));
    }

    Ok(())
  }
}
