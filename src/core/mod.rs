//! Core building blocks for minio-make
//!
//! - **command**: external process execution with captured stdout/stderr
//! - **config**: optional make.toml configuration
//! - **error**: error types with contextual help messages and exit codes
//! - **version**: version record, HTTP-date accessor and the generated version file

pub mod command;
pub mod config;
pub mod error;
pub mod version;
