//! Integration tests for minio-make
//!
//! These run the compiled binary inside throwaway project directories.

mod helpers;
mod test_cli;
mod test_install;
