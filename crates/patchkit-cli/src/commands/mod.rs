//! CLI command implementations.

pub mod build;
pub mod devices;
pub mod init;
pub mod list;
