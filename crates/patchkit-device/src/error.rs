//! Error types for device building and saving.

use std::path::PathBuf;

use patchkit_core::PatchError;
use thiserror::Error;

use crate::kind::DeviceKind;

/// Errors that can occur while building or saving a device.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// Invalid graph operation
    #[error(transparent)]
    Patch(#[from] PatchError),

    /// Device boundary channel out of range
    #[error("{kind} has {channels} channel(s), got {channel}")]
    ChannelOutOfRange {
        /// Device kind.
        kind: DeviceKind,
        /// Number of channels on that side of the device.
        channels: usize,
        /// Requested channel.
        channel: usize,
    },

    /// Unknown device kind name
    #[error("unknown device kind: {0}")]
    UnknownDeviceKind(String),

    /// Failed to create directory
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        /// Path of the directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write file '{path}': {source}")]
    WriteFile {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize the document
    #[error("failed to serialize patch: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl DeviceError {
    /// Create a create directory error.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DeviceError::CreateDir {
            path: path.into(),
            source,
        }
    }

    /// Create a write file error.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DeviceError::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// Create a channel range error.
    pub fn channel_out_of_range(kind: DeviceKind, channels: usize, channel: usize) -> Self {
        DeviceError::ChannelOutOfRange {
            kind,
            channels,
            channel,
        }
    }
}
