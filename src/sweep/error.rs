//! Sweep snapshot error types.

use thiserror::Error;

/// Errors that can occur while encoding or decoding a list snapshot.
#[derive(Debug, Error)]
pub enum SweepError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Snapshot version is not supported by this version of the crate
    #[error("Unsupported snapshot version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
}
