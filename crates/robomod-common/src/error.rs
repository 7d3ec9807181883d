//! Error types for robomod-common.

use thiserror::Error;

/// Common error type for robomod operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A read would fall outside the buffer.
    #[error("read of {needed} bytes at offset {index} is out of range (buffer is {len} bytes)")]
    OutOfRange {
        index: usize,
        needed: usize,
        len: usize,
    },
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
