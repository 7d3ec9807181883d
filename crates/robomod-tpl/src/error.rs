//! Error types for texture extraction.

use thiserror::Error;

/// Errors that can occur when extracting a texture.
#[derive(Debug, Error)]
pub enum Error {
    /// A pointer in the chain points outside the model.
    #[error("{0}")]
    Common(#[from] robomod_common::Error),

    /// The resolved pixel span is inverted or runs past the model.
    #[error("image data spans {start}..{end} but the model is only {len} bytes")]
    PixelRange { start: usize, end: usize, len: usize },

    /// Unknown model category name.
    #[error("unknown model category: {0} (expected plain, robo or weapon)")]
    UnknownCategory(String),
}

/// Result type for texture operations.
pub type Result<T> = std::result::Result<T, Error>;
