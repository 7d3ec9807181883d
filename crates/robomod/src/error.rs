//! Error types for batch operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the batch layer.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Container or model error.
    #[error("{0}")]
    Sfd(#[from] robomod_sfd::Error),

    /// Texture extraction error.
    #[error("{0}")]
    Tpl(#[from] robomod_tpl::Error),

    /// A directory or plan file does not exist.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Invalid swap plan file.
    #[error("invalid swap plan: {0}")]
    Plan(#[from] serde_json::Error),

    /// Invalid glob pattern.
    #[error("invalid pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Target and replacement lists have different lengths.
    #[error("{targets} target models but {replacements} replacements selected")]
    UnbalancedSelection { targets: usize, replacements: usize },

    /// An output name that is not a bare file name.
    #[error("invalid output file name: {0:?}")]
    InvalidOutputName(String),

    /// Nothing was selected.
    #[error("no models selected")]
    EmptySelection,
}

/// Result type for batch operations.
pub type Result<T> = std::result::Result<T, Error>;
