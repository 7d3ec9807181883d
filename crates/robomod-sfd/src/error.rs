//! Error types for SFD handling.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when working with SFD containers and models.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Common library error.
    #[error("{0}")]
    Common(#[from] robomod_common::Error),

    /// Input container or model does not exist.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The object table itself runs past the end of the buffer.
    #[error("object table declares {object_count} objects but the buffer is only {buffer_len} bytes")]
    TableOverrun {
        object_count: u32,
        buffer_len: usize,
    },

    /// An object table entry points past the end of the buffer.
    #[error("object {entry} at offset {offset} with length {length} exceeds the {buffer_len}-byte buffer")]
    TruncatedTable {
        entry: usize,
        offset: u32,
        length: u32,
        buffer_len: usize,
    },

    /// A replacement model does not fit in its target's slot.
    #[error(
        "{replacement} ({replacement_len} bytes) is larger than the {slot_length}-byte slot of {target}"
    )]
    SizeViolation {
        target: String,
        replacement: String,
        slot_length: u32,
        replacement_len: usize,
    },

    /// A replacement written at a match would run past the end of the container.
    #[error("{replacement} at offset {offset} needs {needed} bytes but the container ends at {buffer_len}")]
    SlotOverflow {
        replacement: String,
        offset: usize,
        needed: usize,
        buffer_len: usize,
    },
}

/// Result type for SFD operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Read a whole file, mapping a missing file to [`Error::FileNotFound`].
pub(crate) fn read_file(path: &std::path::Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Error::FileNotFound(path.to_path_buf()),
        _ => Error::Io(e),
    })
}
