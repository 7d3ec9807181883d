//! Model assets from the local pool.

use std::path::Path;

use robomod_common::read_u32_be;

use crate::error::read_file;
use crate::Result;

/// Offset of the declared slot length inside a model's own header.
const SLOT_LENGTH_OFFSET: usize = 4;

/// A model file, identified only by its file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelAsset {
    name: String,
    bytes: Vec<u8>,
}

impl ModelAsset {
    /// Create a model from a name and its bytes.
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Load a model from disk, naming it after the file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = read_file(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self { name, bytes })
    }

    /// File name of the model.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw model bytes.
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size of the model file in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if the model file is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Length of the slot this model occupies inside a container.
    ///
    /// This is the big-endian u32 at bytes `[4, 8)` of the model itself. It
    /// can differ from the file size and is the only size the patcher trusts.
    pub fn slot_length(&self) -> Result<u32> {
        Ok(read_u32_be(&self.bytes, SLOT_LENGTH_OFFSET)?)
    }
}
