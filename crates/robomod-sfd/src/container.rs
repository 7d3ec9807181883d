//! SFD object table parsing.

use std::fmt;
use std::path::Path;

use robomod_common::{read_u32_be, ByteCursor};

use crate::error::read_file;
use crate::{Error, Result, SFD_MAGIC};

/// Offset of the object count in the header.
const OBJECT_COUNT_OFFSET: usize = 4;

/// Offset of the first (offset, length) pair.
const TABLE_OFFSET: usize = 8;

/// Size of one (offset, length) pair.
const TABLE_ENTRY_SIZE: usize = 8;

/// One object declared in the container header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectEntry {
    /// Absolute offset of the object in the container.
    pub offset: u32,
    /// Length of the object in bytes.
    pub length: u32,
}

impl ObjectEntry {
    /// Offset one past the last byte of the object.
    #[inline]
    pub fn end(&self) -> usize {
        self.offset as usize + self.length as usize
    }
}

/// Diagnostic view of an object and the unused space after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectLayout {
    /// Index of the object in the table.
    pub index: usize,
    /// Absolute offset of the object.
    pub offset: u32,
    /// Declared length of the object.
    pub length: u32,
    /// Bytes between the end of this object and the start of the next one
    /// (or the end of the file for the last object). Negative when objects
    /// overlap.
    pub gap: i64,
}

impl fmt::Display for ObjectLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Object {}: {}\t{}\t{}",
            self.index + 1,
            self.offset,
            self.length,
            self.gap
        )
    }
}

/// A parsed SFD container.
///
/// The raw bytes are kept alongside the table and never mutated; patching
/// works on a copy (see [`crate::patch`]).
#[derive(Debug, Clone)]
pub struct Container {
    raw: Vec<u8>,
    object_count: u32,
    entries: Vec<ObjectEntry>,
}

impl Container {
    /// Read and parse a container from disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::parse(read_file(path.as_ref())?)
    }

    /// Parse a container from its full file contents.
    ///
    /// Fails with [`Error::TableOverrun`] if the declared table does not fit
    /// in the buffer and [`Error::TruncatedTable`] if any entry points past
    /// the end of the buffer.
    pub fn parse(raw: Vec<u8>) -> Result<Self> {
        let buffer_len = raw.len();
        let object_count = read_u32_be(&raw, OBJECT_COUNT_OFFSET)?;

        let table_end = (object_count as usize)
            .checked_mul(TABLE_ENTRY_SIZE)
            .and_then(|size| size.checked_add(TABLE_OFFSET));
        if table_end.map_or(true, |end| end > buffer_len) {
            return Err(Error::TableOverrun {
                object_count,
                buffer_len,
            });
        }

        let mut cursor = ByteCursor::new_at(&raw, TABLE_OFFSET);
        let mut entries = Vec::with_capacity(object_count as usize);

        for entry in 0..object_count as usize {
            let offset = cursor.read_u32()?;
            let length = cursor.read_u32()?;

            let object = ObjectEntry { offset, length };
            if object.end() > buffer_len {
                return Err(Error::TruncatedTable {
                    entry,
                    offset,
                    length,
                    buffer_len,
                });
            }
            entries.push(object);
        }

        Ok(Self {
            raw,
            object_count,
            entries,
        })
    }

    /// The full, unmodified file contents.
    #[inline]
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// The four magic bytes at the start of the file.
    pub fn magic(&self) -> [u8; 4] {
        let mut magic = [0u8; 4];
        magic.copy_from_slice(&self.raw[..4]);
        magic
    }

    /// Check whether the file starts with `"SFD "`.
    ///
    /// Parsing never requires this; it is only reported to the user.
    pub fn has_sfd_magic(&self) -> bool {
        &self.magic() == SFD_MAGIC
    }

    /// Number of objects declared in the header.
    #[inline]
    pub fn object_count(&self) -> u32 {
        self.object_count
    }

    /// The object table.
    #[inline]
    pub fn entries(&self) -> &[ObjectEntry] {
        &self.entries
    }

    /// Bytes of the object at `index`.
    pub fn object(&self, index: usize) -> Option<&[u8]> {
        let entry = self.entries.get(index)?;
        self.raw.get(entry.offset as usize..entry.end())
    }

    /// Iterate over every object's bytes in table order.
    pub fn objects(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.entries
            .iter()
            .map(move |entry| &self.raw[entry.offset as usize..entry.end()])
    }

    /// Compute the gap after each object.
    ///
    /// Gaps are informational; nothing checks that they are non-negative.
    pub fn layout(&self) -> Vec<ObjectLayout> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let next_start = self
                    .entries
                    .get(index + 1)
                    .map_or(self.raw.len() as i64, |next| next.offset as i64);
                ObjectLayout {
                    index,
                    offset: entry.offset,
                    length: entry.length,
                    gap: next_start - entry.end() as i64,
                }
            })
            .collect()
    }
}
