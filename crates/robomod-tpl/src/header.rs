//! TPL header template.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Fixed bytes before the image dimensions.
///
/// TPL magic `0x0020AF30`, one image, image table at `0x0C`, image header at
/// `0x14`, no palette.
const PREFIX: [u8; 20] = [
    0x00, 0x20, 0xAF, 0x30, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x0C, 0x00, 0x00, 0x00,
    0x14, 0x00, 0x00, 0x00, 0x00,
];

/// Fixed bytes after the encoding: data offset `0x40`, wrap and filter
/// settings, then zero padding up to the data offset.
const SUFFIX: [u8; 36] = [
    0x00, 0x00, 0x00, 0x40, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x01, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// Single-image TPL header.
///
/// Only the dimensions and encoding vary; everything else is a constant
/// template that the game's texture tools expect byte for byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct TplHeader {
    prefix: [u8; 20],
    /// Image height, big-endian, copied from the model.
    pub length: [u8; 2],
    /// Image width, big-endian, copied from the model.
    pub width: [u8; 2],
    /// Image format word, copied from the model.
    pub encoding: [u8; 4],
    suffix: [u8; 36],
}

impl TplHeader {
    /// Header size; pixel data starts right after it.
    pub const SIZE: usize = 64;

    /// Build a header around the three copied fields.
    pub fn new(length: u16, width: u16, encoding: [u8; 4]) -> Self {
        Self {
            prefix: PREFIX,
            length: length.to_be_bytes(),
            width: width.to_be_bytes(),
            encoding,
            suffix: SUFFIX,
        }
    }
}
