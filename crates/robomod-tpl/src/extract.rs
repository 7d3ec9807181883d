//! Pointer chasing from a model to its embedded texture.
//!
//! All offsets below were worked out by comparing shipped models; none of
//! them come from documentation. Stored pointers are relative to the end of
//! a 64-byte model header, hence [`POINTER_BIAS`] on almost every hop.

use std::fmt;
use std::str::FromStr;

use robomod_common::{read_u32_be, ByteCursor};
use tracing::debug;
use zerocopy::IntoBytes;

use crate::header::TplHeader;
use crate::{Error, Result, TPL_EXTENSION};

/// Added to stored pointers to turn them into file offsets.
const POINTER_BIAS: usize = 64;

/// Header word holding the pointer table location.
const POINTER_TABLE_FIELD: usize = 24;

/// Header word pointing at the image end pointer, for plain and robo models.
const IMAGE_END_FIELD: usize = 8;

/// Robo pointer tables have one extra leading word pair.
const ROBO_POINTER_ADJUST: usize = 8;

/// Weapon pointer tables sit a further 64 bytes in.
const WEAPON_POINTER_ADJUST: usize = 64 + 8;

/// Weapons keep the image end pointer next to the pointer table instead of
/// in the header.
const WEAPON_IMAGE_END_ADJUST: usize = 36;

/// Offsets of the copied fields inside the image header.
const IMAGE_LENGTH_OFFSET: usize = 4;

/// Kind of model, which decides where the pointer chain starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ModelCategory {
    /// Pods, stages and anything else without a special layout.
    #[default]
    Plain,
    /// Playable robo bodies.
    Robo,
    /// Guns, bombs and pods carried by a robo.
    Weapon,
}

impl ModelCategory {
    /// All categories, in CLI order.
    pub const ALL: [Self; 3] = [Self::Plain, Self::Robo, Self::Weapon];

    /// Lowercase name of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Robo => "robo",
            Self::Weapon => "weapon",
        }
    }

    /// Offset of the texture pointer inside the model.
    fn pointers_index(&self, model: &[u8]) -> Result<usize> {
        let table = read_u32_be(model, POINTER_TABLE_FIELD)? as usize;
        Ok(match self {
            Self::Plain => table,
            Self::Robo => table + ROBO_POINTER_ADJUST,
            Self::Weapon => table + WEAPON_POINTER_ADJUST,
        })
    }

    /// Offset of the image end pointer inside the model.
    fn image_end_pointer(&self, model: &[u8]) -> Result<usize> {
        Ok(match self {
            Self::Plain | Self::Robo => read_u32_be(model, IMAGE_END_FIELD)? as usize + POINTER_BIAS,
            Self::Weapon => read_u32_be(model, POINTER_TABLE_FIELD)? as usize + WEAPON_IMAGE_END_ADJUST,
        })
    }
}

impl fmt::Display for ModelCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "plain" => Ok(Self::Plain),
            "robo" => Ok(Self::Robo),
            "weapon" => Ok(Self::Weapon),
            _ => Err(Error::UnknownCategory(s.to_string())),
        }
    }
}

/// A texture found inside a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureRecord {
    /// Image height.
    pub length: u16,
    /// Image width.
    pub width: u16,
    /// GameCube texture format word, copied as-is.
    pub encoding: [u8; 4],
    /// Encoded pixel data.
    pub pixel_bytes: Vec<u8>,
}

impl TextureRecord {
    /// Follow the pointer chain for `category` and copy out the texture.
    pub fn extract(model: &[u8], category: ModelCategory) -> Result<Self> {
        let pointers_index = category.pointers_index(model)?;
        let img_header_index = read_u32_be(model, pointers_index)? as usize + POINTER_BIAS;

        let mut cursor = ByteCursor::new_at(model, img_header_index + IMAGE_LENGTH_OFFSET);
        let length = cursor.read_u16()?;
        let width = cursor.read_u16()?;
        let encoding = cursor.read_array::<4>()?;

        let image_index = read_u32_be(model, img_header_index)? as usize + POINTER_BIAS;
        let image_end_pointer = category.image_end_pointer(model)?;
        let image_end_index = read_u32_be(model, image_end_pointer)? as usize + POINTER_BIAS;

        debug!(
            %category,
            pointers_index,
            img_header_index,
            image_index,
            image_end_index,
            "texture pointer chain"
        );

        let pixel_bytes = model
            .get(image_index..image_end_index)
            .ok_or(Error::PixelRange {
                start: image_index,
                end: image_end_index,
                len: model.len(),
            })?
            .to_vec();

        Ok(Self {
            length,
            width,
            encoding,
            pixel_bytes,
        })
    }

    /// The TPL header for this texture.
    pub fn header(&self) -> TplHeader {
        TplHeader::new(self.length, self.width, self.encoding)
    }

    /// Serialize as a complete TPL file.
    pub fn to_tpl_bytes(&self) -> Vec<u8> {
        let mut output = Vec::with_capacity(TplHeader::SIZE + self.pixel_bytes.len());
        output.extend_from_slice(self.header().as_bytes());
        output.extend_from_slice(&self.pixel_bytes);
        output
    }
}

/// Extract the texture of `model` as TPL file bytes.
pub fn extract_texture(model: &[u8], category: ModelCategory) -> Result<Vec<u8>> {
    TextureRecord::extract(model, category).map(|record| record.to_tpl_bytes())
}

/// Output file name for the texture of the model file `model_name`.
///
/// `"ray_mk2.bin"` becomes `"ray_mk2 Texture.tpl"`.
pub fn texture_file_name(model_name: &str) -> String {
    let stem = std::path::Path::new(model_name)
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    format!("{} Texture{}", stem, TPL_EXTENSION)
}
