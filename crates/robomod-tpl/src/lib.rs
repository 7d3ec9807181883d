//! TPL texture extraction for Custom Robo models.
//!
//! Each model carries one embedded texture. Its location is not stored
//! directly: it is reached through a short chain of big-endian pointers whose
//! first step depends on the kind of model (plain, robo or weapon). The pixel
//! data is copied out unchanged and wrapped in a TPL header so standard
//! GameCube texture tools can open it.
//!
//! # Example
//!
//! ```no_run
//! use robomod_tpl::{extract_texture, texture_file_name, ModelCategory};
//!
//! let model = std::fs::read("models/ray_mk2.bin")?;
//! let tpl = extract_texture(&model, ModelCategory::Robo)?;
//! std::fs::write(texture_file_name("ray_mk2.bin"), tpl)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod extract;
mod header;

pub use error::{Error, Result};
pub use extract::{extract_texture, texture_file_name, ModelCategory, TextureRecord};
pub use header::TplHeader;

/// File extension of extracted textures.
pub const TPL_EXTENSION: &str = ".tpl";
