//! SFD container handling for Custom Robo archives.
//!
//! SFD files (`"SFD "` in the first four bytes, usually shipped as `.BIN`)
//! bundle many model objects behind a small object table:
//!
//! ```text
//! 0x00  magic         [u8; 4]   "SFD " (not enforced)
//! 0x04  object_count  u32 BE
//! 0x08  offset_0      u32 BE
//! 0x0C  length_0      u32 BE
//! ...   (offset, length) repeated object_count times
//! ```
//!
//! The first object usually starts at `0x8000`.
//!
//! Patching deliberately ignores the table. The same model appears in several
//! containers at different offsets, so [`find_all`] locates a model by its raw
//! bytes and [`patch`] overwrites every occurrence in place.
//!
//! # Example
//!
//! ```no_run
//! use robomod_sfd::{patch, Container, ModelAsset, SwapPair};
//!
//! let container = Container::open("source_files/rpg_t_models.BIN")?;
//! let pair = SwapPair::new(
//!     ModelAsset::open("models/ray_mk2.bin")?,
//!     ModelAsset::open("models/metal_ape.bin")?,
//! );
//!
//! let patched = patch(container.raw(), &[pair])?;
//! std::fs::write("rpg_t_models.BIN", patched.as_bytes())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod asset;
mod container;
mod error;
mod locate;
mod patch;

pub use asset::ModelAsset;
pub use container::{Container, ObjectEntry, ObjectLayout};
pub use error::{Error, Result};
pub use locate::{find_all, MATCH_SKIP};
pub use patch::{check_sizes, patch, PatchedContainer, SwapPair};

/// SFD file magic bytes ("SFD ").
pub const SFD_MAGIC: &[u8; 4] = b"SFD ";
