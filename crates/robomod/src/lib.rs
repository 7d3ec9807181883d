//! robomod - Custom Robo model swapping and texture extraction.
//!
//! This crate ties the format crates to the filesystem: it loads containers
//! and models, runs batches where every file is its own unit of failure, and
//! writes results without ever overwriting an existing output.
//!
//! # Crates
//!
//! - [`robomod_common`] - Big-endian reading and byte search
//! - [`robomod_sfd`] - SFD container parsing, model search and patching
//! - [`robomod_tpl`] - Texture extraction to TPL
//!
//! # Example
//!
//! ```no_run
//! use robomod::prelude::*;
//!
//! let pool = AssetPool::open("models")?;
//! let output = OutputDir::new("result_files");
//! let request = SwapRequest::from_lists(
//!     vec!["rpg_t_models.BIN".into()],
//!     vec!["ray_mk2.bin".into()],
//!     vec!["metal_ape.bin".into()],
//! )?;
//!
//! for outcome in run_swap(&request, "source_files", &pool, &output)? {
//!     println!("{}: {:?}", outcome.container, outcome.result.map(|r| r.written));
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod output;
mod pool;
mod split;
mod swap;
mod texture;

// Re-export all sub-crates
pub use robomod_common as common;
pub use robomod_sfd as sfd;
pub use robomod_tpl as tpl;

pub use error::{Error, Result};
pub use output::OutputDir;
pub use pool::AssetPool;
pub use split::{split_container, SPLIT_EXTENSION};
pub use swap::{run_swap, ContainerOutcome, PairRequest, SwapReport, SwapRequest, DEFAULT_CONTAINERS};
pub use texture::{extract_textures, TextureOutcome};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        extract_textures, run_swap, split_container, AssetPool, ContainerOutcome, OutputDir,
        PairRequest, SwapRequest, TextureOutcome,
    };
    pub use robomod_common::{read_u32_be, ByteCursor};
    pub use robomod_sfd::{find_all, patch, Container, ModelAsset, ObjectLayout, SwapPair};
    pub use robomod_tpl::{extract_texture, texture_file_name, ModelCategory, TextureRecord};
}
