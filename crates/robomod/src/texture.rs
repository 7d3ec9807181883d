//! Batch texture extraction.

use rayon::prelude::*;
use robomod_tpl::{extract_texture, texture_file_name, ModelCategory, TPL_EXTENSION};
use tracing::warn;

use crate::{AssetPool, OutputDir, Result};

/// What happened to one model.
#[derive(Debug)]
pub struct TextureOutcome {
    /// Model file name.
    pub model: String,
    /// Name of the written TPL file, or why extraction failed.
    pub result: Result<String>,
}

/// Extract the texture of each named model and write it as a TPL file.
///
/// Every model is extracted independently; a bad pointer in one does not
/// stop the others.
pub fn extract_textures(
    models: &[String],
    category: ModelCategory,
    pool: &AssetPool,
    output: &OutputDir,
) -> Vec<TextureOutcome> {
    models
        .par_iter()
        .map(|model| {
            let result = extract_one(model, category, pool, output);
            if let Err(e) = &result {
                warn!(model = model.as_str(), %category, error = %e, "texture extraction failed");
            }
            TextureOutcome {
                model: model.clone(),
                result,
            }
        })
        .collect()
}

fn extract_one(
    model: &str,
    category: ModelCategory,
    pool: &AssetPool,
    output: &OutputDir,
) -> Result<String> {
    let asset = pool.load(model)?;
    let tpl = extract_texture(asset.bytes(), category)?;
    output.write(&tpl, &texture_file_name(model), TPL_EXTENSION)
}
