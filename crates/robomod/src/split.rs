//! Exporting every object of a container as its own file.

use std::path::Path;

use robomod_sfd::Container;
use tracing::info;

use crate::{OutputDir, Result};

/// Extension used for split objects.
pub const SPLIT_EXTENSION: &str = ".BIN";

/// Write each object in the container's table as `Object {i}.BIN`.
///
/// Returns the names actually written, in table order.
pub fn split_container<P: AsRef<Path>>(path: P, output: &OutputDir) -> Result<Vec<String>> {
    let path = path.as_ref();
    let container = Container::open(path)?;
    info!(
        container = %path.display(),
        objects = container.object_count(),
        "splitting container"
    );

    container
        .objects()
        .enumerate()
        .map(|(i, object)| {
            output.write(object, &format!("Object {}{}", i, SPLIT_EXTENSION), SPLIT_EXTENSION)
        })
        .collect()
}
