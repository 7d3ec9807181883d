//! Collision-free output file writing.

use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::{Error, Result};

/// A directory that results are written into.
///
/// Existing files are never overwritten. If `name.BIN` is taken the file is
/// written as `name(1).BIN`, then `name(2).BIN`, and so on, using the smallest
/// free number in the directory as it is right now.
#[derive(Debug, Clone)]
pub struct OutputDir {
    root: PathBuf,
}

impl OutputDir {
    /// Use `root` as the output directory. It is created on first write.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// The output directory.
    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `bytes` under `desired_name`, returning the name actually used.
    ///
    /// `extension` includes the dot (`".BIN"`) and is what the `(N)` suffix
    /// is inserted in front of. `desired_name` must be a bare file name.
    pub fn write(&self, bytes: &[u8], desired_name: &str, extension: &str) -> Result<String> {
        check_file_name(desired_name)?;
        fs::create_dir_all(&self.root)?;

        let existing = self.existing_names()?;
        let free = candidates(desired_name, extension).filter(|name| !existing.contains(name));
        self.create_first(bytes, free)
    }

    /// The name [`write`](Self::write) would use for `desired_name` now.
    pub fn available_name(&self, desired_name: &str, extension: &str) -> Result<String> {
        check_file_name(desired_name)?;
        let existing = self.existing_names()?;
        Ok(candidates(desired_name, extension)
            .find(|name| !existing.contains(name))
            .unwrap_or_default())
    }

    /// Create the first name in `names` that is not taken on disk.
    ///
    /// The directory scan can miss names that still collide, e.g. on a
    /// case-insensitive filesystem or when another writer got there first,
    /// so a taken name moves on to the next candidate.
    fn create_first(&self, bytes: &[u8], names: impl Iterator<Item = String>) -> Result<String> {
        for name in names {
            let path = self.root.join(&name);
            let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => file,
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            };
            file.write_all(bytes)?;

            info!(path = %path.display(), bytes = bytes.len(), "wrote output");
            return Ok(name);
        }

        Err(io::Error::new(io::ErrorKind::AlreadyExists, "no free output name").into())
    }

    fn existing_names(&self) -> Result<HashSet<String>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(HashSet::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = HashSet::new();
        for entry in entries {
            names.insert(entry?.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }
}

/// `desired_name`, then `base(1)ext`, `base(2)ext`, ...
fn candidates<'a>(desired_name: &'a str, extension: &'a str) -> impl Iterator<Item = String> + 'a {
    let base = desired_name.strip_suffix(extension).unwrap_or(desired_name);
    std::iter::once(desired_name.to_string())
        .chain((1u32..).map(move |n| format!("{}({}){}", base, n, extension)))
}

/// Reject names that would leave the output directory.
fn check_file_name(name: &str) -> Result<()> {
    let bare = !name.is_empty()
        && !name.contains(['/', '\\'])
        && name != "."
        && name != "..";
    if bare {
        Ok(())
    } else {
        Err(Error::InvalidOutputName(name.to_string()))
    }
}
