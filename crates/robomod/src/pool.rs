//! The local pool of model files.

use std::path::{Path, PathBuf};

use robomod_sfd::ModelAsset;
use walkdir::WalkDir;

use crate::{Error, Result};

/// A directory of model files. A model's file name is its only identity.
#[derive(Debug, Clone)]
pub struct AssetPool {
    root: PathBuf,
    names: Vec<String>,
}

impl AssetPool {
    /// Scan `root` for model files (top level only, sorted by name).
    pub fn open<P: Into<PathBuf>>(root: P) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(Error::FileNotFound(root));
        }

        let mut names = Vec::new();
        for entry in WalkDir::new(&root).min_depth(1).max_depth(1) {
            let entry = entry.map_err(std::io::Error::from)?;
            if entry.file_type().is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();

        Ok(Self { root, names })
    }

    /// The pool directory.
    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Sorted model file names.
    #[inline]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Names matching a glob pattern such as `"*mk2*"`.
    pub fn matching(&self, pattern: &str) -> Result<Vec<&str>> {
        let pattern = glob::Pattern::new(pattern)?;
        Ok(self
            .names
            .iter()
            .map(String::as_str)
            .filter(|name| pattern.matches(name))
            .collect())
    }

    /// Path of a model in the pool.
    pub fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Load a model by name.
    pub fn load(&self, name: &str) -> Result<ModelAsset> {
        Ok(ModelAsset::open(self.path(name))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn pool_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("ray_mk2.bin"), [0u8; 8]).unwrap();
        fs::write(dir.path().join("metal_ape.bin"), [1u8; 8]).unwrap();
        fs::write(dir.path().join("ray_mk3.bin"), [2u8; 8]).unwrap();
        fs::create_dir(dir.path().join("backup")).unwrap();
        dir
    }

    #[test]
    fn test_names_sorted_files_only() {
        let dir = pool_dir();
        let pool = AssetPool::open(dir.path()).unwrap();

        assert_eq!(pool.names(), &["metal_ape.bin", "ray_mk2.bin", "ray_mk3.bin"]);
    }

    #[test]
    fn test_matching() {
        let dir = pool_dir();
        let pool = AssetPool::open(dir.path()).unwrap();

        assert_eq!(pool.matching("ray_*").unwrap(), vec!["ray_mk2.bin", "ray_mk3.bin"]);
        assert!(pool.matching("[").is_err());
    }

    #[test]
    fn test_load() {
        let dir = pool_dir();
        let pool = AssetPool::open(dir.path()).unwrap();

        assert_eq!(pool.load("metal_ape.bin").unwrap().bytes(), &[1u8; 8]);
        assert!(matches!(
            pool.load("missing.bin"),
            Err(Error::Sfd(robomod_sfd::Error::FileNotFound(_)))
        ));
    }

    #[test]
    fn test_missing_pool() {
        assert!(matches!(
            AssetPool::open("no/such/models"),
            Err(Error::FileNotFound(_))
        ));
    }
}
