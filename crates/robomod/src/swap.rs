//! Batch model swapping across containers.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use robomod_sfd::{check_sizes, patch, SwapPair};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{AssetPool, Error, OutputDir, Result};

/// Containers patched when a request does not name any.
pub const DEFAULT_CONTAINERS: [&str; 2] = ["rpg_t_models.BIN", "rpg_f_models.BIN"];

/// One selected swap, by pool file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairRequest {
    pub target: String,
    pub replacement: String,
}

/// An ordered, immutable swap selection.
///
/// Plan files use the same shape:
///
/// ```json
/// {
///   "containers": ["rpg_t_models.BIN"],
///   "pairs": [{ "target": "ray_mk2.bin", "replacement": "metal_ape.bin" }]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapRequest {
    #[serde(default = "default_containers")]
    containers: Vec<String>,
    pairs: Vec<PairRequest>,
}

fn default_containers() -> Vec<String> {
    DEFAULT_CONTAINERS.iter().map(|s| s.to_string()).collect()
}

impl SwapRequest {
    /// Build a request from explicit pairs. An empty container list means
    /// [`DEFAULT_CONTAINERS`].
    pub fn new(containers: Vec<String>, pairs: Vec<PairRequest>) -> Result<Self> {
        Self {
            containers,
            pairs,
        }
        .validated()
    }

    /// Build a request from two parallel lists, as a selection screen
    /// collects them.
    pub fn from_lists(
        containers: Vec<String>,
        targets: Vec<String>,
        replacements: Vec<String>,
    ) -> Result<Self> {
        if targets.len() != replacements.len() {
            return Err(Error::UnbalancedSelection {
                targets: targets.len(),
                replacements: replacements.len(),
            });
        }

        let pairs = targets
            .into_iter()
            .zip(replacements)
            .map(|(target, replacement)| PairRequest {
                target,
                replacement,
            })
            .collect();
        Self::new(containers, pairs)
    }

    /// Parse a JSON plan.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str::<Self>(json)?.validated()
    }

    /// Load a JSON plan file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| not_found(e, path))?;
        Self::from_json(&json)
    }

    fn validated(mut self) -> Result<Self> {
        if self.pairs.is_empty() {
            return Err(Error::EmptySelection);
        }
        if self.containers.is_empty() {
            self.containers = default_containers();
        }
        Ok(self)
    }

    /// Container file names, in processing order.
    #[inline]
    pub fn containers(&self) -> &[String] {
        &self.containers
    }

    /// Selected pairs, in application order.
    #[inline]
    pub fn pairs(&self) -> &[PairRequest] {
        &self.pairs
    }

    /// Load every model and check every size before anything is patched.
    pub fn resolve(&self, pool: &AssetPool) -> Result<Vec<SwapPair>> {
        let pairs = self
            .pairs
            .iter()
            .map(|pair| -> Result<SwapPair> {
                Ok(SwapPair::new(
                    pool.load(&pair.target)?,
                    pool.load(&pair.replacement)?,
                ))
            })
            .collect::<Result<Vec<_>>>()?;
        check_sizes(&pairs)?;
        Ok(pairs)
    }
}

/// What happened to one container.
#[derive(Debug)]
pub struct ContainerOutcome {
    /// Container file name.
    pub container: String,
    /// Written file and match counts, or why this container failed.
    pub result: Result<SwapReport>,
}

/// A successfully patched container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapReport {
    /// Name of the file written to the output directory.
    pub written: String,
    /// Occurrences patched per pair, in pair order.
    pub matches: Vec<usize>,
}

/// Patch every container in `request` and write the results.
///
/// The selection is resolved and size-checked first; if any pair is invalid
/// nothing is read or written and the error is returned. After that each
/// container succeeds or fails on its own.
pub fn run_swap<P: AsRef<Path>>(
    request: &SwapRequest,
    source_dir: P,
    pool: &AssetPool,
    output: &OutputDir,
) -> Result<Vec<ContainerOutcome>> {
    let pairs = request.resolve(pool)?;
    let source_dir = source_dir.as_ref();

    Ok(request
        .containers
        .par_iter()
        .map(|container| {
            let result = swap_container(&source_dir.join(container), container, &pairs, output);
            match &result {
                Ok(report) => info!(
                    container = container.as_str(),
                    written = %report.written,
                    "container patched"
                ),
                Err(e) => warn!(container = container.as_str(), error = %e, "container failed"),
            }
            ContainerOutcome {
                container: container.clone(),
                result,
            }
        })
        .collect())
}

fn swap_container(
    path: &Path,
    name: &str,
    pairs: &[SwapPair],
    output: &OutputDir,
) -> Result<SwapReport> {
    let raw = fs::read(path).map_err(|e| not_found(e, path))?;
    let patched = patch(&raw, pairs)?;

    for (pair, count) in pairs.iter().zip(patched.matches()) {
        if *count == 0 {
            warn!(
                container = name,
                model = pair.target.name(),
                "target model not found in container"
            );
        }
    }

    let written = output.write(patched.as_bytes(), name, &extension_of(name))?;
    Ok(SwapReport {
        written,
        matches: patched.matches().to_vec(),
    })
}

/// `".BIN"` for `"rpg_t_models.BIN"`, empty when there is no extension.
fn extension_of(name: &str) -> String {
    Path::new(name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

fn not_found(e: io::Error, path: &Path) -> Error {
    match e.kind() {
        io::ErrorKind::NotFound => Error::FileNotFound(PathBuf::from(path)),
        _ => Error::Io(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A model whose header declares `slot` and whose body is unique to `seed`.
    fn model_bytes(len: usize, slot: u32, seed: u8) -> Vec<u8> {
        let mut bytes: Vec<u8> = (0..len).map(|i| (i as u8).wrapping_add(seed) | 0x80).collect();
        bytes[4..8].copy_from_slice(&slot.to_be_bytes());
        bytes
    }

    struct Fixture {
        _dir: tempfile::TempDir,
        sources: PathBuf,
        pool: AssetPool,
        output: OutputDir,
        target: Vec<u8>,
        replacement: Vec<u8>,
    }

    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let sources = dir.path().join("source_files");
        let models = dir.path().join("models");
        fs::create_dir_all(&sources).unwrap();
        fs::create_dir_all(&models).unwrap();

        let target = model_bytes(48, 48, 1);
        let replacement = model_bytes(32, 32, 9);
        let oversized = model_bytes(64, 64, 17);
        fs::write(models.join("ray_mk2.bin"), &target).unwrap();
        fs::write(models.join("metal_ape.bin"), &replacement).unwrap();
        fs::write(models.join("huge.bin"), &oversized).unwrap();

        let mut container = vec![0u8; 0x400];
        container[..4].copy_from_slice(b"SFD ");
        container[0x200..0x200 + 48].copy_from_slice(&target);
        fs::write(sources.join("rpg_t_models.BIN"), &container).unwrap();

        Fixture {
            pool: AssetPool::open(&models).unwrap(),
            output: OutputDir::new(dir.path().join("result_files")),
            sources,
            _dir: dir,
            target,
            replacement,
        }
    }

    #[test]
    fn test_from_lists_rejects_unbalanced() {
        let err = SwapRequest::from_lists(vec![], vec!["a".into(), "b".into()], vec!["c".into()]);
        assert!(matches!(
            err,
            Err(Error::UnbalancedSelection { targets: 2, replacements: 1 })
        ));
        assert!(matches!(
            SwapRequest::from_lists(vec![], vec![], vec![]),
            Err(Error::EmptySelection)
        ));
    }

    #[test]
    fn test_plan_defaults_containers() {
        let request =
            SwapRequest::from_json(r#"{"pairs":[{"target":"a.bin","replacement":"b.bin"}]}"#)
                .unwrap();

        assert_eq!(request.containers(), &["rpg_t_models.BIN", "rpg_f_models.BIN"]);
        assert_eq!(request.pairs()[0].replacement, "b.bin");
        assert!(matches!(SwapRequest::from_json("{"), Err(Error::Plan(_))));
    }

    #[test]
    fn test_run_swap_patches_and_reports() {
        let fx = fixture();
        let request = SwapRequest::from_lists(
            vec!["rpg_t_models.BIN".into(), "missing.BIN".into()],
            vec!["ray_mk2.bin".into()],
            vec!["metal_ape.bin".into()],
        )
        .unwrap();

        let outcomes = run_swap(&request, &fx.sources, &fx.pool, &fx.output).unwrap();

        assert_eq!(outcomes.len(), 2);
        let report = outcomes[0].result.as_ref().unwrap();
        assert_eq!(report.written, "rpg_t_models.BIN");
        assert_eq!(report.matches, vec![1]);
        assert!(matches!(outcomes[1].result, Err(Error::FileNotFound(_))));

        let patched = fs::read(fx.output.root().join("rpg_t_models.BIN")).unwrap();
        assert_eq!(&patched[0x200..0x220], &fx.replacement[..]);
        assert!(patched[0x220..0x230].iter().all(|&b| b == 0));
        assert_ne!(&patched[0x200..0x230], &fx.target[..]);
    }

    #[test]
    fn test_second_run_does_not_overwrite() {
        let fx = fixture();
        let request = SwapRequest::from_lists(
            vec!["rpg_t_models.BIN".into()],
            vec!["ray_mk2.bin".into()],
            vec!["metal_ape.bin".into()],
        )
        .unwrap();

        run_swap(&request, &fx.sources, &fx.pool, &fx.output).unwrap();
        let outcomes = run_swap(&request, &fx.sources, &fx.pool, &fx.output).unwrap();

        assert_eq!(
            outcomes[0].result.as_ref().unwrap().written,
            "rpg_t_models(1).BIN"
        );
    }

    #[test]
    fn test_size_violation_writes_nothing() {
        let fx = fixture();
        let request = SwapRequest::from_lists(
            vec!["rpg_t_models.BIN".into()],
            vec!["ray_mk2.bin".into()],
            vec!["huge.bin".into()],
        )
        .unwrap();

        let result = run_swap(&request, &fx.sources, &fx.pool, &fx.output);

        assert!(matches!(
            result,
            Err(Error::Sfd(robomod_sfd::Error::SizeViolation { .. }))
        ));
        assert!(!fx.output.root().exists());
    }

    #[test]
    fn test_slot_overflow_leaves_source_and_output_untouched() {
        let fx = fixture();
        // 32-byte model declaring a 96-byte slot, stored at the very end
        let tail = model_bytes(32, 96, 33);
        let long = model_bytes(64, 64, 65);
        fs::write(fx.pool.root().join("tail.bin"), &tail).unwrap();
        fs::write(fx.pool.root().join("long.bin"), &long).unwrap();

        let mut container = vec![0u8; 0x200];
        container[0x1E0..].copy_from_slice(&tail);
        let source = fx.sources.join("tail.BIN");
        fs::write(&source, &container).unwrap();

        let request = SwapRequest::from_lists(
            vec!["tail.BIN".into()],
            vec!["tail.bin".into()],
            vec!["long.bin".into()],
        )
        .unwrap();
        let outcomes = run_swap(&request, &fx.sources, &fx.pool, &fx.output).unwrap();

        assert!(matches!(
            outcomes[0].result,
            Err(Error::Sfd(robomod_sfd::Error::SlotOverflow { offset: 0x1E0, .. }))
        ));
        assert_eq!(fs::read(&source).unwrap(), container);
        assert!(!fx.output.root().exists());
    }

    #[test]
    fn test_container_name_with_path_fails_alone() {
        let fx = fixture();
        fs::create_dir(fx.sources.join("sub")).unwrap();
        fs::copy(
            fx.sources.join("rpg_t_models.BIN"),
            fx.sources.join("sub").join("rpg_t_models.BIN"),
        )
        .unwrap();
        let request = SwapRequest::from_lists(
            vec!["sub/rpg_t_models.BIN".into(), "rpg_t_models.BIN".into()],
            vec!["ray_mk2.bin".into()],
            vec!["metal_ape.bin".into()],
        )
        .unwrap();

        let outcomes = run_swap(&request, &fx.sources, &fx.pool, &fx.output).unwrap();

        assert!(matches!(outcomes[0].result, Err(Error::InvalidOutputName(_))));
        assert_eq!(
            outcomes[1].result.as_ref().unwrap().written,
            "rpg_t_models.BIN"
        );
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("rpg_t_models.BIN"), ".BIN");
        assert_eq!(extension_of("archive"), "");
    }
}
