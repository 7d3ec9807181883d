//! Splicing replacement models into a container.

use tracing::{debug, warn};

use crate::locate::find_all;
use crate::{Error, ModelAsset, Result};

/// One requested swap: every occurrence of `target` becomes `replacement`.
#[derive(Debug, Clone)]
pub struct SwapPair {
    /// Model searched for in the container; its header gives the slot length.
    pub target: ModelAsset,
    /// Model written over each occurrence of the target.
    pub replacement: ModelAsset,
}

impl SwapPair {
    /// Pair a target with its replacement.
    pub fn new(target: ModelAsset, replacement: ModelAsset) -> Self {
        Self {
            target,
            replacement,
        }
    }

    /// Check that the replacement fits in the target's declared slot.
    pub fn check_size(&self) -> Result<u32> {
        let slot_length = self.target.slot_length()?;
        if self.replacement.len() > slot_length as usize {
            return Err(Error::SizeViolation {
                target: self.target.name().to_string(),
                replacement: self.replacement.name().to_string(),
                slot_length,
                replacement_len: self.replacement.len(),
            });
        }
        Ok(slot_length)
    }
}

/// Check every pair before any patching starts.
///
/// Returns the first pair that violates the size rule.
pub fn check_sizes(pairs: &[SwapPair]) -> Result<()> {
    for pair in pairs {
        pair.check_size()?;
    }
    Ok(())
}

/// A container copy with replacements applied.
#[derive(Debug, Clone)]
pub struct PatchedContainer {
    bytes: Vec<u8>,
    matches: Vec<usize>,
}

impl PatchedContainer {
    /// The patched bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of occurrences patched for each pair, in pair order.
    #[inline]
    pub fn matches(&self) -> &[usize] {
        &self.matches
    }

    /// Total number of occurrences patched.
    pub fn total_matches(&self) -> usize {
        self.matches.iter().sum()
    }
}

/// Apply `pairs` in order to a copy of `container`.
///
/// Every pair is size-checked first; on [`Error::SizeViolation`] nothing is
/// written. Each pair then searches the buffer left by the previous pair, so
/// overlapping targets are patched in caller order.
///
/// For each match, the replacement is written at the match offset and the
/// rest of the target's slot is zero-filled. A target with no match leaves
/// the buffer unchanged.
pub fn patch(container: &[u8], pairs: &[SwapPair]) -> Result<PatchedContainer> {
    let slot_lengths = pairs
        .iter()
        .map(SwapPair::check_size)
        .collect::<Result<Vec<u32>>>()?;

    let mut buffer = container.to_vec();
    let mut matches = Vec::with_capacity(pairs.len());

    for (pair, &slot_length) in pairs.iter().zip(&slot_lengths) {
        let offsets = find_all(&buffer, pair.target.bytes());
        debug!(
            target_model = pair.target.name(),
            replacement = pair.replacement.name(),
            slot_length,
            count = offsets.len(),
            "patching model"
        );

        for &offset in &offsets {
            splice(&mut buffer, offset, pair, slot_length as usize)?;
        }
        matches.push(offsets.len());
    }

    Ok(PatchedContainer {
        bytes: buffer,
        matches,
    })
}

/// Write one replacement at `offset` and zero the remainder of its slot.
fn splice(buffer: &mut [u8], offset: usize, pair: &SwapPair, slot_length: usize) -> Result<()> {
    let replacement = pair.replacement.bytes();
    let written_end = offset + replacement.len();
    if written_end > buffer.len() {
        return Err(Error::SlotOverflow {
            replacement: pair.replacement.name().to_string(),
            offset,
            needed: replacement.len(),
            buffer_len: buffer.len(),
        });
    }
    buffer[offset..written_end].copy_from_slice(replacement);

    let slot_end = offset + slot_length;
    if slot_end > buffer.len() {
        warn!(
            target_model = pair.target.name(),
            offset,
            slot_end,
            buffer_len = buffer.len(),
            "slot runs past end of container, zero-fill clamped"
        );
    }
    let fill_end = slot_end.min(buffer.len());
    if fill_end > written_end {
        buffer[written_end..fill_end].fill(0);
    }

    Ok(())
}
