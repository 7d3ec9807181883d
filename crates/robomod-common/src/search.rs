//! Byte pattern searching.
//!
//! Thin wrappers over `memchr::memmem`, which already picks the best SIMD
//! routine for the running CPU.

use memchr::memmem;

/// Find the first occurrence of `needle` in `haystack`.
#[inline]
pub fn find_pattern(needle: &[u8], haystack: &[u8]) -> Option<usize> {
    memmem::find(haystack, needle)
}

/// Find the first occurrence of `needle` at or after `start`.
///
/// Returns an absolute offset into `haystack`. A `start` past the end of the
/// haystack is not an error, it simply has nothing left to search.
#[inline]
pub fn find_pattern_from(needle: &[u8], haystack: &[u8], start: usize) -> Option<usize> {
    let tail = haystack.get(start..)?;
    find_pattern(needle, tail).map(|pos| start + pos)
}
