//! Locating models inside a container by their raw bytes.

use robomod_common::search::find_pattern_from;
use tracing::debug;

/// Bytes skipped past the end of a match before searching again.
///
/// Model records carry header words that echo their own payload, so a hit
/// right after a real match is almost always one of those echoes. The value
/// was found empirically on the shipped containers; changing it causes
/// double-patching or missed models.
pub const MATCH_SKIP: usize = 128;

/// Find every start offset of `needle` in `haystack`, left to right.
///
/// After a match at `p` the search resumes at `p + needle.len() + MATCH_SKIP`,
/// so no two returned offsets are closer than that. An empty needle matches
/// nothing.
pub fn find_all(haystack: &[u8], needle: &[u8]) -> Vec<usize> {
    let mut found = Vec::new();
    if needle.is_empty() {
        return found;
    }

    let mut start = 0;
    while let Some(pos) = find_pattern_from(needle, haystack, start) {
        debug!(offset = pos, len = needle.len(), "model match");
        found.push(pos);
        start = pos + needle.len() + MATCH_SKIP;
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(len: usize, seed: u8) -> Vec<u8> {
        (0..len).map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed)).collect()
    }

    #[test]
    fn test_no_match() {
        let haystack = vec![0u8; 1024];
        assert!(find_all(&haystack, &model(16, 1)).is_empty());
    }

    #[test]
    fn test_empty_needle() {
        assert!(find_all(b"anything", b"").is_empty());
    }

    #[test]
    fn test_finds_separated_matches() {
        let needle = model(20, 7);
        let mut haystack = vec![0u8; 4096];
        haystack[100..120].copy_from_slice(&needle);
        haystack[1000..1020].copy_from_slice(&needle);
        haystack[4076..4096].copy_from_slice(&needle);

        assert_eq!(find_all(&haystack, &needle), vec![100, 1000, 4076]);
    }

    #[test]
    fn test_skips_echo_inside_window() {
        let needle = model(20, 3);
        let mut haystack = vec![0u8; 1024];
        haystack[0..20].copy_from_slice(&needle);
        // inside 20 + 128 of the first match
        haystack[147..167].copy_from_slice(&needle);
        // first position allowed again
        haystack[400..420].copy_from_slice(&needle);

        assert_eq!(find_all(&haystack, &needle), vec![0, 400]);
    }

    #[test]
    fn test_match_exactly_at_resume_point() {
        let needle = model(8, 9);
        let mut haystack = vec![0u8; 512];
        haystack[10..18].copy_from_slice(&needle);
        let resume = 10 + 8 + MATCH_SKIP;
        haystack[resume..resume + 8].copy_from_slice(&needle);

        assert_eq!(find_all(&haystack, &needle), vec![10, resume]);
    }

    #[test]
    fn test_skip_invariant() {
        let needle = [0xAAu8; 4];
        let haystack = vec![0xAAu8; 2000];
        let found = find_all(&haystack, &needle);

        assert!(!found.is_empty());
        for pair in found.windows(2) {
            assert!(pair[1] >= pair[0] + needle.len() + MATCH_SKIP);
        }
    }

    #[test]
    fn test_resume_past_end_terminates() {
        let needle = model(16, 2);
        let mut haystack = vec![0u8; 64];
        haystack[40..56].copy_from_slice(&needle);

        assert_eq!(find_all(&haystack, &needle), vec![40]);
    }
}
