//! Cross-document word matching.
//!
//! A word counts as present in the other document when the same text occurs
//! there in a block whose number is within `tolerance` of the word's own
//! block. This is an existence check, not an alignment: matched words are not
//! consumed, one target may satisfy many sources, and horizontal position is
//! ignored. The scan is linear in the other document's word count, which is
//! fine at per-page scale.

use crate::types::WordRecord;

/// Default allowed block-number difference.
pub const DEFAULT_TOLERANCE: u32 = 5;

/// Returns `true` if `other_words` holds `word` (exact, case-sensitive) in a
/// block within `tolerance` of `block_number`.
pub fn find_match(
    word: &str,
    block_number: u32,
    other_words: &[WordRecord],
    tolerance: u32,
) -> bool {
    other_words
        .iter()
        .any(|w| w.block_number.abs_diff(block_number) <= tolerance && w.text == word)
}

/// Indices of words in `words` that have no match in `other_words`.
pub fn unmatched_indices(
    words: &[WordRecord],
    other_words: &[WordRecord],
    tolerance: u32,
) -> Vec<usize> {
    words
        .iter()
        .enumerate()
        .filter(|(_, w)| !find_match(&w.text, w.block_number, other_words, tolerance))
        .map(|(i, _)| i)
        .collect()
}
