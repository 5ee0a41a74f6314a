//! Span-to-word geometry estimation.
//!
//! PDF text is exposed as spans of several words, not as individual word
//! boxes. Word boxes are estimated by partitioning the span box evenly per
//! character: a word covers `len(word)` character cells starting at the
//! character offset where the word first appears in the span text.
//!
//! The offset lookup uses the *first occurrence* of the word inside the span
//! rather than a running cursor, so a word repeated within one span maps
//! every repetition onto the first one. Highlights of the later repetitions
//! land on the first copy.

use crate::italic::is_italic;
use crate::types::{BBox, Span, StructuredPage, WordRecord};

/// Split a span into [`WordRecord`]s with estimated bounding boxes.
///
/// Returns an empty vector for spans whose trimmed text is empty.
pub fn estimate_words(span: &Span) -> Vec<WordRecord> {
    let text = span.text.trim();
    let len = text.chars().count();
    if len == 0 {
        return Vec::new();
    }

    let char_width = span.bbox.width() / len as f32;
    let italic = is_italic(&span.font_name);

    text.split_whitespace()
        .map(|word| {
            let offset = first_char_offset(text, word);
            let start = span.bbox.x0 + offset as f32 * char_width;
            let end = start + word.chars().count() as f32 * char_width;
            WordRecord {
                text: word.to_string(),
                bbox: BBox::new(start, span.bbox.y0, end, span.bbox.y1),
                block_number: span.block_number,
                is_italic: italic,
            }
        })
        .collect()
}

/// Estimate words for every span on a page, in span order.
pub fn estimate_page_words(page: &StructuredPage) -> Vec<WordRecord> {
    page.spans().flat_map(estimate_words).collect()
}

/// Character (not byte) offset of the first occurrence of `word` in `text`.
fn first_char_offset(text: &str, word: &str) -> usize {
    text.find(word)
        .map(|byte| text[..byte].chars().count())
        .unwrap_or(0)
}
