//! Italic classification and the words-of-interest filter.

use std::collections::HashSet;

/// Font-name fragments that mark a face as italic. Matching is case-sensitive.
const ITALIC_MARKERS: [&str; 2] = ["Italic", "LightIt"];

/// Returns `true` when the declared font name looks like an italic face.
///
/// This is a name-pattern check only; font descriptor flags are not
/// consulted. Empty names are never italic.
pub fn is_italic(font_name: &str) -> bool {
    ITALIC_MARKERS
        .iter()
        .any(|marker| font_name.contains(marker))
}

/// Case-insensitive allow-list of italic words that deserve a blue highlight.
///
/// An empty filter disables italic highlighting altogether.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItalicFilter {
    words: HashSet<String>,
}

impl ItalicFilter {
    /// Build a filter from caller-supplied words. Blank entries are ignored.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        ItalicFilter { words }
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn contains(&self, word: &str) -> bool {
        !self.words.is_empty() && self.words.contains(&word.to_lowercase())
    }
}
