//! Character classification for segmentation

use crate::types::TextCategory;

/// Pure character classification logic
pub trait CharacterClassifier: Send + Sync {
    /// Classify a character
    fn classify(&self, ch: char) -> TextCategory;

    /// Check if character can be part of an anchor
    fn is_anchor(&self, ch: char) -> bool {
        self.classify(ch).is_anchor()
    }
}

/// Binary hiragana / everything-else classifier
///
/// Katakana and kanji are both reported as [`TextCategory::Other`]: they need
/// an inferred reading, and the boundary between them carries no information
/// for alignment.
#[derive(Debug, Clone, Copy, Default)]
pub struct HiraganaClassifier;

impl HiraganaClassifier {
    /// Hiragana block, inclusive
    pub const RANGE: std::ops::RangeInclusive<char> = '\u{3040}'..='\u{309F}';
}

impl CharacterClassifier for HiraganaClassifier {
    fn classify(&self, ch: char) -> TextCategory {
        if Self::RANGE.contains(&ch) {
            TextCategory::Hiragana
        } else {
            TextCategory::Other
        }
    }
}
