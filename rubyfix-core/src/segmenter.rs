//! Splitting base text into maximal same-category runs

use crate::classifier::{CharacterClassifier, HiraganaClassifier};
use crate::types::{TextCategory, TextSegment};

/// Split `base` into maximal runs using the hiragana classifier
pub fn segment(base: &str) -> Vec<TextSegment<'_>> {
    segment_with(base, &HiraganaClassifier)
}

/// Split `base` into maximal runs of characters sharing a category
///
/// Segments borrow from `base` and come out in text order. Empty input
/// yields no segments.
pub fn segment_with<'a, C: CharacterClassifier + ?Sized>(
    base: &'a str,
    classifier: &C,
) -> Vec<TextSegment<'a>> {
    let mut segments = Vec::new();
    let mut current: Option<(usize, TextCategory)> = None;

    for (offset, ch) in base.char_indices() {
        let category = classifier.classify(ch);
        match current {
            Some((_, open)) if open == category => {}
            Some((start, open)) => {
                segments.push(TextSegment::new(&base[start..offset], open));
                current = Some((offset, category));
            }
            None => current = Some((offset, category)),
        }
    }

    if let Some((start, open)) = current {
        segments.push(TextSegment::new(&base[start..], open));
    }

    segments
}
