//! Segment types shared by the segmenter and the aligner

/// Script category of a run of base text
///
/// Only [`TextCategory::Hiragana`] takes part in alignment as an anchor.
/// `Katakana` and `Kanji` exist so that finer classifiers can be plugged in,
/// but the aligner treats them exactly like `Other`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TextCategory {
    /// Hiragana (U+3040..=U+309F), reads as written
    Hiragana,
    /// Katakana
    Katakana,
    /// CJK ideographs
    Kanji,
    /// Anything else
    Other,
}

impl TextCategory {
    /// Whether text of this category can serve as an alignment anchor
    pub fn is_anchor(self) -> bool {
        matches!(self, TextCategory::Hiragana)
    }
}

/// A maximal run of base text sharing one category
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TextSegment<'a> {
    /// Slice of the base text
    pub text: &'a str,
    /// Category shared by every character of `text`
    pub category: TextCategory,
}

impl<'a> TextSegment<'a> {
    /// Create a new segment
    pub fn new(text: &'a str, category: TextCategory) -> Self {
        Self { text, category }
    }

    /// Whether this segment can anchor the alignment
    pub fn is_anchor(&self) -> bool {
        self.category.is_anchor()
    }
}

/// A piece of base text together with the reading assigned to it
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RubySegment {
    /// Base text covered by this segment
    pub text: String,
    /// `Hiragana` for resolved anchors, `Other` for everything else
    pub category: TextCategory,
    /// Reading assigned to `text`; may be empty
    pub reading: String,
}

impl RubySegment {
    /// Create a new ruby segment
    pub fn new(
        text: impl Into<String>,
        category: TextCategory,
        reading: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            category,
            reading: reading.into(),
        }
    }

    /// A hiragana anchor, read as written
    pub fn anchor(text: &str) -> Self {
        Self::new(text, TextCategory::Hiragana, text)
    }

    /// Whether this segment was resolved as a hiragana anchor
    pub fn is_anchor(&self) -> bool {
        self.category.is_anchor()
    }
}
