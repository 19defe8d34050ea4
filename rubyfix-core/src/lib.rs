//! Ruby (furigana) re-alignment for merged base text runs
//!
//! Word processors sometimes merge several independently annotated runs into
//! a single run carrying one combined reading. This crate recovers which
//! slice of the reading belongs to which part of the base text, so that each
//! part can carry its own annotation again.
//!
//! # Architecture
//!
//! - **Segmenter**: splits base text into maximal runs of hiragana and
//!   everything else
//! - **Aligner**: uses hiragana runs as anchors inside the reading and hands
//!   the gaps to the unresolved runs in between
//!
//! # Example
//!
//! ```rust
//! use rubyfix_core::{realign, TextCategory};
//!
//! let segments = realign("読んで", "よんで").unwrap();
//!
//! assert_eq!(segments.len(), 2);
//! assert_eq!(segments[0].text, "読");
//! assert_eq!(segments[0].reading, "よ");
//! assert_eq!(segments[1].category, TextCategory::Hiragana);
//! ```

#![warn(missing_docs)]

pub mod aligner;
pub mod classifier;
pub mod error;
pub mod segmenter;
pub mod types;

pub use aligner::align;
pub use classifier::{CharacterClassifier, HiraganaClassifier};
pub use error::{AlignError, Result};
pub use segmenter::{segment, segment_with};
pub use types::{RubySegment, TextCategory, TextSegment};

/// Segment `base` and align `reading` onto the segments
///
/// Returns [`AlignError::NotSplittable`] when the base text forms fewer than
/// two segments; such runs should be left as they are.
pub fn realign(base: &str, reading: &str) -> Result<Vec<RubySegment>> {
    realign_with(base, reading, &HiraganaClassifier)
}

/// Same as [`realign`] with a caller-supplied classifier
pub fn realign_with<C: CharacterClassifier + ?Sized>(
    base: &str,
    reading: &str,
    classifier: &C,
) -> Result<Vec<RubySegment>> {
    let segments = segment_with(base, classifier);
    align(&segments, reading)
}
