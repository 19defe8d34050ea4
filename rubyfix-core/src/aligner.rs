//! Aligning a merged reading onto base text segments
//!
//! Hiragana segments reproduce verbatim inside the reading, so a hiragana
//! segment found exactly once in the unconsumed reading is a cut point. The
//! reading between two cut points belongs to the segments in between, which
//! are accumulated in a pending aggregate until the next cut point (or the
//! end of the reading) resolves them.
//!
//! Ambiguity never fails: a hiragana segment that cannot be located uniquely
//! is merged forward into the pending aggregate instead.

use crate::error::{AlignError, Result};
use crate::types::{RubySegment, TextCategory, TextSegment};

/// Merge state threaded through the scan
#[derive(Debug, Default)]
enum Pending {
    /// Every segment so far has its reading
    #[default]
    Resolved,
    /// Base text still waiting for its reading
    Open(String),
}

/// Scan state over one (segments, reading) pair
struct Aligner<'r> {
    reading: &'r str,
    /// Byte offset of the first unconsumed reading character
    cursor: usize,
    pending: Pending,
    output: Vec<RubySegment>,
}

impl<'r> Aligner<'r> {
    fn new(reading: &'r str, capacity: usize) -> Self {
        Self {
            reading,
            cursor: 0,
            pending: Pending::Resolved,
            output: Vec::with_capacity(capacity),
        }
    }

    fn remaining(&self) -> &'r str {
        &self.reading[self.cursor..]
    }

    fn consume(&mut self, len: usize) -> &'r str {
        let taken = &self.remaining()[..len];
        self.cursor += len;
        taken
    }

    /// Add `text` to the pending aggregate, opening one if needed
    fn defer(&mut self, text: &str) {
        match &mut self.pending {
            Pending::Open(acc) => acc.push_str(text),
            Pending::Resolved => self.pending = Pending::Open(text.to_owned()),
        }
    }

    /// Give the next `len` bytes of reading to the pending aggregate
    fn resolve_pending(&mut self, len: usize) {
        let reading = self.consume(len);
        // With no aggregate open the slice has no owner; maximal-run input
        // never gets here with a non-empty slice.
        if let Pending::Open(text) = std::mem::take(&mut self.pending) {
            self.output
                .push(RubySegment::new(text, TextCategory::Other, reading));
        }
    }

    fn emit_anchor(&mut self, segment: &TextSegment<'_>) {
        self.consume(segment.text.len());
        self.output.push(RubySegment::anchor(segment.text));
    }

    /// First segment, when it is hiragana: must open the reading
    fn leading(&mut self, segment: &TextSegment<'_>) {
        if self.remaining().starts_with(segment.text) {
            self.emit_anchor(segment);
        } else {
            self.defer(segment.text);
        }
    }

    fn middle(&mut self, segment: &TextSegment<'_>) {
        if segment.is_anchor() {
            if let Some(at) = unique_position(self.remaining(), segment.text) {
                self.resolve_pending(at);
                self.emit_anchor(segment);
                return;
            }
        }
        self.defer(segment.text);
    }

    /// Last segment, when it is hiragana: must close the reading
    fn trailing(&mut self, segment: &TextSegment<'_>) {
        let remaining = self.remaining();
        if let Some(head) = remaining.strip_suffix(segment.text) {
            self.resolve_pending(head.len());
            self.emit_anchor(segment);
        } else if matches!(self.pending, Pending::Open(_)) {
            self.defer(segment.text);
            self.flush();
        } else {
            self.consume(remaining.len());
            self.output.push(RubySegment::new(
                segment.text,
                TextCategory::Other,
                remaining,
            ));
        }
    }

    /// Give all remaining reading to the pending aggregate
    fn flush(&mut self) {
        let len = self.remaining().len();
        self.resolve_pending(len);
    }

    fn finish(mut self) -> Vec<RubySegment> {
        self.flush();
        self.output
    }
}

/// Byte offset of `needle` in `haystack` if it occurs exactly once
///
/// Overlapping occurrences count, so "しし" is not unique in "ししし".
fn unique_position(haystack: &str, needle: &str) -> Option<usize> {
    let first = haystack.find(needle)?;
    (haystack.rfind(needle) == Some(first)).then_some(first)
}

/// Distribute `reading` over `segments`
///
/// `segments` is expected to come from the segmenter (maximal runs, in base
/// text order). The output covers the concatenated segment texts exactly,
/// and every output segment categorised `Hiragana` reads as written.
///
/// Fewer than two segments cannot be split and yield
/// [`AlignError::NotSplittable`].
pub fn align(segments: &[TextSegment<'_>], reading: &str) -> Result<Vec<RubySegment>> {
    let (first, last) = match segments {
        [first, .., last] => (first, last),
        _ => {
            return Err(AlignError::NotSplittable {
                segments: segments.len(),
            })
        }
    };

    let mut aligner = Aligner::new(reading, segments.len());
    let mut body = segments;

    if first.is_anchor() {
        aligner.leading(first);
        body = &body[1..];
    }

    let anchored_tail = last.is_anchor() && !body.is_empty();
    if anchored_tail {
        body = &body[..body.len() - 1];
    }

    for segment in body {
        aligner.middle(segment);
    }

    if anchored_tail {
        aligner.trailing(last);
    }

    Ok(aligner.finish())
}
