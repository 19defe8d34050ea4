//! Splitting merged ruby runs back into per-segment runs

use crate::error::Result;
use crate::ruby_run::RubyRun;
use crate::xml::{rewrite_runs, PartLayout, RunVisitor, XmlElement};
use log::debug;
use rubyfix_core::{align, segment_with, AlignError, CharacterClassifier, HiraganaClassifier};

/// Counters collected while re-splitting one document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResplitStats {
    /// Body paragraph runs inspected
    pub runs_seen: usize,
    /// Runs recognised as merged ruby runs
    pub candidates: usize,
    /// Candidates replaced by split runs
    pub split: usize,
    /// Candidates whose base text is a single segment
    pub unsplittable: usize,
    /// Candidates where no anchor could be placed
    pub unresolved: usize,
    /// Runs written in place of the split candidates
    pub runs_written: usize,
}

impl ResplitStats {
    /// Accumulate another document's counters
    pub fn merge(&mut self, other: &ResplitStats) {
        self.runs_seen += other.runs_seen;
        self.candidates += other.candidates;
        self.split += other.split;
        self.unsplittable += other.unsplittable;
        self.unresolved += other.unresolved;
        self.runs_written += other.runs_written;
    }
}

/// Run visitor replacing merged ruby runs
#[derive(Debug, Default)]
pub struct RubyResplitter<C = HiraganaClassifier> {
    classifier: C,
    stats: ResplitStats,
}

impl RubyResplitter {
    /// Resplitter using the hiragana classifier
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: CharacterClassifier> RubyResplitter<C> {
    /// Resplitter using a custom classifier
    pub fn with_classifier(classifier: C) -> Self {
        Self {
            classifier,
            stats: ResplitStats::default(),
        }
    }

    /// Counters so far
    pub fn stats(&self) -> ResplitStats {
        self.stats
    }
}

impl<C: CharacterClassifier> RunVisitor for RubyResplitter<C> {
    fn visit_run(&mut self, run: &XmlElement) -> Result<Option<Vec<XmlElement>>> {
        self.stats.runs_seen += 1;
        let Some(ruby) = RubyRun::from_run(run)? else {
            return Ok(None);
        };
        self.stats.candidates += 1;

        let segments = segment_with(&ruby.base, &self.classifier);
        match align(&segments, &ruby.reading) {
            Err(AlignError::NotSplittable { .. }) => {
                self.stats.unsplittable += 1;
                Ok(None)
            }
            // everything merged back into one aggregate: the source run already says that
            Ok(aligned) if aligned.len() < 2 => {
                debug!("no anchor placed in '{}' / '{}'", ruby.base, ruby.reading);
                self.stats.unresolved += 1;
                Ok(None)
            }
            Ok(aligned) => {
                self.stats.split += 1;
                self.stats.runs_written += aligned.len();
                Ok(Some(ruby.to_runs(&aligned)))
            }
        }
    }
}

/// Re-split every merged ruby run in a document part
pub fn resplit_document(xml: &[u8], layout: PartLayout) -> Result<(Vec<u8>, ResplitStats)> {
    let mut resplitter = RubyResplitter::new();
    let output = rewrite_runs(xml, layout, &mut resplitter)?;
    Ok((output, resplitter.stats()))
}
