//! Reading extraction: the text of a document as it is read aloud

use crate::error::Result;
use crate::xml::{walk_runs, PartLayout, RunVisitor, XmlElement};

/// Run visitor collecting the read text of body paragraphs
#[derive(Debug, Clone)]
pub struct ReadingExtractor {
    mark_colored_runs: bool,
    text: String,
}

impl Default for ReadingExtractor {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ReadingExtractor {
    /// Create an extractor
    ///
    /// With `mark_colored_runs`, ruby runs whose run properties set a color
    /// are written as `[base](reading)` so they stand out for review.
    pub fn new(mark_colored_runs: bool) -> Self {
        Self {
            mark_colored_runs,
            text: String::new(),
        }
    }

    /// Text collected so far
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consume the extractor, returning the collected text
    pub fn into_text(self) -> String {
        self.text
    }

    fn is_colored(run: &XmlElement) -> bool {
        run.child("rPr").is_some_and(|rpr| rpr.has_child("color"))
    }

    fn ruby_text(ruby: &XmlElement, container: &str) -> Result<Option<String>> {
        ruby.child(container)
            .and_then(|c| c.child("r"))
            .and_then(|r| r.child("t"))
            .map(XmlElement::text)
            .transpose()
    }
}

impl RunVisitor for ReadingExtractor {
    fn visit_run(&mut self, run: &XmlElement) -> Result<Option<Vec<XmlElement>>> {
        if let Some(t) = run.child("t") {
            self.text.push_str(&t.text()?);
        } else if let Some(ruby) = run.child("ruby") {
            let reading = Self::ruby_text(ruby, "rt")?;
            let base = Self::ruby_text(ruby, "rubyBase")?;

            if self.mark_colored_runs && Self::is_colored(run) {
                if let Some(base) = base {
                    self.text.push('[');
                    self.text.push_str(&base);
                    self.text.push(']');
                }
                if let Some(reading) = reading {
                    self.text.push('(');
                    self.text.push_str(&reading);
                    self.text.push(')');
                }
            } else if let Some(shown) = reading.or(base) {
                self.text.push_str(&shown);
            }
        }
        Ok(None)
    }

    fn end_paragraph(&mut self) {
        self.text.push('\n');
    }
}

/// Extract the read text of a document part, one line per body paragraph
pub fn extract_document(xml: &[u8], layout: PartLayout, mark_colored_runs: bool) -> Result<String> {
    let mut extractor = ReadingExtractor::new(mark_colored_runs);
    walk_runs(xml, layout, &mut extractor, std::io::sink())?;
    Ok(extractor.into_text())
}
