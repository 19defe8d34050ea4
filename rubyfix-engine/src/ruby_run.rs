//! Merged ruby runs and their rebuilt replacements

use crate::error::Result;
use crate::xml::XmlElement;
use rubyfix_core::RubySegment;

/// Formatting carried over from a merged run to every rebuilt run
#[derive(Debug, Clone, Default)]
pub struct RunFormatting {
    /// Namespace prefix of the source run (`w` in practice)
    pub prefix: Option<String>,
    /// `w:rPr` of the run itself
    pub run: Option<XmlElement>,
    /// `w:rubyPr` of the ruby
    pub ruby: Option<XmlElement>,
    /// `w:rPr` of the reading run inside `w:rt`
    pub reading: Option<XmlElement>,
    /// `w:rPr` of the base run inside `w:rubyBase`
    pub base: Option<XmlElement>,
}

impl RunFormatting {
    fn name(&self, local: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}:{local}"),
            None => local.to_string(),
        }
    }

    fn text(&self, text: &str) -> XmlElement {
        let element = XmlElement::new(self.name("t"));
        let element = if needs_preserve(text) {
            element.with_attribute("xml:space", "preserve")
        } else {
            element
        };
        element.with_text(text)
    }

    fn inner_run(&self, properties: Option<&XmlElement>, text: &str) -> XmlElement {
        XmlElement::new(self.name("r"))
            .with_optional(properties)
            .with_child(self.text(text))
    }
}

fn needs_preserve(text: &str) -> bool {
    text.starts_with(char::is_whitespace) || text.ends_with(char::is_whitespace)
}

/// A run carrying one ruby annotation over its whole base text
#[derive(Debug, Clone)]
pub struct RubyRun {
    /// Text of `w:rubyBase/w:r/w:t`
    pub base: String,
    /// Text of `w:rt/w:r/w:t`
    pub reading: String,
    /// Formatting to reapply on rebuilt runs
    pub formatting: RunFormatting,
}

impl RubyRun {
    /// Recognise a ruby run
    ///
    /// Returns `None` for anything else: runs with direct text, runs without
    /// `w:ruby`, and rubies missing either the reading or the base text.
    pub fn from_run(run: &XmlElement) -> Result<Option<Self>> {
        if !run.is("r") || run.has_child("t") {
            return Ok(None);
        }
        let Some(ruby) = run.child("ruby") else {
            return Ok(None);
        };

        let reading_run = ruby.child("rt").and_then(|rt| rt.child("r"));
        let base_run = ruby.child("rubyBase").and_then(|base| base.child("r"));

        let (Some(reading_t), Some(base_t)) = (
            reading_run.and_then(|r| r.child("t")),
            base_run.and_then(|r| r.child("t")),
        ) else {
            return Ok(None);
        };

        Ok(Some(Self {
            base: base_t.text()?,
            reading: reading_t.text()?,
            formatting: RunFormatting {
                prefix: run.prefix(),
                run: run.child("rPr").cloned(),
                ruby: ruby.child("rubyPr").cloned(),
                reading: reading_run.and_then(|r| r.child("rPr")).cloned(),
                base: base_run.and_then(|r| r.child("rPr")).cloned(),
            },
        }))
    }

    /// Build one run per segment
    ///
    /// Anchors become plain text runs; every other segment gets its own
    /// ruby with the segment's reading.
    pub fn to_runs(&self, segments: &[RubySegment]) -> Vec<XmlElement> {
        let fmt = &self.formatting;
        segments
            .iter()
            .map(|segment| {
                let content = if segment.is_anchor() {
                    fmt.text(&segment.text)
                } else {
                    XmlElement::new(fmt.name("ruby"))
                        .with_optional(fmt.ruby.as_ref())
                        .with_child(
                            XmlElement::new(fmt.name("rt"))
                                .with_child(fmt.inner_run(fmt.reading.as_ref(), &segment.reading)),
                        )
                        .with_child(
                            XmlElement::new(fmt.name("rubyBase"))
                                .with_child(fmt.inner_run(fmt.base.as_ref(), &segment.text)),
                        )
                };
                XmlElement::new(fmt.name("r"))
                    .with_optional(fmt.run.as_ref())
                    .with_child(content)
            })
            .collect()
    }
}
