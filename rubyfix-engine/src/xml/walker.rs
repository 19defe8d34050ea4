//! Streaming traversal of body paragraph runs
//!
//! The main document part is streamed event by event into a writer. Every
//! `w:r` that is a direct child of a body paragraph is collected into an
//! [`XmlElement`] and offered to a [`RunVisitor`], which may replace it.
//! Everything else is written back unchanged.

use super::element::{TreeBuilder, XmlElement};
use crate::error::{EngineError, Result};
use log::trace;
use quick_xml::events::{BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::io::Write;

/// Name of the main document part inside a flat XML package
pub const DOCUMENT_PART_NAME: &str = "/word/document.xml";

/// Where the `w:document` element sits in the XML being walked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartLayout {
    /// `w:document` is the root (the `word/document.xml` archive entry)
    Document,
    /// `pkg:package/pkg:part/pkg:xmlData/w:document` (flat XML package)
    Package,
}

impl PartLayout {
    /// Element path leading to `w:document`
    fn document_path(self) -> &'static [&'static str] {
        match self {
            PartLayout::Document => &[],
            PartLayout::Package => &["package", "part", "xmlData"],
        }
    }
}

/// Receives each body paragraph run during a walk
pub trait RunVisitor {
    /// Inspect a run; return replacement runs, or `None` to keep it as is
    fn visit_run(&mut self, run: &XmlElement) -> Result<Option<Vec<XmlElement>>>;

    /// Called when a body paragraph closes
    fn end_paragraph(&mut self) {}
}

/// Position tracking and structural validation during a walk
struct Scope {
    layout: PartLayout,
    path: Vec<Vec<u8>>,
    in_document_part: bool,
    document_parts: usize,
    saw_root: bool,
    saw_xml_data: bool,
    saw_document: bool,
    saw_body: bool,
}

impl Scope {
    fn new(layout: PartLayout) -> Self {
        Self {
            layout,
            path: Vec::new(),
            in_document_part: false,
            document_parts: 0,
            saw_root: false,
            saw_xml_data: false,
            saw_document: false,
            saw_body: false,
        }
    }

    /// Path below the document part's container, if inside it
    fn relative(&self) -> Option<&[Vec<u8>]> {
        let prefix = self.layout.document_path();
        if self.layout == PartLayout::Package && !self.in_document_part {
            return None;
        }
        if self.path.len() < prefix.len() {
            return None;
        }
        let (head, tail) = self.path.split_at(prefix.len());
        head.iter()
            .zip(prefix)
            .all(|(seen, expected)| seen.as_slice() == expected.as_bytes())
            .then_some(tail)
    }

    fn relative_is(&self, expected: &[&str]) -> bool {
        self.relative().is_some_and(|tail| {
            tail.len() == expected.len()
                && tail
                    .iter()
                    .zip(expected)
                    .all(|(seen, name)| seen.as_slice() == name.as_bytes())
        })
    }

    fn at_body(&self) -> bool {
        self.relative_is(&["document", "body"])
    }

    fn at_paragraph(&self) -> bool {
        self.relative_is(&["document", "body", "p"])
    }

    fn path_is(&self, expected: &[&str]) -> bool {
        self.path.len() == expected.len()
            && self
                .path
                .iter()
                .zip(expected)
                .all(|(seen, name)| seen.as_slice() == name.as_bytes())
    }

    fn enter(&mut self, start: &BytesStart<'_>) -> Result<()> {
        let local = start.local_name().as_ref().to_vec();

        if self.path.is_empty() {
            let expected = match self.layout {
                PartLayout::Document => "document",
                PartLayout::Package => "package",
            };
            if local != expected.as_bytes() {
                return Err(match self.layout {
                    PartLayout::Document => EngineError::MissingElement("w:document"),
                    PartLayout::Package => EngineError::PackageFormat,
                });
            }
            self.saw_root = true;
        }

        if self.layout == PartLayout::Package {
            if self.path_is(&["package"]) && local == b"part" {
                self.in_document_part = part_name(start).as_deref() == Some(DOCUMENT_PART_NAME);
                if self.in_document_part {
                    self.document_parts += 1;
                }
            }
            if self.in_document_part && self.path_is(&["package", "part"]) && local == b"xmlData" {
                self.saw_xml_data = true;
            }
        }

        if self.relative_is(&[]) && local == b"document" {
            self.saw_document = true;
        }
        if self.relative_is(&["document"]) && local == b"body" {
            self.saw_body = true;
        }

        self.path.push(local);
        Ok(())
    }

    fn leave(&mut self) {
        self.path.pop();
        if self.layout == PartLayout::Package && self.path_is(&["package"]) {
            self.in_document_part = false;
        }
    }

    fn finish(self) -> Result<()> {
        if self.layout == PartLayout::Package {
            if !self.saw_root {
                return Err(EngineError::PackageFormat);
            }
            if self.document_parts != 1 {
                return Err(EngineError::DocumentPartNotFound);
            }
            if !self.saw_xml_data {
                return Err(EngineError::DocumentDataMissing);
            }
        }
        if !self.saw_document {
            return Err(EngineError::MissingElement("w:document"));
        }
        if !self.saw_body {
            return Err(EngineError::MissingElement("w:body"));
        }
        Ok(())
    }
}

fn part_name(start: &BytesStart<'_>) -> Option<String> {
    start
        .attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == b"name")
        .and_then(|attr| attr.unescape_value().ok().map(|value| value.into_owned()))
}

fn is_local(start: &BytesStart<'_>, local: &str) -> bool {
    start.local_name().as_ref() == local.as_bytes()
}

/// Walk `xml`, letting `visitor` replace body paragraph runs
///
/// Returns the rewritten XML. Structural problems (missing `w:document`,
/// `w:body`, or package parts) are reported after the walk, in the order a
/// reader of the file would run into them.
pub fn rewrite_runs<V: RunVisitor + ?Sized>(
    xml: &[u8],
    layout: PartLayout,
    visitor: &mut V,
) -> Result<Vec<u8>> {
    walk_runs(xml, layout, visitor, Vec::with_capacity(xml.len()))
}

/// Like [`rewrite_runs`], streaming the output into `sink`
///
/// Read-only visitors pass [`std::io::sink`].
pub fn walk_runs<V: RunVisitor + ?Sized, W: Write>(
    xml: &[u8],
    layout: PartLayout,
    visitor: &mut V,
    sink: W,
) -> Result<W> {
    let mut reader = Reader::from_reader(xml);
    let mut writer = Writer::new(sink);
    let mut buf = Vec::new();
    let mut scope = Scope::new(layout);
    let mut capture: Option<TreeBuilder> = None;
    let mut runs = 0usize;

    loop {
        let event = reader.read_event_into(&mut buf)?.into_owned();
        buf.clear();

        if let Some(builder) = capture.as_mut() {
            if matches!(event, Event::Eof) {
                return Err(EngineError::Malformed(
                    "document ends inside a run".to_string(),
                ));
            }
            if let Some(run) = builder.feed(event) {
                capture = None;
                runs += 1;
                match visitor.visit_run(&run)? {
                    Some(replacement) => {
                        for element in &replacement {
                            element.write_to(&mut writer)?;
                        }
                    }
                    None => run.write_to(&mut writer)?,
                }
            }
            continue;
        }

        match &event {
            Event::Start(start) => {
                if scope.at_paragraph() && is_local(start, "r") {
                    capture = Some(TreeBuilder::new(start.clone()));
                    continue;
                }
                scope.enter(start)?;
            }
            Event::Empty(start) => {
                if scope.at_body() && is_local(start, "p") {
                    visitor.end_paragraph();
                }
                scope.enter(start)?;
                scope.leave();
            }
            Event::End(_) => {
                if scope.at_paragraph() {
                    visitor.end_paragraph();
                }
                scope.leave();
            }
            Event::Eof => break,
            _ => {}
        }

        writer.write_event(event)?;
    }

    scope.finish()?;
    trace!("walked {runs} body paragraph run(s)");
    Ok(writer.into_inner())
}
