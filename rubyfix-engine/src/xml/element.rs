//! Owned element subtree built from reader events

use crate::error::{EngineError, Result};
use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::io::Write;

/// Child of an [`XmlElement`]
#[derive(Debug, Clone)]
pub enum XmlNode {
    /// Nested element
    Element(XmlElement),
    /// Text, CDATA, comment or processing instruction, kept as read
    Event(Event<'static>),
}

/// An element with its full subtree
///
/// Attributes and non-element children are kept exactly as they were read,
/// so writing an unmodified subtree reproduces the original markup.
#[derive(Debug, Clone)]
pub struct XmlElement {
    start: BytesStart<'static>,
    children: Vec<XmlNode>,
    self_closing: bool,
}

impl XmlElement {
    /// Create an element with no attributes or children
    pub fn new(name: impl Into<String>) -> Self {
        Self::open(BytesStart::new(name.into()))
    }

    pub(crate) fn open(start: BytesStart<'static>) -> Self {
        Self {
            start,
            children: Vec::new(),
            self_closing: false,
        }
    }

    pub(crate) fn self_closing(start: BytesStart<'static>) -> Self {
        Self {
            start,
            children: Vec::new(),
            self_closing: true,
        }
    }

    /// Parse the first element of `xml`
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        let mut builder: Option<TreeBuilder> = None;

        loop {
            let event = reader.read_event()?.into_owned();
            if matches!(event, Event::Eof) {
                return Err(EngineError::Malformed(
                    "no complete element found".to_string(),
                ));
            }

            if let Some(open) = builder.as_mut() {
                if let Some(done) = open.feed(event) {
                    return Ok(done);
                }
                continue;
            }

            match event {
                Event::Start(start) => builder = Some(TreeBuilder::new(start)),
                Event::Empty(start) => return Ok(Self::self_closing(start)),
                _ => {}
            }
        }
    }

    /// Whether the element's local name (prefix ignored) is `local`
    pub fn is(&self, local: &str) -> bool {
        self.start.local_name().as_ref() == local.as_bytes()
    }

    /// Namespace prefix of the element name, if any
    pub fn prefix(&self) -> Option<String> {
        self.start
            .name()
            .prefix()
            .map(|p| String::from_utf8_lossy(p.as_ref()).into_owned())
    }

    /// Direct child elements
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            XmlNode::Event(_) => None,
        })
    }

    /// First direct child element named `local`
    pub fn child(&self, local: &str) -> Option<&XmlElement> {
        self.elements().find(|element| element.is(local))
    }

    /// Whether a direct child element named `local` exists
    pub fn has_child(&self, local: &str) -> bool {
        self.child(local).is_some()
    }

    /// Unescaped text of the direct text and CDATA children
    pub fn text(&self) -> Result<String> {
        let mut text = String::new();
        for node in &self.children {
            match node {
                XmlNode::Event(Event::Text(t)) => text.push_str(&t.unescape()?),
                XmlNode::Event(Event::CData(cdata)) => {
                    let bytes: &[u8] = cdata;
                    text.push_str(&String::from_utf8_lossy(bytes));
                }
                _ => {}
            }
        }
        Ok(text)
    }

    /// Append a child node
    pub fn push(&mut self, node: XmlNode) {
        self.self_closing = false;
        self.children.push(node);
    }

    /// Builder form of appending a child element
    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.push(XmlNode::Element(child));
        self
    }

    /// Append a copy of `child` when present
    pub fn with_optional(self, child: Option<&XmlElement>) -> Self {
        match child {
            Some(child) => self.with_child(child.clone()),
            None => self,
        }
    }

    /// Append escaped text; empty text adds nothing
    pub fn with_text(mut self, text: &str) -> Self {
        if !text.is_empty() {
            self.push(XmlNode::Event(Event::Text(BytesText::new(text).into_owned())));
        }
        self
    }

    /// Add an attribute to the start tag
    pub fn with_attribute(mut self, key: &str, value: &str) -> Self {
        self.start.push_attribute((key, value));
        self
    }

    /// Write the subtree
    pub fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        if self.self_closing {
            writer.write_event(Event::Empty(self.start.borrow()))?;
            return Ok(());
        }

        writer.write_event(Event::Start(self.start.borrow()))?;
        for node in &self.children {
            match node {
                XmlNode::Element(element) => element.write_to(writer)?,
                XmlNode::Event(event) => writer.write_event(event.borrow())?,
            }
        }
        writer.write_event(Event::End(self.start.to_end()))?;
        Ok(())
    }

    /// Serialize the subtree to a string
    pub fn to_xml_string(&self) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        self.write_to(&mut writer)?;
        String::from_utf8(writer.into_inner())
            .map_err(|e| EngineError::Malformed(e.to_string()))
    }
}

/// Incremental subtree construction from a stream of owned events
pub(crate) struct TreeBuilder {
    open: Vec<XmlElement>,
}

impl TreeBuilder {
    pub(crate) fn new(root: BytesStart<'static>) -> Self {
        Self {
            open: vec![XmlElement::open(root)],
        }
    }

    /// Feed one event; returns the root once its end tag arrives
    pub(crate) fn feed(&mut self, event: Event<'static>) -> Option<XmlElement> {
        match event {
            Event::Start(start) => self.open.push(XmlElement::open(start)),
            Event::Empty(start) => self.append(XmlNode::Element(XmlElement::self_closing(start))),
            Event::End(_) => {
                let done = self.open.pop()?;
                if self.open.is_empty() {
                    return Some(done);
                }
                self.append(XmlNode::Element(done));
            }
            Event::Eof => {}
            other => self.append(XmlNode::Event(other)),
        }
        None
    }

    fn append(&mut self, node: XmlNode) {
        if let Some(parent) = self.open.last_mut() {
            parent.children.push(node);
        }
    }
}
