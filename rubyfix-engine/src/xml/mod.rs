//! WordprocessingML traversal

pub mod element;
pub mod walker;

pub use element::{XmlElement, XmlNode};
pub use walker::{rewrite_runs, walk_runs, PartLayout, RunVisitor, DOCUMENT_PART_NAME};
