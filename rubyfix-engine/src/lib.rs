//! Document-level ruby run correction
//!
//! This crate applies the re-alignment from `rubyfix-core` to
//! WordprocessingML documents and provides the reading extraction used to
//! review the result.
//!
//! # Architecture
//!
//! - [`xml`]: streaming walk over body paragraph runs, rewriting what a
//!   [`RunVisitor`] replaces and passing everything else through
//! - [`ruby_run`]: recognising merged ruby runs and rebuilding split ones
//! - [`resplit`] / [`extract`]: the two run visitors
//! - [`container`]: `.docx` archives and flat XML packages
//! - [`processor`]: one report per file, errors captured
//!
//! # Example
//!
//! ```rust
//! use rubyfix_engine::{resplit_document, PartLayout};
//!
//! let xml = concat!(
//!     r#"<w:document xmlns:w="urn:w"><w:body><w:p><w:r><w:ruby>"#,
//!     r#"<w:rt><w:r><w:t>よんで</w:t></w:r></w:rt>"#,
//!     r#"<w:rubyBase><w:r><w:t>読んで</w:t></w:r></w:rubyBase>"#,
//!     r#"</w:ruby></w:r></w:p></w:body></w:document>"#,
//! );
//!
//! let (output, stats) = resplit_document(xml.as_bytes(), PartLayout::Document).unwrap();
//! assert_eq!(stats.split, 1);
//! assert!(String::from_utf8(output).unwrap().contains("<w:r><w:t>んで</w:t></w:r>"));
//! ```

#![warn(missing_docs)]

pub mod container;
pub mod error;
pub mod extract;
pub mod processor;
pub mod resplit;
pub mod ruby_run;
pub mod xml;

pub use container::{DocumentFormat, DocumentSource, DOCUMENT_ENTRY};
pub use error::{EngineError, Result};
pub use extract::{extract_document, ReadingExtractor};
pub use processor::{DocumentProcessor, FileReport, Operation, Outcome, ProcessorConfig};
pub use resplit::{resplit_document, ResplitStats, RubyResplitter};
pub use ruby_run::{RubyRun, RunFormatting};
pub use xml::{PartLayout, RunVisitor, XmlElement};

// Re-export from core for convenience
pub use rubyfix_core::{RubySegment, TextCategory};
